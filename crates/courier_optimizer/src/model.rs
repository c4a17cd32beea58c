//! Graph model handed to the optimizer: nodes, the optional sink, and the dimensions
//! tracked along every vehicle route.

pub mod dimension;
pub mod node_lookup;
pub mod routing_model;
