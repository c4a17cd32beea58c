pub mod local_search;
pub mod optimizer;
pub mod pipeline;
pub mod search_params;
