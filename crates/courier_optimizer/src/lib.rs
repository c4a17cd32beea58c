pub mod checker;
pub mod error;
pub mod extraction;
pub mod json;
pub mod model;
pub mod parsers;
pub mod problem;
pub mod solver;
mod utils;
pub mod validation;

#[cfg(test)]
pub(crate) mod test_utils;
