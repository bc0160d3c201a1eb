pub mod editing;
pub mod error;
pub mod models;
pub mod producer;

#[cfg(test)]
pub mod tests;

// Re-export key types for easier usage
pub use editing::*;
pub use error::{RangeProblem, Result, RevisionError};
pub use models::*;
pub use producer::*;
