pub mod archive;
pub mod assistant;
pub mod error;
pub mod git;
pub mod materialize;
pub mod pipeline;
pub mod release;
pub mod tools;
pub mod tracker;

pub use error::{Result, SpecifyError};
