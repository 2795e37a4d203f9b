//! Error types for layout and session construction.
//!
//! Navigation itself never fails: focus requests on unknown nodes are
//! ignored and reported through the return value instead.

use thiserror::Error;

/// Errors surfaced to callers of the layout and session constructors.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum VizError {
    /// Rejection sampling ran out of attempts while placing a node.
    ///
    /// Recoverable by retrying with a larger radius, a smaller minimum
    /// separation, a bigger attempt budget or the spiral layout.
    #[error(
        "could not place node {index} of {count}: no candidate farther than \
         {min_separation} from the accepted points after {attempts} attempts"
    )]
    LayoutUnsatisfiable {
        index: usize,
        count: usize,
        min_separation: f32,
        attempts: u32,
    },

    /// A configuration value is outside its valid range.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

pub type Result<T> = std::result::Result<T, VizError>;
