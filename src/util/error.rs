use thiserror::Error;

/// Errors raised by the game core and its collaborators.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum GameError {
    /// Windowing, input or graphics subsystem could not be brought up.
    #[error("initialization failed: {0}")]
    Initialization(String),

    /// A sequence longer than the fixed buffer was requested.
    #[error("sequence capacity exceeded: requested {requested}, capacity {capacity}")]
    CapacityExceeded { requested: usize, capacity: usize },

    /// Levels start at 1.
    #[error("invalid level: {0}")]
    InvalidLevel(u8),

    /// Backing memory for a sequence or render scratch could not be reserved.
    #[error("allocation failed: requested {requested}, capacity {capacity}")]
    Allocation { requested: usize, capacity: usize },

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}
