use thiserror::Error;

/// Failures the simulation core can report to its caller
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GameError {
    /// Every cell of the grid is taken, so no food can be placed
    #[error("no free cell left on the {width}x{height} grid to place food")]
    NoFreeCell { width: usize, height: usize },

    #[error("unknown game mode `{0}` (expected single, two-player or vs-ai)")]
    UnknownMode(String),

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}
