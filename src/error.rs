use thiserror::Error;

/// Errors produced by the engine and the game session.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EngineError {
    /// The cell is occupied or outside `1..=9`.
    #[error("Illegal move: cell {cell}")]
    IllegalMove { cell: u8 },

    /// A subtree contained no terminal position to average over.
    #[error("Subtree has no terminal positions to evaluate")]
    EmptySubtree,

    /// Only the 3x3 board is supported.
    #[error("Unsupported board size: {size} (only 3 is supported)")]
    UnsupportedBoardSize { size: usize },

    /// The position is already terminal.
    #[error("Game is already over")]
    GameOver,

    /// A session operation was called for the player who is not on move.
    #[error("Not your turn")]
    NotYourTurn,

    /// A textual board could not be parsed.
    #[error("Invalid board: {reason}")]
    InvalidBoard { reason: String },

    /// The node id does not belong to this tree.
    #[error("Unknown tree node")]
    UnknownNode,
}

/// Result type used throughout the crate.
pub type Result<T> = std::result::Result<T, EngineError>;
