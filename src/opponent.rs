use crate::error::EngineError;
use crate::position::Position;
use crate::random::{RandomGenerator, StandardRandomGenerator};

/// A move picked by the automated player.
#[derive(Debug, Clone, PartialEq)]
pub struct MoveChoice {
    /// The 1-based cell that was marked.
    pub cell: u8,
    /// The evaluation of every candidate, or `None` when the move came from the opening book.
    pub evaluations: Option<Vec<(u8, f64)>>,
}

/// The player facing the engine: supplies the `O` moves of a session.
pub trait Opponent {
    type Error: From<EngineError>;

    /// Picks a cell to mark in `position`.
    fn choose_move(&mut self, position: &Position) -> Result<u8, Self::Error>;

    /// Called when the cell returned by `choose_move` was not a legal move.
    /// The session asks again afterwards.
    fn on_illegal_move(&mut self, _cell: u8) {}

    /// Called after the automated player has moved.
    fn on_automated_move(&mut self, _choice: &MoveChoice) {}
}

/// Plays a uniformly random legal move.
#[derive(Debug, Default, Clone)]
pub struct RandomOpponent<K: RandomGenerator = StandardRandomGenerator> {
    random: K,
}

impl<K: RandomGenerator> RandomOpponent<K> {
    pub fn new(random: K) -> Self {
        Self { random }
    }
}

impl<K: RandomGenerator> Opponent for RandomOpponent<K> {
    type Error = EngineError;

    fn choose_move(&mut self, position: &Position) -> Result<u8, EngineError> {
        let moves = position.legal_moves();
        self.random
            .choose(&moves)
            .copied()
            .ok_or(EngineError::GameOver)
    }
}
