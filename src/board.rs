use std::fmt;

/// Number of cells on the board.
pub const CELL_COUNT: usize = 9;

/// Side length of the (only supported) square board.
pub const BOARD_SIZE: usize = 3;

/// Cell the automated player opens with when no other opening is configured.
pub const CENTER_CELL: u8 = 5;

/// The eight winning lines as 0-based cell offsets, in the order they are checked:
/// rows top to bottom, columns left to right, then the main and anti diagonals.
pub const WINNING_LINES: [[usize; 3]; 8] = [
    [0, 1, 2],
    [3, 4, 5],
    [6, 7, 8],
    [0, 3, 6],
    [1, 4, 7],
    [2, 5, 8],
    [0, 4, 8],
    [2, 4, 6],
];

/// A mark placed on the board.
///
/// `X` always moves first and is the mark the automated player plays with.
/// Scores are expressed from its point of view.
#[derive(Debug, PartialEq, Eq, Hash, Copy, Clone)]
pub enum Mark {
    /// The automated player.
    X,
    /// The human (or simulated) opponent.
    O,
}

impl Mark {
    /// Returns the other mark.
    pub fn opponent(self) -> Mark {
        match self {
            Mark::X => Mark::O,
            Mark::O => Mark::X,
        }
    }

    /// The character used by the console rendering.
    pub fn symbol(self) -> char {
        match self {
            Mark::X => 'x',
            Mark::O => 'o',
        }
    }
}

impl fmt::Display for Mark {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

/// Represents the possible outcomes of a position.
#[derive(Debug, PartialEq, Eq, Hash, Copy, Clone)]
pub enum GameOutcome {
    /// The game is still ongoing.
    InProgress = 0,
    /// Three `X` marks in a line.
    XWins = 1,
    /// Three `O` marks in a line.
    OWins = 2,
    /// The board is full and no line was completed.
    Draw = 3,
}

impl GameOutcome {
    /// Whether the game has ended.
    pub fn is_terminal(self) -> bool {
        self != GameOutcome::InProgress
    }

    /// +1 for an `X` win, -1 for an `O` win, 0 for a draw and `None` while the game goes on.
    pub fn score(self) -> Option<i8> {
        match self {
            GameOutcome::InProgress => None,
            GameOutcome::XWins => Some(1),
            GameOutcome::OWins => Some(-1),
            GameOutcome::Draw => Some(0),
        }
    }

    /// The winning mark, if any.
    pub fn winner(self) -> Option<Mark> {
        match self {
            GameOutcome::XWins => Some(Mark::X),
            GameOutcome::OWins => Some(Mark::O),
            GameOutcome::InProgress | GameOutcome::Draw => None,
        }
    }

    pub(crate) fn won_by(mark: Mark) -> Self {
        match mark {
            Mark::X => GameOutcome::XWins,
            Mark::O => GameOutcome::OWins,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn score_is_defined_only_for_terminal_outcomes() {
        for outcome in [
            GameOutcome::InProgress,
            GameOutcome::XWins,
            GameOutcome::OWins,
            GameOutcome::Draw,
        ] {
            assert_eq!(outcome.is_terminal(), outcome.score().is_some());
        }
        assert_eq!(GameOutcome::XWins.score(), Some(1));
        assert_eq!(GameOutcome::OWins.score(), Some(-1));
        assert_eq!(GameOutcome::Draw.score(), Some(0));
    }

    #[test]
    fn opponent_alternates() {
        assert_eq!(Mark::X.opponent(), Mark::O);
        assert_eq!(Mark::O.opponent(), Mark::X);
        assert_eq!(GameOutcome::won_by(Mark::O).winner(), Some(Mark::O));
    }
}
