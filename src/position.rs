use crate::board::{CELL_COUNT, GameOutcome, Mark, WINNING_LINES};
use crate::error::{EngineError, Result};
use std::fmt;
use std::str::FromStr;

/// A single tic-tac-toe board configuration plus the mark to move next.
///
/// The board is represented by a 9-element array in row-major order. Moves are
/// 1-based cell indices from 1 (top left) to 9 (bottom right).
/// The outcome is recomputed after every move, so `outcome()` and `score()` are
/// always in sync with the cells.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Position {
    cells: [Option<Mark>; CELL_COUNT],
    turn: Mark,
    outcome: GameOutcome,
}

impl Position {
    /// Creates a position from raw cells and the mark to move.
    pub fn from_cells(cells: [Option<Mark>; CELL_COUNT], turn: Mark) -> Self {
        let mut position = Self {
            cells,
            turn,
            outcome: GameOutcome::InProgress,
        };
        position.outcome = position.terminal_status();
        position
    }

    /// Creates a position from three rows, top to bottom.
    pub fn from_rows(rows: [[Option<Mark>; 3]; 3], turn: Mark) -> Self {
        let mut cells = [None; CELL_COUNT];
        for (r, row) in rows.iter().enumerate() {
            cells[r * 3..r * 3 + 3].copy_from_slice(row);
        }
        Self::from_cells(cells, turn)
    }

    pub fn cells(&self) -> &[Option<Mark>; CELL_COUNT] {
        &self.cells
    }

    /// Returns the mark at a 1-based cell index, `None` for an empty or out of range cell.
    pub fn cell(&self, cell: u8) -> Option<Mark> {
        Self::offset(cell).and_then(|i| self.cells[i])
    }

    /// The mark to move next.
    pub fn turn(&self) -> Mark {
        self.turn
    }

    /// The mark that moves after the current one.
    pub fn next_turn_mark(&self) -> Mark {
        self.turn.opponent()
    }

    pub fn outcome(&self) -> GameOutcome {
        self.outcome
    }

    pub fn is_terminal(&self) -> bool {
        self.outcome.is_terminal()
    }

    /// The outcome value of a terminal position, `None` while the game goes on.
    pub fn score(&self) -> Option<i8> {
        self.outcome.score()
    }

    pub fn occupied_count(&self) -> usize {
        self.cells.iter().filter(|x| x.is_some()).count()
    }

    /// Places `mark` on the empty cell `cell` and hands the turn to the other mark.
    ///
    /// Fails with [`EngineError::IllegalMove`] for an occupied or out of range cell,
    /// in which case the position is left untouched.
    pub fn apply_move(&mut self, cell: u8, mark: Mark) -> Result<()> {
        let offset = match Self::offset(cell) {
            Some(offset) if self.cells[offset].is_none() => offset,
            _ => return Err(EngineError::IllegalMove { cell }),
        };

        self.cells[offset] = Some(mark);
        self.turn = mark.opponent();
        self.outcome = self.terminal_status();
        Ok(())
    }

    /// Returns the position reached by the player on move marking `cell`.
    ///
    /// Only the cell array is copied; `self` is not modified.
    pub fn successor(&self, cell: u8) -> Result<Position> {
        let mut next = Position {
            cells: self.cells,
            turn: self.turn,
            outcome: self.outcome,
        };
        next.apply_move(cell, self.turn)?;
        Ok(next)
    }

    /// Returns every empty cell, in ascending order.
    pub fn legal_moves(&self) -> Vec<u8> {
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, x)| x.is_none())
            .map(|(i, _)| i as u8 + 1)
            .collect()
    }

    /// Checks rows, then columns, then the two diagonals for a completed line.
    ///
    /// The first completed line found in that order decides the winner. Boards with
    /// several completed lines only arise from illegal move sequences, so which one
    /// wins there is defined but arbitrary. A full board without a line is a draw.
    pub fn terminal_status(&self) -> GameOutcome {
        for [a, b, c] in WINNING_LINES {
            if let Some(mark) = self.cells[a] {
                if self.cells[b] == Some(mark) && self.cells[c] == Some(mark) {
                    return GameOutcome::won_by(mark);
                }
            }
        }

        if self.cells.iter().any(|x| x.is_none()) {
            GameOutcome::InProgress
        } else {
            GameOutcome::Draw
        }
    }

    fn offset(cell: u8) -> Option<usize> {
        match cell {
            1..=9 => Some(cell as usize - 1),
            _ => None,
        }
    }
}

impl Default for Position {
    /// The empty board with `X` to move.
    fn default() -> Self {
        Position::from_cells([None; CELL_COUNT], Mark::X)
    }
}

impl fmt::Display for Position {
    /// Renders the board as three lines of space separated marks, `-` for empty cells.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.cells.chunks(3) {
            let symbols: Vec<String> = row
                .iter()
                .map(|cell| cell.map_or('-', Mark::symbol).to_string())
                .collect();
            writeln!(f, "{}", symbols.join(" "))?;
        }
        Ok(())
    }
}

impl FromStr for Position {
    type Err = EngineError;

    /// Parses nine cells written as `x`, `o` or `-`, ignoring whitespace.
    ///
    /// The mark to move is inferred from the counts: `X` when both marks have been
    /// played equally often, `O` otherwise.
    fn from_str(s: &str) -> Result<Self> {
        let mut cells = [None; CELL_COUNT];
        let mut count = 0;
        for ch in s.chars().filter(|c| !c.is_whitespace()) {
            if count == CELL_COUNT {
                return Err(EngineError::InvalidBoard {
                    reason: format!("more than {CELL_COUNT} cells"),
                });
            }
            cells[count] = match ch.to_ascii_lowercase() {
                'x' => Some(Mark::X),
                'o' => Some(Mark::O),
                '-' => None,
                other => {
                    return Err(EngineError::InvalidBoard {
                        reason: format!("unexpected character '{other}'"),
                    });
                }
            };
            count += 1;
        }
        if count != CELL_COUNT {
            return Err(EngineError::InvalidBoard {
                reason: format!("expected {CELL_COUNT} cells, got {count}"),
            });
        }

        let xs = cells.iter().filter(|c| **c == Some(Mark::X)).count();
        let os = cells.iter().filter(|c| **c == Some(Mark::O)).count();
        let turn = if xs == os { Mark::X } else { Mark::O };
        Ok(Position::from_cells(cells, turn))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const X: Option<Mark> = Some(Mark::X);
    const O: Option<Mark> = Some(Mark::O);
    const E: Option<Mark> = None;

    #[test]
    fn opening_in_the_center() {
        // arrange
        let mut position = Position::default();

        // act
        position.apply_move(5, Mark::X).unwrap();

        // assert
        assert_eq!(position.cell(5), Some(Mark::X));
        assert_eq!(position.occupied_count(), 1);
        assert_eq!(position.turn(), Mark::O);
        assert_eq!(position.legal_moves(), vec![1, 2, 3, 4, 6, 7, 8, 9]);
        assert_eq!(position.outcome(), GameOutcome::InProgress);
        assert_eq!(position.score(), None);
    }

    #[test]
    fn top_row_wins_regardless_of_other_cells() {
        let position = Position::from_rows([[X, X, X], [E, E, E], [E, E, E]], Mark::O);
        assert_eq!(position.terminal_status(), GameOutcome::XWins);
        assert_eq!(position.score(), Some(1));

        let position = Position::from_rows([[X, X, X], [O, O, E], [O, E, E]], Mark::O);
        assert_eq!(position.terminal_status(), GameOutcome::XWins);
    }

    #[test]
    fn columns_and_diagonals() {
        let column: Position = "o x - o x - o - x".parse().unwrap();
        assert_eq!(column.terminal_status(), GameOutcome::OWins);
        assert_eq!(column.score(), Some(-1));

        let anti: Position = "- - x  o x o  x - o".parse().unwrap();
        assert_eq!(anti.terminal_status(), GameOutcome::XWins);
    }

    #[test]
    fn first_completed_line_decides() {
        // both marks hold a row: only reachable through illegal play
        let position = Position::from_rows([[X, X, X], [E, E, E], [O, O, O]], Mark::X);
        assert_eq!(position.terminal_status(), GameOutcome::XWins);

        let position = Position::from_rows([[O, O, O], [E, E, E], [X, X, X]], Mark::X);
        assert_eq!(position.terminal_status(), GameOutcome::OWins);

        let position = Position::from_rows([[O, X, X], [O, E, E], [O, X, X]], Mark::X);
        assert_eq!(position.terminal_status(), GameOutcome::OWins);
    }

    #[test]
    fn full_board_without_line_is_draw() {
        let position: Position = "xox xoo oxx".parse().unwrap();
        assert_eq!(position.terminal_status(), GameOutcome::Draw);
        assert_eq!(position.score(), Some(0));
        assert!(position.legal_moves().is_empty());
    }

    #[test]
    fn terminal_status_is_idempotent() {
        let position: Position = "x o - - x - o - -".parse().unwrap();
        let first = position.terminal_status();
        assert_eq!(first, position.terminal_status());
        assert_eq!(first, position.outcome());
    }

    #[test]
    fn move_on_occupied_cell_is_rejected() {
        // arrange
        let mut position = Position::default();
        position.apply_move(1, Mark::X).unwrap();
        let before = position.clone();

        // act
        let result = position.apply_move(1, Mark::O);

        // assert
        assert_eq!(result, Err(EngineError::IllegalMove { cell: 1 }));
        assert_eq!(position, before);
    }

    #[test]
    fn out_of_range_cells_are_rejected() {
        let mut position = Position::default();
        assert_eq!(
            position.apply_move(0, Mark::X),
            Err(EngineError::IllegalMove { cell: 0 })
        );
        assert_eq!(
            position.apply_move(10, Mark::X),
            Err(EngineError::IllegalMove { cell: 10 })
        );
        assert_eq!(position, Position::default());
    }

    #[test]
    fn successor_leaves_parent_untouched() {
        let root = Position::default();
        let child = root.successor(3).unwrap();
        assert_eq!(root, Position::default());
        assert_eq!(child.cell(3), Some(Mark::X));
        assert_eq!(child.turn(), Mark::O);
        assert_eq!(child.next_turn_mark(), Mark::X);
    }

    #[test]
    fn display_matches_console_format() {
        let position: Position = "x - o  - x -  - - o".parse().unwrap();
        assert_eq!(position.to_string(), "x - o\n- x -\n- - o\n");
        assert_eq!(Position::default().to_string(), "- - -\n- - -\n- - -\n");
    }

    #[test]
    fn parse_rejects_bad_input() {
        assert!(matches!(
            "x o".parse::<Position>(),
            Err(EngineError::InvalidBoard { .. })
        ));
        assert!(matches!(
            "x o - - - - - - - -".parse::<Position>(),
            Err(EngineError::InvalidBoard { .. })
        ));
        assert!(matches!(
            "x o - - q - - - -".parse::<Position>(),
            Err(EngineError::InvalidBoard { .. })
        ));
    }

    #[test]
    fn parse_infers_turn() {
        let position: Position = "x - - - - - - - -".parse().unwrap();
        assert_eq!(position.turn(), Mark::O);
        let position: Position = "x o - - - - - - -".parse().unwrap();
        assert_eq!(position.turn(), Mark::X);
    }
}
