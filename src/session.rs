use crate::board::{CENTER_CELL, GameOutcome, Mark};
use crate::error::{EngineError, Result};
use crate::game_tree::GameTree;
use crate::opponent::{MoveChoice, Opponent};
use crate::position::Position;
use ego_tree::NodeId;
use log::{debug, warn};

/// Whose move it is in a session, or how the game ended.
#[derive(Debug, PartialEq, Eq, Copy, Clone)]
pub enum SessionState {
    /// The engine (`X`) is on move.
    AutomatedTurn,
    /// The opponent (`O`) is on move.
    HumanTurn,
    /// The game is over.
    Terminal(GameOutcome),
}

/// Session settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionConfig {
    opening_move: Option<u8>,
}

impl Default for SessionConfig {
    /// Opens in the center.
    fn default() -> Self {
        Self {
            opening_move: Some(CENTER_CELL),
        }
    }
}

impl SessionConfig {
    /// Sets the cell played on the engine's first move without evaluation.
    /// `None` evaluates the first move like every other.
    pub fn with_opening_move(mut self, opening_move: Option<u8>) -> Self {
        self.opening_move = opening_move;
        self
    }

    pub fn opening_move(&self) -> Option<u8> {
        self.opening_move
    }
}

/// One game played over a shared, prebuilt [`GameTree`].
///
/// The session only walks node ids into the tree; it never modifies it, so any
/// number of sessions can share one tree.
#[derive(Clone)]
pub struct GameSession<'a> {
    tree: &'a GameTree,
    config: SessionConfig,
    current: NodeId,
    state: SessionState,
    move_count: u32,
}

impl<'a> GameSession<'a> {
    /// Starts a game at the root of `tree`.
    ///
    /// Fails with [`EngineError::IllegalMove`] when the configured opening is not a cell index.
    pub fn new(tree: &'a GameTree, config: SessionConfig) -> Result<Self> {
        if let Some(cell) = config.opening_move {
            if !(1..=9).contains(&cell) {
                return Err(EngineError::IllegalMove { cell });
            }
        }

        let current = tree.root_id();
        let state = Self::state_of(tree.position(current)?);
        Ok(Self {
            tree,
            config,
            current,
            state,
            move_count: 0,
        })
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    /// Number of moves played so far.
    pub fn move_count(&self) -> u32 {
        self.move_count
    }

    pub fn current_node(&self) -> NodeId {
        self.current
    }

    pub fn position(&self) -> Result<&'a Position> {
        self.tree.position(self.current)
    }

    /// The final outcome, once the game is over.
    pub fn outcome(&self) -> Option<GameOutcome> {
        match self.state {
            SessionState::Terminal(outcome) => Some(outcome),
            _ => None,
        }
    }

    pub fn is_over(&self) -> bool {
        matches!(self.state, SessionState::Terminal(_))
    }

    /// Goes back to the root for another game over the same tree.
    pub fn reset(&mut self) -> Result<()> {
        self.current = self.tree.root_id();
        self.state = Self::state_of(self.tree.position(self.current)?);
        self.move_count = 0;
        Ok(())
    }

    /// Plays the engine's move.
    ///
    /// The first engine move of a game is the configured opening when it is legal
    /// there; every other move is the best evaluated one.
    pub fn automated_move(&mut self) -> Result<MoveChoice> {
        self.expect_state(SessionState::AutomatedTurn)?;

        let opening = match self.config.opening_move {
            Some(cell) if self.move_count == 0 => {
                if self.tree.child(self.current, cell)?.is_some() {
                    Some(cell)
                } else {
                    warn!("opening move {cell} is not legal here, evaluating instead");
                    None
                }
            }
            _ => None,
        };

        let choice = match opening {
            Some(cell) => MoveChoice {
                cell,
                evaluations: None,
            },
            None => {
                let evaluations = self.tree.move_evaluations(self.current)?;
                let cell = self.tree.best_move(self.current)?;
                MoveChoice {
                    cell,
                    evaluations: Some(evaluations),
                }
            }
        };

        self.descend(choice.cell)?;
        Ok(choice)
    }

    /// Applies the opponent's move.
    ///
    /// An illegal cell fails with [`EngineError::IllegalMove`] and leaves the session
    /// unchanged, so the caller can ask again.
    pub fn human_move(&mut self, cell: u8) -> Result<()> {
        self.expect_state(SessionState::HumanTurn)?;
        self.descend(cell)
    }

    /// Plays a whole game against `opponent` and returns how it ended.
    pub fn play<P: Opponent>(
        &mut self,
        opponent: &mut P,
    ) -> std::result::Result<GameOutcome, P::Error> {
        loop {
            match self.state {
                SessionState::AutomatedTurn => {
                    let choice = self.automated_move()?;
                    opponent.on_automated_move(&choice);
                }
                SessionState::HumanTurn => {
                    let position = self.position()?;
                    let cell = opponent.choose_move(position)?;
                    match self.human_move(cell) {
                        Ok(()) => {}
                        Err(EngineError::IllegalMove { cell }) => opponent.on_illegal_move(cell),
                        Err(err) => return Err(err.into()),
                    }
                }
                SessionState::Terminal(outcome) => return Ok(outcome),
            }
        }
    }

    fn expect_state(&self, expected: SessionState) -> Result<()> {
        match self.state {
            SessionState::Terminal(_) => Err(EngineError::GameOver),
            state if state != expected => Err(EngineError::NotYourTurn),
            _ => Ok(()),
        }
    }

    /// Walks into the child for `cell` and checks for the end of the game before
    /// the turn passes.
    fn descend(&mut self, cell: u8) -> Result<()> {
        let next = self
            .tree
            .child(self.current, cell)?
            .ok_or(EngineError::IllegalMove { cell })?;
        let position = self.tree.position(next)?;

        self.current = next;
        self.move_count += 1;
        self.state = Self::state_of(position);
        debug!(
            "move {} at cell {cell}, now {:?}",
            self.move_count, self.state
        );
        Ok(())
    }

    fn state_of(position: &Position) -> SessionState {
        if position.is_terminal() {
            SessionState::Terminal(position.outcome())
        } else {
            match position.turn() {
                Mark::X => SessionState::AutomatedTurn,
                Mark::O => SessionState::HumanTurn,
            }
        }
    }
}
