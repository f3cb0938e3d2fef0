//! A full game tree engine for tic-tac-toe.
//!
//! The engine expands every position reachable from a root into a tree, once,
//! and ranks the moves of any node by averaging the outcomes of all finished games
//! below each candidate: +1 for an `X` win, -1 for an `O` win, 0 for a draw.
//! This averaged heuristic is not minimax, so the engine plays well but is not
//! unbeatable.
//!
//! # Example
//!
//! ```no_run
//! use ttt_tree::game_tree::build_game;
//! use ttt_tree::session::{GameSession, SessionConfig};
//!
//! // Build the full tree once; every game walks into it
//! let tree = build_game(3).unwrap();
//! let mut session = GameSession::new(&tree, SessionConfig::default()).unwrap();
//!
//! // The first engine move comes from the opening book
//! let choice = session.automated_move().unwrap();
//! assert_eq!(choice.cell, 5);
//!
//! session.human_move(1).unwrap();
//! let reply = session.automated_move().unwrap();
//! println!("The engine answers: {}", reply.cell);
//! ```

/// Marks, outcomes and board constants.
pub mod board;
/// The crate error type.
pub mod error;
/// The tree of all reachable positions and the move evaluation.
pub mod game_tree;
/// Contains the `GameTreeNode` struct, which represents a node in the game tree.
pub mod game_tree_node;
/// The player the engine plays against.
pub mod opponent;
/// A single board configuration.
pub mod position;
/// Contains traits and implementations for random number generation.
pub mod random;
/// The turn-by-turn state machine of one game.
pub mod session;
/// Batches of engine games against a random opponent.
pub mod simulation;

pub use board::{GameOutcome, Mark};
pub use error::{EngineError, Result};
pub use game_tree::{GameTree, build_game};
pub use position::Position;
