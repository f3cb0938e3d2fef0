use crate::board::{CELL_COUNT, GameOutcome, Mark};
use crate::position::Position;
use ego_tree::NodeId;

/// Represents a single node in the game tree.
///
/// Each node stores the position it stands for, the move that led to it and a
/// table of its children indexed by move, so descending into the tree after a
/// move is a direct lookup.
#[derive(Debug, Clone)]
pub struct GameTreeNode {
    /// The game state that this node represents.
    pub position: Position,
    /// The 1-based cell marked to reach this node from its parent. `None` for the root node.
    pub prev_move: Option<u8>,
    /// The depth of the node in the tree.
    pub depth: u8,
    children: [Option<NodeId>; CELL_COUNT],
}

impl Default for GameTreeNode {
    fn default() -> Self {
        GameTreeNode::new(Position::default())
    }
}

impl GameTreeNode {
    /// Creates a root node for the given position.
    pub fn new(position: Position) -> Self {
        GameTreeNode {
            position,
            prev_move: None,
            depth: 0,
            children: [None; CELL_COUNT],
        }
    }

    pub(crate) fn child_of(position: Position, prev_move: u8, depth: u8) -> Self {
        GameTreeNode {
            position,
            prev_move: Some(prev_move),
            depth,
            children: [None; CELL_COUNT],
        }
    }

    /// The node reached by marking `cell`, if that move was legal here.
    pub fn child(&self, cell: u8) -> Option<NodeId> {
        match cell {
            1..=9 => self.children[cell as usize - 1],
            _ => None,
        }
    }

    pub(crate) fn link_child(&mut self, cell: u8, id: NodeId) {
        self.children[cell as usize - 1] = Some(id);
    }

    /// The mark whose turn it is in this node's position.
    pub fn turn(&self) -> Mark {
        self.position.turn()
    }

    pub fn outcome(&self) -> GameOutcome {
        self.position.outcome()
    }

    pub fn is_terminal(&self) -> bool {
        self.position.is_terminal()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn root_node_has_no_move_and_no_children() {
        let node = GameTreeNode::default();
        assert_eq!(node.prev_move, None);
        assert_eq!(node.depth, 0);
        assert_eq!(node.turn(), Mark::X);
        assert!(!node.is_terminal());
        assert!((1..=9).all(|cell| node.child(cell).is_none()));
        assert_eq!(node.child(0), None);
        assert_eq!(node.child(10), None);
    }
}
