use crate::board::BOARD_SIZE;
use crate::error::{EngineError, Result};
use crate::game_tree_node::GameTreeNode;
use crate::position::Position;
use ego_tree::{NodeId, NodeRef, Tree};
use log::{debug, info, trace};
use std::time::Instant;

/// The complete game tree reachable from a root position.
///
/// Every non-terminal position is expanded into one child per legal move, so the
/// leaves are exactly the terminal positions reachable from the root. The tree is
/// built once and only read afterwards.
pub struct GameTree {
    tree: Tree<GameTreeNode>,
    root_id: NodeId,
    node_count: usize,
    leaf_count: usize,
}

/// A builder for creating instances of `GameTree`.
pub struct GameTreeBuilder {
    board_size: usize,
    root: Position,
}

impl Default for GameTreeBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl GameTreeBuilder {
    /// Creates a builder for the empty 3x3 board with `X` to move.
    pub fn new() -> Self {
        Self {
            board_size: BOARD_SIZE,
            root: Position::default(),
        }
    }

    /// Sets the board size. Only 3 is accepted by [`GameTreeBuilder::build`].
    pub fn with_board_size(mut self, board_size: usize) -> Self {
        self.board_size = board_size;
        self
    }

    /// Builds the tree from `root` instead of the empty board.
    pub fn with_root_position(mut self, root: Position) -> Self {
        self.root = root;
        self
    }

    /// Expands the full tree under the configured root.
    pub fn build(self) -> Result<GameTree> {
        if self.board_size != BOARD_SIZE {
            return Err(EngineError::UnsupportedBoardSize {
                size: self.board_size,
            });
        }
        GameTree::new(self.root)
    }
}

/// Builds the full game tree from the empty board.
pub fn build_game(board_size: usize) -> Result<GameTree> {
    GameTree::builder().with_board_size(board_size).build()
}

impl GameTree {
    /// Returns a new builder for `GameTree`.
    pub fn builder() -> GameTreeBuilder {
        GameTreeBuilder::new()
    }

    /// Creates the tree and expands it completely.
    ///
    /// It is recommended to use the builder pattern via `GameTree::builder()` instead.
    pub fn new(root: Position) -> Result<Self> {
        let started = Instant::now();
        let leaf = root.is_terminal();
        let tree = Tree::new(GameTreeNode::new(root));
        let root_id = tree.root().id();
        let mut game_tree = Self {
            tree,
            root_id,
            node_count: 1,
            leaf_count: usize::from(leaf),
        };
        game_tree.build_tree(root_id)?;

        info!(
            "built game tree: {} nodes, {} terminal positions in {:?}",
            game_tree.node_count,
            game_tree.leaf_count,
            started.elapsed()
        );
        Ok(game_tree)
    }

    /// Returns an immutable reference to the underlying tree.
    pub fn get_tree(&self) -> &Tree<GameTreeNode> {
        &self.tree
    }

    pub fn root_id(&self) -> NodeId {
        self.root_id
    }

    /// Returns a reference to the root node of the tree.
    pub fn get_root(&self) -> NodeRef<'_, GameTreeNode> {
        self.tree.root()
    }

    pub fn node(&self, node_id: NodeId) -> Result<NodeRef<'_, GameTreeNode>> {
        self.tree.get(node_id).ok_or(EngineError::UnknownNode)
    }

    pub fn position(&self, node_id: NodeId) -> Result<&Position> {
        Ok(&self.node(node_id)?.value().position)
    }

    /// The child reached by marking `cell`, `None` if that is not a legal move at `node_id`.
    pub fn child(&self, node_id: NodeId, cell: u8) -> Result<Option<NodeId>> {
        Ok(self.node(node_id)?.value().child(cell))
    }

    /// Total number of positions in the tree, root included.
    pub fn node_count(&self) -> usize {
        self.node_count
    }

    /// Number of terminal positions, i.e. leaves.
    pub fn leaf_count(&self) -> usize {
        self.leaf_count
    }

    /// Averages the scores of every terminal position under `node_id`, itself included.
    ///
    /// This is not minimax: wins and losses are weighted by how many finished games
    /// lead to them, whoever is on move along the way.
    pub fn evaluate(&self, node_id: NodeId) -> Result<f64> {
        let scores = Self::terminal_scores(self.node(node_id)?);
        if scores.is_empty() {
            return Err(EngineError::EmptySubtree);
        }

        let total: i64 = scores.iter().map(|&s| i64::from(s)).sum();
        Ok(total as f64 / scores.len() as f64)
    }

    /// Evaluates every child of `node_id` in ascending move order.
    pub fn move_evaluations(&self, node_id: NodeId) -> Result<Vec<(u8, f64)>> {
        let node = self.node(node_id)?;
        if node.value().is_terminal() {
            return Err(EngineError::GameOver);
        }

        let mut evaluations = Vec::new();
        for child in node.children() {
            let Some(cell) = child.value().prev_move else {
                continue;
            };
            evaluations.push((cell, self.evaluate(child.id())?));
        }
        debug!("move evaluations: {evaluations:?}");
        Ok(evaluations)
    }

    /// Returns the move whose subtree evaluates highest. Ties go to the lowest cell.
    pub fn best_move(&self, node_id: NodeId) -> Result<u8> {
        let mut best: Option<(u8, f64)> = None;
        for (cell, value) in self.move_evaluations(node_id)? {
            match best {
                Some((_, best_value)) if value <= best_value => {}
                _ => best = Some((cell, value)),
            }
        }

        best.map(|(cell, _)| cell).ok_or(EngineError::EmptySubtree)
    }

    /// Expands `node_id` and recurses into every non-terminal child.
    fn build_tree(&mut self, node_id: NodeId) -> Result<()> {
        for child_id in self.expand(node_id)? {
            let terminal = self.node(child_id)?.value().is_terminal();
            if terminal {
                self.leaf_count += 1;
            } else {
                self.build_tree(child_id)?;
            }
        }
        Ok(())
    }

    /// Creates one child per legal move of `node_id` and returns their ids in move order.
    fn expand(&mut self, node_id: NodeId) -> Result<Vec<NodeId>> {
        let node = self.node(node_id)?;
        debug_assert!(!node.has_children(), "expanding an already expanded node");
        let data = node.value();
        if data.is_terminal() {
            return Ok(vec![]);
        }

        let children_depth = data.depth + 1;
        let all_possible_moves = data.position.legal_moves();
        let mut new_nodes = Vec::with_capacity(all_possible_moves.len());
        for possible_move in all_possible_moves {
            let position = data.position.successor(possible_move)?;
            new_nodes.push(GameTreeNode::child_of(
                position,
                possible_move,
                children_depth,
            ));
        }
        trace!(
            "expanding node at depth {} into {} children",
            data.depth,
            new_nodes.len()
        );

        let mut parent = self
            .tree
            .get_mut(node_id)
            .ok_or(EngineError::UnknownNode)?;
        let mut links = Vec::with_capacity(new_nodes.len());
        for new_node in new_nodes {
            let cell = new_node.prev_move;
            let child_id = parent.append(new_node).id();
            if let Some(cell) = cell {
                links.push((cell, child_id));
            }
        }
        for &(cell, child_id) in &links {
            parent.value().link_child(cell, child_id);
        }

        self.node_count += links.len();
        Ok(links.into_iter().map(|(_, id)| id).collect())
    }

    fn terminal_scores(node: NodeRef<'_, GameTreeNode>) -> Vec<i8> {
        node.descendants()
            .filter_map(|n| n.value().position.score())
            .collect()
    }
}
