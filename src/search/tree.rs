//! Shallow decision tree for teaching visualizations.
//!
//! Root (ai to move) -> every ai move -> a few player replies. Replies are
//! scored statically; each ai move takes the minimum of its replies and the
//! root takes the maximum of its children.

use serde::{Deserialize, Serialize};

use crate::core::{Board, Move};
use crate::rules::Score;

/// Player replies expanded under each ai move.
pub const TREE_REPLY_LIMIT: usize = 3;

/// One node of the rendered tree.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DecisionNode {
    /// Position at this node.
    pub board: Board,

    /// Move that led here (`None` at the root).
    pub mv: Option<Move>,

    /// Backed-up value for the ai.
    pub score: Score,

    /// Whether the ai is to move at this node.
    pub is_maximizing: bool,

    pub children: Vec<DecisionNode>,
}

impl DecisionNode {
    /// Leaf node with a static score.
    #[must_use]
    pub fn leaf(board: Board, mv: Option<Move>, score: Score, is_maximizing: bool) -> Self {
        Self {
            board,
            mv,
            score,
            is_maximizing,
            children: Vec::new(),
        }
    }

    /// Nodes in this subtree, including this one.
    #[must_use]
    pub fn node_count(&self) -> usize {
        1 + self.children.iter().map(DecisionNode::node_count).sum::<usize>()
    }

    /// Child carrying the backed-up score, if any.
    #[must_use]
    pub fn principal_child(&self) -> Option<&DecisionNode> {
        self.children.iter().find(|c| c.score == self.score)
    }
}
