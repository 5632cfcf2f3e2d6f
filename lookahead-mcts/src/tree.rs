//! MCTS tree structure and node management
//!
//! Uses arena allocation: nodes live in one `Vec` and refer to each other by
//! index. Nodes do not store simulated states; the path from the root is
//! replayed through the simulator instead.
//!
//! ## Architecture
//! - Level 2: Tree operations (add_child, backpropagate)
//! - Level 3: UCT calculation, child selection
//! - Level 4: Statistics, utilities

use rand::Rng;

// ============================================================================
// TYPES
// ============================================================================

/// Node identifier (index into arena)
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct NodeId(pub usize);

impl NodeId {
    pub const ROOT: NodeId = NodeId(0);
}

/// Statistics for a tree node
#[derive(Clone, Debug, Default, PartialEq)]
pub struct NodeStats {
    /// Number of backpropagation passes through this node
    pub visits: u32,
    /// Sum of backpropagated rewards
    pub quality: f64,
}

impl NodeStats {
    /// Mean reward. Only meaningful once the node has been visited.
    pub fn mean_quality(&self) -> Option<f64> {
        if self.visits == 0 {
            None
        } else {
            Some(self.quality / self.visits as f64)
        }
    }
}

/// A node in the search tree: one action prefix reached from the root
#[derive(Clone, Debug)]
pub struct SearchNode<A> {
    /// Parent node (None for root)
    pub parent: Option<NodeId>,
    /// Action that led here from the parent (None for root)
    pub action: Option<A>,
    /// Child node ids, in expansion order
    pub children: Vec<NodeId>,
    pub stats: NodeStats,
}

impl<A> SearchNode<A> {
    fn new(parent: Option<NodeId>, action: Option<A>) -> Self {
        Self {
            parent,
            action,
            children: Vec::new(),
            stats: NodeStats::default(),
        }
    }
}

// ============================================================================
// SEARCH TREE (Level 2 - Tree Operations)
// ============================================================================

/// Search tree with arena allocation
#[derive(Debug)]
pub struct SearchTree<A> {
    nodes: Vec<SearchNode<A>>,
}

impl<A: Copy + Eq> SearchTree<A> {
    /// Create a tree holding only the root
    pub fn new() -> Self {
        Self {
            nodes: vec![SearchNode::new(None, None)],
        }
    }

    /// Get the root node id
    pub fn root(&self) -> NodeId {
        NodeId::ROOT
    }

    /// Get a reference to a node
    pub fn get(&self, id: NodeId) -> &SearchNode<A> {
        &self.nodes[id.0]
    }

    /// Get a mutable reference to a node
    pub fn get_mut(&mut self, id: NodeId) -> &mut SearchNode<A> {
        &mut self.nodes[id.0]
    }

    /// Get the number of nodes in the tree
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// A tree always has its root
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Attach a new child reached by `action`
    pub fn add_child(&mut self, parent: NodeId, action: A) -> NodeId {
        let child_id = NodeId(self.nodes.len());
        self.nodes.push(SearchNode::new(Some(parent), Some(action)));
        self.get_mut(parent).children.push(child_id);
        child_id
    }

    /// Actions of existing children
    pub fn child_actions(&self, id: NodeId) -> Vec<A> {
        self.get(id)
            .children
            .iter()
            .filter_map(|&child| self.get(child).action)
            .collect()
    }

    /// Actions from the root down to `id` (inclusive), in playing order
    pub fn path_actions(&self, id: NodeId) -> Vec<A> {
        let mut actions = Vec::new();
        let mut current = Some(id);

        while let Some(node_id) = current {
            let node = self.get(node_id);
            if let Some(action) = node.action {
                actions.push(action);
            }
            current = node.parent;
        }

        actions.reverse();
        actions
    }

    /// Depth of a node (root = 0)
    pub fn depth(&self, id: NodeId) -> usize {
        let mut depth = 0;
        let mut current = self.get(id).parent;
        while let Some(parent) = current {
            depth += 1;
            current = self.get(parent).parent;
        }
        depth
    }

    // ========================================================================
    // Level 2: Backpropagation
    // ========================================================================

    /// Add `reward` to every node from `leaf` up to the root, counting one
    /// visit each.
    pub fn backpropagate(&mut self, leaf: NodeId, reward: f64) {
        let mut current = Some(leaf);

        while let Some(node_id) = current {
            let node = self.get_mut(node_id);
            node.stats.visits += 1;
            node.stats.quality += reward;
            current = node.parent;
        }
    }

    // ========================================================================
    // Level 3: Selection Helpers
    // ========================================================================

    /// UCT score of `child` under `parent_visits`
    ///
    /// UCT = quality/visits + c * sqrt(ln(parent_visits) / visits)
    ///
    /// Unvisited children score +infinity; the search never compares them
    /// because every child is backpropagated right after its expansion.
    pub fn uct(&self, child: NodeId, parent_visits: u32, exploration: f64) -> f64 {
        let stats = &self.get(child).stats;
        match stats.mean_quality() {
            None => f64::INFINITY,
            Some(mean) => {
                let visits = stats.visits as f64;
                mean + exploration * ((parent_visits as f64).ln() / visits).sqrt()
            }
        }
    }

    /// Child with the highest UCT score; ties broken uniformly at random.
    pub fn best_child<R: Rng>(&self, id: NodeId, exploration: f64, rng: &mut R) -> Option<NodeId> {
        let node = self.get(id);
        let parent_visits = node.stats.visits;

        let scored: Vec<(NodeId, f64)> = node
            .children
            .iter()
            .map(|&child| (child, self.uct(child, parent_visits, exploration)))
            .collect();

        pick_max(&scored, rng)
    }

    // ========================================================================
    // Level 3: Best Action Selection
    // ========================================================================

    /// Most visited root child's action; ties broken uniformly at random.
    /// Children that were never backpropagated do not count.
    pub fn most_visited_action<R: Rng>(&self, rng: &mut R) -> Option<A> {
        let scored: Vec<(NodeId, f64)> = self
            .get(self.root())
            .children
            .iter()
            .filter(|&&child| self.get(child).stats.visits > 0)
            .map(|&child| (child, self.get(child).stats.visits as f64))
            .collect();

        pick_max(&scored, rng).and_then(|id| self.get(id).action)
    }

    /// Root children as (action, visits, mean quality) - for analysis
    pub fn action_statistics(&self) -> Vec<(A, u32, f64)> {
        self.get(self.root())
            .children
            .iter()
            .filter_map(|&child| {
                let node = self.get(child);
                let mean = node.stats.mean_quality().unwrap_or(0.0);
                node.action.map(|action| (action, node.stats.visits, mean))
            })
            .collect()
    }

    /// Total completed backpropagation passes (root visits)
    pub fn total_simulations(&self) -> u32 {
        self.get(self.root()).stats.visits
    }
}

impl<A: Copy + Eq> Default for SearchTree<A> {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// UTILITIES (Level 4)
// ============================================================================

/// Uniform choice among the entries sharing the maximum score
fn pick_max<R: Rng>(scored: &[(NodeId, f64)], rng: &mut R) -> Option<NodeId> {
    let best = scored
        .iter()
        .map(|&(_, score)| score)
        .fold(f64::NEG_INFINITY, f64::max);

    let tied: Vec<NodeId> = scored
        .iter()
        .filter(|&&(_, score)| score == best)
        .map(|&(id, _)| id)
        .collect();

    match tied.len() {
        0 => None,
        1 => Some(tied[0]),
        n => Some(tied[rng.gen_range(0..n)]),
    }
}

// ============================================================================
// TESTS
// ============================================================================
