//! Dependency tracking between formula cells
//!
//! A directed graph over positions: an edge `from -> to` records that the
//! cell at `from` references the cell at `to`. Every edge is mirrored in the
//! target's backward set, so reverse reachability (everything whose value
//! could depend on a given cell) is a plain backward traversal.

use ahash::{AHashMap, AHashSet};
use slate_core::Position;

/// One graph node: the references a cell makes and the referrers it has
#[derive(Debug, Default)]
struct Node {
    /// Cells this one references
    forward: AHashSet<Position>,
    /// Cells that reference this one
    backward: AHashSet<Position>,
}

/// Directed dependency graph over cell positions
///
/// Nodes are keyed by position; edges are stored as position sets, never as
/// pointers between nodes, so node removal cannot dangle anything. The graph
/// may hold nodes for positions whose sheet cell is empty: placeholders for
/// referenced-but-never-written cells, which resolve to `0.0` on evaluation.
#[derive(Debug, Default)]
pub struct DependencyGraph {
    nodes: AHashMap<Position, Node>,
}

impl DependencyGraph {
    /// Create a new empty graph
    pub fn new() -> Self {
        Self::default()
    }

    /// Ensure a node exists for `pos`. Idempotent.
    pub fn add_cell(&mut self, pos: Position) {
        self.nodes.entry(pos).or_default();
    }

    /// Remove the node at `pos` and every incident edge, both directions.
    ///
    /// Neighbor nodes are retained even if they become isolated.
    pub fn remove_cell(&mut self, pos: Position) {
        if let Some(node) = self.nodes.remove(&pos) {
            for next in node.forward {
                if let Some(target) = self.nodes.get_mut(&next) {
                    target.backward.remove(&pos);
                }
            }
            for prev in node.backward {
                if let Some(source) = self.nodes.get_mut(&prev) {
                    source.forward.remove(&pos);
                }
            }
        }
    }

    /// Record the edge `from -> to`. Both nodes must already exist.
    pub fn add_dependency(&mut self, from: Position, to: Position) {
        debug_assert!(self.nodes.contains_key(&from));
        debug_assert!(self.nodes.contains_key(&to));

        if let Some(node) = self.nodes.get_mut(&from) {
            node.forward.insert(to);
        }
        if let Some(node) = self.nodes.get_mut(&to) {
            node.backward.insert(from);
        }
    }

    /// Remove the edge `from -> to`. Both nodes must already exist.
    pub fn remove_dependency(&mut self, from: Position, to: Position) {
        debug_assert!(self.nodes.contains_key(&from));
        debug_assert!(self.nodes.contains_key(&to));

        if let Some(node) = self.nodes.get_mut(&from) {
            node.forward.remove(&to);
        }
        if let Some(node) = self.nodes.get_mut(&to) {
            node.backward.remove(&from);
        }
    }

    /// Check whether a node exists for `pos`
    pub fn contains(&self, pos: Position) -> bool {
        self.nodes.contains_key(&pos)
    }

    /// Check whether the node at `pos` has no incident edges
    pub fn is_isolated(&self, pos: Position) -> bool {
        self.nodes
            .get(&pos)
            .map(|node| node.forward.is_empty() && node.backward.is_empty())
            .unwrap_or(true)
    }

    /// The cells `pos` currently references, in unspecified order
    pub fn forward_refs(&self, pos: Position) -> Vec<Position> {
        self.nodes
            .get(&pos)
            .map(|node| node.forward.iter().copied().collect())
            .unwrap_or_default()
    }

    /// Check whether some non-trivial forward path from `pos` returns to `pos`
    ///
    /// A self-edge counts as a cycle. The answer does not depend on the order
    /// neighbors are visited in.
    pub fn has_cycle_from(&self, pos: Position) -> bool {
        let start = match self.nodes.get(&pos) {
            Some(node) => node,
            None => return false,
        };

        let mut visited = AHashSet::new();
        let mut stack: Vec<Position> = start.forward.iter().copied().collect();

        while let Some(next) = stack.pop() {
            if next == pos {
                return true;
            }
            if !visited.insert(next) {
                continue;
            }
            if let Some(node) = self.nodes.get(&next) {
                stack.extend(node.forward.iter().copied());
            }
        }

        false
    }

    /// Invoke `callback` once for every node from which `pos` is reachable
    /// along forward edges, including `pos` itself
    ///
    /// Traversal follows backward edges with an explicit stack, so it
    /// terminates even if the backward graph is transiently cyclic.
    pub fn invalidate_reverse(&self, pos: Position, mut callback: impl FnMut(Position)) {
        let mut visited = AHashSet::new();
        let mut stack = vec![pos];

        while let Some(current) = stack.pop() {
            if !visited.insert(current) {
                continue;
            }
            callback(current);
            if let Some(node) = self.nodes.get(&current) {
                stack.extend(node.backward.iter().copied());
            }
        }
    }
}
