//! Per-search state and the A* search that drives it.
use crate::heap::{HeapItems, PriorityHeap};
use fxhash::FxHashSet;
use std::cmp::Ordering;

pub mod astar;
pub mod retrace;

pub use astar::{AStarSearch, SearchState};

/// Transient search fields of one grid cell. Overwritten at the start of every search.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SearchNode {
    /// Best known cost from the start.
    pub g_cost: u32,
    /// Estimated cost to the goal.
    pub h_cost: u32,
    /// Index of the predecessor cell on the best known path.
    pub parent: Option<usize>,
    pub heap_index: Option<usize>,
}

impl Default for SearchNode {
    fn default() -> SearchNode {
        SearchNode {
            g_cost: u32::MAX,
            h_cost: 0,
            parent: None,
            heap_index: None,
        }
    }
}

impl SearchNode {
    /// Widened so that large g and h costs still order correctly.
    pub fn f_cost(&self) -> u64 {
        u64::from(self.g_cost) + u64::from(self.h_cost)
    }
}

/// Search nodes indexed like the cells of the grid being searched.
#[derive(Clone, Debug, Default)]
pub struct NodeStore {
    nodes: Vec<SearchNode>,
}

impl NodeStore {
    pub fn get(&self, ix: usize) -> &SearchNode {
        &self.nodes[ix]
    }

    pub fn get_mut(&mut self, ix: usize) -> &mut SearchNode {
        &mut self.nodes[ix]
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

impl HeapItems for NodeStore {
    type Key = usize;

    /// Lowest f-cost first, ties broken by lowest h-cost.
    fn compare(&self, a: usize, b: usize) -> Ordering {
        let (a, b) = (&self.nodes[a], &self.nodes[b]);
        b.f_cost()
            .cmp(&a.f_cost())
            .then_with(|| b.h_cost.cmp(&a.h_cost))
    }

    fn heap_index(&self, key: usize) -> Option<usize> {
        self.nodes[key].heap_index
    }

    fn set_heap_index(&mut self, key: usize, index: Option<usize>) {
        self.nodes[key].heap_index = index;
    }
}

/// Everything a search mutates: the per-cell nodes, the open set and the closed set.
/// Reused between searches to avoid reallocating; only one search may use it at a time.
#[derive(Clone, Debug)]
pub struct SearchContext {
    pub(crate) nodes: NodeStore,
    pub(crate) open: PriorityHeap<usize>,
    pub(crate) closed: FxHashSet<usize>,
}

impl Default for SearchContext {
    fn default() -> SearchContext {
        SearchContext::new()
    }
}

impl SearchContext {
    pub fn new() -> SearchContext {
        SearchContext {
            nodes: NodeStore::default(),
            open: PriorityHeap::new(0),
            closed: FxHashSet::default(),
        }
    }

    /// Clears all state left by a previous search and sizes the context for a grid
    /// of `max_size` cells.
    pub fn reset(&mut self, max_size: usize) {
        self.nodes.nodes.clear();
        self.nodes.nodes.resize(max_size, SearchNode::default());
        self.open.reset(max_size);
        self.closed.clear();
    }

    pub fn nodes(&self) -> &NodeStore {
        &self.nodes
    }

    pub fn open_len(&self) -> usize {
        self.open.len()
    }

    pub fn closed_len(&self) -> usize {
        self.closed.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ties_on_f_prefer_lower_h() {
        let mut ctx = SearchContext::new();
        ctx.reset(3);
        *ctx.nodes.get_mut(0) = SearchNode {
            g_cost: 4,
            h_cost: 2,
            ..SearchNode::default()
        };
        *ctx.nodes.get_mut(1) = SearchNode {
            g_cost: 5,
            h_cost: 1,
            ..SearchNode::default()
        };
        *ctx.nodes.get_mut(2) = SearchNode {
            g_cost: 1,
            h_cost: 1,
            ..SearchNode::default()
        };
        assert_eq!(ctx.nodes.compare(1, 0), Ordering::Greater);
        assert_eq!(ctx.nodes.compare(2, 1), Ordering::Greater);
        for ix in 0..3 {
            ctx.open.push(&mut ctx.nodes, ix).unwrap();
        }
        assert_eq!(ctx.open.pop_highest_priority(&mut ctx.nodes), Some(2));
        assert_eq!(ctx.open.pop_highest_priority(&mut ctx.nodes), Some(1));
        assert_eq!(ctx.open.pop_highest_priority(&mut ctx.nodes), Some(0));
    }

    #[test]
    fn reset_clears_previous_search() {
        let mut ctx = SearchContext::new();
        ctx.reset(2);
        ctx.nodes.get_mut(1).parent = Some(0);
        ctx.closed.insert(1);
        ctx.open.push(&mut ctx.nodes, 0).unwrap();
        ctx.reset(4);
        assert_eq!(ctx.nodes().len(), 4);
        assert_eq!(*ctx.nodes().get(1), SearchNode::default());
        assert_eq!(ctx.open_len(), 0);
        assert_eq!(ctx.closed_len(), 0);
        assert_eq!(ctx.open.capacity(), 4);
    }
}
