use std::cmp::{Ordering, Reverse};
use std::collections::BinaryHeap;

use gridmapf_core::Cell;

/// Sentinel distance for cells a frontier has not reached.
pub const UNREACHABLE: i32 = i32::MAX;

/// A state in the time-expanded search: the agent would stand on `cell` at
/// step `time` after travelling `distance`.
///
/// Every move costs 1, so `distance == time` for every node a search
/// creates. Both are kept so the queue key and the occupancy key stay
/// explicit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SearchNode {
    pub distance: i32,
    pub cell: Cell,
    pub time: i32,
}

/// Queue entry ordered by `(distance, seq)`.
///
/// `seq` is a per-queue insertion counter, so nodes at equal distance are
/// popped first-in first-out.
#[derive(Debug, Clone, Copy)]
struct Entry {
    node: SearchNode,
    seq: u64,
}

impl PartialEq for Entry {
    fn eq(&self, other: &Self) -> bool {
        self.node.distance == other.node.distance && self.seq == other.seq
    }
}

impl Eq for Entry {}

impl PartialOrd for Entry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Entry {
    fn cmp(&self, other: &Self) -> Ordering {
        self.node
            .distance
            .cmp(&other.node.distance)
            .then(self.seq.cmp(&other.seq))
    }
}

/// Min-priority queue of [`SearchNode`]s with FIFO tie-breaking.
#[derive(Debug, Default)]
pub(crate) struct NodeQueue {
    heap: BinaryHeap<Reverse<Entry>>,
    seq: u64,
}

impl NodeQueue {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn push(&mut self, node: SearchNode) {
        let seq = self.seq;
        self.seq += 1;
        self.heap.push(Reverse(Entry { node, seq }));
    }

    pub(crate) fn pop(&mut self) -> Option<SearchNode> {
        self.heap.pop().map(|Reverse(entry)| entry.node)
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    pub(crate) fn len(&self) -> usize {
        self.heap.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn node(distance: i32, row: i32) -> SearchNode {
        SearchNode {
            distance,
            cell: Cell::new(row, 0),
            time: distance,
        }
    }

    #[test]
    fn pops_lowest_distance_first() {
        let mut q = NodeQueue::new();
        q.push(node(3, 0));
        q.push(node(1, 1));
        q.push(node(2, 2));
        assert_eq!(q.len(), 3);
        assert_eq!(q.pop().map(|n| n.distance), Some(1));
        assert_eq!(q.pop().map(|n| n.distance), Some(2));
        assert_eq!(q.pop().map(|n| n.distance), Some(3));
        assert_eq!(q.pop(), None);
        assert!(q.is_empty());
    }

    #[test]
    fn equal_distance_is_fifo() {
        let mut q = NodeQueue::new();
        q.push(node(1, 7));
        q.push(node(1, 3));
        q.push(node(0, 9));
        q.push(node(1, 5));
        let rows: Vec<_> = std::iter::from_fn(|| q.pop()).map(|n| n.cell.row).collect();
        assert_eq!(rows, vec![9, 7, 3, 5]);
    }
}
