use fxhash::FxHashSet;

use crate::types::EdgeId;

/// Iterates the base edges of a node that were not split by a snap, followed by the
/// virtual edges attached to that node.
pub struct QueryGraphEdgeIterator<'a> {
    base_edges: &'a [EdgeId],
    virtual_edges: &'a [EdgeId],
    hidden_edges: &'a FxHashSet<EdgeId>,
    index: usize,
}

impl<'a> QueryGraphEdgeIterator<'a> {
    pub fn new(
        base_edges: &'a [EdgeId],
        virtual_edges: &'a [EdgeId],
        hidden_edges: &'a FxHashSet<EdgeId>,
    ) -> Self {
        QueryGraphEdgeIterator {
            base_edges,
            virtual_edges,
            hidden_edges,
            index: 0,
        }
    }
}

impl Iterator for QueryGraphEdgeIterator<'_> {
    type Item = EdgeId;

    fn next(&mut self) -> Option<Self::Item> {
        while self.index < self.base_edges.len() {
            let edge = self.base_edges[self.index];
            self.index += 1;

            if !self.hidden_edges.contains(&edge) {
                return Some(edge);
            }
        }

        let virtual_index = self.index - self.base_edges.len();

        if virtual_index < self.virtual_edges.len() {
            let edge = self.virtual_edges[virtual_index];
            self.index += 1;
            return Some(edge);
        }

        None
    }
}
