use fxhash::FxHashMap;

use super::spt_entry::EntryIndex;
use crate::types::NodeId;

/// Finalized entries of a search, by node.
///
/// Only valid for the origin and graph state the entries were computed for.
#[derive(Default)]
pub struct SettledCache {
    entries: FxHashMap<NodeId, EntryIndex>,
}

impl SettledCache {
    pub fn get(&self, node: NodeId) -> Option<EntryIndex> {
        self.entries.get(&node).copied()
    }

    pub fn contains(&self, node: NodeId) -> bool {
        self.entries.contains_key(&node)
    }

    pub fn insert(&mut self, node: NodeId, entry: EntryIndex) {
        let previous = self.entries.insert(node, entry);
        debug_assert!(previous.is_none(), "Node {} was settled twice", node);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear()
    }
}
