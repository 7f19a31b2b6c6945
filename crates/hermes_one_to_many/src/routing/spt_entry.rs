use crate::{
    types::{EdgeId, NodeId},
    weighting::Weight,
};

/// Position of an entry in the arena of a search session
pub type EntryIndex = usize;

/// One node of the shortest path tree: how `adj_node` was reached and at which cost
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SptEntry {
    pub adj_node: NodeId,
    /// Edge from the parent entry to `adj_node`, `INVALID_EDGE` for the root
    pub edge_id: EdgeId,
    pub weight: Weight,
    pub parent: Option<EntryIndex>,
}

impl SptEntry {
    pub fn root(node: NodeId, edge_id: EdgeId) -> Self {
        SptEntry {
            adj_node: node,
            edge_id,
            weight: 0.0,
            parent: None,
        }
    }

    pub fn is_root(&self) -> bool {
        self.parent.is_none()
    }
}

/// Owns every entry created by a search; parents are referenced by index
#[derive(Default)]
pub struct SptArena {
    entries: Vec<SptEntry>,
}

impl SptArena {
    pub fn with_capacity(capacity: usize) -> Self {
        SptArena {
            entries: Vec::with_capacity(capacity),
        }
    }

    pub fn push(&mut self, entry: SptEntry) -> EntryIndex {
        self.entries.push(entry);
        self.entries.len() - 1
    }

    pub fn get(&self, index: EntryIndex) -> &SptEntry {
        &self.entries[index]
    }

    pub fn get_mut(&mut self, index: EntryIndex) -> &mut SptEntry {
        &mut self.entries[index]
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

    /// Entries from `index` back to the root of the tree
    pub fn chain(&self, index: EntryIndex) -> impl Iterator<Item = &SptEntry> {
        std::iter::successors(Some(self.get(index)), |entry| {
            entry.parent.map(|parent| self.get(parent))
        })
    }
}
