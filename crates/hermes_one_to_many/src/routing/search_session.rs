use fxhash::FxHashMap;

use super::{
    frontier::Frontier,
    settled_cache::SettledCache,
    spt_entry::{EntryIndex, SptArena, SptEntry},
};
use crate::{
    constants::INVALID_EDGE,
    types::{EdgeId, NodeId},
    weighting::Weight,
};

/// State of one single-source search, scoped to an origin and to the unfavored edges of the
/// graph at the time it started.
///
/// Open entries are in the frontier, settled ones in the settled cache. The last settled entry
/// is kept pending until the search resumes, its edges are relaxed then.
#[derive(Default)]
pub struct SearchSession {
    origin: Option<NodeId>,
    fingerprint: u64,
    entries: SptArena,
    frontier: Frontier,
    open: FxHashMap<NodeId, EntryIndex>,
    settled: SettledCache,
    pending: Option<EntryIndex>,
}

impl SearchSession {
    pub fn origin(&self) -> Option<NodeId> {
        self.origin
    }

    pub fn is_valid_for(&self, origin: NodeId, fingerprint: u64) -> bool {
        self.origin == Some(origin) && self.fingerprint == fingerprint
    }

    /// Drops every entry and starts over from `origin`
    pub fn reset(&mut self, origin: NodeId, fingerprint: u64) {
        self.entries.clear();
        self.frontier.clear();
        self.open.clear();
        self.settled.clear();
        self.pending = None;

        self.origin = Some(origin);
        self.fingerprint = fingerprint;

        let root = self.entries.push(SptEntry::root(origin, INVALID_EDGE));
        self.frontier.push(root, 0.0);
        self.open.insert(origin, root);
    }

    pub fn entry(&self, index: EntryIndex) -> &SptEntry {
        self.entries.get(index)
    }

    pub fn entries(&self) -> &SptArena {
        &self.entries
    }

    pub fn settled_entry(&self, node: NodeId) -> Option<EntryIndex> {
        self.settled.get(node)
    }

    pub fn is_settled(&self, node: NodeId) -> bool {
        self.settled.contains(node)
    }

    pub fn settled_count(&self) -> usize {
        self.settled.len()
    }

    pub fn take_pending(&mut self) -> Option<EntryIndex> {
        self.pending.take()
    }

    /// Pops the cheapest open entry, records it as settled and pending
    pub fn settle_next(&mut self) -> Option<EntryIndex> {
        let (index, _) = self.frontier.pop()?;
        let node = self.entries.get(index).adj_node;

        self.open.remove(&node);
        self.settled.insert(node, index);
        self.pending = Some(index);

        Some(index)
    }

    /// Records that `node` can be reached from `parent` through `edge_id` at `weight`.
    ///
    /// Opens a new entry for an undiscovered node, or lowers the weight of the open entry when
    /// `weight` is an improvement. Settled nodes must not be offered.
    pub fn offer(&mut self, node: NodeId, edge_id: EdgeId, weight: Weight, parent: EntryIndex) {
        debug_assert!(!self.is_settled(node), "Node {} is already settled", node);

        match self.open.get(&node) {
            Some(&index) => {
                let entry = self.entries.get_mut(index);
                if weight < entry.weight {
                    entry.weight = weight;
                    entry.edge_id = edge_id;
                    entry.parent = Some(parent);
                    self.frontier.update_priority(index, weight);
                }
            }
            None => {
                let index = self.entries.push(SptEntry {
                    adj_node: node,
                    edge_id,
                    weight,
                    parent: Some(parent),
                });
                self.frontier.push(index, weight);
                self.open.insert(node, index);
            }
        }
    }

    pub fn frontier_len(&self) -> usize {
        self.frontier.len()
    }
}
