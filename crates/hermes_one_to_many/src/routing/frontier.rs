use std::cmp::Ordering;

use super::spt_entry::EntryIndex;
use crate::weighting::Weight;

const FIRST_ELEMENT_INDEX: usize = 1;

/// Indexed binary min-heap of open entries, ordered by weight.
///
/// Entries with the same weight are popped in creation order so that a search is
/// deterministic. Positions are tracked per entry to support decrease-key.
pub struct Frontier {
    heap: Vec<(EntryIndex, Weight)>,
    positions: Vec<Option<usize>>,
    size: usize,
}

impl Default for Frontier {
    fn default() -> Self {
        Frontier::with_capacity(0)
    }
}

fn compare(a: &(EntryIndex, Weight), b: &(EntryIndex, Weight)) -> Ordering {
    a.1.total_cmp(&b.1).then(a.0.cmp(&b.0))
}

impl Frontier {
    pub fn with_capacity(capacity: usize) -> Self {
        let mut heap = Vec::with_capacity(capacity + 1);
        heap.push((usize::MAX, 0.0));
        Frontier {
            heap,
            positions: Vec::with_capacity(capacity),
            size: 0,
        }
    }

    pub fn len(&self) -> usize {
        self.size
    }

    pub fn is_empty(&self) -> bool {
        self.size == 0
    }

    pub fn contains(&self, entry: EntryIndex) -> bool {
        matches!(self.positions.get(entry), Some(Some(_)))
    }

    pub fn push(&mut self, entry: EntryIndex, weight: Weight) {
        debug_assert!(!self.contains(entry), "Entry {} is already open", entry);

        if entry >= self.positions.len() {
            self.positions.resize(entry + 1, None);
        }

        self.size += 1;
        self.heap.push((entry, weight));
        self.positions[entry] = Some(self.size);
        self.sift_up(self.size);
    }

    pub fn peek(&self) -> Option<&(EntryIndex, Weight)> {
        self.heap.get(FIRST_ELEMENT_INDEX)
    }

    pub fn pop(&mut self) -> Option<(EntryIndex, Weight)> {
        if self.size == 0 {
            return None;
        }

        let (entry, weight) = self.heap.swap_remove(FIRST_ELEMENT_INDEX);
        self.size -= 1;
        self.positions[entry] = None;

        if self.size > 0 {
            // The last element became the first one
            self.positions[self.heap[FIRST_ELEMENT_INDEX].0] = Some(FIRST_ELEMENT_INDEX);
            self.sift_down(FIRST_ELEMENT_INDEX);
        }

        Some((entry, weight))
    }

    pub fn update_priority(&mut self, entry: EntryIndex, weight: Weight) {
        let Some(Some(position)) = self.positions.get(entry).copied() else {
            return;
        };

        let previous = self.heap[position];
        self.heap[position] = (entry, weight);

        match compare(&(entry, weight), &previous) {
            Ordering::Greater => self.sift_down(position),
            Ordering::Less => self.sift_up(position),
            Ordering::Equal => {}
        }
    }

    pub fn clear(&mut self) {
        self.positions.clear();
        self.heap.truncate(FIRST_ELEMENT_INDEX);
        self.size = 0;
    }

    fn sift_up(&mut self, element_index: usize) {
        let mut index = element_index;
        let element = self.heap[index];

        while index >> 1 > 0 && compare(&element, &self.heap[index >> 1]) == Ordering::Less {
            let parent_index = index >> 1;
            self.heap.swap(index, parent_index);

            // The previous parent moved down
            self.positions[self.heap[index].0] = Some(index);

            index = parent_index;
        }

        self.positions[self.heap[index].0] = Some(index);
    }

    fn sift_down(&mut self, element_index: usize) {
        let mut index = element_index;
        let element = self.heap[index];

        while index << 1 <= self.size {
            let left_child_index = index << 1;
            let right_child_index = left_child_index + 1;

            let mut child_index = left_child_index;
            if right_child_index <= self.size
                && compare(&self.heap[right_child_index], &self.heap[left_child_index])
                    == Ordering::Less
            {
                child_index = right_child_index;
            }

            if compare(&element, &self.heap[child_index]) != Ordering::Greater {
                break;
            }

            self.heap.swap(index, child_index);

            // The previous child moved up
            self.positions[self.heap[index].0] = Some(index);

            index = child_index;
        }

        self.positions[self.heap[index].0] = Some(index);
    }
}
