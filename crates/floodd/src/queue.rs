//! Priority queue of pending requests.
//!
//! Ordered by descending priority. Equal priorities keep arrival order,
//! which is id order since ids only grow.

use flood_common::EmergencyRequest;
use std::cmp::Ordering;
use std::collections::VecDeque;

#[derive(Debug, Default)]
pub struct PriorityQueue {
    entries: VecDeque<EmergencyRequest>,
}

impl PriorityQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert before the first entry that `request` outranks, else append.
    ///
    /// A fresh request has the highest id, so it lands before the first
    /// strictly lower priority. A request returned by undo lands back in
    /// its original slot among equal priorities.
    pub fn enqueue(&mut self, request: EmergencyRequest) {
        match self
            .entries
            .iter()
            .position(|queued| outranks(&request, queued))
        {
            Some(index) => self.entries.insert(index, request),
            None => self.entries.push_back(request),
        }
    }

    /// Remove the highest-priority request
    pub fn dispatch_top(&mut self) -> Option<EmergencyRequest> {
        self.entries.pop_front()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &EmergencyRequest> {
        self.entries.iter()
    }

    pub fn to_vec(&self) -> Vec<EmergencyRequest> {
        self.entries.iter().cloned().collect()
    }
}

/// Higher priority first, then earlier arrival
fn outranks(a: &EmergencyRequest, b: &EmergencyRequest) -> bool {
    match a.priority.partial_cmp(&b.priority) {
        Some(Ordering::Greater) => true,
        Some(Ordering::Equal) => a.id < b.id,
        _ => false,
    }
}
