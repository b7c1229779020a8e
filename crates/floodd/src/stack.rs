//! Stack of dispatched requests, used to undo the most recent dispatch.

use flood_common::EmergencyRequest;

#[derive(Debug, Default)]
pub struct DispatchStack {
    entries: Vec<EmergencyRequest>,
}

impl DispatchStack {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, request: EmergencyRequest) {
        self.entries.push(request);
    }

    pub fn pop(&mut self) -> Option<EmergencyRequest> {
        self.entries.pop()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Bottom to top
    pub fn to_vec(&self) -> Vec<EmergencyRequest> {
        self.entries.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use flood_common::Priority;

    #[test]
    fn test_lifo() {
        let mut stack = DispatchStack::new();
        stack.push(EmergencyRequest::new(1, "fire", Priority::from(5)));
        stack.push(EmergencyRequest::new(2, "cat stuck", Priority::from(2)));
        assert_eq!(stack.len(), 2);
        assert_eq!(stack.pop().map(|r| r.id), Some(2));
        assert_eq!(stack.len(), 1);
        assert_eq!(stack.pop().map(|r| r.id), Some(1));
        assert!(stack.pop().is_none());
        assert!(stack.is_empty());
    }
}
