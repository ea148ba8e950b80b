//! Navigation router for section transitions

use crate::sections::SectionId;

/// Router manages navigation history
pub struct Router {
    /// Navigation history stack
    history: Vec<SectionId>,
    /// Maximum history depth
    max_depth: usize,
}

impl Router {
    /// Create a new router
    pub fn new() -> Self {
        Self {
            history: Vec::new(),
            max_depth: 20,
        }
    }

    /// Push a new section onto the history
    pub fn push(&mut self, id: SectionId) {
        // Limit history depth
        if self.history.len() >= self.max_depth {
            self.history.remove(0);
        }

        self.history.push(id);
    }

    /// Go back to the previous section
    pub fn back(&mut self) -> Option<SectionId> {
        self.history.pop();
        self.history.last().copied()
    }

    /// Drop every occurrence of `ids` from the history
    pub fn remove_from_stack(&mut self, ids: &[SectionId]) {
        self.history.retain(|id| !ids.contains(id));
    }

    /// Get the current section
    pub fn current(&self) -> Option<SectionId> {
        self.history.last().copied()
    }

    /// Clear navigation history
    pub fn clear(&mut self) {
        self.history.clear();
    }

    /// Check if we can go back
    pub fn can_go_back(&self) -> bool {
        self.history.len() > 1
    }

    pub fn depth(&self) -> usize {
        self.history.len()
    }
}

impl Default for Router {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_and_back() {
        let mut router = Router::new();
        router.push(SectionId::PasscodeManage);
        router.push(SectionId::PasscodeChange);
        assert!(router.can_go_back());

        assert_eq!(router.back(), Some(SectionId::PasscodeManage));
        assert!(!router.can_go_back());
        assert_eq!(router.back(), None);
        assert_eq!(router.current(), None);
    }

    #[test]
    fn test_remove_from_stack() {
        let mut router = Router::new();
        router.push(SectionId::PasscodeCheck);
        router.push(SectionId::PasscodeManage);
        router.push(SectionId::PasscodeChange);

        router.remove_from_stack(&[SectionId::PasscodeCheck, SectionId::PasscodeChange]);
        assert_eq!(router.depth(), 1);
        assert_eq!(router.current(), Some(SectionId::PasscodeManage));
    }

    #[test]
    fn test_depth_is_bounded() {
        let mut router = Router::new();
        for _ in 0..25 {
            router.push(SectionId::PasscodeManage);
        }
        assert_eq!(router.depth(), 20);
    }
}
