use types::{NavigationNode, NodeId};

/// The path from the tree root to the node currently on screen.
///
/// The first entry is always the root the history was created with and the
/// last entry is the current node. There is no redo: moving back drops the
/// entries after the new current node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavigationHistory {
    entries: Vec<NavigationNode>,
}

impl Default for NavigationHistory {
    fn default() -> Self {
        Self::new(NavigationNode::root())
    }
}

impl NavigationHistory {
    pub fn new(root: NavigationNode) -> Self {
        Self {
            entries: vec![root],
        }
    }

    pub fn entries(&self) -> &[NavigationNode] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Never true, the root is always present.
    pub fn is_empty(&self) -> bool {
        false
    }

    pub fn root(&self) -> &NavigationNode {
        &self.entries[0]
    }

    pub fn current(&self) -> &NavigationNode {
        &self.entries[self.current_index()]
    }

    pub fn current_index(&self) -> usize {
        self.entries.len() - 1
    }

    pub fn is_at_root(&self) -> bool {
        self.entries.len() == 1
    }

    pub fn position(&self, id: &NodeId) -> Option<usize> {
        self.entries.iter().position(|node| &node.id == id)
    }

    pub fn push(&mut self, node: NavigationNode) {
        self.entries.push(node);
    }

    /// Drop the current node. Returns `false` at the root.
    pub fn pop(&mut self) -> bool {
        if self.is_at_root() {
            return false;
        }
        self.entries.pop();
        true
    }

    /// Keep entries up to and including `index`.
    pub fn truncate_after(&mut self, index: usize) {
        self.entries.truncate(index + 1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_with_root_only() {
        let history = NavigationHistory::default();

        assert_eq!(history.len(), 1);
        assert!(history.is_at_root());
        assert_eq!(history.current(), &NavigationNode::root());
    }

    #[test]
    fn pop_never_removes_root() {
        let mut history = NavigationHistory::default();
        history.push(NavigationNode::new(5, "Sales"));

        assert!(history.pop());
        assert!(!history.pop());
        assert_eq!(history.entries(), &[NavigationNode::root()]);
    }

    #[test]
    fn truncate_keeps_target() {
        let mut history = NavigationHistory::default();
        history.push(NavigationNode::new(5, "Sales"));
        history.push(NavigationNode::new(12, "EMEA"));
        history.truncate_after(1);

        assert_eq!(history.current().title, "Sales");
        assert_eq!(history.position(&NodeId::Int(12)), None);
    }
}
