use std::fmt;

use thiserror::Error;
use types::{NavigationNode, NodeId};

use crate::history::NavigationHistory;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Forward,
    Backward,
    Breadcrumb,
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Direction::Forward => "forward",
            Direction::Backward => "backward",
            Direction::Breadcrumb => "breadcrumb",
        })
    }
}

/// The result of a navigation: the node now current and how we got there.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transition {
    pub node: NavigationNode,
    pub direction: Direction,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NavigationError {
    #[error("node {id} is not in the navigation history")]
    NotInHistory { id: NodeId },
}

type Observer = Box<dyn FnMut(&NavigationNode, Direction)>;

/// Drives a [`NavigationHistory`] and tells observers about every transition.
///
/// Operations that would not change anything (moving forward to the current
/// node, moving back from the root) are no-ops and notify nobody.
#[derive(Default)]
pub struct NavigationController {
    history: NavigationHistory,
    observers: Vec<Observer>,
}

impl fmt::Debug for NavigationController {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NavigationController")
            .field("history", &self.history)
            .field("observers", &self.observers.len())
            .finish()
    }
}

impl NavigationController {
    pub fn new(root: NavigationNode) -> Self {
        Self {
            history: NavigationHistory::new(root),
            observers: Vec::new(),
        }
    }

    /// Register a callback fired with `(node, direction)` after each transition.
    pub fn on_change(&mut self, observer: impl FnMut(&NavigationNode, Direction) + 'static) {
        self.observers.push(Box::new(observer));
    }

    pub fn history(&self) -> &NavigationHistory {
        &self.history
    }

    pub fn current(&self) -> &NavigationNode {
        self.history.current()
    }

    pub fn breadcrumbs(&self) -> &[NavigationNode] {
        self.history.entries()
    }

    pub fn can_go_back(&self) -> bool {
        !self.history.is_at_root()
    }

    pub fn go_forward(&mut self, node: NavigationNode) -> Option<Transition> {
        if self.history.position(&node.id).is_some() {
            tracing::debug!(id = %node.id, "node already in history, ignoring forward navigation");
            return None;
        }
        self.history.push(node);
        Some(self.notify(Direction::Forward))
    }

    pub fn go_back(&mut self) -> Option<Transition> {
        if !self.history.pop() {
            tracing::debug!("already at root, ignoring back navigation");
            return None;
        }
        Some(self.notify(Direction::Backward))
    }

    /// Jump to an ancestor (or the current node) shown in the breadcrumbs.
    pub fn go_to_breadcrumb(&mut self, node: &NavigationNode) -> Result<Transition, NavigationError> {
        let index = self
            .history
            .position(&node.id)
            .ok_or_else(|| NavigationError::NotInHistory { id: node.id.clone() })?;
        self.history.truncate_after(index);
        Ok(self.notify(Direction::Breadcrumb))
    }

    fn notify(&mut self, direction: Direction) -> Transition {
        let node = self.history.current().clone();
        tracing::debug!(id = %node.id, title = %node.title, %direction, depth = self.history.len(), "navigated");
        for observer in &mut self.observers {
            observer(&node, direction);
        }
        Transition { node, direction }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use std::{cell::RefCell, rc::Rc};

    fn sales() -> NavigationNode {
        NavigationNode::new(5, "Sales").with_children(true)
    }

    fn emea() -> NavigationNode {
        NavigationNode::new(12, "EMEA")
    }

    fn titles(controller: &NavigationController) -> Vec<&str> {
        controller
            .breadcrumbs()
            .iter()
            .map(|n| n.title.as_str())
            .collect()
    }

    fn recording() -> (NavigationController, Rc<RefCell<Vec<(NodeId, Direction)>>>) {
        let events = Rc::new(RefCell::new(Vec::new()));
        let mut controller = NavigationController::default();
        let sink = events.clone();
        controller.on_change(move |node, direction| {
            sink.borrow_mut().push((node.id.clone(), direction));
        });
        (controller, events)
    }

    #[test]
    fn walkthrough_from_platform_to_emea_and_back() {
        let (mut controller, events) = recording();
        assert!(events.borrow().is_empty());

        controller.go_forward(sales());
        assert_eq!(titles(&controller), ["Platform", "Sales"]);

        controller.go_forward(emea());
        assert_eq!(titles(&controller), ["Platform", "Sales", "EMEA"]);

        controller.go_to_breadcrumb(&sales()).unwrap();
        assert_eq!(titles(&controller), ["Platform", "Sales"]);

        controller.go_back();
        assert_eq!(titles(&controller), ["Platform"]);
        assert!(controller.current().is_root());

        assert_eq!(controller.go_back(), None);
        assert_eq!(titles(&controller), ["Platform"]);

        assert_eq!(
            *events.borrow(),
            vec![
                (NodeId::Int(5), Direction::Forward),
                (NodeId::Int(12), Direction::Forward),
                (NodeId::Int(5), Direction::Breadcrumb),
                (NodeId::ROOT, Direction::Backward),
            ]
        );
    }

    #[test]
    fn back_after_two_forwards_lands_on_first() {
        let mut controller = NavigationController::default();
        controller.go_forward(sales());
        controller.go_forward(emea());

        let transition = controller.go_back().unwrap();

        assert_eq!(transition.node, sales());
        assert_eq!(transition.direction, Direction::Backward);
        assert_eq!(titles(&controller), ["Platform", "Sales"]);
    }

    #[test]
    fn forward_to_current_node_is_ignored() {
        let (mut controller, events) = recording();
        controller.go_forward(sales());

        assert_eq!(controller.go_forward(sales()), None);
        assert_eq!(controller.history().len(), 2);
        assert_eq!(events.borrow().len(), 1);
    }

    #[test]
    fn forward_to_ancestor_is_ignored() {
        let (mut controller, events) = recording();
        controller.go_forward(sales());
        controller.go_forward(emea());

        assert_eq!(controller.go_forward(NavigationNode::root()), None);
        assert_eq!(controller.go_forward(sales()), None);
        assert_eq!(titles(&controller), ["Platform", "Sales", "EMEA"]);
        assert_eq!(events.borrow().len(), 2);
    }

    #[test]
    fn breadcrumb_to_root_resets_history() {
        let mut controller = NavigationController::default();
        controller.go_forward(sales());
        controller.go_forward(emea());

        controller.go_to_breadcrumb(&NavigationNode::root()).unwrap();

        assert_eq!(controller.breadcrumbs(), &[NavigationNode::root()]);
    }

    #[test]
    fn unknown_breadcrumb_is_an_error_and_leaves_history() {
        let (mut controller, events) = recording();
        controller.go_forward(sales());

        let err = controller.go_to_breadcrumb(&emea()).unwrap_err();

        assert_eq!(err, NavigationError::NotInHistory { id: NodeId::Int(12) });
        assert_eq!(titles(&controller), ["Platform", "Sales"]);
        assert_eq!(events.borrow().len(), 1);
    }

    #[test]
    fn breadcrumb_to_current_node_still_notifies() {
        let (mut controller, events) = recording();
        controller.go_forward(sales());

        controller.go_to_breadcrumb(&sales()).unwrap();

        assert_eq!(titles(&controller), ["Platform", "Sales"]);
        assert_eq!(events.borrow().last(), Some(&(NodeId::Int(5), Direction::Breadcrumb)));
    }

    #[test]
    fn observers_fire_in_registration_order() {
        let order = Rc::new(RefCell::new(Vec::new()));
        let mut controller = NavigationController::default();
        for name in ["breadcrumbs", "listing"] {
            let order = order.clone();
            controller.on_change(move |_, _| order.borrow_mut().push(name));
        }

        controller.go_forward(sales());

        assert_eq!(*order.borrow(), ["breadcrumbs", "listing"]);
    }

    #[derive(Debug, Clone)]
    enum Op {
        Forward(i64),
        Back,
        Breadcrumb(i64),
    }

    fn op() -> impl Strategy<Value = Op> {
        prop_oneof![
            (1i64..20).prop_map(Op::Forward),
            Just(Op::Back),
            (1i64..20).prop_map(Op::Breadcrumb),
        ]
    }

    proptest! {
        /// Property: whatever happens, the root stays first and history is never empty.
        #[test]
        fn root_survives_any_sequence(ops in proptest::collection::vec(op(), 0..64)) {
            let mut controller = NavigationController::default();
            for op in ops {
                match op {
                    Op::Forward(id) => { controller.go_forward(NavigationNode::new(id, format!("node {id}"))); }
                    Op::Back => { controller.go_back(); }
                    Op::Breadcrumb(id) => { let _ = controller.go_to_breadcrumb(&NavigationNode::new(id, "")); }
                }
                prop_assert!(!controller.breadcrumbs().is_empty());
                prop_assert!(controller.breadcrumbs()[0].is_root());

                let trail = controller.breadcrumbs();
                for (i, node) in trail.iter().enumerate() {
                    prop_assert!(trail[i + 1..].iter().all(|other| other.id != node.id));
                }
            }
        }

        /// Property: every reported transition names the node that is now current.
        #[test]
        fn transitions_report_current_node(ops in proptest::collection::vec(op(), 0..64)) {
            let mut controller = NavigationController::default();
            for op in ops {
                let transition = match op {
                    Op::Forward(id) => controller.go_forward(NavigationNode::new(id, "")),
                    Op::Back => controller.go_back(),
                    Op::Breadcrumb(id) => controller.go_to_breadcrumb(&NavigationNode::new(id, "")).ok(),
                };
                if let Some(transition) = transition {
                    prop_assert_eq!(&transition.node, controller.current());
                }
            }
        }
    }
}
