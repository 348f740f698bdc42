use types::{NavigationNode, PaginationState};

use crate::{
    controller::{NavigationController, NavigationError, Transition},
    listing::Listing,
};

/// Browses the branch tree one level at a time.
///
/// `B` is the row type of the child-branch listing and `E` the row type of
/// the entities (users, usually) scoped to the current node. Both listings
/// follow the current node: after every transition, whatever its direction,
/// both go back to their first page and drop their search text.
#[derive(Debug)]
pub struct TreeBrowser<B, E> {
    controller: NavigationController,
    branches: Listing<B>,
    entities: Listing<E>,
}

impl<B, E> TreeBrowser<B, E> {
    pub fn new(root: NavigationNode, page_size: usize) -> Self {
        let scope = root.scope_id();
        Self {
            controller: NavigationController::new(root),
            branches: Listing::new(page_size).with_scope(scope.clone()),
            entities: Listing::new(page_size).with_scope(scope),
        }
    }

    pub fn controller(&self) -> &NavigationController {
        &self.controller
    }

    pub fn controller_mut(&mut self) -> &mut NavigationController {
        &mut self.controller
    }

    pub fn current(&self) -> &NavigationNode {
        self.controller.current()
    }

    pub fn branches(&self) -> &Listing<B> {
        &self.branches
    }

    pub fn branches_mut(&mut self) -> &mut Listing<B> {
        &mut self.branches
    }

    pub fn entities(&self) -> &Listing<E> {
        &self.entities
    }

    pub fn entities_mut(&mut self) -> &mut Listing<E> {
        &mut self.entities
    }

    pub fn branch_pagination(&self) -> &PaginationState {
        self.branches.pagination()
    }

    pub fn entity_pagination(&self) -> &PaginationState {
        self.entities.pagination()
    }

    pub fn go_forward(&mut self, node: NavigationNode) -> Option<Transition> {
        let transition = self.controller.go_forward(node)?;
        self.follow(&transition);
        Some(transition)
    }

    pub fn go_back(&mut self) -> Option<Transition> {
        let transition = self.controller.go_back()?;
        self.follow(&transition);
        Some(transition)
    }

    pub fn go_to_breadcrumb(&mut self, node: &NavigationNode) -> Result<Transition, NavigationError> {
        let transition = self.controller.go_to_breadcrumb(node)?;
        self.follow(&transition);
        Ok(transition)
    }

    /// Stop tracking requests in flight, e.g. when the page goes away.
    pub fn invalidate(&mut self) {
        self.branches.invalidate();
        self.entities.invalidate();
    }

    fn follow(&mut self, transition: &Transition) {
        let scope = transition.node.scope_id();
        self.branches.rescope(scope.clone());
        self.entities.rescope(scope);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{controller::Direction, listing::Applied};
    use types::{NodeId, PageMeta, Paginated, SearchType};

    type Browser = TreeBrowser<&'static str, &'static str>;

    fn sales() -> NavigationNode {
        NavigationNode::new(5, "Sales").with_children(true)
    }

    fn emea() -> NavigationNode {
        NavigationNode::new(12, "EMEA")
    }

    fn page(items: &[&'static str]) -> Paginated<&'static str> {
        Paginated {
            items: items.to_vec(),
            pagination: PageMeta {
                total: items.len() as u64,
                current_page: 1,
                per_page: 25,
            },
        }
    }

    fn dirty(browser: &mut Browser) {
        browser.branches_mut().on_search_change("north");
        browser.branches_mut().on_page_change(3);
        browser.entities_mut().on_search_change("lina");
        browser.entities_mut().on_page_change(2);
    }

    fn assert_reset(browser: &Browser) {
        assert_eq!(*browser.branch_pagination(), PaginationState { page_index: 0, page_size: 25 });
        assert_eq!(*browser.entity_pagination(), PaginationState { page_index: 0, page_size: 25 });
        assert_eq!(browser.branches().search().text, "");
        assert_eq!(browser.entities().search().text, "");
    }

    #[test]
    fn root_queries_are_unscoped() {
        let browser = Browser::new(NavigationNode::root(), 25);

        assert_eq!(browser.branches().query().scope_id, None);
        assert_eq!(browser.entities().query().scope_id, None);
    }

    #[test]
    fn every_direction_resets_both_listings() {
        let mut browser = Browser::new(NavigationNode::root(), 25);

        dirty(&mut browser);
        browser.go_forward(sales());
        assert_reset(&browser);

        browser.go_forward(emea());
        dirty(&mut browser);
        browser.go_to_breadcrumb(&sales()).unwrap();
        assert_reset(&browser);

        dirty(&mut browser);
        let transition = browser.go_back().unwrap();
        assert_eq!(transition.direction, Direction::Backward);
        assert_reset(&browser);
    }

    #[test]
    fn queries_follow_current_node() {
        let mut browser = Browser::new(NavigationNode::root(), 25);
        browser.go_forward(sales());

        assert_eq!(browser.branches().query().scope_id, Some(NodeId::Int(5)));
        assert_eq!(browser.entities().query().scope_id, Some(NodeId::Int(5)));
        assert_eq!(browser.branches().query().page, 1);

        browser.go_back();
        assert_eq!(browser.branches().query().scope_id, None);
    }

    #[test]
    fn search_type_survives_navigation() {
        let mut browser = Browser::new(NavigationNode::root(), 25);
        browser
            .branches_mut()
            .on_search_type_change(SearchType::CurrentAndDescendants);

        browser.go_forward(sales());

        assert_eq!(
            browser.branches().query().search_type,
            SearchType::CurrentAndDescendants
        );
    }

    #[test]
    fn late_response_for_previous_node_is_discarded() {
        let mut browser = Browser::new(NavigationNode::root(), 25);
        browser.go_forward(sales());
        let (for_sales, _) = browser.branches_mut().begin();

        browser.go_forward(emea());
        let (for_emea, query) = browser.branches_mut().begin();
        assert_eq!(query.scope_id, Some(NodeId::Int(12)));

        assert_eq!(
            browser.branches_mut().apply(&for_emea, Ok::<_, String>(page(&["EMEA North"]))),
            Applied::Applied
        );
        assert_eq!(
            browser.branches_mut().apply(&for_sales, Ok::<_, String>(page(&["EMEA", "APAC"]))),
            Applied::Stale
        );
        assert_eq!(
            browser.branches().state().page().unwrap().items,
            ["EMEA North"]
        );
    }

    #[test]
    fn no_op_navigation_keeps_listing_state() {
        let mut browser = Browser::new(NavigationNode::root(), 25);
        dirty(&mut browser);

        assert_eq!(browser.go_back(), None);
        assert_eq!(browser.branch_pagination().page_index, 3);
        assert_eq!(browser.branches().search().text, "north");
    }
}
