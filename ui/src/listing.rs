use types::{
    ListQuery, NodeId, Paginated, PaginationState, SearchState, SearchType, SortDirection, SortState,
};

#[derive(Debug, Clone, PartialEq)]
pub enum LoadState<T> {
    Idle,
    /// A request is in flight. The previous page stays visible meanwhile.
    Loading { previous: Option<Paginated<T>> },
    Loaded(Paginated<T>),
    Failed { message: String },
}

impl<T> LoadState<T> {
    pub fn is_loading(&self) -> bool {
        matches!(self, LoadState::Loading { .. })
    }

    /// The page to show, if any.
    pub fn page(&self) -> Option<&Paginated<T>> {
        match self {
            LoadState::Loaded(page) => Some(page),
            LoadState::Loading { previous } => previous.as_ref(),
            LoadState::Idle | LoadState::Failed { .. } => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            LoadState::Failed { message } => Some(message),
            _ => None,
        }
    }

    fn into_page(self) -> Option<Paginated<T>> {
        match self {
            LoadState::Loaded(page) => Some(page),
            LoadState::Loading { previous } => previous,
            LoadState::Idle | LoadState::Failed { .. } => None,
        }
    }
}

/// Identifies the request a response belongs to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestTicket {
    generation: u64,
    scope: Option<NodeId>,
}

impl RequestTicket {
    pub fn scope(&self) -> Option<&NodeId> {
        self.scope.as_ref()
    }
}

/// A change requested by the table widget of a listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListingEvent {
    Search(String),
    SearchType(SearchType),
    Page(usize),
    RowsPerPage(usize),
    Sort(String, SortDirection),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Applied {
    Applied,
    /// The response answered an older request and was dropped.
    Stale,
}

/// Table state of one remote listing: paging, search, sort, scope and the
/// data last received.
///
/// Every request started with [`Listing::begin`] supersedes the ones before
/// it. Responses are only accepted for the latest request, so a slow answer
/// for a previous node or page can never replace what is on screen.
#[derive(Debug, Clone)]
pub struct Listing<T> {
    pagination: PaginationState,
    search: SearchState,
    sort: SortState,
    scope: Option<NodeId>,
    page_size_limit: Option<usize>,
    generation: u64,
    state: LoadState<T>,
}

impl<T> Listing<T> {
    pub fn new(page_size: usize) -> Self {
        Self {
            pagination: PaginationState::new(page_size),
            search: SearchState::default(),
            sort: SortState::default(),
            scope: None,
            page_size_limit: None,
            generation: 0,
            state: LoadState::Idle,
        }
    }

    pub fn with_scope(mut self, scope: Option<NodeId>) -> Self {
        self.scope = scope;
        self
    }

    pub fn with_page_size_limit(mut self, limit: usize) -> Self {
        self.page_size_limit = Some(limit);
        self
    }

    pub fn pagination(&self) -> &PaginationState {
        &self.pagination
    }

    pub fn search(&self) -> &SearchState {
        &self.search
    }

    pub fn sort(&self) -> &SortState {
        &self.sort
    }

    pub fn scope(&self) -> Option<&NodeId> {
        self.scope.as_ref()
    }

    pub fn state(&self) -> &LoadState<T> {
        &self.state
    }

    pub fn query(&self) -> ListQuery {
        let query = ListQuery::new(&self.pagination, &self.search, &self.sort, self.scope.clone());
        match self.page_size_limit {
            Some(limit) => query.with_page_size_limit(limit),
            None => query,
        }
    }

    /// Start a request for the current query, superseding any in flight.
    pub fn begin(&mut self) -> (RequestTicket, ListQuery) {
        self.generation += 1;
        let previous = std::mem::replace(&mut self.state, LoadState::Idle).into_page();
        self.state = LoadState::Loading { previous };

        let ticket = RequestTicket {
            generation: self.generation,
            scope: self.scope.clone(),
        };
        (ticket, self.query())
    }

    pub fn apply<E: ToString>(
        &mut self,
        ticket: &RequestTicket,
        result: Result<Paginated<T>, E>,
    ) -> Applied {
        if ticket.generation != self.generation || ticket.scope != self.scope {
            tracing::debug!(
                ticket = ticket.generation,
                current = self.generation,
                "dropping stale listing response"
            );
            return Applied::Stale;
        }

        self.state = match result {
            Ok(page) => LoadState::Loaded(page),
            Err(error) => LoadState::Failed {
                message: error.to_string(),
            },
        };
        Applied::Applied
    }

    /// Forget any request in flight without starting a new one.
    pub fn invalidate(&mut self) {
        self.generation += 1;
        if let LoadState::Loading { .. } = self.state {
            let previous = std::mem::replace(&mut self.state, LoadState::Idle).into_page();
            self.state = previous.map_or(LoadState::Idle, LoadState::Loaded);
        }
    }

    /// Point the listing at another node: first page, no search text and
    /// nothing on screen until the new node's page arrives.
    pub fn rescope(&mut self, scope: Option<NodeId>) {
        self.scope = scope;
        self.pagination.reset();
        self.search.clear();
        self.invalidate();
        self.state = LoadState::Idle;
    }

    pub fn handle(&mut self, event: ListingEvent) {
        match event {
            ListingEvent::Search(text) => self.on_search_change(text),
            ListingEvent::SearchType(search_type) => self.on_search_type_change(search_type),
            ListingEvent::Page(page_index) => self.on_page_change(page_index),
            ListingEvent::RowsPerPage(page_size) => self.on_rows_per_page_change(page_size),
            ListingEvent::Sort(attr, direction) => self.on_sort_change(attr, direction),
        }
    }

    pub fn on_search_change(&mut self, text: impl Into<String>) {
        self.search.text = text.into();
        self.pagination.reset();
    }

    pub fn on_search_type_change(&mut self, search_type: SearchType) {
        self.search.search_type = search_type;
        self.pagination.reset();
    }

    pub fn on_page_change(&mut self, page_index: usize) {
        self.pagination.set_page(page_index);
    }

    pub fn on_rows_per_page_change(&mut self, page_size: usize) {
        self.pagination.set_page_size(page_size);
    }

    pub fn on_sort_change(&mut self, attr: impl Into<String>, direction: SortDirection) {
        self.sort = SortState {
            attr: Some(attr.into()),
            direction,
        };
        self.pagination.reset();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use types::PageMeta;

    fn page(items: &[&'static str]) -> Paginated<&'static str> {
        Paginated {
            items: items.to_vec(),
            pagination: PageMeta {
                total: items.len() as u64,
                current_page: 1,
                per_page: 10,
            },
        }
    }

    #[test]
    fn latest_request_wins() {
        let mut listing = Listing::new(10);
        let (first, _) = listing.begin();
        let (second, _) = listing.begin();

        assert_eq!(listing.apply(&second, Ok::<_, String>(page(&["new"]))), Applied::Applied);
        assert_eq!(listing.apply(&first, Ok::<_, String>(page(&["old"]))), Applied::Stale);
        assert_eq!(listing.state().page().unwrap().items, ["new"]);
    }

    #[test]
    fn response_for_previous_scope_is_dropped() {
        let mut listing = Listing::new(10).with_scope(Some(NodeId::Int(5)));
        let (for_sales, _) = listing.begin();

        listing.rescope(Some(NodeId::Int(12)));

        assert_eq!(listing.apply(&for_sales, Ok::<_, String>(page(&["sales"]))), Applied::Stale);
        assert_eq!(listing.state().page(), None);
    }

    #[test]
    fn rescope_clears_rows_of_previous_node() {
        let mut listing = Listing::new(10).with_scope(Some(NodeId::Int(5)));
        let (ticket, _) = listing.begin();
        listing.apply(&ticket, Ok::<_, String>(page(&["EMEA", "APAC"])));

        listing.rescope(Some(NodeId::Int(12)));
        assert_eq!(*listing.state(), LoadState::Idle);

        listing.begin();
        assert!(listing.state().is_loading());
        assert_eq!(listing.state().page(), None);
    }

    #[test]
    fn loading_keeps_previous_page_visible() {
        let mut listing = Listing::new(10);
        let (ticket, _) = listing.begin();
        listing.apply(&ticket, Ok::<_, String>(page(&["a", "b"])));

        listing.on_page_change(1);
        listing.begin();

        assert!(listing.state().is_loading());
        assert_eq!(listing.state().page().unwrap().items, ["a", "b"]);
    }

    #[test]
    fn failure_is_reported_on_the_listing() {
        let mut listing = Listing::<&str>::new(10);
        let (ticket, _) = listing.begin();

        listing.apply(&ticket, Err("backend unavailable"));

        assert_eq!(listing.state().error(), Some("backend unavailable"));
    }

    #[test]
    fn invalidate_drops_in_flight_request() {
        let mut listing = Listing::new(10);
        let (ticket, _) = listing.begin();

        listing.invalidate();

        assert!(!listing.state().is_loading());
        assert_eq!(listing.apply(&ticket, Ok::<_, String>(page(&["late"]))), Applied::Stale);
    }

    #[test]
    fn rescope_resets_page_and_search_but_keeps_size() {
        let mut listing = Listing::<()>::new(25);
        listing.on_search_type_change(SearchType::CurrentBranch);
        listing.on_search_change("emea");
        listing.on_page_change(4);

        listing.rescope(Some(NodeId::Int(12)));

        assert_eq!(*listing.pagination(), PaginationState { page_index: 0, page_size: 25 });
        assert_eq!(listing.search().text, "");
        assert_eq!(listing.search().search_type, SearchType::CurrentBranch);
        assert_eq!(listing.query().scope_id, Some(NodeId::Int(12)));
    }

    #[test]
    fn search_sort_and_size_changes_go_back_to_first_page() {
        let mut listing = Listing::<()>::new(10);

        listing.on_page_change(3);
        listing.on_search_change("lina");
        assert_eq!(listing.pagination().page_index, 0);

        listing.on_page_change(3);
        listing.on_search_type_change(SearchType::CurrentAndDescendants);
        assert_eq!(listing.pagination().page_index, 0);

        listing.on_page_change(3);
        listing.on_sort_change("name", SortDirection::Desc);
        assert_eq!(listing.pagination().page_index, 0);

        listing.on_page_change(3);
        listing.on_rows_per_page_change(50);
        assert_eq!(*listing.pagination(), PaginationState { page_index: 0, page_size: 50 });
    }

    #[test]
    fn page_change_keeps_search() {
        let mut listing = Listing::<()>::new(10);
        listing.on_search_change("lina");
        listing.on_page_change(2);

        let query = listing.query();
        assert_eq!(query.page, 3);
        assert_eq!(query.search.as_deref(), Some("lina"));
    }

    #[test]
    fn widget_events_map_to_callbacks() {
        let mut listing = Listing::<()>::new(10);
        listing.handle(ListingEvent::Search("sales".into()));
        listing.handle(ListingEvent::Page(2));
        listing.handle(ListingEvent::Sort("title".into(), SortDirection::Desc));
        listing.handle(ListingEvent::RowsPerPage(20));
        listing.handle(ListingEvent::Page(1));

        let query = listing.query();
        assert_eq!(query.search.as_deref(), Some("sales"));
        assert_eq!(query.sort_attr.as_deref(), Some("title"));
        assert_eq!(query.sort_dir, SortDirection::Desc);
        assert_eq!((query.page, query.page_size), (2, 20));
    }

    #[test]
    fn page_size_limit_applies_to_queries() {
        let listing = Listing::<()>::new(500).with_page_size_limit(100);
        assert_eq!(listing.query().page_size, 100);
    }
}
