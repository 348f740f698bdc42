use std::{future::Future, pin::Pin};

use dioxus::{core::Task, prelude::*};
use types::{Branch, Group, ListQuery, NavigationNode, Paginated, User};

use crate::{
    browser::TreeBrowser,
    controller::Direction,
    drawer::{DrawerEvent, DrawerState, Steps},
    listing::{Listing, ListingEvent},
};

pub type ListingFuture<T> = Pin<Box<dyn Future<Output = Result<Paginated<T>, ServerFnError>>>>;

/// Runs one listing request against the server.
pub type Fetcher<T> = fn(ListQuery) -> ListingFuture<T>;

pub fn fetch_branches(query: ListQuery) -> ListingFuture<Branch> {
    Box::pin(api::list_branches(query))
}

pub fn fetch_users(query: ListQuery) -> ListingFuture<User> {
    Box::pin(api::list_users(query))
}

pub fn fetch_groups(query: ListQuery) -> ListingFuture<Group> {
    Box::pin(api::list_groups(query))
}

fn whole<T>(listing: &mut Listing<T>) -> &mut Listing<T> {
    listing
}

/// Start `fetch` for the selected listing's current query and store the
/// answer if it is still the latest. The previous request, if any, is
/// cancelled. Tasks belong to the calling component, so unmounting cancels
/// them too.
fn dispatch<S: 'static, T: 'static>(
    mut state: Signal<S>,
    select: fn(&mut S) -> &mut Listing<T>,
    mut task: Signal<Option<Task>>,
    fetch: Fetcher<T>,
) {
    let (ticket, query) = select(&mut *state.write()).begin();
    let next = spawn(async move {
        let result = fetch(query).await;
        if let Err(error) = &result {
            tracing::warn!(%error, "listing request failed");
        }
        select(&mut *state.write()).apply(&ticket, result);
    });

    if let Some(previous) = task.write().replace(next) {
        previous.cancel();
    }
}

/// A remote listing bound to a server function.
pub struct ListingHandle<T: 'static> {
    listing: Signal<Listing<T>>,
    task: Signal<Option<Task>>,
    fetch: Fetcher<T>,
}

impl<T: 'static> Clone for ListingHandle<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T: 'static> Copy for ListingHandle<T> {}

pub fn use_listing<T: 'static>(page_size: usize, fetch: Fetcher<T>) -> ListingHandle<T> {
    let listing = use_signal(|| Listing::new(page_size));
    let task = use_signal(|| None);
    let handle = ListingHandle {
        listing,
        task,
        fetch,
    };

    use_effect(move || handle.refresh());

    handle
}

impl<T: 'static> ListingHandle<T> {
    pub fn listing(&self) -> Signal<Listing<T>> {
        self.listing
    }

    pub fn refresh(self) {
        dispatch(self.listing, whole, self.task, self.fetch);
    }

    pub fn send(mut self, event: ListingEvent) {
        self.listing.write().handle(event);
        self.refresh();
    }
}

/// Which listing of the tree browser an action targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pane {
    Branches,
    Users,
}

/// The branch tree browser bound to the branch and user listings.
#[derive(Clone, Copy, PartialEq)]
pub struct BrowserHandle {
    browser: Signal<TreeBrowser<Branch, User>>,
    branch_task: Signal<Option<Task>>,
    user_task: Signal<Option<Task>>,
}

/// `on_navigate` is registered on the navigation controller and runs after
/// every transition, before the listings refetch.
pub fn use_tree_browser(
    page_size: usize,
    on_navigate: impl FnMut(&NavigationNode, Direction) + 'static,
) -> BrowserHandle {
    let browser = use_signal(move || {
        let mut browser = TreeBrowser::new(NavigationNode::root(), page_size);
        browser.controller_mut().on_change(on_navigate);
        browser
    });
    let branch_task = use_signal(|| None);
    let user_task = use_signal(|| None);
    let handle = BrowserHandle {
        browser,
        branch_task,
        user_task,
    };

    use_effect(move || handle.refresh_all());

    handle
}

impl BrowserHandle {
    pub fn tree(&self) -> Signal<TreeBrowser<Branch, User>> {
        self.browser
    }

    pub fn refresh(self, pane: Pane) {
        match pane {
            Pane::Branches => dispatch(
                self.browser,
                TreeBrowser::branches_mut,
                self.branch_task,
                fetch_branches,
            ),
            Pane::Users => dispatch(
                self.browser,
                TreeBrowser::entities_mut,
                self.user_task,
                fetch_users,
            ),
        }
    }

    pub fn refresh_all(self) {
        self.refresh(Pane::Branches);
        self.refresh(Pane::Users);
    }

    pub fn send(mut self, pane: Pane, event: ListingEvent) {
        {
            let mut browser = self.browser.write();
            match pane {
                Pane::Branches => browser.branches_mut().handle(event),
                Pane::Users => browser.entities_mut().handle(event),
            }
        }
        self.refresh(pane);
    }

    pub fn go_forward(mut self, node: NavigationNode) {
        let moved = self.browser.write().go_forward(node).is_some();
        if moved {
            self.refresh_all();
        }
    }

    pub fn go_back(mut self) {
        let moved = self.browser.write().go_back().is_some();
        if moved {
            self.refresh_all();
        }
    }

    pub fn go_to_breadcrumb(mut self, node: NavigationNode) {
        let result = self.browser.write().go_to_breadcrumb(&node);
        match result {
            Ok(_) => self.refresh_all(),
            Err(error) => tracing::warn!(%error, "ignoring breadcrumb navigation"),
        }
    }
}

/// A multi-step drawer driven by [`DrawerState::transition`].
pub struct DrawerHandle<S: 'static> {
    state: Signal<DrawerState<S>>,
}

impl<S: 'static> Clone for DrawerHandle<S> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<S: 'static> Copy for DrawerHandle<S> {}

pub fn use_drawer<S: Steps>() -> DrawerHandle<S> {
    let state = use_signal(|| DrawerState::Closed);
    DrawerHandle { state }
}

impl<S: Steps> DrawerHandle<S> {
    pub fn state(&self) -> Signal<DrawerState<S>> {
        self.state
    }

    pub fn send(mut self, event: DrawerEvent) {
        let current = (*self.state.peek()).clone();
        self.state.set(current.transition(event));
    }
}
