//! The console's browsing core and its Dioxus bindings.
//!
//! Everything except [`hooks`] is plain state with no UI framework in
//! sight: the navigation history and its controller, remote listing state,
//! the tree browser that ties them together, and the drawer state machine.

pub mod browser;
pub mod controller;
pub mod drawer;
pub mod history;
pub mod hooks;
pub mod listing;

pub use browser::TreeBrowser;
pub use controller::{Direction, NavigationController, NavigationError, Transition};
pub use drawer::{CreateUserStep, DrawerEvent, DrawerState, Steps};
pub use history::NavigationHistory;
pub use hooks::{
    BrowserHandle, DrawerHandle, ListingHandle, Pane, fetch_branches, fetch_groups, fetch_users,
    use_drawer, use_listing, use_tree_browser,
};
pub use listing::{Applied, Listing, ListingEvent, LoadState, RequestTicket};
