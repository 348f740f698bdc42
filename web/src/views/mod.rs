mod components;

mod dashboard;
pub use dashboard::Dashboard;

mod branches;
pub use branches::Branches;

mod users;
pub use users::Users;

mod groups;
pub use groups::Groups;

mod user_fields;
pub use user_fields::UserFields;
