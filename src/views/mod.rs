//! Views served by the application.

pub mod users;

pub use users::{User, UserListView};
