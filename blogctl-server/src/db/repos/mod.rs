//! Repository implementations over a `BlogStore`
//!
//! Repositories borrow the store handle for the duration of a request and
//! own the domain rules (timestamps, not-found mapping, logging).

pub mod posts;
pub mod users;

pub use posts::PostRepo;
pub use users::UserRepo;
