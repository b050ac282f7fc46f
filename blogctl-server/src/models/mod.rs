//! Domain models with validation at construction
//!
//! Request input is validated when building the newtypes below.
//! Invalid input returns ValidationError, not panic.

pub mod post;
pub mod user;
pub mod validation;

pub use post::{NewPost, Post, PostAuthor, PostContent, PostId, PostTitle, PostWithAuthor};
pub use user::{User, UserId, UserName};
pub use validation::ValidationError;
