//! Wire and domain types for the posts API.

mod post;
mod user;

pub use post::{sort_newest_first, Post, PostDraft, PostPatch, ValidationError};
pub use user::{Credentials, LoginResponse, User};
