//! HTTP client for the remote posts API.

mod client;
mod error;

pub use client::ApiClient;
pub use error::ApiError;
