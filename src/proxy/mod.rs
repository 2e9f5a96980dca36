//! Development relay.
//!
//! Forwards `<prefix>/*` to the remote API with the prefix stripped, adds
//! permissive CORS headers and logs every request. Not used by the client
//! path; it exists so browser builds can reach the API during development.

pub mod error;
pub mod health;
pub mod rewrite;
pub mod router;
pub mod server;
pub mod shutdown;
pub mod upstream;

pub use error::{ErrorResponse, ProxyError};
pub use router::{build_router, ProxyState};
pub use server::{ProxyHandle, ProxyServer};
pub use shutdown::ShutdownManager;
pub use upstream::UpstreamClient;
