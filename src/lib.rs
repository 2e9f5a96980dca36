//! Client core for the posts platform.
//!
//! ```text
//! caller ──→ sync ──→ api ──→ remote HTTP API
//!              │
//!              ├──→ posts (PostStore, reducer)
//!              └──→ session (SessionStore, durable storage)
//! ```
//!
//! The `proxy` module is a development-only relay and is not used by the
//! client path.

pub mod api;
pub mod config;
pub mod logging;
pub mod model;
pub mod mvi;
pub mod posts;
pub mod proxy;
pub mod session;
pub mod sync;
