//! Unidirectional state primitives shared by the client stores.
//!
//! ```text
//! Action ──→ Reducer ──→ State ──→ caller
//!    ↑                               │
//!    └───────────────────────────────┘
//! ```
//!
//! - **State**: owned snapshot of a store, cloned out to readers
//! - **Action**: the only way a store changes (fetch results, flags)
//! - **Reducer**: pure `(State, Action) -> State`

mod action;
mod reducer;
mod state;

pub use action::Action;
pub use reducer::Reducer;
pub use state::StoreState;
