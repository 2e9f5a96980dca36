//! Reducer trait.

use super::action::Action;
use super::state::StoreState;

/// Reducer transforms state based on actions.
///
/// The reducer is the only place where state transitions happen.
/// It must not perform I/O: (State, Action) -> State
pub trait Reducer {
    type State: StoreState;
    type Action: Action;

    fn reduce(state: Self::State, action: Self::Action) -> Self::State;
}
