//! Unidirectional state container.
//!
//! One store owns an application state tree. Callers describe transitions
//! as serializable actions, a pure reducer computes the next state, and
//! subscribers run after every dispatch. Reducers compose by state slice
//! with [`combine_reducers`]; dispatch itself composes with
//! [`apply_middleware`]. Everything is synchronous and single-threaded.
//!
//! # Example
//!
//! ```
//! use std::rc::Rc;
//! use serde_json::{json, Value};
//! use uniflow::{create_store, Action, Reducer};
//!
//! let counter: Reducer = Rc::new(|state: &Value, action: &Action| {
//!     let count = state.as_i64().unwrap_or(0);
//!     Ok(match action.type_str() {
//!         Some("INCREMENT") => json!(count + 1),
//!         Some("DECREMENT") => json!(count - 1),
//!         _ => json!(count),
//!     })
//! });
//!
//! let store = create_store(counter, Value::Null, None)?;
//! let _unsubscribe = store.subscribe({
//!     let store = store.clone();
//!     move || println!("state: {}", store.get_state())
//! });
//!
//! store.dispatch(Action::of("INCREMENT"))?;
//! store.dispatch(Action::of("INCREMENT"))?;
//! store.dispatch(Action::of("DECREMENT"))?;
//! assert_eq!(store.get_state(), json!(1));
//! # Ok::<(), uniflow::StoreError>(())
//! ```

mod action;
mod bind;
mod combine;
mod compose;
mod error;
mod extend;
pub mod middleware;
mod store;

pub use action::{Action, ThunkFn};
pub use bind::{
    bind_action_creators, ActionCreator, ActionCreators, BoundActionCreator, BoundActionCreators,
};
pub use combine::combine_reducers;
pub use compose::{compose, ComposeFn};
pub use error::StoreError;
pub use extend::extend;
pub use middleware::{
    apply_middleware, log_middleware, thunk_middleware, Middleware, MiddlewareApi,
};
pub use store::{
    create_store, DispatchFn, Enhancer, Listener, Reducer, Store, StoreCreator, Unsubscribe,
};
