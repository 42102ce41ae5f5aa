//! Dispatch middleware: composable wrappers around the store's raw dispatch.
//!
//! A middleware receives a restricted view of the store and returns a
//! dispatch wrapper. [`apply_middleware`] chains the wrappers right to left
//! around the raw dispatch and installs the result as the store's outward
//! dispatch, so the first middleware listed sees every action first.

pub mod logging;
pub mod thunk;

pub use logging::log_middleware;
pub use thunk::thunk_middleware;

use std::cell::RefCell;
use std::rc::Rc;

use serde_json::Value;

use crate::action::Action;
use crate::compose::{compose, ComposeFn};
use crate::error::StoreError;
use crate::store::{DispatchFn, Enhancer, StoreCreator};

/// The capability object handed to middleware: state reads plus a dispatch
/// that re-enters the whole composed chain, never the raw dispatch alone.
#[derive(Clone)]
pub struct MiddlewareApi {
    get_state: Rc<dyn Fn() -> Value>,
    dispatch: DispatchFn,
}

impl MiddlewareApi {
    /// The current state tree.
    pub fn get_state(&self) -> Value {
        (self.get_state)()
    }

    /// Dispatches through the full middleware chain.
    pub fn dispatch(&self, action: Action) -> Result<Action, StoreError> {
        (self.dispatch)(action)
    }
}

/// Builds a dispatch wrapper from the capability object. Instantiated once
/// per store enhancement.
pub type Middleware = Box<dyn Fn(&MiddlewareApi) -> ComposeFn<DispatchFn>>;

/// Turns an ordered middleware list into a store enhancer.
///
/// The base store is built first, then each middleware is applied to the
/// capability object and the wrappers are composed around the raw dispatch.
/// The store handed back is the base store with only its dispatch replaced.
pub fn apply_middleware(middlewares: Vec<Middleware>) -> Enhancer {
    Box::new(move |create_store: StoreCreator| {
        Box::new(move |reducer, initial_state| {
            let store = create_store(reducer, initial_state)?;
            let raw = store.dispatch_fn();

            // Middleware-issued dispatches must see the final composed
            // dispatch, which does not exist yet; they read this slot at
            // call time instead.
            let slot: Rc<RefCell<DispatchFn>> = Rc::new(RefCell::new(Rc::clone(&raw)));
            let api = MiddlewareApi {
                get_state: {
                    let store = store.clone();
                    Rc::new(move || store.get_state())
                },
                dispatch: {
                    let slot = Rc::clone(&slot);
                    Rc::new(move |action| {
                        let current = slot.borrow().clone();
                        current(action)
                    })
                },
            };

            let wrappers: Vec<ComposeFn<DispatchFn>> = middlewares
                .iter()
                .map(|middleware| middleware(&api))
                .collect();
            let dispatch = compose(wrappers)(raw);
            *slot.borrow_mut() = Rc::clone(&dispatch);

            Ok(store.with_dispatch(dispatch))
        })
    })
}
