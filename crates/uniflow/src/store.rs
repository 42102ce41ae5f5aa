//! The store engine: one mutable cell of application state, advanced by
//! dispatching actions through a pure reducer and observed by subscribers.
//!
//! Dispatch is synchronous and single-threaded. The only reentrancy concern
//! is logical: a reducer must never dispatch on its own store (guarded by a
//! flag), while a listener may, because by then the transition is complete.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use serde_json::Value;

use crate::action::{Action, INIT_ACTION_TYPE};
use crate::error::StoreError;

/// Pure transition function: previous state and an action to the next state.
///
/// Reducers receive a read-only view of their slice and must return a
/// non-null next state; returning `Ok(Value::Null)` is a contract violation
/// surfaced by [`combine_reducers`](crate::combine_reducers). Failures
/// returned here propagate unmodified to the dispatch caller.
pub type Reducer = Rc<dyn Fn(&Value, &Action) -> Result<Value, StoreError>>;

/// Zero-argument callback notified after every successful dispatch.
pub type Listener = Rc<dyn Fn()>;

/// Handle returned by [`Store::subscribe`]; calling it more than once is a
/// no-op.
pub type Unsubscribe = Box<dyn Fn()>;

/// Dispatch as a value, the unit the middleware pipeline composes over.
pub type DispatchFn = Rc<dyn Fn(Action) -> Result<Action, StoreError>>;

/// The store construction function, as a value an enhancer can wrap.
pub type StoreCreator = Box<dyn Fn(Reducer, Value) -> Result<Store, StoreError>>;

/// Wraps store construction itself; how middleware and other cross-cutting
/// behavior attach.
pub type Enhancer = Box<dyn FnOnce(StoreCreator) -> StoreCreator>;

#[derive(Clone)]
struct ListenerEntry {
    id: u64,
    listener: Listener,
}

struct StoreInner {
    reducer: Reducer,
    state: Value,
    // `next_listeners` is the staging list every subscribe/unsubscribe edits;
    // `current_listeners` is the snapshot the in-flight dispatch iterates.
    // They alias until an edit forces a copy, so edits during notification
    // only affect the next dispatch.
    current_listeners: Rc<Vec<ListenerEntry>>,
    next_listeners: Rc<Vec<ListenerEntry>>,
    next_listener_id: u64,
    is_dispatching: bool,
}

/// The state container. Cheap to clone; clones share the same store.
#[derive(Clone)]
pub struct Store {
    inner: Rc<RefCell<StoreInner>>,
    dispatch: DispatchFn,
}

/// Builds a store from a root reducer and an initial state (`Value::Null`
/// for "let the reducer seed it").
///
/// When an enhancer is given, construction is delegated to it entirely:
/// `enhancer(create_store)(reducer, initial_state)`. Otherwise the store is
/// initialized and a reserved, implementation-private initialization action
/// is dispatched so the reducer can establish its default state.
pub fn create_store(
    reducer: Reducer,
    initial_state: Value,
    enhancer: Option<Enhancer>,
) -> Result<Store, StoreError> {
    if let Some(enhancer) = enhancer {
        let base: StoreCreator =
            Box::new(|reducer, initial_state| create_store(reducer, initial_state, None));
        return enhancer(base)(reducer, initial_state);
    }

    let listeners: Rc<Vec<ListenerEntry>> = Rc::new(Vec::new());
    let inner = Rc::new(RefCell::new(StoreInner {
        reducer,
        state: initial_state,
        current_listeners: Rc::clone(&listeners),
        next_listeners: listeners,
        next_listener_id: 0,
        is_dispatching: false,
    }));

    let dispatch: DispatchFn = {
        let inner = Rc::clone(&inner);
        Rc::new(move |action| dispatch_raw(&inner, action))
    };

    let store = Store { inner, dispatch };
    dispatch_raw(&store.inner, Action::of(INIT_ACTION_TYPE))?;
    Ok(store)
}

impl Store {
    /// The current state tree.
    pub fn get_state(&self) -> Value {
        self.inner.borrow().state.clone()
    }

    /// Dispatches an action and returns it, so calls can be chained or
    /// inspected. This goes through the full middleware chain when the store
    /// was built with one.
    pub fn dispatch(&self, action: Action) -> Result<Action, StoreError> {
        (self.dispatch)(action)
    }

    /// The store's dispatch as a composable value.
    pub fn dispatch_fn(&self) -> DispatchFn {
        Rc::clone(&self.dispatch)
    }

    /// The same store with only its dispatch replaced; the record-level
    /// shallow merge enhancers use to install a wrapped dispatch.
    pub fn with_dispatch(&self, dispatch: DispatchFn) -> Store {
        Store {
            inner: Rc::clone(&self.inner),
            dispatch,
        }
    }

    /// Registers a listener to run after every dispatch, in subscription
    /// order. Returns an idempotent unsubscribe handle.
    ///
    /// A dispatch already notifying keeps the snapshot it started with;
    /// listeners added or removed here take effect from the next dispatch.
    pub fn subscribe<F>(&self, listener: F) -> Unsubscribe
    where
        F: Fn() + 'static,
    {
        let id = {
            let mut inner = self.inner.borrow_mut();
            let id = inner.next_listener_id;
            inner.next_listener_id += 1;
            // make_mut copies the staging list exactly when a dispatch in
            // flight still iterates the same allocation.
            Rc::make_mut(&mut inner.next_listeners).push(ListenerEntry {
                id,
                listener: Rc::new(listener),
            });
            id
        };

        let inner = Rc::clone(&self.inner);
        let subscribed = Cell::new(true);
        Box::new(move || {
            if !subscribed.replace(false) {
                return;
            }
            let mut inner = inner.borrow_mut();
            let staged = Rc::make_mut(&mut inner.next_listeners);
            if let Some(position) = staged.iter().position(|entry| entry.id == id) {
                staged.remove(position);
            }
        })
    }

    /// Swaps the active reducer and reseeds state with the reserved
    /// initialization action, leaving state the new reducer does not touch
    /// intact. The reseed goes through the raw dispatch, bypassing any
    /// middleware chain.
    pub fn replace_reducer(&self, next_reducer: Reducer) -> Result<(), StoreError> {
        self.inner.borrow_mut().reducer = next_reducer;
        log::debug!("reducer replaced; reseeding state");
        dispatch_raw(&self.inner, Action::of(INIT_ACTION_TYPE))?;
        Ok(())
    }
}

// Clears the reentrancy flag on every exit path out of the reducer call,
// including unwinds.
struct DispatchGuard<'a>(&'a RefCell<StoreInner>);

impl Drop for DispatchGuard<'_> {
    fn drop(&mut self) {
        self.0.borrow_mut().is_dispatching = false;
    }
}

fn dispatch_raw(inner: &RefCell<StoreInner>, action: Action) -> Result<Action, StoreError> {
    match &action {
        Action::Value(value) if value.is_object() => {}
        _ => return Err(StoreError::InvalidAction),
    }
    if action.action_type().is_none() {
        return Err(StoreError::MissingActionType);
    }

    let (reducer, previous) = {
        let mut cell = inner.borrow_mut();
        if cell.is_dispatching {
            return Err(StoreError::DispatchInProgress);
        }
        cell.is_dispatching = true;
        (Rc::clone(&cell.reducer), cell.state.clone())
    };

    // No borrow is held across the reducer call: it may read state through
    // the store (seeing the pre-transition value) but not dispatch.
    let next = {
        let _guard = DispatchGuard(inner);
        (reducer)(&previous, &action)
    }?;
    inner.borrow_mut().state = next;

    let snapshot = {
        let mut cell = inner.borrow_mut();
        cell.current_listeners = Rc::clone(&cell.next_listeners);
        Rc::clone(&cell.current_listeners)
    };
    for entry in snapshot.iter() {
        (entry.listener)();
    }

    Ok(action)
}
