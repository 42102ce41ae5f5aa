//! Counter + todo-list walkthrough for the uniflow store.
//!
//! Builds a two-slice state tree, installs logging and thunk middleware,
//! and drives the store through plain actions, bound action creators, and
//! one conditional thunk. Set `RUST_LOG=debug` to watch every action flow
//! through the logging middleware.

use std::collections::BTreeMap;
use std::rc::Rc;

use anyhow::Result;
use serde::Serialize;
use serde_json::{json, Value};
use uniflow::{
    apply_middleware, bind_action_creators, combine_reducers, create_store, extend,
    log_middleware, thunk_middleware, Action, ActionCreator, Reducer, StoreError,
};

#[derive(Serialize)]
struct Todo {
    id: i64,
    text: String,
    done: bool,
}

fn counter() -> Reducer {
    Rc::new(|state: &Value, action: &Action| {
        let count = state.as_i64().unwrap_or(0);
        Ok(match action.type_str() {
            Some("INCREMENT") => json!(count + 1),
            Some("DECREMENT") => json!(count - 1),
            _ => json!(count),
        })
    })
}

fn todos() -> Reducer {
    Rc::new(|state: &Value, action: &Action| {
        let mut todos = state.as_array().cloned().unwrap_or_default();
        if action.type_str() == Some("ADD_TODO") {
            let defaults = Todo {
                id: todos.len() as i64 + 1,
                text: String::new(),
                done: false,
            };
            let defaults = serde_json::to_value(defaults)
                .map_err(|err| StoreError::reducer(err.to_string()))?
                .as_object()
                .cloned()
                .unwrap_or_default();

            // Payload fields override the defaults; the discriminant stays
            // out of the stored todo.
            let mut patch = action.as_object().cloned().unwrap_or_default();
            patch.remove("type");

            todos.push(Value::Object(extend([&defaults, &patch])));
        }
        Ok(Value::Array(todos))
    })
}

fn add_todo() -> ActionCreator {
    Rc::new(|text| Action::from(json!({ "type": "ADD_TODO", "text": text })))
}

/// Thunk that consults the current state before dispatching.
fn add_todo_if_missing(text: &str) -> Action {
    let text = text.to_string();
    Action::thunk(move |api| {
        let state = api.get_state();
        let present = state["todos"]
            .as_array()
            .map(|todos| {
                todos
                    .iter()
                    .any(|todo| todo["text"].as_str() == Some(text.as_str()))
            })
            .unwrap_or(false);
        if present {
            log::debug!("todo already present, skipping: {text}");
            Ok(None)
        } else {
            Ok(Some(api.dispatch(add_todo()(json!(text.clone())))?))
        }
    })
}

fn main() -> Result<()> {
    env_logger::init();
    log::info!("starting uniflow-demo");

    let reducer = combine_reducers(BTreeMap::from([
        ("counter".to_string(), counter()),
        ("todos".to_string(), todos()),
    ]));
    let store = create_store(
        reducer,
        Value::Null,
        Some(apply_middleware(vec![log_middleware(), thunk_middleware()])),
    )?;

    let _unsubscribe = store.subscribe({
        let store = store.clone();
        move || println!("state: {}", store.get_state())
    });

    store.dispatch(Action::of("INCREMENT"))?;
    store.dispatch(Action::of("INCREMENT"))?;
    store.dispatch(Action::of("DECREMENT"))?;

    let creators: BTreeMap<String, ActionCreator> =
        BTreeMap::from([("add_todo".to_string(), add_todo())]);
    let bound = bind_action_creators(creators, store.dispatch_fn());
    if let Some(add) = bound.get("add_todo") {
        add(json!("walk the dog"))?;
        add(json!("water the plants"))?;
    }

    // Already present, so the thunk dispatches nothing.
    store.dispatch(add_todo_if_missing("walk the dog"))?;
    store.dispatch(add_todo_if_missing("call the plumber"))?;

    log::info!("final state: {}", store.get_state());
    log::info!("exiting uniflow-demo");
    Ok(())
}
