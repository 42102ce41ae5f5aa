//! Middleware that runs callable actions instead of forwarding them.

use std::rc::Rc;

use crate::action::Action;
use crate::compose::ComposeFn;
use crate::middleware::{Middleware, MiddlewareApi};
use crate::store::DispatchFn;

/// Intercepts [`Action::Thunk`] and invokes it with the capability object,
/// so a thunk can read state and dispatch through the full chain. Plain
/// actions continue down the chain untouched.
///
/// Dispatching a thunk returns the action the thunk produced, or the thunk
/// action itself when it produced none.
pub fn thunk_middleware() -> Middleware {
    Box::new(|api: &MiddlewareApi| {
        let api = api.clone();
        Box::new(move |next: DispatchFn| -> DispatchFn {
            let api = api.clone();
            Rc::new(move |action| match action {
                Action::Thunk(thunk) => {
                    let produced = thunk(&api)?;
                    Ok(produced.unwrap_or(Action::Thunk(thunk)))
                }
                plain => next(plain),
            })
        }) as ComposeFn<DispatchFn>
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::middleware::apply_middleware;
    use crate::store::{create_store, Reducer};
    use serde_json::{json, Value};

    fn todos() -> Reducer {
        Rc::new(|state: &Value, action: &Action| {
            let mut todos = state.as_array().cloned().unwrap_or_default();
            if action.type_str() == Some("ADD_TODO") {
                todos.push(action.get("text").cloned().unwrap_or(Value::Null));
            }
            Ok(Value::Array(todos))
        })
    }

    fn add_todo(text: &str) -> Action {
        Action::from(json!({ "type": "ADD_TODO", "text": text }))
    }

    fn add_todo_if_empty(text: String) -> Action {
        Action::thunk(move |api| {
            let empty = api
                .get_state()
                .as_array()
                .map(Vec::is_empty)
                .unwrap_or(true);
            if empty {
                Ok(Some(api.dispatch(add_todo(&text))?))
            } else {
                Ok(None)
            }
        })
    }

    #[test]
    fn thunks_read_state_and_dispatch() -> anyhow::Result<()> {
        let store = create_store(
            todos(),
            Value::Null,
            Some(apply_middleware(vec![thunk_middleware()])),
        )?;

        store.dispatch(add_todo_if_empty("Hello".to_string()))?;
        assert_eq!(store.get_state(), json!(["Hello"]));

        // The list is no longer empty, so the second thunk is a no-op.
        store.dispatch(add_todo_if_empty("Again".to_string()))?;
        assert_eq!(store.get_state(), json!(["Hello"]));

        store.dispatch(add_todo("World"))?;
        assert_eq!(store.get_state(), json!(["Hello", "World"]));
        Ok(())
    }

    #[test]
    fn a_thunk_producing_nothing_returns_itself() -> anyhow::Result<()> {
        let store = create_store(
            todos(),
            Value::Null,
            Some(apply_middleware(vec![thunk_middleware()])),
        )?;

        let idle = Action::thunk(|_api| Ok(None));
        assert_eq!(store.dispatch(idle.clone())?, idle);
        Ok(())
    }

    #[test]
    fn plain_actions_are_forwarded() -> anyhow::Result<()> {
        let store = create_store(
            todos(),
            Value::Null,
            Some(apply_middleware(vec![thunk_middleware()])),
        )?;

        let action = add_todo("Hello");
        assert_eq!(store.dispatch(action.clone())?, action);
        assert_eq!(store.get_state(), json!(["Hello"]));
        Ok(())
    }

    #[test]
    fn thunks_without_the_middleware_are_rejected() -> anyhow::Result<()> {
        use crate::error::StoreError;

        let store = create_store(todos(), Value::Null, None)?;
        assert_eq!(
            store.dispatch(Action::thunk(|_api| Ok(None))),
            Err(StoreError::InvalidAction)
        );
        Ok(())
    }
}
