//! Pass-through middleware that logs every dispatched action.

use std::rc::Rc;

use crate::compose::ComposeFn;
use crate::middleware::{Middleware, MiddlewareApi};
use crate::store::DispatchFn;

/// Logs each action through the `log` facade before handing it on.
pub fn log_middleware() -> Middleware {
    Box::new(|_api: &MiddlewareApi| {
        Box::new(|next: DispatchFn| -> DispatchFn {
            Rc::new(move |action| {
                log::debug!("Action: {:?}", action);
                next(action)
            })
        }) as ComposeFn<DispatchFn>
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::action::Action;
    use crate::middleware::apply_middleware;
    use crate::store::{create_store, Reducer};
    use serde_json::{json, Value};

    #[test]
    fn actions_pass_through_unchanged() -> anyhow::Result<()> {
        let counter: Reducer = Rc::new(|state: &Value, action: &Action| {
            let count = state.as_i64().unwrap_or(0);
            Ok(match action.type_str() {
                Some("INCREMENT") => json!(count + 1),
                _ => json!(count),
            })
        });

        let store = create_store(
            counter,
            Value::Null,
            Some(apply_middleware(vec![log_middleware()])),
        )?;

        let action = Action::of("INCREMENT");
        assert_eq!(store.dispatch(action.clone())?, action);
        assert_eq!(store.get_state(), json!(1));
        Ok(())
    }
}
