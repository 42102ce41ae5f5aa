use std::fmt;
use std::rc::Rc;

use serde_json::{json, Map, Value};

use crate::error::StoreError;
use crate::middleware::MiddlewareApi;

/// Reserved initialization action type, dispatched at store construction and
/// after every reducer replacement. Application reducers must treat it like
/// any other unknown action.
pub(crate) const INIT_ACTION_TYPE: &str = "@@uniflow/INIT";

/// A callable action. It runs against the middleware capability object
/// instead of reaching the reducer, and may return a follow-up action for
/// the dispatch caller (or `None` when there is nothing to report).
pub type ThunkFn = dyn Fn(&MiddlewareApi) -> Result<Option<Action>, StoreError>;

/// A state transition request.
///
/// The base store only accepts [`Action::Value`] payloads that are JSON
/// objects carrying a non-null `"type"` field. The `"type"` value itself may
/// be any non-null JSON value, including falsy ones (`0`, `false`, `""`).
/// [`Action::Thunk`] is rejected by the base store and only becomes
/// meaningful behind thunk middleware.
#[derive(Clone)]
pub enum Action {
    /// Plain serializable action payload.
    Value(Value),
    /// Callable action, a middleware concern.
    Thunk(Rc<ThunkFn>),
}

impl Action {
    /// Builds a payload action holding only a `"type"` field.
    pub fn of(action_type: impl Into<String>) -> Action {
        Action::Value(json!({ "type": action_type.into() }))
    }

    /// Builds a callable action.
    pub fn thunk<F>(thunk: F) -> Action
    where
        F: Fn(&MiddlewareApi) -> Result<Option<Action>, StoreError> + 'static,
    {
        Action::Thunk(Rc::new(thunk))
    }

    /// The raw `"type"` value. `None` when the action is not an object, the
    /// field is absent, or the field is null; a present falsy value is kept.
    pub fn action_type(&self) -> Option<&Value> {
        match self {
            Action::Value(value) => match value.get("type") {
                Some(Value::Null) | None => None,
                Some(kind) => Some(kind),
            },
            Action::Thunk(_) => None,
        }
    }

    /// The `"type"` value as a string, for the common case.
    pub fn type_str(&self) -> Option<&str> {
        self.action_type().and_then(Value::as_str)
    }

    /// A payload field by name.
    pub fn get(&self, field: &str) -> Option<&Value> {
        match self {
            Action::Value(value) => value.get(field),
            Action::Thunk(_) => None,
        }
    }

    /// The whole payload object, when this is an object-shaped action.
    pub fn as_object(&self) -> Option<&Map<String, Value>> {
        match self {
            Action::Value(value) => value.as_object(),
            Action::Thunk(_) => None,
        }
    }
}

impl From<Value> for Action {
    fn from(value: Value) -> Action {
        Action::Value(value)
    }
}

impl fmt::Debug for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Action::Value(value) => write!(f, "{value}"),
            Action::Thunk(_) => f.write_str("<thunk>"),
        }
    }
}

impl PartialEq for Action {
    fn eq(&self, other: &Action) -> bool {
        match (self, other) {
            (Action::Value(a), Action::Value(b)) => a == b,
            (Action::Thunk(a), Action::Thunk(b)) => Rc::ptr_eq(a, b),
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn type_field_must_be_present_and_non_null() {
        assert!(Action::from(json!({ "type": "PING" })).action_type().is_some());
        assert!(Action::from(json!({})).action_type().is_none());
        assert!(Action::from(json!({ "type": null })).action_type().is_none());
        assert!(Action::from(json!("PING")).action_type().is_none());
    }

    #[test]
    fn falsy_types_are_kept() {
        assert_eq!(Action::from(json!({ "type": false })).action_type(), Some(&json!(false)));
        assert_eq!(Action::from(json!({ "type": 0 })).action_type(), Some(&json!(0)));
        assert_eq!(Action::from(json!({ "type": "" })).action_type(), Some(&json!("")));
    }

    #[test]
    fn type_str_reads_string_types_only() {
        assert_eq!(Action::of("PING").type_str(), Some("PING"));
        assert_eq!(Action::from(json!({ "type": 0 })).type_str(), None);
    }

    #[test]
    fn payload_fields_are_reachable() {
        let action = Action::from(json!({ "type": "push", "value": "a" }));
        assert_eq!(action.get("value"), Some(&json!("a")));
        assert_eq!(action.get("missing"), None);
    }

    #[test]
    fn thunks_compare_by_identity() {
        let thunk = Action::thunk(|_api| Ok(None));
        assert_eq!(thunk, thunk.clone());
        assert_ne!(thunk, Action::thunk(|_api| Ok(None)));
        assert_ne!(thunk, Action::of("PING"));
    }
}
