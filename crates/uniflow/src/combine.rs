//! Builds one root reducer out of named slice reducers.

use std::collections::BTreeMap;
use std::rc::Rc;

use serde_json::{Map, Value};

use crate::action::{Action, INIT_ACTION_TYPE};
use crate::error::StoreError;
use crate::store::Reducer;

const PROBE_ACTION_PREFIX: &str = "@@uniflow/PROBE_UNKNOWN_ACTION_";

/// Combines a mapping of slice reducers into a reducer over an object-shaped
/// state tree, one field per slice.
///
/// Every slice reducer is probed at combination time: once with the
/// initialization action and once with a random, unguessable action type.
/// A reducer that returns null for either probe cannot supply an initial
/// state or special-cases private-namespace actions; that failure is
/// captured here and surfaced on every invocation of the combined reducer,
/// so a misconfigured slice only fails once it is actually exercised.
///
/// At dispatch time, a null return from any slice fails the whole dispatch
/// with an error naming the slice and the action's type. When no slice
/// changed, the original state value is returned as-is rather than a
/// rebuilt tree, so a no-op dispatch is detectable without diffing.
pub fn combine_reducers(reducers: BTreeMap<String, Reducer>) -> Reducer {
    let sanity_failure = assert_reducer_sanity(&reducers).err();
    if let Some(failure) = &sanity_failure {
        log::warn!("deferred reducer sanity failure: {failure}");
    }

    Rc::new(move |state: &Value, action: &Action| {
        if let Some(failure) = &sanity_failure {
            return Err(failure.clone());
        }

        let empty = Map::new();
        let previous = state.as_object().unwrap_or(&empty);

        let mut has_changed = false;
        let mut next = Map::new();
        for (key, reducer) in &reducers {
            let previous_slice = previous.get(key).cloned().unwrap_or(Value::Null);
            let next_slice = reducer(&previous_slice, action)?;
            if next_slice.is_null() {
                return Err(StoreError::NullSlice {
                    slice: key.clone(),
                    action: describe(action),
                });
            }
            has_changed = has_changed || next_slice != previous_slice;
            next.insert(key.clone(), next_slice);
        }

        if has_changed || !state.is_object() {
            Ok(Value::Object(next))
        } else {
            Ok(state.clone())
        }
    })
}

fn assert_reducer_sanity(reducers: &BTreeMap<String, Reducer>) -> Result<(), StoreError> {
    for (key, reducer) in reducers {
        let initial = reducer(&Value::Null, &Action::of(INIT_ACTION_TYPE))?;
        if initial.is_null() {
            return Err(StoreError::UninitializedSlice { slice: key.clone() });
        }

        let probe = format!("{PROBE_ACTION_PREFIX}{}", probe_token());
        let probed = reducer(&Value::Null, &Action::of(probe))?;
        if probed.is_null() {
            return Err(StoreError::PrivateActionHandled { slice: key.clone() });
        }
    }
    Ok(())
}

fn probe_token() -> String {
    (0..12).map(|_| fastrand::alphanumeric()).collect()
}

fn describe(action: &Action) -> String {
    match action.action_type() {
        // Value's Display prints JSON, so string types come out quoted.
        Some(kind) => kind.to_string(),
        None => "an action".to_string(),
    }
}
