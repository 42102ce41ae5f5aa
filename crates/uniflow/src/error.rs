use thiserror::Error;

/// Faults surfaced by store construction, dispatch, and reducer composition.
///
/// Every fault is synchronous: the caller of the failing operation receives
/// it directly, nothing is retried or swallowed. `Clone` is required because
/// a sanity failure captured while combining reducers is re-surfaced on
/// every later invocation of the combined reducer.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    /// The dispatched action was not a plain JSON object.
    #[error("actions must be plain JSON objects; use custom middleware for other action kinds")]
    InvalidAction,

    /// The dispatched action has no `"type"` field, or the field is null.
    #[error("actions must have a non-null \"type\" field; have you misspelled a constant?")]
    MissingActionType,

    /// `dispatch` was called while this store was already reducing.
    #[error("reducers may not dispatch actions")]
    DispatchInProgress,

    /// A slice reducer returned null for a real action.
    #[error("reducer \"{slice}\" returned null when handling {action}; to ignore an action, return the previous state unchanged")]
    NullSlice { slice: String, action: String },

    /// A slice reducer returned null when asked for its initial state.
    #[error("reducer \"{slice}\" returned null during initialization; when the incoming state is null a reducer must return its non-null initial state")]
    UninitializedSlice { slice: String },

    /// A slice reducer collapsed to null when probed with a random action
    /// type, which means it special-cases private-namespace actions.
    #[error("reducer \"{slice}\" returned null when probed with a random action type; do not handle private-namespace actions, and return the current state for any unknown action type")]
    PrivateActionHandled { slice: String },

    /// A failure raised by application reducer code, propagated unmodified.
    #[error("{0}")]
    Reducer(String),
}

impl StoreError {
    /// Wraps an application reducer failure.
    pub fn reducer(message: impl Into<String>) -> Self {
        StoreError::Reducer(message.into())
    }
}
