//! Pre-binds action creators to a store's dispatch.

use std::collections::BTreeMap;
use std::rc::Rc;

use serde_json::Value;

use crate::action::Action;
use crate::error::StoreError;
use crate::store::DispatchFn;

/// Builds an [`Action`] from caller-supplied arguments.
pub type ActionCreator = Rc<dyn Fn(Value) -> Action>;

/// An action creator whose output is dispatched as soon as it is built.
pub type BoundActionCreator = Box<dyn Fn(Value) -> Result<Action, StoreError>>;

/// Input shape for [`bind_action_creators`]: one creator, or a named map of
/// them.
pub enum ActionCreators {
    Creator(ActionCreator),
    Map(BTreeMap<String, ActionCreator>),
}

impl From<ActionCreator> for ActionCreators {
    fn from(creator: ActionCreator) -> Self {
        ActionCreators::Creator(creator)
    }
}

impl From<BTreeMap<String, ActionCreator>> for ActionCreators {
    fn from(creators: BTreeMap<String, ActionCreator>) -> Self {
        ActionCreators::Map(creators)
    }
}

/// Output of [`bind_action_creators`], mirroring the input shape.
pub enum BoundActionCreators {
    Creator(BoundActionCreator),
    Map(BTreeMap<String, BoundActionCreator>),
}

impl BoundActionCreators {
    /// The bound creator, for the single-creator shape.
    pub fn into_creator(self) -> Option<BoundActionCreator> {
        match self {
            BoundActionCreators::Creator(creator) => Some(creator),
            BoundActionCreators::Map(_) => None,
        }
    }

    /// A bound creator by name, for the map shape.
    pub fn get(&self, name: &str) -> Option<&BoundActionCreator> {
        match self {
            BoundActionCreators::Creator(_) => None,
            BoundActionCreators::Map(creators) => creators.get(name),
        }
    }
}

/// Replaces every creator `f` with `|args| dispatch(f(args))`, keeping the
/// input's shape, so callers can fire actions without holding the store.
pub fn bind_action_creators(
    creators: impl Into<ActionCreators>,
    dispatch: DispatchFn,
) -> BoundActionCreators {
    match creators.into() {
        ActionCreators::Creator(creator) => {
            BoundActionCreators::Creator(bind_one(creator, dispatch))
        }
        ActionCreators::Map(creators) => BoundActionCreators::Map(
            creators
                .into_iter()
                .map(|(name, creator)| (name, bind_one(creator, Rc::clone(&dispatch))))
                .collect(),
        ),
    }
}

fn bind_one(creator: ActionCreator, dispatch: DispatchFn) -> BoundActionCreator {
    Box::new(move |args| dispatch(creator(args)))
}
