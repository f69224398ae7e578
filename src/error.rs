//! Error taxonomy shared by the router, the view lifecycle and sessions.
//!
//! Router and lifecycle errors are loud: they propagate out of whatever call
//! triggered navigation. Session errors are local rejections the presentation
//! layer is free to ignore (a stale key press after advancing, for example).

use thiserror::Error;

/// A route pattern that cannot be compiled.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PatternError {
    #[error("route pattern is empty")]
    Empty,
    #[error("placeholder `:{name}` appears more than once in `{pattern}`")]
    DuplicateParam { pattern: String, name: String },
    #[error("failed to compile `{pattern}`: {reason}")]
    Compile { pattern: String, reason: String },
}

/// The mount/unmount contract was breached.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LifecycleError {
    #[error("lifecycle violation: `{op}` called on an unmounted `{view}` view")]
    NotMounted { view: String, op: &'static str },
    #[error("lifecycle violation: `{op}` re-entered `{view}` while it was {state}")]
    Reentrant {
        view: String,
        op: &'static str,
        state: &'static str,
    },
}

/// Failure raised while a view renders or reacts to input.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ViewError {
    #[error(transparent)]
    Lifecycle(#[from] LifecycleError),
    #[error(transparent)]
    Content(#[from] ContentError),
    #[error("render failed: {0}")]
    Render(String),
}

/// Anything that escapes a route handler or the router itself.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RouterError {
    #[error(transparent)]
    Pattern(#[from] PatternError),
    #[error(transparent)]
    View(#[from] ViewError),
    #[error("handler for `{pattern}` failed: {message}")]
    Handler { pattern: String, message: String },
}

impl From<LifecycleError> for RouterError {
    fn from(err: LifecycleError) -> Self {
        RouterError::View(ViewError::Lifecycle(err))
    }
}

/// Rejected session action. The session state is untouched when one of these
/// is returned.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SessionError {
    #[error("session is already complete")]
    SessionAlreadyComplete,
    #[error("option {index} is out of range (item has {option_count} options)")]
    InvalidSelection { index: usize, option_count: usize },
    #[error("current item has already been answered")]
    AlreadyAnswered,
    #[error("current item has not been answered yet")]
    NotAnswered,
    #[error("action expects a {expected} item")]
    WrongResponseKind { expected: &'static str },
}

/// Content could not be produced for a requested exercise.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ContentError {
    #[error("unknown exercise kind `{0}`")]
    UnknownKind(String),
    #[error("no question bank for topic `{0}`")]
    UnknownTopic(String),
    #[error("question bank `{topic}` is invalid: {reason}")]
    InvalidBank { topic: String, reason: String },
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid configuration: {0}")]
    Parse(#[from] serde_json::Error),
    #[error(transparent)]
    Content(#[from] ContentError),
}
