//! # study_shell
//!
//! Navigation and session core of an offline study tool.
//!
//! The shell shows one view at a time (a menu, flashcards, a quiz, a
//! generated exercise) chosen by the URL fragment. Three pieces do the work:
//!
//! 1. A hash [`Router`] maps fragments like `#/exercise/osi?from=menu` onto
//!    handlers, extracting `:param` segments (percent-decoded) and the query.
//! 2. The view lifecycle ([`ViewInstance`], [`ViewHost`]) guarantees that
//!    every listener, timer and byte of markup a view created is gone before
//!    the next view touches the page. Views only reach the shared event
//!    sources through a [`CleanupRegistry`].
//! 3. A [`SessionEngine`] walks a finite list of shuffled exercise items:
//!    toggle options (radio or checkbox semantics per item), submit once,
//!    advance, and read the `{score, total}` summary at the end.
//!
//! ## Key features
//!
//! - **Headless**: browser globals are modelled as [`MemoryLocation`],
//!   [`EventTarget`], [`Timers`] (manual clock) and [`MemoryContainer`]; a
//!   browser host swaps in its own [`Location`] and [`Container`].
//! - **Deterministic on request**: `session.rng_seed` in [`ShellConfig`]
//!   reproduces a session exactly.
//! - **Loud programmer errors, quiet user errors**: lifecycle and handler
//!   failures propagate as [`RouterError`]; rejected session actions are
//!   [`SessionError`] values the view simply ignores.
//!
//! ## Quick start
//!
//! ```rust
//! use std::rc::Rc;
//! use study_shell::{
//!     App, Container, Environment, Location, MemoryContainer, MemoryLocation, ShellConfig, UiEvent,
//! };
//!
//! let location = MemoryLocation::with_fragment("#/exercise/numeral-systems");
//! let container = MemoryContainer::new();
//! let env = Environment::new();
//!
//! let app = App::new(
//!     ShellConfig::default(),
//!     Rc::new(location.clone()),
//!     Rc::new(container.clone()),
//!     env.clone(),
//! )
//! .unwrap();
//! app.start().unwrap();
//! assert!(container.content().contains("data-action=\"option:0\""));
//!
//! // Pick the first option and submit.
//! env.document.dispatch(&UiEvent::key("1"));
//! env.document.dispatch(&UiEvent::key("Enter"));
//! assert!(container.content().contains("data-action=\"next\""));
//!
//! // Leaving the page releases every listener the session view held.
//! location.set_fragment("/").unwrap();
//! assert_eq!(env.document.listener_count(), 0);
//! ```

pub mod app;
pub mod config;
pub mod error;
pub mod lifecycle;
pub mod navigation;
pub mod render;
pub mod session_engine;
pub mod telemetry;
pub mod views;

pub use app::App;
pub use config::{SessionConfig, ShellConfig};
pub use error::{
    ConfigError, ContentError, LifecycleError, PatternError, RouterError, SessionError, ViewError,
};
pub use lifecycle::{
    CleanupRegistry, Container, Environment, EventTarget, EventType, MemoryContainer, Timers,
    UiEvent, View, ViewHost, ViewInstance,
};
pub use navigation::{Dispatch, Location, MemoryLocation, PatternMatcher, RouteParams, Router};
pub use session_engine::{
    DifficultyLevel, ExerciseItem, ExerciseKind, SelectionMode, SessionEngine, SessionSource,
    ShuffleService, Summary,
};
pub use views::ViewKind;
