//! View lifecycle: shared event sources, cleanup ledger, view contract and
//! the host that keeps exactly one view mounted.
//!
//! | Module      | Purpose |
//! |-------------|---------|
//! | `events`    | Document listener table and timer queue (shared singletons) |
//! | `cleanup`   | `CleanupRegistry`, the only way views add handlers |
//! | `container` | The page node views render into |
//! | `view`      | `View` trait and the `ViewInstance` state machine |
//! | `host`      | `ViewHost`, unmount-old-then-mount-new navigation state |

pub mod cleanup;
pub mod container;
pub mod events;
pub mod host;
pub mod view;

pub use cleanup::CleanupRegistry;
pub use container::{Container, MemoryContainer};
pub use events::{Environment, EventTarget, EventType, ListenerId, TimerId, Timers, UiEvent};
pub use host::ViewHost;
pub use view::{MountScope, Surface, View, ViewInstance};
