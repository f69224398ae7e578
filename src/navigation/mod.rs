//! URL-fragment navigation.
//!
//! | Module     | Purpose |
//! |------------|---------|
//! | `pattern`  | Compile `/literal/:param` patterns into anchored matchers |
//! | `location` | Fragment storage and change notification |
//! | `router`   | Ordered route table, dispatch, not-found fallback |

pub mod location;
pub mod pattern;
pub mod router;

pub use location::{ChangeListener, Location, MemoryLocation, SubscriptionId};
pub use pattern::{PatternMatcher, RouteParams};
pub use router::{split_location, Dispatch, RouteHandler, Router};
