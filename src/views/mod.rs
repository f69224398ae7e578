//! The concrete views the shell routes to.
//!
//! | Module       | Purpose |
//! |--------------|---------|
//! | `home`       | Menu of exercises, quizzes and flashcard decks |
//! | `flashcards` | Flip-through study of a question bank |
//! | `session`    | Interactive exercise or quiz session |
//! | `not_found`  | Fallback for unknown paths, kinds and topics |

use std::fmt;

use crate::session_engine::generator::SessionSource;

pub mod flashcards;
pub mod home;
pub mod not_found;
pub mod session;

pub use flashcards::FlashcardView;
pub use home::HomeView;
pub use not_found::NotFoundView;
pub use session::SessionView;

/// Which view is on screen, with the parameters that select its content.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ViewKind {
    Home,
    Flashcards { topic: String },
    Session { source: SessionSource },
    NotFound { path: String },
}

impl fmt::Display for ViewKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ViewKind::Home                 => write!(f, "home"),
            ViewKind::Flashcards { topic } => write!(f, "flashcards:{}", topic),
            ViewKind::Session { source }   => write!(f, "session:{}", source),
            ViewKind::NotFound { path }    => write!(f, "not-found:{}", path),
        }
    }
}
