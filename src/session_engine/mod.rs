//! Interactive exercise sessions: item generation, option shuffling,
//! grading and the per-session state machine.
//!
//! ## Module overview
//!
//! | Module      | Purpose |
//! |-------------|---------|
//! | `models`    | Generated and presented items, phases, outcomes, summaries |
//! | `shuffle`   | Fisher-Yates shuffling and answer-key remapping |
//! | `grader`    | Set-equality and scalar-tolerance grading |
//! | `helpers`   | Shared builder functions for providers and tests |
//! | `generator` | `ContentProvider` trait, provider dispatch, `build_session()` |
//! | `topics`    | Reference providers (numeral, OSI, electrical, question banks) |
//! | `engine`    | `SessionEngine`, one pass over a finite item sequence |

pub mod engine;
pub mod generator;
pub mod grader;
pub mod helpers;
pub mod models;
pub mod shuffle;
pub mod topics;

pub use engine::SessionEngine;
pub use generator::{build_session, provider_for, ContentProvider, ExerciseKind, SessionSource};
pub use models::{
    DifficultyLevel, ExerciseItem, Outcome, Phase, Progress, Response, SelectionMode,
    Submission, Summary, Toggle, Tolerance,
};
pub use shuffle::{ShuffleService, ShuffledOptions};
pub use topics::bank::{BankProvider, QuestionBank};
