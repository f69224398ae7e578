//! Content providers grouped by subject.
//!
//! The procedural families share one signature:
//!
//! ```ignore
//! pub fn generate(
//!     rng: &mut dyn RngCore,
//!     difficulty: DifficultyLevel,
//!     item_id: String,
//! ) -> GeneratedItem
//! ```
//!
//! `bank` is the exception: it replays authored questions loaded from
//! configuration. The generator dispatches to all of these via `generator.rs`.

/// Authored question banks (quizzes and flashcards).
pub mod bank;
/// Ohm's law and power (EL-).
pub mod electrical;
/// Decimal / binary / hex conversion (NS-).
pub mod numeral;
/// OSI layer placement (OS-).
pub mod osi;
