use std::collections::BTreeSet;
use std::fmt;
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Generation inputs
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum DifficultyLevel {
    #[default]
    Beginner,
    Intermediate,
    Advanced,
}

impl fmt::Display for DifficultyLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DifficultyLevel::Beginner     => write!(f, "Beginner"),
            DifficultyLevel::Intermediate => write!(f, "Intermediate"),
            DifficultyLevel::Advanced     => write!(f, "Advanced"),
        }
    }
}

/// Radio (`Single`) or checkbox (`Multiple`) interaction for one item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SelectionMode {
    Single,
    Multiple,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tolerance {
    /// `|value - expected| <= eps`
    Absolute(f64),
    /// `|value - expected| <= ratio * |expected|`
    Relative(f64),
}

// ---------------------------------------------------------------------------
// Provider output (pre-shuffle)
// ---------------------------------------------------------------------------

/// An item as a content provider emits it. Indices in `correct` refer to the
/// order of `options` as generated.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneratedItem {
    pub item_id: String,
    pub prompt: String,
    pub explanation: Option<String>,
    pub response: GeneratedResponse,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum GeneratedResponse {
    Choice {
        options: Vec<String>,
        correct: BTreeSet<usize>,
        mode: SelectionMode,
    },
    Numeric {
        expected: f64,
        tolerance: Tolerance,
        unit: String,
    },
}

// ---------------------------------------------------------------------------
// Presented items (post-shuffle)
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExerciseItem {
    pub item_id: String,
    pub prompt: String,
    pub explanation: Option<String>,
    pub response: Response,
}

impl ExerciseItem {
    pub fn selection_mode(&self) -> Option<SelectionMode> {
        match &self.response {
            Response::Choice(choice) => Some(choice.mode),
            Response::Numeric(_) => None,
        }
    }

    pub fn option_count(&self) -> usize {
        match &self.response {
            Response::Choice(choice) => choice.options.len(),
            Response::Numeric(_) => 0,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Response {
    Choice(ChoiceResponse),
    Numeric(NumericResponse),
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChoiceResponse {
    /// Options in display order.
    pub options: Vec<String>,
    /// `presentation_order[display] == generated index`.
    pub presentation_order: Vec<usize>,
    /// Correct display indices.
    pub answer_key: BTreeSet<usize>,
    pub mode: SelectionMode,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NumericResponse {
    pub expected: f64,
    pub tolerance: Tolerance,
    pub unit: String,
}

// ---------------------------------------------------------------------------
// Session state
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Phase {
    Presenting,
    Answered,
    Complete,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Phase::Presenting => write!(f, "presenting"),
            Phase::Answered   => write!(f, "answered"),
            Phase::Complete   => write!(f, "complete"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Submission {
    Selection(BTreeSet<usize>),
    Value(f64),
}

/// Result of grading one item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Outcome {
    pub item_id: String,
    pub correct: bool,
    pub submitted: Submission,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Summary {
    pub score: u32,
    pub total: u32,
}

impl Summary {
    /// Whole-number percentage; 0 for an empty session.
    pub fn percent(&self) -> u32 {
        if self.total == 0 {
            0
        } else {
            self.score * 100 / self.total
        }
    }
}

impl fmt::Display for Summary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.score, self.total)
    }
}

/// What a toggle did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Toggle {
    Changed,
    /// The item is answered; the selection is frozen.
    Locked,
}

/// What an advance did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Progress {
    Next(usize),
    Complete(Summary),
}
