//! One pass over a finite sequence of exercise items.
//!
//! Per item: `Presenting` (toggle freely) → `submit` → `Answered` (locked) →
//! `advance` → next item's `Presenting`, or `Complete` after the last one.
//! Rejected actions return a [`SessionError`] and leave the state untouched.

use std::collections::BTreeSet;

use tracing::debug;

use crate::error::SessionError;
use crate::session_engine::grader;
use crate::session_engine::models::{
    ExerciseItem, Outcome, Phase, Progress, Response, SelectionMode, Submission, Summary, Toggle,
};

#[derive(Debug, Clone)]
pub struct SessionEngine {
    items: Vec<ExerciseItem>,
    current_index: usize,
    score: u32,
    phase: Phase,
    selection: BTreeSet<usize>,
    outcomes: Vec<Outcome>,
}

impl SessionEngine {
    pub fn new(items: Vec<ExerciseItem>) -> Self {
        // No items means nothing to present: start complete with 0/0.
        let phase = if items.is_empty() {
            debug!("empty session, starting complete");
            Phase::Complete
        } else {
            Phase::Presenting
        };
        SessionEngine {
            items,
            current_index: 0,
            score: 0,
            phase,
            selection: BTreeSet::new(),
            outcomes: Vec::new(),
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn is_complete(&self) -> bool {
        self.phase == Phase::Complete
    }

    pub fn current_index(&self) -> usize {
        self.current_index
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn total(&self) -> usize {
        self.items.len()
    }

    pub fn items(&self) -> &[ExerciseItem] {
        &self.items
    }

    pub fn selection(&self) -> &BTreeSet<usize> {
        &self.selection
    }

    pub fn outcomes(&self) -> &[Outcome] {
        &self.outcomes
    }

    /// Outcome of the item currently shown, once it is answered.
    pub fn current_outcome(&self) -> Option<&Outcome> {
        match self.phase {
            Phase::Answered => self.outcomes.last(),
            _ => None,
        }
    }

    pub fn current_item(&self) -> Option<&ExerciseItem> {
        match self.phase {
            Phase::Complete => None,
            _ => self.items.get(self.current_index),
        }
    }

    /// Interaction discipline of the current item; `None` for numeric items
    /// and once complete.
    pub fn selection_mode(&self) -> Option<SelectionMode> {
        self.current_item().and_then(ExerciseItem::selection_mode)
    }

    pub fn summary(&self) -> Summary {
        Summary {
            score: self.score,
            total: self.items.len() as u32,
        }
    }

    fn active_item(&self) -> Result<&ExerciseItem, SessionError> {
        self.current_item().ok_or(SessionError::SessionAlreadyComplete)
    }

    fn reject(&self, err: SessionError) -> SessionError {
        debug!(index = self.current_index, phase = %self.phase, error = %err, "session action rejected");
        err
    }

    /// Toggle option `index` of the current choice item.
    ///
    /// Single-select items replace the selection; multi-select items flip
    /// membership. After submission this is a no-op reporting `Locked`.
    /// A numeric item has no options, so every index is out of range.
    pub fn toggle(&mut self, index: usize) -> Result<Toggle, SessionError> {
        let item = self.active_item().map_err(|e| self.reject(e))?;
        if self.phase == Phase::Answered {
            return Ok(Toggle::Locked);
        }
        let choice = match &item.response {
            Response::Choice(choice) => choice,
            Response::Numeric(_) => {
                return Err(self.reject(SessionError::InvalidSelection { index, option_count: 0 }))
            }
        };
        let (mode, option_count) = (choice.mode, choice.options.len());
        if index >= option_count {
            return Err(self.reject(SessionError::InvalidSelection { index, option_count }));
        }

        match mode {
            SelectionMode::Single => {
                self.selection.clear();
                self.selection.insert(index);
            }
            SelectionMode::Multiple => {
                if !self.selection.remove(&index) {
                    self.selection.insert(index);
                }
            }
        }
        Ok(Toggle::Changed)
    }

    /// Grade the current selection. Returns whether it was correct.
    pub fn submit(&mut self) -> Result<bool, SessionError> {
        self.grade_current(Submission::Selection(self.selection.clone()))
    }

    /// Grade a typed value for the current numeric item.
    pub fn submit_value(&mut self, value: f64) -> Result<bool, SessionError> {
        self.grade_current(Submission::Value(value))
    }

    fn grade_current(&mut self, submission: Submission) -> Result<bool, SessionError> {
        let item = self.active_item().map_err(|e| self.reject(e))?;
        if self.phase == Phase::Answered {
            return Err(self.reject(SessionError::AlreadyAnswered));
        }
        let correct = grader::grade(&item.response, &submission).map_err(|e| self.reject(e))?;
        let item_id = item.item_id.clone();

        if correct {
            self.score += 1;
        }
        self.outcomes.push(Outcome {
            item_id,
            correct,
            submitted: submission,
        });
        self.phase = Phase::Answered;
        debug!(index = self.current_index, correct, score = self.score, "item graded");
        Ok(correct)
    }

    /// Move past an answered item.
    pub fn advance(&mut self) -> Result<Progress, SessionError> {
        match self.phase {
            Phase::Complete => return Err(self.reject(SessionError::SessionAlreadyComplete)),
            Phase::Presenting => return Err(self.reject(SessionError::NotAnswered)),
            Phase::Answered => {}
        }
        self.current_index += 1;
        self.selection.clear();

        if self.current_index == self.items.len() {
            self.phase = Phase::Complete;
            let summary = self.summary();
            debug!(%summary, "session complete");
            Ok(Progress::Complete(summary))
        } else {
            self.phase = Phase::Presenting;
            Ok(Progress::Next(self.current_index))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session_engine::helpers::{choice_item, numeric_item};
    use crate::session_engine::models::Tolerance;

    fn engine_with(items: Vec<ExerciseItem>) -> SessionEngine {
        SessionEngine::new(items)
    }

    #[test]
    fn empty_session_is_complete_immediately() {
        let mut engine = engine_with(vec![]);
        assert_eq!(engine.phase(), Phase::Complete);
        assert_eq!(engine.summary(), Summary { score: 0, total: 0 });
        assert_eq!(engine.toggle(0), Err(SessionError::SessionAlreadyComplete));
        assert_eq!(engine.submit(), Err(SessionError::SessionAlreadyComplete));
        assert_eq!(engine.advance(), Err(SessionError::SessionAlreadyComplete));
    }

    #[test]
    fn single_select_replaces_selection() {
        let mut engine = engine_with(vec![choice_item("q", 4, &[2], SelectionMode::Single)]);
        engine.toggle(1).unwrap();
        engine.toggle(2).unwrap();
        assert_eq!(engine.selection(), &[2].into_iter().collect::<BTreeSet<_>>());
        assert_eq!(engine.selection_mode(), Some(SelectionMode::Single));
    }

    #[test]
    fn multi_select_accumulates_and_removes() {
        let mut engine = engine_with(vec![choice_item("q", 4, &[0, 2], SelectionMode::Multiple)]);
        for i in [0, 1, 2, 1] {
            engine.toggle(i).unwrap();
        }
        assert_eq!(engine.selection(), &[0, 2].into_iter().collect::<BTreeSet<_>>());
        assert_eq!(engine.submit(), Ok(true));
        assert_eq!(engine.score(), 1);
    }

    #[test]
    fn superset_is_incorrect() {
        let mut engine = engine_with(vec![choice_item("q", 3, &[0, 2], SelectionMode::Multiple)]);
        for i in [0, 1, 2] {
            engine.toggle(i).unwrap();
        }
        assert_eq!(engine.submit(), Ok(false));
        assert_eq!(engine.score(), 0);
    }

    #[test]
    fn out_of_range_toggle_is_rejected_without_change() {
        let mut engine = engine_with(vec![choice_item("q", 3, &[0], SelectionMode::Single)]);
        engine.toggle(1).unwrap();
        assert_eq!(
            engine.toggle(3),
            Err(SessionError::InvalidSelection { index: 3, option_count: 3 })
        );
        assert_eq!(engine.selection().len(), 1);
        assert_eq!(engine.phase(), Phase::Presenting);
    }

    #[test]
    fn answered_item_is_locked() {
        let mut engine = engine_with(vec![
            choice_item("a", 3, &[0], SelectionMode::Single),
            choice_item("b", 3, &[0], SelectionMode::Single),
        ]);
        engine.toggle(0).unwrap();
        assert_eq!(engine.submit(), Ok(true));
        assert_eq!(engine.toggle(1), Ok(Toggle::Locked));
        assert_eq!(engine.selection(), &[0].into_iter().collect::<BTreeSet<_>>());
        assert_eq!(engine.submit(), Err(SessionError::AlreadyAnswered));
        assert_eq!(engine.score(), 1);
        assert_eq!(engine.current_outcome().map(|o| o.correct), Some(true));

        assert_eq!(engine.advance(), Ok(Progress::Next(1)));
        assert!(engine.selection().is_empty());
        assert_eq!(engine.advance(), Err(SessionError::NotAnswered));
    }

    #[test]
    fn numeric_items_use_tolerance() {
        let mut engine = engine_with(vec![numeric_item("v", 12.0, Tolerance::Relative(0.01))]);
        assert_eq!(engine.selection_mode(), None);
        assert_eq!(
            engine.toggle(0),
            Err(SessionError::InvalidSelection { index: 0, option_count: 0 })
        );
        assert_eq!(
            engine.submit(),
            Err(SessionError::WrongResponseKind { expected: "choice" })
        );
        assert_eq!(engine.phase(), Phase::Presenting);
        assert_eq!(engine.submit_value(12.05), Ok(true));
        assert_eq!(engine.advance(), Ok(Progress::Complete(Summary { score: 1, total: 1 })));
    }

    #[test]
    fn completion_freezes_the_score() {
        let mut engine = engine_with(vec![choice_item("a", 2, &[1], SelectionMode::Single)]);
        engine.toggle(1).unwrap();
        engine.submit().unwrap();
        engine.advance().unwrap();
        assert!(engine.is_complete());
        assert_eq!(engine.toggle(0), Err(SessionError::SessionAlreadyComplete));
        assert_eq!(engine.submit_value(1.0), Err(SessionError::SessionAlreadyComplete));
        assert_eq!(engine.summary(), Summary { score: 1, total: 1 });
        assert_eq!(engine.current_index(), engine.total());
    }
}
