//! Authored question banks.
//!
//! A bank is plain JSON:
//!
//! ```json
//! {
//!   "title": "Networking basics",
//!   "questions": [
//!     { "prompt": "Default HTTPS port?", "options": ["443", "80"],
//!       "correct": [0], "mode": "single", "explanation": "TLS on 443." }
//!   ]
//! }
//! ```
//!
//! `correct` indexes `options` as written. Shuffling happens at presentation.

use rand::RngCore;
use serde::{Deserialize, Serialize};

use crate::error::ContentError;
use crate::session_engine::{
    generator::ContentProvider,
    helpers::choice,
    models::{DifficultyLevel, GeneratedItem, GeneratedResponse, SelectionMode},
    shuffle::fisher_yates,
};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BankQuestion {
    pub prompt: String,
    pub options: Vec<String>,
    pub correct: Vec<usize>,
    pub mode: SelectionMode,
    #[serde(default)]
    pub explanation: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuestionBank {
    pub title: String,
    #[serde(default)]
    pub questions: Vec<BankQuestion>,
}

impl QuestionBank {
    /// Parse and validate a bank. `topic` only labels errors.
    pub fn from_json(topic: &str, json: &str) -> Result<Self, ContentError> {
        let bank: QuestionBank = serde_json::from_str(json).map_err(|e| ContentError::InvalidBank {
            topic: topic.to_string(),
            reason: e.to_string(),
        })?;
        bank.validate(topic)?;
        Ok(bank)
    }

    /// Check every question can be presented and graded.
    pub fn validate(&self, topic: &str) -> Result<(), ContentError> {
        let invalid = |n: usize, reason: &str| ContentError::InvalidBank {
            topic: topic.to_string(),
            reason: format!("question {n}: {reason}"),
        };
        for (n, q) in self.questions.iter().enumerate() {
            if q.options.len() < 2 {
                return Err(invalid(n, "needs at least two options"));
            }
            if q.correct.is_empty() {
                return Err(invalid(n, "no correct option"));
            }
            if let Some(&bad) = q.correct.iter().find(|&&i| i >= q.options.len()) {
                return Err(invalid(n, &format!("correct index {bad} out of range")));
            }
            if q.mode == SelectionMode::Single && q.correct.len() != 1 {
                return Err(invalid(n, "single-select needs exactly one correct option"));
            }
        }
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.questions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    /// Front/back pairs for flashcard study: the prompt, then the correct
    /// options joined.
    pub fn cards(&self) -> Vec<(String, String)> {
        self.questions
            .iter()
            .map(|q| {
                let back = q
                    .correct
                    .iter()
                    .filter_map(|&i| q.options.get(i))
                    .cloned()
                    .collect::<Vec<_>>()
                    .join(", ");
                (q.prompt.clone(), back)
            })
            .collect()
    }
}

/// Draws questions from a bank without repeats until the bank is exhausted,
/// then starts a fresh pass in a new order.
#[derive(Debug, Clone)]
pub struct BankProvider {
    topic: String,
    bank: QuestionBank,
    order: Vec<usize>,
    cursor: usize,
}

impl BankProvider {
    pub fn new(topic: String, bank: QuestionBank) -> Self {
        BankProvider { topic, bank, order: Vec::new(), cursor: 0 }
    }

    pub fn topic(&self) -> &str {
        &self.topic
    }
}

impl ContentProvider for BankProvider {
    fn title(&self) -> String {
        self.bank.title.clone()
    }

    fn id_prefix(&self) -> &'static str {
        "QZ"
    }

    fn capacity(&self) -> Option<usize> {
        Some(self.bank.len())
    }

    fn generate_item(
        &mut self,
        rng: &mut dyn RngCore,
        _difficulty: DifficultyLevel,
        item_id: String,
    ) -> GeneratedItem {
        if self.cursor >= self.order.len() {
            self.order = (0..self.bank.len()).collect();
            fisher_yates(&mut *rng, &mut self.order);
            self.cursor = 0;
        }
        // Only reachable for an empty bank, whose capacity is 0.
        let Some(q) = self.order.get(self.cursor).and_then(|&i| self.bank.questions.get(i)) else {
            return GeneratedItem {
                item_id,
                prompt: format!("{} has no questions", self.bank.title),
                explanation: None,
                response: GeneratedResponse::Choice {
                    options: Vec::new(),
                    correct: Default::default(),
                    mode: SelectionMode::Single,
                },
            };
        };
        self.cursor += 1;

        let mut item = choice(
            item_id,
            q.prompt.clone(),
            q.options.clone(),
            q.correct.iter().copied(),
            q.mode,
            String::new(),
        );
        item.explanation = q.explanation.clone();
        item
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{rngs::StdRng, SeedableRng};
    use std::collections::BTreeSet;

    const NET: &str = r#"{
        "title": "Networking",
        "questions": [
            {"prompt": "HTTPS port?", "options": ["443", "80", "22"], "correct": [0], "mode": "single"},
            {"prompt": "Transport protocols?", "options": ["TCP", "IP", "UDP"], "correct": [0, 2], "mode": "multiple",
             "explanation": "IP is network layer."},
            {"prompt": "SSH port?", "options": ["21", "22"], "correct": [1], "mode": "single"}
        ]
    }"#;

    fn invalid_reason(json: &str) -> String {
        match QuestionBank::from_json("t", json) {
            Err(ContentError::InvalidBank { reason, .. }) => reason,
            other => panic!("expected InvalidBank, got {other:?}"),
        }
    }

    #[test]
    fn parses_a_bank() {
        let bank = QuestionBank::from_json("net", NET).unwrap();
        assert_eq!(bank.len(), 3);
        assert_eq!(bank.questions[1].mode, SelectionMode::Multiple);
        assert_eq!(bank.questions[1].explanation.as_deref(), Some("IP is network layer."));
        assert_eq!(bank.cards()[1], ("Transport protocols?".to_string(), "TCP, UDP".to_string()));
    }

    #[test]
    fn rejects_malformed_questions() {
        assert!(invalid_reason(r#"{"title":"t","questions":[
            {"prompt":"p","options":["a"],"correct":[0],"mode":"single"}]}"#)
            .contains("two options"));
        assert!(invalid_reason(r#"{"title":"t","questions":[
            {"prompt":"p","options":["a","b"],"correct":[],"mode":"multiple"}]}"#)
            .contains("no correct"));
        assert!(invalid_reason(r#"{"title":"t","questions":[
            {"prompt":"p","options":["a","b"],"correct":[2],"mode":"single"}]}"#)
            .contains("out of range"));
        assert!(invalid_reason(r#"{"title":"t","questions":[
            {"prompt":"p","options":["a","b"],"correct":[0,1],"mode":"single"}]}"#)
            .contains("exactly one"));
        // Missing mode is a parse error, not a silent default.
        assert!(QuestionBank::from_json("t", r#"{"title":"t","questions":[
            {"prompt":"p","options":["a","b"],"correct":[0]}]}"#).is_err());
    }

    #[test]
    fn one_pass_visits_every_question_once() {
        let bank = QuestionBank::from_json("net", NET).unwrap();
        let mut provider = BankProvider::new("net".into(), bank);
        let mut rng = StdRng::seed_from_u64(2);
        let prompts: BTreeSet<String> = (0..3)
            .map(|i| provider.generate_item(&mut rng, DifficultyLevel::Beginner, format!("QZ-{i}")).prompt)
            .collect();
        assert_eq!(prompts.len(), 3);
        assert_eq!(provider.capacity(), Some(3));

        // Exhausted: a fresh pass begins.
        let again = provider.generate_item(&mut rng, DifficultyLevel::Beginner, "QZ-3".into());
        assert!(prompts.contains(&again.prompt));
    }
}
