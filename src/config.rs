//! Shell configuration, loaded from JSON. Every field has a default, so `{}`
//! is a valid configuration.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::session_engine::{models::DifficultyLevel, topics::bank::QuestionBank};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    pub items_per_session: usize,
    pub difficulty: DifficultyLevel,
    /// Also shuffle the order of items, not just their options.
    pub shuffle_items: bool,
    /// Fixed seed for reproducible sessions.
    pub rng_seed: Option<u64>,
    /// Advance automatically this long after an item is graded.
    pub auto_advance_ms: Option<u64>,
    /// Relative tolerance overriding the providers' own for numeric items.
    pub numeric_tolerance: Option<f64>,
}

impl Default for SessionConfig {
    fn default() -> Self {
        SessionConfig {
            items_per_session: 10,
            difficulty: DifficultyLevel::Beginner,
            shuffle_items: true,
            rng_seed: None,
            auto_advance_ms: None,
            numeric_tolerance: None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShellConfig {
    pub session: SessionConfig,
    /// Topic slug → authored questions. Used by `/quiz/:topic` and
    /// `/flashcards/:topic`.
    pub question_banks: BTreeMap<String, QuestionBank>,
}

impl ShellConfig {
    /// Parse a configuration and validate every question bank in it.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: ShellConfig = serde_json::from_str(json)?;
        for (topic, bank) in &config.question_banks {
            bank.validate(topic)?;
        }
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ContentError;

    #[test]
    fn empty_object_gives_defaults() {
        let config = ShellConfig::from_json("{}").unwrap();
        assert_eq!(config, ShellConfig::default());
        assert_eq!(config.session.items_per_session, 10);
        assert!(config.session.shuffle_items);
    }

    #[test]
    fn partial_session_keeps_other_defaults() {
        let config = ShellConfig::from_json(
            r#"{"session":{"difficulty":"Advanced","auto_advance_ms":1500},
                "question_banks":{"net":{"title":"Net","questions":[]}}}"#,
        )
        .unwrap();
        assert_eq!(config.session.difficulty, DifficultyLevel::Advanced);
        assert_eq!(config.session.auto_advance_ms, Some(1500));
        assert_eq!(config.session.items_per_session, 10);
        assert_eq!(config.question_banks["net"].title, "Net");
    }

    #[test]
    fn invalid_bank_is_rejected_at_load() {
        let err = ShellConfig::from_json(
            r#"{"question_banks":{"bad":{"title":"Bad","questions":[
                {"prompt":"p","options":["a","b"],"correct":[5],"mode":"single"}]}}}"#,
        )
        .unwrap_err();
        assert!(matches!(err, ConfigError::Content(ContentError::InvalidBank { .. })));
    }

    #[test]
    fn malformed_json_is_a_config_error() {
        let err = ShellConfig::from_json(r#"{"session":{"items_per_session":"many"}}"#).unwrap_err();
        assert!(err.to_string().starts_with("invalid configuration"));
    }
}
