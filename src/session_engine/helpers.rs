//! Shared builder functions used by the content providers.
//!
//! Every provider assembles the same pieces: a prompt, an option list with
//! the correct answers marked, and an explanation. These helpers keep the
//! provider files focused on their own subject matter.

use std::collections::BTreeSet;

use crate::session_engine::models::*;

/// Build a choice item from options in generated order.
pub fn choice(
    id: String, prompt: impl Into<String>, options: Vec<String>,
    correct: impl IntoIterator<Item = usize>, mode: SelectionMode,
    explanation: impl Into<String>,
) -> GeneratedItem {
    GeneratedItem {
        item_id: id,
        prompt: prompt.into(),
        explanation: Some(explanation.into()),
        response: GeneratedResponse::Choice {
            options,
            correct: correct.into_iter().collect(),
            mode,
        },
    }
}

/// Single-answer choice with the correct option first (shuffling moves it).
pub fn single(
    id: String, prompt: impl Into<String>, correct: String, distractors: Vec<String>,
    explanation: impl Into<String>,
) -> GeneratedItem {
    let mut options = Vec::with_capacity(distractors.len() + 1);
    options.push(correct);
    options.extend(distractors);
    choice(id, prompt, options, [0], SelectionMode::Single, explanation)
}

pub fn numeric(
    id: String, prompt: impl Into<String>, expected: f64, tolerance: Tolerance,
    unit: impl Into<String>, explanation: impl Into<String>,
) -> GeneratedItem {
    GeneratedItem {
        item_id: id,
        prompt: prompt.into(),
        explanation: Some(explanation.into()),
        response: GeneratedResponse::Numeric {
            expected,
            tolerance,
            unit: unit.into(),
        },
    }
}

/// An already-presented choice item with options `"Option 0"..` in identity
/// order. Handy for driving the engine without a provider.
pub fn choice_item(id: &str, option_count: usize, key: &[usize], mode: SelectionMode) -> ExerciseItem {
    ExerciseItem {
        item_id: id.to_string(),
        prompt: format!("Question {id}"),
        explanation: None,
        response: Response::Choice(ChoiceResponse {
            options: (0..option_count).map(|i| format!("Option {i}")).collect(),
            presentation_order: (0..option_count).collect(),
            answer_key: key.iter().copied().collect::<BTreeSet<_>>(),
            mode,
        }),
    }
}

pub fn numeric_item(id: &str, expected: f64, tolerance: Tolerance) -> ExerciseItem {
    ExerciseItem {
        item_id: id.to_string(),
        prompt: format!("Question {id}"),
        explanation: None,
        response: Response::Numeric(NumericResponse {
            expected,
            tolerance,
            unit: String::new(),
        }),
    }
}

/// Format a number without a trailing `.0` for whole values.
pub fn trim_number(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{}", value as i64)
    } else {
        let s = format!("{value:.3}");
        s.trim_end_matches('0').trim_end_matches('.').to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trim_number_drops_needless_decimals() {
        assert_eq!(trim_number(12.0), "12");
        assert_eq!(trim_number(0.5), "0.5");
        assert_eq!(trim_number(1.23456), "1.235");
        assert_eq!(trim_number(-3.0), "-3");
    }

    #[test]
    fn single_puts_correct_answer_first() {
        let item = single("X-1".into(), "q", "yes".into(), vec!["no".into()], "because");
        match item.response {
            GeneratedResponse::Choice { options, correct, mode } => {
                assert_eq!(options, vec!["yes", "no"]);
                assert_eq!(correct.into_iter().collect::<Vec<_>>(), vec![0]);
                assert_eq!(mode, SelectionMode::Single);
            }
            other => panic!("unexpected response {other:?}"),
        }
    }
}
