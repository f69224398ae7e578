//! Correctness checks for submitted answers.
//!
//! Choice items compare the selection and the answer key as sets. Numeric
//! items compare a scalar within a tolerance.

use std::collections::BTreeSet;

use crate::error::SessionError;
use crate::session_engine::models::{Response, Submission, Tolerance};

/// Equal sets are correct. Subsets, supersets and partial overlaps are not.
pub fn grade_selection(selection: &BTreeSet<usize>, answer_key: &BTreeSet<usize>) -> bool {
    selection == answer_key
}

/// Order-independent variant for callers holding a list of indices.
pub fn grade_indices(selection: &[usize], answer_key: &BTreeSet<usize>) -> bool {
    let selection: BTreeSet<usize> = selection.iter().copied().collect();
    grade_selection(&selection, answer_key)
}

/// Non-finite values are never correct.
pub fn grade_scalar(value: f64, expected: f64, tolerance: Tolerance) -> bool {
    if !value.is_finite() {
        return false;
    }
    let diff = (value - expected).abs();
    match tolerance {
        Tolerance::Absolute(eps)   => diff <= eps,
        Tolerance::Relative(ratio) => diff <= ratio * expected.abs(),
    }
}

/// Grade `submission` against `response`.
pub fn grade(response: &Response, submission: &Submission) -> Result<bool, SessionError> {
    match (response, submission) {
        (Response::Choice(choice), Submission::Selection(selection)) => {
            Ok(grade_selection(selection, &choice.answer_key))
        }
        (Response::Numeric(numeric), Submission::Value(value)) => {
            Ok(grade_scalar(*value, numeric.expected, numeric.tolerance))
        }
        (Response::Choice(_), Submission::Value(_)) => {
            Err(SessionError::WrongResponseKind { expected: "numeric" })
        }
        (Response::Numeric(_), Submission::Selection(_)) => {
            Err(SessionError::WrongResponseKind { expected: "choice" })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn set(items: &[usize]) -> BTreeSet<usize> {
        items.iter().copied().collect()
    }

    #[test]
    fn set_equality_ignores_order() {
        let key = set(&[0, 2]);
        assert!(grade_indices(&[2, 0], &key));
        assert!(!grade_indices(&[0], &key));
        assert!(!grade_indices(&[0, 1, 2], &key));
        assert!(!grade_indices(&[1], &key));
        assert!(!grade_indices(&[], &key));
    }

    #[test]
    fn scalar_tolerance() {
        assert!(grade_scalar(12.1, 12.0, Tolerance::Absolute(0.1 + 1e-9)));
        assert!(!grade_scalar(12.2, 12.0, Tolerance::Absolute(0.1)));
        assert!(grade_scalar(101.0, 100.0, Tolerance::Relative(0.01)));
        assert!(!grade_scalar(102.0, 100.0, Tolerance::Relative(0.01)));
        assert!(grade_scalar(0.0, 0.0, Tolerance::Relative(0.01)));
        assert!(!grade_scalar(f64::NAN, 0.0, Tolerance::Absolute(1.0)));
        assert!(!grade_scalar(f64::INFINITY, 1.0, Tolerance::Relative(10.0)));
    }

    proptest! {
        #[test]
        fn grading_is_set_equality_in_any_order(
            mut picks in proptest::collection::vec(0usize..6, 0..6),
            key in proptest::collection::btree_set(0usize..6, 0..4),
        ) {
            let expected = set(&picks) == key;
            prop_assert_eq!(grade_indices(&picks, &key), expected);
            picks.reverse();
            prop_assert_eq!(grade_indices(&picks, &key), expected);
        }

        #[test]
        fn any_permutation_of_the_key_is_correct(
            key in proptest::collection::btree_set(0usize..6, 1..6),
            extra in 0usize..6,
        ) {
            let mut picks: Vec<usize> = key.iter().rev().copied().collect();
            // Repeating a correct pick changes nothing.
            picks.push(*key.iter().next().unwrap());
            prop_assert!(grade_indices(&picks, &key));
            picks.push(extra);
            prop_assert_eq!(grade_indices(&picks, &key), key.contains(&extra));
        }
    }
}
