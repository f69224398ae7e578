use rand::{Rng, RngCore};
use crate::session_engine::{
    helpers::single,
    models::{DifficultyLevel, GeneratedItem},
    shuffle::fisher_yates,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Base {
    Binary,
    Hex,
}

impl std::fmt::Display for Base {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Base::Binary => write!(f, "binary"),
            Base::Hex    => write!(f, "hexadecimal"),
        }
    }
}

fn render(value: u32, base: Base) -> String {
    match base {
        Base::Binary => format!("0b{:b}", value),
        Base::Hex    => format!("0x{:X}", value),
    }
}

/// Bit width of the values used at each difficulty.
fn bits_for(difficulty: DifficultyLevel) -> u32 {
    match difficulty {
        DifficultyLevel::Beginner     => 4,
        DifficultyLevel::Intermediate => 8,
        DifficultyLevel::Advanced     => 12,
    }
}

/// Three wrong values, each one bit away from `value`.
///
/// One-bit flips are the classic conversion slip and are always distinct
/// from each other and from `value`.
fn distractors(rng: &mut dyn RngCore, value: u32, bits: u32) -> Vec<u32> {
    let mut flips: Vec<u32> = (0..bits).map(|b| value ^ (1 << b)).collect();
    fisher_yates(&mut *rng, &mut flips);
    flips.truncate(3);
    flips
}

/// Decimal ↔ binary/hex conversion. Single-select.
pub fn generate(
    rng: &mut dyn RngCore,
    difficulty: DifficultyLevel,
    item_id: String,
) -> GeneratedItem {
    let bits = bits_for(difficulty);
    let value = rng.gen_range(1..(1u32 << bits));
    let base = if rng.gen_bool(0.5) { Base::Binary } else { Base::Hex };
    // Beginners only convert out of decimal.
    let from_decimal = difficulty == DifficultyLevel::Beginner || rng.gen_bool(0.5);
    let wrong = distractors(rng, value, bits);

    let (prompt, correct, wrong_text) = if from_decimal {
        (
            format!("What is {value} in {base}?"),
            render(value, base),
            wrong.iter().map(|&v| render(v, base)).collect::<Vec<_>>(),
        )
    } else {
        (
            format!("What is {} in decimal?", render(value, base)),
            value.to_string(),
            wrong.iter().map(|v| v.to_string()).collect::<Vec<_>>(),
        )
    };

    let explanation = format!(
        "{} = {} = {} in decimal.",
        render(value, Base::Binary),
        render(value, Base::Hex),
        value
    );
    single(item_id, prompt, correct, wrong_text, explanation)
}
