use rand::{Rng, RngCore};
use crate::session_engine::{
    helpers::{numeric, trim_number},
    models::{DifficultyLevel, GeneratedItem, Tolerance},
};

const TOLERANCE: Tolerance = Tolerance::Relative(0.01);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Unknown {
    Voltage,
    Current,
    Resistance,
    Power,
}

fn pick_unknown(rng: &mut dyn RngCore, difficulty: DifficultyLevel) -> Unknown {
    match difficulty {
        DifficultyLevel::Beginner => Unknown::Voltage,
        DifficultyLevel::Intermediate => {
            if rng.gen_bool(0.5) { Unknown::Current } else { Unknown::Resistance }
        }
        DifficultyLevel::Advanced => Unknown::Power,
    }
}

/// Ohm's law (and P = V·I) with a typed numeric answer.
pub fn generate(
    rng: &mut dyn RngCore,
    difficulty: DifficultyLevel,
    item_id: String,
) -> GeneratedItem {
    // Whole-number inputs keep the arithmetic doable in your head.
    let current = f64::from(rng.gen_range(1..=10u32));
    let resistance = f64::from(rng.gen_range(2..=50u32));
    let voltage = current * resistance;

    let (prompt, expected, unit, explanation) = match pick_unknown(rng, difficulty) {
        Unknown::Voltage => (
            format!(
                "A current of {} A flows through a {} Ω resistor. What is the voltage across it?",
                trim_number(current), trim_number(resistance)
            ),
            voltage,
            "V",
            format!("V = I × R = {} × {} = {} V", trim_number(current), trim_number(resistance), trim_number(voltage)),
        ),
        Unknown::Current => (
            format!(
                "{} V is applied across a {} Ω resistor. What current flows?",
                trim_number(voltage), trim_number(resistance)
            ),
            current,
            "A",
            format!("I = V / R = {} / {} = {} A", trim_number(voltage), trim_number(resistance), trim_number(current)),
        ),
        Unknown::Resistance => (
            format!(
                "{} V drives {} A through a resistor. What is its resistance?",
                trim_number(voltage), trim_number(current)
            ),
            resistance,
            "Ω",
            format!("R = V / I = {} / {} = {} Ω", trim_number(voltage), trim_number(current), trim_number(resistance)),
        ),
        Unknown::Power => {
            let power = voltage * current;
            (
                format!(
                    "A {} Ω resistor carries {} A. How much power does it dissipate?",
                    trim_number(resistance), trim_number(current)
                ),
                power,
                "W",
                format!(
                    "V = I × R = {} V, then P = V × I = {} W",
                    trim_number(voltage), trim_number(power)
                ),
            )
        }
    };

    numeric(item_id, prompt, expected, TOLERANCE, unit, explanation)
}
