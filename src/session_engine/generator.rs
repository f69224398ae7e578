use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use rand::RngCore;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::SessionConfig;
use crate::error::ContentError;
use crate::session_engine::{
    engine::SessionEngine,
    models::{
        ChoiceResponse, DifficultyLevel, ExerciseItem, GeneratedItem, GeneratedResponse,
        NumericResponse, Response, Tolerance,
    },
    shuffle::ShuffleService,
    topics::{self, bank::{BankProvider, QuestionBank}},
};

/// Source of generated items for one session.
pub trait ContentProvider {
    fn title(&self) -> String;

    /// Short prefix for item ids, e.g. `"NS"`.
    fn id_prefix(&self) -> &'static str;

    /// Upper bound on distinct items, for finite banks.
    fn capacity(&self) -> Option<usize> {
        None
    }

    /// Produce one item. Correct indices refer to the generated option order.
    fn generate_item(
        &mut self,
        rng: &mut dyn RngCore,
        difficulty: DifficultyLevel,
        item_id: String,
    ) -> GeneratedItem;
}

/// Procedurally generated exercise families.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ExerciseKind {
    NumeralSystems,
    Osi,
    Electrical,
}

impl ExerciseKind {
    pub const ALL: [ExerciseKind; 3] = [
        ExerciseKind::NumeralSystems,
        ExerciseKind::Osi,
        ExerciseKind::Electrical,
    ];

    /// URL segment for this kind.
    pub fn slug(self) -> &'static str {
        match self {
            ExerciseKind::NumeralSystems => "numeral-systems",
            ExerciseKind::Osi            => "osi",
            ExerciseKind::Electrical     => "electrical",
        }
    }
}

impl fmt::Display for ExerciseKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ExerciseKind::NumeralSystems => "Numeral Systems",
            ExerciseKind::Osi            => "OSI Model",
            ExerciseKind::Electrical     => "Electrical Calculations",
        };
        write!(f, "{}", s)
    }
}

impl FromStr for ExerciseKind {
    type Err = ContentError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ExerciseKind::ALL
            .into_iter()
            .find(|k| k.slug() == s)
            .ok_or_else(|| ContentError::UnknownKind(s.to_string()))
    }
}

/// What a session draws its items from.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum SessionSource {
    Exercise(ExerciseKind),
    /// Authored quiz, keyed by question-bank topic.
    Quiz(String),
}

impl fmt::Display for SessionSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SessionSource::Exercise(kind) => write!(f, "exercise:{}", kind.slug()),
            SessionSource::Quiz(topic)    => write!(f, "quiz:{}", topic),
        }
    }
}

/// Provider for one procedural exercise family.
#[derive(Debug, Clone, Copy)]
pub struct ExerciseProvider(pub ExerciseKind);

impl ContentProvider for ExerciseProvider {
    fn title(&self) -> String {
        self.0.to_string()
    }

    fn id_prefix(&self) -> &'static str {
        match self.0 {
            ExerciseKind::NumeralSystems => "NS",
            ExerciseKind::Osi            => "OS",
            ExerciseKind::Electrical     => "EL",
        }
    }

    fn generate_item(
        &mut self,
        rng: &mut dyn RngCore,
        difficulty: DifficultyLevel,
        item_id: String,
    ) -> GeneratedItem {
        match self.0 {
            ExerciseKind::NumeralSystems =>
                topics::numeral::generate(rng, difficulty, item_id),

            ExerciseKind::Osi =>
                topics::osi::generate(rng, difficulty, item_id),

            ExerciseKind::Electrical =>
                topics::electrical::generate(rng, difficulty, item_id),
        }
    }
}

/// Generate a unique item id from the provider prefix.
fn make_item_id(prefix: &str, rng: &mut dyn RngCore) -> String {
    format!("{}-{:08X}", prefix, rng.next_u32())
}

/// Look up the provider for `source`.
pub fn provider_for(
    source: &SessionSource,
    banks: &BTreeMap<String, QuestionBank>,
) -> Result<Box<dyn ContentProvider>, ContentError> {
    match source {
        SessionSource::Exercise(kind) => Ok(Box::new(ExerciseProvider(*kind))),
        SessionSource::Quiz(topic) => {
            let bank = banks
                .get(topic)
                .ok_or_else(|| ContentError::UnknownTopic(topic.clone()))?;
            bank.validate(topic)?;
            Ok(Box::new(BankProvider::new(topic.clone(), bank.clone())))
        }
    }
}

/// Turn a generated item into its presented form: shuffle the options and
/// move the answer key to display positions.
pub fn present(
    shuffler: &mut ShuffleService,
    generated: GeneratedItem,
    tolerance_override: Option<Tolerance>,
) -> ExerciseItem {
    let response = match generated.response {
        GeneratedResponse::Choice { options, correct, mode } => {
            let shuffled = shuffler.shuffle_options(&options, &correct);
            Response::Choice(ChoiceResponse {
                options: shuffled.options,
                presentation_order: shuffled.order,
                answer_key: shuffled.answer_key,
                mode,
            })
        }
        GeneratedResponse::Numeric { expected, tolerance, unit } => {
            Response::Numeric(NumericResponse {
                expected,
                tolerance: tolerance_override.unwrap_or(tolerance),
                unit,
            })
        }
    };
    ExerciseItem {
        item_id: generated.item_id,
        prompt: generated.prompt,
        explanation: generated.explanation,
        response,
    }
}

/// Generate, present and (optionally) reorder a full session.
pub fn build_session(provider: &mut dyn ContentProvider, config: &SessionConfig) -> SessionEngine {
    let mut shuffler = ShuffleService::from_seed(config.rng_seed);
    let count = match provider.capacity() {
        Some(cap) => cap.min(config.items_per_session),
        None      => config.items_per_session,
    };
    let tolerance = config.numeric_tolerance.map(Tolerance::Relative);

    let mut items = Vec::with_capacity(count);
    for _ in 0..count {
        let item_id = make_item_id(provider.id_prefix(), shuffler.rng());
        let generated = provider.generate_item(shuffler.rng(), config.difficulty, item_id);
        items.push(present(&mut shuffler, generated, tolerance));
    }
    if config.shuffle_items {
        items = shuffler.shuffle(&items);
    }

    debug!(provider = %provider.title(), items = items.len(), difficulty = %config.difficulty, "session generated");
    SessionEngine::new(items)
}
