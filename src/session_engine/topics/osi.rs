use rand::{Rng, RngCore};
use crate::session_engine::{
    helpers::{choice, single},
    models::{DifficultyLevel, GeneratedItem, SelectionMode},
    shuffle::fisher_yates,
};

struct Layer {
    number: u8,
    name: &'static str,
    protocols: &'static [&'static str],
}

// Only protocols whose layer is not up for debate.
const LAYERS: [Layer; 4] = [
    Layer { number: 7, name: "Application", protocols: &["HTTP", "DNS", "SMTP", "FTP"] },
    Layer { number: 4, name: "Transport",   protocols: &["TCP", "UDP", "SCTP"] },
    Layer { number: 3, name: "Network",     protocols: &["IPv4", "IPv6", "ICMP"] },
    Layer { number: 2, name: "Data Link",   protocols: &["Ethernet", "PPP", "802.1Q"] },
];

const MULTI_OPTIONS: usize = 5;

fn label(layer: &Layer) -> String {
    format!("Layer {} ({})", layer.number, layer.name)
}

/// Beginner: "which layer is X on?" (single-select).
/// Otherwise: "which of these are on layer N?" (multi-select).
pub fn generate(
    rng: &mut dyn RngCore,
    difficulty: DifficultyLevel,
    item_id: String,
) -> GeneratedItem {
    let target = rng.gen_range(0..LAYERS.len());
    let layer = &LAYERS[target];

    if difficulty == DifficultyLevel::Beginner {
        let protocol = layer.protocols[rng.gen_range(0..layer.protocols.len())];
        let wrong = LAYERS
            .iter()
            .enumerate()
            .filter(|(i, _)| *i != target)
            .map(|(_, l)| label(l))
            .collect();
        return single(
            item_id,
            format!("At which OSI layer does {protocol} operate?"),
            label(layer),
            wrong,
            format!("{protocol} is a {} layer protocol.", layer.name),
        );
    }

    let max_correct = match difficulty {
        DifficultyLevel::Intermediate => 2,
        _                             => 3,
    };
    let correct_count = rng.gen_range(1..=max_correct.min(layer.protocols.len()));

    let mut mine: Vec<&str> = layer.protocols.to_vec();
    fisher_yates(&mut *rng, &mut mine);
    mine.truncate(correct_count);

    let mut others: Vec<&str> = LAYERS
        .iter()
        .enumerate()
        .filter(|(i, _)| *i != target)
        .flat_map(|(_, l)| l.protocols.iter().copied())
        .collect();
    fisher_yates(&mut *rng, &mut others);
    others.truncate(MULTI_OPTIONS - correct_count);

    let explanation = format!(
        "{} layer protocols here: {}.",
        layer.name,
        mine.join(", ")
    );
    let options: Vec<String> = mine.iter().chain(others.iter()).map(|p| p.to_string()).collect();
    choice(
        item_id,
        format!("Which of these operate at {}? Select all that apply.", label(layer)),
        options,
        0..correct_count,
        SelectionMode::Multiple,
        explanation,
    )
}
