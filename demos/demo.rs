//! Headless walk through the study shell.
//!
//! Run with: `cargo run --example demo`
//! (set `RUST_LOG=study_shell=debug` to watch routing and lifecycle events)
//!
//! The demo wires an [`App`] to in-memory stand-ins for the browser:
//!
//! 1. **Home** — the menu rendered from the configured banks and the built-in
//!    exercise families.
//! 2. **Flashcards** — flip the first card with Space, move on with ArrowRight.
//! 3. **Quiz** — answer every question of a JSON bank with the keyboard
//!    (number key to pick, Enter to submit, Enter again to advance) and print
//!    the summary page.
//! 4. **Leaving** — navigating home releases every listener the quiz held.
//!
//! ## Key concepts demonstrated
//!
//! - `ShellConfig::from_json` validates each question bank up front.
//! - `session.rng_seed` makes option order, and so the output, reproducible.
//! - Views only talk to the page through the container and the document's
//!   event target; the demo plays the part of the user by dispatching events.

use std::rc::Rc;

use study_shell::{
    telemetry, App, Container, Environment, Location, MemoryContainer, MemoryLocation,
    ShellConfig, UiEvent,
};

const CONFIG: &str = r#"{
    "session": { "rng_seed": 42, "items_per_session": 3 },
    "question_banks": {
        "networking": {
            "title": "Networking basics",
            "questions": [
                {
                    "prompt": "Which protocol resolves names to addresses?",
                    "options": ["DNS", "ARP", "SMTP"],
                    "correct": [0],
                    "mode": "single",
                    "explanation": "DNS maps host names to IP addresses."
                },
                {
                    "prompt": "Which of these are transport protocols?",
                    "options": ["TCP", "UDP", "IPv6", "Ethernet"],
                    "correct": [0, 1],
                    "mode": "multiple"
                },
                {
                    "prompt": "Default port for HTTPS?",
                    "options": ["80", "443", "8080"],
                    "correct": [1],
                    "mode": "single"
                }
            ]
        }
    }
}"#;

struct Browser {
    location: MemoryLocation,
    container: MemoryContainer,
    env: Environment,
}

impl Browser {
    fn press(&self, key: &str) {
        self.env.document.dispatch(&UiEvent::key(key));
    }

    fn show(&self, label: &str) {
        println!("── {label} {}", "─".repeat(60usize.saturating_sub(label.len())));
        println!("  #{}", self.location.fragment());
        println!("  {}", self.container.content());
        println!();
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    telemetry::init_tracing("study_shell=info");

    let config = ShellConfig::from_json(CONFIG)?;
    let browser = Browser {
        location: MemoryLocation::with_fragment("#/"),
        container: MemoryContainer::new(),
        env: Environment::new(),
    };
    let app = App::new(
        config,
        Rc::new(browser.location.clone()),
        Rc::new(browser.container.clone()),
        browser.env.clone(),
    )?;
    app.start()?;
    browser.show("home");

    // ── Flashcards ─────────────────────────────────────────────────────────
    app.navigate_to("/flashcards/networking")?;
    browser.show("first card");
    browser.press(" ");
    browser.show("flipped");
    browser.press("ArrowRight");
    browser.show("next card");

    // ── Quiz ───────────────────────────────────────────────────────────────
    // Always picking option 1 gets some right and some wrong.
    app.navigate_to("/quiz/networking")?;
    for question in 1..=3 {
        browser.show(&format!("question {question}"));
        browser.press("1");
        browser.press("Enter");
        browser.show(&format!("answer {question}"));
        browser.press("Enter");
    }
    browser.show("summary");

    // ── Leaving ────────────────────────────────────────────────────────────
    app.navigate_to("/")?;
    println!(
        "Back home: {} listeners, {} timers pending, {} navigations.",
        browser.env.document.listener_count(),
        browser.env.timers.pending_count(),
        app.navigations()
    );
    Ok(())
}
