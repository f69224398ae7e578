//! Markup for each view. Every piece of generated or authored text goes
//! through [`escape`] before it lands in a container.
//!
//! Interactive elements carry a `data-action` attribute; hosts translate a
//! click on one into `UiEvent::Click(action)`.

use std::fmt::Write;

use crate::session_engine::{
    engine::SessionEngine,
    models::{Phase, Response, Summary},
};

/// Escape text for use inside element content.
pub fn escape(text: &str) -> String {
    html_escape::encode_text(text).into_owned()
}

fn attr(text: &str) -> String {
    html_escape::encode_double_quoted_attribute(text).into_owned()
}

/// One linked entry on the home page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuEntry {
    pub href: String,
    pub label: String,
}

pub fn home(exercises: &[MenuEntry], quizzes: &[MenuEntry], decks: &[MenuEntry]) -> String {
    let mut out = String::from("<section class=\"home\"><h1>Study</h1>");
    for (heading, entries) in [("Exercises", exercises), ("Quizzes", quizzes), ("Flashcards", decks)] {
        if entries.is_empty() {
            continue;
        }
        let _ = write!(out, "<h2>{heading}</h2><ul>");
        for entry in entries {
            let _ = write!(
                out,
                "<li><a href=\"#{}\">{}</a></li>",
                attr(&entry.href),
                escape(&entry.label)
            );
        }
        out.push_str("</ul>");
    }
    out.push_str("</section>");
    out
}

/// The current item of a running session, or the summary once complete.
pub fn session(title: &str, engine: &SessionEngine) -> String {
    let Some(item) = engine.current_item() else {
        return summary(title, &engine.summary());
    };
    let answered = engine.phase() == Phase::Answered;

    let mut out = format!(
        "<section class=\"session\"><header><h1>{}</h1><p class=\"progress\">{} / {} · score {}</p></header>",
        escape(title),
        engine.current_index() + 1,
        engine.total(),
        engine.score()
    );
    let _ = write!(out, "<p class=\"prompt\">{}</p>", escape(&item.prompt));

    match &item.response {
        Response::Choice(choice) => {
            out.push_str("<ol class=\"options\">");
            for (i, option) in choice.options.iter().enumerate() {
                let mut class = String::from("option");
                if engine.selection().contains(&i) {
                    class.push_str(" selected");
                }
                if answered && choice.answer_key.contains(&i) {
                    class.push_str(" correct");
                }
                let _ = write!(
                    out,
                    "<li class=\"{class}\" data-action=\"option:{i}\"><kbd>{}</kbd> {}</li>",
                    i + 1,
                    escape(option)
                );
            }
            out.push_str("</ol>");
        }
        Response::Numeric(numeric) => {
            let _ = write!(
                out,
                "<p class=\"numeric\"><input name=\"value\" inputmode=\"decimal\"> {}</p>",
                escape(&numeric.unit)
            );
        }
    }

    match engine.current_outcome() {
        Some(outcome) => {
            let verdict = if outcome.correct { "Correct" } else { "Incorrect" };
            let _ = write!(out, "<p class=\"verdict\">{verdict}</p>");
            if let Some(explanation) = &item.explanation {
                let _ = write!(out, "<p class=\"explanation\">{}</p>", escape(explanation));
            }
            out.push_str("<button data-action=\"next\">Next</button>");
        }
        None => out.push_str("<button data-action=\"submit\">Submit</button>"),
    }
    out.push_str("</section>");
    out
}

pub fn summary(title: &str, summary: &Summary) -> String {
    format!(
        "<section class=\"summary\"><h1>{}</h1><p class=\"score\">{} ({}%)</p><a href=\"#/\">Home</a></section>",
        escape(title),
        summary,
        summary.percent()
    )
}

pub fn flashcard(title: &str, front: &str, back: &str, flipped: bool, index: usize, total: usize) -> String {
    let face = if flipped {
        format!("<p class=\"back\">{}</p>", escape(back))
    } else {
        format!("<p class=\"front\">{}</p>", escape(front))
    };
    format!(
        "<section class=\"flashcards\"><h1>{}</h1><p class=\"progress\">{} / {}</p>{face}\
         <button data-action=\"flip\">Flip</button><button data-action=\"next\">Next</button></section>",
        escape(title),
        index + 1,
        total
    )
}

pub fn empty_deck(title: &str) -> String {
    format!(
        "<section class=\"flashcards\"><h1>{}</h1><p>No cards yet.</p><a href=\"#/\">Home</a></section>",
        escape(title)
    )
}

pub fn not_found(path: &str) -> String {
    format!(
        "<section class=\"not-found\"><h1>Not found</h1><p>Nothing lives at <code>{}</code>.</p><a href=\"#/\">Home</a></section>",
        escape(path)
    )
}
