use std::cell::RefCell;
use std::rc::Rc;

use crate::config::ShellConfig;
use crate::error::{ContentError, LifecycleError, ViewError};
use crate::lifecycle::{
    events::{EventType, UiEvent},
    view::{MountScope, Surface, View},
};
use crate::navigation::RouteParams;
use crate::render;
use crate::session_engine::shuffle::ShuffleService;
use crate::views::ViewKind;
use tracing::debug;

struct Deck {
    title: String,
    cards: Vec<(String, String)>,
    index: usize,
    flipped: bool,
    surface: Surface,
}

impl Deck {
    fn render(&self) -> Result<(), LifecycleError> {
        let markup = match self.cards.get(self.index) {
            Some((front, back)) => {
                render::flashcard(&self.title, front, back, self.flipped, self.index, self.cards.len())
            }
            None => render::empty_deck(&self.title),
        };
        self.surface.render(markup)
    }

    /// Returns whether anything changed.
    fn handle(&mut self, event: &UiEvent) -> bool {
        if self.cards.is_empty() {
            return false;
        }
        match event {
            UiEvent::Key(k) if k == " " => self.flip(),
            UiEvent::Click(a) if a == "flip" => self.flip(),
            UiEvent::Key(k) if k == "ArrowRight" => self.next(),
            UiEvent::Click(a) if a == "next" => self.next(),
            _ => return false,
        }
        true
    }

    fn flip(&mut self) {
        self.flipped = !self.flipped;
    }

    /// Wraps around to the first card.
    fn next(&mut self) {
        self.index = (self.index + 1) % self.cards.len();
        self.flipped = false;
    }
}

/// Flip-through study of a question bank: prompt on the front, correct
/// options on the back.
#[derive(Debug, Clone)]
pub struct FlashcardView {
    topic: String,
    config: Rc<ShellConfig>,
}

impl FlashcardView {
    pub fn new(topic: impl Into<String>, config: Rc<ShellConfig>) -> Self {
        FlashcardView { topic: topic.into(), config }
    }
}

impl View for FlashcardView {
    fn kind(&self) -> ViewKind {
        ViewKind::Flashcards { topic: self.topic.clone() }
    }

    fn mount(&mut self, scope: &MountScope<'_>, _params: &RouteParams) -> Result<(), ViewError> {
        let bank = self
            .config
            .question_banks
            .get(&self.topic)
            .ok_or_else(|| ContentError::UnknownTopic(self.topic.clone()))?;
        let mut shuffler = ShuffleService::from_seed(self.config.session.rng_seed);
        let deck = Rc::new(RefCell::new(Deck {
            title: bank.title.clone(),
            cards: shuffler.shuffle(&bank.cards()),
            index: 0,
            flipped: false,
            surface: scope.surface(),
        }));
        deck.borrow().render()?;

        for event_type in [EventType::KeyDown, EventType::Click] {
            let deck = Rc::clone(&deck);
            scope.listen(event_type, move |event: &UiEvent| {
                let mut deck = deck.borrow_mut();
                if deck.handle(event) {
                    if let Err(err) = deck.render() {
                        debug!(error = %err, "card input after unmount");
                    }
                }
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lifecycle::container::{Container, MemoryContainer};

    fn deck(cards: usize) -> (Deck, MemoryContainer) {
        let container = MemoryContainer::new();
        let deck = Deck {
            title: "Ports".into(),
            cards: (0..cards).map(|i| (format!("front {i}"), format!("back {i}"))).collect(),
            index: 0,
            flipped: false,
            surface: Surface::detached(Rc::new(container.clone()), "flashcards"),
        };
        (deck, container)
    }

    #[test]
    fn space_flips_and_arrow_moves_on() {
        let (mut deck, container) = deck(2);
        assert!(deck.handle(&UiEvent::key(" ")));
        deck.render().unwrap();
        assert!(container.content().contains("back 0"));

        assert!(deck.handle(&UiEvent::key("ArrowRight")));
        deck.render().unwrap();
        assert!(container.content().contains("front 1"));

        deck.handle(&UiEvent::click("next"));
        assert_eq!(deck.index, 0);
        assert!(!deck.handle(&UiEvent::key("Enter")));
    }

    #[test]
    fn empty_deck_ignores_input() {
        let (mut deck, container) = deck(0);
        assert!(!deck.handle(&UiEvent::key("ArrowRight")));
        deck.render().unwrap();
        assert!(container.content().contains("No cards yet"));
    }
}
