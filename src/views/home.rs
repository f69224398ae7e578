use std::rc::Rc;

use crate::config::ShellConfig;
use crate::error::ViewError;
use crate::lifecycle::view::{MountScope, View};
use crate::navigation::RouteParams;
use crate::render::{self, MenuEntry};
use crate::session_engine::generator::ExerciseKind;
use crate::views::ViewKind;

#[derive(Debug, Clone)]
pub struct HomeView {
    config: Rc<ShellConfig>,
}

impl HomeView {
    pub fn new(config: Rc<ShellConfig>) -> Self {
        HomeView { config }
    }

    fn menu(&self) -> (Vec<MenuEntry>, Vec<MenuEntry>, Vec<MenuEntry>) {
        let exercises = ExerciseKind::ALL
            .iter()
            .map(|kind| MenuEntry {
                href: format!("/exercise/{}", kind.slug()),
                label: kind.to_string(),
            })
            .collect();
        let banks = &self.config.question_banks;
        let quizzes = banks
            .iter()
            .filter(|(_, bank)| !bank.is_empty())
            .map(|(topic, bank)| MenuEntry {
                href: format!("/quiz/{}", urlencoding::encode(topic)),
                label: bank.title.clone(),
            })
            .collect();
        let decks = banks
            .iter()
            .map(|(topic, bank)| MenuEntry {
                href: format!("/flashcards/{}", urlencoding::encode(topic)),
                label: bank.title.clone(),
            })
            .collect();
        (exercises, quizzes, decks)
    }
}

impl View for HomeView {
    fn kind(&self) -> ViewKind {
        ViewKind::Home
    }

    fn mount(&mut self, scope: &MountScope<'_>, _params: &RouteParams) -> Result<(), ViewError> {
        let (exercises, quizzes, decks) = self.menu();
        scope.render(render::home(&exercises, &quizzes, &decks))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session_engine::topics::bank::QuestionBank;

    #[test]
    fn menu_links_every_exercise_and_bank() {
        let mut config = ShellConfig::default();
        config.question_banks.insert(
            "ports & protocols".into(),
            QuestionBank::from_json(
                "ports",
                r#"{"title":"Ports","questions":[{"prompt":"p","options":["a","b"],"correct":[0],"mode":"single"}]}"#,
            )
            .unwrap(),
        );
        let (exercises, quizzes, decks) = HomeView::new(Rc::new(config)).menu();
        assert_eq!(exercises.len(), ExerciseKind::ALL.len());
        assert_eq!(quizzes[0].href, "/quiz/ports%20%26%20protocols");
        assert_eq!(decks[0].label, "Ports");
    }
}
