//! Keyboard- and click-driven session view.
//!
//! | Input                  | Effect |
//! |------------------------|--------|
//! | `1`–`9`, `option:N`    | toggle option N (1-based on keys, 0-based on clicks) |
//! | `Enter`                | submit, or advance once answered |
//! | `submit`, `next`       | submit / advance |
//! | `value:X`              | submit X for a numeric item |
//!
//! With `auto_advance_ms` set, a timer advances past a graded item unless the
//! user got there first.

use std::cell::RefCell;
use std::rc::Rc;

use tracing::debug;

use crate::config::ShellConfig;
use crate::error::{LifecycleError, SessionError, ViewError};
use crate::lifecycle::{
    events::{EventType, UiEvent},
    view::{MountScope, Surface, View},
};
use crate::navigation::RouteParams;
use crate::render;
use crate::session_engine::{
    engine::SessionEngine,
    generator::{build_session, provider_for, SessionSource},
    models::{Phase, Toggle},
};
use crate::views::ViewKind;

#[derive(Debug, Clone, Copy, PartialEq)]
enum Command {
    Toggle(usize),
    Confirm,
    Submit,
    Next,
    Value(f64),
}

impl Command {
    fn from_event(event: &UiEvent) -> Option<Command> {
        match event {
            UiEvent::Key(key) => match key.as_str() {
                "Enter" => Some(Command::Confirm),
                k => k
                    .parse::<usize>()
                    .ok()
                    .filter(|n| (1..=9).contains(n))
                    .map(|n| Command::Toggle(n - 1)),
            },
            UiEvent::Click(action) => match action.split_once(':') {
                Some(("option", n)) => n.parse().ok().map(Command::Toggle),
                Some(("value", v))  => v.trim().parse().ok().map(Command::Value),
                None if action == "submit" => Some(Command::Submit),
                None if action == "next"   => Some(Command::Next),
                _ => None,
            },
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Applied {
    Unchanged,
    Changed,
    Graded,
}

struct SessionState {
    title: String,
    engine: SessionEngine,
    surface: Surface,
}

impl SessionState {
    fn apply(&mut self, command: Command) -> Result<Applied, SessionError> {
        let engine = &mut self.engine;
        match command {
            Command::Toggle(i) => Ok(match engine.toggle(i)? {
                Toggle::Changed => Applied::Changed,
                Toggle::Locked  => Applied::Unchanged,
            }),
            Command::Confirm if engine.phase() == Phase::Answered => {
                engine.advance().map(|_| Applied::Changed)
            }
            Command::Confirm | Command::Submit => engine.submit().map(|_| Applied::Graded),
            Command::Next => engine.advance().map(|_| Applied::Changed),
            Command::Value(v) => engine.submit_value(v).map(|_| Applied::Graded),
        }
    }

    fn render(&self) -> Result<(), LifecycleError> {
        self.surface.render(render::session(&self.title, &self.engine))
    }
}

/// Advance past item `index` if it is still the answered item on screen.
fn auto_advance(state: &RefCell<SessionState>, index: usize) {
    let mut state = state.borrow_mut();
    if state.engine.phase() == Phase::Answered && state.engine.current_index() == index {
        debug!(index, "auto-advance");
        if state.engine.advance().is_ok() {
            if let Err(err) = state.render() {
                debug!(error = %err, "auto-advance after unmount");
            }
        }
    }
}

#[derive(Debug, Clone)]
pub struct SessionView {
    source: SessionSource,
    config: Rc<ShellConfig>,
}

impl SessionView {
    pub fn new(source: SessionSource, config: Rc<ShellConfig>) -> Self {
        SessionView { source, config }
    }
}

impl View for SessionView {
    fn kind(&self) -> ViewKind {
        ViewKind::Session { source: self.source.clone() }
    }

    fn mount(&mut self, scope: &MountScope<'_>, _params: &RouteParams) -> Result<(), ViewError> {
        let mut provider = provider_for(&self.source, &self.config.question_banks)?;
        let engine = build_session(provider.as_mut(), &self.config.session);
        let state = Rc::new(RefCell::new(SessionState {
            title: provider.title(),
            engine,
            surface: scope.surface(),
        }));
        state.borrow().render()?;

        let cleanup = scope.cleanup().clone();
        let timers = scope.env().timers.clone();
        let auto_advance_ms = self.config.session.auto_advance_ms;
        let handler: Rc<dyn Fn(&UiEvent)> = {
            let state = Rc::clone(&state);
            Rc::new(move |event: &UiEvent| {
                let Some(command) = Command::from_event(event) else {
                    return;
                };
                let graded_index = {
                    let mut s = state.borrow_mut();
                    match s.apply(command) {
                        Ok(Applied::Unchanged) | Err(_) => return,
                        Ok(applied) => {
                            if let Err(err) = s.render() {
                                debug!(error = %err, "input after unmount");
                                return;
                            }
                            (applied == Applied::Graded).then(|| s.engine.current_index())
                        }
                    }
                };
                if let (Some(index), Some(delay)) = (graded_index, auto_advance_ms) {
                    let state = Rc::clone(&state);
                    cleanup.set_timeout(&timers, delay, move || auto_advance(&state, index));
                }
            })
        };

        for event_type in [EventType::KeyDown, EventType::Click] {
            let handler = Rc::clone(&handler);
            scope.listen(event_type, move |event: &UiEvent| handler(event));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keys_and_clicks_map_to_commands() {
        assert_eq!(Command::from_event(&UiEvent::key("1")), Some(Command::Toggle(0)));
        assert_eq!(Command::from_event(&UiEvent::key("9")), Some(Command::Toggle(8)));
        assert_eq!(Command::from_event(&UiEvent::key("0")), None);
        assert_eq!(Command::from_event(&UiEvent::key("Enter")), Some(Command::Confirm));
        assert_eq!(Command::from_event(&UiEvent::key("x")), None);
        assert_eq!(Command::from_event(&UiEvent::click("option:3")), Some(Command::Toggle(3)));
        assert_eq!(Command::from_event(&UiEvent::click("value: 12.5")), Some(Command::Value(12.5)));
        assert_eq!(Command::from_event(&UiEvent::click("value:abc")), None);
        assert_eq!(Command::from_event(&UiEvent::click("submit")), Some(Command::Submit));
        assert_eq!(Command::from_event(&UiEvent::click("next")), Some(Command::Next));
        assert_eq!(Command::from_event(&UiEvent::click("flip")), None);
    }
}
