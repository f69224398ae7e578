//! The page shell: one router, one container, one live view.
//!
//! | Pattern              | View |
//! |----------------------|------|
//! | `/`                  | [`HomeView`] |
//! | `/flashcards/:topic` | [`FlashcardView`] over a configured question bank |
//! | `/quiz/:topic`       | [`SessionView`] over a configured question bank |
//! | `/exercise/:kind`    | [`SessionView`] over a procedural exercise family |
//! | anything else        | [`NotFoundView`] |
//!
//! Unknown kinds and topics also land on [`NotFoundView`].

use std::cell::RefCell;
use std::rc::Rc;

use tracing::info;

use crate::config::ShellConfig;
use crate::error::{LifecycleError, PatternError, RouterError};
use crate::lifecycle::{container::Container, events::Environment, host::ViewHost, view::View};
use crate::navigation::{location::Location, pattern::RouteParams, router::{Dispatch, Router}};
use crate::session_engine::generator::{ExerciseKind, SessionSource};
use crate::views::{FlashcardView, HomeView, NotFoundView, SessionView, ViewKind};

/// Route handler that builds a view and hands it to the host.
fn show_with<F>(host: &Rc<RefCell<ViewHost>>, make: F) -> impl Fn(&RouteParams) -> Result<(), RouterError>
where
    F: Fn(&RouteParams) -> Box<dyn View> + 'static,
{
    let host = Rc::clone(host);
    move |params: &RouteParams| {
        let view = make(params);
        // A view that navigates while it is being mounted would re-enter here.
        let mut host = host.try_borrow_mut().map_err(|_| LifecycleError::Reentrant {
            view: view.kind().to_string(),
            op: "show",
            state: "mounting",
        })?;
        host.show(view, params)?;
        Ok(())
    }
}

fn topic_param(params: &RouteParams) -> String {
    params.get("topic").unwrap_or_default().to_string()
}

#[derive(Debug)]
pub struct App {
    config: Rc<ShellConfig>,
    router: Router,
    host: Rc<RefCell<ViewHost>>,
}

impl App {
    pub fn new(
        config: ShellConfig,
        location: Rc<dyn Location>,
        container: Rc<dyn Container>,
        env: Environment,
    ) -> Result<Self, PatternError> {
        let config = Rc::new(config);
        let host = Rc::new(RefCell::new(ViewHost::new(container, env)));
        let router = Router::new(location);

        let home = {
            let config = Rc::clone(&config);
            show_with(&host, move |_: &RouteParams| -> Box<dyn View> {
                Box::new(HomeView::new(Rc::clone(&config)))
            })
        };
        let flashcards = {
            let config = Rc::clone(&config);
            show_with(&host, move |params: &RouteParams| -> Box<dyn View> {
                let topic = topic_param(params);
                if config.question_banks.contains_key(&topic) {
                    Box::new(FlashcardView::new(topic, Rc::clone(&config)))
                } else {
                    Box::new(NotFoundView::new(params.path()))
                }
            })
        };
        let quiz = {
            let config = Rc::clone(&config);
            show_with(&host, move |params: &RouteParams| -> Box<dyn View> {
                let topic = topic_param(params);
                if config.question_banks.contains_key(&topic) {
                    Box::new(SessionView::new(SessionSource::Quiz(topic), Rc::clone(&config)))
                } else {
                    Box::new(NotFoundView::new(params.path()))
                }
            })
        };
        let exercise = {
            let config = Rc::clone(&config);
            show_with(&host, move |params: &RouteParams| -> Box<dyn View> {
                match params.get("kind").unwrap_or_default().parse::<ExerciseKind>() {
                    Ok(kind) => Box::new(SessionView::new(SessionSource::Exercise(kind), Rc::clone(&config))),
                    Err(_) => Box::new(NotFoundView::new(params.path())),
                }
            })
        };
        let not_found = show_with(&host, |params: &RouteParams| -> Box<dyn View> {
            Box::new(NotFoundView::new(params.path()))
        });

        router
            .register("/", home)?
            .register("/flashcards/:topic", flashcards)?
            .register("/quiz/:topic", quiz)?
            .register("/exercise/:kind", exercise)?
            .register_not_found(not_found);

        Ok(App { config, router, host })
    }

    /// Start listening for navigation and show the view for the current
    /// location.
    pub fn start(&self) -> Result<Dispatch, RouterError> {
        info!(routes = self.router.route_count(), banks = self.config.question_banks.len(), "shell starting");
        self.router.start()
    }

    /// Stop listening. The current view stays mounted.
    pub fn stop(&self) {
        self.router.stop();
    }

    pub fn navigate_to(&self, path: &str) -> Result<(), RouterError> {
        self.router.navigate_to(path)
    }

    /// Tear down the current view. Returns how many cleanup actions ran.
    pub fn unmount_current(&self) -> Result<usize, LifecycleError> {
        let mut host = self.host.try_borrow_mut().map_err(|_| LifecycleError::Reentrant {
            view: self.current_view().map(|k| k.to_string()).unwrap_or_default(),
            op: "unmount",
            state: "mounting",
        })?;
        Ok(host.unmount_current())
    }

    pub fn router(&self) -> &Router {
        &self.router
    }

    pub fn config(&self) -> &ShellConfig {
        &self.config
    }

    pub fn current_view(&self) -> Option<ViewKind> {
        self.host.try_borrow().ok().and_then(|host| host.current_kind())
    }

    pub fn navigations(&self) -> u64 {
        self.host.try_borrow().map(|host| host.navigations()).unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ViewError;
    use crate::lifecycle::{container::MemoryContainer, view::MountScope};
    use crate::navigation::location::MemoryLocation;

    type Outcome = Rc<RefCell<Option<Result<(), RouterError>>>>;

    /// Navigates to `target` from inside its own mount and keeps the result.
    struct Redirecting {
        location: MemoryLocation,
        target: &'static str,
        outcome: Outcome,
    }

    impl View for Redirecting {
        fn kind(&self) -> ViewKind {
            ViewKind::Home
        }

        fn mount(&mut self, scope: &MountScope<'_>, _params: &RouteParams) -> Result<(), ViewError> {
            scope.render("<p>redirecting</p>".to_string())?;
            *self.outcome.borrow_mut() = Some(self.location.set_fragment(self.target));
            Ok(())
        }
    }

    fn app_at(fragment: &str) -> (App, MemoryLocation, MemoryContainer) {
        let location = MemoryLocation::with_fragment(fragment);
        let container = MemoryContainer::new();
        let app = App::new(
            ShellConfig::default(),
            Rc::new(location.clone()),
            Rc::new(container.clone()),
            Environment::new(),
        )
        .unwrap();
        (app, location, container)
    }

    #[test]
    fn navigating_during_mount_is_rejected_as_reentrant() {
        let (app, location, container) = app_at("");
        let outcome: Outcome = Rc::default();
        {
            let location = location.clone();
            let outcome = Rc::clone(&outcome);
            app.router()
                .register(
                    "/redirect",
                    show_with(&app.host, move |_: &RouteParams| -> Box<dyn View> {
                        Box::new(Redirecting {
                            location: location.clone(),
                            target: "/elsewhere",
                            outcome: Rc::clone(&outcome),
                        })
                    }),
                )
                .unwrap();
        }
        app.start().unwrap();

        // The outer navigation succeeds; the nested one is refused.
        app.navigate_to("/redirect").unwrap();
        let nested = outcome.borrow_mut().take().expect("mount ran");
        assert!(matches!(
            nested,
            Err(RouterError::View(ViewError::Lifecycle(LifecycleError::Reentrant {
                op: "show",
                state: "mounting",
                ref view,
            }))) if view == "not-found:/elsewhere"
        ));

        // The location moved on but the host kept the view that was mounting.
        assert_eq!(location.fragment(), "/elsewhere");
        assert_eq!(app.router().current_path().as_deref(), Some("/elsewhere"));
        assert_eq!(app.current_view(), Some(ViewKind::Home));
        assert_eq!(container.content(), "<p>redirecting</p>");

        // Resolving again brings the host in line with the location.
        app.router().resolve_current_location().unwrap();
        assert_eq!(app.current_view(), Some(ViewKind::NotFound { path: "/elsewhere".into() }));
    }

    #[test]
    fn unmount_while_the_host_is_busy_is_reentrant() {
        let (app, _, container) = app_at("");
        app.start().unwrap();
        {
            let _busy = app.host.borrow_mut();
            assert!(matches!(
                app.unmount_current(),
                Err(LifecycleError::Reentrant { op: "unmount", .. })
            ));
        }
        assert_eq!(app.current_view(), Some(ViewKind::Home));
        assert_eq!(app.unmount_current().unwrap(), 0);
        assert_eq!(app.current_view(), None);
        assert!(container.is_empty());
    }
}
