use std::fmt;
use std::rc::Rc;

use tracing::debug;

use crate::error::ViewError;
use crate::lifecycle::container::Container;
use crate::lifecycle::events::Environment;
use crate::lifecycle::view::{View, ViewInstance};
use crate::navigation::RouteParams;
use crate::views::ViewKind;

/// Navigation state: the page container and the one live view in it.
///
/// `show` tears the old view down completely before the new one touches the
/// container, without yielding in between.
pub struct ViewHost {
    container: Rc<dyn Container>,
    env: Environment,
    current: Option<ViewInstance>,
    current_path: Option<String>,
    navigations: u64,
}

impl ViewHost {
    pub fn new(container: Rc<dyn Container>, env: Environment) -> Self {
        ViewHost {
            container,
            env,
            current: None,
            current_path: None,
            navigations: 0,
        }
    }

    /// A view that fails to mount leaves the host empty, and neither the
    /// path nor the navigation count records it.
    pub fn show(&mut self, view: Box<dyn View>, params: &RouteParams) -> Result<(), ViewError> {
        if let Some(mut old) = self.current.take() {
            let ran = old.unmount();
            debug!(from = %old.kind(), cleanups = ran, "previous view released");
        }
        self.current_path = None;

        let mut instance = ViewInstance::new(view, self.env.clone());
        instance.mount(Rc::clone(&self.container), params)?;
        self.current = Some(instance);
        self.current_path = Some(params.path().to_string());
        self.navigations += 1;
        Ok(())
    }

    /// Unmount the live view, if any. Returns how many cleanup actions ran.
    pub fn unmount_current(&mut self) -> usize {
        self.current_path = None;
        match self.current.take() {
            Some(mut view) => view.unmount(),
            None => 0,
        }
    }

    pub fn current_kind(&self) -> Option<ViewKind> {
        self.current.as_ref().map(ViewInstance::kind)
    }

    pub fn current(&self) -> Option<&ViewInstance> {
        self.current.as_ref()
    }

    pub fn current_path(&self) -> Option<&str> {
        self.current_path.as_deref()
    }

    pub fn navigations(&self) -> u64 {
        self.navigations
    }

    pub fn env(&self) -> &Environment {
        &self.env
    }
}

impl fmt::Debug for ViewHost {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ViewHost")
            .field("current", &self.current)
            .field("current_path", &self.current_path)
            .field("navigations", &self.navigations)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lifecycle::container::MemoryContainer;
    use crate::lifecycle::events::EventType;
    use crate::lifecycle::view::MountScope;
    use crate::views::NotFoundView;

    /// Listens for keys and renders a fixed label.
    struct Listening(&'static str);

    impl View for Listening {
        fn kind(&self) -> ViewKind {
            ViewKind::NotFound { path: self.0.to_string() }
        }

        fn mount(&mut self, scope: &MountScope<'_>, _params: &RouteParams) -> Result<(), ViewError> {
            scope.render(self.0.to_string())?;
            scope.listen(EventType::KeyDown, |_| {});
            scope.set_timeout(1_000, || {});
            Ok(())
        }
    }

    /// Listens, then fails.
    struct Broken;

    impl View for Broken {
        fn kind(&self) -> ViewKind {
            ViewKind::Home
        }

        fn mount(&mut self, scope: &MountScope<'_>, _params: &RouteParams) -> Result<(), ViewError> {
            scope.listen(EventType::KeyDown, |_| {});
            Err(ViewError::Render("broken".into()))
        }
    }

    #[test]
    fn show_replaces_the_previous_view_completely() {
        let env = Environment::new();
        let container = MemoryContainer::new();
        let mut host = ViewHost::new(Rc::new(container.clone()), env.clone());

        host.show(Box::new(Listening("first")), &RouteParams::for_path("/a")).unwrap();
        host.show(Box::new(Listening("second")), &RouteParams::for_path("/b")).unwrap();
        assert_eq!(env.document.listener_count(), 1);
        assert_eq!(env.timers.pending_count(), 1);
        assert_eq!(container.content(), "second");
        assert_eq!(host.current_path(), Some("/b"));
        assert_eq!(host.navigations(), 2);

        host.show(Box::new(NotFoundView::new("/c")), &RouteParams::for_path("/c")).unwrap();
        assert_eq!(env.document.listener_count(), 0);
        assert_eq!(env.timers.pending_count(), 0);
        assert_eq!(host.current_kind(), Some(ViewKind::NotFound { path: "/c".into() }));

        assert_eq!(host.unmount_current(), 0);
        assert!(container.is_empty());
        assert!(host.current().is_none());
    }

    #[test]
    fn failed_show_records_nothing() {
        let env = Environment::new();
        let container = MemoryContainer::new();
        let mut host = ViewHost::new(Rc::new(container.clone()), env.clone());

        host.show(Box::new(Listening("first")), &RouteParams::for_path("/a")).unwrap();
        let err = host.show(Box::new(Broken), &RouteParams::for_path("/b")).unwrap_err();
        assert!(matches!(err, ViewError::Render(ref m) if m == "broken"));

        assert!(host.current().is_none());
        assert_eq!(host.current_path(), None);
        assert_eq!(host.navigations(), 1);
        assert_eq!(env.document.listener_count(), 0);
        assert_eq!(env.timers.pending_count(), 0);
        assert!(container.is_empty());
    }
}
