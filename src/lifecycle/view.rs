//! The view contract and the instance wrapper that enforces it.
//!
//! A [`View`] only renders and wires up input. [`ViewInstance`] owns the
//! ordering guarantees: prior content is replaced on mount, every listener and
//! timer is released through the instance's [`CleanupRegistry`] on unmount,
//! and the container is cleared and released last.

use std::cell::Cell;
use std::fmt;
use std::rc::Rc;

use tracing::debug;

use crate::error::{LifecycleError, ViewError};
use crate::lifecycle::cleanup::CleanupRegistry;
use crate::lifecycle::container::Container;
use crate::lifecycle::events::{Environment, EventType, ListenerId, TimerId, UiEvent};
use crate::navigation::RouteParams;
use crate::views::ViewKind;

/// Write access to the container for the duration of one mount.
///
/// Clones may outlive the mount (a listener's captured state, say); once the
/// instance unmounts, every clone refuses to render.
#[derive(Clone)]
pub struct Surface {
    container: Rc<dyn Container>,
    live: Rc<Cell<bool>>,
    view: String,
}

impl Surface {
    pub fn render(&self, markup: String) -> Result<(), LifecycleError> {
        if !self.live.get() {
            return Err(LifecycleError::NotMounted {
                view: self.view.clone(),
                op: "render",
            });
        }
        self.container.replace_content(markup);
        Ok(())
    }

    pub fn is_live(&self) -> bool {
        self.live.get()
    }

    /// A live surface not tied to any instance.
    #[cfg(test)]
    pub(crate) fn detached(container: Rc<dyn Container>, view: &str) -> Self {
        Self {
            container,
            live: Rc::new(Cell::new(true)),
            view: view.to_string(),
        }
    }
}

impl fmt::Debug for Surface {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Surface")
            .field("view", &self.view)
            .field("live", &self.live.get())
            .finish()
    }
}

/// What a view gets to work with while mounting.
pub struct MountScope<'a> {
    surface: Surface,
    cleanup: CleanupRegistry,
    env: &'a Environment,
}

impl<'a> MountScope<'a> {
    /// A handle for re-rendering after `mount` returns.
    pub fn surface(&self) -> Surface {
        self.surface.clone()
    }

    pub fn render(&self, markup: String) -> Result<(), LifecycleError> {
        self.surface.render(markup)
    }

    pub fn cleanup(&self) -> &CleanupRegistry {
        &self.cleanup
    }

    pub fn env(&self) -> &Environment {
        self.env
    }

    /// Listen on the shared document target for the lifetime of the mount.
    pub fn listen(&self, event_type: EventType, listener: impl Fn(&UiEvent) + 'static) -> ListenerId {
        self.cleanup.listen(&self.env.document, event_type, listener)
    }

    pub fn set_timeout(&self, delay_ms: u64, callback: impl FnOnce() + 'static) -> TimerId {
        self.cleanup.set_timeout(&self.env.timers, delay_ms, callback)
    }
}

/// A pluggable unit of page content.
pub trait View {
    fn kind(&self) -> ViewKind;

    /// Render into the scope's container and register input handling.
    ///
    /// Anything that outlives this call must be registered with
    /// `scope.cleanup()`.
    fn mount(&mut self, scope: &MountScope<'_>, params: &RouteParams) -> Result<(), ViewError>;

    /// Called after cleanup actions ran, before the container is cleared.
    fn unmounted(&mut self) {}
}

/// A view plus its lifecycle state.
///
/// `Unmounted -> Mounted -> Unmounted`, any number of times. Unmounting an
/// unmounted instance does nothing; mounting a mounted one unmounts first.
pub struct ViewInstance {
    view: Box<dyn View>,
    env: Environment,
    cleanup: CleanupRegistry,
    container: Option<Rc<dyn Container>>,
    live: Rc<Cell<bool>>,
    mount_count: u32,
}

impl ViewInstance {
    pub fn new(view: Box<dyn View>, env: Environment) -> Self {
        ViewInstance {
            view,
            env,
            cleanup: CleanupRegistry::new(),
            container: None,
            live: Rc::new(Cell::new(false)),
            mount_count: 0,
        }
    }

    pub fn kind(&self) -> ViewKind {
        self.view.kind()
    }

    pub fn is_mounted(&self) -> bool {
        self.container.is_some()
    }

    pub fn mount_count(&self) -> u32 {
        self.mount_count
    }

    /// Mount into `container`, replacing whatever it held.
    ///
    /// If the view fails to render, everything it registered is torn down
    /// again before the error is returned.
    pub fn mount(&mut self, container: Rc<dyn Container>, params: &RouteParams) -> Result<(), ViewError> {
        if self.is_mounted() {
            debug!(view = %self.view.kind(), "mount on a mounted view, unmounting first");
            self.unmount();
        }

        container.replace_content(String::new());
        self.container = Some(Rc::clone(&container));
        // Fresh flag per mount so surfaces from an earlier mount stay dead.
        self.live = Rc::new(Cell::new(true));
        let scope = MountScope {
            surface: Surface {
                container,
                live: Rc::clone(&self.live),
                view: self.view.kind().to_string(),
            },
            cleanup: self.cleanup.clone(),
            env: &self.env,
        };
        if let Err(err) = self.view.mount(&scope, params) {
            drop(scope);
            self.unmount();
            return Err(err);
        }

        self.mount_count += 1;
        debug!(view = %self.view.kind(), cleanups = self.cleanup.len(), "view mounted");
        Ok(())
    }

    /// Run cleanup actions in order, clear the container, release it.
    /// Returns how many cleanup actions ran.
    ///
    /// Surfaces handed out by this mount stop rendering before any cleanup
    /// action runs.
    pub fn unmount(&mut self) -> usize {
        if !self.is_mounted() {
            return 0;
        }
        self.live.set(false);
        let ran = self.cleanup.run_all();
        self.view.unmounted();
        if let Some(container) = self.container.take() {
            container.clear();
        }
        debug!(view = %self.view.kind(), cleanups = ran, "view unmounted");
        ran
    }

    /// The registry of a mounted instance.
    pub fn registry(&self) -> Result<&CleanupRegistry, LifecycleError> {
        if self.is_mounted() {
            Ok(&self.cleanup)
        } else {
            Err(self.not_mounted("registry"))
        }
    }

    pub fn container(&self) -> Result<Rc<dyn Container>, LifecycleError> {
        self.container
            .as_ref()
            .map(Rc::clone)
            .ok_or_else(|| self.not_mounted("container"))
    }

    pub fn pending_cleanups(&self) -> usize {
        self.cleanup.len()
    }

    fn not_mounted(&self, op: &'static str) -> LifecycleError {
        LifecycleError::NotMounted {
            view: self.view.kind().to_string(),
            op,
        }
    }
}

impl Drop for ViewInstance {
    fn drop(&mut self) {
        self.unmount();
    }
}

impl fmt::Debug for ViewInstance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ViewInstance")
            .field("kind", &self.view.kind())
            .field("mounted", &self.is_mounted())
            .field("pending_cleanups", &self.cleanup.len())
            .finish()
    }
}
