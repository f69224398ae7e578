use crate::error::ViewError;
use crate::lifecycle::view::{MountScope, View};
use crate::navigation::RouteParams;
use crate::render;
use crate::views::ViewKind;

/// Shown for unmatched paths, and for matched paths whose kind or topic does
/// not exist.
#[derive(Debug, Clone)]
pub struct NotFoundView {
    path: String,
}

impl NotFoundView {
    pub fn new(path: impl Into<String>) -> Self {
        NotFoundView { path: path.into() }
    }
}

impl View for NotFoundView {
    fn kind(&self) -> ViewKind {
        ViewKind::NotFound { path: self.path.clone() }
    }

    fn mount(&mut self, scope: &MountScope<'_>, _params: &RouteParams) -> Result<(), ViewError> {
        scope.render(render::not_found(&self.path))?;
        Ok(())
    }
}
