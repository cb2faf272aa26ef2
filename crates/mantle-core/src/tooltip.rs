use crate::config::TooltipOptions;
use crate::element::ElementId;
use crate::generation::GenerationScope;
use crate::page::{Page, TooltipHandle};

/// Creates and destroys hover widgets, one set per attach pass.
#[derive(Debug, Clone, Default)]
pub struct TooltipManager {
    options: TooltipOptions,
}

impl TooltipManager {
    pub fn new(options: TooltipOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &TooltipOptions {
        &self.options
    }

    /// Creates the tooltip for `element` and records it in `scope`.
    ///
    /// Empty content creates nothing. An element that already has a tooltip in this scope keeps
    /// it. Host failures are swallowed.
    pub fn attach(
        &self,
        page: &mut dyn Page,
        scope: &mut GenerationScope,
        element: ElementId,
        content: &str,
    ) -> Option<TooltipHandle> {
        if content.is_empty() {
            return None;
        }
        if let Some(existing) = scope.tooltip_for(element) {
            tracing::trace!(%element, %existing, "tooltip already attached");
            return Some(existing);
        }
        match page.create_tooltip(element, &self.options.spec(content)) {
            Ok(handle) => {
                scope.insert_tooltip(element, handle);
                Some(handle)
            }
            Err(err) => {
                tracing::debug!(%element, error = %err, "tooltip create failed");
                None
            }
        }
    }

    /// Destroys every tooltip recorded in `scope`, unconditionally.
    ///
    /// Returns the number of handles released. A failed destroy (target already detached) still
    /// counts: the handle is dropped from the scope either way.
    pub fn release(&self, page: &mut dyn Page, scope: &mut GenerationScope) -> usize {
        let handles = scope.take_tooltips();
        let released = handles.len();
        for (element, handle) in handles {
            if let Err(err) = page.destroy_tooltip(handle) {
                tracing::debug!(%element, %handle, error = %err, "tooltip destroy failed");
            }
        }
        released
    }
}
