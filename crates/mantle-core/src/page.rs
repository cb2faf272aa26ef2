use crate::element::{Diagram, ElementId, InstanceId};
use crate::error::WidgetError;
use crate::modal::ModalContent;
use std::fmt;
use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TooltipHandle(pub u64);

impl fmt::Display for TooltipHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "tooltip-{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ListenerId(pub u64);

/// Floating hover widget, as handed to the host.
///
/// Widgets live in the page-level overlay layer (never clipped by the diagram container),
/// appear after `delay_in`, vanish after `delay_out` and ignore outside clicks when
/// `hide_on_click` is false.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TooltipSpec {
    pub content: String,
    pub delay_in: Duration,
    pub delay_out: Duration,
    pub theme: String,
    pub hide_on_click: bool,
}

/// Host surface the overlay writes to.
///
/// In a browser this is the DOM: the diagram subtree, a page-level layer for floating widgets
/// and the window's key listeners. [`crate::HeadlessPage`] implements it in memory.
///
/// Every method is purely additive with respect to diagram geometry.
pub trait Page {
    /// Inserts a freshly rendered structure, replacing whatever the instance showed before.
    fn mount_structure(&mut self, diagram: &Diagram);

    /// Removes the instance's structure (or placeholder). Elements of it become detached.
    fn unmount_structure(&mut self, instance: InstanceId);

    /// Shows an inert textual placeholder instead of a structure.
    fn show_placeholder(&mut self, instance: InstanceId, message: &str);

    fn set_attribute(
        &mut self,
        element: ElementId,
        name: &str,
        value: &str,
    ) -> Result<(), WidgetError>;

    fn remove_attribute(&mut self, element: ElementId, name: &str) -> Result<(), WidgetError>;

    /// Sets the element's native `<title>` text, replacing an existing one.
    fn set_native_title(&mut self, element: ElementId, text: &str) -> Result<(), WidgetError>;

    fn create_tooltip(
        &mut self,
        element: ElementId,
        spec: &TooltipSpec,
    ) -> Result<TooltipHandle, WidgetError>;

    fn destroy_tooltip(&mut self, handle: TooltipHandle) -> Result<(), WidgetError>;

    /// Shows the modal overlay, or replaces its content in place when already shown.
    fn show_modal(&mut self, content: &ModalContent);

    fn hide_modal(&mut self);

    /// Installs a window-level `Escape` listener. The host routes matching key events to
    /// [`crate::ModalStore::handle`].
    fn add_escape_listener(&mut self) -> ListenerId;

    fn remove_escape_listener(&mut self, id: ListenerId);
}
