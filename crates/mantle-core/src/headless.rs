use crate::element::{Diagram, ElementId, InstanceId};
use crate::error::WidgetError;
use crate::modal::ModalContent;
use crate::page::{ListenerId, Page, TooltipHandle, TooltipSpec};
use indexmap::IndexMap;
use rustc_hash::{FxHashMap, FxHashSet};

/// Overlay-visible state of one mounted element.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ElementState {
    pub attributes: IndexMap<String, String>,
    pub title: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LiveTooltip {
    pub element: ElementId,
    pub spec: TooltipSpec,
}

#[derive(Debug, Clone, PartialEq)]
pub enum InstanceView {
    Structure(Diagram),
    Placeholder(String),
}

/// In-memory [`Page`]: records every overlay side effect for inspection.
///
/// Used for tests and for static export, where the recorded marks are written back into the
/// renderer's markup.
#[derive(Debug, Default)]
pub struct HeadlessPage {
    views: FxHashMap<InstanceId, InstanceView>,
    elements: FxHashMap<ElementId, ElementState>,
    detached: FxHashSet<ElementId>,
    tooltips: IndexMap<TooltipHandle, LiveTooltip>,
    next_tooltip: u64,
    modal: Option<ModalContent>,
    modal_shows: usize,
    escape_listeners: Vec<ListenerId>,
    next_listener: u64,
}

impl HeadlessPage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn view(&self, instance: InstanceId) -> Option<&InstanceView> {
        self.views.get(&instance)
    }

    pub fn placeholder(&self, instance: InstanceId) -> Option<&str> {
        match self.views.get(&instance)? {
            InstanceView::Placeholder(message) => Some(message.as_str()),
            InstanceView::Structure(_) => None,
        }
    }

    pub fn element(&self, element: ElementId) -> Option<&ElementState> {
        self.elements.get(&element)
    }

    pub fn attribute(&self, element: ElementId, name: &str) -> Option<&str> {
        self.elements
            .get(&element)?
            .attributes
            .get(name)
            .map(String::as_str)
    }

    pub fn native_title(&self, element: ElementId) -> Option<&str> {
        self.elements.get(&element)?.title.as_deref()
    }

    pub fn live_tooltips(&self) -> usize {
        self.tooltips.len()
    }

    pub fn tooltips(&self) -> impl Iterator<Item = &LiveTooltip> {
        self.tooltips.values()
    }

    pub fn tooltips_for(&self, element: ElementId) -> Vec<&LiveTooltip> {
        self.tooltips
            .values()
            .filter(|t| t.element == element)
            .collect()
    }

    pub fn tooltips_of(&self, instance: InstanceId) -> usize {
        self.tooltips
            .values()
            .filter(|t| t.element.instance == instance)
            .count()
    }

    pub fn modal(&self) -> Option<&ModalContent> {
        self.modal.as_ref()
    }

    /// Number of times modal content was (re)shown.
    pub fn modal_shows(&self) -> usize {
        self.modal_shows
    }

    pub fn escape_listeners(&self) -> usize {
        self.escape_listeners.len()
    }

    /// Detaches one element out from under the overlay, as a concurrent DOM change would.
    pub fn detach_element(&mut self, element: ElementId) {
        if self.elements.remove(&element).is_some() {
            self.detached.insert(element);
        }
    }

    fn state_mut(&mut self, element: ElementId) -> Result<&mut ElementState, WidgetError> {
        self.elements
            .get_mut(&element)
            .ok_or(WidgetError::Detached { element })
    }

    fn drop_instance_elements(&mut self, instance: InstanceId) {
        self.elements.retain(|id, _| id.instance != instance);
        self.detached.retain(|id| id.instance != instance);
    }
}

impl Page for HeadlessPage {
    fn mount_structure(&mut self, diagram: &Diagram) {
        let instance = diagram.instance();
        self.drop_instance_elements(instance);
        for el in diagram.elements() {
            self.elements.insert(el.id, ElementState::default());
        }
        self.views
            .insert(instance, InstanceView::Structure(diagram.clone()));
    }

    fn unmount_structure(&mut self, instance: InstanceId) {
        self.drop_instance_elements(instance);
        self.views.remove(&instance);
    }

    fn show_placeholder(&mut self, instance: InstanceId, message: &str) {
        self.drop_instance_elements(instance);
        self.views
            .insert(instance, InstanceView::Placeholder(message.to_string()));
    }

    fn set_attribute(
        &mut self,
        element: ElementId,
        name: &str,
        value: &str,
    ) -> Result<(), WidgetError> {
        self.state_mut(element)?
            .attributes
            .insert(name.to_string(), value.to_string());
        Ok(())
    }

    fn remove_attribute(&mut self, element: ElementId, name: &str) -> Result<(), WidgetError> {
        self.state_mut(element)?.attributes.shift_remove(name);
        Ok(())
    }

    fn set_native_title(&mut self, element: ElementId, text: &str) -> Result<(), WidgetError> {
        self.state_mut(element)?.title = Some(text.to_string());
        Ok(())
    }

    fn create_tooltip(
        &mut self,
        element: ElementId,
        spec: &TooltipSpec,
    ) -> Result<TooltipHandle, WidgetError> {
        if !self.elements.contains_key(&element) {
            return Err(WidgetError::Detached { element });
        }
        self.next_tooltip += 1;
        let handle = TooltipHandle(self.next_tooltip);
        self.tooltips.insert(
            handle,
            LiveTooltip {
                element,
                spec: spec.clone(),
            },
        );
        Ok(handle)
    }

    fn destroy_tooltip(&mut self, handle: TooltipHandle) -> Result<(), WidgetError> {
        let Some(tooltip) = self.tooltips.shift_remove(&handle) else {
            return Err(WidgetError::UnknownTooltip { handle });
        };
        // The widget is gone either way; report the detached target.
        if self.detached.contains(&tooltip.element) {
            return Err(WidgetError::Detached {
                element: tooltip.element,
            });
        }
        Ok(())
    }

    fn show_modal(&mut self, content: &ModalContent) {
        self.modal = Some(content.clone());
        self.modal_shows += 1;
    }

    fn hide_modal(&mut self) {
        self.modal = None;
    }

    fn add_escape_listener(&mut self) -> ListenerId {
        self.next_listener += 1;
        let id = ListenerId(self.next_listener);
        self.escape_listeners.push(id);
        id
    }

    fn remove_escape_listener(&mut self, id: ListenerId) {
        self.escape_listeners.retain(|l| *l != id);
    }
}
