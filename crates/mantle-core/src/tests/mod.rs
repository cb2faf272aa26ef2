mod modal;
mod tooltip;

use crate::*;
use std::result::Result;

fn element(kind: ElementKind, text: &str, geometry: Geometry) -> DiagramElement {
    DiagramElement {
        id: ElementId {
            instance: InstanceId(1),
            generation: Generation::INITIAL.next(),
            index: 0,
        },
        kind,
        text: text.to_string(),
        geometry,
        anchor: None,
    }
}

fn mounted(structure: Structure) -> (HeadlessPage, Diagram) {
    let mut page = HeadlessPage::new();
    let diagram = Diagram::from_structure(InstanceId(1), Generation::INITIAL.next(), structure);
    page.mount_structure(&diagram);
    (page, diagram)
}

/// Delegating host with hooks: modal callbacks read (and optionally close) the store, and one
/// attribute name can be made to fail.
#[derive(Default)]
struct HookedHost {
    inner: HeadlessPage,
    store: ModalStore,
    close_on_show: bool,
    fail_attribute: Option<&'static str>,
    open_seen_on_show: Vec<bool>,
    open_seen_on_hide: Vec<bool>,
}

impl Page for HookedHost {
    fn mount_structure(&mut self, diagram: &Diagram) {
        self.inner.mount_structure(diagram);
    }

    fn unmount_structure(&mut self, instance: InstanceId) {
        self.inner.unmount_structure(instance);
    }

    fn show_placeholder(&mut self, instance: InstanceId, message: &str) {
        self.inner.show_placeholder(instance, message);
    }

    fn set_attribute(
        &mut self,
        element: ElementId,
        name: &str,
        value: &str,
    ) -> Result<(), WidgetError> {
        if self.fail_attribute == Some(name) {
            return Err(WidgetError::Detached { element });
        }
        self.inner.set_attribute(element, name, value)
    }

    fn remove_attribute(&mut self, element: ElementId, name: &str) -> Result<(), WidgetError> {
        self.inner.remove_attribute(element, name)
    }

    fn set_native_title(&mut self, element: ElementId, text: &str) -> Result<(), WidgetError> {
        self.inner.set_native_title(element, text)
    }

    fn create_tooltip(
        &mut self,
        element: ElementId,
        spec: &TooltipSpec,
    ) -> Result<TooltipHandle, WidgetError> {
        self.inner.create_tooltip(element, spec)
    }

    fn destroy_tooltip(&mut self, handle: TooltipHandle) -> Result<(), WidgetError> {
        self.inner.destroy_tooltip(handle)
    }

    fn show_modal(&mut self, content: &ModalContent) {
        self.inner.show_modal(content);
        self.open_seen_on_show.push(self.store.is_open());
        if self.close_on_show {
            let store = self.store.clone();
            store.handle(self, ModalEvent::CloseButton);
        }
    }

    fn hide_modal(&mut self) {
        self.inner.hide_modal();
        self.open_seen_on_hide.push(self.store.is_open());
    }

    fn add_escape_listener(&mut self) -> ListenerId {
        self.inner.add_escape_listener()
    }

    fn remove_escape_listener(&mut self, id: ListenerId) {
        self.inner.remove_escape_listener(id);
    }
}
