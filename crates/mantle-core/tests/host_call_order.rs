use futures::executor::block_on;
use futures::future::LocalBoxFuture;
use mantle_core::{
    Annotations, Applied, Diagram, DiagramEvent, DiagramInstance, DiagramRenderer, ElementId,
    Geometry, HeadlessPage, InstanceId, ListenerId, ModalContent, ModalEvent, ModalStore, Page,
    RenderError, ShapeElement, Structure, TooltipHandle, TooltipSpec, Transition, WidgetError,
};
use std::sync::Arc;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Call {
    Mount,
    Unmount,
    Placeholder,
    Create,
    Destroy,
    ShowModal,
    HideModal,
}

/// Forwards to a [`HeadlessPage`] and logs the structural and widget calls in order.
#[derive(Default)]
struct LoggingHost {
    inner: HeadlessPage,
    calls: Vec<Call>,
}

impl LoggingHost {
    fn take(&mut self) -> Vec<Call> {
        std::mem::take(&mut self.calls)
    }
}

impl Page for LoggingHost {
    fn mount_structure(&mut self, diagram: &Diagram) {
        self.calls.push(Call::Mount);
        self.inner.mount_structure(diagram);
    }

    fn unmount_structure(&mut self, instance: InstanceId) {
        self.calls.push(Call::Unmount);
        self.inner.unmount_structure(instance);
    }

    fn show_placeholder(&mut self, instance: InstanceId, message: &str) {
        self.calls.push(Call::Placeholder);
        self.inner.show_placeholder(instance, message);
    }

    fn set_attribute(
        &mut self,
        element: ElementId,
        name: &str,
        value: &str,
    ) -> Result<(), WidgetError> {
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
        self.calls.push(Call::Create);
        self.inner.create_tooltip(element, spec)
    }

    fn destroy_tooltip(&mut self, handle: TooltipHandle) -> Result<(), WidgetError> {
        self.calls.push(Call::Destroy);
        self.inner.destroy_tooltip(handle)
    }

    fn show_modal(&mut self, content: &ModalContent) {
        self.calls.push(Call::ShowModal);
        self.inner.show_modal(content);
    }

    fn hide_modal(&mut self) {
        self.calls.push(Call::HideModal);
        self.inner.hide_modal();
    }

    fn add_escape_listener(&mut self) -> ListenerId {
        self.inner.add_escape_listener()
    }

    fn remove_escape_listener(&mut self, id: ListenerId) {
        self.inner.remove_escape_listener(id);
    }
}

/// Renders `a,b,c` as one labeled node per comma-separated token; `!msg` fails.
struct CsvRenderer;

impl DiagramRenderer for CsvRenderer {
    fn render<'a>(
        &'a self,
        _diagram_id: &'a str,
        chart: &'a str,
    ) -> LocalBoxFuture<'a, Result<Structure, RenderError>> {
        Box::pin(async move {
            if let Some(message) = chart.strip_prefix('!') {
                return Err(RenderError::backend(message));
            }
            Ok(Structure::new(
                chart
                    .split(',')
                    .map(|label| ShapeElement::node(label, Geometry::default()))
                    .collect(),
            ))
        })
    }
}

fn instance(id: u32, modal: &ModalStore) -> DiagramInstance {
    DiagramInstance::new(InstanceId(id), &format!("chart {id}"), modal.clone()).with_annotations(
        Arc::new(Annotations::new().with_description("Plan", "Break the task into steps.")),
    )
}

#[test]
fn rerender_destroys_every_tooltip_before_mounting() {
    let modal = ModalStore::new();
    let mut host = LoggingHost::default();
    let mut inst = instance(1, &modal);

    block_on(inst.render(&mut host, &CsvRenderer, "Plan,Act"));
    assert_eq!(
        host.take(),
        [Call::Unmount, Call::Mount, Call::Create, Call::Create]
    );

    block_on(inst.render(&mut host, &CsvRenderer, "Plan,Act,Check"));
    assert_eq!(
        host.take(),
        [
            Call::Destroy,
            Call::Destroy,
            Call::Unmount,
            Call::Mount,
            Call::Create,
            Call::Create,
            Call::Create,
        ]
    );
    assert_eq!(host.inner.live_tooltips(), 3);
}

#[test]
fn failed_render_tears_down_before_showing_the_placeholder() {
    let modal = ModalStore::new();
    let mut host = LoggingHost::default();
    let mut inst = instance(1, &modal);
    block_on(inst.render(&mut host, &CsvRenderer, "Plan"));
    host.take();

    let applied = block_on(inst.render(&mut host, &CsvRenderer, "!Lexical error on line 1"));
    assert!(matches!(applied, Applied::Failed(_)));
    assert_eq!(
        host.take(),
        [Call::Destroy, Call::Unmount, Call::Placeholder]
    );
    assert_eq!(
        host.inner.placeholder(inst.id()),
        Some("Mermaid error: Lexical error on line 1")
    );
    assert!(inst.mounted().is_none());
}

#[test]
fn shared_modal_outlives_the_instance_that_opened_it() {
    let modal = ModalStore::new();
    let mut host = LoggingHost::default();
    let mut first = instance(1, &modal);
    let mut second = instance(2, &modal);
    block_on(first.render(&mut host, &CsvRenderer, "Plan"));
    block_on(second.render(&mut host, &CsvRenderer, "Plan,Act"));

    let plan = first.mounted().unwrap().elements()[0].id;
    assert_eq!(
        first.handle_event(&mut host, &DiagramEvent::Click { target: plan }),
        Transition::Opened
    );
    host.take();

    first.unmount(&mut host);
    assert!(!host.take().contains(&Call::HideModal));
    assert!(modal.is_open());
    assert_eq!(host.inner.tooltips_of(first.id()), 0);
    assert_eq!(host.inner.tooltips_of(second.id()), 2);

    assert_eq!(modal.handle(&mut host, ModalEvent::Backdrop), Transition::Closed);
    assert_eq!(host.take(), [Call::HideModal]);
    assert_eq!(host.inner.escape_listeners(), 0);
}
