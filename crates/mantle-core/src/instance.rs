use crate::annotations::Annotations;
use crate::config::OverlayConfig;
use crate::element::{Diagram, InstanceId, Structure};
use crate::error::RenderError;
use crate::generation::{Generation, GenerationScope};
use crate::interaction::{DiagramEvent, InteractionController};
use crate::label::resolve_label;
use crate::modal::{ModalStore, Transition};
use crate::page::Page;
use crate::render::{DiagramRenderer, RenderTicket};
use crate::tooltip::TooltipManager;
use std::sync::Arc;

/// Outcome of one attach pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AttachReport {
    pub generation: Generation,
    pub pass: u32,
    /// Elements with a resolved label.
    pub labeled: usize,
    /// Elements without a label (not annotated).
    pub skipped: usize,
    pub tooltips: usize,
    pub activatable: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Applied {
    Attached(AttachReport),
    /// The renderer failed; a placeholder is shown and nothing was attached.
    Failed(RenderError),
    /// A newer request exists (or the instance was unmounted); the result was discarded
    /// without side effects.
    Superseded,
}

/// One diagram on the page, driven through render generations.
///
/// Each [`DiagramInstance::request`] opens a new generation. Results are applied with
/// [`DiagramInstance::apply`], which discards anything but the most recent request. Applying a
/// result first releases every overlay artifact of the previous pass, then mounts the new
/// structure and runs the attach pass.
#[derive(Debug)]
pub struct DiagramInstance {
    id: InstanceId,
    diagram_id: String,
    config: Arc<OverlayConfig>,
    annotations: Arc<Annotations>,
    modal: ModalStore,
    tooltips: TooltipManager,
    interaction: InteractionController,
    latest: Generation,
    pending: Option<Generation>,
    mounted: Option<Diagram>,
    scope: Option<GenerationScope>,
    pass: u32,
}

impl DiagramInstance {
    pub fn new(id: InstanceId, name: &str, modal: ModalStore) -> Self {
        Self::with_config(id, name, modal, Arc::new(OverlayConfig::default()))
    }

    pub fn with_config(
        id: InstanceId,
        name: &str,
        modal: ModalStore,
        config: Arc<OverlayConfig>,
    ) -> Self {
        Self {
            id,
            diagram_id: format!("{}-{}", sanitize_diagram_id(name), id.0),
            tooltips: TooltipManager::new(config.tooltip.clone()),
            interaction: InteractionController::new(config.aria_label_prefix.clone()),
            config,
            annotations: Arc::new(Annotations::default()),
            modal,
            latest: Generation::INITIAL,
            pending: None,
            mounted: None,
            scope: None,
            pass: 0,
        }
    }

    pub fn with_annotations(mut self, annotations: Arc<Annotations>) -> Self {
        self.annotations = annotations;
        self
    }

    pub fn id(&self) -> InstanceId {
        self.id
    }

    pub fn diagram_id(&self) -> &str {
        &self.diagram_id
    }

    pub fn annotations(&self) -> &Arc<Annotations> {
        &self.annotations
    }

    pub fn modal(&self) -> &ModalStore {
        &self.modal
    }

    pub fn mounted(&self) -> Option<&Diagram> {
        self.mounted.as_ref()
    }

    pub fn scope(&self) -> Option<&GenerationScope> {
        self.scope.as_ref()
    }

    pub fn latest_generation(&self) -> Generation {
        self.latest
    }

    /// Opens a new render generation for `chart`, superseding any in-flight request.
    pub fn request(&mut self, chart: &str) -> RenderTicket {
        self.latest = self.latest.next();
        self.pending = Some(self.latest);
        tracing::trace!(instance = %self.id, generation = %self.latest, "render requested");
        RenderTicket {
            instance: self.id,
            generation: self.latest,
            diagram_id: self.diagram_id.clone(),
            chart: chart.to_string(),
        }
    }

    /// Applies a render result if `ticket` is the live request.
    pub fn apply(
        &mut self,
        page: &mut dyn Page,
        ticket: &RenderTicket,
        result: Result<Structure, RenderError>,
    ) -> Applied {
        if ticket.instance != self.id || self.pending != Some(ticket.generation) {
            tracing::debug!(
                instance = %self.id,
                generation = %ticket.generation,
                latest = %self.latest,
                "discarding superseded render"
            );
            return Applied::Superseded;
        }
        self.pending = None;
        self.teardown(page);

        match result {
            Ok(structure) => {
                let diagram = Diagram::from_structure(self.id, ticket.generation, structure);
                page.mount_structure(&diagram);
                self.mounted = Some(diagram);
                Applied::Attached(self.attach(page))
            }
            Err(err) => {
                tracing::debug!(instance = %self.id, error = %err, "render failed");
                let message = format!("{}{err}", self.config.placeholder_prefix);
                page.show_placeholder(self.id, &message);
                Applied::Failed(err)
            }
        }
    }

    /// Requests, renders and applies `chart` in one go.
    pub async fn render<R: DiagramRenderer + ?Sized>(
        &mut self,
        page: &mut dyn Page,
        renderer: &R,
        chart: &str,
    ) -> Applied {
        let ticket = self.request(chart);
        let result = ticket.run(renderer).await;
        self.apply(page, &ticket, result)
    }

    /// Swaps the annotation maps and re-runs the attach pass over the mounted structure.
    ///
    /// Returns `None` when nothing is mounted; the new maps apply to the next render.
    pub fn set_annotations(
        &mut self,
        page: &mut dyn Page,
        annotations: Arc<Annotations>,
    ) -> Option<AttachReport> {
        self.annotations = annotations;
        self.mounted.as_ref()?;
        self.release_scope(page);
        Some(self.attach(page))
    }

    /// Routes a click or key press on one of this instance's elements.
    pub fn handle_event(&self, page: &mut dyn Page, event: &DiagramEvent) -> Transition {
        let Some(scope) = self.scope.as_ref() else {
            return Transition::Ignored;
        };
        let Some(content) = self
            .interaction
            .activation(scope, &self.annotations, event)
        else {
            return Transition::Ignored;
        };
        self.modal.open(page, content)
    }

    /// Releases every artifact and removes the structure. In-flight renders are discarded
    /// when they resolve.
    pub fn unmount(&mut self, page: &mut dyn Page) {
        self.pending = None;
        self.teardown(page);
    }

    fn release_scope(&mut self, page: &mut dyn Page) {
        let Some(mut scope) = self.scope.take() else {
            return;
        };
        let released = self.tooltips.release(page, &mut scope);
        scope.clear_activatable();
        tracing::trace!(
            instance = %self.id,
            generation = %scope.generation(),
            pass = scope.pass(),
            released,
            "released overlay scope"
        );
    }

    fn teardown(&mut self, page: &mut dyn Page) {
        self.release_scope(page);
        self.mounted = None;
        page.unmount_structure(self.id);
    }

    fn attach(&mut self, page: &mut dyn Page) -> AttachReport {
        let Some(diagram) = self.mounted.as_ref() else {
            return AttachReport::default();
        };
        self.pass = self.pass.wrapping_add(1);
        let mut scope = GenerationScope::new(diagram.generation(), self.pass);
        let mut report = AttachReport {
            generation: diagram.generation(),
            pass: self.pass,
            ..AttachReport::default()
        };

        for element in diagram.elements() {
            let Some(label) = resolve_label(element) else {
                report.skipped += 1;
                continue;
            };
            let label = label.as_str();
            let tooltip = self.annotations.tooltip(label);
            report.labeled += 1;
            if self
                .tooltips
                .attach(page, &mut scope, element.id, tooltip)
                .is_some()
            {
                report.tooltips += 1;
            }
            if self.interaction.mark(
                page,
                &mut scope,
                element.id,
                label,
                tooltip,
                &self.annotations,
            ) {
                report.activatable += 1;
            }
        }

        tracing::debug!(
            instance = %self.id,
            generation = %report.generation,
            pass = report.pass,
            labeled = report.labeled,
            activatable = report.activatable,
            "overlay attached"
        );
        self.scope = Some(scope);
        report
    }
}

/// Converts an arbitrary string into a conservative id token (`m-` prefixed).
///
/// Instances append their [`InstanceId`] to it, so several diagrams with the same name inlined
/// into one page never share internal ids.
pub fn sanitize_diagram_id(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len() + 2);
    out.push_str("m-");
    for ch in raw.trim().chars() {
        let ok = ch.is_ascii_alphanumeric() || ch == '-' || ch == '_';
        out.push(if ok { ch } else { '-' });
    }

    while out.contains("--") {
        out = out.replace("--", "-");
    }
    let out = out.trim_end_matches('-');
    if out == "m" {
        return "m-untitled".to_string();
    }
    out.to_string()
}
