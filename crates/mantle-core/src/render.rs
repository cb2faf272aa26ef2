use crate::element::{InstanceId, Structure};
use crate::error::RenderError;
use crate::generation::Generation;
use futures::future::LocalBoxFuture;

/// Compiles a textual diagram description into a structural tree.
///
/// Rendering is asynchronous and may be slow; the overlay waits for it before inspecting the
/// structure. Layout and syntax validation are entirely the renderer's business.
pub trait DiagramRenderer {
    fn render<'a>(
        &'a self,
        diagram_id: &'a str,
        chart: &'a str,
    ) -> LocalBoxFuture<'a, Result<Structure, RenderError>>;
}

impl<R: DiagramRenderer + ?Sized> DiagramRenderer for &R {
    fn render<'a>(
        &'a self,
        diagram_id: &'a str,
        chart: &'a str,
    ) -> LocalBoxFuture<'a, Result<Structure, RenderError>> {
        (**self).render(diagram_id, chart)
    }
}

/// A render request tagged with its generation.
///
/// Obtained from [`crate::DiagramInstance::request`] and handed back, together with the render
/// result, to [`crate::DiagramInstance::apply`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderTicket {
    pub instance: InstanceId,
    pub generation: Generation,
    pub diagram_id: String,
    pub chart: String,
}

impl RenderTicket {
    pub async fn run<R: DiagramRenderer + ?Sized>(
        &self,
        renderer: &R,
    ) -> Result<Structure, RenderError> {
        renderer.render(&self.diagram_id, &self.chart).await
    }
}
