use crate::extract::extract_structure;
use futures::future::LocalBoxFuture;
use mantle_core::config::default_site_config;
use mantle_core::{DiagramRenderer, RenderError, Structure};
use serde_json::Value;
use std::fmt;

/// Input handed to an [`SvgBackend`].
#[derive(Debug, Clone, Copy)]
pub struct SvgRequest<'a> {
    /// Sanitized, page-unique id; backends should use it as the `<svg>` id.
    pub diagram_id: &'a str,
    pub chart: &'a str,
    pub site_config: &'a Value,
}

/// Anything that turns diagram text into SVG markup.
pub trait SvgBackend {
    type Error: fmt::Display;

    fn render_svg(&self, request: &SvgRequest<'_>) -> Result<String, Self::Error>;
}

impl<F, E> SvgBackend for F
where
    F: Fn(&SvgRequest<'_>) -> Result<String, E>,
    E: fmt::Display,
{
    type Error = E;

    fn render_svg(&self, request: &SvgRequest<'_>) -> Result<String, E> {
        self(request)
    }
}

/// [`DiagramRenderer`] over an SVG backend: renders, then extracts the structure.
///
/// Backend errors surface as [`RenderError::Backend`] with the backend's message; SVG that
/// cannot be read becomes [`RenderError::InvalidMarkup`].
#[derive(Debug, Clone)]
pub struct SvgRenderer<B> {
    backend: B,
    site_config: Value,
}

impl<B: SvgBackend> SvgRenderer<B> {
    pub fn new(backend: B) -> Self {
        Self {
            backend,
            site_config: default_site_config(),
        }
    }

    pub fn with_site_config(mut self, site_config: Value) -> Self {
        self.site_config = site_config;
        self
    }

    pub fn site_config(&self) -> &Value {
        &self.site_config
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }
}

impl<B: SvgBackend> DiagramRenderer for SvgRenderer<B> {
    fn render<'a>(
        &'a self,
        diagram_id: &'a str,
        chart: &'a str,
    ) -> LocalBoxFuture<'a, Result<Structure, RenderError>> {
        Box::pin(async move {
            let request = SvgRequest {
                diagram_id,
                chart,
                site_config: &self.site_config,
            };
            let svg = self
                .backend
                .render_svg(&request)
                .map_err(|err| RenderError::backend(err.to_string()))?;
            tracing::trace!(diagram_id, bytes = svg.len(), "svg rendered");
            Ok(extract_structure(&svg)?)
        })
    }
}
