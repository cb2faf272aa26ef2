#![forbid(unsafe_code)]

//! Semantic overlay for rendered diagrams (headless core).
//!
//! A renderer turns a textual diagram description into a flat structural tree of shapes. This
//! crate layers hover tooltips and a page-wide detail modal on top of that tree:
//!
//! - [`label`] derives a label for each element (text first, then pseudo-state geometry)
//! - [`annotations`] resolves tooltip and description text for a label
//! - [`tooltip`] and [`interaction`] apply per-generation side effects through a [`Page`]
//! - [`modal`] holds the single detail panel shared by every diagram on the page
//! - [`instance`] drives one diagram through render generations
//!
//! Design goals:
//! - every side effect goes through the [`Page`] host trait (deterministic, testable)
//! - strict destroy-before-create between generations
//! - runtime-agnostic async APIs (no specific executor required)

pub mod annotations;
pub mod config;
pub mod element;
pub mod error;
pub mod generation;
pub mod headless;
pub mod instance;
pub mod interaction;
pub mod label;
pub mod modal;
pub mod page;
pub mod render;
pub mod tooltip;

pub use annotations::Annotations;
pub use config::{OverlayConfig, TooltipOptions};
pub use element::{
    Diagram, DiagramElement, ElementId, ElementKind, Geometry, InstanceId, ShapeElement, Structure,
};
pub use error::{Error, RenderError, Result, WidgetError};
pub use generation::{Generation, GenerationScope};
pub use headless::HeadlessPage;
pub use instance::{Applied, AttachReport, DiagramInstance};
pub use interaction::{DiagramEvent, InteractionController, Key};
pub use label::{Label, PseudoState, resolve_label};
pub use modal::{ModalContent, ModalEvent, ModalState, ModalStore, Transition};
pub use page::{ListenerId, Page, TooltipHandle, TooltipSpec};
pub use render::{DiagramRenderer, RenderTicket};
pub use tooltip::TooltipManager;

#[cfg(test)]
mod tests;
