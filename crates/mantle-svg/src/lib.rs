#![forbid(unsafe_code)]

//! Mermaid SVG adapter for `mantle`.
//!
//! - [`extract`] reads the structural element tree out of rendered SVG (node groups, loose
//!   pseudo-state shapes, edge labels)
//! - [`SvgRenderer`] turns any SVG-producing backend into a [`mantle_core::DiagramRenderer`]
//! - [`export`] writes the overlay marks recorded on a [`mantle_core::HeadlessPage`] back into
//!   the SVG text, for pages that ship pre-rendered diagrams

pub mod error;
pub mod export;
pub mod extract;
pub mod renderer;
mod util;

pub use error::{Error, Result};
pub use export::write_marks;
pub use extract::extract_structure;
pub use renderer::{SvgBackend, SvgRenderer, SvgRequest};
