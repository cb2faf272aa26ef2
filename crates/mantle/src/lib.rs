#![forbid(unsafe_code)]

//! `mantle` layers semantic hover tooltips and a page-wide detail modal over rendered Mermaid
//! diagrams, without touching their layout.
//!
//! The core is headless: every side effect goes through the [`Page`] host trait, and
//! [`HeadlessPage`] records them in memory for tests and static export.
//!
//! # Features
//!
//! - `svg`: read rendered Mermaid SVG into a structure and write overlay marks back into it
//!   (`mantle::svg`)

pub use mantle_core::*;

#[cfg(feature = "svg")]
pub mod svg {
    pub use mantle_svg::{
        Error, Result, SvgBackend, SvgRenderer, SvgRequest, extract_structure, write_marks,
    };
}
