use crate::element::{DiagramElement, ElementKind, Geometry};
use std::fmt;

/// Semantic role inferred for an element that carries no text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PseudoState {
    Start,
    End,
    Decision,
}

impl PseudoState {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Start => "Start",
            Self::End => "End",
            Self::Decision => "Decision",
        }
    }

    /// Classifies shape geometry. Closed curves are checked before polygons.
    pub fn from_geometry(geometry: &Geometry) -> Option<Self> {
        if geometry.closed_curves >= 2 {
            return Some(Self::End);
        }
        if geometry.closed_curves == 1 {
            return Some(Self::Start);
        }
        if geometry.has_polygon {
            return Some(Self::Decision);
        }
        None
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Label {
    Text(String),
    Pseudo(PseudoState),
}

impl Label {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Text(text) => text,
            Self::Pseudo(state) => state.as_str(),
        }
    }
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Derives the label of a rendered element.
///
/// Non-empty text always wins and geometry is not consulted. Edge labels only ever use their
/// text. `None` means the element is skipped by the overlay; it is not an error.
pub fn resolve_label(element: &DiagramElement) -> Option<Label> {
    let text = element.text.trim();
    if !text.is_empty() {
        return Some(Label::Text(text.to_string()));
    }
    if element.kind == ElementKind::EdgeLabel {
        return None;
    }
    PseudoState::from_geometry(&element.geometry).map(Label::Pseudo)
}
