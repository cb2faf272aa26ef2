use crate::generation::Generation;
use std::fmt;

/// Identifies one diagram instance on the page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct InstanceId(pub u32);

impl fmt::Display for InstanceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "diagram-{}", self.0)
    }
}

/// Non-owning reference to a rendered element.
///
/// Only valid for the render generation that produced it; the next render pass (or unmount)
/// destroys the element and every id pointing at it goes stale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ElementId {
    pub instance: InstanceId,
    pub generation: Generation,
    pub index: u32,
}

impl fmt::Display for ElementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}#{}", self.instance, self.generation, self.index)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ElementKind {
    /// A node group (state, flowchart node, pseudo-state group).
    Node,
    /// A text label attached to an edge. Never classified by geometry.
    EdgeLabel,
    /// A loose closed-curve or polygon shape promoted to its parent group.
    Shape,
}

/// Shape summary used to classify unlabeled pseudo-states.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Geometry {
    /// Number of `circle`/`ellipse` shapes.
    pub closed_curves: usize,
    pub has_polygon: bool,
}

impl Geometry {
    pub fn circles(closed_curves: usize) -> Self {
        Self {
            closed_curves,
            has_polygon: false,
        }
    }

    pub fn polygon() -> Self {
        Self {
            closed_curves: 0,
            has_polygon: true,
        }
    }
}

/// One element as delivered by a renderer, before ids are assigned.
#[derive(Debug, Clone, PartialEq)]
pub struct ShapeElement {
    pub kind: ElementKind,
    pub text: String,
    pub geometry: Geometry,
    /// Byte offset of the element's start tag in [`Structure::markup`], when known.
    pub anchor: Option<usize>,
}

impl ShapeElement {
    pub fn node(text: impl Into<String>, geometry: Geometry) -> Self {
        Self {
            kind: ElementKind::Node,
            text: text.into(),
            geometry,
            anchor: None,
        }
    }

    pub fn edge_label(text: impl Into<String>) -> Self {
        Self {
            kind: ElementKind::EdgeLabel,
            text: text.into(),
            geometry: Geometry::default(),
            anchor: None,
        }
    }

    pub fn shape(geometry: Geometry) -> Self {
        Self {
            kind: ElementKind::Shape,
            text: String::new(),
            geometry,
            anchor: None,
        }
    }

    pub fn with_anchor(mut self, anchor: usize) -> Self {
        self.anchor = Some(anchor);
        self
    }
}

/// Structural result of a successful render.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Structure {
    pub elements: Vec<ShapeElement>,
    /// The renderer's own output (e.g. SVG text), kept opaque for export.
    pub markup: Option<String>,
}

impl Structure {
    pub fn new(elements: Vec<ShapeElement>) -> Self {
        Self {
            elements,
            markup: None,
        }
    }

    pub fn with_markup(mut self, markup: impl Into<String>) -> Self {
        self.markup = Some(markup.into());
        self
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct DiagramElement {
    pub id: ElementId,
    pub kind: ElementKind,
    pub text: String,
    pub geometry: Geometry,
    pub anchor: Option<usize>,
}

/// A mounted structure: renderer output stamped with ids for one generation.
#[derive(Debug, Clone, PartialEq)]
pub struct Diagram {
    instance: InstanceId,
    generation: Generation,
    elements: Vec<DiagramElement>,
    markup: Option<String>,
}

impl Diagram {
    pub fn from_structure(
        instance: InstanceId,
        generation: Generation,
        structure: Structure,
    ) -> Self {
        let elements = structure
            .elements
            .into_iter()
            .enumerate()
            .map(|(index, el)| DiagramElement {
                id: ElementId {
                    instance,
                    generation,
                    index: index as u32,
                },
                kind: el.kind,
                text: el.text,
                geometry: el.geometry,
                anchor: el.anchor,
            })
            .collect();
        Self {
            instance,
            generation,
            elements,
            markup: structure.markup,
        }
    }

    pub fn instance(&self) -> InstanceId {
        self.instance
    }

    pub fn generation(&self) -> Generation {
        self.generation
    }

    pub fn elements(&self) -> &[DiagramElement] {
        &self.elements
    }

    pub fn element(&self, id: ElementId) -> Option<&DiagramElement> {
        if id.instance != self.instance || id.generation != self.generation {
            return None;
        }
        self.elements.get(id.index as usize)
    }

    pub fn markup(&self) -> Option<&str> {
        self.markup.as_deref()
    }
}
