use crate::util::{class_contains, has_class, is_tag, text_content};
use crate::{Error, Result};
use mantle_core::{Geometry, PseudoState, ShapeElement, Structure};
use roxmltree::{Node, NodeId};

/// Reads the overlay-relevant elements out of rendered Mermaid SVG.
///
/// Three passes, in this order:
/// 1. node groups (`g.node`, state groups and anything whose class mentions
///    `state`/`start`/`end`/`choice`), labeled by their first `.nodeLabel`, `.label` or `<text>`
///    descendant
/// 2. loose `circle`/`ellipse`/`polygon` shapes outside those groups, promoted to their closest
///    unlabeled parent group when its geometry is a pseudo-state
/// 3. `g.edgeLabel` groups
///
/// Nothing inside an edge label is ever treated as a node or shape. Each element's anchor is
/// the byte offset of its start tag in `svg`.
pub fn extract_structure(svg: &str) -> Result<Structure> {
    let doc = roxmltree::Document::parse(svg)?;
    let root = doc
        .descendants()
        .find(|n| n.has_tag_name("svg"))
        .ok_or(Error::MissingRoot)?;

    let mut elements = Vec::new();

    let mut node_groups: Vec<NodeId> = Vec::new();
    for node in root.descendants().filter(|n| is_node_candidate(*n)) {
        if inside_edge_label(node) {
            continue;
        }
        elements.push(
            ShapeElement::node(node_label_text(node), geometry_of(node))
                .with_anchor(node.range().start),
        );
        node_groups.push(node.id());
    }

    let mut promoted: Vec<NodeId> = Vec::new();
    for shape in root.descendants().filter(|n| is_pseudo_shape(*n)) {
        if inside_edge_label(shape) || shape.ancestors().any(|a| node_groups.contains(&a.id())) {
            continue;
        }
        let target = shape
            .ancestors()
            .skip(1)
            .find(|a| is_tag(*a, "g"))
            .unwrap_or(shape);
        if promoted.contains(&target.id()) || !node_label_text(target).is_empty() {
            continue;
        }
        let geometry = geometry_of(target);
        if PseudoState::from_geometry(&geometry).is_none() {
            continue;
        }
        promoted.push(target.id());
        elements.push(ShapeElement::shape(geometry).with_anchor(target.range().start));
    }

    for label in root
        .descendants()
        .filter(|n| is_tag(*n, "g") && has_class(*n, "edgeLabel"))
    {
        let text = label
            .descendants()
            .skip(1)
            .find(|d| is_tag(*d, "text"))
            .map(text_content)
            .filter(|t| !t.is_empty())
            .unwrap_or_else(|| text_content(label));
        let text = text.trim();
        if text.is_empty() {
            continue;
        }
        elements.push(ShapeElement::edge_label(text).with_anchor(label.range().start));
    }

    tracing::trace!(elements = elements.len(), "extracted svg structure");
    Ok(Structure::new(elements).with_markup(svg))
}

fn is_node_candidate(node: Node<'_, '_>) -> bool {
    if !node.is_element() {
        return false;
    }
    if has_class(node, "state") || has_class(node, "stateGroup") {
        return true;
    }
    is_tag(node, "g")
        && (has_class(node, "node")
            || ["state", "start", "end", "choice"]
                .iter()
                .any(|needle| class_contains(node, needle)))
}

fn is_pseudo_shape(node: Node<'_, '_>) -> bool {
    is_tag(node, "circle") || is_tag(node, "ellipse") || is_tag(node, "polygon")
}

fn inside_edge_label(node: Node<'_, '_>) -> bool {
    node.ancestors()
        .any(|a| is_tag(a, "g") && has_class(a, "edgeLabel"))
}

fn node_label_text(node: Node<'_, '_>) -> String {
    node.descendants()
        .skip(1)
        .find(|d| {
            d.is_element() && (has_class(*d, "nodeLabel") || has_class(*d, "label") || is_tag(*d, "text"))
        })
        .map(|d| text_content(d).trim().to_string())
        .unwrap_or_default()
}

/// Shape summary of `node`'s descendants (the node itself is not counted).
fn geometry_of(node: Node<'_, '_>) -> Geometry {
    let mut geometry = Geometry::default();
    for d in node.descendants().skip(1) {
        if is_tag(d, "circle") || is_tag(d, "ellipse") {
            geometry.closed_curves += 1;
        } else if is_tag(d, "polygon") {
            geometry.has_polygon = true;
        }
    }
    geometry
}
