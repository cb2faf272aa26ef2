use crate::annotations::Annotations;
use crate::element::ElementId;
use crate::generation::GenerationScope;
use crate::modal::ModalContent;
use crate::page::Page;

/// Attribute names written onto activatable elements.
pub mod attr {
    pub const CLICKABLE: &str = "data-clickable";
    pub const LABEL: &str = "data-label";
    pub const ROLE: &str = "role";
    pub const TABINDEX: &str = "tabindex";
    pub const ARIA_LABEL: &str = "aria-label";
    pub const POINTER_EVENTS: &str = "pointer-events";

    /// Removed from elements whose description disappeared.
    pub const ACTIVATION_MARKS: [&str; 6] = [
        CLICKABLE,
        LABEL,
        ROLE,
        TABINDEX,
        ARIA_LABEL,
        POINTER_EVENTS,
    ];
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Key {
    Enter,
    Space,
    Escape,
    Other(String),
}

impl Key {
    /// Maps a DOM `KeyboardEvent.key` value.
    pub fn from_dom(key: &str) -> Self {
        match key {
            "Enter" => Self::Enter,
            " " | "Spacebar" => Self::Space,
            "Escape" | "Esc" => Self::Escape,
            other => Self::Other(other.to_string()),
        }
    }

    pub fn activates(&self) -> bool {
        matches!(self, Self::Enter | Self::Space)
    }
}

/// Input delivered to a diagram instance.
///
/// `target` is the element the host resolved from the event target (closest rendered element).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DiagramEvent {
    Click { target: ElementId },
    KeyDown { target: ElementId, key: Key },
}

impl DiagramEvent {
    pub fn target(&self) -> ElementId {
        match self {
            Self::Click { target } | Self::KeyDown { target, .. } => *target,
        }
    }
}

#[derive(Debug, Clone)]
pub struct InteractionController {
    aria_label_prefix: String,
}

impl Default for InteractionController {
    fn default() -> Self {
        Self::new("Show info for ")
    }
}

impl InteractionController {
    pub fn new(aria_label_prefix: impl Into<String>) -> Self {
        Self {
            aria_label_prefix: aria_label_prefix.into(),
        }
    }

    /// Marks `element` activatable when `label` has a description, otherwise strips any marks a
    /// previous pass left on it. Returns whether the element is activatable.
    ///
    /// Safe to run repeatedly over the same element.
    pub fn mark(
        &self,
        page: &mut dyn Page,
        scope: &mut GenerationScope,
        element: ElementId,
        label: &str,
        tooltip: &str,
        annotations: &Annotations,
    ) -> bool {
        if annotations.description(label).is_none() {
            self.unmark(page, scope, element);
            return false;
        }

        let aria_label = format!("{}{label}", self.aria_label_prefix);
        let marks = [
            (attr::CLICKABLE, "true"),
            (attr::LABEL, label),
            (attr::ROLE, "button"),
            (attr::TABINDEX, "0"),
            (attr::ARIA_LABEL, aria_label.as_str()),
            (attr::POINTER_EVENTS, "auto"),
        ];
        for (name, value) in marks {
            if let Err(err) = page.set_attribute(element, name, value) {
                tracing::debug!(%element, attribute = name, error = %err, "mark failed");
                self.unmark(page, scope, element);
                return false;
            }
        }
        if let Err(err) = page.set_native_title(element, tooltip) {
            tracing::debug!(%element, error = %err, "native title failed");
        }
        scope.record_activatable(element, label);
        true
    }

    fn unmark(&self, page: &mut dyn Page, scope: &mut GenerationScope, element: ElementId) {
        scope.forget_activatable(element);
        for name in attr::ACTIVATION_MARKS {
            if let Err(err) = page.remove_attribute(element, name) {
                tracing::debug!(%element, attribute = name, error = %err, "unmark failed");
                return;
            }
        }
    }

    /// Resolves an input event to modal content.
    ///
    /// Returns `None` for non-activating keys, elements that are not activatable in `scope`
    /// (including stale ids from earlier generations) and labels whose description vanished
    /// since the pass ran.
    pub fn activation(
        &self,
        scope: &GenerationScope,
        annotations: &Annotations,
        event: &DiagramEvent,
    ) -> Option<ModalContent> {
        if let DiagramEvent::KeyDown { key, .. } = event {
            if !key.activates() {
                return None;
            }
        }
        let label = scope.activation_label(event.target())?;
        let description = annotations.description(label)?;
        Some(ModalContent::new(label, description))
    }
}
