use crate::element::ElementId;
use crate::page::TooltipHandle;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Invalid overlay config JSON: {0}")]
    ConfigJson(#[from] serde_json::Error),

    #[error(transparent)]
    Render(#[from] RenderError),
}

/// Failure signal of a [`crate::DiagramRenderer`].
///
/// A failed render never escapes a [`crate::DiagramInstance`]: the diagram area shows a textual
/// placeholder and the overlay attach pass is skipped for that generation.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RenderError {
    #[error("{message}")]
    Backend { message: String },

    #[error("unreadable diagram markup: {message}")]
    InvalidMarkup { message: String },
}

impl RenderError {
    pub fn backend(message: impl Into<String>) -> Self {
        Self::Backend {
            message: message.into(),
        }
    }
}

/// A tooltip or attribute operation hit an element that is no longer mounted.
///
/// These are swallowed by the overlay (best-effort cleanup) and only surface as `tracing` events.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum WidgetError {
    #[error("element {element} is detached")]
    Detached { element: ElementId },

    #[error("unknown tooltip {handle}")]
    UnknownTooltip { handle: TooltipHandle },
}
