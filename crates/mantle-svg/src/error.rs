use mantle_core::RenderError;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("invalid SVG: {0}")]
    Xml(#[from] roxmltree::Error),

    #[error("missing <svg> root")]
    MissingRoot,

    #[error("diagram has no markup to export")]
    MissingMarkup,

    #[error("no element starts at byte {anchor}")]
    UnknownAnchor { anchor: usize },
}

impl From<Error> for RenderError {
    fn from(err: Error) -> Self {
        RenderError::InvalidMarkup {
            message: err.to_string(),
        }
    }
}
