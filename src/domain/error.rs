use thiserror::Error;

/// Errors raised while rebuilding derived events.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ChunkError {
    #[error("Unsupported throwable representation: {variant} cannot be rebuilt with a partial frame sequence")]
    UnsupportedRepresentation { variant: &'static str },
}
