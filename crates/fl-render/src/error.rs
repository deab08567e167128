//! Error types for fl-render.

use thiserror::Error;

/// A renderer that returned an error instead of hanging.
#[derive(Debug, Error)]
pub enum RenderFault {
    #[error("renderer failed: {0}")]
    Failed(String),

    #[error("image encoding failed: {0}")]
    Encode(#[from] image::ImageError),

    #[error("render task did not complete: {0}")]
    Join(String),
}

/// Errors that abort a batch.
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("render configuration error: {0}")]
    Config(String),

    #[error("invalid frame range: {0}")]
    Range(String),

    #[error("frame {index}: {fault}")]
    Renderer {
        index: u64,
        #[source]
        fault: RenderFault,
    },

    #[error("frame {index}: still stalling after {attempts} attempts")]
    StallLimit { index: u64, attempts: u32 },
}

/// Alias for `Result<T, RenderError>`.
pub type RenderResult<T> = Result<T, RenderError>;
