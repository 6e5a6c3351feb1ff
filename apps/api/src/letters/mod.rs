// Letter generation.
// `renderer` turns grouped findings into dispute letters; `sample` writes the
// fixed per-bureau sample letters; `pdf` writes per-category PDF letters.

pub mod files;
pub mod handlers;
pub mod pdf;
pub mod renderer;
pub mod sample;
pub mod templates;

use thiserror::Error;

pub use renderer::{render_letters, OutputFormat};

#[derive(Debug, Error)]
pub enum LetterError {
    #[error("Unknown output format '{0}' (expected 'text' or 'json')")]
    UnknownFormat(String),

    #[error("Failed to write letter file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to build PDF letter: {0}")]
    Pdf(String),
}
