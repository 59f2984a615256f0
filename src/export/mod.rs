//! PDF export of gathered topic content.

mod pdf;

pub use pdf::{PdfExporter, text_width, title_for, unsupported_chars, wrap_text};

#[cfg(test)]
pub(crate) use pdf::testing;
