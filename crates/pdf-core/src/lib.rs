//! PDF Core - Low-level PDF writing
//!
//! This crate provides functionality for:
//! - Creating PDF documents from scratch with blank pages
//! - Writing text with the standard Helvetica fonts (no embedding needed)
//! - Measuring text and wrapping it to a width
//! - Drawing filled rectangles and lines
//!
//! All coordinates are in points with the origin at the top-left corner of
//! the page; conversion to PDF's bottom-left origin happens internally.
//!
//! # Example
//!
//! ```
//! use pdf_core::{Align, PdfDocument, StandardFont};
//!
//! let mut doc = PdfDocument::new();
//! let page = doc.add_blank_page(595.28, 841.89).unwrap();
//! doc.set_font(StandardFont::HelveticaBold, 12.0);
//! doc.insert_text("Hello, World!", page, 100.0, 100.0, Align::Left).unwrap();
//! let bytes = doc.to_bytes().unwrap();
//! assert!(bytes.starts_with(b"%PDF"));
//! ```

mod document;
mod font;
mod graphics;
mod text;

pub use document::{Color, PdfDocument};
pub use font::StandardFont;
pub use graphics::{generate_line_operators, generate_rect_operators};
pub use text::{generate_text_operators, wrap_text, TextRenderContext};

use thiserror::Error;

/// Errors that can occur during PDF operations
#[derive(Debug, Error)]
pub enum PdfError {
    #[error("Failed to save PDF: {0}")]
    SaveError(String),

    #[error("Invalid page number: {0} (document has {1} pages)")]
    InvalidPage(usize, usize),

    #[error("Invalid page size: {0} x {1}")]
    InvalidPageSize(f64, f64),

    #[error("PDF parsing error: {0}")]
    ParseError(String),

    #[error("Lopdf error: {0}")]
    LopdfError(#[from] lopdf::Error),
}

/// Result type for PDF operations
pub type Result<T> = std::result::Result<T, PdfError>;

/// Text alignment options
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Align {
    #[default]
    Left,
    Center,
    Right,
}

/// Format a coordinate for a content stream (max three decimals, no exponent)
pub(crate) fn fmt_num(value: f64) -> String {
    let rounded = (value * 1000.0).round() / 1000.0;
    if rounded == 0.0 {
        "0".to_string()
    } else {
        rounded.to_string()
    }
}
