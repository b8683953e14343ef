//! Layout - invoice document projection and PDF rendering
//!
//! This crate provides:
//! - A renderer-agnostic document tree (`Document`)
//! - `project`, which turns an invoice into that tree
//! - `PdfRenderer`, which paginates the tree onto PDF pages
//! - Snapshot export, async on tokio with the `export` feature
//!
//! # Example
//!
//! ```
//! use layout::{project_snapshot, PageSetup, PdfRenderer};
//! use invoice::{InvoiceStore, NewItem};
//!
//! let mut store = InvoiceStore::default();
//! store.set_company_name("Acme");
//! store.add_item(NewItem::new("Design", 2.0, 50.0)).unwrap();
//!
//! let document = project_snapshot(&store.snapshot());
//! let pdf = PdfRenderer::new(PageSetup::a4()).render(&document).unwrap();
//! assert!(pdf.starts_with(b"%PDF"));
//! ```

mod config;
mod export;
mod projection;
mod renderer;
mod schema;

pub use config::{PageSetup, A4_HEIGHT, A4_WIDTH};
#[cfg(feature = "export")]
pub use export::export_pdf;
pub use export::{export_pdf_blocking, ExportedFile};
pub use projection::{project, project_snapshot};
pub use renderer::PdfRenderer;
pub use schema::*;

use thiserror::Error;

/// Errors that can occur while laying out or exporting a document
#[derive(Debug, Error)]
pub enum LayoutError {
    #[error("Invalid page setup: {0}")]
    Config(String),

    #[error("Render error: {0}")]
    Render(String),

    #[error("Export error: {0}")]
    Export(String),

    #[error("PDF error: {0}")]
    Pdf(#[from] pdf_core::PdfError),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for layout operations
pub type Result<T> = std::result::Result<T, LayoutError>;
