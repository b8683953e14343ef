//! PDF export of invoice snapshots
//!
//! Exports work from an owned `InvoiceSnapshot`, so edits made to the live
//! store after an export starts never show up in its output.

use crate::config::PageSetup;
use crate::projection::project_snapshot;
use crate::renderer::PdfRenderer;
use crate::Result;
use invoice::InvoiceSnapshot;
use std::path::{Path, PathBuf};

/// A rendered PDF and its suggested file name
#[derive(Debug, Clone, PartialEq)]
pub struct ExportedFile {
    /// `invoice-<number>.pdf`
    pub file_name: String,
    pub bytes: Vec<u8>,
}

impl ExportedFile {
    /// Write the file into `dir`, returning the full path
    pub fn write_to(&self, dir: impl AsRef<Path>) -> Result<PathBuf> {
        let path = dir.as_ref().join(&self.file_name);
        std::fs::write(&path, &self.bytes)?;
        tracing::debug!(path = %path.display(), "wrote exported invoice");
        Ok(path)
    }
}

/// Project and render a snapshot on the current thread
pub fn export_pdf_blocking(
    snapshot: &InvoiceSnapshot,
    setup: &PageSetup,
) -> Result<ExportedFile> {
    let document = project_snapshot(snapshot);
    let (bytes, pages) = PdfRenderer::new(setup.clone()).render_counted(&document)?;
    let file_name = snapshot.file_name("pdf");

    tracing::info!(
        file_name = %file_name,
        items = snapshot.invoice.items().len(),
        pages,
        bytes = bytes.len(),
        "exported invoice"
    );

    Ok(ExportedFile { file_name, bytes })
}

/// Project and render a snapshot on tokio's blocking pool
///
/// The snapshot is moved into the task. Dropping the returned future does
/// not cancel a render that has already started; its result is discarded.
#[cfg(feature = "export")]
pub async fn export_pdf(snapshot: InvoiceSnapshot, setup: PageSetup) -> Result<ExportedFile> {
    tokio::task::spawn_blocking(move || export_pdf_blocking(&snapshot, &setup))
        .await
        .map_err(|e| crate::LayoutError::Export(format!("export task failed: {e}")))?
}
