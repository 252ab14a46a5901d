mod html;
mod typst;

pub use html::{render_html, HtmlExporter};
pub use typst::TypstExporter;

use std::path::{Path, PathBuf};

use crate::config::ExportFormat;
use crate::error::Result;
use crate::invoice::InvoiceDocument;

/// Turns a laid-out invoice into a printable artifact
pub trait Exporter {
    /// Render exactly the document, saved under the given title. Returns the artifact path.
    fn export(&self, document: &InvoiceDocument, title: &str) -> Result<PathBuf>;
}

/// Hand a document to an exporter under its own title
pub fn request_export(document: &InvoiceDocument, exporter: &dyn Exporter) -> Result<PathBuf> {
    tracing::info!(title = %document.title, rows = document.table.rows.len(), "exporting invoice");
    let path = exporter.export(document, &document.title)?;
    tracing::info!(path = %path.display(), "invoice exported");
    Ok(path)
}

/// Build the exporter for a configured format
pub fn exporter_for(format: ExportFormat, output_dir: &Path, auto_print: bool) -> Box<dyn Exporter> {
    match format {
        ExportFormat::Html => Box::new(HtmlExporter::new(output_dir).auto_print(auto_print)),
        ExportFormat::Pdf => Box::new(TypstExporter::new(output_dir)),
    }
}
