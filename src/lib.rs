pub mod config;
pub mod error;
pub mod export;
pub mod invoice;

pub use config::{ExportFormat, Profile};
pub use error::{InvoiceError, Result, ValidationError};
pub use export::{request_export, Exporter, HtmlExporter, TypstExporter};
pub use invoice::{
    compute_balance_due, document_title, render_document, sanitize_file_name, DarkMode,
    InvoiceDocument, InvoiceRecord, InvoiceView, LineItem, RenderOptions, Strictness,
};
