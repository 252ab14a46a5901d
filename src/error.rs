use std::path::PathBuf;
use thiserror::Error;

/// Problems with the invoice record itself, raised before any total is computed.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Invalid amount '{value}' for {field}: must be a decimal number")]
    InvalidAmount { field: String, value: String },

    #[error("The {field} is too large to compute")]
    AmountOutOfRange { field: &'static str },

    #[error("Invoice has no line items. Add at least one entry under [[items]].")]
    EmptyItems,
}

#[derive(Error, Debug)]
pub enum InvoiceError {
    #[error("Config directory not found at {0}. Run 'invoice-print init' to create it.")]
    ConfigNotFound(PathBuf),

    #[error("Config file not found: {0}")]
    ConfigFileNotFound(PathBuf),

    #[error("Failed to parse config file {path}: {source}")]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("Invoice file not found: {0}")]
    RecordNotFound(PathBuf),

    #[error("Failed to parse invoice file {path}: {reason}")]
    RecordParse { path: PathBuf, reason: String },

    #[error("Unsupported invoice file '{0}'. Use a .toml or .json file.")]
    UnsupportedRecordFormat(PathBuf),

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("Typst not found. Install it from https://typst.app/ or run: cargo install typst-cli")]
    TypstNotFound,

    #[error("Failed to generate PDF: {0}")]
    PdfGeneration(String),

    #[error("Failed to render HTML: {0}")]
    Template(#[from] minijinja::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Config directory already exists at {0}")]
    AlreadyInitialized(PathBuf),
}

pub type Result<T> = std::result::Result<T, InvoiceError>;
