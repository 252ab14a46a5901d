mod balance;
mod document;
mod filename;
mod record;
mod view;

pub use balance::{compute_balance_due, compute_totals, BalanceDue, Money, Strictness, Totals};
pub use document::{
    render_document, BankDetails, Banner, ContactBlock, CustomerDetails, Footer, Header,
    InvoiceDocument, ItemRow, ItemTable, RenderOptions, SignatureBlock, SummaryKind, SummaryRow,
    Theme,
};
pub use filename::{document_title, sanitize_file_name};
pub use record::{load_record, InvoiceRecord, LineItem};
pub use view::{DarkMode, InvoiceView};
