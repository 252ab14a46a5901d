use serde::Serialize;

use super::balance::{compute_totals, parse_money, Money, Strictness};
use super::filename::document_title;
use super::record::InvoiceRecord;
use crate::config::Profile;
use crate::error::ValidationError;

/// Rendering switches
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RenderOptions {
    /// Presentation only: palette and QR image
    pub dark_mode: bool,
    pub strictness: Strictness,
}

/// Fully laid-out invoice, in print order
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InvoiceDocument {
    pub title: String,
    pub theme: Theme,
    pub header: Header,
    pub banner: Banner,
    pub customer: CustomerDetails,
    pub table: ItemTable,
    pub warning: Option<String>,
    pub footer: Footer,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Theme {
    pub dark_mode: bool,
    pub background: &'static str,
    pub text: &'static str,
    pub muted: &'static str,
    pub border: &'static str,
    pub table_header: &'static str,
    pub warning: &'static str,
}

impl Theme {
    pub fn light() -> Self {
        Self {
            dark_mode: false,
            background: "#ffffff",
            text: "#111827",
            muted: "#374151",
            border: "#d1d5db",
            table_header: "#e5e7eb",
            warning: "#ef4444",
        }
    }

    pub fn dark() -> Self {
        Self {
            dark_mode: true,
            background: "#111827",
            text: "#f9fafb",
            muted: "#d1d5db",
            border: "#4b5563",
            table_header: "#1f2937",
            warning: "#f87171",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Header {
    pub logo: Option<String>,
    pub invoice_number: String,
    pub date: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Banner {
    pub name: String,
    pub tagline: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CustomerDetails {
    pub client_name: String,
    pub client_contact: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ItemTable {
    pub currency: String,
    pub columns: Vec<String>,
    /// True when at least one line carries a unit amount
    pub show_amount: bool,
    pub rows: Vec<ItemRow>,
    pub summary: Vec<SummaryRow>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ItemRow {
    pub number: usize,
    /// Sequence number padded to two digits
    pub label: String,
    pub service: String,
    pub description: String,
    pub amount: Option<String>,
    pub total: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SummaryKind {
    Discount,
    Advance,
    TotalDue,
}

impl SummaryKind {
    pub fn label(&self) -> &'static str {
        match self {
            SummaryKind::Discount => "Discount",
            SummaryKind::Advance => "Advance",
            SummaryKind::TotalDue => "Total Due",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SummaryRow {
    pub kind: SummaryKind,
    pub label: &'static str,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Footer {
    pub bank: BankDetails,
    pub signature: SignatureBlock,
    pub contact: ContactBlock,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BankDetails {
    pub heading: String,
    pub bank: String,
    pub account_name: String,
    pub account_number: String,
    pub branch: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SignatureBlock {
    pub image: Option<String>,
    pub signatory: Option<String>,
    pub caption: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ContactBlock {
    pub phone: String,
    pub email: String,
    pub qr: Option<String>,
}

/// Lay out a record as a printable invoice.
///
/// Totals are validated first; an invalid record produces no document.
pub fn render_document(
    record: &InvoiceRecord,
    profile: &Profile,
    options: RenderOptions,
) -> Result<InvoiceDocument, ValidationError> {
    let totals = compute_totals(record, options.strictness)?;
    let currency = record
        .currency
        .clone()
        .unwrap_or_else(|| profile.invoice.currency.clone());

    let show_amount = record
        .items
        .iter()
        .any(|item| unit_amount(item.amount.as_deref()).is_some());

    let mut rows = Vec::with_capacity(record.items.len());
    for (i, (item, total)) in record.items.iter().zip(&totals.line_totals).enumerate() {
        let amount = match unit_amount(item.amount.as_deref()) {
            Some(raw) => {
                Some(parse_money(&format!("items[{i}].amount"), raw)?.with_currency(&currency))
            }
            None => None,
        };
        rows.push(ItemRow {
            number: i + 1,
            label: format!("{:02}", i + 1),
            service: item.service.clone(),
            description: item.description.clone(),
            amount,
            total: total.with_currency(&currency),
        });
    }

    let summary = [
        (SummaryKind::Discount, totals.discount),
        (SummaryKind::Advance, totals.advance),
        (SummaryKind::TotalDue, totals.balance_due),
    ]
    .into_iter()
    .map(|(kind, value): (SummaryKind, Money)| SummaryRow {
        kind,
        label: kind.label(),
        value: value.with_currency(&currency),
    })
    .collect();

    let (theme, qr) = if options.dark_mode {
        (Theme::dark(), profile.contact.qr_dark.clone())
    } else {
        (Theme::light(), profile.contact.qr_light.clone())
    };

    Ok(InvoiceDocument {
        title: document_title(&record.client_name),
        theme,
        header: Header {
            logo: profile.business.logo.clone(),
            invoice_number: record.invoice_number.clone(),
            date: record.date.clone(),
        },
        banner: Banner {
            name: profile.business.name.clone(),
            tagline: profile.business.tagline.clone(),
        },
        customer: CustomerDetails {
            client_name: record.client_name.clone(),
            client_contact: record.client_contact.clone(),
        },
        table: ItemTable {
            columns: table_columns(&currency, show_amount),
            currency,
            show_amount,
            rows,
            summary,
        },
        warning: record
            .red_note
            .clone()
            .filter(|note| !note.trim().is_empty()),
        footer: Footer {
            bank: BankDetails {
                heading: profile.bank.heading.clone(),
                bank: profile.bank.bank.clone(),
                account_name: profile.bank.account_name.clone(),
                account_number: profile.bank.account_number.clone(),
                branch: profile.bank.branch.clone(),
            },
            signature: SignatureBlock {
                image: profile.signature.image.clone(),
                signatory: profile.signature.signatory.clone(),
                caption: profile.signature.caption.clone(),
            },
            contact: ContactBlock {
                phone: profile.contact.phone.clone(),
                email: profile.contact.email.clone(),
                qr,
            },
        },
    })
}

/// Blank unit amounts count as absent
fn unit_amount(raw: Option<&str>) -> Option<&str> {
    raw.filter(|s| !s.trim().is_empty())
}

fn table_columns(currency: &str, show_amount: bool) -> Vec<String> {
    let mut columns = vec![
        "No".to_string(),
        "Service".to_string(),
        "Description".to_string(),
    ];
    if show_amount {
        columns.push(format!("Unit Amount ({currency})"));
    }
    columns.push(format!("Amount ({currency})"));
    columns
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::CONFIG_TEMPLATE;
    use crate::invoice::record::LineItem;

    fn profile() -> Profile {
        let mut profile: Profile = toml::from_str(CONFIG_TEMPLATE).unwrap();
        profile.contact.qr_light = Some("qr.png".to_string());
        profile.contact.qr_dark = Some("qr-dark.png".to_string());
        profile
    }

    fn record() -> InvoiceRecord {
        InvoiceRecord {
            invoice_number: "0042".to_string(),
            date: "19/10/2026".to_string(),
            client_name: "John  O'Brien!!".to_string(),
            client_contact: "+1 555 0199".to_string(),
            currency: Some("LKR".to_string()),
            items: vec![
                LineItem {
                    service: "Voice Over".to_string(),
                    description: "Radio spot".to_string(),
                    amount: None,
                    total: "100.00".to_string(),
                },
                LineItem {
                    service: "Artwork".to_string(),
                    description: "Campaign".to_string(),
                    amount: None,
                    total: "50.5".to_string(),
                },
            ],
            discount: Some("10".to_string()),
            advance: None,
            red_note: Some("Advance is non-refundable".to_string()),
        }
    }

    #[test]
    fn rows_follow_input_order() {
        let doc = render_document(&record(), &profile(), RenderOptions::default()).unwrap();

        assert_eq!(doc.table.rows.len(), 2);
        let numbers: Vec<usize> = doc.table.rows.iter().map(|r| r.number).collect();
        assert_eq!(numbers, vec![1, 2]);
        assert_eq!(doc.table.rows[0].label, "01");
        assert_eq!(doc.table.rows[1].service, "Artwork");
        assert_eq!(doc.table.rows[1].total, "50.50 LKR");
    }

    #[test]
    fn summary_rows_are_fixed() {
        let doc = render_document(&record(), &profile(), RenderOptions::default()).unwrap();

        let kinds: Vec<SummaryKind> = doc.table.summary.iter().map(|r| r.kind).collect();
        assert_eq!(
            kinds,
            vec![SummaryKind::Discount, SummaryKind::Advance, SummaryKind::TotalDue]
        );
        assert_eq!(doc.table.summary[0].value, "10.00 LKR");
        assert_eq!(doc.table.summary[1].value, "0.00 LKR");
        assert_eq!(doc.table.summary[2].value, "140.50 LKR");
    }

    #[test]
    fn header_customer_and_footer_are_filled() {
        let doc = render_document(&record(), &profile(), RenderOptions::default()).unwrap();

        assert_eq!(doc.title, "Invoice_John_OBrien");
        assert_eq!(doc.header.invoice_number, "0042");
        assert_eq!(doc.header.date, "19/10/2026");
        assert_eq!(doc.banner.name, "Your Business Name");
        assert_eq!(doc.customer.client_name, "John  O'Brien!!");
        assert_eq!(doc.warning.as_deref(), Some("Advance is non-refundable"));
        assert_eq!(doc.footer.bank.account_number, "00000000");
        assert_eq!(doc.footer.signature.caption, "Authorised Sign");
        assert_eq!(doc.footer.contact.qr.as_deref(), Some("qr.png"));
    }

    #[test]
    fn amount_column_appears_only_with_unit_amounts() {
        let doc = render_document(&record(), &profile(), RenderOptions::default()).unwrap();
        assert!(!doc.table.show_amount);
        assert_eq!(doc.table.columns.len(), 4);
        assert_eq!(doc.table.columns[3], "Amount (LKR)");

        let mut with_amount = record();
        with_amount.items[0].amount = Some("25".to_string());
        let doc = render_document(&with_amount, &profile(), RenderOptions::default()).unwrap();
        assert!(doc.table.show_amount);
        assert_eq!(doc.table.columns.len(), 5);
        assert_eq!(doc.table.rows[0].amount.as_deref(), Some("25.00 LKR"));
        assert_eq!(doc.table.rows[1].amount, None);
    }

    #[test]
    fn blank_unit_amount_is_absent() {
        let mut r = record();
        r.items[0].amount = Some("  ".to_string());
        let doc = render_document(&r, &profile(), RenderOptions::default()).unwrap();
        assert!(!doc.table.show_amount);
        assert_eq!(doc.table.columns.len(), 4);
        assert_eq!(doc.table.rows[0].amount, None);

        r.items[1].amount = Some("12".to_string());
        let doc = render_document(&r, &profile(), RenderOptions::default()).unwrap();
        assert!(doc.table.show_amount);
        assert_eq!(doc.table.rows[0].amount, None);
        assert_eq!(doc.table.rows[1].amount.as_deref(), Some("12.00 LKR"));
    }

    #[test]
    fn currency_falls_back_to_profile() {
        let mut r = record();
        r.currency = None;
        let doc = render_document(&r, &profile(), RenderOptions::default()).unwrap();
        assert_eq!(doc.table.currency, "USD");
        assert_eq!(doc.table.summary[2].value, "140.50 USD");
    }

    #[test]
    fn blank_warning_is_omitted() {
        let mut r = record();
        r.red_note = Some("  ".to_string());
        let doc = render_document(&r, &profile(), RenderOptions::default()).unwrap();
        assert_eq!(doc.warning, None);
    }

    #[test]
    fn dark_mode_changes_presentation_only() {
        let light = render_document(&record(), &profile(), RenderOptions::default()).unwrap();
        let mut dark = render_document(
            &record(),
            &profile(),
            RenderOptions {
                dark_mode: true,
                ..RenderOptions::default()
            },
        )
        .unwrap();

        assert!(dark.theme.dark_mode);
        assert_eq!(dark.footer.contact.qr.as_deref(), Some("qr-dark.png"));

        dark.theme = light.theme.clone();
        dark.footer.contact.qr = light.footer.contact.qr.clone();
        assert_eq!(dark, light);
    }

    #[test]
    fn invalid_record_yields_no_document() {
        let mut r = record();
        r.items[1].total = "abc".to_string();
        let err = render_document(&r, &profile(), RenderOptions::default()).unwrap_err();
        assert!(matches!(err, ValidationError::InvalidAmount { .. }));
    }
}
