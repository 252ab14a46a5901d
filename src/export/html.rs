use minijinja::{context, Environment};
use std::fs;
use std::path::{Path, PathBuf};

use super::Exporter;
use crate::error::Result;
use crate::invoice::InvoiceDocument;

/// Print view of the invoice; the download button is hidden when printing
const INVOICE_TEMPLATE: &str = r##"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<title>{{ doc.title }}</title>
<style>
  body { margin: 0; padding: 24px; font-family: "Helvetica", "Arial", sans-serif; background: {{ doc.theme.background }}; color: {{ doc.theme.text }}; }
  .invoice { max-width: 56rem; margin: 0 auto; padding: 24px; background: {{ doc.theme.background }}; }
  .row { display: flex; justify-content: space-between; align-items: center; }
  .muted { color: {{ doc.theme.muted }}; }
  .logo { height: 8rem; }
  .banner { text-align: center; padding-bottom: 1rem; margin-bottom: 1rem; border-bottom: 1px solid {{ doc.theme.border }}; }
  .banner .name { font-size: 1.875rem; font-weight: bold; font-family: "Roboto Slab", serif; }
  .banner .tagline { margin-top: 0.5rem; font-size: 1.125rem; }
  table { width: 100%; border-collapse: collapse; margin-bottom: 1.5rem; }
  th { text-align: left; background: {{ doc.theme.table_header }}; }
  th, td.cell { border: 1px solid {{ doc.theme.border }}; padding: 0.5rem 1rem; }
  td { padding: 0.5rem 1rem; }
  .money { text-align: right; }
  .summary td.label { text-align: right; font-weight: 600; }
  .summary.total_due td { font-weight: bold; border: 1px solid {{ doc.theme.border }}; }
  .warning { color: {{ doc.theme.warning }}; }
  .footer { margin-top: 5rem; align-items: flex-start; }
  .signature img { height: 5rem; }
  .qr { height: 4rem; }
  .no-print { margin-top: 1rem; }
  @media print {
    body { padding: 0; -webkit-print-color-adjust: exact; print-color-adjust: exact; }
    .no-print { display: none; }
  }
</style>
</head>
<body>
<div class="invoice">
  <div class="row header">
    <div>{% if doc.header.logo %}<img class="logo" src="{{ doc.header.logo }}" alt="Logo">{% endif %}</div>
    <div>
      <p>INVOICE NO: #{{ doc.header.invoice_number }}</p>
      <p class="muted">Date: {{ doc.header.date }}</p>
    </div>
  </div>
  <div class="banner">
    <div class="name">{{ doc.banner.name }}</div>
    {% if doc.banner.tagline %}<div class="tagline">{{ doc.banner.tagline }}</div>{% endif %}
  </div>
  <div class="customer">
    <h3>Customer Details</h3>
    <p class="muted">Client Name: {{ doc.customer.client_name }}</p>
    <p class="muted">Contact No: {{ doc.customer.client_contact }}</p>
  </div>
  <table>
    <thead>
      <tr>{% for column in doc.table.columns %}<th{% if loop.index > 3 %} class="money"{% endif %}>{{ column }}</th>{% endfor %}</tr>
    </thead>
    <tbody>
      {% for row in doc.table.rows %}
      <tr>
        <td class="cell">{{ row.label }}</td>
        <td class="cell">{{ row.service }}</td>
        <td class="cell">{{ row.description }}</td>
        {% if doc.table.show_amount %}<td class="cell money">{{ row.amount or "" }}</td>{% endif %}
        <td class="cell money">{{ row.total }}</td>
      </tr>
      {% endfor %}
      {% for line in doc.table.summary %}
      <tr class="summary {{ line.kind }}">
        <td class="label" colspan="{{ doc.table.columns | length - 1 }}">{{ line.label }}</td>
        <td class="money">{{ line.value }}</td>
      </tr>
      {% endfor %}
    </tbody>
  </table>
  {% if doc.warning %}<p class="warning">{{ doc.warning }}</p>{% endif %}
  <div class="row footer">
    <div class="bank">
      <p><strong>{{ doc.footer.bank.heading }}</strong></p>
      <p><b>Bank</b>: {{ doc.footer.bank.bank }}</p>
      <p><b>Name</b>: {{ doc.footer.bank.account_name }}</p>
      <p><b>Acc No</b>: {{ doc.footer.bank.account_number }}</p>
      {% if doc.footer.bank.branch %}<p><b>Branch</b>: {{ doc.footer.bank.branch }}</p>{% endif %}
    </div>
    <div class="signature">
      {% if doc.footer.signature.image %}<img src="{{ doc.footer.signature.image }}" alt="Signature">{% endif %}
      <p>________________________</p>
      <h3>{{ doc.footer.signature.caption }}</h3>
      {% if doc.footer.signature.signatory %}<p class="muted">{{ doc.footer.signature.signatory }}</p>{% endif %}
    </div>
  </div>
  <div class="row footer contact">
    <div>{% if doc.footer.contact.qr %}<img class="qr" src="{{ doc.footer.contact.qr }}" alt="QR">{% endif %}</div>
    <div>
      <p class="muted"><b>Contact</b>: {{ doc.footer.contact.phone }}</p>
      <p class="muted"><b>Email</b>: {{ doc.footer.contact.email }}</p>
    </div>
  </div>
</div>
<button class="no-print" onclick="window.print()">Download Invoice</button>
{% if auto_print %}<script>window.addEventListener("load", function () { window.print(); });</script>{% endif %}
</body>
</html>
"##;

/// Render the print view as a standalone HTML page
pub fn render_html(document: &InvoiceDocument, auto_print: bool) -> Result<String> {
    let mut env = Environment::new();
    env.add_template("invoice.html", INVOICE_TEMPLATE)?;
    let template = env.get_template("invoice.html")?;
    Ok(template.render(context! { doc => document, auto_print => auto_print })?)
}

/// Writes `<title>.html`; the browser's print dialog produces the PDF
pub struct HtmlExporter {
    output_dir: PathBuf,
    auto_print: bool,
}

impl HtmlExporter {
    pub fn new(output_dir: &Path) -> Self {
        Self {
            output_dir: output_dir.to_path_buf(),
            auto_print: false,
        }
    }

    /// Open the print dialog as soon as the page loads
    pub fn auto_print(mut self, enabled: bool) -> Self {
        self.auto_print = enabled;
        self
    }
}

impl Exporter for HtmlExporter {
    fn export(&self, document: &InvoiceDocument, title: &str) -> Result<PathBuf> {
        let html = render_html(document, self.auto_print)?;
        fs::create_dir_all(&self.output_dir)?;
        let path = self.output_dir.join(format!("{title}.html"));
        fs::write(&path, html)?;
        tracing::debug!(path = %path.display(), auto_print = self.auto_print, "wrote print view");
        Ok(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{Profile, CONFIG_TEMPLATE};
    use crate::invoice::{render_document, InvoiceRecord, LineItem, RenderOptions};

    fn document(dark_mode: bool) -> InvoiceDocument {
        let mut profile: Profile = toml::from_str(CONFIG_TEMPLATE).unwrap();
        profile.contact.qr_light = Some("qr.png".to_string());
        profile.contact.qr_dark = Some("qr-dark.png".to_string());
        let record = InvoiceRecord {
            invoice_number: "0007".to_string(),
            date: "2026-10-19".to_string(),
            client_name: "Tom & Jerry <Ltd>".to_string(),
            client_contact: "555".to_string(),
            currency: Some("LKR".to_string()),
            items: vec![LineItem {
                service: "Voice Over".to_string(),
                description: "Promo".to_string(),
                amount: None,
                total: "1500".to_string(),
            }],
            discount: None,
            advance: Some("500".to_string()),
            red_note: Some("Late fee applies".to_string()),
        };
        let options = RenderOptions {
            dark_mode,
            ..RenderOptions::default()
        };
        render_document(&record, &profile, options).unwrap()
    }

    #[test]
    fn renders_rows_summary_and_footer() {
        let html = render_html(&document(false), false).unwrap();

        assert!(html.contains("<title>Invoice_Tom__Jerry_Ltd</title>"));
        assert!(html.contains("INVOICE NO: #0007"));
        assert!(html.contains("1500.00 LKR"));
        assert!(html.contains("Total Due"));
        assert!(html.contains("1000.00 LKR"));
        assert!(html.contains("Late fee applies"));
        assert!(html.contains("Acc No"));
        assert!(html.contains("src=\"qr.png\""));
        assert!(!html.contains("window.addEventListener"));
    }

    #[test]
    fn summary_follows_item_rows() {
        let html = render_html(&document(false), false).unwrap();
        let row = html.find("Voice Over").unwrap();
        let discount = html.find(">Discount<").unwrap();
        let advance = html.find(">Advance<").unwrap();
        let total = html.find(">Total Due<").unwrap();
        assert!(row < discount && discount < advance && advance < total);
    }

    #[test]
    fn escapes_record_text() {
        let html = render_html(&document(false), false).unwrap();
        assert!(html.contains("Tom &amp; Jerry &lt;Ltd&gt;"));
    }

    #[test]
    fn dark_mode_swaps_palette_and_qr() {
        let html = render_html(&document(true), true).unwrap();
        assert!(html.contains("background: #111827"));
        assert!(html.contains("src=\"qr-dark.png\""));
        assert!(html.contains("window.addEventListener"));
    }

    #[test]
    fn exporter_writes_titled_file() {
        let dir = tempfile::tempdir().unwrap();
        let exporter = HtmlExporter::new(&dir.path().join("out"));
        let doc = document(false);

        let path = exporter.export(&doc, &doc.title).unwrap();
        assert_eq!(path, dir.path().join("out").join("Invoice_Tom__Jerry_Ltd.html"));
        assert!(fs::read_to_string(path).unwrap().contains("Voice Over"));
    }
}
