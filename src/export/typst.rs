use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;
use tempfile::TempDir;

use super::Exporter;
use crate::config::expand_path;
use crate::error::{InvoiceError, Result};
use crate::invoice::InvoiceDocument;

/// Embedded Typst template for the invoice PDF.
/// DATA_JSON_PATH is replaced with the serialized document file name.
/// Images are read from `data.assets`, copies staged next to the template.
const INVOICE_TEMPLATE: &str = r##"// Invoice Template
// Data is loaded from JSON file

#let data = json("DATA_JSON_PATH")
#let theme = data.theme
#let assets = data.assets

#set document(title: data.title)

#set page(
  paper: "a4",
  margin: (top: 1.5cm, bottom: 1.5cm, left: 1.5cm, right: 1.5cm),
  fill: rgb(theme.background),
)

#set text(font: "Helvetica", size: 10pt, fill: rgb(theme.text))

// Header with invoice number and date
#grid(
  columns: (1fr, auto),
  align: (left + horizon, right + horizon),
  [#if assets.logo != none { image(assets.logo, height: 3cm) }],
  [
    #text(size: 12pt)[INVOICE NO: \##data.header.invoice_number]
    \ #text(fill: rgb(theme.muted))[Date: #data.header.date]
  ]
)

// Brand banner
#v(1em)
#align(center)[
  #text(size: 22pt, weight: "bold")[#data.banner.name]
  #if data.banner.tagline != none [
    \ #text(size: 12pt)[#data.banner.tagline]
  ]
]
#v(0.5em)
#line(length: 100%, stroke: 0.5pt + rgb(theme.border))
#v(1em)

// Customer details
#text(size: 12pt, weight: "bold")[Customer Details]
#v(0.3em)
#text(fill: rgb(theme.muted))[
  Client Name: #data.customer.client_name \
  Contact No: #data.customer.client_contact
]

#v(1.5em)

// Line items followed by Discount, Advance, Total Due
#let cols = data.table.columns.len()
#table(
  columns: (auto, auto, 1fr, ..range(cols - 3).map(_ => auto)),
  stroke: 0.5pt + rgb(theme.border),
  inset: 6pt,
  fill: (x, y) => if y == 0 { rgb(theme.table_header) } else { none },

  ..data.table.columns.map(c => [*#c*]),

  ..data.table.rows.map(row => {
    let cells = (row.label, row.service, row.description)
    if data.table.show_amount {
      cells.push(if row.amount != none { row.amount } else { "" })
    }
    cells.push(align(right, row.total))
    cells
  }).flatten(),

  ..data.table.summary.map(line => (
    table.cell(colspan: cols - 1, align: right)[*#line.label*],
    table.cell(align: right)[#if line.kind == "total_due" [*#line.value*] else [#line.value]],
  )).flatten(),
)

#if data.warning != none [
  #v(0.5em)
  #text(fill: rgb(theme.warning))[#data.warning]
]

// Bank details and signature
#v(3em)
#grid(
  columns: (1fr, auto),
  gutter: 2em,
  [
    #text(size: 11pt, weight: "bold")[#data.footer.bank.heading]
    #v(0.5em)
    *Bank*: #data.footer.bank.bank \
    *Name*: #data.footer.bank.account_name \
    *Acc No*: #data.footer.bank.account_number
    #if data.footer.bank.branch != none [
      \ *Branch*: #data.footer.bank.branch
    ]
  ],
  [
    #if assets.signature != none {
      image(assets.signature, height: 2cm)
    } else {
      v(2em)
    }
    #line(length: 5cm, stroke: 0.5pt + rgb(theme.text))
    #text(size: 11pt, weight: "bold")[#data.footer.signature.caption]
    #if data.footer.signature.signatory != none [
      \ #text(fill: rgb(theme.muted))[#data.footer.signature.signatory]
    ]
  ]
)

// QR code and contact
#v(3em)
#grid(
  columns: (1fr, auto),
  align: (left + horizon, right + horizon),
  [#if assets.qr != none { image(assets.qr, height: 2cm) }],
  [
    *Contact*: #data.footer.contact.phone \
    *Email*: #data.footer.contact.email
  ]
)
"##;

/// Image files copied into the Typst root, by file name
#[derive(Debug, Default, PartialEq, Serialize)]
struct Assets {
    logo: Option<String>,
    signature: Option<String>,
    qr: Option<String>,
}

#[derive(Serialize)]
struct TypstData<'a> {
    #[serde(flatten)]
    document: &'a InvoiceDocument,
    assets: Assets,
}

/// Copy one referenced image into the root under a stable name.
/// A missing file leaves the image out of the PDF.
fn stage_asset(reference: Option<&str>, name: &str, root: &Path) -> Result<Option<String>> {
    let Some(reference) = reference else {
        return Ok(None);
    };

    let source = expand_path(reference);
    if !source.is_file() {
        tracing::warn!(asset = name, path = %source.display(), "image not found, leaving it out of the PDF");
        return Ok(None);
    }

    let file_name = match source.extension().and_then(|e| e.to_str()) {
        Some(ext) => format!("{name}.{}", ext.to_ascii_lowercase()),
        None => name.to_string(),
    };
    fs::copy(&source, root.join(&file_name))?;
    Ok(Some(file_name))
}

fn stage_assets(document: &InvoiceDocument, root: &Path) -> Result<Assets> {
    Ok(Assets {
        logo: stage_asset(document.header.logo.as_deref(), "logo", root)?,
        signature: stage_asset(document.footer.signature.image.as_deref(), "signature", root)?,
        qr: stage_asset(document.footer.contact.qr.as_deref(), "qr", root)?,
    })
}

/// Typst root for one export: template, data and images. Removed on drop.
struct Workspace {
    dir: TempDir,
    template_path: PathBuf,
}

fn prepare_workspace(document: &InvoiceDocument) -> Result<Workspace> {
    let dir = tempfile::Builder::new().prefix("invoice-print-").tempdir()?;

    let assets = stage_assets(document, dir.path())?;
    let json_data = serde_json::to_string(&TypstData { document, assets })
        .map_err(|e| InvoiceError::PdfGeneration(e.to_string()))?;
    fs::write(dir.path().join("data.json"), &json_data)?;

    // Template reads data.json relative to itself
    let template_content = INVOICE_TEMPLATE.replace("DATA_JSON_PATH", "data.json");
    let template_path = dir.path().join("invoice.typ");
    fs::write(&template_path, &template_content)?;

    Ok(Workspace { dir, template_path })
}

/// Writes `<title>.pdf` by compiling the document with the Typst CLI
pub struct TypstExporter {
    output_dir: PathBuf,
}

impl TypstExporter {
    pub fn new(output_dir: &Path) -> Self {
        Self {
            output_dir: output_dir.to_path_buf(),
        }
    }
}

impl Exporter for TypstExporter {
    fn export(&self, document: &InvoiceDocument, title: &str) -> Result<PathBuf> {
        // Check if typst is available
        let typst_check = Command::new("typst").arg("--version").output();

        if typst_check.is_err() {
            return Err(InvoiceError::TypstNotFound);
        }

        let workspace = prepare_workspace(document)?;

        fs::create_dir_all(&self.output_dir)?;
        let output_path = self.output_dir.join(format!("{title}.pdf"));

        tracing::debug!(
            template = %workspace.template_path.display(),
            output = %output_path.display(),
            "running typst compile"
        );
        let output = Command::new("typst")
            .arg("compile")
            .arg("--root")
            .arg(workspace.dir.path())
            .arg(&workspace.template_path)
            .arg(&output_path)
            .output()?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(InvoiceError::PdfGeneration(stderr.to_string()));
        }

        Ok(output_path)
    }
}
