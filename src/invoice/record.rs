use serde::{Deserialize, Deserializer, Serialize};
use std::fs;
use std::path::Path;

use crate::error::{InvoiceError, Result};

/// A single billed line as entered on the invoice form
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct LineItem {
    pub service: String,
    #[serde(default)]
    pub description: String,
    /// Unit amount, display only
    #[serde(default, deserialize_with = "deserialize_optional_text")]
    pub amount: Option<String>,
    /// Line contribution to the invoice total
    #[serde(deserialize_with = "deserialize_text")]
    pub total: String,
}

/// Invoice record supplied by the caller; never mutated while rendering
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct InvoiceRecord {
    #[serde(alias = "invoiceNumber", deserialize_with = "deserialize_text")]
    pub invoice_number: String,
    pub date: String,
    #[serde(alias = "clientName")]
    pub client_name: String,
    #[serde(default, alias = "clientContact")]
    pub client_contact: String,
    /// Falls back to the profile currency when absent
    #[serde(default)]
    pub currency: Option<String>,
    #[serde(default)]
    pub items: Vec<LineItem>,
    #[serde(default, deserialize_with = "deserialize_optional_text")]
    pub discount: Option<String>,
    #[serde(default, deserialize_with = "deserialize_optional_text")]
    pub advance: Option<String>,
    #[serde(default, alias = "redNote")]
    pub red_note: Option<String>,
}

/// Form values arrive as text or as plain numbers
#[derive(Deserialize)]
#[serde(untagged)]
enum TextOrNumber {
    Text(String),
    Integer(i64),
    Float(f64),
}

impl From<TextOrNumber> for String {
    fn from(value: TextOrNumber) -> Self {
        match value {
            TextOrNumber::Text(s) => s,
            TextOrNumber::Integer(n) => n.to_string(),
            TextOrNumber::Float(f) => f.to_string(),
        }
    }
}

fn deserialize_text<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    TextOrNumber::deserialize(deserializer).map(String::from)
}

fn deserialize_optional_text<'de, D>(deserializer: D) -> std::result::Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<TextOrNumber>::deserialize(deserializer).map(|v| v.map(String::from))
}

/// Load an invoice record from a .toml or .json file
pub fn load_record(path: &Path) -> Result<InvoiceRecord> {
    if !path.exists() {
        return Err(InvoiceError::RecordNotFound(path.to_path_buf()));
    }

    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase());

    let content = fs::read_to_string(path)?;
    let record: InvoiceRecord = match extension.as_deref() {
        Some("toml") => toml::from_str(&content).map_err(|e| InvoiceError::RecordParse {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?,
        Some("json") => serde_json::from_str(&content).map_err(|e| InvoiceError::RecordParse {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?,
        _ => return Err(InvoiceError::UnsupportedRecordFormat(path.to_path_buf())),
    };

    tracing::debug!(
        path = %path.display(),
        invoice = %record.invoice_number,
        items = record.items.len(),
        "loaded invoice record"
    );
    Ok(record)
}
