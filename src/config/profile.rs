use serde::{Deserialize, Serialize};

/// Business profile: the fixed content printed on every invoice
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct Profile {
    pub business: Business,
    pub bank: BankAccount,
    #[serde(default)]
    pub signature: Signature,
    pub contact: Contact,
    #[serde(default)]
    pub invoice: InvoiceSettings,
    #[serde(default)]
    pub export: ExportSettings,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct Business {
    pub name: String,
    #[serde(default)]
    pub tagline: Option<String>,
    #[serde(default)]
    pub logo: Option<String>,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct BankAccount {
    #[serde(default = "default_bank_heading")]
    pub heading: String,
    pub bank: String,
    pub account_name: String,
    pub account_number: String,
    #[serde(default)]
    pub branch: Option<String>,
}

fn default_bank_heading() -> String {
    "Please Kindly Deposit / Transfer Your Payment Into The Following Bank Account".to_string()
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct Signature {
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub signatory: Option<String>,
    #[serde(default = "default_signature_caption")]
    pub caption: String,
}

impl Default for Signature {
    fn default() -> Self {
        Self {
            image: None,
            signatory: None,
            caption: default_signature_caption(),
        }
    }
}

fn default_signature_caption() -> String {
    "Authorised Sign".to_string()
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct Contact {
    pub phone: String,
    pub email: String,
    /// QR image shown on the light page
    #[serde(default)]
    pub qr_light: Option<String>,
    /// QR image shown when dark mode is on
    #[serde(default)]
    pub qr_dark: Option<String>,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct InvoiceSettings {
    #[serde(default = "default_currency")]
    pub currency: String,
    #[serde(default = "default_strict")]
    pub strict: bool,
}

impl Default for InvoiceSettings {
    fn default() -> Self {
        Self {
            currency: default_currency(),
            strict: default_strict(),
        }
    }
}

fn default_currency() -> String {
    "USD".to_string()
}

fn default_strict() -> bool {
    true
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ExportSettings {
    #[serde(default = "default_output_dir")]
    pub output_dir: String,
    #[serde(default)]
    pub format: ExportFormat,
}

impl Default for ExportSettings {
    fn default() -> Self {
        Self {
            output_dir: default_output_dir(),
            format: ExportFormat::default(),
        }
    }
}

fn default_output_dir() -> String {
    "output".to_string()
}

#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    #[default]
    Html,
    Pdf,
}
