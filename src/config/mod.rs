mod profile;

pub use profile::{
    BankAccount, Business, Contact, ExportFormat, ExportSettings, InvoiceSettings, Profile,
    Signature,
};

use crate::error::{InvoiceError, Result};
use directories::ProjectDirs;
use std::fs;
use std::path::{Path, PathBuf};

/// Get the config directory path (XDG config dir, or ~/.invoice-print/)
pub fn config_dir() -> Result<PathBuf> {
    if let Some(proj_dirs) = ProjectDirs::from("", "", "invoice-print") {
        return Ok(proj_dirs.config_dir().to_path_buf());
    }

    let home = dirs_home().ok_or_else(|| {
        InvoiceError::Io(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            "Could not determine home directory",
        ))
    })?;

    Ok(home.join(".invoice-print"))
}

fn dirs_home() -> Option<PathBuf> {
    std::env::var_os("HOME").map(PathBuf::from)
}

/// Expand ~ in paths
pub fn expand_path(path: &str) -> PathBuf {
    if let Some(rest) = path.strip_prefix("~/") {
        if let Some(home) = dirs_home() {
            return home.join(rest);
        }
    }
    PathBuf::from(path)
}

/// Resolve the configured output directory; relative paths live under the config dir
pub fn resolve_output_dir(output_dir: &str, config_dir: &Path) -> PathBuf {
    let path = expand_path(output_dir);
    if path.is_absolute() {
        path
    } else {
        config_dir.join(path)
    }
}

/// Load the business profile from config.toml
pub fn load_profile(config_dir: &Path) -> Result<Profile> {
    if !config_dir.exists() {
        return Err(InvoiceError::ConfigNotFound(config_dir.to_path_buf()));
    }
    let path = config_dir.join("config.toml");
    if !path.exists() {
        return Err(InvoiceError::ConfigFileNotFound(path));
    }
    let content = fs::read_to_string(&path)?;
    let profile = toml::from_str(&content).map_err(|e| InvoiceError::ConfigParse {
        path: path.clone(),
        source: e,
    })?;
    tracing::debug!(path = %path.display(), "loaded business profile");
    Ok(profile)
}

/// Template content for config.toml
pub const CONFIG_TEMPLATE: &str = r#"[business]
name = "Your Business Name"
tagline = "What your business does, in one line"
# logo = "/path/to/logo.png"        # optional, referenced by the print view

[bank]
bank = "Your Bank"
account_name = "Account Holder Name"
account_number = "00000000"
branch = "Main Branch"               # optional
# heading = "Please transfer your payment to the following bank account"

[signature]
# image = "/path/to/signature.png"  # optional
signatory = "A. N. Owner"
caption = "Authorised Sign"

[contact]
phone = "+1 555 0100"
email = "billing@yourbusiness.com"
# qr_light = "/path/to/qr.png"      # optional, used on the light page
# qr_dark = "/path/to/qr-dark.png"  # optional, used in dark mode

[invoice]
currency = "USD"
strict = true   # reject invoices without line items

[export]
output_dir = "output"   # relative to this directory, or an absolute / ~/ path
format = "html"         # html (print from the browser) or pdf (needs typst)
"#;

/// Template content for sample-invoice.toml; DATE is replaced on init
pub const SAMPLE_INVOICE_TEMPLATE: &str = r#"invoice_number = "0001"
date = "DATE"
client_name = "Example Client"
client_contact = "+1 555 0199"
# currency = "USD"        # optional, defaults to [invoice].currency
discount = "10"
advance = "0"
# red_note = "Payment is due within 14 days."

[[items]]
service = "Voice Over"
description = "30 second radio spot"
total = "100.00"

[[items]]
service = "Social Media"
description = "Campaign artwork"
amount = "50.50"
total = "50.50"
"#;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_template_parses() {
        let profile: Profile = toml::from_str(CONFIG_TEMPLATE).unwrap();
        assert_eq!(profile.business.name, "Your Business Name");
        assert_eq!(profile.signature.signatory.as_deref(), Some("A. N. Owner"));
        assert_eq!(profile.export.format, ExportFormat::Html);
    }

    #[test]
    fn relative_output_dir_is_under_config_dir() {
        let dir = Path::new("/tmp/invoice-print-cfg");
        assert_eq!(resolve_output_dir("output", dir), dir.join("output"));
        assert_eq!(
            resolve_output_dir("/var/invoices", dir),
            PathBuf::from("/var/invoices")
        );
    }

    #[test]
    fn missing_config_dir_is_reported() {
        let err = load_profile(Path::new("/nonexistent/invoice-print")).unwrap_err();
        assert!(matches!(err, InvoiceError::ConfigNotFound(_)));
    }
}
