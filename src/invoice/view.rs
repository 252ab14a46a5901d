use std::path::PathBuf;

use super::balance::Strictness;
use super::document::{render_document, InvoiceDocument, RenderOptions};
use super::record::InvoiceRecord;
use crate::config::Profile;
use crate::error::Result;
use crate::export::{request_export, Exporter};

/// Two-state dark mode switch
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DarkMode {
    #[default]
    Off,
    On,
}

impl DarkMode {
    pub fn toggled(self) -> Self {
        match self {
            DarkMode::Off => DarkMode::On,
            DarkMode::On => DarkMode::Off,
        }
    }

    pub fn is_on(self) -> bool {
        self == DarkMode::On
    }
}

impl From<bool> for DarkMode {
    fn from(on: bool) -> Self {
        if on {
            DarkMode::On
        } else {
            DarkMode::Off
        }
    }
}

/// One rendering session: a record, the profile, and the dark mode switch.
///
/// The view holds no figures of its own; every document comes fresh from
/// [`render_document`].
pub struct InvoiceView<'a> {
    record: &'a InvoiceRecord,
    profile: &'a Profile,
    strictness: Strictness,
    dark_mode: DarkMode,
}

impl<'a> InvoiceView<'a> {
    pub fn new(record: &'a InvoiceRecord, profile: &'a Profile, strictness: Strictness) -> Self {
        Self {
            record,
            profile,
            strictness,
            dark_mode: DarkMode::Off,
        }
    }

    pub fn dark_mode(&self) -> DarkMode {
        self.dark_mode
    }

    pub fn set_dark_mode(&mut self, mode: DarkMode) {
        self.dark_mode = mode;
    }

    pub fn toggle_dark_mode(&mut self) -> DarkMode {
        self.dark_mode = self.dark_mode.toggled();
        tracing::debug!(dark_mode = ?self.dark_mode, "toggled dark mode");
        self.dark_mode
    }

    pub fn options(&self) -> RenderOptions {
        RenderOptions {
            dark_mode: self.dark_mode.is_on(),
            strictness: self.strictness,
        }
    }

    pub fn document(&self) -> Result<InvoiceDocument> {
        Ok(render_document(self.record, self.profile, self.options())?)
    }

    /// Render the current document and hand it to the exporter
    pub fn export(&self, exporter: &dyn Exporter) -> Result<PathBuf> {
        let document = self.document()?;
        request_export(&document, exporter)
    }
}
