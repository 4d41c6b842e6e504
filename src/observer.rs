//! UI and export collaborators
//!
//! The logger holds no platform UI types. An overlay is anything that can
//! show a block of text; export produces a draft that a mail composer (or a
//! file writer) can consume.

use serde::{Deserialize, Serialize};

/// Display surface for the recent-log overlay
///
/// Called with the logger's lock released, so an implementation may read
/// back from or log through the same logger.
pub trait OverlayPresenter: Send + Sync {
    /// Replace the displayed text with the full rendered history
    fn set_display_text(&self, text: &str);
}

/// Optional metadata used to pre-populate an outgoing export message
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EmailConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub recipient: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subject: Option<String>,
    /// Placed before the log text in the message body
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message_prefix: Option<String>,
}

/// Ready-to-send export of the recent history
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportDraft {
    pub recipient: Option<String>,
    pub subject: Option<String>,
    pub body: String,
}

impl ExportDraft {
    /// Build a draft from email metadata and the rendered history
    pub fn new(email: &EmailConfig, text: &str) -> Self {
        let body = match &email.message_prefix {
            Some(prefix) if !prefix.is_empty() => format!("{}\n\n{}", prefix, text),
            _ => text.to_string(),
        };
        Self {
            recipient: email.recipient.clone(),
            subject: email.subject.clone(),
            body,
        }
    }
}
