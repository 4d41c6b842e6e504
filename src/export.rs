//! Export to file
//!
//! Writes an export draft as a plain-text message next to other exports,
//! for hosts without a mail composer.

use crate::constants::EXPORT_FILE_PREFIX;
use crate::error::{Result, TagLogError};
use crate::observer::ExportDraft;
use std::fmt::Write as _;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

/// Format a draft as a message with optional `To:`/`Subject:` headers
pub fn format_draft(draft: &ExportDraft) -> String {
    let mut text = String::new();
    if let Some(recipient) = &draft.recipient {
        let _ = writeln!(text, "To: {}", recipient);
    }
    if let Some(subject) = &draft.subject {
        let _ = writeln!(text, "Subject: {}", subject);
    }
    if !text.is_empty() {
        text.push('\n');
    }
    text.push_str(&draft.body);
    text
}

/// Write the draft to `<dir>/taglog-export-<timestamp>.txt`
pub fn write_export(draft: &ExportDraft, dir: &Path) -> Result<PathBuf> {
    let timestamp = chrono::Local::now().format("%Y%m%d_%H%M%S");
    let path = dir.join(format!("{}-{}.txt", EXPORT_FILE_PREFIX, timestamp));

    let io_err = |e: std::io::Error| TagLogError::Io {
        path: path.clone(),
        source: e,
    };
    let mut file = fs::File::create(&path).map_err(io_err)?;
    write!(file, "{}", format_draft(draft)).map_err(io_err)?;

    Ok(path)
}
