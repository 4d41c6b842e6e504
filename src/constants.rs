//! Application-wide constants
//!
//! Centralized constants to avoid duplication and ensure consistency.

// =============================================================================
// Tags
// =============================================================================

/// Default tag for the GGLog flavour
pub const GGLOG_TAG: &str = "GGLog";

/// Default tag for the DragonLog flavour
pub const DRAGON_LOG_TAG: &str = "DRLog";

// =============================================================================
// History
// =============================================================================

/// Number of rendered lines kept for the overlay and export
pub const DEFAULT_HISTORY_LENGTH: usize = 300;

// =============================================================================
// Output
// =============================================================================

/// Written to the error sink when a message cannot be rendered to text
pub const ENCODING_FALLBACK_MESSAGE: &str = "Unable to convert string!\n";

/// Separator between tag and message in a rendered line
pub const TAG_SEPARATOR: &str = ": ";

// =============================================================================
// Export
// =============================================================================

/// File name prefix for CLI exports (`taglog-export-<timestamp>.txt`)
pub const EXPORT_FILE_PREFIX: &str = "taglog-export";
