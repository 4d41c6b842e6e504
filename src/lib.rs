//! taglog - tag-filtered line logging
//!
//! Writes `"<tag>: <message>\n"` lines to stdout, stderr or any writer.
//! Tags can be disabled one by one, a solo allow-list can be set, or
//! everything muted. Schemes bundle a filter state with sink and history
//! overrides. A bounded history of recent lines backs an optional overlay
//! and export.
//!
//! ```no_run
//! use taglog::{Logger, LogScheme, Sink};
//!
//! let logger = Logger::default();
//! logger.set_tag("verbose", false);
//! logger.log("connected", "net", &Sink::Stdout);
//! logger.load_scheme(&LogScheme::solo_tags(["net"]));
//! ```

pub mod cli;
pub mod config;
pub mod constants;
pub mod diagnostics;
pub mod error;
pub mod export;
pub mod filter;
pub mod history;
pub mod logger;
pub mod observer;
pub mod scheme;
pub mod sink;

pub use config::{Config, Flavor, LoggerConfig};
pub use error::{Result, TagLogError};
pub use filter::{FilterState, TagFilter};
pub use history::RecentLogBuffer;
pub use logger::{shared, Logger};
pub use observer::{EmailConfig, ExportDraft, OverlayPresenter};
pub use scheme::LogScheme;
pub use sink::{CaptureHandle, Sink, SinkTarget};

/// Log with the default tag through the shared logger
pub fn log(message: impl std::fmt::Display) {
    shared().log_default(message);
}

/// Log with the default error tag through the shared logger
pub fn log_err(message: impl std::fmt::Display) {
    shared().log_err(message);
}
