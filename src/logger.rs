//! The logger
//!
//! Ties the tag filter, sinks, recent-log history and overlay together
//! behind one lock. Filter changes and log calls from different threads
//! never interleave halfway, and writes land in lock order.
//!
//! Caller code (a message's `Display` impl, an overlay presenter) always runs
//! with the lock released, so it may call back into the logger.

use crate::config::{Flavor, LoggerConfig};
use crate::constants::{ENCODING_FALLBACK_MESSAGE, TAG_SEPARATOR};
use crate::filter::{FilterState, TagFilter};
use crate::history::RecentLogBuffer;
use crate::observer::{EmailConfig, ExportDraft, OverlayPresenter};
use crate::scheme::LogScheme;
use crate::sink::Sink;
use parking_lot::Mutex;
use std::fmt::{self, Write as _};
use std::sync::{Arc, OnceLock};
use tracing::debug;

/// Tag-filtering line logger.
///
/// Construct one explicitly and pass it to call sites, or use [`shared`]
/// for the process-wide default.
pub struct Logger {
    inner: Mutex<LoggerState>,
}

struct LoggerState {
    filter: TagFilter,
    /// None when the UI variant is disabled
    history: Option<RecentLogBuffer>,
    overlay: Option<Arc<dyn OverlayPresenter>>,
    out: Sink,
    err: Sink,
    default_log_tag: String,
    default_err_log_tag: String,
    email: EmailConfig,
}

impl Default for Logger {
    fn default() -> Self {
        Self::new(&LoggerConfig::default())
    }
}

impl fmt::Debug for Logger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.inner.lock();
        f.debug_struct("Logger")
            .field("filter", state.filter.state())
            .field("out", &state.out)
            .field("err", &state.err)
            .field("default_log_tag", &state.default_log_tag)
            .field("history", &state.history.as_ref().map(|h| h.len()))
            .finish()
    }
}

impl Logger {
    /// Create a logger writing to stdout/stderr with an unrestricted filter,
    /// taking tags, history and email metadata from `config`
    pub fn new(config: &LoggerConfig) -> Self {
        let history = config
            .history_enabled
            .then(|| RecentLogBuffer::new(config.history_length));

        Self {
            inner: Mutex::new(LoggerState {
                filter: TagFilter::new(),
                history,
                overlay: None,
                out: Sink::Stdout,
                err: Sink::Stderr,
                default_log_tag: config.log_tag().to_string(),
                default_err_log_tag: config.err_log_tag().to_string(),
                email: config.email.clone(),
            }),
        }
    }

    /// Logger with the flavour's default tags and settings
    pub fn with_flavor(flavor: Flavor) -> Self {
        Self::new(&LoggerConfig {
            flavor,
            ..Default::default()
        })
    }

    // === Logging ===

    /// Write `"{tag}: {message}\n"` to `sink` if `tag` is enabled.
    ///
    /// Never fails. A disabled tag has no side effects at all. If `message`
    /// cannot be rendered, a fixed fallback line goes to the error sink and
    /// the history is left untouched.
    pub fn log(&self, message: impl fmt::Display, tag: &str, sink: &Sink) {
        self.log_line(&message, tag, sink);
    }

    /// Log with the default tag to the out sink
    pub fn log_default(&self, message: impl fmt::Display) {
        let (tag, sink) = {
            let state = self.inner.lock();
            (state.default_log_tag.clone(), state.out.clone())
        };
        self.log_line(&message, &tag, &sink);
    }

    /// Log with the default error tag to the err sink
    pub fn log_err(&self, message: impl fmt::Display) {
        let (tag, sink) = {
            let state = self.inner.lock();
            (state.default_err_log_tag.clone(), state.err.clone())
        };
        self.log_line(&message, &tag, &sink);
    }

    /// Filter under the lock, render without it, then write and record
    /// under it again. The filter decision is taken once, at entry.
    fn log_line(&self, message: &dyn fmt::Display, tag: &str, sink: &Sink) {
        if !self.is_enabled(tag) {
            return;
        }

        let Some(line) = render_line(tag, message) else {
            let state = self.inner.lock();
            write_to(&state.err, ENCODING_FALLBACK_MESSAGE.as_bytes());
            return;
        };

        let refresh = {
            let mut state = self.inner.lock();
            write_to(sink, line.as_bytes());
            state.record(line)
        };

        if let Some((overlay, text)) = refresh {
            overlay.set_display_text(&text);
        }
    }

    // === Filtering ===

    pub fn is_enabled(&self, tag: &str) -> bool {
        self.inner.lock().filter.is_enabled(tag)
    }

    /// Enable or disable one tag. Always clears solo mode.
    pub fn set_tag(&self, tag: &str, enabled: bool) {
        self.inner.lock().filter.set_tag(tag, enabled);
    }

    /// Allow only `tags`. Empty mutes everything.
    pub fn solo_tags<I, S>(&self, tags: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.inner.lock().filter.solo_tags(tags);
    }

    pub fn mute(&self) {
        self.inner.lock().filter.mute();
    }

    /// Snapshot of the current filter state
    pub fn filter_state(&self) -> FilterState {
        self.inner.lock().filter.state().clone()
    }

    /// Replace the filter state and apply every override the scheme carries
    pub fn load_scheme(&self, scheme: &LogScheme) {
        let mut state = self.inner.lock();
        state.filter.load_state(scheme.filter().clone());
        if let Some(out) = scheme.out_sink() {
            state.out = out.clone();
        }
        if let Some(err) = scheme.err_sink() {
            state.err = err.clone();
        }
        if let Some(length) = scheme.history_length() {
            state.set_history_length(length);
        }
        if let Some(email) = scheme.email() {
            state.email = email.clone();
        }
        debug!("Loaded scheme: {:?}", scheme.filter());
    }

    // === Configuration ===

    /// Sink used by `log_default`
    pub fn out_sink(&self) -> Sink {
        self.inner.lock().out.clone()
    }

    /// Sink used by `log_err` and the encoding fallback
    pub fn err_sink(&self) -> Sink {
        self.inner.lock().err.clone()
    }

    pub fn set_out_sink(&self, sink: Sink) {
        self.inner.lock().out = sink;
    }

    pub fn set_err_sink(&self, sink: Sink) {
        self.inner.lock().err = sink;
    }

    pub fn default_log_tag(&self) -> String {
        self.inner.lock().default_log_tag.clone()
    }

    pub fn set_default_log_tag(&self, tag: impl Into<String>) {
        self.inner.lock().default_log_tag = tag.into();
    }

    pub fn default_err_log_tag(&self) -> String {
        self.inner.lock().default_err_log_tag.clone()
    }

    pub fn set_default_err_log_tag(&self, tag: impl Into<String>) {
        self.inner.lock().default_err_log_tag = tag.into();
    }

    /// History bound, or None when history is disabled
    pub fn history_length(&self) -> Option<usize> {
        self.inner
            .lock()
            .history
            .as_ref()
            .map(RecentLogBuffer::history_length)
    }

    /// Change the history bound. Shrinking drops the oldest lines now.
    pub fn set_history_length(&self, history_length: usize) {
        self.inner.lock().set_history_length(history_length);
    }

    pub fn email(&self) -> EmailConfig {
        self.inner.lock().email.clone()
    }

    pub fn set_email(&self, email: EmailConfig) {
        self.inner.lock().email = email;
    }

    // === History, overlay and export ===

    /// Retained lines, oldest first
    pub fn history_lines(&self) -> Vec<String> {
        self.inner
            .lock()
            .history
            .as_ref()
            .map(|h| h.lines().map(String::from).collect())
            .unwrap_or_default()
    }

    /// Full rendered history, empty when history is disabled
    pub fn exportable_text(&self) -> String {
        self.inner.lock().rendered_history()
    }

    /// Export draft combining the email metadata and rendered history
    pub fn export_draft(&self) -> ExportDraft {
        let state = self.inner.lock();
        ExportDraft::new(&state.email, &state.rendered_history())
    }

    /// Attach an overlay and push the current history to it.
    ///
    /// Returns false (and drops the presenter) when there is no history to
    /// present.
    pub fn show_overlay(&self, presenter: Arc<dyn OverlayPresenter>) -> bool {
        let text = {
            let mut state = self.inner.lock();
            let Some(history) = &state.history else {
                debug!("Overlay requested without history, skipping");
                return false;
            };
            let text = history.render();
            state.overlay = Some(presenter.clone());
            text
        };
        presenter.set_display_text(&text);
        true
    }

    /// Detach the overlay. Returns false if none was visible.
    pub fn hide_overlay(&self) -> bool {
        self.inner.lock().overlay.take().is_some()
    }

    pub fn is_overlay_visible(&self) -> bool {
        self.inner.lock().overlay.is_some()
    }
}

impl LoggerState {
    /// Append to history. Returns the overlay to refresh and its new text.
    fn record(&mut self, line: String) -> Option<(Arc<dyn OverlayPresenter>, String)> {
        let history = self.history.as_mut()?;
        history.append(line);
        let overlay = self.overlay.clone()?;
        Some((overlay, history.render()))
    }

    fn set_history_length(&mut self, history_length: usize) {
        if let Some(history) = &mut self.history {
            history.set_history_length(history_length);
        }
    }

    fn rendered_history(&self) -> String {
        self.history
            .as_ref()
            .map(RecentLogBuffer::render)
            .unwrap_or_default()
    }
}

/// Render a log line. None if the message's `Display` impl fails.
fn render_line(tag: &str, message: &dyn fmt::Display) -> Option<String> {
    let mut line = String::new();
    write!(line, "{}{}{}", tag, TAG_SEPARATOR, message).ok()?;
    line.push('\n');
    Some(line)
}

fn write_to(sink: &Sink, bytes: &[u8]) {
    if let Err(e) = sink.write_line(bytes) {
        debug!("Sink write failed ({:?}): {}", sink, e);
    }
}

static SHARED: OnceLock<Logger> = OnceLock::new();

/// Process-wide default logger (GGLog flavour, stdout/stderr)
pub fn shared() -> &'static Logger {
    SHARED.get_or_init(Logger::default)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::mpsc;
    use std::thread;
    use std::time::Duration;

    struct Unprintable;

    impl fmt::Display for Unprintable {
        fn fmt(&self, _f: &mut fmt::Formatter<'_>) -> fmt::Result {
            Err(fmt::Error)
        }
    }

    #[derive(Clone, Default)]
    struct RecordingOverlay(Arc<Mutex<Vec<String>>>);

    impl OverlayPresenter for RecordingOverlay {
        fn set_display_text(&self, text: &str) {
            self.0.lock().push(text.to_string());
        }
    }

    fn captured_logger() -> (Logger, crate::sink::CaptureHandle, crate::sink::CaptureHandle) {
        let logger = Logger::default();
        let (out, out_handle) = Sink::capture();
        let (err, err_handle) = Sink::capture();
        logger.set_out_sink(out);
        logger.set_err_sink(err);
        (logger, out_handle, err_handle)
    }

    #[test]
    fn test_render_line_format() {
        assert_eq!(render_line("X", &"hello"), Some("X: hello\n".to_string()));
        assert_eq!(render_line("X", &42), Some("X: 42\n".to_string()));
        assert_eq!(render_line("X", &Unprintable), None);
    }

    #[test]
    fn test_log_enabled_writes_and_records() {
        let logger = Logger::default();
        let (sink, handle) = Sink::capture();

        logger.log("hello", "X", &sink);

        assert_eq!(handle.bytes(), b"X: hello\n".to_vec());
        assert_eq!(logger.history_lines(), vec!["X: hello\n".to_string()]);
    }

    #[test]
    fn test_log_disabled_has_no_effect() {
        let logger = Logger::default();
        let (sink, handle) = Sink::capture();
        logger.set_tag("X", false);

        logger.log("hello", "X", &sink);

        assert!(handle.is_empty());
        assert!(logger.history_lines().is_empty());
    }

    #[test]
    fn test_log_default_uses_out_sink_and_tag() {
        let (logger, out, err) = captured_logger();

        logger.log_default("started");

        assert_eq!(out.contents(), "GGLog: started\n");
        assert!(err.is_empty());
    }

    #[test]
    fn test_log_err_uses_err_sink_and_tag() {
        let (logger, out, err) = captured_logger();
        logger.set_default_err_log_tag("Oops");

        logger.log_err("failed");

        assert!(out.is_empty());
        assert_eq!(err.contents(), "Oops: failed\n");
    }

    #[test]
    fn test_dragon_flavor_tags() {
        let logger = Logger::with_flavor(Flavor::DragonLog);
        assert_eq!(logger.default_log_tag(), "DRLog");
        assert_eq!(logger.default_err_log_tag(), "DRLog");
    }

    #[test]
    fn test_unrenderable_message_falls_back_to_err_sink() {
        let (logger, out, err) = captured_logger();
        let (target, target_handle) = Sink::capture();

        logger.log(Unprintable, "X", &target);

        assert!(target_handle.is_empty());
        assert!(out.is_empty());
        assert_eq!(err.contents(), "Unable to convert string!\n");
        assert!(logger.history_lines().is_empty());
    }

    #[test]
    fn test_unrenderable_disabled_tag_is_silent() {
        let (logger, _out, err) = captured_logger();
        logger.mute();
        logger.log(Unprintable, "X", &Sink::Stdout);
        assert!(err.is_empty());
    }

    #[test]
    fn test_history_disabled_variant() {
        let logger = Logger::new(&LoggerConfig {
            history_enabled: false,
            ..Default::default()
        });
        let (sink, handle) = Sink::capture();

        logger.log("hello", "X", &sink);

        assert_eq!(handle.contents(), "X: hello\n");
        assert_eq!(logger.history_length(), None);
        assert_eq!(logger.exportable_text(), "");
    }

    #[test]
    fn test_set_history_length_shrinks() {
        let (logger, _out, _err) = captured_logger();
        for i in 0..5 {
            logger.log_default(i);
        }

        logger.set_history_length(2);

        assert_eq!(logger.history_length(), Some(2));
        assert_eq!(logger.exportable_text(), "GGLog: 3\nGGLog: 4\n");
    }

    #[test]
    fn test_overlay_receives_updates() {
        let (logger, _out, _err) = captured_logger();
        logger.log_default("before");

        let overlay = RecordingOverlay::default();
        assert!(logger.show_overlay(Arc::new(overlay.clone())));
        assert!(logger.is_overlay_visible());

        logger.log_default("after");
        logger.set_tag("hidden", false);
        logger.log("nope", "hidden", &Sink::Stdout);

        let shown = overlay.0.lock().clone();
        assert_eq!(
            shown,
            vec![
                "GGLog: before\n".to_string(),
                "GGLog: before\nGGLog: after\n".to_string(),
            ]
        );

        assert!(logger.hide_overlay());
        assert!(!logger.hide_overlay());
        assert!(!logger.is_overlay_visible());
        logger.log_default("later");
        assert_eq!(overlay.0.lock().len(), 2);
    }

    #[test]
    fn test_overlay_skipped_without_history() {
        let logger = Logger::new(&LoggerConfig {
            history_enabled: false,
            ..Default::default()
        });
        let overlay = RecordingOverlay::default();

        assert!(!logger.show_overlay(Arc::new(overlay.clone())));
        assert!(!logger.is_overlay_visible());
        assert!(overlay.0.lock().is_empty());
    }

    struct AsksLogger<'a>(&'a Logger);

    impl fmt::Display for AsksLogger<'_> {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            write!(f, "inner enabled={}", self.0.is_enabled("inner"))
        }
    }

    #[test]
    fn test_display_may_call_back_into_logger() {
        let logger = Arc::new(Logger::default());
        let (sink, handle) = Sink::capture();
        let (done_tx, done_rx) = mpsc::channel();

        let worker = {
            let logger = logger.clone();
            thread::spawn(move || {
                logger.log(AsksLogger(&logger), "X", &sink);
                let _ = done_tx.send(());
            })
        };

        assert!(
            done_rx.recv_timeout(Duration::from_secs(3)).is_ok(),
            "log() blocked while the message was rendering"
        );
        worker.join().unwrap();
        assert_eq!(handle.contents(), "X: inner enabled=true\n");
        assert_eq!(logger.history_lines(), vec!["X: inner enabled=true\n".to_string()]);
    }

    struct ReadBackOverlay {
        logger: std::sync::Weak<Logger>,
        seen: Mutex<Vec<String>>,
    }

    impl OverlayPresenter for ReadBackOverlay {
        fn set_display_text(&self, _text: &str) {
            if let Some(logger) = self.logger.upgrade() {
                self.seen.lock().push(logger.exportable_text());
            }
        }
    }

    #[test]
    fn test_overlay_may_read_logger() {
        let logger = Arc::new(Logger::default());
        logger.set_out_sink(Sink::capture().0);
        let overlay = Arc::new(ReadBackOverlay {
            logger: Arc::downgrade(&logger),
            seen: Mutex::new(Vec::new()),
        });
        let (done_tx, done_rx) = mpsc::channel();

        let worker = {
            let logger = logger.clone();
            let overlay = overlay.clone();
            thread::spawn(move || {
                logger.show_overlay(overlay);
                logger.log_default("one");
                let _ = done_tx.send(());
            })
        };

        assert!(
            done_rx.recv_timeout(Duration::from_secs(3)).is_ok(),
            "overlay refresh blocked on the logger"
        );
        worker.join().unwrap();
        assert_eq!(
            *overlay.seen.lock(),
            vec![String::new(), "GGLog: one\n".to_string()]
        );
    }

    #[test]
    fn test_email_from_config() {
        let logger = Logger::new(&LoggerConfig {
            email: EmailConfig {
                recipient: Some("dev@example.com".into()),
                ..Default::default()
            },
            ..Default::default()
        });
        assert_eq!(logger.email().recipient.as_deref(), Some("dev@example.com"));
    }

    #[test]
    fn test_export_draft_uses_email() {
        let (logger, _out, _err) = captured_logger();
        logger.set_email(EmailConfig {
            recipient: Some("dev@example.com".into()),
            subject: Some("Logs".into()),
            message_prefix: Some("Hi".into()),
        });
        logger.log_default("one");

        let draft = logger.export_draft();
        assert_eq!(draft.recipient.as_deref(), Some("dev@example.com"));
        assert_eq!(draft.body, "Hi\n\nGGLog: one\n");
    }

    #[test]
    fn test_load_scheme_applies_overrides() {
        let (logger, out, _err) = captured_logger();
        let (scheme_out, scheme_handle) = Sink::capture();
        let scheme = LogScheme::solo_tags(["GGLog"])
            .with_out_sink(scheme_out)
            .with_history_length(1);

        logger.load_scheme(&scheme);
        logger.log_default("a");
        logger.log_default("b");
        logger.log("c", "other", &Sink::Stdout);

        assert!(out.is_empty());
        assert_eq!(scheme_handle.contents(), "GGLog: a\nGGLog: b\n");
        assert_eq!(logger.history_lines(), vec!["GGLog: b\n".to_string()]);
    }

    #[test]
    fn test_load_scheme_without_overrides_keeps_sinks() {
        let (logger, out, _err) = captured_logger();
        logger.load_scheme(&LogScheme::mute_all());
        logger.load_scheme(&LogScheme::default());

        logger.log_default("x");

        assert_eq!(out.contents(), "GGLog: x\n");
        assert_eq!(logger.history_length(), Some(300));
    }

    #[test]
    fn test_logger_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Logger>();
    }

    #[test]
    fn test_shared_is_singleton() {
        assert!(std::ptr::eq(shared(), shared()));
    }
}
