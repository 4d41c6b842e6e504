//! Log schemes
//!
//! A scheme is an immutable snapshot of filter state plus optional
//! overrides. Loading one replaces the logger's filter wholesale.

use crate::filter::FilterState;
use crate::observer::EmailConfig;
use crate::sink::Sink;

/// Reusable logger configuration, applied with `Logger::load_scheme`
#[derive(Debug, Clone, Default)]
pub struct LogScheme {
    filter: FilterState,
    out: Option<Sink>,
    err: Option<Sink>,
    history_length: Option<usize>,
    email: Option<EmailConfig>,
}

impl LogScheme {
    /// Everything enabled except `tags`
    pub fn disabled_tags<I, S>(tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::from_filter(FilterState::disabled(tags))
    }

    /// Only `tags` enabled. Empty mutes.
    pub fn solo_tags<I, S>(tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::from_filter(FilterState::solo(tags))
    }

    /// Nothing enabled
    pub fn mute_all() -> Self {
        Self::from_filter(FilterState::muted())
    }

    pub fn from_filter(filter: FilterState) -> Self {
        Self {
            filter,
            ..Default::default()
        }
    }

    // === Builders ===

    pub fn with_out_sink(mut self, sink: Sink) -> Self {
        self.out = Some(sink);
        self
    }

    pub fn with_err_sink(mut self, sink: Sink) -> Self {
        self.err = Some(sink);
        self
    }

    pub fn with_history_length(mut self, history_length: usize) -> Self {
        self.history_length = Some(history_length);
        self
    }

    pub fn with_email(mut self, email: EmailConfig) -> Self {
        self.email = Some(email);
        self
    }

    // === Accessors ===

    pub fn filter(&self) -> &FilterState {
        &self.filter
    }

    pub fn out_sink(&self) -> Option<&Sink> {
        self.out.as_ref()
    }

    pub fn err_sink(&self) -> Option<&Sink> {
        self.err.as_ref()
    }

    pub fn history_length(&self) -> Option<usize> {
        self.history_length
    }

    pub fn email(&self) -> Option<&EmailConfig> {
        self.email.as_ref()
    }
}
