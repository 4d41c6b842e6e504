//! Tag filtering
//!
//! Decides per call whether a tag may produce output. The filter is either
//! unrestricted (everything except a disabled set) or solo (only an
//! allow-list). The two modes never coexist.

use std::collections::HashSet;

/// Active filter state
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FilterState {
    /// Every tag passes except the disabled ones
    Unrestricted { disabled: HashSet<String> },
    /// Only the allowed tags pass. Empty = muted.
    Solo { allowed: HashSet<String> },
}

impl Default for FilterState {
    fn default() -> Self {
        Self::Unrestricted {
            disabled: HashSet::new(),
        }
    }
}

impl FilterState {
    /// Unrestricted state with the given tags disabled
    pub fn disabled<I, S>(tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::Unrestricted {
            disabled: tags.into_iter().map(Into::into).collect(),
        }
    }

    /// Solo state allowing only the given tags
    pub fn solo<I, S>(tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::Solo {
            allowed: tags.into_iter().map(Into::into).collect(),
        }
    }

    /// Solo state with an empty allow-list
    pub fn muted() -> Self {
        Self::Solo {
            allowed: HashSet::new(),
        }
    }

    /// Check if a tag passes. Exact, case-sensitive comparison.
    pub fn allows(&self, tag: &str) -> bool {
        match self {
            Self::Unrestricted { disabled } => !disabled.contains(tag),
            Self::Solo { allowed } => allowed.contains(tag),
        }
    }
}

/// Tag filter owned by a logger
#[derive(Debug, Clone, Default)]
pub struct TagFilter {
    state: FilterState,
}

impl TagFilter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Check if `tag` may produce output
    pub fn is_enabled(&self, tag: &str) -> bool {
        self.state.allows(tag)
    }

    /// Enable or disable a single tag.
    ///
    /// Always leaves solo mode, even when `tag` was never part of the solo
    /// list. The disabled set starts empty after leaving solo, since it was
    /// cleared when solo mode was entered.
    pub fn set_tag(&mut self, tag: &str, enabled: bool) {
        if let FilterState::Solo { .. } = self.state {
            self.state = FilterState::default();
        }
        if let FilterState::Unrestricted { disabled } = &mut self.state {
            if enabled {
                disabled.remove(tag);
            } else {
                disabled.insert(tag.to_string());
            }
        }
    }

    /// Allow only `tags`, dropping any disabled set. Empty mutes everything.
    pub fn solo_tags<I, S>(&mut self, tags: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.state = FilterState::solo(tags);
    }

    /// Suppress every tag
    pub fn mute(&mut self) {
        self.state = FilterState::muted();
    }

    /// Replace the whole state (no merge)
    pub fn load_state(&mut self, state: FilterState) {
        self.state = state;
    }

    pub fn state(&self) -> &FilterState {
        &self.state
    }

    pub fn is_solo(&self) -> bool {
        matches!(self.state, FilterState::Solo { .. })
    }

    /// Solo mode with nothing allowed
    pub fn is_muted(&self) -> bool {
        matches!(&self.state, FilterState::Solo { allowed } if allowed.is_empty())
    }
}
