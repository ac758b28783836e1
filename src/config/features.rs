//! Feature flags for optional behaviour.

use serde::Deserialize;

/// How the add flow decides whether a movie already exists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DuplicateCheck {
    /// Historical behaviour: the entered title is looked up among the
    /// top-level keys of the catalog document, not among movie titles.
    ///
    /// In practice only a title of exactly `movies` is rejected. Kept as the
    /// default so existing catalogs behave as they always have.
    #[default]
    Legacy,
    /// Case-insensitive comparison against every movie's title.
    Title,
}

impl DuplicateCheck {
    /// Parses a duplicate-check mode.
    ///
    /// Returns `None` for unknown names.
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "legacy" => Some(Self::Legacy),
            "title" => Some(Self::Title),
            _ => None,
        }
    }

    /// Returns the mode name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Legacy => "legacy",
            Self::Title => "title",
        }
    }
}

/// Feature flags for controlling optional moviedb behaviour.
#[derive(Debug, Clone, Copy, Default)]
pub struct FeatureFlags {
    /// Existence check used when adding a movie.
    pub duplicate_check: DuplicateCheck,
}

impl FeatureFlags {
    /// Creates feature flags with the corrected behaviour switched on.
    #[must_use]
    pub const fn corrected() -> Self {
        Self {
            duplicate_check: DuplicateCheck::Title,
        }
    }
}
