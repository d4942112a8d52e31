use std::fmt::Display;

use serde::{Deserialize, Serialize};

/// Represents the track key.
///
/// A track is identified by the `"artist|title"` composite string, the
/// same key the link-table generator writes, so store and table line up
/// without any translation step.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TrackKey(String);

impl TrackKey {
    pub fn new(artist: &str, title: &str) -> Self {
        Self(format!("{artist}|{title}"))
    }

    pub fn from_raw(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for TrackKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::TrackKey;

    #[test]
    fn key_joins_artist_and_title_with_pipe() {
        let key = TrackKey::new("Abc", "Song One");
        assert_eq!(key.as_str(), "Abc|Song One");
    }

    #[test]
    fn raw_and_constructed_keys_are_equal() {
        assert_eq!(
            TrackKey::from_raw("Abc|Song One"),
            TrackKey::new("Abc", "Song One")
        );
    }
}
