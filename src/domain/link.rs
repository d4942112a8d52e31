use serde::Serialize;

/// Validation outcome for one track's YouTube presence.
///
/// The link-table generator leaves a track in one of three states: it found
/// and validated a video, it searched and found nothing acceptable, or it
/// has not gotten to the track yet. Tracks missing from the table entirely
/// are treated as `Unresolved`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum LinkState {
    /// A video id that passed the generator's title check; safe to link
    /// directly.
    Validated { video_id: String },
    /// No trusted video id. Rendered as a search-link fallback, never as a
    /// direct play link.
    Unresolved,
    /// The generator searched and found nothing acceptable.
    NotAvailable,
}

impl LinkState {
    /// Short marker used in CLI listings.
    pub fn marker(&self) -> &'static str {
        match self {
            LinkState::Validated { .. } => "[LINKED]",
            LinkState::Unresolved => "[SEARCH]",
            LinkState::NotAvailable => "[NONE]",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::LinkState;

    #[test]
    fn serializes_with_state_tag() {
        let state = LinkState::Validated {
            video_id: "vid123".to_string(),
        };
        let json = serde_json::to_value(&state).unwrap();
        assert_eq!(json["state"], "validated");
        assert_eq!(json["video_id"], "vid123");

        let json = serde_json::to_value(LinkState::NotAvailable).unwrap();
        assert_eq!(json["state"], "not_available");
    }
}
