use std::collections::{HashMap, HashSet};

use log::warn;

use crate::{
    catalog::{error::LoadError, load},
    config::Resources,
    domain::{key::TrackKey, link::LinkState, track::TrackRecord},
};

/// Form used on both sides of a match: lowercased, runs of whitespace
/// collapsed to single spaces.
fn normalize(text: &str) -> String {
    text.to_lowercase()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

/// Filters the store down to tracks whose artist/title/album text contains
/// the query, case-insensitively.
///
/// A stable filter: results keep the store's original order. An empty (or
/// whitespace-only) query means "no filter" and returns the whole store.
pub fn search<'a>(query: &str, store: &'a [TrackRecord]) -> Vec<&'a TrackRecord> {
    let needle = normalize(query);
    if needle.is_empty() {
        return store.iter().collect();
    }

    store
        .iter()
        .filter(|track| normalize(&track.search_text()).contains(&needle))
        .collect()
}

/// Looks up a track's link state. Tracks the table has never heard of are
/// `Unresolved`, never an error.
pub fn resolve_state(key: &TrackKey, table: &HashMap<TrackKey, LinkState>) -> LinkState {
    table.get(key).cloned().unwrap_or(LinkState::Unresolved)
}

/// Per-state totals over the whole store.
#[derive(Debug, PartialEq, Eq)]
pub struct LinkStats {
    pub tracks: usize,
    pub validated: usize,
    pub unresolved: usize,
    pub not_available: usize,
}

/// Main structure holding one session's loaded catalog.
///
/// Built once at startup and read-only afterwards, so it can be shared
/// across threads without locking.
pub struct Catalog {
    tracks: Vec<TrackRecord>,
    links: HashMap<TrackKey, LinkState>,
}

impl Catalog {
    /// when called, reads and validates both resources
    pub fn load(resources: &Resources) -> Result<Self, LoadError> {
        let tracks = load::load_metadata(&resources.metadata)?;
        let links = load::load_links(&resources.links)?;
        Ok(Self::from_parts(tracks, links))
    }

    /// Link entries whose key matches no track are dropped here, so every
    /// later lookup is a plain map access.
    pub fn from_parts(
        tracks: Vec<TrackRecord>,
        mut links: HashMap<TrackKey, LinkState>,
    ) -> Self {
        let known: HashSet<&TrackKey> = tracks.iter().map(|t| &t.key).collect();
        let before = links.len();
        links.retain(|key, _| known.contains(key));

        let dangling = before - links.len();
        if dangling > 0 {
            warn!("ignoring {dangling} link entries with no matching track");
        }

        Self { tracks, links }
    }

    pub fn tracks(&self) -> &[TrackRecord] {
        &self.tracks
    }

    pub fn find(&self, key: &TrackKey) -> Option<&TrackRecord> {
        self.tracks.iter().find(|track| &track.key == key)
    }

    pub fn search(&self, query: &str) -> Vec<&TrackRecord> {
        search(query, &self.tracks)
    }

    pub fn resolve(&self, key: &TrackKey) -> LinkState {
        resolve_state(key, &self.links)
    }

    /// One query round-trip: matching tracks in store order, each paired
    /// with its resolved link state. The caller owns the result.
    pub fn results(&self, query: &str) -> Vec<(&TrackRecord, LinkState)> {
        self.search(query)
            .into_iter()
            .map(|track| {
                let state = self.resolve(&track.key);
                (track, state)
            })
            .collect()
    }

    pub fn stats(&self) -> LinkStats {
        let mut stats = LinkStats {
            tracks: self.tracks.len(),
            validated: 0,
            unresolved: 0,
            not_available: 0,
        };

        for track in &self.tracks {
            match self.resolve(&track.key) {
                LinkState::Validated { .. } => stats.validated += 1,
                LinkState::Unresolved => stats.unresolved += 1,
                LinkState::NotAvailable => stats.not_available += 1,
            }
        }

        stats
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;
    use crate::domain::{key::TrackKey, link::LinkState, track::TrackRecord};

    fn sample_store() -> Vec<TrackRecord> {
        vec![
            TrackRecord::new("Abc", "Song One").with_album("First Album"),
            TrackRecord::new("Xyz", "Song Two"),
            TrackRecord::new("Other", "Quiet Piece").with_album("Night Sessions"),
        ]
    }

    fn titles<'a>(results: &'a [&'a TrackRecord]) -> Vec<&'a str> {
        results.iter().map(|t| t.title.as_str()).collect()
    }

    #[test]
    fn empty_query_returns_full_store_in_order() {
        let store = sample_store();

        let results = search("", &store);

        assert_eq!(titles(&results), vec!["Song One", "Song Two", "Quiet Piece"]);
    }

    #[test]
    fn whitespace_query_behaves_as_empty() {
        let store = sample_store();

        assert_eq!(search("   ", &store).len(), store.len());
    }

    #[test]
    fn matching_is_case_insensitive() {
        let store = sample_store();

        assert_eq!(search("ABC", &store), search("abc", &store));
        assert_eq!(titles(&search("ABC", &store)), vec!["Song One"]);
    }

    #[test]
    fn query_matches_across_fields_in_store_order() {
        let store = sample_store();

        // "song" hits both Song One and Song Two, in store order
        assert_eq!(titles(&search("song", &store)), vec!["Song One", "Song Two"]);

        // album text is searchable too
        assert_eq!(titles(&search("night", &store)), vec!["Quiet Piece"]);

        // artist + title spanning the field separator
        assert_eq!(titles(&search("abc song", &store)), vec!["Song One"]);
    }

    #[test]
    fn ragged_whitespace_in_query_still_matches() {
        let store = sample_store();

        assert_eq!(titles(&search("  song   one ", &store)), vec!["Song One"]);
    }

    #[test]
    fn non_matching_query_returns_empty() {
        let store = sample_store();

        assert!(search("zzz", &store).is_empty());
    }

    #[test]
    fn repeated_searches_give_identical_results() {
        let store = sample_store();

        assert_eq!(search("song", &store), search("song", &store));
    }

    #[test]
    fn search_is_a_subsequence_of_the_store() {
        let store = sample_store();

        let results = search("o", &store);

        // every result appears in the store, and relative order is kept
        let mut last_index = 0;
        for track in results {
            let index = store.iter().position(|t| t == track).unwrap();
            assert!(index >= last_index);
            last_index = index;
        }
    }

    #[test]
    fn resolve_known_key_returns_table_entry() {
        let table = HashMap::from([(
            TrackKey::new("Abc", "Song One"),
            LinkState::Validated {
                video_id: "vid123".to_string(),
            },
        )]);

        assert_eq!(
            resolve_state(&TrackKey::new("Abc", "Song One"), &table),
            LinkState::Validated {
                video_id: "vid123".to_string()
            }
        );
    }

    #[test]
    fn resolve_unknown_key_defaults_to_unresolved() {
        let table = HashMap::new();

        assert_eq!(
            resolve_state(&TrackKey::new("Xyz", "Song Two"), &table),
            LinkState::Unresolved
        );
    }

    #[test]
    fn catalog_prunes_dangling_link_entries() {
        let links = HashMap::from([
            (
                TrackKey::new("Abc", "Song One"),
                LinkState::Validated {
                    video_id: "vid123".to_string(),
                },
            ),
            (TrackKey::new("Ghost", "Not A Track"), LinkState::NotAvailable),
        ]);

        let catalog = Catalog::from_parts(sample_store(), links);
        let stats = catalog.stats();

        assert_eq!(stats.tracks, 3);
        assert_eq!(stats.validated, 1);
        assert_eq!(stats.not_available, 0);
        assert_eq!(stats.unresolved, 2);
    }

    #[test]
    fn catalog_results_pair_tracks_with_states() {
        let links = HashMap::from([
            (
                TrackKey::new("Abc", "Song One"),
                LinkState::Validated {
                    video_id: "vid123".to_string(),
                },
            ),
            (TrackKey::new("Xyz", "Song Two"), LinkState::NotAvailable),
        ]);

        let catalog = Catalog::from_parts(sample_store(), links);
        let results = catalog.results("song");

        assert_eq!(results.len(), 2);
        assert_eq!(
            results[0].1,
            LinkState::Validated {
                video_id: "vid123".to_string()
            }
        );
        assert_eq!(results[1].1, LinkState::NotAvailable);
    }

    #[test]
    fn catalog_find_by_key() {
        let catalog = Catalog::from_parts(sample_store(), HashMap::new());

        assert_eq!(
            catalog
                .find(&TrackKey::new("Xyz", "Song Two"))
                .map(|t| t.title.as_str()),
            Some("Song Two")
        );
        assert!(catalog.find(&TrackKey::new("Nope", "Nothing")).is_none());
    }
}
