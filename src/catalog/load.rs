//! Module to load the two catalog resources: the scraped album metadata
//! and the generated YouTube link table.

use std::{
    collections::{HashMap, HashSet},
    path::Path,
};

use log::warn;
use serde::Deserialize;

use crate::{
    catalog::error::LoadError,
    domain::{key::TrackKey, link::LinkState, track::TrackRecord},
};

/// One album as the scraper wrote it. Only the fields the catalog cares
/// about are listed; everything else in the document is ignored.
#[derive(Debug, Deserialize)]
struct AlbumDoc {
    #[serde(default)]
    artist: Option<String>,
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    image_url: Option<String>,
    #[serde(default)]
    tracks: Option<Vec<TrackDoc>>,
}

#[derive(Debug, Deserialize)]
struct TrackDoc {
    #[serde(default)]
    name: Option<String>,
}

/// One link-table value. The table maps `"artist|track"` to either `null`
/// (searched, nothing acceptable found) or an object carrying the
/// validated video id.
#[derive(Debug, Deserialize)]
struct LinkDoc {
    #[serde(default)]
    video_id: Option<String>,
}

/// Reads the metadata resource and flattens its albums into track records.
///
/// A missing or malformed file is an error: the catalog cannot function
/// without its metadata.
pub fn load_metadata(path: &Path) -> Result<Vec<TrackRecord>, LoadError> {
    let contents = std::fs::read_to_string(path).map_err(|source| LoadError::Read {
        path: path.to_path_buf(),
        source,
    })?;

    let albums: Vec<AlbumDoc> =
        serde_json::from_str(&contents).map_err(|source| LoadError::Malformed {
            path: path.to_path_buf(),
            source,
        })?;

    Ok(flatten_albums(albums))
}

/// Albums without an artist or tracks, and tracks without a name, are
/// skipped; a key seen twice keeps its first record. Matches what the
/// link-table generator does when it walks the same file.
fn flatten_albums(albums: Vec<AlbumDoc>) -> Vec<TrackRecord> {
    let mut seen: HashSet<TrackKey> = HashSet::new();
    let mut records = Vec::new();

    for album in albums {
        let Some(artist) = album.artist.filter(|a| !a.is_empty()) else {
            continue;
        };
        let Some(tracks) = album.tracks else {
            continue;
        };
        let album_title = album.title.filter(|t| !t.is_empty());

        for track in tracks {
            let Some(name) = track.name.filter(|n| !n.is_empty()) else {
                continue;
            };

            let key = TrackKey::new(&artist, &name);
            if !seen.insert(key.clone()) {
                continue;
            }

            records.push(TrackRecord {
                key,
                artist: artist.clone(),
                title: name,
                album: album_title.clone(),
                artwork: album.image_url.clone(),
            });
        }
    }

    records
}

/// Reads the link-table resource.
///
/// The table is regenerated out-of-band and may not exist yet; an absent
/// file loads as an empty table so the catalog still works, every track
/// falling back to its search link. A present but malformed file is an
/// error.
pub fn load_links(path: &Path) -> Result<HashMap<TrackKey, LinkState>, LoadError> {
    let contents = match std::fs::read_to_string(path) {
        Ok(contents) => contents,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            warn!("link table {} not found, starting without links", path.display());
            return Ok(HashMap::new());
        }
        Err(source) => {
            return Err(LoadError::Read {
                path: path.to_path_buf(),
                source,
            });
        }
    };

    let entries: HashMap<String, Option<LinkDoc>> =
        serde_json::from_str(&contents).map_err(|source| LoadError::Malformed {
            path: path.to_path_buf(),
            source,
        })?;

    Ok(entries
        .into_iter()
        .map(|(raw, doc)| (TrackKey::from_raw(raw), link_state(doc)))
        .collect())
}

fn link_state(doc: Option<LinkDoc>) -> LinkState {
    match doc {
        None => LinkState::NotAvailable,
        Some(LinkDoc { video_id: Some(id) }) if !id.is_empty() => {
            LinkState::Validated { video_id: id }
        }
        Some(_) => LinkState::Unresolved,
    }
}
