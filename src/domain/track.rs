use super::key::TrackKey;

/// Represent one track of the loaded catalog
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrackRecord {
    pub key: TrackKey,
    pub artist: String,
    pub title: String,
    pub album: Option<String>,
    pub artwork: Option<String>,
}

impl TrackRecord {
    pub fn new(artist: &str, title: &str) -> Self {
        Self {
            key: TrackKey::new(artist, title),
            artist: artist.to_string(),
            title: title.to_string(),
            album: None,
            artwork: None,
        }
    }

    pub fn with_album(mut self, album: &str) -> Self {
        self.album = Some(album.to_string());
        self
    }

    /// The text a free-text query is matched against: artist, title and
    /// album joined into one field.
    pub fn search_text(&self) -> String {
        match &self.album {
            Some(album) => format!("{} {} {}", self.artist, self.title, album),
            None => format!("{} {}", self.artist, self.title),
        }
    }
}
