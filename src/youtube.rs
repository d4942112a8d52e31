use crate::{config::PublicEndpoint, domain::key::TrackKey};

/// Direct watch URL for a validated video id. Same shape the link-table
/// generator records next to each id.
pub fn watch_url(video_id: &str) -> String {
    format!("https://www.youtube.com/watch?v={video_id}")
}

/// Search-results fallback for a track without a trusted video id.
pub fn search_url(artist: &str, title: &str) -> String {
    let query = format!("{artist} {title}");
    format!(
        "https://www.youtube.com/results?search_query={}",
        urlencoding::encode(&query)
    )
}

/// returns url to be printed on QRs and NFCs
pub fn play_url(conf: &PublicEndpoint, key: &TrackKey) -> String {
    let base = conf.base_url.trim_end_matches('/');
    format!("{base}/play?k={}", urlencoding::encode(key.as_str()))
}
