use log::info;
use rouille::{Request, Response};
use serde::Serialize;
use std::sync::Arc;

use crate::{
    catalog::query::Catalog,
    config::{HttpConfig, SiteConfig},
    domain::{key::TrackKey, link::LinkState, track::TrackRecord},
    http::error::ApiError,
    youtube,
};

pub struct HttpServer {
    catalog: Arc<Catalog>,
    site: SiteConfig,
    pub config: HttpConfig,
}

impl HttpServer {
    pub fn new(catalog: Catalog, config: HttpConfig, site: SiteConfig) -> Self {
        Self {
            catalog: Arc::new(catalog),
            site,
            config,
        }
    }

    pub fn run(self) {
        let addr = format!("{}:{}", self.config.bind_addr, self.config.port);
        rouille::start_server(addr, move |request| self.handle_request(request));
    }

    fn handle_request(&self, request: &Request) -> Response {
        Self::log_request(request);

        let response = rouille::router!(request,
            (GET) (/) => {
                Self::handle_index()
            },

            (GET) (/api/tracks) => {
                self.handle_api_tracks(request)
            },

            (GET) (/play) => {
                self.handle_play(request)
            },

            (GET) (/assets/{name: String}) => {
                self.handle_asset(&name)
            },

            _ => Response::empty_404()
        );

        info!("Response: {} {}", request.method(), response.status_code);
        response
    }

    fn log_request(request: &Request) {
        info!("{} {}", request.method(), request.url());
    }

    fn handle_index() -> Response {
        Response::html(include_str!("../../html/index.html"))
    }

    /// JSON search endpoint backing the page. A missing `q` is the empty
    /// query, i.e. the full listing.
    fn handle_api_tracks(&self, request: &Request) -> Response {
        let query = request.get_param("q").unwrap_or_default();

        let results = self
            .catalog
            .results(&query)
            .into_iter()
            .map(|(track, state)| TrackResponse::from_domain(track, state))
            .collect::<Vec<_>>();

        Response::json(&results)
    }

    /// Sends the browser wherever this track's link state points: the
    /// validated video, a search-results fallback, or an explanatory page
    /// when the track is known to be unavailable.
    fn handle_play(&self, request: &Request) -> Response {
        let Some(raw_key) = request.get_param("k") else {
            return ApiError::BadRequest("missing track key".into()).into_response();
        };

        let key = TrackKey::from_raw(raw_key);

        let Some(track) = self.catalog.find(&key) else {
            return ApiError::NotFound(format!("track {key} not found")).into_response();
        };

        match self.catalog.resolve(&key) {
            LinkState::Validated { video_id } => {
                Response::redirect_302(youtube::watch_url(&video_id))
            }
            LinkState::Unresolved => {
                Response::redirect_302(youtube::search_url(&track.artist, &track.title))
            }
            LinkState::NotAvailable => Self::render_not_available(track),
        }
    }

    fn render_not_available(track: &TrackRecord) -> Response {
        let template = include_str!("../../html/not_available.html");
        Response::html(
            template
                .replace("{{ARTIST}}", &track.artist)
                .replace("{{TITLE}}", &track.title),
        )
    }

    /// Optional static files next to the page (stylesheets, icons). Only
    /// flat names inside the configured directory are served.
    fn handle_asset(&self, name: &str) -> Response {
        let Some(dir) = &self.site.assets_dir else {
            return Response::empty_404();
        };

        if name.contains("..") || name.contains('/') || name.contains('\\') {
            return ApiError::BadRequest("invalid asset path".into()).into_response();
        }

        let path = dir.join(name);
        let file = match std::fs::File::open(&path) {
            Ok(file) => file,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Response::empty_404(),
            Err(_) => return ApiError::Internal("internal server error".into()).into_response(),
        };

        let mime = mime_guess::from_path(&path)
            .first_or_octet_stream()
            .to_string();

        Response::from_file(mime, file)
    }
}

#[derive(Serialize)]
struct TrackResponse {
    key: String,
    artist: String,
    title: String,
    album: Option<String>,
    artwork: Option<String>,
    #[serde(flatten)]
    state: LinkState,
    url: Option<String>,
}

impl TrackResponse {
    fn from_domain(track: &TrackRecord, state: LinkState) -> Self {
        let url = match &state {
            LinkState::Validated { video_id } => Some(youtube::watch_url(video_id)),
            LinkState::Unresolved => Some(youtube::search_url(&track.artist, &track.title)),
            LinkState::NotAvailable => None,
        };

        Self {
            key: track.key.to_string(),
            artist: track.artist.clone(),
            title: track.title.clone(),
            album: track.album.clone(),
            artwork: track.artwork.clone(),
            state,
            url,
        }
    }
}

#[cfg(test)]
pub fn parse_json_response<T: serde::de::DeserializeOwned>(
    response: rouille::Response,
) -> anyhow::Result<T> {
    Ok(serde_json::from_reader(
        response.data.into_reader_and_size().0,
    )?)
}
