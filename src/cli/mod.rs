use chrono::{DateTime, Local};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::config;
use crate::catalog::query::Catalog;
use crate::domain::{key::TrackKey, link::LinkState};
use crate::youtube;

#[derive(Parser)]
#[command(name = "tunedex")]
#[command(version = "0.1")]
#[command(about = "Searchable music catalog with validated YouTube links")]
pub struct Cli {
    /// Path to the config TOML file
    #[arg(short, long, default_value = "config.toml")]
    pub config: PathBuf,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Show catalog and link-table status
    Status,
    /// Search tracks and show where their links point
    Search {
        /// Free text matched against artist, title and album
        query: String,
    },
    /// Resolve the link state of a single track
    Resolve {
        #[arg(long)]
        artist: String,
        #[arg(long)]
        title: String,
    },
    /// Run http server hosting the search page and API
    Serve,
}

/// Entrypoint for CLI
pub fn run() {
    env_logger::init();

    let cli = Cli::parse();

    let cfg = config::Config::load(cli.config.to_str().unwrap()).unwrap();

    match &cli.command {
        Commands::Status => {
            let catalog = Catalog::load(&cfg.resources).unwrap();
            let stats = catalog.stats();

            println!("Catalog contains {} tracks", stats.tracks);
            println!("  [LINKED] validated video link: {}", stats.validated);
            println!("  [SEARCH] search-link fallback: {}", stats.unresolved);
            println!("  [NONE]   known unavailable:    {}", stats.not_available);

            match std::fs::metadata(&cfg.resources.links).and_then(|m| m.modified()) {
                Ok(modified) => {
                    let local: DateTime<Local> = modified.into();
                    println!("Link table was updated {}", local);
                }
                Err(_) => {
                    println!("Link table has not been generated yet");
                }
            }
        }

        Commands::Search { query } => {
            let catalog = Catalog::load(&cfg.resources).unwrap();
            let results = catalog.results(query);

            if results.is_empty() {
                println!("No tracks match \"{query}\"");
            }

            for (track, state) in results {
                println!("{} {} - {}", state.marker(), track.artist, track.title);

                match &state {
                    LinkState::Validated { video_id } => {
                        println!("    {}", youtube::watch_url(video_id));
                    }
                    LinkState::Unresolved => {
                        println!("    {}", youtube::search_url(&track.artist, &track.title));
                    }
                    LinkState::NotAvailable => {
                        println!("    no YouTube video for this track");
                    }
                }
            }
        }

        Commands::Resolve { artist, title } => {
            let catalog = Catalog::load(&cfg.resources).unwrap();
            let key = TrackKey::new(artist, title);

            if catalog.find(&key).is_none() {
                println!("Note: \"{artist} - {title}\" is not in the catalog");
            }

            match catalog.resolve(&key) {
                LinkState::Validated { video_id } => {
                    println!("[LINKED] {}", youtube::watch_url(&video_id));
                }
                LinkState::Unresolved => {
                    println!("[SEARCH] {}", youtube::search_url(artist, title));
                }
                LinkState::NotAvailable => {
                    println!("[NONE] no YouTube video for this track");
                }
            }

            if let Some(endpoint) = &cfg.public_endpoint {
                println!("Share: {}", youtube::play_url(endpoint, &key));
            }
        }

        Commands::Serve => {
            println!("Starting HTTP server...");

            let catalog = Catalog::load(&cfg.resources).expect("Failed to load catalog");

            let http_server = crate::http::server::HttpServer::new(catalog, cfg.http, cfg.site);

            println!(
                "HTTP server running at http://{}:{}",
                http_server.config.bind_addr, http_server.config.port
            );
            http_server.run();
        }
    }
}
