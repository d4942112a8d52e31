use anyhow::Context;
use serde::Deserialize;
use std::path::PathBuf;

#[derive(Debug, Deserialize)]
pub struct Config {
    pub version: u32,
    pub resources: Resources,
    pub http: HttpConfig,
    #[serde(default)]
    pub site: SiteConfig,
    pub public_endpoint: Option<PublicEndpoint>,
}

impl Config {
    pub fn load(path: &str) -> anyhow::Result<Config> {
        let contents = std::fs::read_to_string(path).expect("Failed to read user config");
        toml::from_str(&contents).with_context(|| "Failed to parse config TOML")
    }
}

/// Where the two catalog files live
#[derive(Debug, Deserialize)]
pub struct Resources {
    pub metadata: PathBuf,
    pub links: PathBuf,
}

#[derive(Debug, Deserialize, Clone)]
pub struct HttpConfig {
    pub bind_addr: String,
    pub port: u16,
}

#[derive(Debug, Deserialize, Default, Clone)]
pub struct SiteConfig {
    pub assets_dir: Option<PathBuf>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct PublicEndpoint {
    pub base_url: String,
}
