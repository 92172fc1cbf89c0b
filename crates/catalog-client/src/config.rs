use serde::Deserialize;

/// Catalog API configuration loaded from `TMDB_*` environment variables
#[derive(Debug, Deserialize, Clone)]
pub struct CatalogConfig {
    /// API key (`TMDB_API_KEY`)
    pub api_key: String,

    /// REST API base URL (`TMDB_API_URL`)
    #[serde(default = "default_api_url")]
    pub api_url: String,

    /// Poster image base URL (`TMDB_IMAGE_BASE_URL`)
    #[serde(default = "default_image_base_url")]
    pub image_base_url: String,

    /// Public website base URL (`TMDB_SITE_URL`)
    #[serde(default = "default_site_url")]
    pub site_url: String,

    /// Per-request timeout in seconds (`TMDB_TIMEOUT_SECS`)
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_api_url() -> String {
    "https://api.themoviedb.org/3".to_string()
}

fn default_image_base_url() -> String {
    "https://image.tmdb.org/t/p/w500".to_string()
}

fn default_site_url() -> String {
    "https://www.themoviedb.org".to_string()
}

fn default_timeout_secs() -> u64 {
    10
}

impl CatalogConfig {
    /// Load configuration from the environment, reading `.env` first if present
    pub fn from_env() -> Result<Self, envy::Error> {
        dotenvy::dotenv().ok();
        envy::prefixed("TMDB_").from_env::<CatalogConfig>()
    }

    /// Load configuration from explicit `(name, value)` pairs
    pub fn from_vars<I>(vars: I) -> Result<Self, envy::Error>
    where
        I: IntoIterator<Item = (String, String)>,
    {
        envy::prefixed("TMDB_").from_iter(vars)
    }
}
