//! HTTP client for the third-party movie catalog (TMDB).
//!
//! This crate provides a Rust client for the display data the recommender
//! itself never needs:
//! - Movie details (poster path, aggregate rating) keyed by movie id
//! - The popular-movies listing
//! - Poster and movie page URLs
//!
//! Callers treat every error here as display-only: a failed lookup means a
//! missing poster or rating, never a failed recommendation.

pub mod config;
pub mod types;

use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, error, info};

pub use config::CatalogConfig;
pub use types::{MovieDetails, PopularMovie, PopularPage};

/// Errors that can occur when talking to the catalog API
#[derive(Error, Debug)]
pub enum CatalogClientError {
    #[error("Invalid catalog API configuration: {0}")]
    Config(#[from] envy::Error),

    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Catalog API returned status {status}: {body}")]
    Status { status: u16, body: String },
}

pub type Result<T> = std::result::Result<T, CatalogClientError>;

/// Client for the catalog API.
///
/// Cheap to clone; clones share one connection pool.
#[derive(Clone)]
pub struct CatalogClient {
    http_client: Client,
    config: CatalogConfig,
}

impl CatalogClient {
    /// Build a client from explicit configuration
    pub fn new(config: CatalogConfig) -> Result<Self> {
        let http_client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;
        info!("Catalog client ready for {}", config.api_url);
        Ok(Self {
            http_client,
            config,
        })
    }

    /// Build a client from `TMDB_*` environment variables (and `.env`)
    pub fn from_env() -> Result<Self> {
        Self::new(CatalogConfig::from_env()?)
    }

    pub fn config(&self) -> &CatalogConfig {
        &self.config
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str, query: &[(&str, String)]) -> Result<T> {
        let url = format!("{}{}", self.config.api_url.trim_end_matches('/'), path);
        debug!("GET {}", url);

        let response = self
            .http_client
            .get(&url)
            .query(&[("api_key", self.config.api_key.as_str())])
            .query(query)
            .send()
            .await?;

        let status = response.status();
        if status != StatusCode::OK {
            let body = response.text().await.unwrap_or_default();
            error!("Catalog API returned {} for {}", status, path);
            return Err(CatalogClientError::Status {
                status: status.as_u16(),
                body,
            });
        }

        Ok(response.json().await?)
    }

    /// Details for one movie; `poster_path` and `vote_average` may be absent
    pub async fn movie_details(&self, movie_id: u32) -> Result<MovieDetails> {
        self.get_json(&format!("/movie/{movie_id}"), &[]).await
    }

    /// One page (1-based) of the popular-movies listing
    pub async fn popular_movies(&self, page: u32) -> Result<Vec<PopularMovie>> {
        let listing: PopularPage = self
            .get_json(
                "/movie/popular",
                &[("language", "en-US".to_string()), ("page", page.max(1).to_string())],
            )
            .await?;
        debug!("Popular page {} has {} movies", listing.page, listing.results.len());
        Ok(listing.results)
    }

    /// Full image URL for a poster path such as `/kqjL17yufvn9OVLyXYpvtyrFfak.jpg`
    pub fn poster_url(&self, poster_path: &str) -> String {
        format!(
            "{}/{}",
            self.config.image_base_url.trim_end_matches('/'),
            poster_path.trim_start_matches('/')
        )
    }

    /// Public web page of a movie
    pub fn movie_page_url(&self, movie_id: u32) -> String {
        format!("{}/movie/{}", self.config.site_url.trim_end_matches('/'), movie_id)
    }
}
