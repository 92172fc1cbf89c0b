//! Server crate for the content-similarity recommender.
//!
//! This crate owns the artifact lifecycle and the query surface:
//! - `Artifact`: offline build, bincode save/load with alignment checks
//! - `Recommender`: title/id resolution, top-k recommendations, search,
//!   suggestions and catalog statistics
//! - `Session`: caller-owned watchlist, kept outside the engine
//!
//! The process entry point loads one artifact and hands it to a
//! `Recommender`; nothing is loaded implicitly.

pub mod artifact;
pub mod error;
pub mod fuzzy;
pub mod recommender;
pub mod session;

pub use artifact::{Artifact, FORMAT_VERSION};
pub use error::{EngineError, Result};
pub use recommender::{
    MovieRecommendation, Recommender, DEFAULT_SUGGESTIONS, DEFAULT_SUGGESTION_CUTOFF,
};
pub use session::Session;
pub use similarity::DEFAULT_K;
