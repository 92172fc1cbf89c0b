//! The persisted build output: movie table plus similarity matrix.
//!
//! File layout (bincode): `(MAGIC, FORMAT_VERSION)` header, then the
//! catalog records and the similarity matrix. Loading checks the header and
//! row alignment before anything can query the result.

use crate::error::{EngineError, Result};
use data_loader::{load_metadata, Catalog, MovieMetadata};
use pipeline::FeatureBuilder;
use serde::{Deserialize, Serialize};
use similarity::SimilarityMatrix;
use std::fs::{self, File};
use std::io::{BufRead, BufReader, BufWriter, ErrorKind, Write};
use std::path::Path;
use std::time::Instant;
use tracing::{debug, info, instrument, warn};

const MAGIC: [u8; 4] = *b"RMSM";
pub const FORMAT_VERSION: u32 = 1;

#[derive(Serialize, Deserialize)]
struct ArtifactData {
    catalog: Catalog,
    similarity: SimilarityMatrix,
}

/// Row-aligned movie table and similarity matrix
#[derive(Debug, Clone)]
pub struct Artifact {
    catalog: Catalog,
    similarity: SimilarityMatrix,
}

impl Artifact {
    /// Pair a catalog with its similarity matrix, checking alignment
    pub fn from_parts(catalog: Catalog, similarity: SimilarityMatrix) -> Result<Self> {
        let (rows, cols) = similarity.as_array().dim();
        if rows != catalog.len() || cols != catalog.len() {
            return Err(EngineError::Dimension {
                movies: catalog.len(),
                rows,
                cols,
            });
        }
        Ok(Self {
            catalog,
            similarity,
        })
    }

    /// Run the offline build over parsed metadata: tags, tf-idf, cosine
    #[instrument(skip_all, fields(rows = metadata.len()))]
    pub fn build(metadata: Vec<MovieMetadata>) -> Result<Self> {
        let start = Instant::now();

        let features = FeatureBuilder::new().build(metadata)?;
        let catalog = Catalog::from_records(features.records);
        catalog.validate()?;

        let similarity = SimilarityMatrix::build(&features.matrix);
        let artifact = Self::from_parts(catalog, similarity)?;

        info!(
            "Built artifact for {} movies in {:?}",
            artifact.len(),
            start.elapsed()
        );
        Ok(artifact)
    }

    /// Load both raw tables and build
    pub fn build_from_files(movies_path: &Path, credits_path: &Path) -> Result<Self> {
        let metadata = load_metadata(movies_path, credits_path)?;
        Self::build(metadata)
    }

    /// Write the artifact to `path`.
    ///
    /// Data goes to a sibling temp file first and is renamed into place. On
    /// failure the temp file is removed, so nothing is left at either path.
    pub fn save(&self, path: &Path) -> Result<()> {
        let tmp = path.with_extension("partial");
        let result = self
            .write_to(&tmp)
            .and_then(|()| fs::rename(&tmp, path).map_err(EngineError::from));

        if let Err(e) = result {
            if let Err(cleanup) = fs::remove_file(&tmp) {
                if cleanup.kind() != ErrorKind::NotFound {
                    warn!("Could not remove {:?}: {}", tmp, cleanup);
                }
            }
            return Err(e);
        }

        info!("Saved artifact ({} movies) to {:?}", self.len(), path);
        Ok(())
    }

    fn write_to(&self, path: &Path) -> Result<()> {
        let mut writer = BufWriter::new(File::create(path)?);
        bincode::serialize_into(&mut writer, &(MAGIC, FORMAT_VERSION))?;
        bincode::serialize_into(&mut writer, &(&self.catalog, &self.similarity))?;
        writer.flush()?;
        Ok(())
    }

    /// Read and validate an artifact written by `save`
    pub fn load(path: &Path) -> Result<Self> {
        let mut reader = BufReader::new(File::open(path)?);

        let (magic, version): ([u8; 4], u32) =
            bincode::deserialize_from(&mut reader).map_err(|_| EngineError::InvalidFormat)?;
        if magic != MAGIC {
            return Err(EngineError::InvalidFormat);
        }
        if version != FORMAT_VERSION {
            return Err(EngineError::UnsupportedVersion {
                found: version,
                expected: FORMAT_VERSION,
            });
        }
        debug!("Artifact header ok (version {})", version);

        let data: ArtifactData = bincode::deserialize_from(&mut reader)?;
        if !reader.fill_buf()?.is_empty() {
            return Err(EngineError::InvalidFormat);
        }
        let artifact = Self::from_parts(data.catalog, data.similarity)?;

        info!("Loaded artifact ({} movies) from {:?}", artifact.len(), path);
        Ok(artifact)
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn similarity(&self) -> &SimilarityMatrix {
        &self.similarity
    }

    pub fn len(&self) -> usize {
        self.catalog.len()
    }

    pub fn is_empty(&self) -> bool {
        self.catalog.is_empty()
    }
}
