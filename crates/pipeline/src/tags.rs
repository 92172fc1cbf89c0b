//! Tag string derivation.

use data_loader::{MovieMetadata, MovieRecord};
use rayon::prelude::*;

/// Concatenate genres, keywords, cast and directors (in that order), join
/// with single spaces and lower-case the result.
///
/// Terms repeated across categories are kept; repetition raises their term
/// frequency.
pub fn build_tags(
    genres: &[String],
    keywords: &[String],
    cast: &[String],
    directors: &[String],
) -> String {
    genres
        .iter()
        .chain(keywords)
        .chain(cast)
        .chain(directors)
        .map(String::as_str)
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

/// Tags for one parsed catalog row
pub fn tags_for(metadata: &MovieMetadata) -> String {
    build_tags(
        &metadata.genres,
        &metadata.keywords,
        &metadata.cast,
        &metadata.crew,
    )
}

/// Derive tags for every row, keeping row order
pub fn tag_metadata(metadata: Vec<MovieMetadata>) -> Vec<MovieRecord> {
    metadata
        .into_par_iter()
        .map(|m| {
            let tags = tags_for(&m);
            MovieRecord::from_metadata(m, tags)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_build_tags_fixed_order_lowercased() {
        let tags = build_tags(
            &strings(&["Action", "Science Fiction"]),
            &strings(&["Space War"]),
            &strings(&["Sam Worthington"]),
            &strings(&["James Cameron"]),
        );
        assert_eq!(tags, "action science fiction space war sam worthington james cameron");
    }

    #[test]
    fn test_build_tags_keeps_duplicates() {
        let tags = build_tags(
            &strings(&["Drama"]),
            &strings(&["drama"]),
            &[],
            &[],
        );
        assert_eq!(tags, "drama drama");
    }

    #[test]
    fn test_build_tags_empty() {
        assert_eq!(build_tags(&[], &[], &[], &[]), "");
    }

    #[test]
    fn test_tags_independent_of_row_position() {
        let meta = |id: u32| MovieMetadata {
            movie_id: id,
            title: format!("Movie {id}"),
            overview: String::new(),
            genres: strings(&["Action"]),
            keywords: strings(&["heist"]),
            cast: strings(&["X"]),
            crew: strings(&["D1"]),
            year: None,
            vote_average: None,
        };
        let records = tag_metadata(vec![meta(1), meta(2), meta(3)]);
        assert_eq!(records.len(), 3);
        assert!(records.iter().all(|r| r.tags == "action heist x d1"));
        assert_eq!(records[2].movie_id, 3);
    }
}
