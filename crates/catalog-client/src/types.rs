//! Response payloads of the catalog API (only the fields we display).

use serde::Deserialize;

/// `GET /movie/{id}`
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct MovieDetails {
    pub id: u32,
    pub title: String,
    #[serde(default)]
    pub overview: Option<String>,
    #[serde(default)]
    pub poster_path: Option<String>,
    #[serde(default)]
    pub release_date: Option<String>,
    #[serde(default)]
    pub vote_average: Option<f32>,
    #[serde(default)]
    pub vote_count: Option<u32>,
    #[serde(default)]
    pub runtime: Option<u32>,
    #[serde(default)]
    pub tagline: Option<String>,
}

/// One entry of `GET /movie/popular`
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct PopularMovie {
    pub id: u32,
    pub title: String,
    #[serde(default)]
    pub poster_path: Option<String>,
    #[serde(default)]
    pub vote_average: Option<f32>,
    #[serde(default)]
    pub release_date: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PopularPage {
    pub page: u32,
    pub results: Vec<PopularMovie>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_details() {
        let raw = r#"{
            "adult": false,
            "id": 19995,
            "title": "Avatar",
            "poster_path": "/kyeqWdyUXW608qlYkRqosgbbJyK.jpg",
            "release_date": "2009-12-15",
            "vote_average": 7.6,
            "vote_count": 31000,
            "runtime": 162,
            "genres": [{"id": 28, "name": "Action"}]
        }"#;
        let details: MovieDetails = serde_json::from_str(raw).unwrap();
        assert_eq!(details.id, 19995);
        assert_eq!(details.poster_path.as_deref(), Some("/kyeqWdyUXW608qlYkRqosgbbJyK.jpg"));
        assert_eq!(details.vote_average, Some(7.6));
        assert!(details.tagline.is_none());
    }

    #[test]
    fn test_parse_popular_page_with_missing_poster() {
        let raw = r#"{
            "page": 1,
            "results": [
                {"id": 1, "title": "One", "poster_path": null, "vote_average": 6.1},
                {"id": 2, "title": "Two", "poster_path": "/two.jpg"}
            ],
            "total_pages": 500
        }"#;
        let page: PopularPage = serde_json::from_str(raw).unwrap();
        assert_eq!(page.results.len(), 2);
        assert!(page.results[0].poster_path.is_none());
        assert!(page.results[1].vote_average.is_none());
    }
}
