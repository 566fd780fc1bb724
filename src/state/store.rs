use std::sync::Arc;

use super::data::Photo;

/// The PhotoStore owns every photo from the manifest plus the subset the
/// current search selects.
///
/// `active` is always rebuilt as a new list, never edited in place. Photos
/// themselves are shared through `Arc`, so filtering never copies them.
#[derive(Debug, Default)]
pub struct PhotoStore {
    all: Vec<Arc<Photo>>,
    active: Vec<Arc<Photo>>,
    query: String,
}

impl PhotoStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the whole collection. The active list becomes unfiltered.
    pub fn set_all(&mut self, photos: Vec<Photo>) {
        self.all = photos.into_iter().map(Arc::new).collect();
        self.active = self.all.clone();
    }

    /// Recompute the active list from a free-text artist query
    ///
    /// Matching is a case-insensitive substring test on the artist only.
    /// A blank query means "no filter"; a query matching nothing leaves an
    /// empty active list.
    pub fn apply_query(&mut self, query: &str) -> &[Arc<Photo>] {
        self.query = query.to_string();
        let needle = query.trim().to_lowercase();

        self.active = if needle.is_empty() {
            self.all.clone()
        } else {
            self.all
                .iter()
                .filter(|photo| photo.artist.to_lowercase().contains(&needle))
                .cloned()
                .collect()
        };

        &self.active
    }

    /// Re-run the last query, e.g. after the manifest arrives late
    pub fn reapply(&mut self) -> &[Arc<Photo>] {
        let query = std::mem::take(&mut self.query);
        self.apply_query(&query)
    }

    pub fn all(&self) -> &[Arc<Photo>] {
        &self.all
    }

    pub fn active(&self) -> &[Arc<Photo>] {
        &self.active
    }

    pub fn query(&self) -> &str {
        &self.query
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn photo(file: &str, artist: &str) -> Photo {
        Photo {
            file: file.to_string(),
            artist: artist.to_string(),
            location: "Main Stage".to_string(),
            date: None,
        }
    }

    fn store() -> PhotoStore {
        let mut store = PhotoStore::new();
        store.set_all(vec![
            photo("1.jpg", "Jane Doe"),
            photo("2.jpg", "Sam"),
            photo("3.jpg", "JANELLE"),
            photo("4.jpg", "Mary Jane"),
        ]);
        store
    }

    fn files(photos: &[Arc<Photo>]) -> Vec<&str> {
        photos.iter().map(|p| p.file.as_str()).collect()
    }

    #[test]
    fn test_set_all_is_unfiltered() {
        let store = store();
        assert_eq!(files(store.active()), vec!["1.jpg", "2.jpg", "3.jpg", "4.jpg"]);
    }

    #[test]
    fn test_blank_query_is_no_filter() {
        let mut store = store();
        for query in ["", "   ", "\t\n"] {
            let active = store.apply_query(query).to_vec();
            assert_eq!(active.len(), store.all().len());
            for (a, b) in active.iter().zip(store.all()) {
                assert!(Arc::ptr_eq(a, b));
            }
        }
    }

    #[test]
    fn test_query_matches_artist_case_insensitively_in_order() {
        let mut store = store();
        assert_eq!(files(store.apply_query("Jane")), vec!["1.jpg", "3.jpg", "4.jpg"]);
        assert_eq!(files(store.apply_query("  jAnE ")), vec!["1.jpg", "3.jpg", "4.jpg"]);
    }

    #[test]
    fn test_query_ignores_location() {
        let mut store = store();
        assert!(store.apply_query("stage").is_empty());
    }

    #[test]
    fn test_no_match_is_empty_not_error() {
        let mut store = store();
        assert!(store.apply_query("nobody").is_empty());
        assert_eq!(store.all().len(), 4);
    }

    #[test]
    fn test_reapply_uses_stored_query() {
        let mut store = PhotoStore::new();
        store.apply_query("sam");
        assert!(store.active().is_empty());

        store.set_all(vec![photo("1.jpg", "Jane Doe"), photo("2.jpg", "Sam")]);
        assert_eq!(files(store.reapply()), vec!["2.jpg"]);
        assert_eq!(store.query(), "sam");
    }
}
