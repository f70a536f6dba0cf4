//! Fetched place collection, loading flag, and the derived filtered view.

use shared::protocol::Place;

#[derive(Debug)]
pub struct PlaceListController {
    places: Vec<Place>,
    loading: bool,
    search_text: String,
}

impl Default for PlaceListController {
    fn default() -> Self {
        Self {
            places: Vec::new(),
            loading: true,
            search_text: String::new(),
        }
    }
}

impl PlaceListController {
    pub fn new() -> Self {
        Self::default()
    }

    /// Settles a catalog fetch: the new collection replaces the old one
    /// wholesale and the loading flag drops. A failed fetch settles with an
    /// empty collection; there is no incremental merge.
    pub fn complete_load(&mut self, places: Vec<Place>) {
        self.places = places;
        self.loading = false;
    }

    /// While true the filtered view is not meaningful and the presentation
    /// layer shows a loading indicator instead of the (empty) list.
    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn places(&self) -> &[Place] {
        &self.places
    }

    /// Replaces the search text verbatim; case folding happens at match
    /// time, never on the stored text.
    pub fn set_search_text(&mut self, text: impl Into<String>) {
        self.search_text = text.into();
    }

    pub fn search_text(&self) -> &str {
        &self.search_text
    }

    /// Derives the filtered view over the current state, recomputed on
    /// every call. A place is included iff its name contains the search
    /// text case-insensitively, and either no category is selected or the
    /// place's category name equals the selection. Fetch order is
    /// preserved.
    pub fn filtered_places(&self, selected_category: Option<&str>) -> Vec<Place> {
        let needle = self.search_text.to_lowercase();
        self.places
            .iter()
            .filter(|place| place.name.to_lowercase().contains(&needle))
            .filter(|place| match selected_category {
                None => true,
                Some(selected) => place
                    .category
                    .as_ref()
                    .is_some_and(|category| category.name == selected),
            })
            .cloned()
            .collect()
    }
}
