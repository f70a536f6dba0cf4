//! Detail-overlay selection state.

use shared::protocol::Place;

#[derive(Debug, Default)]
pub struct SelectionController {
    selected: Option<Place>,
    visible: bool,
}

impl SelectionController {
    pub fn new() -> Self {
        Self::default()
    }

    /// Opens the detail overlay on a place.
    pub fn open(&mut self, place: Place) {
        self.selected = Some(place);
        self.visible = true;
    }

    /// Closes the overlay and clears the selection immediately; nothing is
    /// retained for a closing transition.
    pub fn close(&mut self) {
        self.visible = false;
        self.selected = None;
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn selected(&self) -> Option<&Place> {
        self.selected.as_ref()
    }
}
