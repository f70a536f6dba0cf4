//! Category list, selection, and picker visibility.

use shared::protocol::Category;

/// A pickable entry in the category picker.
///
/// `All` is the synthetic "no filter" choice. It is a dedicated variant
/// rather than a category literally named "All", so a real server category
/// with that name stays a normal, selectable filter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CategoryChoice {
    All,
    Category(String),
}

#[derive(Debug, Default)]
pub struct CategoryController {
    categories: Vec<Category>,
    selected: Option<String>,
    picker_open: bool,
}

impl CategoryController {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the fetched category list wholesale.
    pub fn set_categories(&mut self, categories: Vec<Category>) {
        self.categories = categories;
    }

    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    /// The pickable list: the "all" choice first, then every fetched
    /// category in server order.
    pub fn choices(&self) -> Vec<CategoryChoice> {
        let mut choices = Vec::with_capacity(self.categories.len() + 1);
        choices.push(CategoryChoice::All);
        choices.extend(
            self.categories
                .iter()
                .map(|category| CategoryChoice::Category(category.name.clone())),
        );
        choices
    }

    pub fn open_picker(&mut self) {
        self.picker_open = true;
    }

    pub fn close_picker(&mut self) {
        self.picker_open = false;
    }

    pub fn is_picker_open(&self) -> bool {
        self.picker_open
    }

    /// Applies a picker choice and closes the picker. This is the only
    /// operation that mutates the selection.
    pub fn choose(&mut self, choice: CategoryChoice) {
        self.selected = match choice {
            CategoryChoice::All => None,
            CategoryChoice::Category(name) => Some(name),
        };
        self.picker_open = false;
    }

    /// The active category filter; `None` means unfiltered.
    pub fn selected(&self) -> Option<&str> {
        self.selected.as_deref()
    }
}
