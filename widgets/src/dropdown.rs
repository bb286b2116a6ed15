//! Dropdown list state.
//!
//! A [`Dropdown`] owns an item list and an open/closed flag. It shows its
//! items only while open and non-empty, closes on an outside click, and
//! closes again after an item is chosen. An optional search query narrows
//! the visible items by label.

use serde::{Deserialize, Serialize};

use formkit_core::RuleCheck;

/// Something with a display label.
pub trait Labeled {
    /// Text shown for the item.
    fn label(&self) -> &str;
}

/// A `(label, value)` pair offered by a select or checkbox group.
///
/// # Examples
///
/// ```
/// use formkit_widgets::SelectOption;
///
/// let go = SelectOption::new("Go", "golang");
/// assert_eq!(go.label, "Go");
/// assert_eq!(go.value, "golang");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectOption {
    /// Text shown to the user.
    pub label: String,
    /// Value stored in the field when chosen.
    pub value: String,
}

impl SelectOption {
    /// Creates an option.
    pub fn new(label: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            value: value.into(),
        }
    }
}

impl Labeled for SelectOption {
    fn label(&self) -> &str {
        &self.label
    }
}

impl Labeled for RuleCheck {
    fn label(&self) -> &str {
        &self.label
    }
}

/// Open/closed list of items.
///
/// # Examples
///
/// ```
/// use formkit_widgets::{Dropdown, SelectOption};
///
/// let mut dropdown = Dropdown::new(vec![
///     SelectOption::new("Go", "golang"),
///     SelectOption::new("Java", "java"),
/// ]);
/// assert!(dropdown.visible_items().is_empty());
///
/// dropdown.toggle();
/// assert_eq!(dropdown.visible_items().len(), 2);
///
/// dropdown.set_query("ja");
/// assert_eq!(dropdown.visible_items().len(), 1);
///
/// let chosen = dropdown.choose(0).cloned();
/// assert_eq!(chosen.unwrap().value, "java");
/// assert!(!dropdown.is_open());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dropdown<T> {
    items: Vec<T>,
    open: bool,
    query: String,
}

impl<T> Default for Dropdown<T> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            open: false,
            query: String::new(),
        }
    }
}

impl<T: Labeled> Dropdown<T> {
    /// Creates a closed dropdown.
    pub fn new(items: Vec<T>) -> Self {
        Self {
            items,
            ..Self::default()
        }
    }

    /// Replaces the item list.
    pub fn set_items(&mut self, items: Vec<T>) {
        self.items = items;
    }

    /// All items, regardless of open state or query.
    pub fn items(&self) -> &[T] {
        &self.items
    }

    /// Returns `true` while the list is expanded.
    pub fn is_open(&self) -> bool {
        self.open
    }

    /// Flips the open state (click on the dropdown header).
    pub fn toggle(&mut self) {
        self.open = !self.open;
    }

    /// Closes the list (click outside the dropdown).
    pub fn close(&mut self) {
        self.open = false;
    }

    /// Narrows visible items to labels containing `query`, ignoring case.
    pub fn set_query(&mut self, query: impl Into<String>) {
        self.query = query.into();
    }

    /// Items currently shown: none while closed, otherwise those matching
    /// the search query.
    pub fn visible_items(&self) -> Vec<&T> {
        if !self.open {
            return Vec::new();
        }
        self.items
            .iter()
            .filter(|item| self.matches_query(*item))
            .collect()
    }

    /// Picks the `index`-th visible item and closes the list.
    ///
    /// Returns `None` if the list is closed or the index is out of range.
    pub fn choose(&mut self, index: usize) -> Option<&T> {
        if !self.open {
            return None;
        }
        let position = self
            .items
            .iter()
            .enumerate()
            .filter(|(_, item)| self.matches_query(*item))
            .nth(index)
            .map(|(position, _)| position)?;
        self.open = false;
        self.query.clear();
        self.items.get(position)
    }

    fn matches_query(&self, item: &T) -> bool {
        self.query.is_empty()
            || item
                .label()
                .to_lowercase()
                .contains(&self.query.to_lowercase())
    }
}
