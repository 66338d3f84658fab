//! Items for list controls.

use std::ops::Index;

use serde::{Deserialize, Serialize};

/// One entry of a list control: display text plus submitted value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ListItem {
    /// Text shown to the user.
    #[serde(default)]
    pub text: String,
    /// Value submitted with the form.
    #[serde(default)]
    pub value: String,
    #[serde(default)]
    pub selected: bool,
    #[serde(default = "default_enabled")]
    pub enabled: bool,
}

fn default_enabled() -> bool {
    true
}

impl ListItem {
    /// Create an item with distinct text and value.
    pub fn new(text: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            value: value.into(),
            selected: false,
            enabled: true,
        }
    }

    /// Create an item whose value equals its text.
    pub fn from_text(text: impl Into<String>) -> Self {
        let text = text.into();
        Self::new(text.clone(), text)
    }
}

/// Ordered collection of list items.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ListItemCollection {
    items: Vec<ListItem>,
}

impl ListItemCollection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, item: ListItem) {
        self.items.push(item);
    }

    pub fn remove(&mut self, index: usize) -> Option<ListItem> {
        if index < self.items.len() {
            Some(self.items.remove(index))
        } else {
            None
        }
    }

    /// First item with this value.
    pub fn find_by_value(&self, value: &str) -> Option<&ListItem> {
        self.items.iter().find(|item| item.value == value)
    }

    /// First item with this text.
    pub fn find_by_text(&self, text: &str) -> Option<&ListItem> {
        self.items.iter().find(|item| item.text == text)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ListItem> {
        self.items.iter()
    }
}

impl Index<usize> for ListItemCollection {
    type Output = ListItem;

    fn index(&self, index: usize) -> &ListItem {
        &self.items[index]
    }
}

impl FromIterator<ListItem> for ListItemCollection {
    fn from_iter<I: IntoIterator<Item = ListItem>>(iter: I) -> Self {
        Self {
            items: iter.into_iter().collect(),
        }
    }
}

impl<'a> IntoIterator for &'a ListItemCollection {
    type Item = &'a ListItem;
    type IntoIter = std::slice::Iter<'a, ListItem>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}
