// SPDX-License-Identifier: MPL-2.0
//! Core search result types for the domain layer.
//!
//! These types represent pure data without any presentation dependencies.

/// Stable identifier of an image within the search provider.
pub type ItemId = u64;

/// A single image returned by the search provider.
///
/// Immutable once received: the presentation layer only ever reads it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResultItem {
    /// Provider identifier, unique within one query's result set.
    pub id: ItemId,
    /// Small rendition used in the grid.
    pub thumbnail_url: String,
    /// Large rendition used in the lightbox.
    pub preview_url: String,
    /// Original full-resolution image.
    pub full_url: String,
    /// Name of the photographer to credit.
    pub attribution_name: String,
    /// Original width in pixels.
    pub width: u32,
    /// Original height in pixels.
    pub height: u32,
}

impl ResultItem {
    /// Formats the original dimensions as `width × height`.
    #[must_use]
    pub fn dimensions_label(&self) -> String {
        format!("{} × {}", self.width, self.height)
    }
}

/// One page of results as returned by an image search call.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PageResponse {
    /// Items in server order.
    pub items: Vec<ResultItem>,
    /// Total number of matches reported by the server, when known.
    pub total_available: Option<u64>,
}

impl PageResponse {
    /// Creates a response without a total count.
    #[must_use]
    pub fn new(items: Vec<ResultItem>) -> Self {
        Self {
            items,
            total_available: None,
        }
    }

    /// Sets the total number of matches reported by the server.
    #[must_use]
    pub fn with_total(mut self, total: u64) -> Self {
        self.total_available = Some(total);
        self
    }

    /// Returns true when the page carries no items.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// Ordered, append-only collection of results for one query.
///
/// Insertion order equals server order. Pages of the same query are
/// appended; a new query replaces the whole set.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ResultSet {
    items: Vec<ResultItem>,
}

impl ResultSet {
    /// Creates an empty result set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the whole set with a fresh first page.
    pub fn replace(&mut self, items: Vec<ResultItem>) {
        self.items = items;
    }

    /// Appends a subsequent page, keeping server order.
    pub fn append(&mut self, items: Vec<ResultItem>) {
        self.items.extend(items);
    }

    /// Looks up an item by its provider identifier.
    #[must_use]
    pub fn get(&self, id: ItemId) -> Option<&ResultItem> {
        self.items.iter().find(|item| item.id == id)
    }

    /// Returns the items in insertion order.
    #[must_use]
    pub fn items(&self) -> &[ResultItem] {
        &self.items
    }

    /// Returns an iterator over the items in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &ResultItem> {
        self.items.iter()
    }

    /// Returns the number of items.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns true if the set is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

#[cfg(test)]
pub(crate) fn sample_item(id: ItemId) -> ResultItem {
    ResultItem {
        id,
        thumbnail_url: format!("https://images.example/{id}/medium.jpg"),
        preview_url: format!("https://images.example/{id}/large.jpg"),
        full_url: format!("https://images.example/{id}/original.jpg"),
        attribution_name: format!("Photographer {id}"),
        width: 4000,
        height: 3000,
    }
}
