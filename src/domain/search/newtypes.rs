// SPDX-License-Identifier: MPL-2.0
//! Search newtypes.
//!
//! This module provides type-safe wrappers for search values,
//! ensuring they are always within valid ranges.

use std::fmt;

// =============================================================================
// Page Size Bounds
// =============================================================================

/// Page size bounds (1 to 80 items, the search API maximum).
pub mod page_size_bounds {
    /// Minimum number of items per page.
    pub const MIN: u32 = 1;
    /// Maximum number of items per page accepted by the search API.
    pub const MAX: u32 = 80;
    /// Default number of items per page.
    pub const DEFAULT: u32 = 16;
}

// =============================================================================
// Query
// =============================================================================

/// Search terms, guaranteed to be non-empty after trimming.
///
/// # Example
///
/// ```
/// use voice_lens::domain::search::Query;
///
/// let query = Query::parse("  red balloons ").unwrap();
/// assert_eq!(query.as_str(), "red balloons");
/// assert!(Query::parse("   ").is_none());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Query(String);

impl Query {
    /// Trims the input and returns `None` when nothing is left.
    #[must_use]
    pub fn parse(input: &str) -> Option<Self> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(Self(trimmed.to_string()))
        }
    }

    /// Returns the trimmed query text.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns the length of the query in characters.
    #[must_use]
    pub fn char_count(&self) -> usize {
        self.0.chars().count()
    }
}

impl fmt::Display for Query {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

// =============================================================================
// PageNumber
// =============================================================================

/// One-based page number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PageNumber(u32);

impl PageNumber {
    /// The first page of every query.
    pub const FIRST: Self = Self(1);

    /// Creates a page number, clamping zero to the first page.
    #[must_use]
    pub fn new(value: u32) -> Self {
        Self(value.max(1))
    }

    /// Returns the raw page number.
    #[must_use]
    pub fn value(self) -> u32 {
        self.0
    }

    /// Returns whether this is the first page.
    #[must_use]
    pub fn is_first(self) -> bool {
        self.0 == 1
    }

    /// Returns the following page.
    #[must_use]
    pub fn next(self) -> Self {
        Self(self.0.saturating_add(1))
    }

    /// Returns the preceding page, never going below the first one.
    #[must_use]
    pub fn previous(self) -> Self {
        Self::new(self.0.saturating_sub(1))
    }
}

impl Default for PageNumber {
    fn default() -> Self {
        Self::FIRST
    }
}

impl fmt::Display for PageNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// =============================================================================
// PageSize
// =============================================================================

/// Number of items requested per page, guaranteed to be within 1–80.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageSize(u32);

impl PageSize {
    /// Creates a new page size, clamping the value to the valid range.
    #[must_use]
    pub fn new(value: u32) -> Self {
        Self(value.clamp(page_size_bounds::MIN, page_size_bounds::MAX))
    }

    /// Returns the raw page size.
    #[must_use]
    pub fn value(self) -> u32 {
        self.0
    }
}

impl Default for PageSize {
    fn default() -> Self {
        Self(page_size_bounds::DEFAULT)
    }
}

// =============================================================================
// RequestEpoch
// =============================================================================

/// Monotonic token identifying the most recent search intent.
///
/// Every new search bumps the epoch; a response carrying an older epoch
/// belongs to a superseded search and must not be merged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct RequestEpoch(u64);

impl RequestEpoch {
    /// Returns the epoch following this one.
    #[must_use]
    pub fn next(self) -> Self {
        Self(self.0.wrapping_add(1))
    }

    /// Returns the raw counter value.
    #[must_use]
    pub fn value(self) -> u64 {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn query_trims_whitespace() {
        let query = Query::parse("\tmountains \n").expect("non-empty");
        assert_eq!(query.as_str(), "mountains");
        assert_eq!(query.char_count(), 9);
    }

    #[test]
    fn query_rejects_blank_input() {
        assert!(Query::parse("").is_none());
        assert!(Query::parse("  \t ").is_none());
    }

    #[test]
    fn page_number_clamps_zero() {
        assert_eq!(PageNumber::new(0), PageNumber::FIRST);
        assert_eq!(PageNumber::FIRST.previous(), PageNumber::FIRST);
    }

    #[test]
    fn page_number_steps() {
        let page = PageNumber::FIRST.next().next();
        assert_eq!(page.value(), 3);
        assert_eq!(page.previous().value(), 2);
        assert!(!page.is_first());
    }

    #[test]
    fn page_size_clamps_to_valid_range() {
        assert_eq!(PageSize::new(0).value(), page_size_bounds::MIN);
        assert_eq!(PageSize::new(500).value(), page_size_bounds::MAX);
        assert_eq!(PageSize::new(15).value(), 15);
        assert_eq!(PageSize::default().value(), page_size_bounds::DEFAULT);
    }

    #[test]
    fn epochs_increase() {
        let first = RequestEpoch::default();
        let second = first.next();
        assert!(second > first);
        assert_eq!(second.value(), 1);
    }
}
