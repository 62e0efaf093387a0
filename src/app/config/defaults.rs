// SPDX-License-Identifier: MPL-2.0
//! Fallbacks and clamping ranges for `settings.toml` values.

use crate::domain::search::page_size_bounds;

// Search

pub const DEFAULT_SEARCH_ENDPOINT: &str = "https://api.pexels.com/v1/search";

/// Results requested per page.
pub const DEFAULT_PAGE_SIZE: u32 = page_size_bounds::DEFAULT;

/// Query searched on startup when none is given on the command line.
pub const DEFAULT_QUERY: &str = "nature";

/// Seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 15;
pub const MIN_TIMEOUT_SECS: u64 = 1;
pub const MAX_TIMEOUT_SECS: u64 = 120;

// Grid

/// Thumbnails per grid row.
pub const DEFAULT_GRID_COLUMNS: u16 = 3;
pub const MIN_GRID_COLUMNS: u16 = 1;
pub const MAX_GRID_COLUMNS: u16 = 8;

// Voice

/// Recognition locale (BCP-47).
pub const DEFAULT_VOICE_LOCALE: &str = "en-US";
