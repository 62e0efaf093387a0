// SPDX-License-Identifier: MPL-2.0
//! JSON payloads of the search endpoint and their mapping to domain types.

use crate::domain::error::SearchError;
use crate::domain::search::{PageResponse, ResultItem};
use serde::Deserialize;

/// Body of `GET /search`.
#[derive(Debug, Deserialize)]
struct SearchPage {
    photos: Vec<Photo>,
    #[serde(default)]
    total_results: Option<u64>,
}

#[derive(Debug, Deserialize)]
struct Photo {
    id: u64,
    width: u32,
    height: u32,
    photographer: String,
    src: PhotoSources,
}

/// Renditions offered for each photo. Only the three used are required.
#[derive(Debug, Deserialize)]
struct PhotoSources {
    original: String,
    large: String,
    medium: String,
}

impl From<Photo> for ResultItem {
    fn from(photo: Photo) -> Self {
        ResultItem {
            id: photo.id,
            thumbnail_url: photo.src.medium,
            preview_url: photo.src.large,
            full_url: photo.src.original,
            attribution_name: photo.photographer,
            width: photo.width,
            height: photo.height,
        }
    }
}

/// Decodes a search response body.
///
/// # Errors
///
/// Returns [`SearchError::Parse`] when the body is not a well-formed
/// search page.
pub fn parse_page(body: &[u8]) -> Result<PageResponse, SearchError> {
    let page: SearchPage =
        serde_json::from_slice(body).map_err(|e| SearchError::Parse(e.to_string()))?;

    Ok(PageResponse {
        items: page.photos.into_iter().map(ResultItem::from).collect(),
        total_available: page.total_results,
    })
}
