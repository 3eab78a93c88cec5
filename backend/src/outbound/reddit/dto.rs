//! DTOs for decoding Reddit token and listing responses.

use serde::Deserialize;

/// Token endpoint payload.
///
/// Reddit answers a bad password grant with `200 {"error": "invalid_grant"}`,
/// so both fields are optional and inspected by the adapter.
#[derive(Debug, Deserialize)]
pub(super) struct TokenResponseDto {
    #[serde(default)]
    pub(super) access_token: Option<String>,
    #[serde(default)]
    pub(super) error: Option<serde_json::Value>,
}

#[derive(Debug, Deserialize)]
pub(super) struct ListingDto {
    pub(super) data: ListingDataDto,
}

#[derive(Debug, Deserialize)]
pub(super) struct ListingDataDto {
    pub(super) children: Vec<ListingChildDto>,
}

#[derive(Debug, Deserialize)]
pub(super) struct ListingChildDto {
    #[serde(default)]
    pub(super) data: ListingItemDto,
}

#[derive(Debug, Default, Deserialize)]
pub(super) struct ListingItemDto {
    #[serde(default)]
    pub(super) body: Option<String>,
}

impl ListingDto {
    /// Comment bodies in listing order; items without a body are skipped.
    pub(super) fn into_bodies(self) -> Vec<String> {
        self.data
            .children
            .into_iter()
            .filter_map(|child| child.data.body)
            .collect()
    }
}
