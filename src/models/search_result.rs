use serde::{Deserialize, Serialize};

/// Discriminant of a search result, `type` on the wire.
#[derive(strum_macros::Display, Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum ResultKind {
    Course,
    Unit,
    Lesson,
    /// Anything the storefront may add later; routes home.
    #[serde(other)]
    Other,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResultItem {
    /// Opaque product identifier
    pub id: String,
    /// Display title
    pub title: String,
    #[serde(rename = "type")]
    pub kind: ResultKind,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Owning course, only meaningful for units
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<String>,
}

/// Envelope returned by `GET /api/products`.
#[derive(Debug, Default, Deserialize)]
pub struct SearchResponse {
    #[serde(default)]
    data: Option<Vec<SearchResultItem>>,
}

impl SearchResponse {
    pub fn into_items(self) -> Vec<SearchResultItem> {
        self.data.unwrap_or_default()
    }
}
