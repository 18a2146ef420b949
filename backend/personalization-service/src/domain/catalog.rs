use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Read-only projection of a catalog book as shelf-service serves it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogBook {
    pub id: Uuid,
    pub title: String,
    pub author: String,
    pub genre: Option<String>,
    pub cover_image: Option<String>,
    pub publication_date: Option<String>,
    pub isbn: Option<String>,
}
