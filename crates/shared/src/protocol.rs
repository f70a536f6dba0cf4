use serde::{Deserialize, Serialize};

use crate::domain::PlaceId;

/// Wire envelope shared by every catalog endpoint: `{ "data": ... }`.
/// `T` is a collection or a single object depending on the endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogEnvelope<T> {
    pub data: T,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Place {
    pub id: PlaceId,
    pub name: String,
    pub photo: String,
    pub description: String,
    /// Weak back-reference to a category, by name. A reference that matches
    /// no fetched category is not an error; it just never satisfies a filter.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<Category>,
}
