//! Endpoint URL construction
//!
//! Pure functions of the base URL, entity type, and id. The entity core uses
//! these verbatim; no endpoint strings are assembled anywhere else.

use crate::entities::EntityType;

/// Builds endpoint URLs for the four request families
#[derive(Debug, Clone)]
pub struct UrlProvider {
    base: String,
}

impl UrlProvider {
    pub fn new(base: impl Into<String>) -> Self {
        let mut base = base.into();
        while base.ends_with('/') {
            base.pop();
        }
        Self { base }
    }

    pub fn base(&self) -> &str {
        &self.base
    }

    pub fn list_url(&self, entity_type: EntityType) -> String {
        format!("{}/entity/{}", self.base, entity_type)
    }

    /// Filtered listing goes to the same collection endpoint; the filter
    /// expression travels as a query parameter.
    pub fn filter_url(&self, entity_type: EntityType) -> String {
        self.list_url(entity_type)
    }

    pub fn by_id_url(&self, entity_type: EntityType, id: &str) -> String {
        format!("{}/entity/{}/{}", self.base, entity_type, id)
    }

    pub fn update_url(&self, entity_type: EntityType, id: &str) -> String {
        self.by_id_url(entity_type, id)
    }
}
