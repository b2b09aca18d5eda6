//! Entity aggregate and lifecycle
//!
//! An `Entity` is the local representation of one remote row: its plain
//! fields, its outgoing links, and the relations discovered when it was
//! built. Every operation that talks to the network goes through the
//! client the entity was created with.
//!
//! `update` and `fresh` never mutate the receiver; they return a new
//! instance built from the server response.

use serde::Serialize;
use serde_json::{Map, Value};
use std::sync::Arc;
use thiserror::Error;
use tracing::debug;

use crate::core::client::StockbookClient;
use crate::core::fields::FieldStore;
use crate::core::links::{LinkConfig, LinkSet};
use crate::core::query::{FilterExpr, QueryParams};
use crate::core::relations::{Cardinality, RelationSet};
use crate::core::transport::{ListPage, TransportError};
use crate::entities::EntityType;

/// Options applied while building an entity from a raw payload
#[derive(Debug, Clone, Copy, Default)]
pub struct ConstructionConfig {
    /// Discover relations from the raw fields and claim their keys
    pub relations: bool,
}

impl ConstructionConfig {
    pub fn with_relations() -> Self {
        Self { relations: true }
    }
}

/// Errors raised by entity operations
#[derive(Debug, Error)]
pub enum EntityError {
    #[error(transparent)]
    Transport(#[from] TransportError),

    #[error("page fetch for {entity_type} at offset {offset} failed")]
    Page {
        entity_type: EntityType,
        offset: u64,
        #[source]
        source: TransportError,
    },

    #[error("{entity_type} payload carries no meta descriptor; cannot {operation}")]
    MissingMeta {
        entity_type: EntityType,
        operation: &'static str,
    },

    #[error("{entity_type} meta href carries no id; cannot {operation}")]
    MissingMetaId {
        entity_type: EntityType,
        operation: &'static str,
    },

    #[error("{entity_type} has no 'id' field; cannot update")]
    MissingId { entity_type: EntityType },
}

/// Local representation of one remote resource row
#[derive(Clone)]
pub struct Entity {
    entity_type: EntityType,
    fields: FieldStore,
    links: LinkSet,
    relations: RelationSet,
    client: Arc<StockbookClient>,
}

impl Entity {
    /// Build an entity from a raw payload with explicit construction options.
    ///
    /// When relation discovery is on, every key the relation set claims is
    /// deleted from the field store: a key is never simultaneously a plain
    /// field and a relation.
    pub fn from_raw(
        client: &Arc<StockbookClient>,
        entity_type: EntityType,
        raw: Value,
        config: ConstructionConfig,
    ) -> Self {
        let mut fields = FieldStore::from_value(raw);
        let relations = if config.relations {
            let relations = RelationSet::capture(client.relations(), entity_type, &fields);
            let claimed: Vec<String> = relations.names().map(str::to_string).collect();
            for name in claimed {
                fields.delete(&name);
            }
            relations
        } else {
            RelationSet::new()
        };
        Self {
            entity_type,
            fields,
            links: LinkSet::new(),
            relations,
            client: Arc::clone(client),
        }
    }

    /// Build an entity from a raw payload with default construction options
    pub fn new(client: &Arc<StockbookClient>, entity_type: EntityType, raw: Value) -> Self {
        Self::from_raw(client, entity_type, raw, ConstructionConfig::default())
    }

    pub fn entity_type(&self) -> EntityType {
        self.entity_type
    }

    pub fn fields(&self) -> &FieldStore {
        &self.fields
    }

    pub fn links(&self) -> &LinkSet {
        &self.links
    }

    pub fn relations(&self) -> &RelationSet {
        &self.relations
    }

    /// The session this entity was created by
    pub fn client(&self) -> &Arc<StockbookClient> {
        &self.client
    }

    pub fn field(&self, key: &str) -> Option<&Value> {
        self.fields.get(key)
    }

    pub fn set_field(&mut self, key: impl Into<String>, value: Value) {
        self.fields.set(key, value);
    }

    pub fn has_field(&self, key: &str) -> bool {
        self.fields.has(key)
    }

    pub fn delete_field(&mut self, key: &str) -> Option<Value> {
        self.fields.delete(key)
    }

    /// Attach an outgoing link to be merged into the next write payload
    pub fn link(&mut self, value: Value, config: LinkConfig) {
        self.links.link(value, config);
    }

    /// Resolve a captured relation into a typed entity.
    ///
    /// The concrete subtype comes from the relation payload's own meta tag;
    /// a relation without a resolvable tag yields `None`.
    pub fn relation_entity(&self, name: &str) -> Option<Entity> {
        let relation = self.relations.get(name)?;
        let fields = FieldStore::from_value(relation.value.clone());
        let entity_type = fields.meta()?.entity_type.parse().ok()?;
        Some(Entity::from_raw(
            &self.client,
            entity_type,
            relation.value.clone(),
            ConstructionConfig::default(),
        ))
    }

    /// Rebuild this entity's raw fields as another subtype.
    ///
    /// Links and relations deliberately do not carry over; relation
    /// semantics may differ between subtypes.
    pub fn transform_to(&self, target: EntityType) -> Entity {
        Entity::from_raw(
            &self.client,
            target,
            self.fields.to_value(),
            ConstructionConfig::default(),
        )
    }

    /// Rebuild as the subtype named by the embedded meta tag, or return the
    /// instance unchanged when no tag resolves.
    pub fn into_meta_type(self) -> Entity {
        match self
            .fields
            .meta()
            .and_then(|meta| meta.entity_type.parse::<EntityType>().ok())
        {
            Some(entity_type) => self.transform_to(entity_type),
            None => self,
        }
    }

    /// Fetch the complete collection of one entity type.
    ///
    /// Walks every page; the returned sequence covers the whole logical
    /// result set in server row order.
    pub fn list(
        client: &Arc<StockbookClient>,
        entity_type: EntityType,
        params: Option<QueryParams>,
    ) -> Result<Vec<Entity>, EntityError> {
        let url = client.urls().list_url(entity_type);
        Self::list_pages(client, entity_type, &url, None, params.unwrap_or_default())
    }

    /// Fetch the complete filtered collection of one entity type.
    ///
    /// The filter expression travels as an extra query parameter on every
    /// page request; pagination is unchanged by it.
    pub fn filter(
        client: &Arc<StockbookClient>,
        entity_type: EntityType,
        filter: &FilterExpr,
        params: Option<QueryParams>,
    ) -> Result<Vec<Entity>, EntityError> {
        let url = client.urls().filter_url(entity_type);
        Self::list_pages(
            client,
            entity_type,
            &url,
            Some(filter),
            params.unwrap_or_default(),
        )
    }

    /// Fetch one entity by id
    pub fn by_id(
        client: &Arc<StockbookClient>,
        entity_type: EntityType,
        id: &str,
    ) -> Result<Entity, EntityError> {
        let url = client.urls().by_id_url(entity_type, id);
        let raw = client.transport().get(&url, &[])?;
        Ok(Entity::new(client, entity_type, raw))
    }

    /// Re-fetch this entity by the identity in its meta descriptor.
    ///
    /// Always issues a round trip; there is no cached copy to serve.
    pub fn fresh(&self) -> Result<Entity, EntityError> {
        let meta = self.fields.meta().ok_or(EntityError::MissingMeta {
            entity_type: self.entity_type,
            operation: "refresh",
        })?;
        let id = meta.id().ok_or(EntityError::MissingMetaId {
            entity_type: self.entity_type,
            operation: "refresh",
        })?;
        Self::by_id(&self.client, self.entity_type, &id.to_string())
    }

    /// Persist this entity's fields and links, returning the new state the
    /// server responded with. The receiver is left unmodified.
    pub fn update(&self) -> Result<Entity, EntityError> {
        let id = self
            .fields
            .get("id")
            .and_then(Value::as_str)
            .ok_or(EntityError::MissingId {
                entity_type: self.entity_type,
            })?
            .to_string();
        let url = self.client.urls().update_url(self.entity_type, &id);
        let payload = self.merge_fields_with_links();
        let raw = self.client.transport().put(&url, &payload)?;
        Ok(Entity::new(&self.client, self.entity_type, raw))
    }

    /// Assemble the write payload: fields first, then links, with a link
    /// shadowing a same-named field.
    pub fn merge_fields_with_links(&self) -> Value {
        let mut merged = Map::new();
        for (key, value) in self.fields.iter() {
            merged.insert(key.to_string(), value.clone());
        }
        for link in self.links.iter() {
            merged.insert(link.name.clone(), link.value.clone());
        }
        Value::Object(merged)
    }

    /// Promote every discovered relation into a link under the same name.
    ///
    /// Mutates in place and returns the receiver for chaining. The relation
    /// set itself is not cleared, so repeating the call is idempotent.
    pub fn copy_relations_to_links(&mut self) -> &mut Self {
        let promoted: Vec<(String, Value, Cardinality)> = self
            .relations
            .iter()
            .map(|r| (r.name.clone(), r.value.clone(), r.cardinality))
            .collect();
        for (name, value, cardinality) in promoted {
            let config = match cardinality {
                Cardinality::Multiple => LinkConfig::multiple(name),
                Cardinality::Single => LinkConfig::new(name),
            };
            self.links.link(value, config);
        }
        self
    }

    fn list_pages(
        client: &Arc<StockbookClient>,
        entity_type: EntityType,
        url: &str,
        filter: Option<&FilterExpr>,
        params: QueryParams,
    ) -> Result<Vec<Entity>, EntityError> {
        let mut window = params;
        let mut collected = Vec::new();
        loop {
            let mut query = window.to_query();
            if let Some(filter) = filter {
                query.push(("filter".to_string(), filter.raw().to_string()));
            }
            let page_err = |source| EntityError::Page {
                entity_type,
                offset: window.offset(),
                source,
            };
            let raw = client.transport().get(url, &query).map_err(page_err)?;
            let page = ListPage::from_value(url, raw).map_err(page_err)?;
            debug!(
                entity_type = %entity_type,
                offset = window.offset(),
                rows = page.rows.len(),
                size = page.meta.size,
                "fetched page"
            );
            for row in page.rows {
                collected.push(Entity::new(client, entity_type, row));
            }
            // size is the total remote row count; stop once this window
            // reaches it
            if page.meta.size <= window.limit() + window.offset() {
                return Ok(collected);
            }
            window = window.next_page();
        }
    }
}

/// The serialized read view of an entity is its field store only; links and
/// relations are write-time and read-time annotations respectively.
impl Serialize for Entity {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        self.fields.serialize(serializer)
    }
}

impl std::fmt::Debug for Entity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Entity")
            .field("entity_type", &self.entity_type)
            .field("fields", &self.fields)
            .field("links", &self.links)
            .field("relations", &self.relations)
            .finish_non_exhaustive()
    }
}
