//! Read-time relation discovery
//!
//! Relations are associations found in a raw payload at construction time.
//! Which field keys count as relations is decided per entity type by a
//! registry resolved once at startup and injected through the client, not
//! hard-wired into each subtype.
//!
//! Relations are read-only discoveries; they are only written back after an
//! explicit promotion to links.

use serde_json::Value;

use crate::core::fields::FieldStore;
use crate::entities::EntityType;

/// Whether a relation holds one object or a collection
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cardinality {
    Single,
    Multiple,
}

/// Declares one relation field of an entity type
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RelationSpec {
    pub name: &'static str,
    pub cardinality: Cardinality,
}

impl RelationSpec {
    pub const fn single(name: &'static str) -> Self {
        Self {
            name,
            cardinality: Cardinality::Single,
        }
    }

    pub const fn multiple(name: &'static str) -> Self {
        Self {
            name,
            cardinality: Cardinality::Multiple,
        }
    }
}

/// Maps entity types to the relation fields they carry
#[derive(Debug, Clone, Default)]
pub struct RelationRegistry {
    overrides: Vec<(EntityType, Vec<RelationSpec>)>,
}

impl RelationRegistry {
    /// Registry with the built-in vocabulary
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the spec list for one entity type
    pub fn with_specs(mut self, entity_type: EntityType, specs: Vec<RelationSpec>) -> Self {
        self.overrides.retain(|(ty, _)| *ty != entity_type);
        self.overrides.push((entity_type, specs));
        self
    }

    /// Relation specs for an entity type
    pub fn specs_for(&self, entity_type: EntityType) -> &[RelationSpec] {
        self.overrides
            .iter()
            .find(|(ty, _)| *ty == entity_type)
            .map(|(_, specs)| specs.as_slice())
            .unwrap_or_else(|| entity_type.relation_specs())
    }
}

/// One captured relation
#[derive(Debug, Clone, PartialEq)]
pub struct Relation {
    pub name: String,
    pub value: Value,
    pub cardinality: Cardinality,
}

/// Relations discovered from an entity's raw fields
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RelationSet {
    relations: Vec<Relation>,
}

impl RelationSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Capture every registered relation field present in the store.
    ///
    /// The store is not modified here; the owning entity deletes the claimed
    /// keys so that no key is simultaneously a field and a relation.
    pub fn capture(
        registry: &RelationRegistry,
        entity_type: EntityType,
        fields: &FieldStore,
    ) -> Self {
        let mut relations = Vec::new();
        for spec in registry.specs_for(entity_type) {
            if let Some(value) = fields.get(spec.name) {
                relations.push(Relation {
                    name: spec.name.to_string(),
                    value: value.clone(),
                    cardinality: spec.cardinality,
                });
            }
        }
        Self { relations }
    }

    pub fn get(&self, name: &str) -> Option<&Relation> {
        self.relations.iter().find(|r| r.name == name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.relations.iter().map(|r| r.name.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = &Relation> {
        self.relations.iter()
    }

    pub fn len(&self) -> usize {
        self.relations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.relations.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_capture_claims_registered_keys_only() {
        let registry = RelationRegistry::new();
        let fields = FieldStore::from_value(json!({
            "name": "Order 42",
            "agent": {"meta": {"href": "x", "type": "counterparty"}},
            "positions": [{"quantity": 1}],
        }));

        let relations = RelationSet::capture(&registry, EntityType::CustomerOrder, &fields);
        let names: Vec<&str> = relations.names().collect();
        assert_eq!(names, vec!["agent", "positions"]);
        assert_eq!(
            relations.get("positions").unwrap().cardinality,
            Cardinality::Multiple
        );
    }

    #[test]
    fn test_capture_with_no_matching_fields() {
        let registry = RelationRegistry::new();
        let fields = FieldStore::from_value(json!({"name": "Widget"}));
        let relations = RelationSet::capture(&registry, EntityType::Product, &fields);
        assert!(relations.is_empty());
    }

    #[test]
    fn test_registry_override_wins() {
        let registry = RelationRegistry::new()
            .with_specs(EntityType::Store, vec![RelationSpec::single("owner")]);
        let fields = FieldStore::from_value(json!({
            "owner": {"name": "HQ"},
            "parent": {"name": "Main"},
        }));

        let relations = RelationSet::capture(&registry, EntityType::Store, &fields);
        assert!(relations.get("owner").is_some());
        assert!(relations.get("parent").is_none());
    }
}
