//! Remote entity type vocabulary
//!
//! Every row the API returns belongs to one of these types. The type tag
//! appears in request paths (`/entity/product`) and in the embedded `meta`
//! descriptor of each payload.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

use crate::core::relations::{Cardinality, RelationSpec};

/// Entity types exposed by the remote API
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntityType {
    /// Catalog product
    Product,
    /// Catalog service
    Service,
    /// Product variant (characteristics of a product)
    Variant,
    /// Counterparty (customer or supplier)
    Counterparty,
    /// Own organization
    Organization,
    /// Warehouse / store
    Store,
    /// Customer order
    CustomerOrder,
    /// Shipment (demand)
    Demand,
    /// Incoming supply
    Supply,
}

impl EntityType {
    /// Get the wire name of the type, as used in URLs and meta tags
    pub fn as_str(&self) -> &'static str {
        match self {
            EntityType::Product => "product",
            EntityType::Service => "service",
            EntityType::Variant => "variant",
            EntityType::Counterparty => "counterparty",
            EntityType::Organization => "organization",
            EntityType::Store => "store",
            EntityType::CustomerOrder => "customerorder",
            EntityType::Demand => "demand",
            EntityType::Supply => "supply",
        }
    }

    /// Get all known entity types
    pub fn all() -> &'static [EntityType] {
        &[
            EntityType::Product,
            EntityType::Service,
            EntityType::Variant,
            EntityType::Counterparty,
            EntityType::Organization,
            EntityType::Store,
            EntityType::CustomerOrder,
            EntityType::Demand,
            EntityType::Supply,
        ]
    }

    /// Field keys that hold related entities rather than plain attributes.
    ///
    /// These feed the default relation registry; a key listed here is
    /// captured into the entity's relation set at construction time and
    /// removed from its plain fields.
    pub fn relation_specs(&self) -> &'static [RelationSpec] {
        const PRODUCT: &[RelationSpec] = &[
            RelationSpec::single("uom"),
            RelationSpec::single("supplier"),
            RelationSpec::single("productFolder"),
        ];
        const SERVICE: &[RelationSpec] = &[RelationSpec::single("uom")];
        const VARIANT: &[RelationSpec] = &[RelationSpec::single("product")];
        const COUNTERPARTY: &[RelationSpec] = &[RelationSpec::multiple("accounts")];
        const ORGANIZATION: &[RelationSpec] = &[RelationSpec::multiple("accounts")];
        const STORE: &[RelationSpec] = &[RelationSpec::single("parent")];
        const ORDER_LIKE: &[RelationSpec] = &[
            RelationSpec::single("agent"),
            RelationSpec::single("organization"),
            RelationSpec::single("store"),
            RelationSpec::multiple("positions"),
        ];
        match self {
            EntityType::Product => PRODUCT,
            EntityType::Service => SERVICE,
            EntityType::Variant => VARIANT,
            EntityType::Counterparty => COUNTERPARTY,
            EntityType::Organization => ORGANIZATION,
            EntityType::Store => STORE,
            EntityType::CustomerOrder | EntityType::Demand | EntityType::Supply => ORDER_LIKE,
        }
    }

    /// Cardinality of a named relation on this type, if it is one
    pub fn relation_cardinality(&self, name: &str) -> Option<Cardinality> {
        self.relation_specs()
            .iter()
            .find(|spec| spec.name == name)
            .map(|spec| spec.cardinality)
    }
}

impl fmt::Display for EntityType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for EntityType {
    type Err = TypeParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "product" => Ok(EntityType::Product),
            "service" => Ok(EntityType::Service),
            "variant" => Ok(EntityType::Variant),
            "counterparty" => Ok(EntityType::Counterparty),
            "organization" => Ok(EntityType::Organization),
            "store" => Ok(EntityType::Store),
            "customerorder" => Ok(EntityType::CustomerOrder),
            "demand" => Ok(EntityType::Demand),
            "supply" => Ok(EntityType::Supply),
            _ => Err(TypeParseError::UnknownType(s.to_string())),
        }
    }
}

/// Errors that can occur when parsing entity type tags
#[derive(Debug, Error)]
pub enum TypeParseError {
    #[error("unknown entity type: '{0}' (valid: product, service, variant, counterparty, organization, store, customerorder, demand, supply)")]
    UnknownType(String),
}
