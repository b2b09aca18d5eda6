//! Core module - fundamental types and the entity lifecycle

pub mod client;
pub mod config;
pub mod entity;
pub mod fields;
pub mod links;
pub mod query;
pub mod relations;
pub mod transport;
pub mod urls;

pub use client::{ClientError, StockbookClient};
pub use config::{Config, ConfigError};
pub use entity::{ConstructionConfig, Entity, EntityError};
pub use fields::{FieldStore, Meta};
pub use links::{Link, LinkConfig, LinkSet};
pub use query::{FilterExpr, QueryParams, MAX_LIST_LIMIT};
pub use relations::{Cardinality, Relation, RelationRegistry, RelationSet, RelationSpec};
pub use transport::{CollectionMeta, HttpTransport, ListPage, Transport, TransportError};
pub use urls::UrlProvider;
