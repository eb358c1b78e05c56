//! moviegraph-core: driver-independent data model for the moviegraph tutorial.
//!
//! This crate knows nothing about Neo4j or the wire protocol. It provides:
//! - Property values, node and relationship records
//! - Result rows keyed by declared output column
//! - Parameterized query templates (`CypherQuery`)
//! - Identifier validation for labels and property keys
//! - Record mapping errors

pub mod cypher;
pub mod error;
pub mod types;

pub use cypher::{validate_identifier, Column, ColumnKind, CypherQuery};
pub use error::RecordError;
pub use types::{GraphValue, NodeRecord, Properties, PropertyValue, RelationshipRecord, ResultRow};
