//! Core data types for graph query results.
//!
//! These types mirror what a Cypher query can hand back (nodes, relationships
//! and scalars) without depending on any particular driver.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::RecordError;

// ── Property Values ───────────────────────────────────────────────

/// A scalar value stored as a node or relationship property, or passed
/// as a query parameter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PropertyValue {
    Null,
    Boolean(bool),
    Integer(i64),
    Float(f64),
    String(String),
}

impl PropertyValue {
    /// Short type name used in error messages.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Boolean(_) => "boolean",
            Self::Integer(_) => "integer",
            Self::Float(_) => "float",
            Self::String(_) => "string",
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }
}

impl fmt::Display for PropertyValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => f.write_str("null"),
            Self::Boolean(b) => write!(f, "{b}"),
            Self::Integer(i) => write!(f, "{i}"),
            Self::Float(x) => write!(f, "{x}"),
            Self::String(s) => f.write_str(s),
        }
    }
}

impl From<&str> for PropertyValue {
    fn from(value: &str) -> Self {
        Self::String(value.to_string())
    }
}

impl From<String> for PropertyValue {
    fn from(value: String) -> Self {
        Self::String(value)
    }
}

impl From<i64> for PropertyValue {
    fn from(value: i64) -> Self {
        Self::Integer(value)
    }
}

impl From<f64> for PropertyValue {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

impl From<bool> for PropertyValue {
    fn from(value: bool) -> Self {
        Self::Boolean(value)
    }
}

/// Property map of a node or relationship, ordered by key.
pub type Properties = BTreeMap<String, PropertyValue>;

/// Render a property map as `{key: value, ...}`.
pub struct DisplayProperties<'a>(pub &'a Properties);

impl fmt::Display for DisplayProperties<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("{")?;
        for (i, (key, value)) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{key}: {value}")?;
        }
        f.write_str("}")
    }
}

// ── Nodes & Relationships ─────────────────────────────────────────

/// A node as returned by a query. The id is assigned by the database.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodeRecord {
    pub id: i64,
    pub labels: Vec<String>,
    pub properties: Properties,
}

impl NodeRecord {
    pub fn has_label(&self, label: &str) -> bool {
        self.labels.iter().any(|l| l == label)
    }

    /// Look up a string property.
    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.properties.get(key).and_then(PropertyValue::as_str)
    }
}

impl fmt::Display for NodeRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&DisplayProperties(&self.properties), f)
    }
}

/// A directed, typed relationship between two nodes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RelationshipRecord {
    pub id: i64,
    pub rel_type: String,
    pub start_id: i64,
    pub end_id: i64,
    pub properties: Properties,
}

// ── Result Rows ───────────────────────────────────────────────────

/// A single value in a result row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum GraphValue {
    Node(NodeRecord),
    Relationship(RelationshipRecord),
    Scalar(PropertyValue),
}

impl GraphValue {
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Node(_) => "node",
            Self::Relationship(_) => "relationship",
            Self::Scalar(v) => v.kind(),
        }
    }
}

/// One match produced by a query, keyed by output column name.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ResultRow {
    columns: BTreeMap<String, GraphValue>,
}

impl ResultRow {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert, mostly for constructing rows by hand.
    pub fn with(mut self, column: impl Into<String>, value: GraphValue) -> Self {
        self.insert(column, value);
        self
    }

    pub fn insert(&mut self, column: impl Into<String>, value: GraphValue) {
        self.columns.insert(column.into(), value);
    }

    pub fn get(&self, column: &str) -> Option<&GraphValue> {
        self.columns.get(column)
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    fn require(&self, column: &str) -> Result<&GraphValue, RecordError> {
        self.columns
            .get(column)
            .ok_or_else(|| RecordError::MissingColumn {
                column: column.to_string(),
            })
    }

    /// Read a node column.
    pub fn node(&self, column: &str) -> Result<&NodeRecord, RecordError> {
        match self.require(column)? {
            GraphValue::Node(n) => Ok(n),
            other => Err(mismatch(column, "node", other)),
        }
    }

    /// Read a relationship column.
    pub fn relationship(&self, column: &str) -> Result<&RelationshipRecord, RecordError> {
        match self.require(column)? {
            GraphValue::Relationship(r) => Ok(r),
            other => Err(mismatch(column, "relationship", other)),
        }
    }

    /// Read any scalar column.
    pub fn scalar(&self, column: &str) -> Result<&PropertyValue, RecordError> {
        match self.require(column)? {
            GraphValue::Scalar(v) => Ok(v),
            other => Err(mismatch(column, "scalar", other)),
        }
    }

    /// Read a string column.
    pub fn string(&self, column: &str) -> Result<&str, RecordError> {
        match self.require(column)? {
            GraphValue::Scalar(PropertyValue::String(s)) => Ok(s),
            other => Err(mismatch(column, "string", other)),
        }
    }

    /// Read an integer column.
    pub fn integer(&self, column: &str) -> Result<i64, RecordError> {
        match self.require(column)? {
            GraphValue::Scalar(PropertyValue::Integer(i)) => Ok(*i),
            other => Err(mismatch(column, "integer", other)),
        }
    }
}

fn mismatch(column: &str, expected: &'static str, found: &GraphValue) -> RecordError {
    RecordError::TypeMismatch {
        column: column.to_string(),
        expected,
        found: found.kind(),
    }
}
