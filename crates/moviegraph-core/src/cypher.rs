//! Parameterized Cypher query templates.
//!
//! A `CypherQuery` is a plain value: statement text, a parameter map, and the
//! output columns the caller expects back. The declared columns tell the
//! driver layer how each column should be decoded.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::error::RecordError;
use crate::types::PropertyValue;

/// How a declared output column is decoded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ColumnKind {
    Node,
    Relationship,
    Scalar,
}

/// A declared output column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Column {
    pub name: String,
    pub kind: ColumnKind,
}

/// A statement plus its parameters and declared output columns.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CypherQuery {
    pub statement: String,
    pub params: BTreeMap<String, PropertyValue>,
    pub columns: Vec<Column>,
}

impl CypherQuery {
    pub fn new(statement: impl Into<String>) -> Self {
        Self {
            statement: statement.into(),
            params: BTreeMap::new(),
            columns: Vec::new(),
        }
    }

    /// Bind `$key` to a value.
    pub fn param(mut self, key: &str, value: impl Into<PropertyValue>) -> Self {
        self.params.insert(key.to_string(), value.into());
        self
    }

    pub fn node_column(self, name: &str) -> Self {
        self.column(name, ColumnKind::Node)
    }

    pub fn relationship_column(self, name: &str) -> Self {
        self.column(name, ColumnKind::Relationship)
    }

    pub fn scalar_column(self, name: &str) -> Self {
        self.column(name, ColumnKind::Scalar)
    }

    fn column(mut self, name: &str, kind: ColumnKind) -> Self {
        self.columns.push(Column {
            name: name.to_string(),
            kind,
        });
        self
    }

    /// Whether the statement is expected to return rows at all.
    pub fn returns_rows(&self) -> bool {
        !self.columns.is_empty()
    }
}

/// Check that a label, relationship type, or property key can be spliced
/// into a statement unquoted. Cypher cannot parameterize these.
pub fn validate_identifier(kind: &'static str, name: &str) -> Result<(), RecordError> {
    let mut chars = name.chars();
    let valid = match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {
            chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
        }
        _ => false,
    };

    if valid {
        Ok(())
    } else {
        Err(RecordError::InvalidIdentifier {
            kind,
            name: name.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_collects_params_and_columns() {
        let q = CypherQuery::new("MATCH (actor:Actor {name: $actor}) RETURN actor, actor.DoB AS dob")
            .param("actor", "Tom Hanks")
            .param("dob", 1944_i64)
            .node_column("actor")
            .scalar_column("dob");

        assert_eq!(
            q.params.get("actor"),
            Some(&PropertyValue::String("Tom Hanks".to_string()))
        );
        assert_eq!(q.params.get("dob"), Some(&PropertyValue::Integer(1944)));
        assert_eq!(q.columns.len(), 2);
        assert_eq!(q.columns[0].kind, ColumnKind::Node);
        assert_eq!(q.columns[1].name, "dob");
        assert!(q.returns_rows());
    }

    #[test]
    fn test_write_only_query_returns_no_rows() {
        let q = CypherQuery::new("MATCH (n) DETACH DELETE n");
        assert!(!q.returns_rows());
        assert!(q.params.is_empty());
    }

    #[test]
    fn test_rebinding_param_overwrites() {
        let q = CypherQuery::new("RETURN $x AS x")
            .param("x", 1_i64)
            .param("x", 2_i64);
        assert_eq!(q.params.len(), 1);
        assert_eq!(q.params["x"], PropertyValue::Integer(2));
    }

    #[test]
    fn test_validate_identifier() {
        assert!(validate_identifier("label", "Actor").is_ok());
        assert!(validate_identifier("label", "ACTED_IN").is_ok());
        assert!(validate_identifier("property", "_private2").is_ok());

        for bad in ["", "2fast", "Movie`) DETACH DELETE (n", "has space", "dash-ed"] {
            assert!(
                validate_identifier("label", bad).is_err(),
                "{bad:?} should be rejected"
            );
        }
    }
}
