//! Decoding of neo4rs rows into driver-independent `ResultRow`s.

use moviegraph_core::{
    Column, ColumnKind, GraphValue, NodeRecord, Properties, PropertyValue, RelationshipRecord,
    ResultRow,
};

use crate::client::GraphError;

/// Decode every declared column of a row.
pub(crate) fn decode_row(row: &neo4rs::Row, columns: &[Column]) -> Result<ResultRow, GraphError> {
    let mut out = ResultRow::new();
    for column in columns {
        let value = match column.kind {
            ColumnKind::Node => {
                let node: neo4rs::Node = row.get(&column.name).map_err(|e| {
                    GraphError::Serialization(format!(
                        "Failed to deserialize node column {}: {e}",
                        column.name
                    ))
                })?;
                GraphValue::Node(node_to_record(&node))
            }
            ColumnKind::Relationship => {
                let rel: neo4rs::Relation = row.get(&column.name).map_err(|e| {
                    GraphError::Serialization(format!(
                        "Failed to deserialize relationship column {}: {e}",
                        column.name
                    ))
                })?;
                GraphValue::Relationship(relation_to_record(&rel))
            }
            ColumnKind::Scalar => GraphValue::Scalar(scalar_column(row, &column.name)?),
        };
        out.insert(column.name.clone(), value);
    }
    Ok(out)
}

/// Convert a neo4rs::Node to a NodeRecord, keeping every scalar property.
pub(crate) fn node_to_record(node: &neo4rs::Node) -> NodeRecord {
    let mut properties = Properties::new();
    for key in node.keys() {
        let key = key.to_string();
        match node_property(node, &key) {
            Some(value) => {
                properties.insert(key, value);
            }
            None => tracing::debug!(key = %key, "Skipping non-scalar node property"),
        }
    }

    NodeRecord {
        id: node.id(),
        labels: node.labels().iter().map(|l| l.to_string()).collect(),
        properties,
    }
}

fn relation_to_record(rel: &neo4rs::Relation) -> RelationshipRecord {
    let mut properties = Properties::new();
    for key in rel.keys() {
        let key = key.to_string();
        if let Some(value) = relation_property(rel, &key) {
            properties.insert(key, value);
        }
    }

    RelationshipRecord {
        id: rel.id(),
        rel_type: rel.typ().to_string(),
        start_id: rel.start_node_id(),
        end_id: rel.end_node_id(),
        properties,
    }
}

// Property decoding tries the narrow types first: an Integer must not be
// read back as a Float.

fn node_property(node: &neo4rs::Node, key: &str) -> Option<PropertyValue> {
    if let Ok(i) = node.get::<i64>(key) {
        return Some(PropertyValue::Integer(i));
    }
    if let Ok(x) = node.get::<f64>(key) {
        return Some(PropertyValue::Float(x));
    }
    if let Ok(b) = node.get::<bool>(key) {
        return Some(PropertyValue::Boolean(b));
    }
    node.get::<String>(key).ok().map(PropertyValue::String)
}

fn relation_property(rel: &neo4rs::Relation, key: &str) -> Option<PropertyValue> {
    if let Ok(i) = rel.get::<i64>(key) {
        return Some(PropertyValue::Integer(i));
    }
    if let Ok(x) = rel.get::<f64>(key) {
        return Some(PropertyValue::Float(x));
    }
    if let Ok(b) = rel.get::<bool>(key) {
        return Some(PropertyValue::Boolean(b));
    }
    rel.get::<String>(key).ok().map(PropertyValue::String)
}

fn scalar_column(row: &neo4rs::Row, column: &str) -> Result<PropertyValue, GraphError> {
    if let Ok(i) = row.get::<i64>(column) {
        return Ok(PropertyValue::Integer(i));
    }
    if let Ok(x) = row.get::<f64>(column) {
        return Ok(PropertyValue::Float(x));
    }
    if let Ok(b) = row.get::<bool>(column) {
        return Ok(PropertyValue::Boolean(b));
    }
    if let Ok(s) = row.get::<String>(column) {
        return Ok(PropertyValue::String(s));
    }
    match row.get::<Option<String>>(column) {
        Ok(None) => Ok(PropertyValue::Null),
        _ => Err(GraphError::Serialization(format!(
            "Column {column} is missing or not a scalar"
        ))),
    }
}
