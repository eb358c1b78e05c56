//! Query templates for generic node writes.
//!
//! Labels and property keys cannot be bound as parameters, so they are
//! validated before being spliced into the statement.

use moviegraph_core::{validate_identifier, CypherQuery, Properties, RecordError};

/// Column holding the node returned by the templates below.
pub const NODE_COLUMN: &str = "n";

/// `CREATE (n {k1: $k1, ...}) RETURN n`
pub fn create_node_query(props: &Properties) -> Result<CypherQuery, RecordError> {
    let mut assignments = Vec::with_capacity(props.len());
    for key in props.keys() {
        validate_identifier("property", key)?;
        assignments.push(format!("{key}: ${key}"));
    }

    let statement = if assignments.is_empty() {
        format!("CREATE ({NODE_COLUMN}) RETURN {NODE_COLUMN}")
    } else {
        format!(
            "CREATE ({NODE_COLUMN} {{{}}}) RETURN {NODE_COLUMN}",
            assignments.join(", ")
        )
    };

    let q = props
        .iter()
        .fold(CypherQuery::new(statement), |q, (key, value)| {
            q.param(key, value.clone())
        });
    Ok(q.node_column(NODE_COLUMN))
}

/// `MATCH (n) WHERE id(n) = $id SET n:Label RETURN n`
pub fn add_label_query(node_id: i64, label: &str) -> Result<CypherQuery, RecordError> {
    validate_identifier("label", label)?;
    Ok(CypherQuery::new(format!(
        "MATCH ({NODE_COLUMN}) WHERE id({NODE_COLUMN}) = $id
         SET {NODE_COLUMN}:{label}
         RETURN {NODE_COLUMN}"
    ))
    .param("id", node_id)
    .node_column(NODE_COLUMN))
}

/// Remove every node and relationship in the database.
pub fn clear_database_query() -> CypherQuery {
    CypherQuery::new("MATCH (n) DETACH DELETE n")
}
