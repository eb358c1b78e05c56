//! The query session seam.
//!
//! Code that talks to the database takes `&impl CypherSession` rather than a
//! concrete client, so it can run against Neo4j or a scripted stand-in.

use moviegraph_core::{CypherQuery, NodeRecord, Properties, ResultRow};

use crate::client::{GraphClient, GraphError};
use crate::mutations::{add_label_query, clear_database_query, create_node_query, NODE_COLUMN};

/// Something that can execute Cypher templates.
#[allow(async_fn_in_trait)]
pub trait CypherSession {
    /// Execute a template and return its decoded rows.
    async fn execute(&self, query: &CypherQuery) -> Result<Vec<ResultRow>, GraphError>;

    /// Create an unlabelled node with the given properties.
    async fn create_node(&self, props: &Properties) -> Result<NodeRecord, GraphError> {
        let q = create_node_query(props)?;
        let rows = self.execute(&q).await?;
        first_node(&rows)?
            .ok_or_else(|| GraphError::Serialization("CREATE returned no node".to_string()))
    }

    /// Attach a label to an existing node.
    async fn add_label(&self, node_id: i64, label: &str) -> Result<NodeRecord, GraphError> {
        let q = add_label_query(node_id, label)?;
        let rows = self.execute(&q).await?;
        first_node(&rows)?.ok_or(GraphError::NotFound { id: node_id })
    }

    /// Drop every node and relationship.
    async fn clear_database(&self) -> Result<(), GraphError> {
        self.execute(&clear_database_query()).await?;
        tracing::info!("Cleared graph database");
        Ok(())
    }
}

impl CypherSession for GraphClient {
    async fn execute(&self, query: &CypherQuery) -> Result<Vec<ResultRow>, GraphError> {
        self.execute_template(query).await
    }
}

fn first_node(rows: &[ResultRow]) -> Result<Option<NodeRecord>, GraphError> {
    match rows.first() {
        Some(row) => Ok(Some(row.node(NODE_COLUMN)?.clone())),
        None => Ok(None),
    }
}
