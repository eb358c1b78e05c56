//! Neo4j connection management and the shared graph client.

use moviegraph_core::{CypherQuery, PropertyValue, RecordError, ResultRow};
use neo4rs::{ConfigBuilder, Graph, Query};
use serde::Deserialize;

use crate::convert::decode_row;

/// Errors from graph operations.
#[derive(Debug, thiserror::Error)]
pub enum GraphError {
    #[error("Neo4j connection error: {0}")]
    Connection(String),

    #[error("Neo4j query error: {0}")]
    Query(#[from] neo4rs::Error),

    #[error("Node not found: id {id}")]
    NotFound { id: i64 },

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Record error: {0}")]
    Record(#[from] RecordError),
}

/// Configuration for connecting to Neo4j.
///
/// Loaded from the `[neo4j]` config section or `MOVIEGRAPH_NEO4J__*`
/// environment variables.
#[derive(Debug, Clone, Deserialize)]
pub struct GraphConfig {
    #[serde(default = "default_uri")]
    pub uri: String,
    #[serde(default = "default_user")]
    pub user: String,
    #[serde(default = "default_password")]
    pub password: String,
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
    #[serde(default = "default_fetch_size")]
    pub fetch_size: usize,
}

fn default_uri() -> String {
    "bolt://localhost:7687".to_string()
}

fn default_user() -> String {
    "neo4j".to_string()
}

fn default_password() -> String {
    "moviegraph-dev".to_string()
}

fn default_max_connections() -> u32 {
    1
}

fn default_fetch_size() -> usize {
    200
}

impl Default for GraphConfig {
    fn default() -> Self {
        Self {
            uri: default_uri(),
            user: default_user(),
            password: default_password(),
            max_connections: default_max_connections(),
            fetch_size: default_fetch_size(),
        }
    }
}

/// Neo4j graph client.
///
/// One client is created at startup and passed by reference to whatever
/// needs the database. Clone is cheap (inner Arc).
#[derive(Clone)]
pub struct GraphClient {
    graph: Graph,
}

impl GraphClient {
    /// Connect to Neo4j with the given configuration.
    pub async fn connect(config: &GraphConfig) -> Result<Self, GraphError> {
        let neo_config = ConfigBuilder::default()
            .uri(&config.uri)
            .user(&config.user)
            .password(&config.password)
            .max_connections(config.max_connections as usize)
            .fetch_size(config.fetch_size)
            .build()
            .map_err(|e| GraphError::Connection(e.to_string()))?;

        let graph = Graph::connect(neo_config)
            .await
            .map_err(|e| GraphError::Connection(e.to_string()))?;

        tracing::info!(uri = %config.uri, user = %config.user, "Connected to Neo4j");
        Ok(Self { graph })
    }

    /// Execute a write-only query (CREATE, MERGE, DELETE, SET).
    pub async fn run(&self, query: Query) -> Result<(), GraphError> {
        self.graph.run(query).await?;
        Ok(())
    }

    /// Execute a read query and collect all rows.
    pub async fn query_rows(&self, query: Query) -> Result<Vec<neo4rs::Row>, GraphError> {
        let mut stream = self.graph.execute(query).await?;
        let mut rows = Vec::new();
        while let Some(row) = stream.next().await? {
            rows.push(row);
        }
        Ok(rows)
    }

    /// Execute a query template and decode its declared columns.
    ///
    /// Templates without declared columns are sent as write-only queries and
    /// yield no rows.
    pub async fn execute_template(
        &self,
        template: &CypherQuery,
    ) -> Result<Vec<ResultRow>, GraphError> {
        tracing::debug!(
            statement = %template.statement.trim(),
            params = template.params.len(),
            "Executing Cypher"
        );

        let q = to_neo4rs_query(template);
        if !template.returns_rows() {
            self.run(q).await?;
            return Ok(Vec::new());
        }

        let rows = self.query_rows(q).await?;
        let mut results = Vec::with_capacity(rows.len());
        for row in &rows {
            results.push(decode_row(row, &template.columns)?);
        }
        tracing::debug!(rows = results.len(), "Cypher returned");
        Ok(results)
    }
}

/// Bind a template's statement and parameters into a neo4rs query.
fn to_neo4rs_query(template: &CypherQuery) -> Query {
    template
        .params
        .iter()
        .fold(neo4rs::query(&template.statement), |q, (key, value)| {
            match value {
                PropertyValue::Null => q.param(key, neo4rs::BoltType::Null(neo4rs::BoltNull)),
                PropertyValue::Boolean(b) => q.param(key, *b),
                PropertyValue::Integer(i) => q.param(key, *i),
                PropertyValue::Float(x) => q.param(key, *x),
                PropertyValue::String(s) => q.param(key, s.clone()),
            }
        })
}
