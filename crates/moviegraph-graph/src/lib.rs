//! moviegraph-graph — Neo4j client for the moviegraph tutorial.
//!
//! All database traffic goes through `CypherSession`. `GraphClient` is the
//! Neo4j implementation; it binds `CypherQuery` templates into neo4rs queries
//! and decodes the declared output columns into `ResultRow`s.

pub mod client;
mod convert;
pub mod mutations;
pub mod session;

pub use client::{GraphClient, GraphConfig, GraphError};
pub use session::CypherSession;
