//! Error types for the moviegraph-tutorial crate.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum TutorialError {
    #[error("Graph error: {0}")]
    Graph(#[from] moviegraph_graph::GraphError),

    #[error("Record error: {0}")]
    Record(#[from] moviegraph_core::RecordError),

    #[error("{step}: expected {expected} row(s), got {actual}")]
    Cardinality {
        step: &'static str,
        expected: usize,
        actual: usize,
    },

    #[error("Config error: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, TutorialError>;
