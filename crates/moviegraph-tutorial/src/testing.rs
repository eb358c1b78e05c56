//! Scripted session for unit tests.

use std::collections::VecDeque;
use std::sync::Mutex;

use moviegraph_core::{CypherQuery, GraphValue, NodeRecord, Properties, PropertyValue, ResultRow};
use moviegraph_graph::{CypherSession, GraphError};

/// Answers each query with the next scripted response, in order, and keeps
/// every query it was sent.
#[derive(Default)]
pub struct ScriptedSession {
    responses: Mutex<VecDeque<Result<Vec<ResultRow>, GraphError>>>,
    seen: Mutex<Vec<CypherQuery>>,
}

impl ScriptedSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn respond(self, rows: Vec<ResultRow>) -> Self {
        self.responses.lock().unwrap().push_back(Ok(rows));
        self
    }

    pub fn fail(self, err: GraphError) -> Self {
        self.responses.lock().unwrap().push_back(Err(err));
        self
    }

    pub fn seen(&self) -> Vec<CypherQuery> {
        self.seen.lock().unwrap().clone()
    }

    pub fn remaining(&self) -> usize {
        self.responses.lock().unwrap().len()
    }
}

impl CypherSession for ScriptedSession {
    async fn execute(&self, query: &CypherQuery) -> Result<Vec<ResultRow>, GraphError> {
        self.seen.lock().unwrap().push(query.clone());
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(GraphError::Connection("script exhausted".to_string())))
    }
}

pub fn node(id: i64, labels: &[&str], props: &[(&str, PropertyValue)]) -> NodeRecord {
    NodeRecord {
        id,
        labels: labels.iter().map(|l| l.to_string()).collect(),
        properties: props
            .iter()
            .map(|(k, v)| (k.to_string(), v.clone()))
            .collect::<Properties>(),
    }
}

pub fn actor(id: i64) -> NodeRecord {
    node(id, &["Actor"], &[("name", "Tom Hanks".into())])
}

pub fn movie(id: i64, title: &str) -> NodeRecord {
    node(id, &["Movie"], &[("title", title.into())])
}

pub fn node_row(column: &str, node: NodeRecord) -> ResultRow {
    ResultRow::new().with(column, GraphValue::Node(node))
}

pub fn scalar_row(cells: &[(&str, PropertyValue)]) -> ResultRow {
    cells.iter().fold(ResultRow::new(), |row, (column, value)| {
        row.with(*column, GraphValue::Scalar(value.clone()))
    })
}
