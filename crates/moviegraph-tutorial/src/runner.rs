//! Runs the steps in order against one session.

use chrono::{DateTime, Utc};
use moviegraph_graph::CypherSession;
use serde::Serialize;
use tracing::Instrument;
use uuid::Uuid;

use crate::config::TutorialConfig;
use crate::error::Result;
use crate::steps::{Cast, Step, StepOutcome};

/// Result of a completed run.
#[derive(Debug, Clone, Serialize)]
pub struct RunSummary {
    pub run_id: Uuid,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
    pub reset: bool,
    pub outcomes: Vec<StepOutcome>,
}

/// The tutorial driver: one session, one configuration, seven steps.
pub struct Tutorial<S> {
    session: S,
    config: TutorialConfig,
}

impl<S: CypherSession> Tutorial<S> {
    pub fn new(session: S, config: TutorialConfig) -> Self {
        Self { session, config }
    }

    pub fn session(&self) -> &S {
        &self.session
    }

    /// Run every step, stopping at the first failure.
    ///
    /// `on_step` is called after each successful step, before the next one
    /// starts.
    pub async fn run<F>(&self, mut on_step: F) -> Result<RunSummary>
    where
        F: FnMut(&StepOutcome),
    {
        let run_id = Uuid::new_v4();
        let started_at = Utc::now();
        let cast = Cast::from(&self.config);

        if self.config.reset_on_start {
            self.session.clear_database().await?;
        } else {
            tracing::warn!(
                %run_id,
                "Skipping database reset; queryNode and queryMovies expect an empty database"
            );
        }

        let mut outcomes = Vec::with_capacity(Step::ALL.len());
        for step in Step::ALL {
            let span = tracing::info_span!("step", %run_id, step = step.name());
            match step.run(&self.session, &cast).instrument(span).await {
                Ok(outcome) => {
                    on_step(&outcome);
                    outcomes.push(outcome);
                }
                Err(e) => {
                    tracing::error!(%run_id, step = step.name(), error = %e, "Step failed");
                    return Err(e);
                }
            }
        }

        tracing::info!(%run_id, steps = outcomes.len(), "Tutorial complete");
        Ok(RunSummary {
            run_id,
            started_at,
            finished_at: Utc::now(),
            reset: self.config.reset_on_start,
            outcomes,
        })
    }
}

#[cfg(test)]
mod tests {
    use moviegraph_core::{PropertyValue, ResultRow};
    use moviegraph_graph::GraphError;

    use super::*;
    use crate::error::TutorialError;
    use crate::testing::{actor, movie, node, node_row, scalar_row, ScriptedSession};

    fn happy_path(session: ScriptedSession) -> ScriptedSession {
        session
            .respond(vec![node_row(
                "n",
                node(1, &[], &[("name", "Tom Hanks".into())]),
            )])
            .respond(vec![node_row("n", actor(1))])
            .respond(vec![node_row("actor", actor(1))])
            .respond(vec![scalar_row(&[("title", "Sleepless in Seattle".into())])])
            .respond(vec![scalar_row(&[
                ("actor", "Tom Hanks".into()),
                ("relationship", "ACTED_IN".into()),
                ("movie", "Forrest Gump".into()),
            ])])
            .respond(vec![scalar_row(&[
                ("name", "Tom Hanks".into()),
                ("dob", 1944_i64.into()),
            ])])
            .respond(vec![
                node_row("movie", movie(2, "Sleepless in Seattle")),
                node_row("movie", movie(3, "Forrest Gump")),
            ])
            .respond(vec![
                node_row(
                    "n",
                    node(
                        1,
                        &["Actor"],
                        &[
                            ("name", "Tom Hanks".into()),
                            ("DoB", PropertyValue::Integer(1944)),
                        ],
                    ),
                ),
                node_row("n", movie(2, "Sleepless in Seattle")),
                node_row("n", movie(3, "Forrest Gump")),
            ])
    }

    #[tokio::test]
    async fn test_full_run_reports_every_step_in_order() {
        let session = happy_path(ScriptedSession::new().respond(Vec::new()));
        let tutorial = Tutorial::new(session, TutorialConfig::default());

        let mut printed = Vec::new();
        let summary = tutorial
            .run(|outcome| printed.push(outcome.to_string()))
            .await
            .unwrap();

        assert!(summary.reset);
        assert!(summary.finished_at >= summary.started_at);
        let steps: Vec<Step> = summary.outcomes.iter().map(StepOutcome::step).collect();
        assert_eq!(steps, Step::ALL.to_vec());
        assert_eq!(printed.len(), 7);
        assert_eq!(printed[0], "createNode() {name: Tom Hanks}");
        assert_eq!(printed[3], "createUnique() Tom Hanks ACTED_IN Forrest Gump");
        assert_eq!(printed[4], "setNodeProperty() Tom Hanks 1944");
        assert!(printed[6].starts_with("queryAllNodes(3)\n  Node[0] {DoB: 1944, name: Tom Hanks}"));

        let seen = tutorial.session().seen();
        assert_eq!(seen[0].statement, "MATCH (n) DETACH DELETE n");
        assert_eq!(seen.len(), 9);
        assert_eq!(tutorial.session().remaining(), 0);
    }

    #[tokio::test]
    async fn test_no_reset_skips_clear() {
        let session = happy_path(ScriptedSession::new());
        let config = TutorialConfig {
            reset_on_start: false,
            ..TutorialConfig::default()
        };
        let tutorial = Tutorial::new(session, config);

        let summary = tutorial.run(|_| {}).await.unwrap();
        assert!(!summary.reset);
        assert!(tutorial.session().seen()[0].statement.starts_with("CREATE"));
    }

    #[tokio::test]
    async fn test_stops_at_first_cardinality_failure() {
        // A second run without reset finds two actors at queryNode.
        let session = ScriptedSession::new()
            .respond(vec![node_row("n", node(9, &[], &[("name", "Tom Hanks".into())]))])
            .respond(vec![node_row("n", actor(9))])
            .respond(vec![node_row("actor", actor(1)), node_row("actor", actor(9))])
            .respond(Vec::<ResultRow>::new());
        let config = TutorialConfig {
            reset_on_start: false,
            ..TutorialConfig::default()
        };
        let tutorial = Tutorial::new(session, config);

        let mut printed = 0;
        let err = tutorial.run(|_| printed += 1).await.unwrap_err();

        assert!(matches!(
            err,
            TutorialError::Cardinality {
                step: "queryNode",
                expected: 1,
                actual: 2
            }
        ));
        assert_eq!(printed, 1);
        assert_eq!(tutorial.session().seen().len(), 3);
        assert_eq!(tutorial.session().remaining(), 1);
    }

    #[tokio::test]
    async fn test_reset_failure_aborts_before_any_step() {
        let session =
            ScriptedSession::new().fail(GraphError::Connection("connection refused".to_string()));
        let tutorial = Tutorial::new(session, TutorialConfig::default());

        let mut printed = 0;
        let err = tutorial.run(|_| printed += 1).await.unwrap_err();
        assert!(matches!(err, TutorialError::Graph(GraphError::Connection(_))));
        assert_eq!(printed, 0);
        assert_eq!(tutorial.session().seen().len(), 1);
    }

    #[tokio::test]
    async fn test_summary_serializes_outcomes() {
        let session = happy_path(ScriptedSession::new().respond(Vec::new()));
        let tutorial = Tutorial::new(session, TutorialConfig::default());
        let summary = tutorial.run(|_| {}).await.unwrap();

        let json = serde_json::to_value(&summary).unwrap();
        assert_eq!(json["outcomes"].as_array().unwrap().len(), 7);
        assert_eq!(json["outcomes"][0]["step"], "create_node");
        assert_eq!(json["outcomes"][5]["movies"][1]["properties"]["title"], "Forrest Gump");
        assert_eq!(json["outcomes"][4]["birth_year"]["dob"], 1944);
    }
}
