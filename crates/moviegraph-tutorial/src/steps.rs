//! The seven tutorial steps.
//!
//! Every step takes the session explicitly and returns a `StepOutcome`
//! describing what it did. Steps that expect a fixed number of rows fail
//! with `TutorialError::Cardinality` when the database disagrees.

use std::fmt;

use moviegraph_core::{CypherQuery, NodeRecord, Properties, ResultRow};
use moviegraph_graph::CypherSession;
use serde::Serialize;

use crate::config::TutorialConfig;
use crate::error::{Result, TutorialError};
use crate::records::{BirthYear, Casting};

pub const ACTOR_LABEL: &str = "Actor";

/// Number of Movie nodes a single run against an empty database leaves behind.
pub const EXPECTED_MOVIES: usize = 2;

/// The people and titles the steps operate on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cast {
    pub actor: String,
    pub first_movie: String,
    pub second_movie: String,
    pub birth_year: i64,
}

impl From<&TutorialConfig> for Cast {
    fn from(config: &TutorialConfig) -> Self {
        Self {
            actor: config.actor.clone(),
            first_movie: config.first_movie.clone(),
            second_movie: config.second_movie.clone(),
            birth_year: config.birth_year,
        }
    }
}

impl Default for Cast {
    fn default() -> Self {
        Self::from(&TutorialConfig::default())
    }
}

/// Steps in execution order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Step {
    CreateNode,
    QueryNode,
    CreateMovie,
    CreateUnique,
    SetNodeProperty,
    QueryMovies,
    QueryAllNodes,
}

impl Step {
    pub const ALL: [Step; 7] = [
        Step::CreateNode,
        Step::QueryNode,
        Step::CreateMovie,
        Step::CreateUnique,
        Step::SetNodeProperty,
        Step::QueryMovies,
        Step::QueryAllNodes,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Step::CreateNode => "createNode",
            Step::QueryNode => "queryNode",
            Step::CreateMovie => "createMovie",
            Step::CreateUnique => "createUnique",
            Step::SetNodeProperty => "setNodeProperty",
            Step::QueryMovies => "queryMovies",
            Step::QueryAllNodes => "queryAllNodes",
        }
    }

    /// Run this step against a session.
    pub async fn run<S: CypherSession>(self, session: &S, cast: &Cast) -> Result<StepOutcome> {
        match self {
            Step::CreateNode => create_actor(session, cast).await,
            Step::QueryNode => query_actor(session, cast).await,
            Step::CreateMovie => create_movie(session, cast).await,
            Step::CreateUnique => ensure_second_movie(session, cast).await,
            Step::SetNodeProperty => set_birth_year(session, cast).await,
            Step::QueryMovies => query_movies(session).await,
            Step::QueryAllNodes => query_all_nodes(session).await,
        }
    }
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// What a step did, in a form that can be printed or serialized.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "step", rename_all = "snake_case")]
pub enum StepOutcome {
    CreateNode { node: NodeRecord },
    QueryNode { node: NodeRecord },
    CreateMovie { title: String },
    CreateUnique { casting: Casting },
    SetNodeProperty { birth_year: BirthYear },
    QueryMovies { movies: Vec<NodeRecord> },
    QueryAllNodes { nodes: Vec<NodeRecord> },
}

impl StepOutcome {
    pub fn step(&self) -> Step {
        match self {
            Self::CreateNode { .. } => Step::CreateNode,
            Self::QueryNode { .. } => Step::QueryNode,
            Self::CreateMovie { .. } => Step::CreateMovie,
            Self::CreateUnique { .. } => Step::CreateUnique,
            Self::SetNodeProperty { .. } => Step::SetNodeProperty,
            Self::QueryMovies { .. } => Step::QueryMovies,
            Self::QueryAllNodes { .. } => Step::QueryAllNodes,
        }
    }
}

impl fmt::Display for StepOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::CreateNode { node } => write!(f, "createNode() {node}"),
            Self::QueryNode { node } => write!(f, "queryNode() -> {node}"),
            Self::CreateMovie { .. } => f.write_str("createMovie()"),
            Self::CreateUnique { casting } => write!(
                f,
                "createUnique() {} {} {}",
                casting.actor, casting.relationship, casting.movie
            ),
            Self::SetNodeProperty { birth_year } => {
                write!(f, "setNodeProperty() {} {}", birth_year.name, birth_year.dob)
            }
            Self::QueryMovies { movies } => {
                f.write_str("queryMovies()")?;
                write_nodes(f, movies)
            }
            Self::QueryAllNodes { nodes } => {
                write!(f, "queryAllNodes({})", nodes.len())?;
                write_nodes(f, nodes)
            }
        }
    }
}

fn write_nodes(f: &mut fmt::Formatter<'_>, nodes: &[NodeRecord]) -> fmt::Result {
    for (i, node) in nodes.iter().enumerate() {
        write!(f, "\n  Node[{i}] {node}")?;
    }
    Ok(())
}

// ── Steps ────────────────────────────────────────────────────────

/// Create the actor node, then label it.
pub async fn create_actor<S: CypherSession>(session: &S, cast: &Cast) -> Result<StepOutcome> {
    let mut props = Properties::new();
    props.insert("name".to_string(), cast.actor.as_str().into());

    let created = session.create_node(&props).await?;
    let node = session.add_label(created.id, ACTOR_LABEL).await?;
    tracing::info!(node_id = node.id, actor = %cast.actor, "Created actor node");

    Ok(StepOutcome::CreateNode { node })
}

/// Look the actor up by name; there must be exactly one.
pub async fn query_actor<S: CypherSession>(session: &S, cast: &Cast) -> Result<StepOutcome> {
    let q = CypherQuery::new(
        "MATCH (actor:Actor)
         WHERE actor.name = $actor
         RETURN actor",
    )
    .param("actor", cast.actor.as_str())
    .node_column("actor");

    let rows = session.execute(&q).await?;
    expect_rows(Step::QueryNode, &rows, 1)?;
    let node = rows[0].node("actor")?.clone();

    Ok(StepOutcome::QueryNode { node })
}

/// Create the first movie and an ACTED_IN edge to it. Not idempotent.
pub async fn create_movie<S: CypherSession>(session: &S, cast: &Cast) -> Result<StepOutcome> {
    let q = CypherQuery::new(
        "MATCH (actor:Actor)
         WHERE actor.name = $actor
         CREATE (movie:Movie {title: $movie})
         CREATE (actor)-[:ACTED_IN]->(movie)
         RETURN movie.title AS title",
    )
    .param("actor", cast.actor.as_str())
    .param("movie", cast.first_movie.as_str())
    .scalar_column("title");

    let rows = session.execute(&q).await?;
    expect_rows(Step::CreateMovie, &rows, 1)?;
    let title = rows[0].string("title")?.to_string();
    tracing::info!(title = %title, "Created movie");

    Ok(StepOutcome::CreateMovie { title })
}

/// Merge the second movie and its edge; a rerun matches the existing pair.
pub async fn ensure_second_movie<S: CypherSession>(
    session: &S,
    cast: &Cast,
) -> Result<StepOutcome> {
    let q = CypherQuery::new(
        "MATCH (actor:Actor {name: $actor})
         MERGE (actor)-[r:ACTED_IN]->(movie:Movie {title: $movie})
         RETURN actor.name AS actor, type(r) AS relationship, movie.title AS movie",
    )
    .param("actor", cast.actor.as_str())
    .param("movie", cast.second_movie.as_str())
    .scalar_column(Casting::ACTOR)
    .scalar_column(Casting::RELATIONSHIP)
    .scalar_column(Casting::MOVIE);

    let rows = session.execute(&q).await?;
    expect_rows(Step::CreateUnique, &rows, 1)?;
    let casting = Casting::try_from(&rows[0])?;

    Ok(StepOutcome::CreateUnique { casting })
}

/// Write the actor's birth year and read it back.
pub async fn set_birth_year<S: CypherSession>(session: &S, cast: &Cast) -> Result<StepOutcome> {
    let q = CypherQuery::new(
        "MATCH (actor:Actor {name: $actor})
         SET actor.DoB = $dob
         RETURN actor.name AS name, actor.DoB AS dob",
    )
    .param("actor", cast.actor.as_str())
    .param("dob", cast.birth_year)
    .scalar_column(BirthYear::NAME)
    .scalar_column(BirthYear::DOB);

    let rows = session.execute(&q).await?;
    expect_rows(Step::SetNodeProperty, &rows, 1)?;
    let birth_year = BirthYear::try_from(&rows[0])?;

    Ok(StepOutcome::SetNodeProperty { birth_year })
}

/// List every Movie node; a fresh run leaves exactly `EXPECTED_MOVIES`.
pub async fn query_movies<S: CypherSession>(session: &S) -> Result<StepOutcome> {
    let q = CypherQuery::new("MATCH (movie:Movie) RETURN movie").node_column("movie");

    let rows = session.execute(&q).await?;
    expect_rows(Step::QueryMovies, &rows, EXPECTED_MOVIES)?;
    let movies = nodes_in(&rows, "movie")?;

    Ok(StepOutcome::QueryMovies { movies })
}

/// List every node in the database.
pub async fn query_all_nodes<S: CypherSession>(session: &S) -> Result<StepOutcome> {
    let q = CypherQuery::new("MATCH (n) RETURN n").node_column("n");

    let rows = session.execute(&q).await?;
    let nodes = nodes_in(&rows, "n")?;

    Ok(StepOutcome::QueryAllNodes { nodes })
}

fn expect_rows(step: Step, rows: &[ResultRow], expected: usize) -> Result<()> {
    if rows.len() == expected {
        Ok(())
    } else {
        Err(TutorialError::Cardinality {
            step: step.name(),
            expected,
            actual: rows.len(),
        })
    }
}

fn nodes_in(rows: &[ResultRow], column: &str) -> Result<Vec<NodeRecord>> {
    rows.iter()
        .map(|row| row.node(column).cloned().map_err(TutorialError::from))
        .collect()
}
