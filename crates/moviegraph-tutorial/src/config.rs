//! Configuration for the tutorial run.
//!
//! Loaded from (in priority order):
//! 1. Environment variables (`MOVIEGRAPH_` prefix, `__` separator,
//!    e.g. `MOVIEGRAPH_NEO4J__URI`)
//! 2. Config file (`moviegraph.toml`, optional)
//! 3. Defaults

use moviegraph_graph::GraphConfig;
use serde::Deserialize;

use crate::error::{Result, TutorialError};

/// The `[tutorial]` section.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct TutorialConfig {
    /// Name of the actor node created in step one.
    #[serde(default = "default_actor")]
    pub actor: String,

    /// Movie created unconditionally in step three.
    #[serde(default = "default_first_movie")]
    pub first_movie: String,

    /// Movie merged in step four.
    #[serde(default = "default_second_movie")]
    pub second_movie: String,

    /// Value written to the actor's `DoB` property in step five.
    #[serde(default = "default_birth_year")]
    pub birth_year: i64,

    /// Clear the database before the first step.
    #[serde(default = "default_true")]
    pub reset_on_start: bool,
}

fn default_actor() -> String {
    "Tom Hanks".to_string()
}

fn default_first_movie() -> String {
    "Sleepless in Seattle".to_string()
}

fn default_second_movie() -> String {
    "Forrest Gump".to_string()
}

fn default_birth_year() -> i64 {
    1944
}

fn default_true() -> bool {
    true
}

impl Default for TutorialConfig {
    fn default() -> Self {
        Self {
            actor: default_actor(),
            first_movie: default_first_movie(),
            second_movie: default_second_movie(),
            birth_year: default_birth_year(),
            reset_on_start: default_true(),
        }
    }
}

/// Everything the binary needs, read from one layered source.
#[derive(Debug, Clone, Default)]
pub struct Settings {
    pub neo4j: GraphConfig,
    pub tutorial: TutorialConfig,
}

/// Load settings from `<file_prefix>.toml` (if present) and the environment.
///
/// Missing sections fall back to defaults; a section that is present but
/// malformed is an error.
pub fn load_settings(file_prefix: &str) -> Result<Settings> {
    let cfg = config::Config::builder()
        .add_source(config::File::with_name(file_prefix).required(false))
        .add_source(
            config::Environment::with_prefix("MOVIEGRAPH")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        )
        .build()
        .map_err(|e| TutorialError::Config(e.to_string()))?;

    Ok(Settings {
        neo4j: section(&cfg, "neo4j")?.unwrap_or_default(),
        tutorial: section(&cfg, "tutorial")?.unwrap_or_default(),
    })
}

fn section<T: serde::de::DeserializeOwned>(cfg: &config::Config, key: &str) -> Result<Option<T>> {
    match cfg.get::<T>(key) {
        Ok(v) => Ok(Some(v)),
        Err(config::ConfigError::NotFound(_)) => Ok(None),
        Err(e) => Err(TutorialError::Config(format!("[{key}]: {e}"))),
    }
}
