//! moviegraph-tutorial: a step-by-step Neo4j walkthrough.
//!
//! Creates an actor, two movies and the ACTED_IN edges between them, sets a
//! property, and reads everything back, reporting each step as it completes.
//! The database session is injected, so each step can be exercised on its own.

pub mod config;
pub mod error;
pub mod records;
pub mod runner;
pub mod steps;

#[cfg(test)]
pub(crate) mod testing;

pub use config::{load_settings, Settings, TutorialConfig};
pub use error::{Result, TutorialError};
pub use runner::{RunSummary, Tutorial};
pub use steps::{Cast, Step, StepOutcome};
