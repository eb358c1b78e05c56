//! Typed records mapped from result rows.
//!
//! Each record names the columns it reads; the step queries alias their
//! `RETURN` items to match.

use moviegraph_core::{RecordError, ResultRow};
use serde::Serialize;

/// `(actor)-[r]->(movie)` as returned by the create-if-absent step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Casting {
    pub actor: String,
    pub relationship: String,
    pub movie: String,
}

impl Casting {
    pub const ACTOR: &'static str = "actor";
    pub const RELATIONSHIP: &'static str = "relationship";
    pub const MOVIE: &'static str = "movie";
}

impl TryFrom<&ResultRow> for Casting {
    type Error = RecordError;

    fn try_from(row: &ResultRow) -> Result<Self, Self::Error> {
        Ok(Self {
            actor: row.string(Self::ACTOR)?.to_string(),
            relationship: row.string(Self::RELATIONSHIP)?.to_string(),
            movie: row.string(Self::MOVIE)?.to_string(),
        })
    }
}

/// An actor's name with the birth year just written to it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BirthYear {
    pub name: String,
    pub dob: i64,
}

impl BirthYear {
    pub const NAME: &'static str = "name";
    pub const DOB: &'static str = "dob";
}

impl TryFrom<&ResultRow> for BirthYear {
    type Error = RecordError;

    fn try_from(row: &ResultRow) -> Result<Self, Self::Error> {
        Ok(Self {
            name: row.string(Self::NAME)?.to_string(),
            dob: row.integer(Self::DOB)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use moviegraph_core::{GraphValue, PropertyValue};

    use super::*;

    fn scalar(v: impl Into<PropertyValue>) -> GraphValue {
        GraphValue::Scalar(v.into())
    }

    #[test]
    fn test_casting_from_row() {
        let row = ResultRow::new()
            .with("actor", scalar("Tom Hanks"))
            .with("relationship", scalar("ACTED_IN"))
            .with("movie", scalar("Forrest Gump"));

        let casting = Casting::try_from(&row).unwrap();
        assert_eq!(
            casting,
            Casting {
                actor: "Tom Hanks".to_string(),
                relationship: "ACTED_IN".to_string(),
                movie: "Forrest Gump".to_string(),
            }
        );
    }

    #[test]
    fn test_casting_requires_every_column() {
        let row = ResultRow::new()
            .with("actor", scalar("Tom Hanks"))
            .with("relationship", scalar("ACTED_IN"));
        assert_eq!(
            Casting::try_from(&row).unwrap_err(),
            RecordError::MissingColumn {
                column: "movie".to_string()
            }
        );
    }

    #[test]
    fn test_birth_year_rejects_string_dob() {
        let row = ResultRow::new()
            .with("name", scalar("Tom Hanks"))
            .with("dob", scalar("1944"));
        assert!(matches!(
            BirthYear::try_from(&row),
            Err(RecordError::TypeMismatch {
                expected: "integer",
                found: "string",
                ..
            })
        ));
    }
}
