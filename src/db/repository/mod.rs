//! Repository layer: entity-scoped database operations.

mod episode;
mod frequency;

use chrono::NaiveDate;
use uuid::Uuid;

use super::DatabaseError;
use crate::models::{Discipline, Frequency, FrequencyStatus};

/// Persistence collaborator the scheduler reads and writes frequencies through.
pub trait FrequencyStore {
    fn load_frequencies(
        &self,
        episode_id: &Uuid,
        discipline: Discipline,
        status: FrequencyStatus,
    ) -> Result<Vec<Frequency>, DatabaseError>;

    /// Persists the records and returns them as stored: new rows get an id
    /// and every saved row becomes `current`.
    fn save_frequencies(
        &self,
        episode_id: &Uuid,
        frequencies: &[Frequency],
    ) -> Result<Vec<Frequency>, DatabaseError>;

    /// Soft-removes frequencies so later loads skip them.
    fn deactivate_frequencies(&self, ids: &[Uuid]) -> Result<(), DatabaseError>;
}

pub use episode::*;

fn parse_date(field: &str, value: &str) -> Result<NaiveDate, DatabaseError> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d").map_err(|_| DatabaseError::InvalidDate {
        field: field.into(),
        value: value.into(),
    })
}

fn parse_uuid(value: &str) -> Result<Uuid, DatabaseError> {
    Uuid::parse_str(value).map_err(|e| DatabaseError::ConstraintViolation(e.to_string()))
}
