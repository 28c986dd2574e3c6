use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::boundary::{flag, mdy, mdy_option};
use super::enums::{Discipline, FrequencyStatus, FrequencyUnit};

/// A visit frequency as the scheduler reasons about it ("2W4": two visits a
/// week for four weeks, starting on `effective_date`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Frequency {
    /// Assigned by the store on first save.
    pub id: Option<Uuid>,
    pub discipline: Discipline,
    pub status: FrequencyStatus,
    pub is_pho: bool,
    #[serde(with = "mdy")]
    pub effective_date: NaiveDate,
    pub unit: FrequencyUnit,
    pub occurrence_min: u32,
    pub occurrence_max: u32,
    pub duration: u32,
    pub prn_visits: Option<u32>,
    #[serde(with = "mdy_option", default)]
    pub discontinue_date: Option<NaiveDate>,
    pub discontinue_reason: Option<String>,
    /// Discontinued on or before its effective date: it never took effect.
    pub discontinue_flag: bool,
    pub pending: bool,
}

impl Frequency {
    pub fn key(&self) -> FrequencyKey {
        FrequencyKey {
            discipline: self.discipline,
            status: self.status,
            is_pho: self.is_pho,
        }
    }

    pub fn scope(&self) -> FrequencyScope {
        FrequencyScope {
            discipline: self.discipline,
            is_pho: self.is_pho,
        }
    }

    pub fn is_saved(&self) -> bool {
        self.id.is_some()
    }

    pub fn is_discontinued(&self) -> bool {
        self.discontinue_date.is_some()
    }
}

/// Map key for a discipline's frequencies in one status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct FrequencyKey {
    pub discipline: Discipline,
    pub status: FrequencyStatus,
    pub is_pho: bool,
}

/// A discipline's schedule across both statuses. Overlap and backdating
/// are judged within one scope.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct FrequencyScope {
    pub discipline: Discipline,
    pub is_pho: bool,
}

/// A frequency row as edited on the scheduling screen. Count fields are
/// free text until validation parses them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FrequencyRow {
    #[serde(default)]
    pub id: Option<Uuid>,
    pub discipline: Discipline,
    pub status: FrequencyStatus,
    #[serde(deserialize_with = "flag", default)]
    pub is_pho: bool,
    #[serde(with = "mdy_option", default)]
    pub effective_date: Option<NaiveDate>,
    pub unit: FrequencyUnit,
    #[serde(default)]
    pub occurrence_min: String,
    #[serde(default)]
    pub occurrence_max: String,
    #[serde(default)]
    pub duration: String,
    #[serde(default)]
    pub prn_count: String,
    #[serde(with = "mdy_option", default)]
    pub discontinue_date: Option<NaiveDate>,
    #[serde(default)]
    pub discontinue_reason: Option<String>,
    #[serde(deserialize_with = "flag", default)]
    pub discontinue_flag: bool,
    #[serde(deserialize_with = "flag", default)]
    pub pending: bool,
}

impl From<&Frequency> for FrequencyRow {
    fn from(f: &Frequency) -> Self {
        Self {
            id: f.id,
            discipline: f.discipline,
            status: f.status,
            is_pho: f.is_pho,
            effective_date: Some(f.effective_date),
            unit: f.unit,
            occurrence_min: f.occurrence_min.to_string(),
            occurrence_max: f.occurrence_max.to_string(),
            duration: f.duration.to_string(),
            prn_count: f.prn_visits.map(|n| n.to_string()).unwrap_or_default(),
            discontinue_date: f.discontinue_date,
            discontinue_reason: f.discontinue_reason.clone(),
            discontinue_flag: f.discontinue_flag,
            pending: f.pending,
        }
    }
}
