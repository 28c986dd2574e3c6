//! Frequency validation.
//!
//! Checks run in a fixed order and the first failure is reported, one
//! message at a time, the way the scheduling screen shows them:
//! 1. non-numeric occurrence/duration or PRN count text
//! 2. zero duration or occurrence count
//! 3. missing effective date
//! 4. a new frequency starting inside an existing frequency's range
//! 5. effective date before the episode start
//! 6. range running past the episode end
//! 7. overlapping ranges within a discipline
//! 8. discontinue date on or after the natural end

use std::collections::BTreeMap;

use serde::Serialize;

use super::overlap::{active_window, has_overlap};
use super::range::calc_frequency_end;
use super::work_week::{build_work_weeks, WorkWeek};
use crate::config::SchedulerOptions;
use crate::models::{Discipline, Episode, Frequency, FrequencyRow, FrequencyScope, FrequencyStatus};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ValidationErrorKind {
    NonNumeric,
    NonNumericPrn,
    ZeroCount,
    MissingEffectiveDate,
    Backdated,
    BeforeEpisodeStart,
    ExceedsEpisode,
    Overlap,
    IllegalDiscontinuation,
}

impl ValidationErrorKind {
    pub fn message(&self) -> &'static str {
        match self {
            Self::NonNumeric => "Occurrence and duration fields may only contain numbers",
            Self::NonNumericPrn => "PRN visit count may only contain numbers",
            Self::ZeroCount => "Frequencies cannot have a duration or occurrence count of zero",
            Self::MissingEffectiveDate => "Every frequency needs an effective date",
            Self::Backdated => {
                "A new frequency cannot start inside the range of an existing frequency for the same discipline"
            }
            Self::BeforeEpisodeStart => {
                "Frequency effective date cannot be before the start of the episode"
            }
            Self::ExceedsEpisode => "Frequency range cannot go past the end of the episode",
            Self::Overlap => "Frequencies for the same discipline cannot overlap",
            Self::IllegalDiscontinuation => {
                "A frequency cannot be discontinued on or after the date its range ends"
            }
        }
    }
}

/// A failed check, with the discipline it was found in when there is one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, thiserror::Error)]
#[error("{}", .kind.message())]
pub struct ValidationError {
    pub kind: ValidationErrorKind,
    pub discipline: Option<Discipline>,
}

impl ValidationError {
    pub fn new(kind: ValidationErrorKind, discipline: Option<Discipline>) -> Self {
        Self { kind, discipline }
    }

    pub fn message(&self) -> &'static str {
        self.kind.message()
    }
}

/// Pass/fail answer handed back to the scheduling screen.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Verdict {
    pub valid: bool,
    pub message: Option<String>,
}

impl From<&Result<Vec<Frequency>, ValidationError>> for Verdict {
    fn from(result: &Result<Vec<Frequency>, ValidationError>) -> Self {
        match result {
            Ok(_) => Self { valid: true, message: None },
            Err(e) => Self {
                valid: false,
                message: Some(e.message().to_string()),
            },
        }
    }
}

/// Validates edited rows against the episode. On success returns the rows
/// parsed into frequencies, in input order.
pub fn validate(
    rows: &[FrequencyRow],
    episode: &Episode,
    options: &SchedulerOptions,
) -> Result<Vec<Frequency>, ValidationError> {
    check_numeric(rows)?;
    let frequencies = parse_rows(rows, options)?;
    let weeks = build_work_weeks(episode);
    check_schedule(&frequencies, episode, &weeks)?;
    Ok(frequencies)
}

pub fn verdict(rows: &[FrequencyRow], episode: &Episode, options: &SchedulerOptions) -> Verdict {
    Verdict::from(&validate(rows, episode, options))
}

/// Temporal checks over already-typed frequencies.
pub fn check_schedule(
    frequencies: &[Frequency],
    episode: &Episode,
    weeks: &[WorkWeek],
) -> Result<(), ValidationError> {
    check_backdating(frequencies, weeks)?;

    if let Some(f) = frequencies
        .iter()
        .find(|f| f.effective_date < episode.start_date)
    {
        return Err(fail(ValidationErrorKind::BeforeEpisodeStart, f));
    }

    if let Some(f) = frequencies.iter().find(|f| {
        f.effective_date > episode.end_date
            || active_window(f, weeks).is_some_and(|w| w.end > episode.end_date)
    }) {
        return Err(fail(ValidationErrorKind::ExceedsEpisode, f));
    }

    for (scope, members) in by_scope(frequencies) {
        if has_overlap(members, weeks) {
            return Err(ValidationError::new(
                ValidationErrorKind::Overlap,
                Some(scope.discipline),
            ));
        }
    }

    if let Some(f) = frequencies.iter().find(|f| discontinued_too_late(f, weeks)) {
        return Err(fail(ValidationErrorKind::IllegalDiscontinuation, f));
    }

    Ok(())
}

fn fail(kind: ValidationErrorKind, frequency: &Frequency) -> ValidationError {
    ValidationError::new(kind, Some(frequency.discipline))
}

fn check_numeric(rows: &[FrequencyRow]) -> Result<(), ValidationError> {
    for row in rows {
        let counts = [&row.occurrence_min, &row.occurrence_max, &row.duration];
        if counts.iter().any(|c| parse_count(c).is_none()) {
            return Err(ValidationError::new(
                ValidationErrorKind::NonNumeric,
                Some(row.discipline),
            ));
        }
    }
    if let Some(row) = rows.iter().find(|r| parse_count(&r.prn_count).is_none()) {
        return Err(ValidationError::new(
            ValidationErrorKind::NonNumericPrn,
            Some(row.discipline),
        ));
    }
    Ok(())
}

fn parse_rows(
    rows: &[FrequencyRow],
    options: &SchedulerOptions,
) -> Result<Vec<Frequency>, ValidationError> {
    let counted: Vec<(&FrequencyRow, u32, u32, u32)> = rows
        .iter()
        .map(|row| {
            (
                row,
                parse_count(&row.occurrence_min).unwrap_or(0),
                parse_count(&row.occurrence_max).unwrap_or(0),
                parse_count(&row.duration).unwrap_or(0),
            )
        })
        .collect();

    for (row, min, max, duration) in &counted {
        if *duration == 0 || *max == 0 || (options.ranged_frequency && *min == 0) {
            return Err(ValidationError::new(
                ValidationErrorKind::ZeroCount,
                Some(row.discipline),
            ));
        }
    }

    counted
        .into_iter()
        .map(|(row, min, max, duration)| -> Result<Frequency, ValidationError> {
            let effective_date = row.effective_date.ok_or_else(|| {
                ValidationError::new(
                    ValidationErrorKind::MissingEffectiveDate,
                    Some(row.discipline),
                )
            })?;
            let prn_visits = match parse_count(&row.prn_count) {
                Some(0) | None => None,
                Some(n) => Some(n),
            };
            Ok(Frequency {
                id: row.id,
                discipline: row.discipline,
                status: row.status,
                is_pho: row.is_pho,
                effective_date,
                unit: row.unit,
                occurrence_min: min,
                occurrence_max: max,
                duration,
                prn_visits,
                discontinue_date: row.discontinue_date,
                discontinue_reason: row.discontinue_reason.clone(),
                discontinue_flag: row.discontinue_flag,
                pending: row.pending,
            })
        })
        .collect()
}

/// Blank reads as zero; anything but ASCII digits is rejected. Counts too
/// large for `u32` saturate and fail the range checks instead.
fn parse_count(raw: &str) -> Option<u32> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Some(0);
    }
    if !trimmed.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    Some(trimmed.parse().unwrap_or(u32::MAX))
}

fn check_backdating(frequencies: &[Frequency], weeks: &[WorkWeek]) -> Result<(), ValidationError> {
    let existing: Vec<_> = frequencies
        .iter()
        .filter(|f| f.status == FrequencyStatus::Current)
        .filter_map(|f| active_window(f, weeks).map(|w| (f.scope(), w)))
        .collect();

    for added in frequencies.iter().filter(|f| f.status == FrequencyStatus::New) {
        let backdated = existing
            .iter()
            .any(|(scope, window)| *scope == added.scope() && window.contains(added.effective_date));
        if backdated {
            return Err(fail(ValidationErrorKind::Backdated, added));
        }
    }
    Ok(())
}

fn by_scope(frequencies: &[Frequency]) -> BTreeMap<FrequencyScope, Vec<&Frequency>> {
    let mut groups: BTreeMap<FrequencyScope, Vec<&Frequency>> = BTreeMap::new();
    for f in frequencies {
        groups.entry(f.scope()).or_default().push(f);
    }
    groups
}

fn discontinued_too_late(frequency: &Frequency, weeks: &[WorkWeek]) -> bool {
    match frequency.discontinue_date {
        Some(date) if !frequency.discontinue_flag => date >= calc_frequency_end(frequency, weeks),
        _ => false,
    }
}
