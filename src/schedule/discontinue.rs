use chrono::NaiveDate;
use serde::Serialize;

use super::range::calc_frequency_end;
use super::validation::{ValidationError, ValidationErrorKind};
use super::work_week::WorkWeek;
use crate::models::Frequency;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DiscontinueOutcome {
    /// Discontinued on or before its effective date.
    NeverTookEffect,
    /// Ended early; the window now closes on the discontinue date.
    Truncated,
    /// An earlier discontinuation stands.
    AlreadyDiscontinued,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Discontinued {
    pub frequency: Frequency,
    pub outcome: DiscontinueOutcome,
}

/// Discontinues a frequency, returning the updated record. The input is
/// left untouched; the caller swaps the new record in.
///
/// The first discontinuation wins: a recorded date is never overwritten and
/// a recorded reason is only filled in when blank.
pub fn discontinue(
    frequency: &Frequency,
    date: NaiveDate,
    reason: &str,
    weeks: &[WorkWeek],
) -> Result<Discontinued, ValidationError> {
    let mut updated = frequency.clone();
    let blank_reason = updated
        .discontinue_reason
        .as_deref()
        .map_or(true, |r| r.trim().is_empty());
    let reason = (!reason.trim().is_empty()).then(|| reason.trim().to_string());

    if frequency.is_discontinued() {
        if blank_reason && reason.is_some() {
            updated.discontinue_reason = reason;
        }
        return Ok(Discontinued {
            frequency: updated,
            outcome: DiscontinueOutcome::AlreadyDiscontinued,
        });
    }

    let outcome = if date <= frequency.effective_date {
        DiscontinueOutcome::NeverTookEffect
    } else if date < calc_frequency_end(frequency, weeks) {
        DiscontinueOutcome::Truncated
    } else {
        return Err(ValidationError::new(
            ValidationErrorKind::IllegalDiscontinuation,
            Some(frequency.discipline),
        ));
    };

    updated.discontinue_flag = outcome == DiscontinueOutcome::NeverTookEffect;
    updated.discontinue_date = Some(date);
    if blank_reason {
        updated.discontinue_reason = reason;
    }
    tracing::debug!(
        discipline = frequency.discipline.code(),
        outcome = ?outcome,
        "Frequency discontinued"
    );
    Ok(Discontinued {
        frequency: updated,
        outcome,
    })
}
