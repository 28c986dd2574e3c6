use chrono::{Days, NaiveDate};
use serde::{Deserialize, Serialize};

use super::work_week::{week_containing, WorkWeek};
use crate::config::{DAYS_PER_MONTH, DAYS_PER_WEEK};
use crate::models::boundary::mdy;
use crate::models::{Frequency, FrequencyUnit};

/// A frequency together with its computed, inclusive end date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FrequencyRange {
    pub frequency: Frequency,
    #[serde(with = "mdy")]
    pub end_date: NaiveDate,
}

/// Inclusive end of a frequency's natural window.
///
/// A zero duration yields the day before the effective date (nothing
/// scheduled yet). Weekly frequencies always end on a work-week end, except
/// when they overrun the episode by more than a week or start after it;
/// those ends are kept so validation can report them.
pub fn calc_frequency_end(frequency: &Frequency, weeks: &[WorkWeek]) -> NaiveDate {
    let effective = frequency.effective_date;
    let duration = i64::from(frequency.duration);
    if duration == 0 {
        return offset(effective, -1);
    }

    match frequency.unit {
        FrequencyUnit::Daily => offset(effective, duration - 1),
        FrequencyUnit::Monthly => offset(effective, DAYS_PER_MONTH * duration - 1),
        FrequencyUnit::Weekly => {
            let naive = offset(effective, DAYS_PER_WEEK * duration);
            weekly_end(effective, naive, weeks)
        }
    }
}

fn weekly_end(effective: NaiveDate, naive: NaiveDate, weeks: &[WorkWeek]) -> NaiveDate {
    if let Some(week) = week_containing(weeks, naive) {
        return week.end;
    }

    match weeks.last() {
        // Only a frequency starting inside the episode can be clamped to it.
        Some(last) if naive > last.end && effective <= last.end => {
            let last_week_end = last.last_week_end.unwrap_or(last.end);
            if (naive - last_week_end).num_days() <= DAYS_PER_WEEK {
                last.end
            } else {
                naive
            }
        }
        _ => naive,
    }
}

/// End of the window the frequency actually occupies: the discontinue date
/// when one is recorded, otherwise the natural end.
pub fn active_end(frequency: &Frequency, weeks: &[WorkWeek]) -> NaiveDate {
    frequency
        .discontinue_date
        .unwrap_or_else(|| calc_frequency_end(frequency, weeks))
}

pub fn frequency_range(frequency: &Frequency, weeks: &[WorkWeek]) -> FrequencyRange {
    FrequencyRange {
        end_date: calc_frequency_end(frequency, weeks),
        frequency: frequency.clone(),
    }
}

fn offset(date: NaiveDate, days: i64) -> NaiveDate {
    let step = Days::new(days.unsigned_abs());
    let shifted = if days >= 0 {
        date.checked_add_days(step)
    } else {
        date.checked_sub_days(step)
    };
    shifted.unwrap_or(if days >= 0 { NaiveDate::MAX } else { NaiveDate::MIN })
}
