use chrono::{NaiveDate, Weekday};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::boundary::mdy;

/// A care episode: the fixed window every frequency must fall inside.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Episode {
    pub id: Uuid,
    #[serde(with = "mdy")]
    pub start_date: NaiveDate,
    #[serde(with = "mdy")]
    pub end_date: NaiveDate,
    /// First day of each work week after the first one.
    pub first_work_week_day: Weekday,
}

impl Episode {
    pub fn new(start_date: NaiveDate, end_date: NaiveDate, first_work_week_day: Weekday) -> Self {
        Self {
            id: Uuid::new_v4(),
            start_date,
            end_date,
            first_work_week_day,
        }
    }
}
