use chrono::NaiveDate;

use super::range::active_end;
use super::work_week::WorkWeek;
use crate::models::Frequency;

/// Closed interval a frequency occupies.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActiveWindow {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl ActiveWindow {
    pub fn overlaps(&self, other: &Self) -> bool {
        self.start <= other.end && self.end >= other.start
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.start && date <= self.end
    }
}

/// Window of a frequency that can collide with others. Unscheduled
/// (zero duration) and never-effective frequencies have none.
pub fn active_window(frequency: &Frequency, weeks: &[WorkWeek]) -> Option<ActiveWindow> {
    if frequency.duration == 0 || frequency.discontinue_flag {
        return None;
    }
    Some(ActiveWindow {
        start: frequency.effective_date,
        end: active_end(frequency, weeks),
    })
}

/// Whether any two active frequencies of one discipline overlap.
pub fn has_overlap<'a, I>(frequencies: I, weeks: &[WorkWeek]) -> bool
where
    I: IntoIterator<Item = &'a Frequency>,
{
    let windows: Vec<ActiveWindow> = frequencies
        .into_iter()
        .filter_map(|f| active_window(f, weeks))
        .collect();

    windows
        .iter()
        .enumerate()
        .any(|(i, a)| windows[i + 1..].iter().any(|b| a.overlaps(b)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Discipline, Episode, FrequencyStatus, FrequencyUnit};
    use crate::schedule::build_work_weeks;
    use chrono::Weekday;

    fn d(m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, m, day).unwrap()
    }

    fn daily(start: NaiveDate, days: u32) -> Frequency {
        Frequency {
            id: None,
            discipline: Discipline::PhysicalTherapy,
            status: FrequencyStatus::Current,
            is_pho: false,
            effective_date: start,
            unit: FrequencyUnit::Daily,
            occurrence_min: 1,
            occurrence_max: 1,
            duration: days,
            prn_visits: None,
            discontinue_date: None,
            discontinue_reason: None,
            discontinue_flag: false,
            pending: false,
        }
    }

    fn weeks() -> Vec<WorkWeek> {
        build_work_weeks(&Episode::new(d(1, 1), d(2, 29), Weekday::Mon))
    }

    #[test]
    fn intersecting_ranges_overlap() {
        // [01/01-01/10] and [01/05-01/15]
        let set = [daily(d(1, 1), 10), daily(d(1, 5), 11)];
        assert!(has_overlap(&set, &weeks()));
    }

    #[test]
    fn adjacent_ranges_do_not_overlap() {
        let set = [daily(d(1, 1), 10), daily(d(1, 11), 5)];
        assert!(!has_overlap(&set, &weeks()));
    }

    #[test]
    fn shared_boundary_day_overlaps() {
        let set = [daily(d(1, 1), 10), daily(d(1, 10), 5)];
        assert!(has_overlap(&set, &weeks()));
    }

    #[test]
    fn truncation_removes_overlap() {
        let mut first = daily(d(1, 1), 20);
        let second = daily(d(1, 12), 5);
        assert!(has_overlap([&first, &second], &weeks()));
        first.discontinue_date = Some(d(1, 11));
        assert!(!has_overlap([&first, &second], &weeks()));
    }

    #[test]
    fn never_effective_and_unscheduled_are_ignored() {
        let mut flagged = daily(d(1, 1), 20);
        flagged.discontinue_flag = true;
        flagged.discontinue_date = Some(d(1, 1));
        let unscheduled = daily(d(1, 3), 0);
        let set = [flagged, unscheduled, daily(d(1, 5), 3)];
        assert!(!has_overlap(&set, &weeks()));
    }

    #[test]
    fn order_does_not_matter() {
        let a = daily(d(1, 1), 3);
        let b = daily(d(1, 10), 3);
        let c = daily(d(1, 12), 3);
        let w = weeks();
        let orders: [[&Frequency; 3]; 6] = [
            [&a, &b, &c],
            [&a, &c, &b],
            [&b, &a, &c],
            [&b, &c, &a],
            [&c, &a, &b],
            [&c, &b, &a],
        ];
        for order in orders {
            assert!(has_overlap(order, &w));
        }
        for order in [[&a, &b], [&b, &a]] {
            assert!(!has_overlap(order, &w));
        }
    }

    #[test]
    fn empty_and_single_sets_never_overlap() {
        assert!(!has_overlap(&Vec::<Frequency>::new(), &weeks()));
        assert!(!has_overlap(&[daily(d(1, 1), 30)], &weeks()));
    }
}
