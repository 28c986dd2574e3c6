use chrono::{Datelike, Days, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::config::DAYS_PER_WEEK;
use crate::models::boundary::{mdy, mdy_option};
use crate::models::Episode;

/// One episode-relative work week. Week 1 may be short; the last week is
/// clipped to the episode end.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkWeek {
    pub number: u32,
    #[serde(with = "mdy")]
    pub start: NaiveDate,
    #[serde(with = "mdy")]
    pub end: NaiveDate,
    pub is_last: bool,
    /// Un-clipped end of the final week. Only set when `is_last`.
    #[serde(with = "mdy_option", default)]
    pub last_week_end: Option<NaiveDate>,
}

impl WorkWeek {
    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.start && date <= self.end
    }
}

/// Partitions the episode into work weeks.
///
/// Week 1 starts on the episode start and runs to the day before the next
/// `first_work_week_day`. Each later week is seven days, except the last,
/// whose end is clipped to the episode end.
pub fn build_work_weeks(episode: &Episode) -> Vec<WorkWeek> {
    let mut weeks = Vec::new();
    if episode.end_date < episode.start_date {
        return weeks;
    }

    let week_closer = episode.first_work_week_day.pred();
    let days_to_close = (week_closer.num_days_from_monday() + 7
        - episode.start_date.weekday().num_days_from_monday())
        % 7;

    let mut start = episode.start_date;
    let mut unclipped = start + Days::new(u64::from(days_to_close));
    let mut number = 1;

    loop {
        if unclipped >= episode.end_date {
            weeks.push(WorkWeek {
                number,
                start,
                end: episode.end_date,
                is_last: true,
                last_week_end: Some(unclipped),
            });
            return weeks;
        }

        weeks.push(WorkWeek {
            number,
            start,
            end: unclipped,
            is_last: false,
            last_week_end: None,
        });

        start = unclipped + Days::new(1);
        unclipped = start + Days::new((DAYS_PER_WEEK - 1) as u64);
        number += 1;
    }
}

/// The work week containing `date`, if the date falls inside the episode.
pub fn week_containing(weeks: &[WorkWeek], date: NaiveDate) -> Option<&WorkWeek> {
    weeks.iter().find(|w| w.contains(date))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Weekday;

    fn d(m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, m, day).unwrap()
    }

    fn episode(start: NaiveDate, end: NaiveDate, first: Weekday) -> Episode {
        Episode::new(start, end, first)
    }

    fn assert_partition(ep: &Episode, weeks: &[WorkWeek]) {
        assert_eq!(weeks.first().unwrap().start, ep.start_date);
        assert_eq!(weeks.last().unwrap().end, ep.end_date);
        for pair in weeks.windows(2) {
            assert_eq!(pair[0].end + Days::new(1), pair[1].start);
            assert_eq!(pair[0].number + 1, pair[1].number);
            assert!(!pair[0].is_last);
        }
        for w in weeks {
            assert!(w.start <= w.end);
            assert!((w.end - w.start).num_days() < DAYS_PER_WEEK);
        }
        assert_eq!(weeks.iter().filter(|w| w.is_last).count(), 1);
    }

    #[test]
    fn sixty_day_episode_monday_weeks() {
        let ep = episode(d(1, 1), d(2, 29), Weekday::Mon);
        let weeks = build_work_weeks(&ep);

        assert_eq!(weeks[0].start, d(1, 1));
        assert_eq!(weeks[0].end, d(1, 7));
        assert_eq!(weeks[0].end.weekday(), Weekday::Sun);

        let last = weeks.last().unwrap();
        assert_eq!(weeks.len(), 9);
        assert_eq!(last.start, d(2, 26));
        assert_eq!(last.end, d(2, 29));
        assert_eq!(last.last_week_end, Some(d(3, 3)));
        assert_partition(&ep, &weeks);
    }

    #[test]
    fn first_week_is_short_when_episode_starts_mid_week() {
        // 01/03/2024 is a Wednesday; Saturday-based weeks close on Friday.
        let ep = episode(d(1, 3), d(3, 2), Weekday::Sat);
        let weeks = build_work_weeks(&ep);
        assert_eq!(weeks[0].end, d(1, 5));
        assert_eq!(weeks[1].start, d(1, 6));
        assert_eq!(weeks[1].end, d(1, 12));
        assert_partition(&ep, &weeks);
    }

    #[test]
    fn start_on_week_closer_gives_one_day_week() {
        // 01/07/2024 is a Sunday, the closer for Monday-based weeks.
        let ep = episode(d(1, 7), d(1, 31), Weekday::Mon);
        let weeks = build_work_weeks(&ep);
        assert_eq!(weeks[0].start, weeks[0].end);
        assert_partition(&ep, &weeks);
    }

    #[test]
    fn exactly_full_last_week_is_not_clipped() {
        let ep = episode(d(1, 1), d(3, 3), Weekday::Mon);
        let weeks = build_work_weeks(&ep);
        let last = weeks.last().unwrap();
        assert_eq!(last.end, d(3, 3));
        assert_eq!(last.last_week_end, Some(d(3, 3)));
        assert_partition(&ep, &weeks);
    }

    #[test]
    fn single_day_episode() {
        let ep = episode(d(5, 1), d(5, 1), Weekday::Sun);
        let weeks = build_work_weeks(&ep);
        assert_eq!(weeks.len(), 1);
        assert!(weeks[0].is_last);
        assert_partition(&ep, &weeks);
    }

    #[test]
    fn inverted_episode_has_no_weeks() {
        let ep = episode(d(5, 2), d(5, 1), Weekday::Sun);
        assert!(build_work_weeks(&ep).is_empty());
    }

    #[test]
    fn partition_holds_for_every_start_day() {
        for offset in 0..7u64 {
            for first in [
                Weekday::Mon,
                Weekday::Tue,
                Weekday::Wed,
                Weekday::Thu,
                Weekday::Fri,
                Weekday::Sat,
                Weekday::Sun,
            ] {
                let start = d(1, 1) + Days::new(offset);
                let ep = episode(start, start + Days::new(59), first);
                let weeks = build_work_weeks(&ep);
                assert_partition(&ep, &weeks);
                for w in &weeks[1..] {
                    assert_eq!(w.start.weekday(), first);
                }
            }
        }
    }

    #[test]
    fn lookup_by_date() {
        let ep = episode(d(1, 1), d(2, 29), Weekday::Mon);
        let weeks = build_work_weeks(&ep);
        assert_eq!(week_containing(&weeks, d(1, 10)).unwrap().number, 2);
        assert!(week_containing(&weeks, d(3, 1)).is_none());
    }
}
