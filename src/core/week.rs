//! Semester week arithmetic and the week-recurrence filter.

use crate::models::schedule::ScheduleWithCourse;
use crate::models::week_info::WeekInfo;
use crate::models::weeks::WeekSet;
use crate::utils::date::parse_date;
use chrono::NaiveDate;

pub const WEEKDAY_NAMES: [&str; 7] = ["周一", "周二", "周三", "周四", "周五", "周六", "周日"];

/// Chinese weekday label for 1 (Monday) … 7 (Sunday).
pub fn weekday_name(day_of_week: u8) -> &'static str {
    match day_of_week {
        1..=7 => WEEKDAY_NAMES[(day_of_week - 1) as usize],
        _ => "未知",
    }
}

/// An entry recurs on `week` when its set is empty or lists that week.
pub fn includes(weeks: &WeekSet, week: u32) -> bool {
    weeks.includes(week)
}

/// Keep the entries recurring on `week`; `None` keeps everything.
pub fn filter_by_week(entries: Vec<ScheduleWithCourse>, week: Option<u32>) -> Vec<ScheduleWithCourse> {
    match week {
        None => entries,
        Some(w) => entries.into_iter().filter(|e| includes(&e.weeks, w)).collect(),
    }
}

/// `floor(days / 7) + 1`, never below week 1.
pub fn calculate_week_number(semester_start: NaiveDate, today: NaiveDate) -> u32 {
    let days = (today - semester_start).num_days();
    let week = days.div_euclid(7) + 1;
    week.max(1) as u32
}

/// Resolve the current week from the stored start date setting.
/// An empty or unreadable date means "not configured": week 1.
pub fn week_info(semester_start_date: &str, today: NaiveDate) -> WeekInfo {
    let raw = semester_start_date.trim();

    match parse_date(raw) {
        Some(start) => WeekInfo {
            week: calculate_week_number(start, today),
            semester_start_date: raw.to_string(),
            is_calculated: true,
        },
        None => WeekInfo {
            week: 1,
            semester_start_date: raw.to_string(),
            is_calculated: false,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    #[test]
    fn week_number_counts_whole_weeks() {
        let start = d("2025-09-01");
        assert_eq!(calculate_week_number(start, d("2025-09-01")), 1);
        assert_eq!(calculate_week_number(start, d("2025-09-07")), 1);
        assert_eq!(calculate_week_number(start, d("2025-09-08")), 2);
        assert_eq!(calculate_week_number(start, d("2025-11-10")), 11);
    }

    #[test]
    fn week_number_is_floored_at_one() {
        assert_eq!(calculate_week_number(d("2025-09-01"), d("2025-08-01")), 1);
    }

    #[test]
    fn unset_start_date_defaults_to_week_one() {
        let info = week_info("", d("2025-10-01"));
        assert_eq!(info.week, 1);
        assert!(!info.is_calculated);

        let info = week_info("2025-09-01", d("2025-09-15"));
        assert_eq!(info.week, 3);
        assert!(info.is_calculated);
    }

    #[test]
    fn weekday_names() {
        assert_eq!(weekday_name(1), "周一");
        assert_eq!(weekday_name(7), "周日");
        assert_eq!(weekday_name(0), "未知");
    }
}
