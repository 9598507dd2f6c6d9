//! Topbar state at one instant: which class is running or coming up, and how
//! far along the current class (or break) is.
//!
//! Entries handed in must already be week filtered and sorted by start time
//! within each day. Slot lookups compare at minute granularity: a class is
//! current from its start minute (inclusive) to its end minute (exclusive).
//! Progress uses whole seconds.

use crate::core::week::weekday_name;
use crate::models::display::DisplayState;
use crate::models::schedule::ScheduleWithCourse;
use crate::utils::time::{format_remaining, seconds_of_day, truncate_to_minute};
use chrono::NaiveTime;

pub const NO_CLASSES_TODAY: &str = "今日无课程安排";

pub fn clamp01(value: f64) -> f64 {
    if value.is_nan() { 0.0 } else { value.clamp(0.0, 1.0) }
}

/// First slot with `start ≤ now < end`.
pub fn find_current_class(classes: &[ScheduleWithCourse], now: NaiveTime) -> Option<&ScheduleWithCourse> {
    let now = truncate_to_minute(now);
    classes
        .iter()
        .find(|c| c.start_time <= now && c.end_time > now)
}

/// First slot starting strictly after the current minute.
pub fn find_next_class(classes: &[ScheduleWithCourse], now: NaiveTime) -> Option<&ScheduleWithCourse> {
    let now = truncate_to_minute(now);
    classes.iter().find(|c| c.start_time > now)
}

/// Last slot of the leading run of already-ended slots.
pub fn find_last_class(classes: &[ScheduleWithCourse], now: NaiveTime) -> Option<&ScheduleWithCourse> {
    let now = truncate_to_minute(now);
    let mut last = None;
    for c in classes {
        if c.end_time <= now {
            last = Some(c);
        } else {
            break;
        }
    }
    last
}

/// First slot of the first non-empty day among the six days after `today`,
/// wrapping Sunday → Monday.
pub fn find_next_class_across_week(
    week_schedule: &[ScheduleWithCourse],
    today: u8,
) -> Option<&ScheduleWithCourse> {
    (1..7u8).find_map(|offset| {
        // ((today - 1 + offset) mod 7) + 1
        let target = ((today as u16 + 6 + offset as u16) % 7 + 1) as u8;
        week_schedule.iter().find(|c| c.day_of_week == target)
    })
}

/// Fraction of the class already elapsed.
pub fn class_progress(class: &ScheduleWithCourse, now_secs: i64) -> f64 {
    let start = seconds_of_day(class.start_time);
    let end = seconds_of_day(class.end_time);
    let duration = end - start;
    if duration <= 0 {
        return 0.0;
    }
    clamp01((now_secs - start) as f64 / duration as f64)
}

/// Fraction of the break still remaining: 1 when the previous class just
/// ended, 0 when the next one starts. An empty or inverted break yields 0.
pub fn break_progress(last: &ScheduleWithCourse, next: &ScheduleWithCourse, now_secs: i64) -> f64 {
    let break_start = seconds_of_day(last.end_time);
    let break_end = seconds_of_day(next.start_time);
    let duration = break_end - break_start;
    if duration <= 0 {
        return 0.0;
    }
    clamp01((duration - (now_secs - break_start)) as f64 / duration as f64)
}

pub fn resolve(
    now: NaiveTime,
    today_classes: &[ScheduleWithCourse],
    week_classes: &[ScheduleWithCourse],
    today: u8,
) -> DisplayState {
    let now_secs = seconds_of_day(now);

    if let Some(current) = find_current_class(today_classes, now) {
        return DisplayState {
            display_text: format!(
                "{} ({}-{})",
                current.title(),
                current.start_str(),
                current.end_str()
            ),
            progress: class_progress(current, now_secs),
            is_break_time: false,
        };
    }

    if let Some(next) = find_next_class(today_classes, now) {
        let remaining = seconds_of_day(next.start_time) - now_secs;
        let progress = find_last_class(today_classes, now)
            .map(|last| break_progress(last, next, now_secs))
            .unwrap_or(0.0);

        return DisplayState {
            display_text: format!("下一节: {} ({}后)", next.title(), format_remaining(remaining)),
            progress,
            is_break_time: true,
        };
    }

    match find_next_class_across_week(week_classes, today) {
        Some(next) if next.day_of_week != today => DisplayState {
            display_text: format!(
                "今日课程结束 - 下一节: {} {}",
                weekday_name(next.day_of_week),
                next.course_name
            ),
            progress: 0.0,
            is_break_time: false,
        },
        _ => DisplayState {
            display_text: NO_CLASSES_TODAY.to_string(),
            progress: 0.0,
            is_break_time: false,
        },
    }
}
