use crate::core::week::weekday_name;
use crate::models::schedule::ScheduleEntry;
use crate::models::statistics::{DayPeriod, Statistics};
use crate::utils::time::minutes_between;
use chrono::Timelike;
use std::collections::BTreeMap;

fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// Summary numbers for the statistics page.
///
/// A slot with explicit weeks counts once per listed week; a slot recurring
/// every week counts once.
pub fn build_statistics(
    total_courses: i64,
    slots: &[ScheduleEntry],
    total_sessions: i64,
    attended_sessions: i64,
    total_weeks: u32,
) -> Statistics {
    let total_minutes: i64 = slots
        .iter()
        .map(|s| minutes_between(s.start_time, s.end_time) * s.weeks.len().max(1) as i64)
        .sum();

    let attendance_rate = if total_sessions > 0 {
        attended_sessions as f64 / total_sessions as f64
    } else {
        0.0
    };

    let total_weeks = total_weeks.max(1);
    let weekly_hours = total_minutes as f64 / 60.0 / total_weeks as f64;

    // Busiest weekday by slot count; ties go to the earlier day
    let mut per_day = [0u32; 8];
    for s in slots {
        if (1..=7).contains(&s.day_of_week) {
            per_day[s.day_of_week as usize] += 1;
        }
    }
    let busiest_day = (1..=7u8)
        .filter(|d| per_day[*d as usize] > 0)
        .max_by(|a, b| {
            per_day[*a as usize]
                .cmp(&per_day[*b as usize])
                .then(b.cmp(a))
        })
        .map(|d| weekday_name(d).to_string())
        .unwrap_or_else(|| "无".to_string());

    let mut time_distribution: BTreeMap<DayPeriod, u32> = BTreeMap::new();
    for s in slots {
        *time_distribution
            .entry(DayPeriod::from_hour(s.start_time.hour()))
            .or_insert(0) += 1;
    }

    Statistics {
        total_courses,
        total_hours: round1(total_minutes as f64 / 60.0),
        attendance_rate: round1(attendance_rate * 100.0),
        weekly_hours: round1(weekly_hours),
        busiest_day,
        time_distribution,
    }
}
