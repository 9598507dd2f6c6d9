use chrono::NaiveTime;
use classtop::core::statistics::build_statistics;
use classtop::models::schedule::ScheduleEntry;
use classtop::models::statistics::DayPeriod;
use classtop::models::weeks::WeekSet;

fn entry(id: i64, day: u8, start: &str, end: &str, weeks: &str) -> ScheduleEntry {
    ScheduleEntry {
        id,
        course_id: 1,
        day_of_week: day,
        start_time: NaiveTime::parse_from_str(start, "%H:%M").unwrap(),
        end_time: NaiveTime::parse_from_str(end, "%H:%M").unwrap(),
        weeks: WeekSet::parse(weeks),
        note: String::new(),
    }
}

#[test]
fn empty_timetable() {
    let stats = build_statistics(0, &[], 0, 0, 20);
    assert_eq!(stats.total_hours, 0.0);
    assert_eq!(stats.attendance_rate, 0.0);
    assert_eq!(stats.busiest_day, "无");
    assert!(stats.time_distribution.is_empty());
}

#[test]
fn hours_count_each_listed_week() {
    let slots = vec![
        // 90 minutes in 4 weeks
        entry(1, 2, "08:00", "09:30", "1-4"),
        // 60 minutes, every week: counted once
        entry(2, 2, "13:00", "14:00", ""),
        entry(3, 5, "19:00", "20:00", ""),
    ];

    let stats = build_statistics(2, &slots, 4, 3, 16);

    assert_eq!(stats.total_courses, 2);
    assert_eq!(stats.total_hours, 8.0);
    assert_eq!(stats.weekly_hours, 0.5);
    assert_eq!(stats.attendance_rate, 75.0);
    assert_eq!(stats.busiest_day, "周二");
    assert_eq!(stats.time_distribution.get(&DayPeriod::Morning), Some(&1));
    assert_eq!(stats.time_distribution.get(&DayPeriod::Noon), Some(&1));
    assert_eq!(stats.time_distribution.get(&DayPeriod::Evening), Some(&1));
    assert_eq!(stats.time_distribution.get(&DayPeriod::Afternoon), None);
}

#[test]
fn busiest_day_ties_go_to_the_earlier_day() {
    let slots = vec![
        entry(1, 4, "08:00", "09:00", ""),
        entry(2, 2, "08:00", "09:00", ""),
    ];
    assert_eq!(build_statistics(1, &slots, 0, 0, 20).busiest_day, "周二");
}

#[test]
fn periods_split_on_hour_boundaries() {
    assert_eq!(DayPeriod::from_hour(11), DayPeriod::Morning);
    assert_eq!(DayPeriod::from_hour(12), DayPeriod::Noon);
    assert_eq!(DayPeriod::from_hour(14), DayPeriod::Afternoon);
    assert_eq!(DayPeriod::from_hour(18), DayPeriod::Evening);
}
