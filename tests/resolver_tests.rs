use chrono::NaiveTime;
use classtop::core::resolver::{
    NO_CLASSES_TODAY, break_progress, find_last_class, find_next_class_across_week, resolve,
};
use classtop::utils::time::seconds_of_day;

mod common;
use common::slot;

fn at(h: u32, m: u32, s: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(h, m, s).unwrap()
}

#[test]
fn in_class_progress_is_elapsed_fraction() {
    let today = vec![slot(1, 1, "08:00", "09:40", "高等数学", "A101")];

    let state = resolve(at(8, 50, 0), &today, &today, 1);
    assert_eq!(state.display_text, "高等数学 @ A101 (08:00-09:40)");
    assert!((state.progress - 0.5).abs() < 1e-9);
    assert!(!state.is_break_time);
}

#[test]
fn start_minute_is_inclusive_end_minute_exclusive() {
    let today = vec![
        slot(1, 1, "08:00", "09:40", "高等数学", ""),
        slot(2, 1, "10:00", "11:40", "大学英语", ""),
    ];

    let state = resolve(at(8, 0, 0), &today, &today, 1);
    assert_eq!(state.display_text, "高等数学 (08:00-09:40)");
    assert_eq!(state.progress, 0.0);

    // 09:40:30 is no longer inside the first class
    let state = resolve(at(9, 40, 30), &today, &today, 1);
    assert!(state.is_break_time);
    assert!(state.display_text.starts_with("下一节: 大学英语"));
}

#[test]
fn break_progress_counts_down() {
    let today = vec![
        slot(1, 1, "08:00", "09:40", "高等数学", ""),
        slot(2, 1, "10:00", "11:40", "大学英语", "B203"),
    ];

    // 5 of 20 break minutes gone
    let state = resolve(at(9, 45, 0), &today, &today, 1);
    assert!(state.is_break_time);
    assert!((state.progress - 0.75).abs() < 1e-9);
    assert_eq!(state.display_text, "下一节: 大学英语 @ B203 (15分0秒后)");
}

#[test]
fn before_first_class_has_no_break_progress() {
    let today = vec![slot(1, 1, "08:00", "09:40", "高等数学", "")];

    let state = resolve(at(7, 59, 30), &today, &today, 1);
    assert!(state.is_break_time);
    assert_eq!(state.progress, 0.0);
    assert_eq!(state.display_text, "下一节: 高等数学 (30秒后)");
}

#[test]
fn long_wait_uses_hours() {
    let today = vec![slot(1, 1, "14:00", "15:40", "高等数学", "")];

    let state = resolve(at(11, 35, 10), &today, &today, 1);
    assert_eq!(state.display_text, "下一节: 高等数学 (2小时24分钟后)");
}

#[test]
fn back_to_back_classes_give_zero_break() {
    let a = slot(1, 1, "08:00", "09:00", "A", "");
    let b = slot(2, 1, "09:00", "10:00", "B", "");
    assert_eq!(break_progress(&a, &b, seconds_of_day(at(9, 0, 0))), 0.0);
}

#[test]
fn last_class_stops_at_first_unfinished() {
    let today = vec![
        slot(1, 1, "08:00", "09:00", "A", ""),
        slot(2, 1, "09:10", "10:00", "B", ""),
        slot(3, 1, "13:00", "14:00", "C", ""),
    ];

    let last = find_last_class(&today, at(12, 0, 0)).unwrap();
    assert_eq!(last.id, 2);
    assert!(find_last_class(&today, at(7, 0, 0)).is_none());
}

#[test]
fn lookahead_wraps_from_sunday_to_monday() {
    let week = vec![
        slot(1, 1, "08:00", "09:40", "周一课", ""),
        slot(2, 5, "10:00", "11:40", "周五课", ""),
    ];

    assert_eq!(find_next_class_across_week(&week, 7).unwrap().id, 1);
    assert_eq!(find_next_class_across_week(&week, 2).unwrap().id, 2);

    let state = resolve(at(20, 0, 0), &[], &week, 7);
    assert_eq!(state.display_text, "今日课程结束 - 下一节: 周一 周一课");
    assert_eq!(state.progress, 0.0);
    assert!(!state.is_break_time);
}

#[test]
fn only_todays_weekday_left_means_nothing_scheduled() {
    // the sole slot is on today's weekday and already over: lookahead covers
    // the other six days only
    let week = vec![slot(1, 3, "08:00", "09:40", "高等数学", "")];
    let state = resolve(at(12, 0, 0), &[], &week, 3);
    assert_eq!(state.display_text, NO_CLASSES_TODAY);

    let state = resolve(at(12, 0, 0), &[], &[], 3);
    assert_eq!(state.display_text, "今日无课程安排");
}

#[test]
fn progress_is_always_clamped() {
    let today = vec![slot(1, 1, "08:00", "09:40", "高等数学", "")];
    for minute in 0..100 {
        let now = at(8 + minute / 60, minute % 60, 59);
        let state = resolve(now, &today, &today, 1);
        assert!((0.0..=1.0).contains(&state.progress));
    }
}
