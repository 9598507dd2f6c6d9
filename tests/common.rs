#![allow(dead_code)]
use assert_cmd::{Command, cargo_bin_cmd};
use chrono::NaiveTime;
use classtop::models::schedule::ScheduleWithCourse;
use classtop::models::weeks::WeekSet;
use tempfile::TempDir;

pub fn ctp() -> Command {
    cargo_bin_cmd!("classtop")
}

/// Fresh database path inside its own temp directory. Keep the `TempDir`
/// alive for the duration of the test.
pub fn setup_test_db(name: &str) -> (TempDir, String) {
    let dir = tempfile::tempdir().expect("temp dir");
    let path = dir.path().join(format!("{}_classtop.sqlite", name));
    (dir, path.to_string_lossy().to_string())
}

pub fn init_db(db_path: &str) {
    ctp()
        .args(["--db", db_path, "--test", "init"])
        .assert()
        .success();
}

/// Initialized database with one course (#1 高等数学 @ A101) on Monday
/// 08:00-09:40, every week (slot #1).
pub fn init_db_with_course(db_path: &str) {
    init_db(db_path);

    ctp()
        .args([
            "--db",
            db_path,
            "course",
            "add",
            "高等数学",
            "--teacher",
            "王老师",
            "--location",
            "A101",
        ])
        .assert()
        .success();

    ctp()
        .args([
            "--db", db_path, "schedule", "add", "--course", "1", "--day", "1", "--start", "08:00",
            "--end", "09:40",
        ])
        .assert()
        .success();
}

pub fn t(s: &str) -> NaiveTime {
    NaiveTime::parse_from_str(s, "%H:%M").expect("HH:MM")
}

/// In-memory slot for library-level tests.
pub fn slot(id: i64, day: u8, start: &str, end: &str, name: &str, location: &str) -> ScheduleWithCourse {
    ScheduleWithCourse {
        id,
        course_id: id,
        day_of_week: day,
        start_time: t(start),
        end_time: t(end),
        weeks: WeekSet::every_week(),
        note: String::new(),
        course_name: name.to_string(),
        teacher: String::new(),
        location: location.to_string(),
        color: "#4ECDC4".to_string(),
    }
}

pub fn slot_in_weeks(
    id: i64,
    day: u8,
    start: &str,
    end: &str,
    name: &str,
    weeks: &str,
) -> ScheduleWithCourse {
    ScheduleWithCourse {
        weeks: WeekSet::parse(weeks),
        ..slot(id, day, start, end, name, "")
    }
}
