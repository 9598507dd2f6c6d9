use classtop::core::conflict::{Candidate, find_conflicts};
use classtop::core::week::filter_by_week;
use classtop::models::weeks::WeekSet;

mod common;
use common::{slot, slot_in_weeks, t};

fn candidate(day: u8, start: &str, end: &str, weeks: &str, exclude: Option<i64>) -> Candidate {
    Candidate {
        day_of_week: day,
        start_time: t(start),
        end_time: t(end),
        weeks: WeekSet::parse(weeks),
        exclude_id: exclude,
    }
}

#[test]
fn half_open_ranges_do_not_touch() {
    let existing = vec![slot(1, 1, "08:00", "10:00", "A", "")];

    assert!(!find_conflicts(&existing, &candidate(1, "10:00", "11:00", "", None)).has_conflict);
    assert!(!find_conflicts(&existing, &candidate(1, "07:00", "08:00", "", None)).has_conflict);
    assert!(find_conflicts(&existing, &candidate(1, "09:59", "11:00", "", None)).has_conflict);
    assert!(!find_conflicts(&existing, &candidate(2, "08:00", "10:00", "", None)).has_conflict);
}

#[test]
fn week_sets_must_intersect() {
    let existing = vec![
        slot_in_weeks(1, 1, "08:00", "10:00", "odd", "1,3,5"),
        slot_in_weeks(2, 1, "08:00", "10:00", "all", ""),
    ];

    // explicit even weeks: only the every-week slot collides
    let result = find_conflicts(&existing, &candidate(1, "09:00", "11:00", "2,4", None));
    assert_eq!(result.conflicts.iter().map(|c| c.id).collect::<Vec<_>>(), vec![2]);

    // no explicit weeks: every time overlap counts
    let result = find_conflicts(&existing, &candidate(1, "09:00", "11:00", "", None));
    assert_eq!(result.conflicts.len(), 2);

    let result = find_conflicts(&existing, &candidate(1, "09:00", "11:00", "5-6", None));
    assert_eq!(result.conflicts.len(), 2);
}

#[test]
fn excluded_slot_is_ignored() {
    let existing = vec![slot(7, 4, "08:00", "10:00", "A", "")];
    let result = find_conflicts(&existing, &candidate(4, "08:00", "10:00", "", Some(7)));
    assert!(!result.has_conflict);
    assert!(result.conflicts.is_empty());
}

#[test]
fn week_filter_keeps_every_week_slots() {
    let entries = vec![
        slot(1, 1, "08:00", "09:00", "all", ""),
        slot_in_weeks(2, 1, "10:00", "11:00", "early", "1-8"),
        slot_in_weeks(3, 1, "12:00", "13:00", "late", "9-16"),
    ];

    let ids = |w: Option<u32>| {
        filter_by_week(entries.clone(), w)
            .iter()
            .map(|e| e.id)
            .collect::<Vec<_>>()
    };

    assert_eq!(ids(Some(3)), vec![1, 2]);
    assert_eq!(ids(Some(12)), vec![1, 3]);
    assert_eq!(ids(None), vec![1, 2, 3]);
}
