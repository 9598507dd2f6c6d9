//! Overlap detection between a candidate slot and existing slots.
//!
//! Time ranges are half-open: a slot ending at 10:00 does not collide with
//! one starting at 10:00.

use crate::models::schedule::{ConflictResult, ScheduleWithCourse};
use crate::models::weeks::WeekSet;
use chrono::NaiveTime;

/// A slot about to be created or edited.
#[derive(Debug, Clone)]
pub struct Candidate {
    pub day_of_week: u8,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    /// Empty = the candidate does not narrow by week.
    pub weeks: WeekSet,
    /// The slot being edited, which never conflicts with itself.
    pub exclude_id: Option<i64>,
}

pub fn overlaps_in_time(existing: &ScheduleWithCourse, candidate: &Candidate) -> bool {
    existing.day_of_week == candidate.day_of_week
        && existing.start_time < candidate.end_time
        && existing.end_time > candidate.start_time
}

/// Week test applied after the time test. A candidate without explicit weeks
/// keeps every time overlap; otherwise an existing slot conflicts when it runs
/// every week or shares at least one week with the candidate.
pub fn shares_week(existing: &WeekSet, candidate: &WeekSet) -> bool {
    candidate.is_every_week() || existing.is_every_week() || existing.intersects(candidate)
}

/// Pure form of the storage-backed check: same rules over an in-memory list.
pub fn find_conflicts(existing: &[ScheduleWithCourse], candidate: &Candidate) -> ConflictResult {
    let conflicts: Vec<ScheduleWithCourse> = existing
        .iter()
        .filter(|e| overlaps_in_time(e, candidate))
        .filter(|e| Some(e.id) != candidate.exclude_id)
        .filter(|e| shares_week(&e.weeks, &candidate.weeks))
        .cloned()
        .collect();

    ConflictResult {
        has_conflict: !conflicts.is_empty(),
        conflicts,
    }
}
