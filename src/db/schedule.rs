use crate::core::conflict::{self, Candidate};
use crate::core::week::filter_by_week;
use crate::errors::{AppError, AppResult};
use crate::models::schedule::{
    ConflictResult, NewScheduleEntry, ScheduleEntry, ScheduleUpdate, ScheduleWithCourse,
};
use crate::models::weeks::WeekSet;
use chrono::NaiveTime;
use rusqlite::types::Value;
use rusqlite::{Connection, OptionalExtension, Row, params, params_from_iter};

const SCHEDULE_JOIN_QUERY: &str = "
    SELECT s.*, c.name AS course_name, c.teacher, c.location, c.color
    FROM schedule s
    JOIN courses c ON s.course_id = c.id
";

fn parse_stored_time(raw: String, idx: usize) -> rusqlite::Result<NaiveTime> {
    NaiveTime::parse_from_str(&raw, "%H:%M").map_err(|_| {
        rusqlite::Error::FromSqlConversionFailure(
            idx,
            rusqlite::types::Type::Text,
            Box::new(AppError::InvalidTime(raw.clone())),
        )
    })
}

pub fn map_entry(row: &Row) -> rusqlite::Result<ScheduleEntry> {
    let weeks_raw: Option<String> = row.get("weeks")?;

    Ok(ScheduleEntry {
        id: row.get("id")?,
        course_id: row.get("course_id")?,
        day_of_week: row.get("day_of_week")?,
        start_time: parse_stored_time(row.get("start_time")?, 3)?,
        end_time: parse_stored_time(row.get("end_time")?, 4)?,
        weeks: WeekSet::from_json(weeks_raw.as_deref().unwrap_or("[]")),
        note: row.get::<_, Option<String>>("note")?.unwrap_or_default(),
    })
}

pub fn map_with_course(row: &Row) -> rusqlite::Result<ScheduleWithCourse> {
    let entry = map_entry(row)?;

    Ok(ScheduleWithCourse {
        id: entry.id,
        course_id: entry.course_id,
        day_of_week: entry.day_of_week,
        start_time: entry.start_time,
        end_time: entry.end_time,
        weeks: entry.weeks,
        note: entry.note,
        course_name: row.get("course_name")?,
        teacher: row.get::<_, Option<String>>("teacher")?.unwrap_or_default(),
        location: row.get::<_, Option<String>>("location")?.unwrap_or_default(),
        color: row.get::<_, Option<String>>("color")?.unwrap_or_default(),
    })
}

fn query_joined(conn: &Connection, sql: &str, args: Vec<Value>) -> AppResult<Vec<ScheduleWithCourse>> {
    let mut stmt = conn.prepare(sql)?;
    let rows = stmt.query_map(params_from_iter(args), map_with_course)?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

/// The whole timetable ordered by day and start time, optionally restricted
/// to the slots recurring on `week`.
pub fn get_schedule(conn: &Connection, week: Option<u32>) -> AppResult<Vec<ScheduleWithCourse>> {
    let sql = format!("{} ORDER BY s.day_of_week, s.start_time", SCHEDULE_JOIN_QUERY);
    let rows = query_joined(conn, &sql, Vec::new())?;
    Ok(filter_by_week(rows, week))
}

pub fn get_schedule_by_day(
    conn: &Connection,
    day_of_week: u8,
    week: Option<u32>,
) -> AppResult<Vec<ScheduleWithCourse>> {
    let sql = format!(
        "{} WHERE s.day_of_week = ? ORDER BY s.start_time",
        SCHEDULE_JOIN_QUERY
    );
    let rows = query_joined(conn, &sql, vec![Value::Integer(day_of_week as i64)])?;
    Ok(filter_by_week(rows, week))
}

pub fn get_schedule_for_week(
    conn: &Connection,
    week: Option<u32>,
) -> AppResult<Vec<ScheduleWithCourse>> {
    get_schedule(conn, week)
}

pub fn get_entry(conn: &Connection, id: i64) -> AppResult<ScheduleWithCourse> {
    let sql = format!("{} WHERE s.id = ?1", SCHEDULE_JOIN_QUERY);
    conn.query_row(&sql, [id], map_with_course)
        .optional()?
        .ok_or_else(|| AppError::NotFound(format!("Schedule entry #{}", id)))
}

pub fn add_schedule_entry(conn: &Connection, data: &NewScheduleEntry) -> AppResult<ScheduleEntry> {
    conn.execute(
        "INSERT INTO schedule (course_id, day_of_week, start_time, end_time, weeks, note)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
        params![
            data.course_id,
            data.day_of_week,
            data.start_time.format("%H:%M").to_string(),
            data.end_time.format("%H:%M").to_string(),
            data.weeks.to_json(),
            data.note,
        ],
    )?;

    let id = conn.last_insert_rowid();
    let entry = conn.query_row("SELECT * FROM schedule WHERE id = ?1", [id], map_entry)?;
    Ok(entry)
}

/// Overwrite a slot with `update` applied on top of its stored values.
pub fn update_schedule_entry(
    conn: &Connection,
    id: i64,
    update: &ScheduleUpdate,
) -> AppResult<ScheduleEntry> {
    let stored = conn
        .query_row("SELECT * FROM schedule WHERE id = ?1", [id], map_entry)
        .optional()?
        .ok_or_else(|| AppError::NotFound(format!("Schedule entry #{}", id)))?;

    let merged = update.apply_to(&stored);

    conn.execute(
        "UPDATE schedule
         SET course_id = ?1, day_of_week = ?2, start_time = ?3,
             end_time = ?4, weeks = ?5, note = ?6
         WHERE id = ?7",
        params![
            merged.course_id,
            merged.day_of_week,
            merged.start_time.format("%H:%M").to_string(),
            merged.end_time.format("%H:%M").to_string(),
            merged.weeks.to_json(),
            merged.note,
            id,
        ],
    )?;

    Ok(merged)
}

pub fn delete_schedule_entry(conn: &Connection, id: i64) -> AppResult<()> {
    let changed = conn.execute("DELETE FROM schedule WHERE id = ?1", [id])?;
    if changed == 0 {
        return Err(AppError::NotFound(format!("Schedule entry #{}", id)));
    }
    Ok(())
}

/// Advisory overlap check against stored slots.
///
/// SQL selects same-day slots whose half-open time ranges overlap (minus the
/// slot being edited); the week filter runs in memory on the JSON week sets.
pub fn check_conflicts(conn: &Connection, candidate: &Candidate) -> AppResult<ConflictResult> {
    let mut sql = format!(
        "{} WHERE s.day_of_week = ? AND s.start_time < ? AND s.end_time > ?",
        SCHEDULE_JOIN_QUERY
    );
    let mut args = vec![
        Value::Integer(candidate.day_of_week as i64),
        Value::Text(candidate.end_time.format("%H:%M").to_string()),
        Value::Text(candidate.start_time.format("%H:%M").to_string()),
    ];

    if let Some(exclude) = candidate.exclude_id {
        sql.push_str(" AND s.id != ?");
        args.push(Value::Integer(exclude));
    }
    sql.push_str(" ORDER BY s.start_time");

    let overlapping = query_joined(conn, &sql, args)?;
    let conflicts: Vec<ScheduleWithCourse> = overlapping
        .into_iter()
        .filter(|existing| conflict::shares_week(&existing.weeks, &candidate.weeks))
        .collect();

    Ok(ConflictResult {
        has_conflict: !conflicts.is_empty(),
        conflicts,
    })
}
