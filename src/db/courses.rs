use crate::errors::{AppError, AppResult};
use crate::models::course::{Course, CourseUpdate, DEFAULT_COURSE_COLOR, NewCourse};
use rusqlite::types::Value;
use rusqlite::{Connection, OptionalExtension, Row, params, params_from_iter};

fn map_course(row: &Row) -> rusqlite::Result<Course> {
    Ok(Course {
        id: row.get("id")?,
        name: row.get("name")?,
        teacher: row.get::<_, Option<String>>("teacher")?.unwrap_or_default(),
        location: row.get::<_, Option<String>>("location")?.unwrap_or_default(),
        color: row
            .get::<_, Option<String>>("color")?
            .unwrap_or_else(|| DEFAULT_COURSE_COLOR.to_string()),
        created_at: row.get::<_, Option<String>>("created_at")?.unwrap_or_default(),
    })
}

/// All courses, newest first.
pub fn list_courses(conn: &Connection) -> AppResult<Vec<Course>> {
    let mut stmt = conn.prepare("SELECT * FROM courses ORDER BY created_at DESC, id DESC")?;
    let rows = stmt.query_map([], map_course)?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

pub fn get_course(conn: &Connection, id: i64) -> AppResult<Course> {
    conn.query_row("SELECT * FROM courses WHERE id = ?1", [id], map_course)
        .optional()?
        .ok_or_else(|| AppError::NotFound(format!("Course #{}", id)))
}

pub fn add_course(conn: &Connection, data: &NewCourse) -> AppResult<Course> {
    conn.execute(
        "INSERT INTO courses (name, teacher, location, color) VALUES (?1, ?2, ?3, ?4)",
        params![
            data.name,
            data.teacher.as_deref().unwrap_or(""),
            data.location.as_deref().unwrap_or(""),
            data.color.as_deref().unwrap_or(DEFAULT_COURSE_COLOR),
        ],
    )?;

    get_course(conn, conn.last_insert_rowid())
}

/// Update only the provided fields. An empty update is a no-op.
pub fn update_course(conn: &Connection, id: i64, data: &CourseUpdate) -> AppResult<()> {
    if data.is_empty() {
        return Ok(());
    }

    let mut fields: Vec<&str> = Vec::new();
    let mut values: Vec<Value> = Vec::new();

    if let Some(name) = &data.name {
        fields.push("name = ?");
        values.push(Value::Text(name.clone()));
    }
    if let Some(teacher) = &data.teacher {
        fields.push("teacher = ?");
        values.push(Value::Text(teacher.clone()));
    }
    if let Some(location) = &data.location {
        fields.push("location = ?");
        values.push(Value::Text(location.clone()));
    }
    if let Some(color) = &data.color {
        fields.push("color = ?");
        values.push(Value::Text(color.clone()));
    }

    values.push(Value::Integer(id));
    let sql = format!("UPDATE courses SET {} WHERE id = ?", fields.join(", "));

    let changed = conn.execute(&sql, params_from_iter(values))?;
    if changed == 0 {
        return Err(AppError::NotFound(format!("Course #{}", id)));
    }
    Ok(())
}

/// Delete a course; its schedule slots and attendance rows cascade.
pub fn delete_course(conn: &Connection, id: i64) -> AppResult<()> {
    let changed = conn.execute("DELETE FROM courses WHERE id = ?1", [id])?;
    if changed == 0 {
        return Err(AppError::NotFound(format!("Course #{}", id)));
    }
    Ok(())
}
