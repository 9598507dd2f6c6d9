use crate::cli::parser::{Commands, CourseAction};
use crate::config::Config;
use crate::db::courses::{add_course, delete_course, get_course, list_courses, update_course};
use crate::db::log::ttlog_soft;
use crate::db::pool::DbPool;
use crate::errors::AppResult;
use crate::models::course::{CourseUpdate, NewCourse};
use crate::ui::messages::{info, success, warning};
use crate::utils::table::{Column, Table};

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    let Commands::Course { action } = cmd else {
        return Ok(());
    };

    let pool = DbPool::open_initialized(&cfg.database)?;
    let conn = &pool.conn;

    match action {
        CourseAction::List => {
            let courses = list_courses(conn)?;
            if courses.is_empty() {
                info("No courses yet. Add one with `classtop course add <NAME>`.");
                return Ok(());
            }

            let mut table = Table::new(vec![
                Column::new("ID"),
                Column::new("Name"),
                Column::new("Teacher"),
                Column::new("Location"),
                Column::new("Color"),
                Column::new("Created"),
            ]);
            for c in courses {
                table.add_row(vec![
                    c.id.to_string(),
                    c.name,
                    c.teacher,
                    c.location,
                    c.color,
                    c.created_at,
                ]);
            }
            print!("{}", table.render());
        }

        CourseAction::Add {
            name,
            teacher,
            location,
            color,
        } => {
            let course = add_course(
                conn,
                &NewCourse {
                    name: name.clone(),
                    teacher: teacher.clone(),
                    location: location.clone(),
                    color: color.clone(),
                },
            )?;
            ttlog_soft(conn, "course_add", &format!("#{}", course.id), &course.name);
            success(format!("Course #{} '{}' added.", course.id, course.name));
        }

        CourseAction::Edit {
            id,
            name,
            teacher,
            location,
            color,
        } => {
            let update = CourseUpdate {
                name: name.clone(),
                teacher: teacher.clone(),
                location: location.clone(),
                color: color.clone(),
            };
            if update.is_empty() {
                warning("Nothing to change.");
                return Ok(());
            }

            update_course(conn, *id, &update)?;
            let course = get_course(conn, *id)?;
            ttlog_soft(conn, "course_edit", &format!("#{}", id), &course.name);
            success(format!("Course #{} updated.", id));
        }

        CourseAction::Del { id } => {
            let course = get_course(conn, *id)?;
            delete_course(conn, *id)?;
            ttlog_soft(conn, "course_del", &format!("#{}", id), &course.name);
            success(format!(
                "Course #{} '{}' deleted (with its schedule slots).",
                id, course.name
            ));
        }
    }

    Ok(())
}
