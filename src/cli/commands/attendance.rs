use crate::cli::parser::{AttendanceAction, Commands};
use crate::config::Config;
use crate::core::attendance::AttendanceLogic;
use crate::db::pool::DbPool;
use crate::db::statistics::get_attendance_history;
use crate::errors::{AppError, AppResult};
use crate::ui::messages::{info, success};
use crate::utils::colors::{GREEN, RED, RESET};
use crate::utils::date::{parse_date, today};
use crate::utils::table::{Column, Table};

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    let Commands::Attendance { action } = cmd else {
        return Ok(());
    };

    let pool = DbPool::open_initialized(&cfg.database)?;
    let conn = &pool.conn;

    match action {
        AttendanceAction::Mark {
            entry_id,
            date,
            absent,
            notes,
        } => {
            let date = match date {
                Some(raw) => parse_date(raw).ok_or_else(|| AppError::InvalidDate(raw.clone()))?,
                None => today(),
            };

            let entry = AttendanceLogic::mark(
                conn,
                *entry_id,
                date,
                !*absent,
                notes.as_deref().unwrap_or(""),
            )?;

            success(format!(
                "{} on {}: {}",
                entry.course_name,
                date.format("%Y-%m-%d"),
                if *absent { "absent" } else { "attended" }
            ));
        }

        AttendanceAction::History { course, limit } => {
            let records = get_attendance_history(conn, *course, *limit)?;
            if records.is_empty() {
                info("No attendance records.");
                return Ok(());
            }

            let mut table = Table::new(vec![
                Column::new("Date"),
                Column::new("Time"),
                Column::new("Course"),
                Column::new("Status"),
                Column::new("Notes"),
            ]);
            for r in records {
                table.add_row(vec![
                    r.date,
                    format!("{}-{}", r.start_time, r.end_time),
                    r.course_name,
                    if r.attended { "attended" } else { "absent" }.to_string(),
                    r.notes,
                ]);
            }

            // colour after layout so ANSI codes do not skew the widths
            let rendered = table
                .render()
                .replace(" attended ", &format!(" {GREEN}attended{RESET} "))
                .replace(" absent ", &format!(" {RED}absent{RESET} "));
            print!("{}", rendered);
        }
    }

    Ok(())
}
