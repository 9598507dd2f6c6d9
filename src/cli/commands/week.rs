use crate::cli::parser::{Commands, WeekAction};
use crate::config::Config;
use crate::db::log::ttlog_soft;
use crate::db::pool::DbPool;
use crate::db::settings::{get_current_week, set_semester_start};
use crate::errors::{AppError, AppResult};
use crate::ui::messages::{info, success};
use crate::utils::date::{parse_date, today};

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    let Commands::Week { action } = cmd else {
        return Ok(());
    };

    let pool = DbPool::open_initialized(&cfg.database)?;
    let conn = &pool.conn;

    match action {
        WeekAction::Current => {
            let current = get_current_week(conn, today())?;
            if current.is_calculated {
                println!(
                    "📅 Week {} (semester started {})",
                    current.week, current.semester_start_date
                );
            } else {
                println!("📅 Week {}", current.week);
                info("Semester start date not set: `classtop week set-start YYYY-MM-DD`");
            }
        }

        WeekAction::SetStart { date } => {
            let start = parse_date(date).ok_or_else(|| AppError::InvalidDate(date.clone()))?;
            set_semester_start(conn, Some(start))?;
            ttlog_soft(conn, "week_set_start", date, "Semester start date set");

            let current = get_current_week(conn, today())?;
            success(format!(
                "Semester start set to {} (current week: {}).",
                start.format("%Y-%m-%d"),
                current.week
            ));
        }

        WeekAction::Clear => {
            set_semester_start(conn, None)?;
            ttlog_soft(conn, "week_set_start", "", "Semester start date cleared");
            success("Semester start date cleared.");
        }
    }

    Ok(())
}
