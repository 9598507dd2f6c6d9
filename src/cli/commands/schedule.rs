use crate::cli::parser::{Commands, ScheduleAction};
use crate::config::Config;
use crate::core::conflict::Candidate;
use crate::core::schedule::ScheduleLogic;
use crate::core::week::weekday_name;
use crate::db::pool::DbPool;
use crate::db::schedule::{check_conflicts, get_schedule, get_schedule_by_day};
use crate::db::settings::get_current_week;
use crate::errors::{AppError, AppResult};
use crate::models::schedule::{ConflictResult, NewScheduleEntry, ScheduleUpdate, ScheduleWithCourse};
use crate::models::weeks::WeekSet;
use crate::ui::messages::{info, success, warning};
use crate::utils::date::today;
use crate::utils::table::{Column, Table};
use crate::utils::time::{parse_optional_time, parse_time};
use chrono::NaiveTime;

fn parsed_weeks(raw: Option<&str>) -> AppResult<Option<WeekSet>> {
    raw.map(ScheduleLogic::parse_weeks).transpose()
}

fn required_time(raw: &str) -> AppResult<NaiveTime> {
    parse_time(raw).ok_or_else(|| AppError::InvalidTime(raw.to_string()))
}

fn weeks_label(weeks: &WeekSet) -> String {
    if weeks.is_every_week() {
        "all".to_string()
    } else {
        weeks.to_string()
    }
}

fn print_entries(entries: &[ScheduleWithCourse]) {
    let mut table = Table::new(vec![
        Column::new("ID"),
        Column::new("Day"),
        Column::new("Time"),
        Column::new("Course"),
        Column::new("Teacher"),
        Column::new("Location"),
        Column::new("Weeks"),
        Column::new("Note"),
    ]);

    for e in entries {
        table.add_row(vec![
            e.id.to_string(),
            weekday_name(e.day_of_week).to_string(),
            format!("{}-{}", e.start_str(), e.end_str()),
            e.course_name.clone(),
            e.teacher.clone(),
            e.location.clone(),
            weeks_label(&e.weeks),
            e.note.clone(),
        ]);
    }

    print!("{}", table.render());
}

fn report_conflicts(result: &ConflictResult) {
    if !result.has_conflict {
        return;
    }

    warning(format!(
        "Overlaps with {} existing slot(s):",
        result.conflicts.len()
    ));
    for c in &result.conflicts {
        println!(
            "    #{} {} {}-{} {} (weeks: {})",
            c.id,
            weekday_name(c.day_of_week),
            c.start_str(),
            c.end_str(),
            c.title(),
            weeks_label(&c.weeks)
        );
    }
}

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    let Commands::Schedule { action } = cmd else {
        return Ok(());
    };

    let pool = DbPool::open_initialized(&cfg.database)?;
    let conn = &pool.conn;

    match action {
        ScheduleAction::List {
            week,
            current,
            day,
            json,
        } => {
            let week = if *current {
                Some(get_current_week(conn, today())?.week)
            } else {
                *week
            };

            let entries = match day {
                Some(d) => get_schedule_by_day(conn, *d, week)?,
                None => get_schedule(conn, week)?,
            };

            if *json {
                println!("{}", serde_json::to_string_pretty(&entries)?);
            } else if entries.is_empty() {
                info("No schedule entries found.");
            } else {
                if let Some(w) = week {
                    info(format!("Week {}", w));
                }
                print_entries(&entries);
            }
        }

        ScheduleAction::Add {
            course,
            day,
            start,
            end,
            weeks,
            note,
        } => {
            let data = NewScheduleEntry {
                course_id: *course,
                day_of_week: *day,
                start_time: required_time(start)?,
                end_time: required_time(end)?,
                weeks: parsed_weeks(weeks.as_deref())?.unwrap_or_default(),
                note: note.clone().unwrap_or_default(),
            };

            let saved = ScheduleLogic::add(conn, &data)?;
            report_conflicts(&saved.conflicts);
            success(format!(
                "Schedule entry #{} added: {} {}-{}",
                saved.entry.id,
                weekday_name(saved.entry.day_of_week),
                saved.entry.start_time.format("%H:%M"),
                saved.entry.end_time.format("%H:%M")
            ));
        }

        ScheduleAction::Edit {
            id,
            course,
            day,
            start,
            end,
            weeks,
            note,
        } => {
            let update = ScheduleUpdate {
                course_id: *course,
                day_of_week: *day,
                start_time: parse_optional_time(start.as_ref())?,
                end_time: parse_optional_time(end.as_ref())?,
                weeks: parsed_weeks(weeks.as_deref())?,
                note: note.clone(),
            };

            let saved = ScheduleLogic::edit(conn, *id, &update)?;
            report_conflicts(&saved.conflicts);
            success(format!("Schedule entry #{} updated.", id));
        }

        ScheduleAction::Del { id } => {
            let entry = ScheduleLogic::delete(conn, *id)?;
            success(format!(
                "Schedule entry #{} ({} {} {}-{}) deleted.",
                id,
                entry.course_name,
                weekday_name(entry.day_of_week),
                entry.start_str(),
                entry.end_str()
            ));
        }

        ScheduleAction::Check {
            day,
            start,
            end,
            weeks,
            exclude,
        } => {
            let candidate = Candidate {
                day_of_week: *day,
                start_time: required_time(start)?,
                end_time: required_time(end)?,
                weeks: parsed_weeks(weeks.as_deref())?.unwrap_or_default(),
                exclude_id: *exclude,
            };
            ScheduleLogic::validate_range(candidate.start_time, candidate.end_time)?;

            let result = check_conflicts(conn, &candidate)?;
            if result.has_conflict {
                report_conflicts(&result);
            } else {
                success("No conflicts.");
            }
        }
    }

    Ok(())
}
