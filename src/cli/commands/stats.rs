use crate::cli::parser::Commands;
use crate::config::Config;
use crate::db::pool::DbPool;
use crate::db::statistics::calculate_all_statistics;
use crate::errors::AppResult;
use crate::utils::colors::{CYAN, GREEN, RESET, YELLOW};
use crate::utils::formatting::pad_right;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    let Commands::Stats { json } = cmd else {
        return Ok(());
    };

    let pool = DbPool::open_initialized(&cfg.database)?;
    let stats = calculate_all_statistics(&pool.conn)?;

    if *json {
        println!("{}", serde_json::to_string_pretty(&stats)?);
        return Ok(());
    }

    println!("📊 Statistics\n");
    println!("{}• Courses:{}         {}{}{}", CYAN, RESET, GREEN, stats.total_courses, RESET);
    println!("{}• Total hours:{}     {:.1}", CYAN, RESET, stats.total_hours);
    println!("{}• Weekly hours:{}    {:.1}", CYAN, RESET, stats.weekly_hours);
    println!("{}• Attendance:{}      {:.1}%", CYAN, RESET, stats.attendance_rate);
    println!("{}• Busiest day:{}     {}{}{}", CYAN, RESET, YELLOW, stats.busiest_day, RESET);

    if !stats.time_distribution.is_empty() {
        println!("{}• Time of day:{}", CYAN, RESET);
        for (period, count) in &stats.time_distribution {
            println!("    {} {}", pad_right(period.label(), 6), count);
        }
    }

    println!();
    Ok(())
}
