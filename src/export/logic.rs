// src/export/logic.rs

use crate::db::log::ttlog_soft;
use crate::db::pool::DbPool;
use crate::db::schedule::get_schedule;
use crate::errors::{AppError, AppResult};
use crate::export::ExportFormat;
use crate::export::fs_utils::ensure_writable;
use crate::export::json_csv::{export_csv, export_json};
use crate::export::model::ScheduleExport;
use crate::ui::messages::warning;
use std::path::Path;

pub struct ExportLogic;

impl ExportLogic {
    /// Export the timetable.
    ///
    /// - `file` must be an absolute path
    /// - `week` restricts the rows to the slots recurring on that week
    /// - `force` overwrites an existing file without asking
    pub fn export(
        pool: &mut DbPool,
        format: ExportFormat,
        file: &str,
        week: Option<u32>,
        force: bool,
    ) -> AppResult<()> {
        let path = Path::new(file);

        if !path.is_absolute() {
            return Err(AppError::Export(format!(
                "output file path must be absolute: {file}"
            )));
        }

        let rows: Vec<ScheduleExport> = get_schedule(&pool.conn, week)?
            .iter()
            .map(ScheduleExport::from)
            .collect();

        if rows.is_empty() {
            warning("No schedule entries to export.");
            return Ok(());
        }

        ensure_writable(path, force)?;

        match format {
            ExportFormat::Csv => export_csv(&rows, path)?,
            ExportFormat::Json => export_json(&rows, path)?,
        }

        ttlog_soft(
            &pool.conn,
            "export",
            file,
            &format!("{} rows exported as {}", rows.len(), format.as_str()),
        );

        Ok(())
    }
}
