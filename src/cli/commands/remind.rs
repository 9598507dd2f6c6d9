use crate::cli::commands::topbar::{clock_for, secs};
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::db::settings::NOTIFICATION_SOUND;
use crate::errors::{AppError, AppResult};
use crate::services::notify::TerminalNotifier;
use crate::services::reminder::ReminderService;
use crate::services::runtime;
use crate::services::shutdown::detect_shutdown;
use crate::services::source::{ScheduleSource, SqliteSource};
use crate::ui::messages::{info, warning};
use crate::utils::logging::{REMIND_PREFIX, enable_logging};
use std::sync::Arc;
use tokio_util::sync::CancellationToken;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    let Commands::Remind { once, at } = cmd else {
        return Ok(());
    };

    let source = Arc::new(SqliteSource::open(&cfg.database)?);
    let bell = source.setting(NOTIFICATION_SOUND)? != "false";

    if *once {
        let mut service = ReminderService::new(
            source,
            clock_for(at, false)?,
            Box::new(TerminalNotifier::new(bell)),
            secs(cfg.reminder_interval_secs),
            CancellationToken::new(),
        );
        if service.check_once()? == 0 {
            info("No class starts within the reminder window.");
        }
        return Ok(());
    }

    if let Err(e) = enable_logging(REMIND_PREFIX, &Config::config_dir(), &cfg.log_level) {
        warning(format!("File logging disabled: {}", e));
    }

    info("Reminder service running, press Ctrl-C to stop.");

    let rt = runtime()?;
    rt.block_on(async {
        let shutdown = CancellationToken::new();
        let service = ReminderService::new(
            source,
            clock_for(at, true)?,
            Box::new(TerminalNotifier::new(bell)),
            secs(cfg.reminder_interval_secs),
            shutdown.clone(),
        );

        tokio::join!(detect_shutdown(shutdown), service.run());
        Ok::<(), AppError>(())
    })
}
