use crate::cli::parser::Commands;
use crate::config::Config;
use crate::db::pool::DbPool;
use crate::db::settings::NOTIFICATION_SOUND;
use crate::errors::{AppError, AppResult};
use crate::services::bus::EventBus;
use crate::services::clock::{Clock, FixedClock, OffsetClock, SystemClock};
use crate::services::notify::TerminalNotifier;
use crate::services::reminder::ReminderService;
use crate::services::shutdown::detect_shutdown;
use crate::services::snapshot::ScheduleSnapshot;
use crate::services::source::{ScheduleSource, SqliteSource};
use crate::services::topbar::{TerminalRenderer, TopbarService, format_line};
use crate::services::watch::ChangeWatcher;
use crate::services::runtime;
use crate::ui::messages::warning;
use crate::utils::date::parse_datetime;
use crate::utils::logging::{TOPBAR_PREFIX, enable_logging};
use std::sync::Arc;
use std::time::Duration;
use tokio_util::sync::CancellationToken;

/// Clock for a command: the real one, or `--at` either frozen (one-shot
/// commands) or advancing from that instant (live commands).
pub(crate) fn clock_for(at: &Option<String>, advancing: bool) -> AppResult<Arc<dyn Clock>> {
    let Some(raw) = at else {
        return Ok(Arc::new(SystemClock));
    };

    let start = parse_datetime(raw).ok_or_else(|| AppError::InvalidDate(raw.clone()))?;
    if advancing {
        Ok(Arc::new(OffsetClock::new(start)))
    } else {
        Ok(Arc::new(FixedClock(start)))
    }
}

pub(crate) fn secs(value: u64) -> Duration {
    Duration::from_secs(value.max(1))
}

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    let Commands::Topbar {
        once,
        at,
        no_remind,
    } = cmd
    else {
        return Ok(());
    };

    let source = Arc::new(SqliteSource::open(&cfg.database)?);

    if *once {
        let clock = clock_for(at, false)?;
        let now = clock.now();
        let snapshot = ScheduleSnapshot::load(source.as_ref(), now.date())?;
        let state = snapshot.resolve(now.time());
        println!("{}", format_line(&state, &snapshot, cfg.progress_bar_width));
        return Ok(());
    }

    if let Err(e) = enable_logging(TOPBAR_PREFIX, &Config::config_dir(), &cfg.log_level) {
        warning(format!("File logging disabled: {}", e));
    }

    let rt = runtime()?;
    // --at needs the runtime's clock, so it is built inside it
    rt.block_on(async {
        let clock = clock_for(at, true)?;
        let shutdown = CancellationToken::new();
        let bus = EventBus::new();

        let watcher = ChangeWatcher::new(
            DbPool::new(&cfg.database)?,
            bus.clone(),
            secs(cfg.change_poll_secs),
            shutdown.clone(),
        );

        let topbar = TopbarService::new(
            source.clone(),
            clock.clone(),
            bus.clone(),
            Box::new(TerminalRenderer::new(cfg.progress_bar_width)),
            secs(cfg.data_refresh_secs),
            secs(cfg.display_refresh_secs),
            shutdown.clone(),
        );

        let reminder = if *no_remind {
            None
        } else {
            let bell = source.setting(NOTIFICATION_SOUND)? != "false";
            Some(ReminderService::new(
                source.clone(),
                clock.clone(),
                Box::new(TerminalNotifier::new(bell)),
                secs(cfg.reminder_interval_secs),
                shutdown.clone(),
            ))
        };

        tokio::join!(
            detect_shutdown(shutdown.clone()),
            watcher.run(),
            topbar.run(),
            async {
                if let Some(reminder) = reminder {
                    reminder.run().await;
                }
            },
        );

        println!();
        Ok::<(), AppError>(())
    })
}
