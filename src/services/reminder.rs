use crate::core::reminder::{NotifiedSet, collect_due, reminder_minutes, reminders_enabled};
use crate::db::settings::{NOTIFICATION_ENABLED, NOTIFICATION_MINUTES};
use crate::errors::AppResult;
use crate::services::clock::Clock;
use crate::services::notify::Notifier;
use crate::services::source::ScheduleSource;
use crate::utils::date::{next_midnight, weekday_number};
use std::sync::Arc;
use std::time::Duration;
use tokio::time::{Instant, MissedTickBehavior};
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info};

pub const INITIAL_DELAY: Duration = Duration::from_secs(3);

pub struct ReminderService {
    source: Arc<dyn ScheduleSource>,
    clock: Arc<dyn Clock>,
    notifier: Box<dyn Notifier>,
    interval: Duration,
    shutdown: CancellationToken,
    notified: NotifiedSet,
}

impl ReminderService {
    pub fn new(
        source: Arc<dyn ScheduleSource>,
        clock: Arc<dyn Clock>,
        notifier: Box<dyn Notifier>,
        interval: Duration,
        shutdown: CancellationToken,
    ) -> Self {
        Self {
            source,
            clock,
            notifier,
            interval,
            shutdown,
            notified: NotifiedSet::new(),
        }
    }

    pub fn notified(&self) -> &NotifiedSet {
        &self.notified
    }

    /// Forget every announced slot so they can be announced again.
    pub fn clear_notified(&mut self) {
        debug!("Clearing {} reminder keys", self.notified.len());
        self.notified.clear();
    }

    /// One reminder pass. Returns how many reminders were sent.
    pub fn check_once(&mut self) -> AppResult<usize> {
        if !reminders_enabled(&self.source.setting(NOTIFICATION_ENABLED)?) {
            debug!("Reminders disabled");
            return Ok(0);
        }

        let minutes = reminder_minutes(&self.source.setting(NOTIFICATION_MINUTES)?);
        let now = self.clock.now();
        let week = self.source.current_week(now.date())?;
        let today = self
            .source
            .schedule_by_day(weekday_number(now.date()), Some(week.week))?;

        let due = collect_due(&today, now, minutes, &mut self.notified);
        for reminder in &due {
            info!("Reminder for slot #{}: {}", reminder.entry_id, reminder.body);
            if let Err(e) = self.notifier.notify(&reminder.title, &reminder.body) {
                error!("Notification failed: {}", e);
            }
        }

        Ok(due.len())
    }

    fn tick(&mut self) {
        if let Err(e) = self.check_once() {
            error!("Reminder check failed: {}", e);
        }
    }

    fn until_midnight(&self) -> Duration {
        let now = self.clock.now();
        (next_midnight(now) - now)
            .to_std()
            .unwrap_or(Duration::from_secs(1))
    }

    /// First check after [`INITIAL_DELAY`], then one per interval. The
    /// already-notified set is emptied at every local midnight.
    pub async fn run(mut self) {
        let shutdown = self.shutdown.clone();

        tokio::select! {
            _ = shutdown.cancelled() => return,
            _ = tokio::time::sleep(INITIAL_DELAY) => {}
        }
        info!("Reminder service started");
        self.tick();

        let mut ticker = tokio::time::interval_at(Instant::now() + self.interval, self.interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

        let midnight = tokio::time::sleep(self.until_midnight());
        tokio::pin!(midnight);

        loop {
            tokio::select! {
                _ = shutdown.cancelled() => break,
                _ = ticker.tick() => self.tick(),
                _ = &mut midnight => {
                    self.clear_notified();
                    let next = Instant::now() + self.until_midnight();
                    midnight.as_mut().reset(next);
                }
            }
        }

        info!("Reminder service stopped");
    }
}
