use crate::db::pool::DbPool;
use crate::db::settings::{DEFAULT_SETTINGS, get_all_settings};
use crate::errors::AppResult;
use crate::services::bus::{AppEvent, EventBus};
use std::collections::BTreeMap;
use std::time::Duration;
use tokio::time::MissedTickBehavior;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

type SettingsMap = BTreeMap<String, String>;

/// Turns commits made by other connections (e.g. `classtop schedule add` in
/// another shell) into bus events.
///
/// SQLite bumps `PRAGMA data_version` on this connection whenever a different
/// connection commits, so polling it is enough to notice foreign writes.
pub struct ChangeWatcher {
    pool: DbPool,
    bus: EventBus,
    interval: Duration,
    shutdown: CancellationToken,
}

impl ChangeWatcher {
    pub fn new(pool: DbPool, bus: EventBus, interval: Duration, shutdown: CancellationToken) -> Self {
        Self {
            pool,
            bus,
            interval,
            shutdown,
        }
    }

    fn data_version(&self) -> AppResult<i64> {
        Ok(self
            .pool
            .conn
            .query_row("PRAGMA data_version", [], |row| row.get(0))?)
    }

    fn settings(&self) -> AppResult<SettingsMap> {
        Ok(get_all_settings(&self.pool.conn)?.into_iter().collect())
    }

    pub async fn run(self) {
        let mut last_version = self.data_version().ok();
        let mut last_settings = self.settings().unwrap_or_default();

        let mut ticker = tokio::time::interval(self.interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

        loop {
            tokio::select! {
                _ = self.shutdown.cancelled() => return,
                _ = ticker.tick() => {}
            }

            let version = match self.data_version() {
                Ok(v) => v,
                Err(e) => {
                    warn!("Cannot read data_version: {}", e);
                    continue;
                }
            };

            if last_version == Some(version) {
                continue;
            }
            last_version = Some(version);
            debug!("Foreign commit detected (data_version = {})", version);

            match self.settings() {
                Ok(current) => {
                    for event in settings_events(&last_settings, &current) {
                        self.bus.publish(event);
                    }
                    last_settings = current;
                }
                Err(e) => warn!("Cannot reload settings: {}", e),
            }

            self.bus.publish(AppEvent::ScheduleChanged);
        }
    }
}

fn is_default(settings: &SettingsMap) -> bool {
    settings.len() == DEFAULT_SETTINGS.len()
        && DEFAULT_SETTINGS
            .iter()
            .all(|(k, v)| settings.get(*k).map(String::as_str) == Some(*v))
}

/// Events describing the move from `before` to `after`. A move onto exactly
/// the defaults from anything else is reported as a single reset.
pub fn settings_events(before: &SettingsMap, after: &SettingsMap) -> Vec<AppEvent> {
    if before == after {
        return Vec::new();
    }

    if is_default(after) && !is_default(before) {
        return vec![AppEvent::SettingsReset];
    }

    after
        .iter()
        .filter(|(k, v)| before.get(*k) != Some(*v))
        .map(|(k, v)| AppEvent::SettingChanged {
            key: k.clone(),
            value: v.clone(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn defaults() -> SettingsMap {
        DEFAULT_SETTINGS
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn single_change_is_reported_with_its_value() {
        let before = defaults();
        let mut after = defaults();
        after.insert("total_weeks".into(), "18".into());

        assert_eq!(
            settings_events(&before, &after),
            vec![AppEvent::SettingChanged {
                key: "total_weeks".into(),
                value: "18".into()
            }]
        );
    }

    #[test]
    fn returning_to_defaults_is_a_reset() {
        let mut before = defaults();
        before.insert("font_size".into(), "20".into());
        before.insert("custom".into(), "x".into());

        assert_eq!(settings_events(&before, &defaults()), vec![AppEvent::SettingsReset]);
    }

    #[test]
    fn no_change_no_event() {
        assert!(settings_events(&defaults(), &defaults()).is_empty());
    }
}
