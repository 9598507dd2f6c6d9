use chrono::{NaiveDate, NaiveDateTime};
use classtop::core::week::{filter_by_week, week_info};
use classtop::db::pool::DbPool;
use classtop::db::settings::set_setting;
use classtop::errors::{AppError, AppResult};
use classtop::models::display::DisplayState;
use classtop::models::schedule::ScheduleWithCourse;
use classtop::models::week_info::WeekInfo;
use classtop::services::bus::{AppEvent, EventBus};
use classtop::services::clock::{Clock, OffsetClock};
use classtop::services::notify::Notifier;
use classtop::services::reminder::ReminderService;
use classtop::services::snapshot::ScheduleSnapshot;
use classtop::services::source::ScheduleSource;
use classtop::services::topbar::{Renderer, TopbarService};
use classtop::services::watch::ChangeWatcher;
use classtop::utils::logging::TEST_LOGGING;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio_util::sync::CancellationToken;

mod common;
use common::slot;

#[derive(Default)]
struct MemorySource {
    entries: Mutex<Vec<ScheduleWithCourse>>,
    settings: Mutex<HashMap<String, String>>,
    failing: AtomicBool,
}

impl MemorySource {
    fn with(entries: Vec<ScheduleWithCourse>) -> Self {
        let source = Self::default();
        *source.entries.lock().unwrap() = entries;
        source
    }

    fn check(&self) -> AppResult<()> {
        if self.failing.load(Ordering::SeqCst) {
            Err(AppError::Other("storage offline".into()))
        } else {
            Ok(())
        }
    }
}

impl ScheduleSource for MemorySource {
    fn current_week(&self, today: NaiveDate) -> AppResult<WeekInfo> {
        self.check()?;
        let start = self.setting("semester_start_date")?;
        Ok(week_info(&start, today))
    }

    fn schedule_by_day(&self, day: u8, week: Option<u32>) -> AppResult<Vec<ScheduleWithCourse>> {
        self.check()?;
        let day_entries = self
            .entries
            .lock()
            .unwrap()
            .iter()
            .filter(|e| e.day_of_week == day)
            .cloned()
            .collect();
        Ok(filter_by_week(day_entries, week))
    }

    fn schedule_for_week(&self, week: Option<u32>) -> AppResult<Vec<ScheduleWithCourse>> {
        self.check()?;
        Ok(filter_by_week(self.entries.lock().unwrap().clone(), week))
    }

    fn setting(&self, key: &str) -> AppResult<String> {
        Ok(self
            .settings
            .lock()
            .unwrap()
            .get(key)
            .cloned()
            .unwrap_or_default())
    }
}

#[derive(Clone, Default)]
struct RecordingRenderer {
    states: Arc<Mutex<Vec<DisplayState>>>,
}

impl Renderer for RecordingRenderer {
    fn render(&mut self, state: &DisplayState, _snapshot: &ScheduleSnapshot) {
        self.states.lock().unwrap().push(state.clone());
    }
}

#[derive(Clone, Default)]
struct RecordingNotifier {
    sent: Arc<Mutex<Vec<(String, String)>>>,
}

impl Notifier for RecordingNotifier {
    fn notify(&self, title: &str, body: &str) -> AppResult<()> {
        self.sent
            .lock()
            .unwrap()
            .push((title.to_string(), body.to_string()));
        Ok(())
    }
}

fn monday(time: &str) -> NaiveDateTime {
    NaiveDateTime::parse_from_str(&format!("2025-09-01 {time}"), "%Y-%m-%d %H:%M:%S").unwrap()
}

async fn cancel_after(token: CancellationToken, after: Duration) {
    tokio::time::sleep(after).await;
    token.cancel();
}

fn topbar(
    source: Arc<MemorySource>,
    clock: Arc<dyn Clock>,
    bus: EventBus,
    renderer: RecordingRenderer,
    shutdown: CancellationToken,
) -> TopbarService {
    TopbarService::new(
        source,
        clock,
        bus,
        Box::new(renderer),
        Duration::from_secs(10),
        Duration::from_secs(1),
        shutdown,
    )
}

#[tokio::test(start_paused = true)]
async fn topbar_redraws_every_second() {
    *TEST_LOGGING;
    let source = Arc::new(MemorySource::with(vec![slot(
        1, 1, "08:00", "09:40", "高等数学", "A101",
    )]));
    let clock: Arc<dyn Clock> = Arc::new(OffsetClock::new(monday("08:50:00")));
    let renderer = RecordingRenderer::default();
    let shutdown = CancellationToken::new();

    tokio::join!(
        topbar(source, clock, EventBus::new(), renderer.clone(), shutdown.clone()).run(),
        cancel_after(shutdown.clone(), Duration::from_millis(3500)),
    );

    let states = renderer.states.lock().unwrap();
    assert_eq!(states.len(), 4);
    assert_eq!(states[0].display_text, "高等数学 @ A101 (08:00-09:40)");
    assert!((states[0].progress - 0.5).abs() < 1e-9);
    assert!(states[3].progress > states[0].progress);
}

#[tokio::test(start_paused = true)]
async fn topbar_reloads_on_bus_event() {
    *TEST_LOGGING;
    let source = Arc::new(MemorySource::default());
    let clock: Arc<dyn Clock> = Arc::new(OffsetClock::new(monday("08:50:00")));
    let renderer = RecordingRenderer::default();
    let shutdown = CancellationToken::new();
    let bus = EventBus::new();

    let writer = {
        let source = source.clone();
        let bus = bus.clone();
        async move {
            tokio::time::sleep(Duration::from_millis(1500)).await;
            source
                .entries
                .lock()
                .unwrap()
                .push(slot(1, 1, "08:00", "09:40", "高等数学", ""));
            bus.publish(AppEvent::ScheduleChanged);
        }
    };

    tokio::join!(
        topbar(source.clone(), clock, bus.clone(), renderer.clone(), shutdown.clone()).run(),
        writer,
        cancel_after(shutdown.clone(), Duration::from_millis(3500)),
    );

    let states = renderer.states.lock().unwrap();
    assert_eq!(states[0].display_text, "今日无课程安排");
    // well before the 10 s periodic reload
    assert_eq!(
        states.last().unwrap().display_text,
        "高等数学 (08:00-09:40)"
    );
}

#[tokio::test(start_paused = true)]
async fn topbar_picks_up_silent_changes_on_the_data_interval() {
    *TEST_LOGGING;
    let source = Arc::new(MemorySource::default());
    let clock: Arc<dyn Clock> = Arc::new(OffsetClock::new(monday("08:50:00")));
    let renderer = RecordingRenderer::default();
    let shutdown = CancellationToken::new();

    // no bus event: only the 10 s reload can notice this
    let writer = {
        let source = source.clone();
        async move {
            tokio::time::sleep(Duration::from_millis(1500)).await;
            source
                .entries
                .lock()
                .unwrap()
                .push(slot(1, 1, "08:00", "09:40", "高等数学", ""));
        }
    };

    tokio::join!(
        topbar(source.clone(), clock, EventBus::new(), renderer.clone(), shutdown.clone()).run(),
        writer,
        cancel_after(shutdown.clone(), Duration::from_millis(11500)),
    );

    let states = renderer.states.lock().unwrap();
    assert_eq!(states.len(), 12);
    // redraws at 0 s ..= 9 s
    assert!(states[..10].iter().all(|s| s.display_text == "今日无课程安排"));
    assert_eq!(states[11].display_text, "高等数学 (08:00-09:40)");
}

#[tokio::test(start_paused = true)]
async fn topbar_keeps_previous_data_when_storage_fails() {
    *TEST_LOGGING;
    let source = Arc::new(MemorySource::with(vec![slot(
        1, 1, "08:00", "09:40", "高等数学", "",
    )]));
    let clock: Arc<dyn Clock> = Arc::new(OffsetClock::new(monday("08:50:00")));
    let renderer = RecordingRenderer::default();
    let shutdown = CancellationToken::new();
    let bus = EventBus::new();

    let breaker = {
        let source = source.clone();
        let bus = bus.clone();
        async move {
            tokio::time::sleep(Duration::from_millis(1500)).await;
            source.failing.store(true, Ordering::SeqCst);
            bus.publish(AppEvent::ScheduleChanged);
        }
    };

    tokio::join!(
        topbar(source.clone(), clock, bus.clone(), renderer.clone(), shutdown.clone()).run(),
        breaker,
        cancel_after(shutdown.clone(), Duration::from_secs(15)),
    );

    let states = renderer.states.lock().unwrap();
    assert!(states.len() > 10);
    assert!(states.iter().all(|s| s.display_text == "高等数学 (08:00-09:40)"));
}

#[tokio::test(start_paused = true)]
async fn reminder_fires_once_per_slot_and_day() {
    *TEST_LOGGING;
    let source = Arc::new(MemorySource::with(vec![slot(
        1, 1, "08:00", "09:40", "高等数学", "A101",
    )]));
    let notifier = RecordingNotifier::default();
    let shutdown = CancellationToken::new();

    let service = ReminderService::new(
        source,
        Arc::new(OffsetClock::new(monday("07:49:00"))),
        Box::new(notifier.clone()),
        Duration::from_secs(60),
        shutdown.clone(),
    );

    tokio::join!(
        service.run(),
        cancel_after(shutdown.clone(), Duration::from_secs(5 * 60)),
    );

    let sent = notifier.sent.lock().unwrap();
    // 07:49:03 is outside the window, 07:50:03 is 597 s before the start
    assert_eq!(
        *sent,
        vec![(
            "课程提醒".to_string(),
            "高等数学 将在 10 分钟后开始 (A101)".to_string()
        )]
    );
}

#[tokio::test(start_paused = true)]
async fn reminder_keeps_running_across_midnight() {
    *TEST_LOGGING;
    let source = Arc::new(MemorySource::with(vec![slot(
        1, 2, "00:05", "01:00", "早课", "",
    )]));
    let notifier = RecordingNotifier::default();
    let shutdown = CancellationToken::new();

    let service = ReminderService::new(
        source,
        Arc::new(OffsetClock::new(monday("23:58:30"))),
        Box::new(notifier.clone()),
        Duration::from_secs(60),
        shutdown.clone(),
    );

    tokio::join!(
        service.run(),
        cancel_after(shutdown.clone(), Duration::from_secs(150)),
    );

    let sent = notifier.sent.lock().unwrap();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].1, "早课 将在 5 分钟后开始");
}

#[test]
fn reminder_check_respects_settings() {
    let source = Arc::new(MemorySource::with(vec![slot(
        1, 1, "08:00", "09:40", "高等数学", "",
    )]));
    let notifier = RecordingNotifier::default();
    let clock = Arc::new(classtop::services::clock::FixedClock(monday("07:52:00")));

    let mut service = ReminderService::new(
        source.clone(),
        clock,
        Box::new(notifier.clone()),
        Duration::from_secs(60),
        CancellationToken::new(),
    );

    source
        .settings
        .lock()
        .unwrap()
        .insert("notification_minutes".into(), "5".into());
    assert_eq!(service.check_once().unwrap(), 0);

    // unreadable window falls back to 10 minutes
    source
        .settings
        .lock()
        .unwrap()
        .insert("notification_minutes".into(), "soon".into());
    assert_eq!(service.check_once().unwrap(), 1);
    assert_eq!(service.check_once().unwrap(), 0);
    assert_eq!(service.notified().len(), 1);

    source
        .settings
        .lock()
        .unwrap()
        .insert("notification_enabled".into(), "false".into());
    assert_eq!(service.check_once().unwrap(), 0);
    assert_eq!(notifier.sent.lock().unwrap().len(), 1);
}

#[test]
fn cleared_reminders_can_fire_again() {
    let source = Arc::new(MemorySource::with(vec![slot(
        1, 1, "08:00", "09:40", "高等数学", "",
    )]));
    let notifier = RecordingNotifier::default();

    let mut service = ReminderService::new(
        source,
        Arc::new(classtop::services::clock::FixedClock(monday("07:55:00"))),
        Box::new(notifier.clone()),
        Duration::from_secs(60),
        CancellationToken::new(),
    );

    assert_eq!(service.check_once().unwrap(), 1);
    assert_eq!(service.check_once().unwrap(), 0);
    assert_eq!(service.notified().len(), 1);

    service.clear_notified();
    assert!(service.notified().is_empty());

    // same slot, same day: only the cleared set lets it through
    assert_eq!(service.check_once().unwrap(), 1);
    assert_eq!(notifier.sent.lock().unwrap().len(), 2);
}

#[tokio::test(start_paused = true)]
async fn change_watcher_reports_foreign_commits() {
    *TEST_LOGGING;
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("watch.sqlite").to_string_lossy().to_string();
    let writer = DbPool::open_initialized(&path).unwrap();

    let bus = EventBus::new();
    let mut events = bus.subscribe();
    let shutdown = CancellationToken::new();

    let watcher = ChangeWatcher::new(
        DbPool::new(&path).unwrap(),
        bus.clone(),
        Duration::from_secs(1),
        shutdown.clone(),
    );

    tokio::join!(watcher.run(), async {
        tokio::time::sleep(Duration::from_millis(1500)).await;
        set_setting(&writer.conn, "total_weeks", "18").unwrap();
        tokio::time::sleep(Duration::from_secs(2)).await;
        shutdown.cancel();
    });

    assert_eq!(
        events.try_recv().unwrap(),
        AppEvent::SettingChanged {
            key: "total_weeks".into(),
            value: "18".into()
        }
    );
    assert_eq!(events.try_recv().unwrap(), AppEvent::ScheduleChanged);
    assert!(events.try_recv().is_err());
}
