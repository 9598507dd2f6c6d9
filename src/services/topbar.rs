//! The live topbar: one task reloads the week-filtered timetable, another
//! redraws the class progress line from the latest reload.

use crate::models::display::DisplayState;
use crate::services::bus::EventBus;
use crate::services::clock::Clock;
use crate::services::snapshot::ScheduleSnapshot;
use crate::services::source::ScheduleSource;
use crate::utils::colors::{CYAN, GREEN, GREY, RESET, YELLOW};
use crate::utils::formatting::progress_bar;
use std::io::{Write, stdout};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::broadcast::error::RecvError;
use tokio::sync::watch;
use tokio::time::MissedTickBehavior;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, warn};

/// Draws a [`DisplayState`] somewhere.
pub trait Renderer: Send {
    fn render(&mut self, state: &DisplayState, snapshot: &ScheduleSnapshot);
}

/// Topbar line as plain text (no colours), e.g.
/// `第3周 周一 [######......] 50% 高等数学 @ A101 (08:00-09:40)`.
pub fn format_line(state: &DisplayState, snapshot: &ScheduleSnapshot, bar_width: usize) -> String {
    format!(
        "第{}周 {} {} {:>3}% {}",
        snapshot.week.week,
        crate::core::week::weekday_name(snapshot.weekday),
        progress_bar(state.progress, bar_width),
        (state.progress * 100.0).round() as i64,
        state.display_text
    )
}

/// Redraws a single terminal line in place.
pub struct TerminalRenderer {
    bar_width: usize,
    last_len: usize,
}

impl TerminalRenderer {
    pub fn new(bar_width: usize) -> Self {
        Self {
            bar_width,
            last_len: 0,
        }
    }
}

impl Renderer for TerminalRenderer {
    fn render(&mut self, state: &DisplayState, snapshot: &ScheduleSnapshot) {
        let color = if state.is_break_time {
            YELLOW
        } else if state.progress > 0.0 {
            GREEN
        } else {
            GREY
        };

        let plain = format_line(state, snapshot, self.bar_width);
        let width = crate::utils::formatting::display_width(&plain);
        let pad = " ".repeat(self.last_len.saturating_sub(width));
        self.last_len = width;

        let mut out = stdout().lock();
        let _ = write!(
            out,
            "\r{CYAN}第{}周{RESET} {}{}{RESET}{}",
            snapshot.week.week,
            color,
            plain.split_once(' ').map(|(_, rest)| rest).unwrap_or(&plain),
            pad
        );
        let _ = out.flush();
    }
}

pub struct TopbarService {
    source: Arc<dyn ScheduleSource>,
    clock: Arc<dyn Clock>,
    bus: EventBus,
    renderer: Box<dyn Renderer>,
    data_interval: Duration,
    display_interval: Duration,
    shutdown: CancellationToken,
}

impl TopbarService {
    pub fn new(
        source: Arc<dyn ScheduleSource>,
        clock: Arc<dyn Clock>,
        bus: EventBus,
        renderer: Box<dyn Renderer>,
        data_interval: Duration,
        display_interval: Duration,
        shutdown: CancellationToken,
    ) -> Self {
        Self {
            source,
            clock,
            bus,
            renderer,
            data_interval,
            display_interval,
            shutdown,
        }
    }

    /// Load the current snapshot, keeping `previous` when storage fails.
    fn reload(
        source: &dyn ScheduleSource,
        clock: &dyn Clock,
        previous: &ScheduleSnapshot,
    ) -> Option<ScheduleSnapshot> {
        let date = clock.now().date();
        match ScheduleSnapshot::load(source, date) {
            Ok(snapshot) => {
                debug!(
                    "Loaded {} slots for {} (week {})",
                    snapshot.today.len(),
                    date,
                    snapshot.week.week
                );
                Some(snapshot)
            }
            Err(e) => {
                error!("Schedule reload failed, keeping previous data: {}", e);
                if previous.date != date {
                    warn!("Displayed data belongs to {}", previous.date);
                }
                None
            }
        }
    }

    async fn data_loop(
        source: Arc<dyn ScheduleSource>,
        clock: Arc<dyn Clock>,
        bus: EventBus,
        interval: Duration,
        tx: watch::Sender<Arc<ScheduleSnapshot>>,
        shutdown: CancellationToken,
    ) {
        let mut events = bus.subscribe();
        let mut bus_open = true;

        let mut ticker = tokio::time::interval(interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
        // the first tick completes immediately; the initial load already happened
        ticker.tick().await;

        loop {
            tokio::select! {
                _ = shutdown.cancelled() => return,
                _ = ticker.tick() => {}
                event = events.recv(), if bus_open => match event {
                    Ok(event) => debug!("Reloading after {:?}", event),
                    Err(RecvError::Lagged(n)) => debug!("Reloading after {} missed events", n),
                    Err(RecvError::Closed) => {
                        bus_open = false;
                        continue;
                    }
                },
            }

            let previous = tx.borrow().clone();
            if let Some(snapshot) = Self::reload(source.as_ref(), clock.as_ref(), &previous) {
                tx.send_replace(Arc::new(snapshot));
            }
        }
    }

    async fn display_loop(
        clock: Arc<dyn Clock>,
        mut renderer: Box<dyn Renderer>,
        interval: Duration,
        rx: watch::Receiver<Arc<ScheduleSnapshot>>,
        shutdown: CancellationToken,
    ) {
        let mut ticker = tokio::time::interval(interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

        loop {
            tokio::select! {
                _ = shutdown.cancelled() => return,
                _ = ticker.tick() => {}
            }

            let snapshot = rx.borrow().clone();
            let state = snapshot.resolve(clock.now().time());
            renderer.render(&state, &snapshot);
        }
    }

    /// Run both loops until the shutdown token is cancelled.
    pub async fn run(self) {
        let today = self.clock.now().date();
        let initial = Self::reload(
            self.source.as_ref(),
            self.clock.as_ref(),
            &ScheduleSnapshot::empty(today),
        )
        .unwrap_or_else(|| ScheduleSnapshot::empty(today));

        let (tx, rx) = watch::channel(Arc::new(initial));
        info!("Topbar started");

        tokio::join!(
            Self::data_loop(
                self.source.clone(),
                self.clock.clone(),
                self.bus.clone(),
                self.data_interval,
                tx,
                self.shutdown.clone(),
            ),
            Self::display_loop(
                self.clock.clone(),
                self.renderer,
                self.display_interval,
                rx,
                self.shutdown.clone(),
            ),
        );

        info!("Topbar stopped");
    }
}
