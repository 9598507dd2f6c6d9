use tokio::sync::broadcast;
use tracing::trace;

const BUS_CAPACITY: usize = 64;

/// Data-change notifications shared by the services of one process.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppEvent {
    ScheduleChanged,
    SettingChanged { key: String, value: String },
    SettingsReset,
}

/// Multi-subscriber broadcast. Each live subscriber sees every event at
/// least once; a subscriber that falls behind gets `Lagged` and should treat
/// it as "something changed".
#[derive(Clone)]
pub struct EventBus {
    sender: broadcast::Sender<AppEvent>,
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}

impl EventBus {
    pub fn new() -> Self {
        let (sender, _) = broadcast::channel(BUS_CAPACITY);
        Self { sender }
    }

    /// Publish to current subscribers. Nobody listening is not an error.
    pub fn publish(&self, event: AppEvent) {
        trace!("Publishing {:?}", event);
        let _ = self.sender.send(event);
    }

    pub fn subscribe(&self) -> broadcast::Receiver<AppEvent> {
        self.sender.subscribe()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn every_subscriber_sees_the_event() {
        let bus = EventBus::new();
        let mut a = bus.subscribe();
        let mut b = bus.subscribe();

        bus.publish(AppEvent::ScheduleChanged);

        assert_eq!(a.recv().await.unwrap(), AppEvent::ScheduleChanged);
        assert_eq!(b.recv().await.unwrap(), AppEvent::ScheduleChanged);
    }

    #[test]
    fn publishing_without_subscribers_is_fine() {
        EventBus::new().publish(AppEvent::SettingsReset);
    }
}
