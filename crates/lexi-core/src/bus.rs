use std::sync::Mutex;
use std::sync::atomic::{AtomicU64, Ordering};

use kanal::{AsyncReceiver, AsyncSender};
use lexi_types::AppEvent;

/// Typed page-local pub/sub. Every subscriber gets every event published after it subscribed.
#[derive(Default)]
pub struct EventBus {
    next_id: AtomicU64,
    subscribers: Mutex<Vec<(u64, AsyncSender<AppEvent>)>>,
}

impl EventBus {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe(&self) -> AsyncReceiver<AppEvent> {
        let (tx, rx) = kanal::unbounded_async();
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        if let Ok(mut subscribers) = self.subscribers.lock() {
            subscribers.push((id, tx));
        }
        rx
    }

    /// Deliver to all live subscribers, returns how many received the event
    pub async fn publish(&self, event: AppEvent) -> usize {
        let subscribers = match self.subscribers.lock() {
            Ok(subscribers) => subscribers.clone(),
            Err(_) => return 0,
        };

        tracing::debug!("Publishing {} to {} subscribers", event.name(), subscribers.len());

        let mut delivered = 0;
        let mut closed = Vec::new();
        for (id, tx) in &subscribers {
            match tx.send(event.clone()).await {
                Ok(()) => delivered += 1,
                Err(_) => closed.push(*id),
            }
        }

        if !closed.is_empty() {
            self.prune(&closed);
        }

        delivered
    }

    pub fn subscriber_count(&self) -> usize {
        self.subscribers.lock().map(|s| s.len()).unwrap_or(0)
    }

    fn prune(&self, closed: &[u64]) {
        let Ok(mut subscribers) = self.subscribers.lock() else {
            return;
        };
        subscribers.retain(|(id, _)| !closed.contains(id));
        tracing::debug!("Dropped {} closed subscribers", closed.len());
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use lexi_types::ReadingLevel;
    use tokio::time::timeout;

    use super::*;

    #[tokio::test]
    async fn every_subscriber_receives_the_event() {
        let bus = EventBus::new();
        let first = bus.subscribe();
        let second = bus.subscribe();

        let delivered = bus
            .publish(AppEvent::LevelChanged {
                level: ReadingLevel::Advanced,
            })
            .await;
        assert_eq!(delivered, 2);

        for rx in [first, second] {
            let event = timeout(Duration::from_secs(1), rx.recv())
                .await
                .expect("timed out")
                .expect("channel closed");
            assert_eq!(
                event,
                AppEvent::LevelChanged {
                    level: ReadingLevel::Advanced
                }
            );
        }
    }

    #[tokio::test]
    async fn dropped_subscribers_are_pruned() {
        let bus = EventBus::new();
        let kept = bus.subscribe();
        drop(bus.subscribe());

        assert_eq!(bus.publish(AppEvent::OpenSummary).await, 1);
        assert_eq!(bus.subscriber_count(), 1);
        assert_eq!(kept.recv().await.unwrap(), AppEvent::OpenSummary);
    }
}
