//! Fan-out of [`TranslateEvent`]s to queue subscribers.

use gloss_core::TranslateEvent;
use tokio::sync::broadcast;

/// Channel capacity; previews dominate the event volume, so this is sized
/// for many fragments per sentence.
const CHANNEL_CAPACITY: usize = 1024;

/// Broadcasts queue lifecycle events to any number of subscribers.
///
/// `emit` never awaits, so the worker's fold-then-forward step stays
/// synchronous. A subscriber that falls behind the channel capacity is
/// lagged rather than blocking the worker; emitting with no subscribers at
/// all simply drops the event.
pub struct EventEmitter {
    tx: broadcast::Sender<TranslateEvent>,
}

impl EventEmitter {
    /// A fresh emitter with no subscribers.
    #[must_use]
    pub fn new() -> Self {
        let (tx, _) = broadcast::channel(CHANNEL_CAPACITY);
        Self { tx }
    }

    /// Deliver an event to all current subscribers. Non-blocking.
    pub fn emit(&self, event: TranslateEvent) {
        let _ = self.tx.send(event);
    }

    /// Subscribe to events emitted after this call.
    #[must_use]
    pub fn subscribe(&self) -> broadcast::Receiver<TranslateEvent> {
        self.tx.subscribe()
    }
}

impl Default for EventEmitter {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gloss_core::{Provenance, Sentence, TranslateError};

    #[test]
    fn emit_with_no_subscribers_does_not_panic() {
        let emitter = EventEmitter::new();
        emitter.emit(TranslateEvent::JobFailed {
            error: TranslateError::Timeout,
        });
    }

    #[tokio::test]
    async fn subscribers_see_events_in_emission_order() {
        let emitter = EventEmitter::new();
        let mut rx = emitter.subscribe();

        emitter.emit(TranslateEvent::JobStarted {
            text: "Hi.".into(),
            provenance: Provenance::Manual,
        });
        emitter.emit(TranslateEvent::Sentence {
            sentence: Sentence::preview("Hi", "你", 0),
        });

        assert!(matches!(
            rx.recv().await.unwrap(),
            TranslateEvent::JobStarted { .. }
        ));
        assert!(matches!(
            rx.recv().await.unwrap(),
            TranslateEvent::Sentence { sentence } if sentence.partial
        ));
    }

    #[tokio::test]
    async fn each_subscriber_gets_its_own_copy() {
        let emitter = EventEmitter::new();
        let mut rx1 = emitter.subscribe();
        let mut rx2 = emitter.subscribe();

        let event = TranslateEvent::JobFailed {
            error: TranslateError::Cancelled,
        };
        emitter.emit(event.clone());

        assert_eq!(rx1.recv().await.unwrap(), event);
        assert_eq!(rx2.recv().await.unwrap(), event);
    }

    #[tokio::test]
    async fn late_subscriber_misses_earlier_events() {
        let emitter = EventEmitter::new();
        emitter.emit(TranslateEvent::JobFailed {
            error: TranslateError::Timeout,
        });

        let mut rx = emitter.subscribe();
        emitter.emit(TranslateEvent::JobFailed {
            error: TranslateError::Cancelled,
        });

        assert_eq!(
            rx.recv().await.unwrap(),
            TranslateEvent::JobFailed {
                error: TranslateError::Cancelled,
            }
        );
        assert!(rx.try_recv().is_err());
    }
}
