//! # Event Aggregator
//!
//! Single-slot handoff between the chat sessions (producers) and the UI loop
//! (the only consumer). A push completes once the slot is free, so a session
//! stalls while the UI is busy instead of queuing without bound or dropping.
//!
//! ```text
//! anonymous session ─┐
//!                    ├──▶ [ 1 slot ] ──▶ UI loop
//! send session ──────┘
//! ```

use tokio::sync::mpsc;

use super::event::ChatEvent;
use super::session::SessionError;

const SLOT_CAPACITY: usize = 1;

/// Producer half. Cloned into every session task.
#[derive(Clone, Debug)]
pub struct EventSender {
    tx: mpsc::Sender<ChatEvent>,
}

impl EventSender {
    /// Wait for the slot and hand the event over. Fails only when the UI loop is gone.
    pub async fn push(&self, event: ChatEvent) -> Result<(), SessionError> {
        self.tx.send(event).await.map_err(|_| SessionError::Closed)
    }
}

/// Consumer half, owned by the UI loop.
#[derive(Debug)]
pub struct EventReceiver {
    rx: mpsc::Receiver<ChatEvent>,
}

impl EventReceiver {
    /// Next event in arrival order. `None` once every producer has been dropped.
    pub async fn next(&mut self) -> Option<ChatEvent> {
        self.rx.recv().await
    }
}

pub fn channel() -> (EventSender, EventReceiver) {
    let (tx, rx) = mpsc::channel(SLOT_CAPACITY);
    (EventSender { tx }, EventReceiver { rx })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio_test::{assert_pending, assert_ready_ok, task};

    #[tokio::test]
    async fn delivers_in_order() {
        let (tx, mut rx) = channel();
        let producer = tokio::spawn(async move {
            for n in 0..5 {
                tx.push(ChatEvent::notice(n.to_string())).await.unwrap();
            }
        });

        for n in 0..5 {
            assert_eq!(rx.next().await.unwrap().text, n.to_string());
        }
        producer.await.unwrap();
        assert!(rx.next().await.is_none());
    }

    #[tokio::test]
    async fn second_push_waits_for_the_consumer() {
        let (tx, mut rx) = channel();
        tx.push(ChatEvent::notice("first")).await.unwrap();

        let mut second = task::spawn(tx.push(ChatEvent::notice("second")));
        assert_pending!(second.poll());

        assert_eq!(rx.next().await.unwrap().text, "first");
        assert!(second.is_woken());
        assert_ready_ok!(second.poll());
        assert_eq!(rx.next().await.unwrap().text, "second");
    }

    #[tokio::test]
    async fn push_fails_after_consumer_drops() {
        let (tx, rx) = channel();
        drop(rx);
        assert!(matches!(
            tx.push(ChatEvent::notice("late")).await,
            Err(SessionError::Closed)
        ));
    }
}
