//! In-process purchase and VIP event bus.
//!
//! Events are published on a `tokio::sync::broadcast` channel after the state change
//! they describe has been committed. Publishing never fails the operation that
//! triggered it: with no subscribers or a lagging consumer the event is dropped.

use chrono::{DateTime, Utc};
use tokio::{sync::broadcast, task::JoinHandle};
use tokio_util::sync::CancellationToken;

use crate::server::model::{money::Money, user::UserId};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PurchaseEvent {
    ChapterPurchased {
        user_id: UserId,
        chapter_id: i32,
        book_id: i32,
        price: Money,
    },
    BookPurchased {
        user_id: UserId,
        book_id: i32,
        chapter_count: usize,
        total_price: Money,
    },
    ChaptersPurchased {
        user_id: UserId,
        book_id: i32,
        chapter_ids: Vec<i32>,
        total_price: Money,
    },
    VipActivated {
        user_id: UserId,
        expires_at: DateTime<Utc>,
    },
    VipRevoked {
        user_id: UserId,
    },
}

impl PurchaseEvent {
    /// Dotted event name, e.g. `chapter.purchased`.
    pub fn name(&self) -> &'static str {
        match self {
            Self::ChapterPurchased { .. } => "chapter.purchased",
            Self::BookPurchased { .. } => "book.purchased",
            Self::ChaptersPurchased { .. } => "chapters.purchased",
            Self::VipActivated { .. } => "vip.activated",
            Self::VipRevoked { .. } => "vip.revoked",
        }
    }

    pub fn user_id(&self) -> UserId {
        match self {
            Self::ChapterPurchased { user_id, .. }
            | Self::BookPurchased { user_id, .. }
            | Self::ChaptersPurchased { user_id, .. }
            | Self::VipActivated { user_id, .. }
            | Self::VipRevoked { user_id } => *user_id,
        }
    }
}

/// Cloneable handle to the broadcast channel.
#[derive(Clone, Debug)]
pub struct EventBus {
    tx: broadcast::Sender<PurchaseEvent>,
}

impl EventBus {
    pub fn new(capacity: usize) -> Self {
        let (tx, _) = broadcast::channel(capacity.max(1));
        Self { tx }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<PurchaseEvent> {
        self.tx.subscribe()
    }

    /// Publishes an event to every current subscriber.
    pub fn publish(&self, event: PurchaseEvent) {
        let name = event.name();
        if self.tx.send(event).is_err() {
            tracing::debug!("No subscribers for event {}", name);
        }
    }
}

/// Starts a background task logging every event until `shutdown` is cancelled.
pub fn spawn_event_logger(bus: &EventBus, shutdown: CancellationToken) -> JoinHandle<()> {
    let mut rx = bus.subscribe();

    tokio::spawn(async move {
        loop {
            tokio::select! {
                _ = shutdown.cancelled() => break,
                received = rx.recv() => match received {
                    Ok(event) => {
                        tracing::info!(event = event.name(), user_id = %event.user_id(), "{:?}", event);
                    }
                    Err(broadcast::error::RecvError::Lagged(skipped)) => {
                        tracing::warn!("Event logger lagged, skipped {} events", skipped);
                    }
                    Err(broadcast::error::RecvError::Closed) => break,
                },
            }
        }

        tracing::debug!("Event logger stopped");
    })
}
