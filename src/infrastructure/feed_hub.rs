use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use chrono::NaiveDate;
use tokio::sync::mpsc;

use crate::db::DbPool;
use crate::domain::booking::BookingView;
use crate::domain::errors::DomainError;
use crate::domain::ports::{BookingFeed, FeedEvent, FeedSubscription, Teardown};

use super::rental_store::load_bookings_from;

struct HubEntry {
    from: NaiveDate,
    tx: mpsc::UnboundedSender<FeedEvent>,
    cancelled: Arc<AtomicBool>,
}

/// Registry of live feed subscriptions.
///
/// The write path calls [`publish`](Self::publish) after every committed
/// booking change; each live subscription then gets a fresh, wholesale
/// snapshot of its own filtered result set. Cancelled and disconnected
/// subscriptions are pruned on the next publish.
#[derive(Clone, Default)]
pub struct FeedHub {
    entries: Arc<Mutex<Vec<HubEntry>>>,
}

impl FeedHub {
    pub fn new() -> Self {
        Self::default()
    }

    fn attach(&self, from: NaiveDate) -> (mpsc::UnboundedSender<FeedEvent>, FeedSubscription) {
        let (tx, rx) = mpsc::unbounded_channel();
        let cancelled = Arc::new(AtomicBool::new(false));
        self.entries.lock().unwrap().push(HubEntry {
            from,
            tx: tx.clone(),
            cancelled: Arc::clone(&cancelled),
        });
        let teardown = Teardown::new(move || cancelled.store(true, Ordering::SeqCst));
        (tx, FeedSubscription::new(rx, teardown))
    }

    /// Push a fresh snapshot to every live subscription. The query runs
    /// once per subscription since each carries its own lower bound. A
    /// failed query is logged and forwarded as an error event; the
    /// subscription stays registered.
    pub fn publish<Q>(&self, query: Q)
    where
        Q: Fn(NaiveDate) -> Result<Vec<BookingView>, DomainError>,
    {
        let targets: Vec<(NaiveDate, mpsc::UnboundedSender<FeedEvent>)> = {
            let mut entries = self.entries.lock().unwrap();
            entries.retain(|e| !e.cancelled.load(Ordering::SeqCst) && !e.tx.is_closed());
            entries
                .iter()
                .map(|e| (e.from, e.tx.clone()))
                .collect()
        };

        for (from, tx) in targets {
            let event = match query(from) {
                Ok(bookings) => FeedEvent::Snapshot(bookings),
                Err(err) => {
                    log::error!("feed snapshot query failed: {err}");
                    FeedEvent::Error(err.to_string())
                }
            };
            // A failed send means the subscriber disconnected between the
            // prune above and now; the next publish drops the entry.
            let _ = tx.send(event);
        }
    }

    #[cfg(test)]
    fn live_count(&self) -> usize {
        self.entries.lock().unwrap().len()
    }
}

/// Postgres-backed implementation of the live-query port. Subscribing runs
/// the filtered query once and delivers the result as the first snapshot;
/// every later snapshot comes from the hub's publish cycle.
#[derive(Clone)]
pub struct PgBookingFeed {
    pool: DbPool,
    hub: FeedHub,
}

impl PgBookingFeed {
    pub fn new(pool: DbPool, hub: FeedHub) -> Self {
        Self { pool, hub }
    }
}

impl BookingFeed for PgBookingFeed {
    fn subscribe(&self, from: NaiveDate) -> Result<FeedSubscription, DomainError> {
        let initial = load_bookings_from(&self.pool, from)?;
        let (tx, subscription) = self.hub.attach(from);
        let _ = tx.send(FeedEvent::Snapshot(initial));
        Ok(subscription)
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;
    use serde_json::json;
    use uuid::Uuid;

    use super::*;

    fn booking(day: u32) -> BookingView {
        BookingView {
            id: Uuid::new_v4(),
            fecha_inicio: NaiveDate::from_ymd_opt(2026, 9, day).unwrap(),
            estado: "PENDIENTE".to_string(),
            detalles: json!({}),
            created_at: Utc::now(),
            items: vec![],
        }
    }

    fn date(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 9, day).unwrap()
    }

    #[tokio::test]
    async fn publish_delivers_per_subscription_snapshots() {
        let hub = FeedHub::new();
        let (_tx_a, mut sub_a) = hub.attach(date(1));
        let (_tx_b, mut sub_b) = hub.attach(date(10));

        hub.publish(|from| {
            Ok(vec![booking(5), booking(15)]
                .into_iter()
                .filter(|b| b.fecha_inicio >= from)
                .collect())
        });

        match sub_a.recv().await.unwrap() {
            FeedEvent::Snapshot(list) => assert_eq!(list.len(), 2),
            other => panic!("expected snapshot, got {other:?}"),
        }
        match sub_b.recv().await.unwrap() {
            FeedEvent::Snapshot(list) => assert_eq!(list.len(), 1),
            other => panic!("expected snapshot, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn publish_forwards_query_failures_as_error_events() {
        let hub = FeedHub::new();
        let (_tx, mut sub) = hub.attach(date(1));

        hub.publish(|_| Err(DomainError::Internal("connection lost".to_string())));

        match sub.recv().await.unwrap() {
            FeedEvent::Error(message) => assert!(message.contains("connection lost")),
            other => panic!("expected error event, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn cancelled_subscriptions_are_pruned_and_silent() {
        let hub = FeedHub::new();
        let (_tx_live, mut live) = hub.attach(date(1));
        let (tx_dead, mut dead) = hub.attach(date(1));
        assert_eq!(hub.live_count(), 2);

        dead.cancel();
        hub.publish(|_| Ok(vec![booking(2)]));
        assert_eq!(hub.live_count(), 1);
        drop(tx_dead);

        assert!(matches!(
            live.recv().await,
            Some(FeedEvent::Snapshot(_))
        ));
        // The pruned entry's sender is gone, so the cancelled subscription
        // sees end-of-stream rather than a stale snapshot.
        assert!(dead.recv().await.is_none());
    }

    #[tokio::test]
    async fn dropped_subscribers_are_pruned_on_next_publish() {
        let hub = FeedHub::new();
        let (_tx, sub) = hub.attach(date(1));
        drop(sub);

        hub.publish(|_| Ok(vec![]));
        assert_eq!(hub.live_count(), 0);
    }
}
