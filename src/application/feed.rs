use chrono::{Local, NaiveDate};

use crate::domain::booking::BookingView;
use crate::domain::errors::DomainError;
use crate::domain::ports::{BookingFeed, FeedEvent, FeedSubscription};

/// Live view over upcoming bookings for a single consumer.
///
/// Lifecycle: loading until the first snapshot arrives, then streaming
/// (each snapshot replaces the list wholesale), then terminated on
/// [`unmount`](Self::unmount) or drop. A subscriber holds exactly one
/// subscription and tears it down exactly once.
///
/// Subscription errors are logged and swallowed: the loading flag is
/// cleared, the last known list stays in place and no retry is attempted.
/// Callers that need retries must remount.
pub struct BookingFeedSubscriber {
    today: NaiveDate,
    bookings: Vec<BookingView>,
    loading: bool,
    subscription: FeedSubscription,
}

impl BookingFeedSubscriber {
    /// Subscribe from the current calendar date. The date is computed once
    /// here and never refreshed, so the filter boundary stays fixed for the
    /// subscriber's lifetime even when it lives across midnight.
    pub fn mount<F: BookingFeed + ?Sized>(feed: &F) -> Result<Self, DomainError> {
        Self::mount_on(feed, Local::now().date_naive())
    }

    pub fn mount_on<F: BookingFeed + ?Sized>(
        feed: &F,
        today: NaiveDate,
    ) -> Result<Self, DomainError> {
        let subscription = feed.subscribe(today)?;
        Ok(Self {
            today,
            bookings: Vec::new(),
            loading: true,
            subscription,
        })
    }

    /// Wait for the next snapshot and apply it, returning the new list.
    /// Returns `None` once the feed has gone away. Error events do not
    /// surface here; they only clear the loading flag.
    pub async fn next_snapshot(&mut self) -> Option<&[BookingView]> {
        loop {
            match self.subscription.recv().await? {
                FeedEvent::Snapshot(bookings) => {
                    self.bookings = bookings;
                    self.loading = false;
                    return Some(&self.bookings);
                }
                FeedEvent::Error(message) => {
                    log::error!("booking feed subscription failed: {message}");
                    self.loading = false;
                }
            }
        }
    }

    pub fn bookings(&self) -> &[BookingView] {
        &self.bookings
    }

    /// True only until the first event arrives.
    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// The calendar date this subscriber was mounted on; also the lower
    /// bound of its live query.
    pub fn today(&self) -> NaiveDate {
        self.today
    }

    /// Terminate the subscription. Dropping the subscriber has the same
    /// effect; either way the teardown hook runs exactly once.
    pub fn unmount(mut self) {
        self.subscription.cancel();
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::{Arc, Mutex};

    use chrono::Utc;
    use serde_json::json;
    use tokio::sync::mpsc;
    use uuid::Uuid;

    use super::*;
    use crate::domain::ports::Teardown;

    /// Feed double: hands the test a sender for the subscription it creates
    /// and counts teardown invocations.
    #[derive(Default)]
    struct ScriptedFeed {
        sender: Mutex<Option<mpsc::UnboundedSender<FeedEvent>>>,
        subscribed_from: Mutex<Option<NaiveDate>>,
        teardowns: Arc<AtomicUsize>,
    }

    impl ScriptedFeed {
        fn emit(&self, event: FeedEvent) {
            self.sender
                .lock()
                .unwrap()
                .as_ref()
                .expect("no active subscription")
                .send(event)
                .expect("subscriber gone");
        }

        fn close(&self) {
            self.sender.lock().unwrap().take();
        }

        fn teardown_count(&self) -> usize {
            self.teardowns.load(Ordering::SeqCst)
        }
    }

    impl BookingFeed for ScriptedFeed {
        fn subscribe(&self, from: NaiveDate) -> Result<FeedSubscription, DomainError> {
            let (tx, rx) = mpsc::unbounded_channel();
            *self.sender.lock().unwrap() = Some(tx);
            *self.subscribed_from.lock().unwrap() = Some(from);
            let count = Arc::clone(&self.teardowns);
            Ok(FeedSubscription::new(
                rx,
                Teardown::new(move || {
                    count.fetch_add(1, Ordering::SeqCst);
                }),
            ))
        }
    }

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

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 8, 7).unwrap()
    }

    #[tokio::test]
    async fn snapshots_replace_the_list_wholesale() {
        let feed = ScriptedFeed::default();
        let mut subscriber = BookingFeedSubscriber::mount_on(&feed, today()).unwrap();

        assert!(subscriber.is_loading());
        assert!(subscriber.bookings().is_empty());

        feed.emit(FeedEvent::Snapshot(vec![booking(1)]));
        subscriber.next_snapshot().await.unwrap();
        assert!(!subscriber.is_loading());
        assert_eq!(subscriber.bookings().len(), 1);

        feed.emit(FeedEvent::Snapshot(vec![booking(2), booking(3)]));
        subscriber.next_snapshot().await.unwrap();
        assert_eq!(subscriber.bookings().len(), 2);

        feed.emit(FeedEvent::Snapshot(vec![]));
        subscriber.next_snapshot().await.unwrap();
        assert!(subscriber.bookings().is_empty());
        assert!(!subscriber.is_loading());

        subscriber.unmount();
        assert_eq!(feed.teardown_count(), 1);
    }

    #[tokio::test]
    async fn error_clears_loading_and_preserves_last_list() {
        let feed = ScriptedFeed::default();
        let mut subscriber = BookingFeedSubscriber::mount_on(&feed, today()).unwrap();

        feed.emit(FeedEvent::Snapshot(vec![booking(10)]));
        subscriber.next_snapshot().await.unwrap();

        feed.emit(FeedEvent::Error("connection reset".to_string()));
        feed.close();

        // The error is swallowed; recv ends with the channel.
        assert!(subscriber.next_snapshot().await.is_none());
        assert!(!subscriber.is_loading());
        assert_eq!(subscriber.bookings().len(), 1);
    }

    #[tokio::test]
    async fn error_before_first_snapshot_clears_loading() {
        let feed = ScriptedFeed::default();
        let mut subscriber = BookingFeedSubscriber::mount_on(&feed, today()).unwrap();

        feed.emit(FeedEvent::Error("boom".to_string()));
        feed.close();

        assert!(subscriber.next_snapshot().await.is_none());
        assert!(!subscriber.is_loading());
        assert!(subscriber.bookings().is_empty());
    }

    #[tokio::test]
    async fn mount_date_is_the_query_lower_bound() {
        let feed = ScriptedFeed::default();
        let subscriber = BookingFeedSubscriber::mount_on(&feed, today()).unwrap();

        assert_eq!(subscriber.today(), today());
        assert_eq!(*feed.subscribed_from.lock().unwrap(), Some(today()));
    }

    #[tokio::test]
    async fn dropping_without_explicit_unmount_still_tears_down_once() {
        let feed = ScriptedFeed::default();
        let subscriber = BookingFeedSubscriber::mount_on(&feed, today()).unwrap();

        drop(subscriber);
        assert_eq!(feed.teardown_count(), 1);
    }
}
