use std::collections::HashMap;

use chrono::NaiveDate;
use tokio::sync::mpsc;
use uuid::Uuid;

use super::booking::{BookingInput, BookingView};
use super::errors::DomainError;
use super::product::{ProductInput, ProductView};

/// Store-client capability for the rental catalog and bookings.
///
/// Handlers and services only ever see this trait; the concrete client is
/// injected at server construction so the core stays testable without a
/// real database.
pub trait RentalStore: Send + Sync + 'static {
    fn create_product(&self, input: ProductInput) -> Result<Uuid, DomainError>;
    fn list_products(&self) -> Result<Vec<ProductView>, DomainError>;
    fn products_by_ids(&self, ids: &[Uuid]) -> Result<HashMap<Uuid, ProductView>, DomainError>;
    fn create_booking(&self, input: BookingInput) -> Result<Uuid, DomainError>;
    fn find_booking(&self, id: Uuid) -> Result<Option<BookingView>, DomainError>;
    /// Bookings with `fecha_inicio >= from`, ordered ascending by start date.
    fn list_bookings_from(&self, from: NaiveDate) -> Result<Vec<BookingView>, DomainError>;
}

/// Live-query port: push-based snapshots of upcoming bookings.
pub trait BookingFeed: Send + Sync + 'static {
    /// Open a live query over bookings with `fecha_inicio >= from`. The
    /// returned subscription yields the initial result set followed by a
    /// fresh snapshot whenever matching data changes.
    fn subscribe(&self, from: NaiveDate) -> Result<FeedSubscription, DomainError>;
}

/// One emission of the live query.
#[derive(Debug, Clone)]
pub enum FeedEvent {
    /// Full replacement result set, ordered ascending by `fecha_inicio`.
    Snapshot(Vec<BookingView>),
    /// The underlying query failed; the previous result set stays valid.
    Error(String),
}

/// Teardown hook for a live subscription. The hook runs exactly once:
/// explicit `fire` calls after the first are no-ops, and dropping an
/// unfired handle fires it, so a subscription that never saw an event is
/// still cleaned up.
pub struct Teardown {
    hook: Option<Box<dyn FnOnce() + Send>>,
}

impl Teardown {
    pub fn new(hook: impl FnOnce() + Send + 'static) -> Self {
        Self {
            hook: Some(Box::new(hook)),
        }
    }

    pub fn fire(&mut self) {
        if let Some(hook) = self.hook.take() {
            hook();
        }
    }
}

impl Drop for Teardown {
    fn drop(&mut self) {
        self.fire();
    }
}

impl std::fmt::Debug for Teardown {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Teardown")
            .field("fired", &self.hook.is_none())
            .finish()
    }
}

/// A live subscription handed out by a [`BookingFeed`].
#[derive(Debug)]
pub struct FeedSubscription {
    events: mpsc::UnboundedReceiver<FeedEvent>,
    teardown: Teardown,
}

impl FeedSubscription {
    pub fn new(events: mpsc::UnboundedReceiver<FeedEvent>, teardown: Teardown) -> Self {
        Self { events, teardown }
    }

    /// Next event in emission order; `None` once the publisher is gone.
    pub async fn recv(&mut self) -> Option<FeedEvent> {
        self.events.recv().await
    }

    /// Stop the subscription. Safe to call more than once; dropping the
    /// subscription without calling this has the same effect.
    pub fn cancel(&mut self) {
        self.teardown.fire();
    }
}
