use chrono::{DateTime, NaiveDate, Utc};
use serde_json::Value;
use uuid::Uuid;

#[derive(Debug, Clone)]
pub struct BookingItemInput {
    pub producto_id: Uuid,
    pub cantidad: i32,
    pub duracion: i32,
}

#[derive(Debug, Clone)]
pub struct BookingInput {
    pub fecha_inicio: NaiveDate,
    /// Free-form booking document carried through verbatim (customer data,
    /// delivery notes, whatever the portal attaches).
    pub detalles: Value,
    pub items: Vec<BookingItemInput>,
}

#[derive(Debug, Clone)]
pub struct BookingItemView {
    pub id: Uuid,
    pub producto_id: Uuid,
    pub cantidad: i32,
    pub duracion: i32,
}

#[derive(Debug, Clone)]
pub struct BookingView {
    pub id: Uuid,
    pub fecha_inicio: NaiveDate,
    pub estado: String,
    pub detalles: Value,
    pub created_at: DateTime<Utc>,
    pub items: Vec<BookingItemView>,
}
