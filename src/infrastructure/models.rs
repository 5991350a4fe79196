use bigdecimal::BigDecimal;
use chrono::{DateTime, NaiveDate, Utc};
use diesel::prelude::*;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

use crate::schema::{booking_items, bookings, products};

#[derive(Debug, Clone, Serialize, Deserialize, Queryable, Selectable, Identifiable)]
#[diesel(table_name = products)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct ProductRow {
    pub id: Uuid,
    pub nombre: String,
    pub precio_diario: BigDecimal,
    pub comision: BigDecimal,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Insertable)]
#[diesel(table_name = products)]
pub struct NewProductRow {
    pub id: Uuid,
    pub nombre: String,
    pub precio_diario: BigDecimal,
    pub comision: BigDecimal,
}

#[derive(Debug, Clone, Serialize, Deserialize, Queryable, Selectable, Identifiable)]
#[diesel(table_name = bookings)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct BookingRow {
    pub id: Uuid,
    pub fecha_inicio: NaiveDate,
    pub estado: String,
    pub detalles: Value,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Insertable)]
#[diesel(table_name = bookings)]
pub struct NewBookingRow {
    pub id: Uuid,
    pub fecha_inicio: NaiveDate,
    pub estado: String,
    pub detalles: Value,
}

#[derive(
    Debug, Clone, Serialize, Deserialize, Queryable, Selectable, Identifiable, Associations,
)]
#[diesel(table_name = booking_items)]
#[diesel(belongs_to(BookingRow, foreign_key = booking_id))]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct BookingItemRow {
    pub id: Uuid,
    pub booking_id: Uuid,
    pub producto_id: Uuid,
    pub cantidad: i32,
    pub duracion: i32,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Insertable)]
#[diesel(table_name = booking_items)]
pub struct NewBookingItemRow {
    pub id: Uuid,
    pub booking_id: Uuid,
    pub producto_id: Uuid,
    pub cantidad: i32,
    pub duracion: i32,
}
