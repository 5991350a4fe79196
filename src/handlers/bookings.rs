use actix_web::{web, HttpResponse};
use chrono::{Local, NaiveDate};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::domain::booking::{BookingInput, BookingItemInput, BookingView};
use crate::domain::commission;
use crate::errors::AppError;
use crate::AppService;

// ── Request / response DTOs ──────────────────────────────────────────────────

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateBookingItemRequest {
    pub producto_id: Uuid,
    pub cantidad: i32,
    /// Number of rental periods (days) the item is booked for
    pub duracion: i32,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateBookingRequest {
    /// Start date in ISO `yyyy-MM-dd` form, e.g. "2026-09-01"
    pub fecha_inicio: NaiveDate,
    /// Free-form booking document (customer data, delivery notes); stored
    /// and returned verbatim
    #[schema(value_type = Object)]
    pub detalles: Option<Value>,
    pub items: Vec<CreateBookingItemRequest>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct CreateBookingResponse {
    pub id: Uuid,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct BookingItemResponse {
    pub id: Uuid,
    pub producto_id: Uuid,
    pub cantidad: i32,
    pub duracion: i32,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct BookingResponse {
    pub id: Uuid,
    pub fecha_inicio: NaiveDate,
    pub estado: String,
    #[schema(value_type = Object)]
    pub detalles: Value,
    pub created_at: String,
    pub items: Vec<BookingItemResponse>,
}

impl From<BookingView> for BookingResponse {
    fn from(b: BookingView) -> Self {
        BookingResponse {
            id: b.id,
            fecha_inicio: b.fecha_inicio,
            estado: b.estado,
            detalles: b.detalles,
            created_at: b.created_at.to_rfc3339(),
            items: b
                .items
                .into_iter()
                .map(|item| BookingItemResponse {
                    id: item.id,
                    producto_id: item.producto_id,
                    cantidad: item.cantidad,
                    duracion: item.duracion,
                })
                .collect(),
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct UpcomingBookingsResponse {
    /// The `yyyy-MM-dd` lower bound the listing was filtered with
    pub today: NaiveDate,
    pub bookings: Vec<BookingResponse>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct CommissionResponse {
    pub booking_id: Uuid,
    /// Exact decimal amount, unrounded
    pub total: String,
    /// Spanish/Euro presentation, e.g. "1.234,50 €"
    pub formatted: String,
}

// ── Handlers ─────────────────────────────────────────────────────────────────

/// POST /bookings
///
/// Creates a booking together with its line items in a single transaction;
/// live feed subscribers receive a fresh snapshot once the write commits.
#[utoipa::path(
    post,
    path = "/bookings",
    request_body = CreateBookingRequest,
    responses(
        (status = 201, description = "Booking created successfully", body = CreateBookingResponse),
        (status = 400, description = "Invalid booking data"),
        (status = 500, description = "Internal server error"),
    ),
    tag = "bookings"
)]
pub async fn create_booking(
    svc: web::Data<AppService>,
    body: web::Json<CreateBookingRequest>,
) -> Result<HttpResponse, AppError> {
    let body = body.into_inner();

    let input = BookingInput {
        fecha_inicio: body.fecha_inicio,
        detalles: body.detalles.unwrap_or_else(|| json!({})),
        items: body
            .items
            .into_iter()
            .map(|item| BookingItemInput {
                producto_id: item.producto_id,
                cantidad: item.cantidad,
                duracion: item.duracion,
            })
            .collect(),
    };

    let svc = svc.get_ref().clone();
    let id = web::block(move || svc.create_booking(input))
        .await
        .map_err(|e| AppError::Internal(e.to_string()))??;

    Ok(HttpResponse::Created().json(json!({ "id": id })))
}

/// GET /bookings/{id}
///
/// Returns the booking together with its line items.
#[utoipa::path(
    get,
    path = "/bookings/{id}",
    params(
        ("id" = Uuid, Path, description = "Booking UUID"),
    ),
    responses(
        (status = 200, description = "Booking found", body = BookingResponse),
        (status = 404, description = "Booking not found"),
        (status = 500, description = "Internal server error"),
    ),
    tag = "bookings"
)]
pub async fn get_booking(
    svc: web::Data<AppService>,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, AppError> {
    let booking_id = path.into_inner();

    let svc = svc.get_ref().clone();
    let booking = web::block(move || svc.get_booking(booking_id))
        .await
        .map_err(|e| AppError::Internal(e.to_string()))??;

    Ok(HttpResponse::Ok().json(BookingResponse::from(booking)))
}

/// GET /bookings/upcoming
///
/// One-shot variant of the live feed: bookings starting today or later,
/// ascending by start date.
#[utoipa::path(
    get,
    path = "/bookings/upcoming",
    responses(
        (status = 200, description = "Upcoming bookings", body = UpcomingBookingsResponse),
        (status = 500, description = "Internal server error"),
    ),
    tag = "bookings"
)]
pub async fn upcoming_bookings(svc: web::Data<AppService>) -> Result<HttpResponse, AppError> {
    let today = Local::now().date_naive();

    let svc = svc.get_ref().clone();
    let bookings = web::block(move || svc.upcoming_bookings(today))
        .await
        .map_err(|e| AppError::Internal(e.to_string()))??;

    Ok(HttpResponse::Ok().json(UpcomingBookingsResponse {
        today,
        bookings: bookings.into_iter().map(BookingResponse::from).collect(),
    }))
}

/// GET /bookings/{id}/commission
///
/// Total commission owed for the booking. Items whose product no longer
/// exists in the catalog contribute zero.
#[utoipa::path(
    get,
    path = "/bookings/{id}/commission",
    params(
        ("id" = Uuid, Path, description = "Booking UUID"),
    ),
    responses(
        (status = 200, description = "Commission computed", body = CommissionResponse),
        (status = 404, description = "Booking not found"),
        (status = 500, description = "Internal server error"),
    ),
    tag = "bookings"
)]
pub async fn booking_commission(
    svc: web::Data<AppService>,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, AppError> {
    let booking_id = path.into_inner();

    let svc = svc.get_ref().clone();
    let total = web::block(move || svc.booking_commission(booking_id))
        .await
        .map_err(|e| AppError::Internal(e.to_string()))??;

    Ok(HttpResponse::Ok().json(CommissionResponse {
        booking_id,
        formatted: commission::format_eur(&total),
        total: total.to_string(),
    }))
}
