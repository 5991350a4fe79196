use bigdecimal::{BigDecimal, Zero};
use chrono::NaiveDate;
use uuid::Uuid;

use crate::domain::booking::{BookingInput, BookingView};
use crate::domain::commission;
use crate::domain::errors::DomainError;
use crate::domain::ports::RentalStore;
use crate::domain::product::{ProductInput, ProductView};

/// Application facade over the injected store client.
#[derive(Clone)]
pub struct RentalService<S> {
    store: S,
}

impl<S: RentalStore> RentalService<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn create_product(&self, input: ProductInput) -> Result<Uuid, DomainError> {
        if input.nombre.trim().is_empty() {
            return Err(DomainError::InvalidInput(
                "nombre must not be empty".to_string(),
            ));
        }
        if input.precio_diario < BigDecimal::zero() {
            return Err(DomainError::InvalidInput(
                "precio_diario must not be negative".to_string(),
            ));
        }
        if input.comision < BigDecimal::zero() || input.comision > BigDecimal::from(100) {
            return Err(DomainError::InvalidInput(
                "comision must be between 0 and 100".to_string(),
            ));
        }
        self.store.create_product(input)
    }

    pub fn list_products(&self) -> Result<Vec<ProductView>, DomainError> {
        self.store.list_products()
    }

    pub fn create_booking(&self, input: BookingInput) -> Result<Uuid, DomainError> {
        if input.items.is_empty() {
            return Err(DomainError::InvalidInput(
                "a booking needs at least one item".to_string(),
            ));
        }
        for item in &input.items {
            if item.cantidad < 1 {
                return Err(DomainError::InvalidInput(
                    "cantidad must be a positive integer".to_string(),
                ));
            }
            if item.duracion < 1 {
                return Err(DomainError::InvalidInput(
                    "duracion must be a positive integer".to_string(),
                ));
            }
        }
        self.store.create_booking(input)
    }

    pub fn get_booking(&self, id: Uuid) -> Result<BookingView, DomainError> {
        self.store.find_booking(id)?.ok_or(DomainError::NotFound)
    }

    pub fn upcoming_bookings(&self, from: NaiveDate) -> Result<Vec<BookingView>, DomainError> {
        self.store.list_bookings_from(from)
    }

    /// Total commission for a booking. Items whose product no longer exists
    /// in the catalog contribute zero (the calculator's documented policy).
    pub fn booking_commission(&self, id: Uuid) -> Result<BigDecimal, DomainError> {
        let booking = self.get_booking(id)?;
        let ids: Vec<Uuid> = booking.items.iter().map(|item| item.producto_id).collect();
        let products = self.store.products_by_ids(&ids)?;
        Ok(commission::booking_commission(&booking.items, &products))
    }
}
