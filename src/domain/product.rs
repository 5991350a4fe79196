use bigdecimal::BigDecimal;
use chrono::{DateTime, Utc};
use uuid::Uuid;

#[derive(Debug, Clone)]
pub struct ProductInput {
    pub nombre: String,
    pub precio_diario: BigDecimal,
    /// Commission percentage (0–100). Callers that omit it get 0.
    pub comision: BigDecimal,
}

#[derive(Debug, Clone)]
pub struct ProductView {
    pub id: Uuid,
    pub nombre: String,
    pub precio_diario: BigDecimal,
    pub comision: BigDecimal,
    pub created_at: DateTime<Utc>,
}
