use std::str::FromStr;

use actix_web::{web, HttpResponse};
use bigdecimal::{BigDecimal, Zero};
use serde::{Deserialize, Serialize};
use serde_json::json;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::domain::product::{ProductInput, ProductView};
use crate::errors::AppError;
use crate::AppService;

// ── Request / response DTOs ──────────────────────────────────────────────────

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateProductRequest {
    pub nombre: String,
    /// Decimal daily price as a string to avoid floating-point issues, e.g. "24.50"
    pub precio_diario: String,
    /// Commission percentage (0–100) as a decimal string; defaults to "0"
    pub comision: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct CreateProductResponse {
    pub id: Uuid,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ProductResponse {
    pub id: Uuid,
    pub nombre: String,
    pub precio_diario: String,
    pub comision: String,
    pub created_at: String,
}

impl From<ProductView> for ProductResponse {
    fn from(p: ProductView) -> Self {
        ProductResponse {
            id: p.id,
            nombre: p.nombre,
            precio_diario: p.precio_diario.to_string(),
            comision: p.comision.to_string(),
            created_at: p.created_at.to_rfc3339(),
        }
    }
}

fn parse_decimal(field: &str, value: &str) -> Result<BigDecimal, AppError> {
    BigDecimal::from_str(value)
        .map_err(|e| AppError::BadRequest(format!("Invalid {} '{}': {}", field, value, e)))
}

// ── Handlers ─────────────────────────────────────────────────────────────────

/// POST /products
///
/// Adds a product to the rental catalog.
#[utoipa::path(
    post,
    path = "/products",
    request_body = CreateProductRequest,
    responses(
        (status = 201, description = "Product created successfully", body = CreateProductResponse),
        (status = 400, description = "Invalid product data"),
        (status = 500, description = "Internal server error"),
    ),
    tag = "products"
)]
pub async fn create_product(
    svc: web::Data<AppService>,
    body: web::Json<CreateProductRequest>,
) -> Result<HttpResponse, AppError> {
    let body = body.into_inner();

    let precio_diario = parse_decimal("precio_diario", &body.precio_diario)?;
    let comision = match &body.comision {
        Some(raw) => parse_decimal("comision", raw)?,
        None => BigDecimal::zero(),
    };

    let svc = svc.get_ref().clone();
    let id = web::block(move || {
        svc.create_product(ProductInput {
            nombre: body.nombre,
            precio_diario,
            comision,
        })
    })
    .await
    .map_err(|e| AppError::Internal(e.to_string()))??;

    Ok(HttpResponse::Created().json(json!({ "id": id })))
}

/// GET /products
///
/// Returns the full rental catalog, ordered by name.
#[utoipa::path(
    get,
    path = "/products",
    responses(
        (status = 200, description = "Catalog listing", body = [ProductResponse]),
        (status = 500, description = "Internal server error"),
    ),
    tag = "products"
)]
pub async fn list_products(svc: web::Data<AppService>) -> Result<HttpResponse, AppError> {
    let svc = svc.get_ref().clone();
    let products = web::block(move || svc.list_products())
        .await
        .map_err(|e| AppError::Internal(e.to_string()))??;

    let response: Vec<ProductResponse> = products.into_iter().map(ProductResponse::from).collect();
    Ok(HttpResponse::Ok().json(response))
}
