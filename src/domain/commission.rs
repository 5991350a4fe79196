use std::collections::HashMap;

use bigdecimal::{BigDecimal, RoundingMode, Zero};
use uuid::Uuid;

use super::booking::BookingItemView;
use super::product::ProductView;

/// Commission owed for a single booking line:
/// `precio_diario × cantidad × duracion × (comision / 100)`.
///
/// Pure arithmetic over exact decimals; inputs are not validated, callers
/// are expected to supply non-negative values.
pub fn item_commission(
    precio_diario: &BigDecimal,
    cantidad: i32,
    duracion: i32,
    comision: &BigDecimal,
) -> BigDecimal {
    let units = BigDecimal::from(i64::from(cantidad) * i64::from(duracion));
    precio_diario * units * comision / BigDecimal::from(100)
}

/// Total commission for a booking's lines.
///
/// Each line is resolved through `products`; a `producto_id` that is absent
/// from the map contributes zero and is skipped silently. This is a
/// deliberate permissive policy: callers needing strict validation must
/// pre-check product existence themselves. No rounding is applied here,
/// display formatting is a separate concern.
pub fn booking_commission(
    items: &[BookingItemView],
    products: &HashMap<Uuid, ProductView>,
) -> BigDecimal {
    items
        .iter()
        .fold(BigDecimal::zero(), |total, item| {
            match products.get(&item.producto_id) {
                Some(product) => {
                    total
                        + item_commission(
                            &product.precio_diario,
                            item.cantidad,
                            item.duracion,
                            &product.comision,
                        )
                }
                None => total,
            }
        })
}

/// Render an amount with Spanish/Euro conventions: `.` as thousands
/// separator, `,` as decimal separator, two decimals (half-up), trailing
/// `€` — e.g. `1234.5` becomes `"1.234,50 €"`.
pub fn format_eur(amount: &BigDecimal) -> String {
    let rounded = amount.with_scale_round(2, RoundingMode::HalfUp);
    let repr = rounded.to_string();
    let (negative, unsigned) = match repr.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, repr.as_str()),
    };
    let (integer, decimals) = unsigned.split_once('.').unwrap_or((unsigned, "00"));

    let mut grouped = String::with_capacity(integer.len() + integer.len() / 3);
    for (offset, digit) in integer.chars().enumerate() {
        if offset > 0 && (integer.len() - offset) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(digit);
    }

    let sign = if negative { "-" } else { "" };
    format!("{sign}{grouped},{decimals} €")
}
