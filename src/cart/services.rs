use rust_decimal::Decimal;

use crate::cart::dto::CartResponse;
use crate::cart::repo_types::CartLine;

pub const MIN_QUANTITY: i32 = 1;

pub fn validate_quantity(quantity: i32) -> Result<i32, String> {
    if quantity < MIN_QUANTITY {
        return Err(format!("Quantity must be at least {MIN_QUANTITY}"));
    }
    Ok(quantity)
}

/// Σ quantity and Σ price × quantity over the lines.
pub fn totals(lines: &[CartLine]) -> (i64, Decimal) {
    lines.iter().fold((0, Decimal::ZERO), |(items, price), line| {
        let qty = line.item.quantity;
        (
            items + i64::from(qty),
            price + line.product.price * Decimal::from(qty),
        )
    })
}

pub fn summarize(lines: Vec<CartLine>) -> CartResponse {
    let (total_items, total_price) = totals(&lines);
    CartResponse {
        items: lines,
        total_items,
        total_price,
    }
}
