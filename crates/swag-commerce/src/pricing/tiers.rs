//! Tiered quantity pricing.
//!
//! Price breaks are sorted ascending by `min_qty` with a stable sort and then
//! swept in order: every break whose `min_qty` is at most the quantity
//! replaces the running price, and the sweep stops at the first break above
//! it. Two consequences worth knowing:
//!
//! - A quantity below the smallest break (or no breaks at all) pays the base
//!   price. The smallest break is not applied by default.
//! - Breaks sharing a `min_qty` keep their input order after the stable
//!   sort, so the one listed last wins. This is a "last match wins" sweep,
//!   not a choice of the cheapest or dearest price.

use crate::catalog::PriceBreak;
use crate::error::CommerceError;
use crate::money::Money;

/// Find the break that applies to `quantity`, if any.
pub fn applicable_break(price_breaks: &[PriceBreak], quantity: i64) -> Option<&PriceBreak> {
    let mut sorted: Vec<&PriceBreak> = price_breaks.iter().collect();
    sorted.sort_by_key(|br| br.min_qty);

    let mut applied = None;
    for br in sorted {
        if quantity >= br.min_qty {
            applied = Some(br);
        } else {
            break;
        }
    }
    applied
}

/// Effective unit price for `quantity` units.
///
/// Returns [`CommerceError::InvalidQuantity`] when `quantity <= 0`. A zero or
/// negative `base_price` is passed through unchanged.
pub fn effective_unit_price(
    base_price: Money,
    price_breaks: &[PriceBreak],
    quantity: i64,
) -> Result<Money, CommerceError> {
    if quantity <= 0 {
        return Err(CommerceError::InvalidQuantity(quantity));
    }
    Ok(applicable_break(price_breaks, quantity)
        .map(|br| br.price)
        .unwrap_or(base_price))
}

/// Like [`effective_unit_price`], but a non-positive quantity is priced as 1.
pub fn effective_unit_price_clamped(
    base_price: Money,
    price_breaks: &[PriceBreak],
    quantity: i64,
) -> Money {
    applicable_break(price_breaks, quantity.max(1))
        .map(|br| br.price)
        .unwrap_or(base_price)
}

/// Discount of `effective_price` against `base_price`, in percent.
///
/// `((base*q - effective*q) / (base*q)) * 100`, or `0.0` when `base*q` is 0.
pub fn discount_percent(base_price: Money, effective_price: Money, quantity: i64) -> f64 {
    let base_total = base_price.to_f64() * quantity as f64;
    if base_total == 0.0 {
        return 0.0;
    }
    let effective_total = effective_price.to_f64() * quantity as f64;
    ((base_total - effective_total) / base_total) * 100.0
}
