//! Price calculator for the product detail view.

use crate::catalog::{PriceBreak, Product};
use crate::error::CommerceError;
use crate::money::Money;
use crate::pricing::{applicable_break, discount_percent};
use serde::Serialize;

/// Price of a given quantity of one product.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PriceQuote {
    /// Quantity priced.
    pub quantity: i64,
    /// Effective unit price.
    pub unit_price: Money,
    /// `unit_price * quantity`.
    pub total: Money,
    /// What the same quantity costs at the base price.
    pub base_total: Money,
    /// Discount against the base price, in percent.
    pub discount_percent: f64,
    /// The break that set the unit price, if any.
    pub applied_break: Option<PriceBreak>,
}

impl PriceQuote {
    /// Price `quantity` units against a base price and breaks.
    pub fn new(
        base_price: Money,
        price_breaks: &[PriceBreak],
        quantity: i64,
    ) -> Result<Self, CommerceError> {
        if quantity <= 0 {
            return Err(CommerceError::InvalidQuantity(quantity));
        }
        Ok(Self::build(base_price, price_breaks, quantity))
    }

    /// Price a product the way the calculator widget does: the requested
    /// quantity is first clamped into `1..=stock`.
    pub fn for_product(product: &Product, requested: i64) -> Self {
        let quantity = product.clamp_quantity(requested);
        Self::build(product.base_price, &product.price_breaks, quantity)
    }

    fn build(base_price: Money, price_breaks: &[PriceBreak], quantity: i64) -> Self {
        let applied_break = applicable_break(price_breaks, quantity).cloned();
        let unit_price = applied_break
            .as_ref()
            .map(|br| br.price)
            .unwrap_or(base_price);

        Self {
            quantity,
            unit_price,
            total: unit_price.times(quantity),
            base_total: base_price.times(quantity),
            discount_percent: discount_percent(base_price, unit_price, quantity),
            applied_break,
        }
    }

    /// Money saved against the base price.
    pub fn savings(&self) -> Money {
        self.base_total - self.total
    }

    /// Check if the quantity earns a discount.
    pub fn has_discount(&self) -> bool {
        self.discount_percent > 0.0
    }
}

/// One row of the volume-discount table.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TierRow {
    pub min_qty: i64,
    pub price: Money,
    pub discount: Option<f64>,
    /// The quantity reaches this tier.
    pub reached: bool,
    /// This tier sets the current unit price.
    pub applied: bool,
}

impl TierRow {
    /// Build the discount table for `product` at `quantity`, ascending by
    /// `min_qty`.
    pub fn table(product: &Product, quantity: i64) -> Vec<TierRow> {
        let applied = applicable_break(&product.price_breaks, quantity);
        let mut sorted: Vec<&PriceBreak> = product.price_breaks.iter().collect();
        sorted.sort_by_key(|br| br.min_qty);

        sorted
            .into_iter()
            .map(|br| TierRow {
                min_qty: br.min_qty,
                price: br.price,
                discount: br.discount,
                reached: quantity >= br.min_qty,
                applied: applied.is_some_and(|a| std::ptr::eq(a, br)),
            })
            .collect()
    }
}
