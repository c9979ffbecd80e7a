//! Pricing engine.
//!
//! Pure functions mapping a base price, a set of quantity price breaks and a
//! quantity to an effective unit price, plus the calculator built on them.

mod calculator;
mod tiers;

pub use calculator::{PriceQuote, TierRow};
pub use tiers::{
    applicable_break, discount_percent, effective_unit_price, effective_unit_price_clamped,
};
