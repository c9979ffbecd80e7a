//! Cart line items and their identity key.

use std::fmt;

use crate::catalog::Product;
use crate::ids::ProductId;
use crate::money::Money;
use serde::{Deserialize, Serialize};

/// Color and size chosen for a line.
///
/// `None` is a value of its own: a line without a color never matches a line
/// with one.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct VariantSelection {
    pub color: Option<String>,
    pub size: Option<String>,
}

impl VariantSelection {
    /// No color, no size.
    pub fn none() -> Self {
        Self::default()
    }

    /// Only a color.
    pub fn color(color: impl Into<String>) -> Self {
        Self {
            color: Some(color.into()),
            size: None,
        }
    }

    /// Only a size.
    pub fn size(size: impl Into<String>) -> Self {
        Self {
            color: None,
            size: Some(size.into()),
        }
    }

    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.color = Some(color.into());
        self
    }

    pub fn with_size(mut self, size: impl Into<String>) -> Self {
        self.size = Some(size.into());
        self
    }

    /// Build from optional parts, as collected from form fields or flags.
    pub fn from_parts(color: Option<String>, size: Option<String>) -> Self {
        Self { color, size }
    }

    pub fn is_empty(&self) -> bool {
        self.color.is_none() && self.size.is_none()
    }
}

/// Identity of a cart line: product plus exact variant selection.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LineKey {
    pub product_id: ProductId,
    pub variant: VariantSelection,
}

impl LineKey {
    pub fn new(product_id: impl Into<ProductId>, variant: VariantSelection) -> Self {
        Self {
            product_id: product_id.into(),
            variant,
        }
    }

    /// Key for a product with no variant selected.
    pub fn plain(product_id: impl Into<ProductId>) -> Self {
        Self::new(product_id, VariantSelection::none())
    }
}

impl fmt::Display for LineKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.product_id)?;
        match (&self.variant.color, &self.variant.size) {
            (None, None) => Ok(()),
            (Some(c), None) => write!(f, " [{}]", c),
            (None, Some(s)) => write!(f, " [{}]", s),
            (Some(c), Some(s)) => write!(f, " [{} / {}]", c, s),
        }
    }
}

/// A line in the cart: a product snapshot plus quantity and price.
///
/// Serializes as one flat record (product fields, then `quantity`,
/// `selectedColor`, `selectedSize`, `unitPrice`, `totalPrice`).
///
/// Fields are private so `total_price == unit_price * quantity` and
/// `quantity >= 1` hold for every value the store hands out.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CartLineItem {
    #[serde(flatten)]
    product: Product,
    quantity: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    selected_color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    selected_size: Option<String>,
    unit_price: Money,
    total_price: Money,
}

impl CartLineItem {
    /// Snapshot `product` into a new line. `quantity` is raised to 1 if lower.
    pub(crate) fn new(
        product: &Product,
        quantity: i64,
        variant: VariantSelection,
        unit_price: Money,
    ) -> Self {
        let quantity = quantity.max(1);
        Self {
            product: product.clone(),
            quantity,
            selected_color: variant.color,
            selected_size: variant.size,
            unit_price,
            total_price: unit_price.times(quantity),
        }
    }

    pub fn key(&self) -> LineKey {
        LineKey::new(
            self.product.id,
            VariantSelection::from_parts(self.selected_color.clone(), self.selected_size.clone()),
        )
    }

    /// Cheaper than building a [`LineKey`] for every comparison.
    pub fn matches(&self, key: &LineKey) -> bool {
        self.product.id == key.product_id
            && self.selected_color == key.variant.color
            && self.selected_size == key.variant.size
    }

    pub fn product(&self) -> &Product {
        &self.product
    }

    pub fn product_id(&self) -> ProductId {
        self.product.id
    }

    pub fn name(&self) -> &str {
        &self.product.name
    }

    pub fn quantity(&self) -> i64 {
        self.quantity
    }

    pub fn selected_color(&self) -> Option<&str> {
        self.selected_color.as_deref()
    }

    pub fn selected_size(&self) -> Option<&str> {
        self.selected_size.as_deref()
    }

    pub fn unit_price(&self) -> Money {
        self.unit_price
    }

    pub fn total_price(&self) -> Money {
        self.total_price
    }

    /// Merge an incoming add: quantities sum, the incoming price replaces the
    /// stored one.
    pub(crate) fn merge(&mut self, quantity: i64, unit_price: Money) {
        self.quantity = self.quantity.saturating_add(quantity);
        self.unit_price = unit_price;
        self.update_total();
    }

    /// Set the quantity, raising it to 1 if lower. The unit price is kept.
    pub(crate) fn set_quantity(&mut self, quantity: i64) {
        self.quantity = quantity.max(1);
        self.update_total();
    }

    /// Re-establish the line invariants after loading untrusted data.
    pub(crate) fn normalize(&mut self) {
        self.quantity = self.quantity.max(1);
        self.update_total();
    }

    fn update_total(&mut self) {
        self.total_price = self.unit_price.times(self.quantity);
    }
}
