//! Product and price break types.

use crate::ids::{CategoryId, ProductId, SupplierId};
use crate::money::Money;
use serde::{Deserialize, Serialize};

/// Stock below this many units is shown as "low stock".
pub const LOW_STOCK_THRESHOLD: u32 = 10;

/// Product status in the catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ProductStatus {
    /// Product is on sale.
    #[default]
    Active,
    /// Product is listed but cannot be bought.
    Inactive,
    /// Product is awaiting restock or approval.
    Pending,
}

impl ProductStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProductStatus::Active => "active",
            ProductStatus::Inactive => "inactive",
            ProductStatus::Pending => "pending",
        }
    }

    /// Badge text shown on product cards.
    pub fn label(&self) -> &'static str {
        match self {
            ProductStatus::Active => "Disponible",
            ProductStatus::Inactive => "No disponible",
            ProductStatus::Pending => "Pendiente",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "active" => Some(ProductStatus::Active),
            "inactive" => Some(ProductStatus::Inactive),
            "pending" => Some(ProductStatus::Pending),
            _ => None,
        }
    }
}

/// Coarse stock indicator for listings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StockLevel {
    OutOfStock,
    /// Fewer than [`LOW_STOCK_THRESHOLD`] units.
    Low(u32),
    InStock(u32),
}

impl StockLevel {
    pub fn from_stock(stock: u32) -> Self {
        match stock {
            0 => StockLevel::OutOfStock,
            n if n < LOW_STOCK_THRESHOLD => StockLevel::Low(n),
            n => StockLevel::InStock(n),
        }
    }

    pub fn label(&self) -> String {
        match self {
            StockLevel::OutOfStock => "Sin stock".to_string(),
            StockLevel::Low(n) => format!("Stock bajo ({})", n),
            StockLevel::InStock(n) => format!("{} disponibles", n),
        }
    }
}

/// A quantity price break: from `min_qty` units on, each unit costs `price`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PriceBreak {
    /// Smallest quantity the break applies to.
    pub min_qty: i64,
    /// Unit price at this tier.
    pub price: Money,
    /// Advertised discount percentage, display only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub discount: Option<f64>,
}

impl PriceBreak {
    pub fn new(min_qty: i64, price: impl Into<Money>) -> Self {
        Self {
            min_qty,
            price: price.into(),
            discount: None,
        }
    }

    pub fn with_discount(mut self, percent: f64) -> Self {
        self.discount = Some(percent);
        self
    }
}

/// A product in the catalog.
///
/// Product data is static: the storefront never mutates it. Field names
/// serialize in camelCase so cart snapshots keep the stored layout.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    /// Unique product identifier.
    pub id: ProductId,
    /// Stock keeping unit.
    pub sku: String,
    /// Product name.
    pub name: String,
    /// Long description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Catalog category.
    pub category: CategoryId,
    /// Supplier, if known.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub supplier: Option<SupplierId>,
    /// Unit price at quantity 1 or below the smallest price break.
    pub base_price: Money,
    /// Quantity price breaks, in no particular order.
    #[serde(default)]
    pub price_breaks: Vec<PriceBreak>,
    /// Units in stock.
    #[serde(default)]
    pub stock: u32,
    /// Visibility status.
    #[serde(default)]
    pub status: ProductStatus,
    /// Available colors.
    #[serde(default)]
    pub colors: Vec<String>,
    /// Available sizes.
    #[serde(default)]
    pub sizes: Vec<String>,
}

impl Product {
    /// Create an active product with no breaks, stock or variants.
    pub fn new(
        id: impl Into<ProductId>,
        sku: impl Into<String>,
        name: impl Into<String>,
        base_price: impl Into<Money>,
    ) -> Self {
        Self {
            id: id.into(),
            sku: sku.into(),
            name: name.into(),
            description: None,
            category: CategoryId::default(),
            supplier: None,
            base_price: base_price.into(),
            price_breaks: Vec::new(),
            stock: 0,
            status: ProductStatus::Active,
            colors: Vec::new(),
            sizes: Vec::new(),
        }
    }

    pub fn with_category(mut self, category: impl Into<CategoryId>) -> Self {
        self.category = category.into();
        self
    }

    pub fn with_supplier(mut self, supplier: impl Into<SupplierId>) -> Self {
        self.supplier = Some(supplier.into());
        self
    }

    pub fn with_price_break(mut self, price_break: PriceBreak) -> Self {
        self.price_breaks.push(price_break);
        self
    }

    pub fn with_stock(mut self, stock: u32) -> Self {
        self.stock = stock;
        self
    }

    pub fn with_status(mut self, status: ProductStatus) -> Self {
        self.status = status;
        self
    }

    pub fn with_colors<I, S>(mut self, colors: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.colors = colors.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_sizes<I, S>(mut self, sizes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.sizes = sizes.into_iter().map(Into::into).collect();
        self
    }

    /// Check if the product can be added to a cart.
    pub fn is_purchasable(&self) -> bool {
        self.status == ProductStatus::Active && self.stock > 0
    }

    pub fn stock_level(&self) -> StockLevel {
        StockLevel::from_stock(self.stock)
    }

    /// The break with the largest `min_qty`, shown as "from N+ units".
    ///
    /// On duplicate `min_qty` the later break wins, consistent with
    /// [`crate::pricing::applicable_break`].
    pub fn best_tier(&self) -> Option<&PriceBreak> {
        self.price_breaks
            .iter()
            .fold(None, |best: Option<&PriceBreak>, br| match best {
                Some(b) if b.min_qty > br.min_qty => Some(b),
                _ => Some(br),
            })
    }

    /// Clamp a requested quantity into `1..=max(1, stock)`.
    pub fn clamp_quantity(&self, quantity: i64) -> i64 {
        let max = i64::from(self.stock.max(1));
        quantity.clamp(1, max)
    }

    /// First color, preselected on the detail view.
    pub fn default_color(&self) -> Option<&str> {
        self.colors.first().map(String::as_str)
    }

    /// First size, preselected on the detail view.
    pub fn default_size(&self) -> Option<&str> {
        self.sizes.first().map(String::as_str)
    }

    pub fn has_color(&self, color: &str) -> bool {
        self.colors.iter().any(|c| c == color)
    }

    pub fn has_size(&self, size: &str) -> bool {
        self.sizes.iter().any(|s| s == size)
    }
}
