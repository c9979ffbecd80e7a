//! Catalog query builder.

use crate::catalog::Product;
use crate::ids::{CategoryId, SupplierId};
use crate::money::Money;
use crate::search::fold;
use serde::{Deserialize, Serialize};

/// Sort options for the product list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum SortOption {
    /// Name A-Z, ignoring case and accents.
    #[default]
    Name,
    /// Base price, low to high.
    Price,
    /// Stock, high to low.
    Stock,
}

impl SortOption {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortOption::Name => "name",
            SortOption::Price => "price",
            SortOption::Stock => "stock",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "name" => Some(SortOption::Name),
            "price" => Some(SortOption::Price),
            "stock" => Some(SortOption::Stock),
            _ => None,
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            SortOption::Name => "Nombre (A-Z)",
            SortOption::Price => "Precio: menor a mayor",
            SortOption::Stock => "Stock disponible",
        }
    }
}

/// Filters and ordering for the product list.
///
/// Every filter is optional; an unset filter lets everything through. The
/// string builders treat `""` and `"all"` as "no filter", matching what the
/// list's select boxes send.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CatalogQuery {
    pub category: Option<CategoryId>,
    pub supplier: Option<SupplierId>,
    /// Matched against name or SKU, case- and accent-insensitive.
    pub text: Option<String>,
    /// Inclusive lower bound on the base price.
    pub min_price: Option<Money>,
    /// Inclusive upper bound on the base price.
    pub max_price: Option<Money>,
    pub sort: SortOption,
}

impl CatalogQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_category(mut self, category: &str) -> Self {
        self.category = selection(category).map(CategoryId::from);
        self
    }

    pub fn with_supplier(mut self, supplier: &str) -> Self {
        self.supplier = selection(supplier).map(SupplierId::from);
        self
    }

    pub fn with_text(mut self, text: &str) -> Self {
        let text = text.trim();
        self.text = (!text.is_empty()).then(|| text.to_string());
        self
    }

    pub fn with_price_range(mut self, min: Option<Money>, max: Option<Money>) -> Self {
        self.min_price = min;
        self.max_price = max;
        self
    }

    pub fn with_sort(mut self, sort: SortOption) -> Self {
        self.sort = sort;
        self
    }

    /// Check if `product` passes every filter.
    pub fn matches(&self, product: &Product) -> bool {
        if self
            .category
            .as_ref()
            .is_some_and(|category| &product.category != category)
        {
            return false;
        }

        if let Some(supplier) = &self.supplier {
            if product.supplier.as_ref() != Some(supplier) {
                return false;
            }
        }

        if let Some(text) = &self.text {
            let needle = fold(text);
            if !fold(&product.name).contains(&needle) && !fold(&product.sku).contains(&needle) {
                return false;
            }
        }

        if self.min_price.is_some_and(|min| product.base_price < min) {
            return false;
        }
        if self.max_price.is_some_and(|max| product.base_price > max) {
            return false;
        }

        true
    }

    /// Filter and sort `products`. Equal keys keep catalog order.
    pub fn apply<'a>(&self, products: &'a [Product]) -> Vec<&'a Product> {
        let mut results: Vec<&Product> = products.iter().filter(|p| self.matches(p)).collect();

        match self.sort {
            SortOption::Name => results.sort_by_cached_key(|p| fold(&p.name)),
            SortOption::Price => results.sort_by_key(|p| p.base_price),
            SortOption::Stock => results.sort_by(|a, b| b.stock.cmp(&a.stock)),
        }

        results
    }
}

fn selection(value: &str) -> Option<&str> {
    let value = value.trim();
    (!value.is_empty() && !value.eq_ignore_ascii_case("all")).then_some(value)
}
