//! Product catalog module.
//!
//! Contains products, price breaks, stock indicators and the static catalog.

mod catalog;
mod product;

pub use catalog::{Catalog, CategoryFacet, SupplierFacet};
pub use product::{PriceBreak, Product, ProductStatus, StockLevel, LOW_STOCK_THRESHOLD};
