//! Storefront domain logic for the swag shop.
//!
//! This crate holds everything the storefront UI calls into:
//!
//! - **Catalog**: Products with quantity price breaks, stock and variants
//! - **Pricing**: Tiered unit-price selection and the price calculator
//! - **Cart**: Line items keyed by product and variant, persisted locally
//! - **Search**: Catalog filtering and sorting
//! - **Quote**: Quote and order messages handed off to a mail client
//!
//! # Example
//!
//! ```rust,ignore
//! use swag_commerce::prelude::*;
//! use swag_cache::MemoryStore;
//!
//! let mut cart = CartStore::open(KvCartPersistence::new(MemoryStore::new()));
//!
//! // Price 25 mugs against the product's tiers, then add them
//! let unit = effective_unit_price(product.base_price, &product.price_breaks, 25)?;
//! cart.add_item(&product, 25, VariantSelection::color("rojo"), Some(unit));
//!
//! println!("{} items, total {}", cart.count(), cart.total());
//! ```

pub mod error;
pub mod ids;
pub mod money;

pub mod cart;
pub mod catalog;
pub mod pricing;
pub mod quote;
pub mod search;

pub use error::CommerceError;
pub use ids::*;
pub use money::Money;

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::error::CommerceError;
    pub use crate::ids::*;
    pub use crate::money::Money;

    // Catalog
    pub use crate::catalog::{
        Catalog, CategoryFacet, PriceBreak, Product, ProductStatus, StockLevel, SupplierFacet,
    };

    // Pricing
    pub use crate::pricing::{
        applicable_break, discount_percent, effective_unit_price, effective_unit_price_clamped,
        PriceQuote, TierRow,
    };

    // Cart
    pub use crate::cart::{
        CartEvent, CartLineItem, CartPersistence, CartStore, CartSummary, KvCartPersistence,
        LineKey, SharedCartStore, VariantSelection, CART_STORAGE_KEY,
    };

    // Search
    pub use crate::search::{CatalogQuery, SortOption};

    // Quote
    pub use crate::quote::{CustomerDetails, MailMessage, OrderRequest, QuoteRequest};
}
