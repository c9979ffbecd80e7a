//! Catalog search.
//!
//! Filtering and sorting for the product list page.

mod normalize;
mod query;

pub use normalize::fold;
pub use query::{CatalogQuery, SortOption};
