//! In-memory product catalog.

use std::collections::BTreeMap;

use crate::catalog::Product;
use crate::error::CommerceError;
use crate::ids::{CategoryId, ProductId, SupplierId};
use crate::search::CatalogQuery;
use serde::Serialize;

/// Number of products in one category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryFacet {
    pub category: CategoryId,
    pub count: usize,
}

/// Number of products from one supplier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SupplierFacet {
    pub supplier: SupplierId,
    pub count: usize,
}

/// The static product list the storefront sells from.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    products: Vec<Product>,
}

impl Catalog {
    pub fn new(products: Vec<Product>) -> Self {
        Self { products }
    }

    /// Parse a JSON array of products.
    pub fn from_json(json: &str) -> Result<Self, CommerceError> {
        let products: Vec<Product> = serde_json::from_str(json)?;
        Ok(Self::new(products))
    }

    pub fn products(&self) -> &[Product] {
        &self.products
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    pub fn get(&self, id: ProductId) -> Option<&Product> {
        self.products.iter().find(|p| p.id == id)
    }

    /// Like [`Catalog::get`], for callers that treat a miss as an error.
    pub fn require(&self, id: ProductId) -> Result<&Product, CommerceError> {
        self.get(id)
            .ok_or_else(|| CommerceError::ProductNotFound(id.to_string()))
    }

    /// Filter and sort the catalog.
    pub fn search(&self, query: &CatalogQuery) -> Vec<&Product> {
        query.apply(&self.products)
    }

    /// Number of distinct categories.
    pub fn category_count(&self) -> usize {
        self.categories().len()
    }

    /// Product count per category, ordered by category slug.
    pub fn categories(&self) -> Vec<CategoryFacet> {
        let mut counts: BTreeMap<&CategoryId, usize> = BTreeMap::new();
        for product in &self.products {
            *counts.entry(&product.category).or_default() += 1;
        }
        counts
            .into_iter()
            .map(|(category, count)| CategoryFacet {
                category: category.clone(),
                count,
            })
            .collect()
    }

    /// Product count per supplier among `products`, ordered by supplier slug.
    ///
    /// Takes the product slice so the facet list can follow the current
    /// search results rather than the whole catalog.
    pub fn supplier_counts<'a, I>(products: I) -> Vec<SupplierFacet>
    where
        I: IntoIterator<Item = &'a Product>,
    {
        let mut counts: BTreeMap<&SupplierId, usize> = BTreeMap::new();
        for product in products {
            if let Some(supplier) = &product.supplier {
                *counts.entry(supplier).or_default() += 1;
            }
        }
        counts
            .into_iter()
            .map(|(supplier, count)| SupplierFacet {
                supplier: supplier.clone(),
                count,
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn catalog() -> Catalog {
        Catalog::new(vec![
            Product::new(1, "TAZ-001", "Taza", 3990)
                .with_category("tazas")
                .with_supplier("ceramica-sur"),
            Product::new(2, "POL-001", "Polera", 6990)
                .with_category("textil")
                .with_supplier("promo-chile"),
            Product::new(3, "GOR-001", "Gorro", 4990)
                .with_category("textil")
                .with_supplier("promo-chile"),
            Product::new(4, "LAP-001", "Lápiz", 490).with_category("oficina"),
        ])
    }

    #[test]
    fn test_get_and_require() {
        let catalog = catalog();
        assert_eq!(catalog.get(ProductId::new(2)).unwrap().sku, "POL-001");
        assert!(catalog.get(ProductId::new(99)).is_none());
        assert!(matches!(
            catalog.require(ProductId::new(99)),
            Err(CommerceError::ProductNotFound(_))
        ));
    }

    #[test]
    fn test_category_facets() {
        let catalog = catalog();
        assert_eq!(catalog.category_count(), 3);
        let textil = catalog
            .categories()
            .into_iter()
            .find(|f| f.category.as_str() == "textil")
            .unwrap();
        assert_eq!(textil.count, 2);
    }

    #[test]
    fn test_supplier_facets_skip_unknown_supplier() {
        let catalog = catalog();
        let facets = Catalog::supplier_counts(catalog.products());
        assert_eq!(
            facets,
            vec![
                SupplierFacet {
                    supplier: SupplierId::new("ceramica-sur"),
                    count: 1
                },
                SupplierFacet {
                    supplier: SupplierId::new("promo-chile"),
                    count: 2
                },
            ]
        );
    }

    #[test]
    fn test_from_json_rejects_garbage() {
        assert!(matches!(
            Catalog::from_json("not json"),
            Err(CommerceError::SerializationError(_))
        ));
    }
}
