//! Catalog browsing commands.

use anyhow::{bail, Result};
use swag_commerce::catalog::{Catalog, Product};
use swag_commerce::pricing::TierRow;
use swag_commerce::search::{CatalogQuery, SortOption};
use swag_commerce::Money;

use super::{find_product, CatalogArgs, CatalogCommand};
use crate::context::Context;
use crate::output::{money, status_badge, stock_badge};

/// Run the catalog command.
pub fn run(args: CatalogArgs, ctx: &Context) -> Result<()> {
    let catalog = ctx.catalog()?;

    match args.command {
        CatalogCommand::List {
            category,
            supplier,
            search,
            min,
            max,
            sort,
        } => {
            let Some(sort) = SortOption::from_str(&sort) else {
                bail!("Orden desconocido '{}'. Usa name, price o stock.", sort);
            };
            let query = CatalogQuery::new()
                .with_category(category.as_deref().unwrap_or("all"))
                .with_supplier(supplier.as_deref().unwrap_or("all"))
                .with_text(search.as_deref().unwrap_or(""))
                .with_price_range(min.map(Money::new), max.map(Money::new))
                .with_sort(sort);
            list_products(&catalog, &query, ctx)
        }
        CatalogCommand::Show { id } => show_product(find_product(&catalog, id)?, ctx),
    }
}

fn list_products(catalog: &Catalog, query: &CatalogQuery, ctx: &Context) -> Result<()> {
    let results = catalog.search(query);

    if ctx.output.is_json() {
        ctx.output.json(&serde_json::json!({
            "query": query,
            "products": results,
            "suppliers": Catalog::supplier_counts(results.iter().copied()),
        }));
        return Ok(());
    }

    ctx.output.header(&format!(
        "Catálogo ({} de {} productos, {})",
        results.len(),
        catalog.len(),
        query.sort.display_name()
    ));

    if results.is_empty() {
        ctx.output.info("No hay productos que coincidan con los filtros.");
        return Ok(());
    }

    let widths = [5, 10, 28, 10, 12];
    ctx.output
        .table_row(&["ID", "SKU", "Producto", "Desde", "Stock"], &widths);
    for product in &results {
        let from = product
            .best_tier()
            .map(|tier| tier.price)
            .unwrap_or(product.base_price);
        ctx.output.table_row(
            &[
                &product.id.to_string(),
                &product.sku,
                &product.name,
                &from.display(),
                &product.stock_level().label(),
            ],
            &widths,
        );
    }

    let suppliers = Catalog::supplier_counts(results.iter().copied());
    if !suppliers.is_empty() {
        ctx.output.header("Proveedores");
        for facet in suppliers {
            ctx.output
                .list_item(&format!("{} ({})", facet.supplier, facet.count));
        }
    }

    Ok(())
}

fn show_product(product: &Product, ctx: &Context) -> Result<()> {
    if ctx.output.is_json() {
        ctx.output.json(&serde_json::json!({
            "product": product,
            "tiers": TierRow::table(product, 1),
        }));
        return Ok(());
    }

    ctx.output.header(&product.name);
    ctx.output.kv("SKU", &product.sku);
    if !product.category.as_str().is_empty() {
        ctx.output.kv("Categoría", product.category.as_str());
    }
    if let Some(supplier) = &product.supplier {
        ctx.output.kv("Proveedor", supplier.as_str());
    }
    ctx.output.kv("Estado", &status_badge(product.status));
    ctx.output.kv("Stock", &stock_badge(product.stock_level()));
    ctx.output.kv("Precio base", &money(product.base_price));
    if !product.colors.is_empty() {
        ctx.output.kv("Colores", &product.colors.join(", "));
    }
    if !product.sizes.is_empty() {
        ctx.output.kv("Tallas", &product.sizes.join(", "));
    }
    if let Some(description) = &product.description {
        ctx.output.line("");
        ctx.output.line(description);
    }

    let tiers = TierRow::table(product, 1);
    if !tiers.is_empty() {
        ctx.output.header("Descuentos por volumen");
        for tier in tiers {
            let discount = tier
                .discount
                .map(|d| format!(" (-{:.0}%)", d))
                .unwrap_or_default();
            ctx.output.list_item(&format!(
                "{}+ u.: {}{}",
                tier.min_qty,
                tier.price.display(),
                discount
            ));
        }
    }

    Ok(())
}
