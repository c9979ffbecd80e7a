//! Price calculator command.

use anyhow::Result;
use swag_commerce::pricing::{PriceQuote, TierRow};

use super::{find_product, PriceArgs};
use crate::context::Context;
use crate::output::money;

/// Run the price command.
///
/// Works like the calculator on the product page: the quantity is clamped
/// into `1..=stock` before pricing.
pub fn run(args: PriceArgs, ctx: &Context) -> Result<()> {
    let catalog = ctx.catalog()?;
    let product = find_product(&catalog, args.id)?;

    let quote = PriceQuote::for_product(product, args.qty);
    let tiers = TierRow::table(product, quote.quantity);

    if ctx.output.is_json() {
        ctx.output.json(&serde_json::json!({
            "productId": product.id,
            "quote": quote,
            "tiers": tiers,
        }));
        return Ok(());
    }

    if args.qty < 1 {
        ctx.output.warn("Cantidad mínima: 1");
    } else if quote.quantity < args.qty {
        ctx.output.warn(&format!(
            "Cantidad ajustada a {} (stock disponible: {})",
            quote.quantity, product.stock
        ));
    }

    ctx.output.header(&format!("{} ({})", product.name, product.sku));
    ctx.output.kv("Cantidad", &quote.quantity.to_string());
    ctx.output.kv("Precio unitario", &money(quote.unit_price));
    ctx.output.kv("Total", &money(quote.total));
    if quote.has_discount() {
        ctx.output.kv(
            "Ahorro",
            &format!(
                "{} ({:.1}%)",
                quote.savings().display(),
                quote.discount_percent
            ),
        );
    }

    if !tiers.is_empty() {
        ctx.output.header("Escalas");
        for tier in &tiers {
            let marker = if tier.applied {
                "◀ aplicada"
            } else if tier.reached {
                "alcanzada"
            } else {
                ""
            };
            ctx.output.list_item(
                format!("{}+ u.: {} {}", tier.min_qty, tier.price.display(), marker).trim_end(),
            );
        }
    }

    Ok(())
}
