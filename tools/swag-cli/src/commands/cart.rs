//! Cart commands.

use anyhow::{bail, Context as _, Result};
use dialoguer::Confirm;
use swag_commerce::cart::{CartEvent, LineKey};
use swag_commerce::pricing::effective_unit_price;
use swag_commerce::{CommerceError, ProductId};

use super::{find_product, validate_variant, CartArgs, CartCommand, VariantArgs};
use crate::context::{Context, FileCart};
use crate::output::money;

/// Run the cart command.
pub fn run(args: CartArgs, ctx: &Context) -> Result<()> {
    let mut cart = ctx.cart()?;
    ctx.output.debug(&format!(
        "Cart storage: {}",
        cart.persistence().store().path().display()
    ));

    match args.command.unwrap_or(CartCommand::Show) {
        CartCommand::Show => show_cart(&cart, ctx),
        CartCommand::Add {
            id,
            qty,
            variant,
            tiered,
        } => add_item(&mut cart, id, qty, &variant, tiered, ctx),
        CartCommand::Update { id, qty, variant } => {
            let key = line_key(ctx, id, &variant)?;
            match cart.update_quantity(&key, qty) {
                Some(event) => report(&event, &cart, ctx),
                None => bail!("No hay una línea {} en el carrito", key),
            }
        }
        CartCommand::Remove { id, variant } => {
            let key = line_key(ctx, id, &variant)?;
            match cart.remove_item(&key) {
                Some(event) => report(&event, &cart, ctx),
                None => bail!("No hay una línea {} en el carrito", key),
            }
        }
        CartCommand::Clear { yes } => clear_cart(&mut cart, yes, ctx),
    }
}

fn add_item(
    cart: &mut FileCart,
    id: u64,
    qty: i64,
    variant: &VariantArgs,
    tiered: bool,
    ctx: &Context,
) -> Result<()> {
    let catalog = ctx.catalog()?;
    let product = find_product(&catalog, id)?;

    if !product.is_purchasable() {
        return Err(CommerceError::NotPurchasable(product.name.clone()).into());
    }
    if qty < 1 {
        return Err(CommerceError::InvalidQuantity(qty).into());
    }

    let quantity = product.clamp_quantity(qty);
    if quantity < qty {
        ctx.output.warn(&format!(
            "Cantidad ajustada a {} (stock disponible: {})",
            quantity, product.stock
        ));
    }

    let selection = variant.resolve(product);
    validate_variant(product, &selection)?;

    let unit_price = if tiered {
        Some(effective_unit_price(
            product.base_price,
            &product.price_breaks,
            quantity,
        )?)
    } else {
        None
    };

    let event = added(cart.add_item(product, quantity, selection, unit_price))?;
    report(&event, cart, ctx)
}

fn added(event: Option<CartEvent>) -> Result<CartEvent> {
    event.context("No se agregó nada al carrito")
}

/// Key for a line, applying the product's preselected variant when the
/// product is still in the catalog.
fn line_key(ctx: &Context, id: u64, variant: &VariantArgs) -> Result<LineKey> {
    let catalog = ctx.catalog()?;
    let selection = match catalog.get(ProductId::new(id)) {
        Some(product) => variant.resolve(product),
        None => variant.exact(),
    };
    Ok(LineKey::new(id, selection))
}

fn clear_cart(cart: &mut FileCart, yes: bool, ctx: &Context) -> Result<()> {
    if cart.is_empty() {
        ctx.output.info("El carrito ya está vacío");
        return Ok(());
    }

    if !yes && !ctx.output.is_json() {
        let confirmed = Confirm::new()
            .with_prompt(format!("¿Vaciar el carrito ({} líneas)?", cart.line_count()))
            .default(false)
            .interact()?;

        if !confirmed {
            ctx.output.warn("Cancelado");
            return Ok(());
        }
    }

    let event = cart.clear();
    report(&event, cart, ctx)
}

fn report(event: &CartEvent, cart: &FileCart, ctx: &Context) -> Result<()> {
    if ctx.output.is_json() {
        ctx.output.json(&serde_json::json!({
            "event": event,
            "summary": cart.summary(),
        }));
        return Ok(());
    }

    ctx.output.success(&event.to_string());
    let summary = cart.summary();
    ctx.output.kv(
        "Carrito",
        &format!("{} u. en {} líneas, total {}", summary.count, summary.lines, money(summary.total)),
    );
    Ok(())
}

fn show_cart(cart: &FileCart, ctx: &Context) -> Result<()> {
    if ctx.output.is_json() {
        ctx.output.json(&serde_json::json!({
            "items": cart.items(),
            "summary": cart.summary(),
        }));
        return Ok(());
    }

    if cart.is_empty() {
        ctx.output.info("El carrito está vacío");
        return Ok(());
    }

    ctx.output.header(&format!("Carrito ({} ítems)", cart.count()));
    let widths = [5, 26, 14, 6, 10, 10];
    ctx.output.table_row(
        &["ID", "Producto", "Variante", "Cant.", "P. unit.", "Total"],
        &widths,
    );
    for line in cart.items() {
        let variant = [line.selected_color(), line.selected_size()]
            .into_iter()
            .flatten()
            .collect::<Vec<_>>()
            .join(" / ");
        ctx.output.table_row(
            &[
                &line.product_id().to_string(),
                line.name(),
                &variant,
                &line.quantity().to_string(),
                &line.unit_price().display(),
                &line.total_price().display(),
            ],
            &widths,
        );
    }
    ctx.output.kv("Total", &money(cart.total()));

    Ok(())
}
