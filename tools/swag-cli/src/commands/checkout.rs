//! Checkout command.

use anyhow::{bail, Result};
use swag_commerce::quote::OrderRequest;

use super::CheckoutArgs;
use crate::context::Context;
use crate::output::money;

/// Run the checkout command: compose the order mail for the whole cart.
pub fn run(args: CheckoutArgs, ctx: &Context) -> Result<()> {
    let cart = ctx.cart()?;
    let Some(order) = OrderRequest::from_cart(&cart) else {
        bail!("El carrito está vacío");
    };

    let to = args.to.unwrap_or_else(|| ctx.config.mail.to.clone());
    let mut mail = order.to_mail(to);
    if let Some(cc) = ctx.config.mail.cc() {
        mail = mail.with_cc(cc);
    }

    if ctx.output.is_json() {
        ctx.output.json(&serde_json::json!({
            "order": order,
            "mail": mail,
            "mailto": mail.to_mailto(),
        }));
        return Ok(());
    }

    ctx.output.header(&order.subject());
    ctx.output.kv("Ítems", &order.count.to_string());
    ctx.output.kv("Total", &money(order.total));
    ctx.output.kv("Para", &mail.to);

    ctx.output.line("");
    ctx.output.line(&order.body());
    ctx.output.line("");
    ctx.output.line(&mail.to_mailto());

    Ok(())
}
