//! Quote request command.

use std::fs;

use anyhow::{Context as _, Result};
use swag_commerce::quote::{CustomerDetails, QuoteRequest};

use super::{find_product, validate_variant, QuoteArgs};
use crate::context::Context;
use crate::output::money;

/// Run the quote command.
pub fn run(args: QuoteArgs, ctx: &Context) -> Result<()> {
    let catalog = ctx.catalog()?;
    let product = find_product(&catalog, args.id)?;

    let variant = args.variant.resolve(product);
    validate_variant(product, &variant)?;

    let mut request = QuoteRequest::priced(product, args.qty).with_variant(variant);
    if args.company.is_some() || args.contact.is_some() {
        let mut customer = CustomerDetails::new(
            args.company.unwrap_or_default(),
            args.contact.unwrap_or_default(),
        );
        if let Some(rut) = args.rut {
            customer = customer.with_rut(rut);
        }
        request = request.with_customer(customer);
    }
    if let Some(notes) = args.notes {
        request = request.with_notes(notes);
    }

    let mut mail = request.to_mail(ctx.config.mail.to.as_str());
    if let Some(cc) = ctx.config.mail.cc() {
        mail = mail.with_cc(cc);
    }

    let saved = if args.save {
        let path = ctx.cwd.join(request.document_file_name());
        fs::write(&path, request.to_document())
            .with_context(|| format!("Failed to write quote: {}", path.display()))?;
        Some(path)
    } else {
        None
    };

    if ctx.output.is_json() {
        ctx.output.json(&serde_json::json!({
            "quantity": request.quantity(),
            "unitPrice": request.unit_price(),
            "total": request.total(),
            "complete": request.is_complete(),
            "mail": mail,
            "mailto": mail.to_mailto(),
            "document": saved.as_ref().map(|p| p.display().to_string()),
        }));
        return Ok(());
    }

    ctx.output.header(&request.subject());
    ctx.output.kv("Precio unitario", &money(request.unit_price()));
    ctx.output.kv("Total", &money(request.total()));
    ctx.output.kv("Para", &mail.to);
    if let Some(cc) = &mail.cc {
        ctx.output.kv("CC", cc);
    }
    if !request.is_complete() {
        ctx.output
            .warn("Faltan empresa y contacto: agrega --company y --contact para una cotización formal");
    }

    ctx.output.line("");
    ctx.output.line(&request.body());
    ctx.output.line("");
    ctx.output.line(&mail.to_mailto());

    if let Some(path) = saved {
        ctx.output.success(&format!("Cotización guardada: {}", path.display()));
    }

    Ok(())
}
