//! Single-product quote requests.

use crate::cart::VariantSelection;
use crate::catalog::Product;
use crate::money::Money;
use crate::pricing::effective_unit_price_clamped;
use crate::quote::MailMessage;
use serde::{Deserialize, Serialize};

/// Who is asking for the quote.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomerDetails {
    /// Company or person name.
    pub company: String,
    /// Email or phone.
    pub contact: String,
    /// Chilean RUT or national ID.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rut: Option<String>,
}

impl CustomerDetails {
    pub fn new(company: impl Into<String>, contact: impl Into<String>) -> Self {
        Self {
            company: company.into(),
            contact: contact.into(),
            rut: None,
        }
    }

    pub fn with_rut(mut self, rut: impl Into<String>) -> Self {
        self.rut = Some(rut.into());
        self
    }

    /// Company and contact are both filled in.
    pub fn is_complete(&self) -> bool {
        !self.company.trim().is_empty() && !self.contact.trim().is_empty()
    }

    fn rut_or_blank(&self) -> &str {
        self.rut.as_deref().unwrap_or("")
    }
}

/// A quote for some quantity of one product.
#[derive(Debug, Clone)]
pub struct QuoteRequest<'a> {
    product: &'a Product,
    quantity: i64,
    unit_price: Money,
    variant: VariantSelection,
    customer: Option<CustomerDetails>,
    notes: Option<String>,
}

impl<'a> QuoteRequest<'a> {
    /// Quote at an explicit unit price. `quantity` is raised to 1 if lower.
    pub fn new(product: &'a Product, quantity: i64, unit_price: Money) -> Self {
        Self {
            product,
            quantity: quantity.max(1),
            unit_price,
            variant: VariantSelection::none(),
            customer: None,
            notes: None,
        }
    }

    /// Quote the way the product page does: quantity clamped to stock and
    /// priced from the product's breaks.
    pub fn priced(product: &'a Product, requested: i64) -> Self {
        let quantity = product.clamp_quantity(requested);
        let unit_price =
            effective_unit_price_clamped(product.base_price, &product.price_breaks, quantity);
        Self::new(product, quantity, unit_price)
    }

    pub fn with_variant(mut self, variant: VariantSelection) -> Self {
        self.variant = variant;
        self
    }

    pub fn with_customer(mut self, customer: CustomerDetails) -> Self {
        self.customer = Some(customer);
        self
    }

    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        let notes = notes.into();
        self.notes = (!notes.trim().is_empty()).then_some(notes);
        self
    }

    pub fn product(&self) -> &Product {
        self.product
    }

    pub fn quantity(&self) -> i64 {
        self.quantity
    }

    pub fn unit_price(&self) -> Money {
        self.unit_price
    }

    pub fn customer(&self) -> Option<&CustomerDetails> {
        self.customer.as_ref()
    }

    pub fn total(&self) -> Money {
        self.unit_price.times(self.quantity)
    }

    /// Ready to send as a formal quote: customer company and contact given.
    pub fn is_complete(&self) -> bool {
        self.customer.as_ref().is_some_and(CustomerDetails::is_complete)
    }

    pub fn subject(&self) -> String {
        format!(
            "Cotización: {} ({}) – {} u.",
            self.product.name, self.product.sku, self.quantity
        )
    }

    pub fn body(&self) -> String {
        let mut lines = vec![
            "Hola, quisiera una cotización de:".to_string(),
            String::new(),
            format!("Producto: {}", self.product.name),
            format!("SKU: {}", self.product.sku),
        ];
        if !self.product.category.as_str().is_empty() {
            lines.push(format!("Categoría: {}", self.product.category));
        }
        if let Some(color) = &self.variant.color {
            lines.push(format!("Color: {}", color));
        }
        if let Some(size) = &self.variant.size {
            lines.push(format!("Talla: {}", size));
        }
        lines.push(format!("Cantidad: {} unidades", self.quantity));
        lines.push(format!("Precio unitario: {}", self.unit_price.display()));
        lines.push(format!("Total: {}", self.total().display()));

        if let Some(customer) = &self.customer {
            lines.push(String::new());
            lines.push("Datos:".to_string());
            lines.push(format!("- Empresa/Nombre: {}", customer.company));
            lines.push(format!("- RUT/DNI: {}", customer.rut_or_blank()));
            lines.push(format!("- Contacto: {}", customer.contact));
        }
        if let Some(notes) = &self.notes {
            lines.push(String::new());
            lines.push(format!("Notas: {}", notes));
        }

        lines.push(String::new());
        lines.push("¿Podrían indicar plazo de entrega y formas de pago?".to_string());
        lines.push("Gracias.".to_string());
        lines.join("\n")
    }

    pub fn to_mail(&self, to: impl Into<String>) -> MailMessage {
        MailMessage::new(to, self.subject(), self.body())
    }

    /// Plain-text quote for download.
    pub fn to_document(&self) -> String {
        let customer = self.customer.clone().unwrap_or_default();
        [
            "--- COTIZACIÓN ---".to_string(),
            format!("Empresa/Nombre: {}", customer.company),
            format!("Contacto: {}", customer.contact),
            format!("RUT/DNI: {}", customer.rut_or_blank()),
            String::new(),
            format!("Producto: {} ({})", self.product.name, self.product.sku),
            format!("Cantidad: {}", self.quantity),
            format!("Precio unitario: {}", self.unit_price.display()),
            format!("Total: {}", self.total().display()),
            String::new(),
            format!("Notas: {}", self.notes.as_deref().unwrap_or("-")),
            "-------------------".to_string(),
        ]
        .join("\n")
    }

    pub fn document_file_name(&self) -> String {
        format!("cotizacion_{}_{}u.txt", self.product.sku, self.quantity)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::PriceBreak;

    fn botella() -> Product {
        Product::new(7, "BOT-001", "Botella metálica", 1000)
            .with_category("botellas")
            .with_stock(100)
            .with_price_break(PriceBreak::new(10, 900))
            .with_price_break(PriceBreak::new(50, 800))
    }

    #[test]
    fn test_priced_uses_tiers_and_stock() {
        let product = botella();
        let quote = QuoteRequest::priced(&product, 25);
        assert_eq!(quote.unit_price(), Money::new(900));
        assert_eq!(quote.total(), Money::new(22_500));

        let quote = QuoteRequest::priced(&product, 500);
        assert_eq!(quote.quantity(), 100);
        assert_eq!(quote.unit_price(), Money::new(800));
    }

    #[test]
    fn test_subject_and_body() {
        let product = botella();
        let quote = QuoteRequest::priced(&product, 25)
            .with_variant(VariantSelection::color("negro"));

        assert_eq!(quote.subject(), "Cotización: Botella metálica (BOT-001) – 25 u.");
        let body = quote.body();
        assert!(body.starts_with("Hola, quisiera una cotización de:\n\nProducto: Botella metálica"));
        assert!(body.contains("Categoría: botellas"));
        assert!(body.contains("Color: negro"));
        assert!(!body.contains("Talla:"));
        assert!(body.contains("Cantidad: 25 unidades"));
        assert!(body.contains("Precio unitario: $900"));
        assert!(body.contains("Total: $22.500"));
        assert!(body.ends_with("Gracias."));
    }

    #[test]
    fn test_customer_section() {
        let product = botella();
        let quote = QuoteRequest::priced(&product, 10)
            .with_customer(CustomerDetails::new("ACME SpA", "compras@acme.cl").with_rut("76.123.456-7"))
            .with_notes("Logo a un color");

        assert!(quote.is_complete());
        let body = quote.body();
        assert!(body.contains("- Empresa/Nombre: ACME SpA"));
        assert!(body.contains("- RUT/DNI: 76.123.456-7"));
        assert!(body.contains("Notas: Logo a un color"));
    }

    #[test]
    fn test_incomplete_without_contact() {
        let product = botella();
        let quote = QuoteRequest::priced(&product, 10).with_customer(CustomerDetails::new("ACME", " "));
        assert!(!quote.is_complete());
        assert!(!QuoteRequest::priced(&product, 10).is_complete());
    }

    #[test]
    fn test_document() {
        let product = botella();
        let quote = QuoteRequest::priced(&product, 60)
            .with_customer(CustomerDetails::new("ACME SpA", "compras@acme.cl"));

        let doc = quote.to_document();
        let lines: Vec<&str> = doc.lines().collect();
        assert_eq!(lines[0], "--- COTIZACIÓN ---");
        assert_eq!(lines[1], "Empresa/Nombre: ACME SpA");
        assert_eq!(lines[3], "RUT/DNI: ");
        assert_eq!(lines[5], "Producto: Botella metálica (BOT-001)");
        assert_eq!(lines[8], "Total: $48.000");
        assert_eq!(lines[10], "Notas: -");
        assert_eq!(quote.document_file_name(), "cotizacion_BOT-001_60u.txt");
    }

    #[test]
    fn test_to_mail() {
        let product = botella();
        let mail = QuoteRequest::new(&product, 0, Money::new(1000)).to_mail("ventas@tuempresa.cl");
        assert_eq!(mail.to, "ventas@tuempresa.cl");
        assert_eq!(mail.subject, "Cotización: Botella metálica (BOT-001) – 1 u.");
        assert!(mail.to_mailto().starts_with("mailto:ventas@tuempresa.cl?subject=Cotizaci%C3%B3n"));
    }
}
