//! Checkout orders built from the cart.

use crate::cart::{CartLineItem, CartStore};
use crate::money::Money;
use crate::quote::MailMessage;
use serde::Serialize;

/// One product line of an order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OrderLine {
    pub name: String,
    pub sku: String,
    pub quantity: i64,
    pub unit_price: Money,
    pub color: Option<String>,
    pub size: Option<String>,
}

impl OrderLine {
    pub fn from_item(item: &CartLineItem) -> Self {
        Self {
            name: item.name().to_string(),
            sku: item.product().sku.clone(),
            quantity: item.quantity(),
            unit_price: item.unit_price(),
            color: item.selected_color().map(str::to_string),
            size: item.selected_size().map(str::to_string),
        }
    }

    /// `- Name (SKU) • 3 u. • PU: $1.000 • Color: rojo • Talla: M`
    fn describe(&self) -> String {
        let mut line = format!(
            "- {} ({}) • {} u. • PU: {}",
            self.name,
            self.sku,
            self.quantity,
            self.unit_price.display()
        );
        if let Some(color) = &self.color {
            line.push_str(&format!(" • Color: {}", color));
        }
        if let Some(size) = &self.size {
            line.push_str(&format!(" • Talla: {}", size));
        }
        line
    }
}

/// A purchase request for everything in the cart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OrderRequest {
    pub lines: Vec<OrderLine>,
    /// Total units.
    pub count: i64,
    pub total: Money,
}

impl OrderRequest {
    /// Build an order from cart lines. Returns `None` for an empty cart.
    pub fn from_items(items: &[CartLineItem]) -> Option<Self> {
        if items.is_empty() {
            return None;
        }

        Some(Self {
            lines: items.iter().map(OrderLine::from_item).collect(),
            count: items
                .iter()
                .fold(0i64, |acc, item| acc.saturating_add(item.quantity())),
            total: items.iter().map(CartLineItem::total_price).sum(),
        })
    }

    pub fn from_cart<P>(cart: &CartStore<P>) -> Option<Self> {
        Self::from_items(cart.items())
    }

    pub fn subject(&self) -> String {
        format!(
            "Pedido ({} ítems) – Total {}",
            self.count,
            self.total.display()
        )
    }

    pub fn body(&self) -> String {
        let lines: Vec<String> = self.lines.iter().map(OrderLine::describe).collect();
        format!(
            "Hola, quisiera avanzar con la compra:\n\
             \n\
             {}\n\
             \n\
             Total: {}\n\
             \n\
             Datos de facturación y envío:\n\
             - Nombre/Empresa:\n\
             - RUT/DNI:\n\
             - Dirección:\n\
             - Teléfono:\n\
             \n\
             Gracias.",
            lines.join("\n"),
            self.total.display()
        )
    }

    pub fn to_mail(&self, to: impl Into<String>) -> MailMessage {
        MailMessage::new(to, self.subject(), self.body())
    }
}
