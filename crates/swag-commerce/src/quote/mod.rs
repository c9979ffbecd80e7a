//! Quote and order messages.
//!
//! The storefront has no order backend: quotes and checkouts are composed
//! here as plain-text mail and handed to the user's mail client.

mod mail;
mod order;
mod request;

pub use mail::{MailMessage, DEFAULT_SALES_EMAIL};
pub use order::{OrderLine, OrderRequest};
pub use request::{CustomerDetails, QuoteRequest};
