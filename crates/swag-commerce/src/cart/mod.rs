//! Shopping cart.
//!
//! Lines are keyed by product and exact variant selection. The store owns
//! the lines and writes them through a [`CartPersistence`] port after every
//! mutation; mutations report what happened as a [`CartEvent`].

mod event;
mod line_item;
mod persistence;
mod shared;
mod store;

pub use event::CartEvent;
pub use line_item::{CartLineItem, LineKey, VariantSelection};
pub use persistence::{CartPersistence, KvCartPersistence, CART_STORAGE_KEY};
pub use shared::SharedCartStore;
pub use store::{CartStore, CartSummary};
