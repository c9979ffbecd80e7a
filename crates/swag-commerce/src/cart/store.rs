//! The cart store.

use serde::Serialize;
use tracing::{debug, warn};

use crate::cart::{CartEvent, CartLineItem, CartPersistence, LineKey, VariantSelection};
use crate::catalog::Product;
use crate::money::Money;

/// Aggregates shown next to the cart badge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CartSummary {
    /// Sum of line quantities.
    pub count: i64,
    /// Sum of line totals.
    pub total: Money,
    /// Number of distinct lines.
    pub lines: usize,
}

/// The session's cart: an ordered list of lines, unique by [`LineKey`].
///
/// Every successful mutation writes the whole list through the
/// [`CartPersistence`] port before returning. Persistence failures never
/// reach the caller: a failed load starts an empty cart and a failed save
/// keeps the in-memory state, both logged at `warn`.
#[derive(Debug)]
pub struct CartStore<P> {
    items: Vec<CartLineItem>,
    persistence: P,
}

impl<P: CartPersistence> CartStore<P> {
    /// Open the cart, hydrating from `persistence`.
    ///
    /// Hydrated lines are normalized: quantities below 1 are raised to 1,
    /// totals are recomputed and lines sharing a key are merged into the
    /// first one.
    pub fn open(persistence: P) -> Self {
        let loaded = match persistence.load() {
            Ok(items) => items,
            Err(err) => {
                warn!(error = %err, "cart storage unreadable, starting with an empty cart");
                Vec::new()
            }
        };

        let items = normalize(loaded);
        debug!(lines = items.len(), "cart hydrated");
        Self { items, persistence }
    }

    /// Add `quantity` units of `product` with the given variant.
    ///
    /// The line is priced at `unit_price`, or at the product's base price
    /// when none is given. An existing line with the same key keeps its
    /// position: quantities are summed and the new unit price replaces the
    /// old one. Returns `None` without touching storage when
    /// `quantity <= 0`.
    pub fn add_item(
        &mut self,
        product: &Product,
        quantity: i64,
        variant: VariantSelection,
        unit_price: Option<Money>,
    ) -> Option<CartEvent> {
        if quantity <= 0 {
            debug!(product_id = %product.id, quantity, "ignoring non-positive add");
            return None;
        }

        let price = unit_price.unwrap_or(product.base_price);
        let key = LineKey::new(product.id, variant);

        let event = match self.items.iter_mut().find(|line| line.matches(&key)) {
            Some(line) => {
                line.merge(quantity, price);
                debug!(key = %key, added = quantity, quantity = line.quantity(), "merged cart line");
                CartEvent::Merged {
                    name: line.name().to_string(),
                    added: quantity,
                    quantity: line.quantity(),
                    key,
                }
            }
            None => {
                self.items.push(CartLineItem::new(
                    product,
                    quantity,
                    key.variant.clone(),
                    price,
                ));
                debug!(key = %key, quantity, "added cart line");
                CartEvent::Added {
                    name: product.name.clone(),
                    quantity,
                    key,
                }
            }
        };

        self.persist();
        Some(event)
    }

    /// Set the quantity of the line matching `key`.
    ///
    /// The quantity is raised to 1 if lower; removing a line is
    /// [`remove_item`](Self::remove_item)'s job. The unit price is kept.
    pub fn update_quantity(&mut self, key: &LineKey, quantity: i64) -> Option<CartEvent> {
        let line = self.items.iter_mut().find(|line| line.matches(key))?;
        line.set_quantity(quantity);

        let event = CartEvent::QuantityUpdated {
            key: key.clone(),
            name: line.name().to_string(),
            quantity: line.quantity(),
        };
        debug!(key = %key, requested = quantity, quantity = line.quantity(), "updated cart line");

        self.persist();
        Some(event)
    }

    /// Remove the line matching `key`.
    pub fn remove_item(&mut self, key: &LineKey) -> Option<CartEvent> {
        let pos = self.items.iter().position(|line| line.matches(key))?;
        let line = self.items.remove(pos);
        debug!(key = %key, "removed cart line");

        self.persist();
        Some(CartEvent::Removed {
            key: key.clone(),
            name: line.name().to_string(),
        })
    }

    /// Remove every line.
    pub fn clear(&mut self) -> CartEvent {
        let lines = self.items.len();
        self.items.clear();
        debug!(lines, "cleared cart");

        self.persist();
        CartEvent::Cleared { lines }
    }

    fn persist(&self) {
        if let Err(err) = self.persistence.save(&self.items) {
            warn!(
                error = %err,
                lines = self.items.len(),
                "failed to persist cart, keeping in-memory state"
            );
        }
    }
}

impl<P> CartStore<P> {
    /// Lines in insertion order.
    pub fn items(&self) -> &[CartLineItem] {
        &self.items
    }

    pub fn line(&self, key: &LineKey) -> Option<&CartLineItem> {
        self.items.iter().find(|line| line.matches(key))
    }

    /// Total units across all lines.
    pub fn count(&self) -> i64 {
        self.items
            .iter()
            .fold(0i64, |acc, line| acc.saturating_add(line.quantity()))
    }

    /// Sum of line totals.
    pub fn total(&self) -> Money {
        self.items.iter().map(CartLineItem::total_price).sum()
    }

    pub fn line_count(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn summary(&self) -> CartSummary {
        CartSummary {
            count: self.count(),
            total: self.total(),
            lines: self.line_count(),
        }
    }

    pub fn persistence(&self) -> &P {
        &self.persistence
    }
}

fn normalize(loaded: Vec<CartLineItem>) -> Vec<CartLineItem> {
    let mut items: Vec<CartLineItem> = Vec::with_capacity(loaded.len());
    for mut line in loaded {
        line.normalize();
        let key = line.key();
        match items.iter_mut().find(|existing| existing.matches(&key)) {
            Some(existing) => {
                debug!(key = %key, "merging duplicate stored cart line");
                existing.merge(line.quantity(), line.unit_price());
            }
            None => items.push(line),
        }
    }
    items
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cart::{KvCartPersistence, CART_STORAGE_KEY};
    use crate::catalog::PriceBreak;
    use crate::error::CommerceError;
    use crate::pricing::effective_unit_price;
    use swag_cache::{KeyValueStore, MemoryStore};

    fn polera() -> Product {
        Product::new(1, "POL-001", "Polera algodón", 1000)
            .with_stock(500)
            .with_price_break(PriceBreak::new(10, 900))
            .with_price_break(PriceBreak::new(50, 800))
            .with_colors(["rojo", "azul"])
            .with_sizes(["S", "M", "L"])
    }

    fn taza() -> Product {
        Product::new(2, "TAZ-001", "Taza cerámica", 3990).with_stock(80)
    }

    fn memory_cart(store: &MemoryStore) -> CartStore<KvCartPersistence<&MemoryStore>> {
        CartStore::open(KvCartPersistence::new(store))
    }

    fn stored_lines(store: &MemoryStore) -> Vec<CartLineItem> {
        KvCartPersistence::new(store).load().unwrap()
    }

    fn assert_aggregates<P>(cart: &CartStore<P>) {
        let count: i64 = cart.items().iter().map(|l| l.quantity()).sum();
        let total: Money = cart.items().iter().map(|l| l.total_price()).sum();
        assert_eq!(cart.count(), count);
        assert_eq!(cart.total(), total);
        for line in cart.items() {
            assert!(line.quantity() >= 1);
            assert_eq!(line.total_price(), line.unit_price().times(line.quantity()));
        }
    }

    struct BrokenPersistence;

    impl CartPersistence for BrokenPersistence {
        fn load(&self) -> Result<Vec<CartLineItem>, CommerceError> {
            Err(CommerceError::PersistenceUnavailable("disk gone".into()))
        }

        fn save(&self, _items: &[CartLineItem]) -> Result<(), CommerceError> {
            Err(CommerceError::PersistenceUnavailable("disk gone".into()))
        }
    }

    #[test]
    fn test_empty_storage_opens_empty() {
        let store = MemoryStore::new();
        let cart = memory_cart(&store);
        assert!(cart.is_empty());
        assert_eq!(cart.count(), 0);
        assert_eq!(cart.total(), Money::zero());
    }

    #[test]
    fn test_same_variant_merges() {
        let store = MemoryStore::new();
        let mut cart = memory_cart(&store);

        let first = cart.add_item(&polera(), 2, VariantSelection::color("rojo"), None);
        assert!(matches!(first, Some(CartEvent::Added { quantity: 2, .. })));

        let second = cart.add_item(&polera(), 3, VariantSelection::color("rojo"), None);
        assert!(matches!(
            second,
            Some(CartEvent::Merged {
                added: 3,
                quantity: 5,
                ..
            })
        ));

        assert_eq!(cart.line_count(), 1);
        assert_eq!(cart.count(), 5);
        assert_eq!(cart.total(), Money::new(5000));
    }

    #[test]
    fn test_different_colors_stay_apart() {
        let store = MemoryStore::new();
        let mut cart = memory_cart(&store);

        cart.add_item(&polera(), 2, VariantSelection::color("rojo"), None);
        cart.add_item(&polera(), 3, VariantSelection::color("azul"), None);

        assert_eq!(cart.line_count(), 2);
        assert_eq!(cart.items()[0].selected_color(), Some("rojo"));
        assert_eq!(cart.items()[1].selected_color(), Some("azul"));
    }

    #[test]
    fn test_missing_variant_does_not_match_selected() {
        let store = MemoryStore::new();
        let mut cart = memory_cart(&store);

        cart.add_item(&polera(), 1, VariantSelection::color("rojo"), None);
        let event = cart.add_item(&polera(), 1, VariantSelection::none(), None);

        assert!(matches!(event, Some(CartEvent::Added { .. })));
        assert_eq!(cart.line_count(), 2);
    }

    #[test]
    fn test_merge_overwrites_unit_price_and_keeps_position() {
        let store = MemoryStore::new();
        let mut cart = memory_cart(&store);
        let product = polera();

        cart.add_item(&product, 5, VariantSelection::none(), None);
        cart.add_item(&taza(), 1, VariantSelection::none(), None);

        let unit = effective_unit_price(product.base_price, &product.price_breaks, 20).unwrap();
        cart.add_item(&product, 15, VariantSelection::none(), Some(unit));

        let line = &cart.items()[0];
        assert_eq!(line.product_id(), product.id);
        assert_eq!(line.quantity(), 20);
        assert_eq!(line.unit_price(), Money::new(900));
        assert_eq!(line.total_price(), Money::new(18_000));
        assert_aggregates(&cart);
    }

    #[test]
    fn test_non_positive_add_is_a_no_op() {
        let store = MemoryStore::new();
        let mut cart = memory_cart(&store);

        assert!(cart.add_item(&taza(), 0, VariantSelection::none(), None).is_none());
        assert!(cart.add_item(&taza(), -3, VariantSelection::none(), None).is_none());
        assert!(cart.is_empty());
        assert!(!store.exists(CART_STORAGE_KEY).unwrap());
    }

    #[test]
    fn test_update_to_zero_keeps_one() {
        let store = MemoryStore::new();
        let mut cart = memory_cart(&store);
        let key = LineKey::new(1, VariantSelection::color("rojo"));

        cart.add_item(&polera(), 4, VariantSelection::color("rojo"), None);
        let event = cart.update_quantity(&key, 0);

        assert!(matches!(event, Some(CartEvent::QuantityUpdated { quantity: 1, .. })));
        assert_eq!(cart.line(&key).map(|l| l.quantity()), Some(1));
        assert_eq!(cart.total(), Money::new(1000));
    }

    #[test]
    fn test_update_keeps_unit_price() {
        let store = MemoryStore::new();
        let mut cart = memory_cart(&store);
        let key = LineKey::plain(1);

        cart.add_item(&polera(), 20, VariantSelection::none(), Some(Money::new(900)));
        cart.update_quantity(&key, 3);

        let line = cart.line(&key).unwrap();
        assert_eq!(line.unit_price(), Money::new(900));
        assert_eq!(line.total_price(), Money::new(2700));
    }

    #[test]
    fn test_update_and_remove_unknown_key() {
        let store = MemoryStore::new();
        let mut cart = memory_cart(&store);
        cart.add_item(&polera(), 1, VariantSelection::color("rojo"), None);

        let other = LineKey::new(1, VariantSelection::color("azul"));
        assert!(cart.update_quantity(&other, 5).is_none());
        assert!(cart.remove_item(&other).is_none());
        assert_eq!(cart.count(), 1);
    }

    #[test]
    fn test_partial_key_does_not_match_line() {
        let store = MemoryStore::new();
        let mut cart = memory_cart(&store);
        cart.add_item(&polera(), 4, VariantSelection::color("rojo").with_size("M"), None);
        let before = stored_lines(&store);

        let color_only = LineKey::new(1, VariantSelection::color("rojo"));
        assert!(cart.update_quantity(&color_only, 9).is_none());
        assert!(cart.remove_item(&LineKey::new(1, VariantSelection::size("M"))).is_none());
        assert!(cart.remove_item(&LineKey::plain(1)).is_none());

        assert_eq!(cart.count(), 4);
        assert_eq!(cart.line_count(), 1);
        assert_eq!(stored_lines(&store), before);
    }

    #[test]
    fn test_add_then_remove_restores_lines() {
        let store = MemoryStore::new();
        let mut cart = memory_cart(&store);
        cart.add_item(&polera(), 3, VariantSelection::color("rojo").with_size("M"), None);
        cart.add_item(&taza(), 2, VariantSelection::none(), None);
        let before = cart.items().to_vec();

        let variant = VariantSelection::color("azul").with_size("L");
        cart.add_item(&polera(), 7, variant.clone(), None);
        let event = cart.remove_item(&LineKey::new(1, variant));

        assert!(matches!(event, Some(CartEvent::Removed { .. })));
        assert_eq!(cart.items(), before.as_slice());
        assert_eq!(stored_lines(&store), before);
    }

    #[test]
    fn test_aggregates_hold_over_sequence() {
        let store = MemoryStore::new();
        let mut cart = memory_cart(&store);
        let red_m = VariantSelection::color("rojo").with_size("M");

        cart.add_item(&polera(), 3, red_m.clone(), None);
        assert_aggregates(&cart);
        cart.add_item(&taza(), 12, VariantSelection::none(), Some(Money::new(3500)));
        assert_aggregates(&cart);
        cart.add_item(&polera(), 9, red_m.clone(), Some(Money::new(900)));
        assert_aggregates(&cart);
        cart.update_quantity(&LineKey::plain(2), -1);
        assert_aggregates(&cart);
        cart.remove_item(&LineKey::new(1, red_m));
        assert_aggregates(&cart);

        assert_eq!(
            cart.summary(),
            CartSummary {
                count: 1,
                total: Money::new(3500),
                lines: 1,
            }
        );
    }

    #[test]
    fn test_every_mutation_persists() {
        let store = MemoryStore::new();
        let mut cart = memory_cart(&store);

        cart.add_item(&taza(), 2, VariantSelection::none(), None);
        assert_eq!(stored_lines(&store), cart.items());

        cart.update_quantity(&LineKey::plain(2), 6);
        assert_eq!(stored_lines(&store)[0].quantity(), 6);

        let event = cart.clear();
        assert_eq!(event, CartEvent::Cleared { lines: 1 });
        assert!(stored_lines(&store).is_empty());
        assert!(store.exists(CART_STORAGE_KEY).unwrap());
    }

    #[test]
    fn test_reopen_restores_lines() {
        let store = MemoryStore::new();
        {
            let mut cart = memory_cart(&store);
            cart.add_item(&polera(), 2, VariantSelection::size("S"), None);
            cart.add_item(&taza(), 1, VariantSelection::none(), None);
        }

        let cart = memory_cart(&store);
        assert_eq!(cart.line_count(), 2);
        assert_eq!(cart.count(), 3);
        assert_eq!(cart.items()[0].selected_size(), Some("S"));
    }

    #[test]
    fn test_corrupt_storage_opens_empty() {
        let store = MemoryStore::new();
        store.set_raw(CART_STORAGE_KEY, b"{not json").unwrap();

        let mut cart = memory_cart(&store);
        assert!(cart.is_empty());

        cart.add_item(&taza(), 1, VariantSelection::none(), None);
        assert_eq!(stored_lines(&store).len(), 1);
    }

    #[test]
    fn test_broken_backend_keeps_memory_state() {
        let mut cart = CartStore::open(BrokenPersistence);
        assert!(cart.is_empty());

        cart.add_item(&taza(), 2, VariantSelection::none(), None);
        cart.add_item(&taza(), 1, VariantSelection::none(), None);
        assert_eq!(cart.count(), 3);
        assert_eq!(cart.total(), Money::new(11_970));
    }

    #[test]
    fn test_hydrate_normalizes_stored_lines() {
        let store = MemoryStore::new();
        let line = CartLineItem::new(&taza(), 2, VariantSelection::none(), Money::new(3990));
        let mut broken = serde_json::to_value(&line).unwrap();
        broken["quantity"] = serde_json::json!(0);
        broken["totalPrice"] = serde_json::json!(123);
        let raw = serde_json::to_vec(&vec![serde_json::to_value(&line).unwrap(), broken]).unwrap();
        store.set_raw(CART_STORAGE_KEY, &raw).unwrap();

        let cart = memory_cart(&store);
        assert_eq!(cart.line_count(), 1);
        assert_eq!(cart.count(), 3);
        assert_eq!(cart.total(), Money::new(11_970));
        assert_aggregates(&cart);
    }

    #[test]
    fn test_quantity_saturates() {
        let store = MemoryStore::new();
        let mut cart = memory_cart(&store);

        cart.add_item(&taza(), i64::MAX, VariantSelection::none(), Some(Money::new(1)));
        cart.add_item(&taza(), 10, VariantSelection::none(), Some(Money::new(1)));

        assert_eq!(cart.count(), i64::MAX);
        assert_eq!(cart.total(), Money::new(i64::MAX));
    }
}
