//! Cart persistence port.

use swag_cache::{Cache, KeyValueStore};

use crate::cart::CartLineItem;
use crate::error::CommerceError;

/// Storage key the cart lives under.
pub const CART_STORAGE_KEY: &str = "swag_cart_v1";

/// Where a [`CartStore`](crate::cart::CartStore) loads and saves its lines.
pub trait CartPersistence {
    /// Load the persisted lines. A cart that was never saved loads as empty.
    fn load(&self) -> Result<Vec<CartLineItem>, CommerceError>;

    /// Replace the persisted lines with `items`.
    fn save(&self, items: &[CartLineItem]) -> Result<(), CommerceError>;
}

/// Cart persistence on top of a key-value store, as one JSON array.
#[derive(Debug, Clone)]
pub struct KvCartPersistence<S> {
    cache: Cache<S>,
    key: String,
}

impl<S: KeyValueStore> KvCartPersistence<S> {
    /// Persist under [`CART_STORAGE_KEY`].
    pub fn new(store: S) -> Self {
        Self::with_key(store, CART_STORAGE_KEY)
    }

    /// Persist under a custom key.
    pub fn with_key(store: S, key: impl Into<String>) -> Self {
        Self {
            cache: Cache::new(store),
            key: key.into(),
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn store(&self) -> &S {
        self.cache.store()
    }
}

impl<S: KeyValueStore> CartPersistence for KvCartPersistence<S> {
    fn load(&self) -> Result<Vec<CartLineItem>, CommerceError> {
        Ok(self
            .cache
            .get::<Vec<CartLineItem>>(&self.key)?
            .unwrap_or_default())
    }

    fn save(&self, items: &[CartLineItem]) -> Result<(), CommerceError> {
        self.cache.set(&self.key, items)?;
        Ok(())
    }
}

impl<P: CartPersistence + ?Sized> CartPersistence for &P {
    fn load(&self) -> Result<Vec<CartLineItem>, CommerceError> {
        (**self).load()
    }

    fn save(&self, items: &[CartLineItem]) -> Result<(), CommerceError> {
        (**self).save(items)
    }
}
