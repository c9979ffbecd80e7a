//! Thread-safe handle around a [`CartStore`].

use std::sync::{Arc, Mutex, PoisonError};

use crate::cart::{CartPersistence, CartStore};

/// A [`CartStore`] behind one lock, for embedding in multi-threaded hosts.
///
/// Each `with` call holds the lock for the whole closure, so a
/// read-modify-write sequence inside it is atomic. A poisoned lock is
/// recovered: every store operation leaves the lines consistent.
#[derive(Debug)]
pub struct SharedCartStore<P> {
    inner: Arc<Mutex<CartStore<P>>>,
}

impl<P> Clone for SharedCartStore<P> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<P: CartPersistence> SharedCartStore<P> {
    /// Open a store and share it.
    pub fn open(persistence: P) -> Self {
        Self::new(CartStore::open(persistence))
    }
}

impl<P> SharedCartStore<P> {
    pub fn new(store: CartStore<P>) -> Self {
        Self {
            inner: Arc::new(Mutex::new(store)),
        }
    }

    /// Run `f` with exclusive access to the store.
    pub fn with<R>(&self, f: impl FnOnce(&mut CartStore<P>) -> R) -> R {
        let mut guard = self.inner.lock().unwrap_or_else(PoisonError::into_inner);
        f(&mut guard)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cart::{KvCartPersistence, VariantSelection};
    use crate::catalog::Product;
    use crate::money::Money;
    use std::thread;
    use swag_cache::MemoryStore;

    #[test]
    fn test_concurrent_adds_merge() {
        let shared = SharedCartStore::open(KvCartPersistence::new(MemoryStore::new()));
        let product = Product::new(3, "LAP-001", "Lápiz", 500).with_stock(1000);

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let shared = shared.clone();
                let product = product.clone();
                thread::spawn(move || {
                    for _ in 0..10 {
                        shared.with(|cart| {
                            cart.add_item(&product, 1, VariantSelection::none(), None)
                        });
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        shared.with(|cart| {
            assert_eq!(cart.line_count(), 1);
            assert_eq!(cart.count(), 80);
            assert_eq!(cart.total(), Money::new(40_000));
        });
    }

    #[test]
    fn test_recovers_from_poisoned_lock() {
        let shared = SharedCartStore::open(KvCartPersistence::new(MemoryStore::new()));
        let product = Product::new(3, "LAP-001", "Lápiz", 500);

        let poisoner = shared.clone();
        let result = thread::spawn(move || {
            poisoner.with(|_| panic!("boom"));
        })
        .join();
        assert!(result.is_err());

        let event = shared.with(|cart| cart.add_item(&product, 2, VariantSelection::none(), None));
        assert!(event.is_some());
    }
}
