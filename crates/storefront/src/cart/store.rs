//! The cart store: durable, synchronous, last-writer-wins.
//!
//! One `CartStore` is constructed per process (see [`crate::state::AppState`])
//! and handed to every view by reference, so all of them observe the same
//! persisted slot. After every successful mutation the store fires a
//! payload-less change signal; listeners are expected to re-pull with
//! [`CartStore::items`] rather than receive a diff.
//!
//! Within one store instance every operation's read-modify-persist window
//! runs under an internal mutex, so interleaved calls from threads of the
//! same process cannot tear each other. Two *independent* stores over the
//! same backing slot (two processes, or two `CartStore`s opened on one
//! directory) still race: both can read the same prior state and one
//! increment can be lost. That is an accepted, documented limitation of the
//! storage model, not a guarantee this module can make.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use rust_decimal::Decimal;
use tracing::{debug, warn};

use feira_core::ProductId;

use crate::storage::{KeyValueStore, StorageError};

use super::line_item::{LineItem, NewLineItem};

/// Storage slot holding the serialized cart.
pub const CART_KEY: &str = "cart";

/// Errors surfaced by cart mutations.
///
/// Reads never error: an absent or unreadable slot degrades to an empty
/// cart so a shopper is never locked out of the store by a bad blob.
#[derive(Debug, thiserror::Error)]
pub enum CartError {
    /// The item fails the add preconditions (empty id, negative price).
    #[error("invalid line item: {0}")]
    InvalidItem(String),

    /// The backing store could not be written.
    #[error("cart storage error: {0}")]
    Storage(#[from] StorageError),

    /// The cart could not be serialized for persistence.
    #[error("cart serialization error: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Handle returned by [`CartStore::subscribe`]; pass it back to
/// [`CartStore::unsubscribe`] on view teardown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

type Listener = Box<dyn Fn() + Send + Sync>;

/// Durable cart state with change notification.
pub struct CartStore {
    storage: Arc<dyn KeyValueStore>,
    /// Serializes read-modify-persist windows within this instance.
    mutate: Mutex<()>,
    listeners: Mutex<HashMap<u64, Listener>>,
    next_listener: AtomicU64,
}

impl CartStore {
    /// Create a cart store over the given storage backend.
    pub fn new(storage: Arc<dyn KeyValueStore>) -> Self {
        Self {
            storage,
            mutate: Mutex::new(()),
            listeners: Mutex::new(HashMap::new()),
            next_listener: AtomicU64::new(0),
        }
    }

    /// Read the cart from storage, in insertion order.
    ///
    /// An absent slot is an empty cart. A malformed slot is treated the
    /// same way: the damage is logged and the shopper starts over rather
    /// than being handed an error they cannot act on.
    #[must_use]
    pub fn items(&self) -> Vec<LineItem> {
        match self.storage.get(CART_KEY) {
            Ok(Some(raw)) => match serde_json::from_str(&raw) {
                Ok(items) => items,
                Err(e) => {
                    warn!("Discarding malformed cart data: {e}");
                    Vec::new()
                }
            },
            Ok(None) => Vec::new(),
            Err(e) => {
                warn!("Failed to read cart, treating as empty: {e}");
                Vec::new()
            }
        }
    }

    /// Add one unit of a product to the cart.
    ///
    /// If an entry with the same id already exists its quantity is
    /// incremented; the stored name, price, and image stay as captured by
    /// the first add. Otherwise the item is appended with quantity 1.
    ///
    /// # Errors
    ///
    /// Returns [`CartError::InvalidItem`] for an empty id or negative
    /// price, or [`CartError::Storage`] if persisting fails (in which case
    /// the cart is unchanged and no signal fires).
    pub fn add(&self, item: NewLineItem) -> Result<Vec<LineItem>, CartError> {
        if item.id.is_empty() {
            return Err(CartError::InvalidItem("product id is empty".to_owned()));
        }
        if item.price.is_sign_negative() {
            return Err(CartError::InvalidItem(format!(
                "negative price for {}: {}",
                item.id, item.price
            )));
        }

        let items = {
            let _guard = self.mutation_guard();
            let mut items = self.items();
            if let Some(existing) = items.iter_mut().find(|i| i.id == item.id) {
                existing.quantity += 1;
            } else {
                items.push(item.into_line_item());
            }
            self.persist(&items)?;
            items
        };
        self.notify();
        Ok(items)
    }

    /// Set the quantity of an existing entry (absolute, not a delta).
    ///
    /// Unknown ids are a no-op and do not create an entry. A quantity of
    /// zero or less removes the entry, keeping the `quantity >= 1`
    /// invariant for everything that stays.
    ///
    /// # Errors
    ///
    /// Returns [`CartError::Storage`] if persisting fails.
    pub fn update_quantity(
        &self,
        id: &ProductId,
        quantity: i64,
    ) -> Result<Vec<LineItem>, CartError> {
        let items = {
            let _guard = self.mutation_guard();
            let mut items = self.items();
            if !items.iter().any(|i| i.id == *id) {
                return Ok(items);
            }
            if quantity <= 0 {
                items.retain(|i| i.id != *id);
            } else {
                let quantity = u32::try_from(quantity).unwrap_or(u32::MAX);
                for item in items.iter_mut().filter(|i| i.id == *id) {
                    item.quantity = quantity;
                }
            }
            self.persist(&items)?;
            items
        };
        self.notify();
        Ok(items)
    }

    /// Remove any entry matching `id`.
    ///
    /// Removing an absent id is not an error; the (unchanged) cart is
    /// still persisted and the signal still fires. Listeners treat the
    /// signal as re-pull-only, so the spurious wake is harmless.
    ///
    /// # Errors
    ///
    /// Returns [`CartError::Storage`] if persisting fails.
    pub fn remove(&self, id: &ProductId) -> Result<Vec<LineItem>, CartError> {
        let items = {
            let _guard = self.mutation_guard();
            let mut items = self.items();
            items.retain(|i| i.id != *id);
            self.persist(&items)?;
            items
        };
        self.notify();
        Ok(items)
    }

    /// Empty the cart by deleting its storage slot.
    ///
    /// # Errors
    ///
    /// Returns [`CartError::Storage`] if the slot cannot be deleted.
    pub fn clear(&self) -> Result<(), CartError> {
        {
            let _guard = self.mutation_guard();
            self.storage.delete(CART_KEY)?;
        }
        self.notify();
        Ok(())
    }

    /// Sum of `price * quantity` over all entries; zero for an empty cart.
    #[must_use]
    pub fn total(&self) -> Decimal {
        self.items().iter().map(LineItem::line_total).sum()
    }

    /// Register a change listener.
    ///
    /// The listener is invoked synchronously, once per successful mutation,
    /// with no payload; re-pull with [`CartStore::items`]. Keep the
    /// returned id and pass it to [`CartStore::unsubscribe`] on teardown;
    /// registration and deregistration are explicit and symmetric.
    pub fn subscribe(&self, listener: impl Fn() + Send + Sync + 'static) -> ListenerId {
        let id = self.next_listener.fetch_add(1, Ordering::Relaxed);
        self.listeners_guard().insert(id, Box::new(listener));
        ListenerId(id)
    }

    /// Deregister a listener. Returns `false` if the id was not registered
    /// (already unsubscribed, or from another store).
    pub fn unsubscribe(&self, id: ListenerId) -> bool {
        self.listeners_guard().remove(&id.0).is_some()
    }

    fn persist(&self, items: &[LineItem]) -> Result<(), CartError> {
        let raw = serde_json::to_string(items)?;
        self.storage.put(CART_KEY, &raw)?;
        Ok(())
    }

    /// Fire the change signal. Called outside the mutation guard so a
    /// listener may call back into the store.
    fn notify(&self) {
        let listeners = self.listeners_guard();
        debug!(listeners = listeners.len(), "cart changed");
        for listener in listeners.values() {
            listener();
        }
    }

    fn mutation_guard(&self) -> MutexGuard<'_, ()> {
        self.mutate.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn listeners_guard(&self) -> MutexGuard<'_, HashMap<u64, Listener>> {
        self.listeners.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use super::*;
    use crate::storage::MemoryStore;

    fn dec(s: &str) -> Decimal {
        s.parse().expect("decimal literal")
    }

    fn store() -> CartStore {
        CartStore::new(Arc::new(MemoryStore::new()))
    }

    fn new_item(id: &str, price: &str) -> NewLineItem {
        NewLineItem {
            id: ProductId::new(id),
            name: format!("Product {id}"),
            price: dec(price),
            image_url: None,
        }
    }

    #[test]
    fn test_distinct_adds_keep_insertion_order_with_quantity_one() {
        let cart = store();
        cart.add(new_item("a", "1")).expect("add");
        cart.add(new_item("b", "2")).expect("add");
        cart.add(new_item("c", "3")).expect("add");

        let items = cart.items();
        let ids: Vec<&str> = items.iter().map(|i| i.id.as_str()).collect();
        assert_eq!(ids, ["a", "b", "c"]);
        assert!(items.iter().all(|i| i.quantity == 1));
    }

    #[test]
    fn test_repeat_add_increments_and_keeps_first_write_fields() {
        let cart = store();
        cart.add(NewLineItem {
            id: ProductId::new("a"),
            name: "First name".to_owned(),
            price: dec("10.00"),
            image_url: Some("first.jpg".to_owned()),
        })
        .expect("add");

        let items = cart
            .add(NewLineItem {
                id: ProductId::new("a"),
                name: "Second name".to_owned(),
                price: dec("99.99"),
                image_url: Some("second.jpg".to_owned()),
            })
            .expect("add again");

        assert_eq!(items.len(), 1);
        let only = items.first().expect("one entry");
        assert_eq!(only.quantity, 2);
        assert_eq!(only.name, "First name");
        assert_eq!(only.price, dec("10.00"));
        assert_eq!(only.image_url.as_deref(), Some("first.jpg"));
    }

    #[test]
    fn test_add_rejects_empty_id_and_negative_price() {
        let cart = store();
        assert!(matches!(
            cart.add(new_item("", "1")),
            Err(CartError::InvalidItem(_))
        ));
        assert!(matches!(
            cart.add(new_item("a", "-0.01")),
            Err(CartError::InvalidItem(_))
        ));
        assert!(cart.items().is_empty());
    }

    #[test]
    fn test_zero_price_is_allowed() {
        let cart = store();
        cart.add(new_item("freebie", "0")).expect("add");
        assert_eq!(cart.total(), dec("0"));
    }

    #[test]
    fn test_update_quantity_sets_absolute_value() {
        let cart = store();
        cart.add(new_item("a", "2.50")).expect("add");
        let items = cart
            .update_quantity(&ProductId::new("a"), 7)
            .expect("update");
        assert_eq!(items.first().expect("entry").quantity, 7);
    }

    #[test]
    fn test_update_quantity_zero_or_negative_removes() {
        let cart = store();
        cart.add(new_item("a", "1")).expect("add");
        cart.add(new_item("b", "1")).expect("add");

        cart.update_quantity(&ProductId::new("a"), 0).expect("zero");
        cart.update_quantity(&ProductId::new("b"), -5)
            .expect("negative");
        assert!(cart.items().is_empty());
    }

    #[test]
    fn test_update_quantity_unknown_id_is_noop() {
        let cart = store();
        cart.add(new_item("a", "1")).expect("add");
        let items = cart
            .update_quantity(&ProductId::new("ghost"), 4)
            .expect("update");
        assert_eq!(items.len(), 1);
        assert_eq!(items.first().expect("entry").id.as_str(), "a");
    }

    #[test]
    fn test_remove_filters_and_tolerates_absent_id() {
        let cart = store();
        cart.add(new_item("a", "1")).expect("add");
        cart.add(new_item("b", "1")).expect("add");

        let items = cart.remove(&ProductId::new("a")).expect("remove");
        assert_eq!(items.len(), 1);
        assert_eq!(items.first().expect("entry").id.as_str(), "b");

        let items = cart.remove(&ProductId::new("ghost")).expect("remove absent");
        assert_eq!(items.len(), 1);
    }

    #[test]
    fn test_clear_then_read_is_empty_and_total_zero() {
        let cart = store();
        cart.add(new_item("a", "9.99")).expect("add");
        cart.clear().expect("clear");
        assert!(cart.items().is_empty());
        assert_eq!(cart.total(), dec("0"));
    }

    #[test]
    fn test_total_sums_price_times_quantity() {
        let cart = store();
        cart.add(new_item("a", "10")).expect("add");
        cart.update_quantity(&ProductId::new("a"), 2).expect("set");
        cart.add(new_item("b", "5")).expect("add");
        cart.update_quantity(&ProductId::new("b"), 3).expect("set");
        assert_eq!(cart.total(), dec("35"));
    }

    #[test]
    fn test_malformed_slot_reads_as_empty() {
        let storage = Arc::new(MemoryStore::new());
        storage.put(CART_KEY, "{not json").expect("seed");
        let cart = CartStore::new(storage);
        assert!(cart.items().is_empty());
        assert_eq!(cart.total(), dec("0"));
    }

    #[test]
    fn test_signal_fires_once_per_mutation() {
        let cart = store();
        let fired = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&fired);
        let id = cart.subscribe(move || {
            counter.fetch_add(1, Ordering::SeqCst);
        });

        cart.add(new_item("a", "1")).expect("add"); // 1
        cart.add(new_item("a", "1")).expect("add"); // 2
        cart.update_quantity(&ProductId::new("a"), 5).expect("set"); // 3
        cart.remove(&ProductId::new("a")).expect("remove"); // 4
        cart.clear().expect("clear"); // 5
        assert_eq!(fired.load(Ordering::SeqCst), 5);

        assert!(cart.unsubscribe(id));
        cart.add(new_item("b", "1")).expect("add after unsubscribe");
        assert_eq!(fired.load(Ordering::SeqCst), 5);
        assert!(!cart.unsubscribe(id));
    }

    #[test]
    fn test_no_signal_for_noop_update_or_rejected_add() {
        let cart = store();
        let fired = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&fired);
        cart.subscribe(move || {
            counter.fetch_add(1, Ordering::SeqCst);
        });

        cart.update_quantity(&ProductId::new("ghost"), 3)
            .expect("noop update");
        let _ = cart.add(new_item("", "1"));
        assert_eq!(fired.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_listener_may_re_pull_from_the_store() {
        let cart = Arc::new(store());
        let seen = Arc::new(Mutex::new(Vec::new()));
        let cart_in_listener = Arc::clone(&cart);
        let seen_in_listener = Arc::clone(&seen);
        cart.subscribe(move || {
            let count = cart_in_listener.items().len();
            seen_in_listener
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .push(count);
        });

        cart.add(new_item("a", "1")).expect("add");
        cart.add(new_item("b", "1")).expect("add");
        let seen = seen.lock().unwrap_or_else(PoisonError::into_inner);
        assert_eq!(*seen, vec![1, 2]);
    }

    #[test]
    fn test_failed_persist_surfaces_and_suppresses_signal() {
        struct BrokenStore;
        impl KeyValueStore for BrokenStore {
            fn get(&self, _key: &str) -> Result<Option<String>, StorageError> {
                Ok(None)
            }
            fn put(&self, _key: &str, _value: &str) -> Result<(), StorageError> {
                Err(StorageError::Io(std::io::Error::other("disk full")))
            }
            fn delete(&self, _key: &str) -> Result<(), StorageError> {
                Err(StorageError::Io(std::io::Error::other("disk full")))
            }
        }

        let cart = CartStore::new(Arc::new(BrokenStore));
        let fired = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&fired);
        cart.subscribe(move || {
            counter.fetch_add(1, Ordering::SeqCst);
        });

        assert!(matches!(
            cart.add(new_item("a", "1")),
            Err(CartError::Storage(_))
        ));
        assert!(matches!(cart.clear(), Err(CartError::Storage(_))));
        assert_eq!(fired.load(Ordering::SeqCst), 0);
    }
}
