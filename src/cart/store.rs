//! CartStore - the authoritative in-session line-item list.
//!
//! The store is created by hydrating once from storage through
//! [`CartStore::builder`]; the builder is the only pre-initialization state,
//! so no cart operation can run against a not-yet-hydrated list. Mutations
//! update memory synchronously and hand a full snapshot to the write-behind
//! worker; persistence failures are reported, never returned to the caller.

use std::fmt;
use std::sync::Arc;

use rust_decimal::Decimal;

use crate::catalog::Product;
use crate::persist::{WriteBehind, WriterStats};
use crate::report::{LogReporter, Reporter};
use crate::storage::{CartStorage, StorageError, CART_STORAGE_KEY};

use super::error::CartError;
use super::line_item::{CheckoutLine, LineItem};
use super::totals::{vat_rate, Totals};

#[cfg(feature = "emitter")]
use event_emitter_rs::EventEmitter;

/// Configuration state preceding the one-time hydration.
pub struct CartStoreBuilder {
    storage: Arc<dyn CartStorage>,
    storage_key: String,
    reporter: Arc<dyn Reporter>,
    #[cfg(feature = "emitter")]
    emitter: EventEmitter,
}

impl CartStoreBuilder {
    /// Persist under a different key than [`CART_STORAGE_KEY`].
    pub fn with_storage_key(mut self, key: impl Into<String>) -> Self {
        self.storage_key = key.into();
        self
    }

    /// Route restore/persist failures to a custom reporter.
    pub fn with_reporter(mut self, reporter: Arc<dyn Reporter>) -> Self {
        self.reporter = reporter;
        self
    }

    /// Register a listener before hydration so it observes `CartHydrated`.
    #[cfg(feature = "emitter")]
    pub fn on<F>(mut self, event: &str, listener: F) -> Self
    where
        F: Fn(String) + Send + Sync + 'static,
    {
        self.emitter.on(event, listener);
        self
    }

    /// Hydrate from storage and return the ready store.
    ///
    /// An absent key starts an empty cart. An unreadable or malformed blob
    /// is reported and discarded; durability loss is acceptable, a corrupt
    /// blob must never block startup. Individual persisted entries that
    /// violate the cart invariants are salvaged per entry: zero-quantity and
    /// negative-price entries are dropped, duplicate ids are merged.
    pub fn initialize(self) -> CartStore {
        let items = hydrate(
            self.storage.as_ref(),
            &self.storage_key,
            self.reporter.as_ref(),
        );
        let writer = WriteBehind::spawn(
            self.storage,
            self.storage_key.clone(),
            Arc::clone(&self.reporter),
        );

        let mut store = CartStore {
            items,
            storage_key: self.storage_key,
            reporter: self.reporter,
            writer: Some(writer),
            #[cfg(feature = "emitter")]
            emitter: self.emitter,
        };
        store.emit("CartHydrated");
        store
    }
}

pub struct CartStore {
    items: Vec<LineItem>,
    storage_key: String,
    reporter: Arc<dyn Reporter>,
    writer: Option<WriteBehind>,
    #[cfg(feature = "emitter")]
    emitter: EventEmitter,
}

impl fmt::Debug for CartStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CartStore")
            .field("storage_key", &self.storage_key)
            .field("items", &self.items)
            .finish()
    }
}

impl CartStore {
    /// Start configuring a store over the given storage adapter.
    pub fn builder(storage: Arc<dyn CartStorage>) -> CartStoreBuilder {
        CartStoreBuilder {
            storage,
            storage_key: CART_STORAGE_KEY.to_string(),
            reporter: Arc::new(LogReporter),
            #[cfg(feature = "emitter")]
            emitter: EventEmitter::new(),
        }
    }

    /// Add `quantity` of the product's `variant_index` variant.
    ///
    /// An id already in the cart has its quantity incremented (no ceiling here;
    /// stock limits are the catalog's concern); otherwise a new line item is
    /// appended, capturing display data from the product at add-time.
    pub fn add_item(
        &mut self,
        product: &Product,
        variant_index: usize,
        quantity: u32,
    ) -> Result<(), CartError> {
        if quantity == 0 {
            return Err(CartError::InvalidQuantity { quantity });
        }
        let variant =
            product
                .variants
                .get(variant_index)
                .ok_or_else(|| CartError::UnknownVariant {
                    product_id: product.id.clone(),
                    index: variant_index,
                    available: product.variants.len(),
                })?;

        let id = LineItem::derive_id(&product.id, &variant.id);
        if let Some(existing) = self.items.iter_mut().find(|item| item.id == id) {
            existing.quantity = existing.quantity.saturating_add(quantity);
        } else {
            let item = LineItem::from_selection(product, variant, quantity)?;
            self.items.push(item);
        }

        self.write_through();
        Ok(())
    }

    /// Remove the line item with the given id. Absent ids are a no-op.
    pub fn remove_item(&mut self, id: &str) -> bool {
        let before = self.items.len();
        self.items.retain(|item| item.id != id);
        let removed = self.items.len() != before;
        if removed {
            self.write_through();
        }
        removed
    }

    /// Replace a line item's quantity. Zero and unknown ids are no-ops;
    /// deletion is [`CartStore::remove_item`], never an implicit clamp.
    pub fn set_quantity(&mut self, id: &str, quantity: u32) -> bool {
        if quantity == 0 {
            return false;
        }
        let Some(item) = self.items.iter_mut().find(|item| item.id == id) else {
            return false;
        };
        item.quantity = quantity;
        self.write_through();
        true
    }

    /// Empty the cart unconditionally.
    pub fn clear(&mut self) {
        self.items.clear();
        self.write_through();
    }

    /// Sum of all quantities.
    pub fn count(&self) -> u64 {
        self.items
            .iter()
            .fold(0u64, |acc, item| acc + u64::from(item.quantity))
    }

    /// Σ(unit price × quantity) over all items.
    pub fn subtotal(&self) -> Decimal {
        self.items
            .iter()
            .fold(Decimal::ZERO, |acc, item| acc + item.line_total())
    }

    /// Subtotal × the fixed VAT rate.
    pub fn vat(&self) -> Decimal {
        self.subtotal() * vat_rate()
    }

    /// Subtotal plus VAT.
    pub fn total(&self) -> Decimal {
        self.subtotal() + self.vat()
    }

    /// All derived amounts in one snapshot.
    pub fn totals(&self) -> Totals {
        let subtotal = self.subtotal();
        let vat = subtotal * vat_rate();
        Totals {
            count: self.count(),
            subtotal,
            vat,
            total: subtotal + vat,
        }
    }

    /// Line items in insertion order.
    pub fn items(&self) -> &[LineItem] {
        &self.items
    }

    /// Look up a line item by id.
    pub fn get(&self, id: &str) -> Option<&LineItem> {
        self.items.iter().find(|item| item.id == id)
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// The `{variantId, quantity}` pairs a hosted checkout is created from.
    pub fn checkout_lines(&self) -> Vec<CheckoutLine> {
        self.items.iter().map(CheckoutLine::from).collect()
    }

    /// Block until every write-through issued so far has been applied and
    /// return the outcome of the most recent physical write.
    pub fn flush(&self) -> Result<(), StorageError> {
        match &self.writer {
            Some(writer) => writer.flush(),
            None => Ok(()),
        }
    }

    /// Stop the write-behind worker and collect its counters.
    pub fn shutdown(mut self) -> WriterStats {
        self.writer
            .take()
            .map(WriteBehind::stop)
            .unwrap_or_default()
    }

    /// Register a listener. `CartUpdated` fires after every state-changing
    /// mutation with the serialized [`Totals`] snapshot as payload.
    #[cfg(feature = "emitter")]
    pub fn on<F>(&mut self, event: &str, listener: F)
    where
        F: Fn(String) + Send + Sync + 'static,
    {
        self.emitter.on(event, listener);
    }

    fn write_through(&mut self) {
        match serde_json::to_string(&self.items) {
            Ok(snapshot) => {
                let delivered = self
                    .writer
                    .as_ref()
                    .map(|writer| writer.submit(snapshot))
                    .unwrap_or(false);
                if !delivered {
                    self.reporter.persist_failed(
                        &self.storage_key,
                        &StorageError::Io("write-behind worker unavailable".to_string()),
                    );
                }
            }
            Err(error) => self
                .reporter
                .persist_failed(&self.storage_key, &StorageError::Io(error.to_string())),
        }
        self.emit("CartUpdated");
    }

    #[cfg(feature = "emitter")]
    fn emit(&mut self, event: &str) {
        if let Ok(payload) = serde_json::to_string(&self.totals()) {
            self.emitter.emit(event, payload);
        }
    }

    #[cfg(not(feature = "emitter"))]
    fn emit(&mut self, _event: &str) {}
}

fn hydrate(storage: &dyn CartStorage, key: &str, reporter: &dyn Reporter) -> Vec<LineItem> {
    let blob = match storage.read(key) {
        Ok(Some(blob)) => blob,
        Ok(None) => return Vec::new(),
        Err(error) => {
            reporter.restore_failed(key, &error.to_string());
            return Vec::new();
        }
    };

    let raw: Vec<LineItem> = match serde_json::from_str(&blob) {
        Ok(raw) => raw,
        Err(error) => {
            reporter.restore_failed(key, &format!("malformed persisted cart: {}", error));
            return Vec::new();
        }
    };

    sanitize(raw, key, reporter)
}

/// Re-validate persisted entries against the cart invariants, salvaging
/// what can be kept instead of discarding the whole blob.
fn sanitize(raw: Vec<LineItem>, key: &str, reporter: &dyn Reporter) -> Vec<LineItem> {
    let mut items: Vec<LineItem> = Vec::with_capacity(raw.len());
    for item in raw {
        if item.quantity == 0 {
            reporter.restore_failed(
                key,
                &format!("discarded persisted line item {} with zero quantity", item.id),
            );
            continue;
        }
        if item.unit_price.is_sign_negative() {
            reporter.restore_failed(
                key,
                &format!(
                    "discarded persisted line item {} with negative unit price",
                    item.id
                ),
            );
            continue;
        }
        if let Some(existing) = items.iter_mut().find(|existing| existing.id == item.id) {
            existing.quantity = existing.quantity.saturating_add(item.quantity);
            reporter.restore_failed(
                key,
                &format!("merged duplicate persisted line item {}", item.id),
            );
        } else {
            items.push(item);
        }
    }
    items
}
