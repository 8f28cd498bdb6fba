mod cart;
mod catalog;
mod persist;
mod report;
mod storage;

pub use cart::{format_amount, vat_rate, CartError, CartStore, CartStoreBuilder};
pub use cart::{CheckoutLine, LineItem, Totals};
pub use catalog::{Price, Product, ProductImage, Variant};
pub use catalog::{DEFAULT_VARIANT_TITLE, PLACEHOLDER_IMAGE_URL};
pub use persist::{WriteBehind, WriterStats};
pub use report::{BufferReporter, LogReporter, Reporter};
pub use storage::{CartStorage, FileStorage, InMemoryStorage, StorageError, CART_STORAGE_KEY};

// Re-export the EventEmitter from the event_emitter_rs crate
#[cfg(feature = "emitter")]
pub use event_emitter_rs::EventEmitter;
