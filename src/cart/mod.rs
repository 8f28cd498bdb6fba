mod error;
mod line_item;
mod store;
mod totals;

pub use error::CartError;
pub use line_item::{CheckoutLine, LineItem};
pub use store::{CartStore, CartStoreBuilder};
pub use totals::{format_amount, vat_rate, Totals};
