use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CartError {
    /// Quantity must be a positive integer.
    InvalidQuantity { quantity: u32 },
    /// The selected variant index does not exist on the product.
    UnknownVariant {
        product_id: String,
        index: usize,
        available: usize,
    },
    /// The variant's price amount is not a usable decimal.
    InvalidPrice { product_id: String, amount: String },
}

impl fmt::Display for CartError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CartError::InvalidQuantity { quantity } => {
                write!(f, "quantity must be at least 1 (got {})", quantity)
            }
            CartError::UnknownVariant {
                product_id,
                index,
                available,
            } => write!(
                f,
                "variant index {} out of range for product {} ({} variants)",
                index, product_id, available
            ),
            CartError::InvalidPrice { product_id, amount } => write!(
                f,
                "unusable price amount {:?} on product {}",
                amount, product_id
            ),
        }
    }
}

impl std::error::Error for CartError {}
