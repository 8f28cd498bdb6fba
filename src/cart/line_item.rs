use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::catalog::{Product, Variant};
use super::error::CartError;

/// One purchasable product/variant combination in the cart.
///
/// Display data (name, image, price, availability) is captured at add-time
/// and never re-fetched; the remote catalog stays the authority on live
/// values. This struct is also the persisted shape; field names in storage
/// are exactly its camelCase serde names.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LineItem {
    pub id: String,
    pub product_id: String,
    pub variant_id: String,
    pub name: String,
    pub image: String,
    pub unit_price: Decimal,
    pub currency: String,
    pub quantity: u32,
    pub variant_label: Option<String>,
    pub in_stock: bool,
}

impl LineItem {
    /// Uniqueness key for a product/variant combination.
    pub fn derive_id(product_id: &str, variant_id: &str) -> String {
        format!("{}_{}", product_id, variant_id)
    }

    /// Capture a line item from a selected product variant.
    pub fn from_selection(
        product: &Product,
        variant: &Variant,
        quantity: u32,
    ) -> Result<Self, CartError> {
        let unit_price: Decimal =
            variant
                .price
                .amount
                .parse()
                .map_err(|_| CartError::InvalidPrice {
                    product_id: product.id.clone(),
                    amount: variant.price.amount.clone(),
                })?;
        if unit_price.is_sign_negative() {
            return Err(CartError::InvalidPrice {
                product_id: product.id.clone(),
                amount: variant.price.amount.clone(),
            });
        }

        Ok(Self {
            id: Self::derive_id(&product.id, &variant.id),
            product_id: product.id.clone(),
            variant_id: variant.id.clone(),
            name: product.title.clone(),
            image: product.primary_image_url().to_string(),
            unit_price,
            currency: variant.price.currency_code.clone(),
            quantity,
            variant_label: if variant.is_default() {
                None
            } else {
                Some(variant.title.clone())
            },
            in_stock: variant.available_for_sale,
        })
    }

    /// `unit_price × quantity`, recomputed on every call.
    pub fn line_total(&self) -> Decimal {
        self.unit_price * Decimal::from(self.quantity)
    }
}

/// The `{variantId, quantity}` pair the hosted checkout expects per line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutLine {
    pub variant_id: String,
    pub quantity: u32,
}

impl From<&LineItem> for CheckoutLine {
    fn from(item: &LineItem) -> Self {
        Self {
            variant_id: item.variant_id.clone(),
            quantity: item.quantity,
        }
    }
}
