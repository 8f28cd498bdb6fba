//! Catalog input shapes: the product payloads handed to the cart.
//!
//! The cart never fetches catalog data itself; the UI layer passes a
//! `Product` (already flattened from the commerce API's edge/node form)
//! into `CartStore::add_item`. These types only describe that input.

use serde::{Deserialize, Serialize};

/// Variant title the commerce platform assigns when a product has no real
/// variants. Such variants produce no `variantLabel` on the line item.
pub const DEFAULT_VARIANT_TITLE: &str = "Default Title";

/// Image shown for products that carry no image of their own.
pub const PLACEHOLDER_IMAGE_URL: &str = "https://via.placeholder.com/150";

/// A monetary amount as the API delivers it: a decimal string plus an
/// ISO-like currency code.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Price {
    pub amount: String,
    pub currency_code: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductImage {
    pub url: String,
}

/// One purchasable variant of a product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Variant {
    pub id: String,
    pub title: String,
    pub price: Price,
    pub available_for_sale: bool,
}

impl Variant {
    /// Whether this is the platform's implicit single variant.
    pub fn is_default(&self) -> bool {
        self.title == DEFAULT_VARIANT_TITLE
    }
}

/// A product as selected in the UI, with its variants already loaded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub images: Vec<ProductImage>,
    #[serde(default)]
    pub variants: Vec<Variant>,
}

impl Product {
    /// URL of the first product image, or the placeholder when there is none.
    pub fn primary_image_url(&self) -> &str {
        self.images
            .first()
            .map(|image| image.url.as_str())
            .unwrap_or(PLACEHOLDER_IMAGE_URL)
    }
}
