use std::sync::atomic::{AtomicBool, Ordering};

use cartkit::{CartStorage, InMemoryStorage, Price, Product, ProductImage, StorageError, Variant};

/// Single-variant product with the platform's implicit default variant.
pub fn widget(product_id: &str, variant_id: &str, amount: &str) -> Product {
    Product {
        id: product_id.to_string(),
        title: "Widget".to_string(),
        images: Vec::new(),
        variants: vec![Variant {
            id: variant_id.to_string(),
            title: "Default Title".to_string(),
            price: Price {
                amount: amount.to_string(),
                currency_code: "AED".to_string(),
            },
            available_for_sale: true,
        }],
    }
}

/// Two-variant product with an image, for label/image capture tests.
pub fn shirt() -> Product {
    Product {
        id: "P-shirt".to_string(),
        title: "Shirt".to_string(),
        images: vec![ProductImage {
            url: "https://cdn.example/shirt.jpg".to_string(),
        }],
        variants: vec![
            Variant {
                id: "V-small".to_string(),
                title: "Small".to_string(),
                price: Price {
                    amount: "40.00".to_string(),
                    currency_code: "AED".to_string(),
                },
                available_for_sale: true,
            },
            Variant {
                id: "V-large".to_string(),
                title: "Large".to_string(),
                price: Price {
                    amount: "45.00".to_string(),
                    currency_code: "AED".to_string(),
                },
                available_for_sale: false,
            },
        ],
    }
}

/// Storage wrapper with injectable read/write failures.
pub struct FailingStorage {
    inner: InMemoryStorage,
    fail_reads: AtomicBool,
    fail_writes: AtomicBool,
}

impl FailingStorage {
    pub fn new() -> Self {
        Self {
            inner: InMemoryStorage::new(),
            fail_reads: AtomicBool::new(false),
            fail_writes: AtomicBool::new(false),
        }
    }

    pub fn fail_reads(&self, on: bool) {
        self.fail_reads.store(on, Ordering::SeqCst);
    }

    pub fn fail_writes(&self, on: bool) {
        self.fail_writes.store(on, Ordering::SeqCst);
    }
}

impl CartStorage for FailingStorage {
    fn read(&self, key: &str) -> Result<Option<String>, StorageError> {
        if self.fail_reads.load(Ordering::SeqCst) {
            return Err(StorageError::Io("injected read failure".to_string()));
        }
        self.inner.read(key)
    }

    fn write(&self, key: &str, value: &str) -> Result<(), StorageError> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(StorageError::Io("injected write failure".to_string()));
        }
        self.inner.write(key, value)
    }
}
