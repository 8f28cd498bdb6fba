use std::sync::Arc;

use proptest::prelude::*;
use rust_decimal::Decimal;

use cartkit::{vat_rate, CartStore, InMemoryStorage, Price, Product, Variant};

fn product(product_id: &str, amount: &str) -> Product {
    Product {
        id: product_id.to_string(),
        title: format!("Product {}", product_id),
        images: Vec::new(),
        variants: vec![Variant {
            id: "V1".to_string(),
            title: "Default Title".to_string(),
            price: Price {
                amount: amount.to_string(),
                currency_code: "AED".to_string(),
            },
            available_for_sale: true,
        }],
    }
}

fn empty_cart() -> CartStore {
    CartStore::builder(Arc::new(InMemoryStorage::new())).initialize()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn duplicate_adds_merge_to_the_sum(q1 in 1u32..500, q2 in 1u32..500) {
        let mut cart = empty_cart();
        let item = product("P1", "9.99");

        cart.add_item(&item, 0, q1).unwrap();
        cart.add_item(&item, 0, q2).unwrap();

        prop_assert_eq!(cart.items().len(), 1);
        prop_assert_eq!(cart.get("P1_V1").unwrap().quantity, q1 + q2);
        prop_assert_eq!(cart.count(), u64::from(q1) + u64::from(q2));
    }

    #[test]
    fn totals_always_match_a_fresh_recompute(
        quantities in proptest::collection::vec(1u32..50, 1..8)
    ) {
        let mut cart = empty_cart();
        let mut expected = Decimal::ZERO;

        for (i, quantity) in quantities.iter().enumerate() {
            let amount = format!("{}.25", i + 1);
            cart.add_item(&product(&format!("P{}", i), &amount), 0, *quantity).unwrap();
            expected += amount.parse::<Decimal>().unwrap() * Decimal::from(*quantity);
        }

        prop_assert_eq!(cart.items().len(), quantities.len());
        prop_assert_eq!(cart.subtotal(), expected);
        prop_assert_eq!(cart.vat(), expected * vat_rate());
        prop_assert_eq!(cart.total(), expected + expected * vat_rate());
    }

    #[test]
    fn removal_decreases_count_by_exactly_the_removed_quantity(
        quantities in proptest::collection::vec(1u32..50, 2..6),
        victim in 0usize..6,
    ) {
        let mut cart = empty_cart();
        for (i, quantity) in quantities.iter().enumerate() {
            cart.add_item(&product(&format!("P{}", i), "3.00"), 0, *quantity).unwrap();
        }

        let victim = victim % quantities.len();
        let id = format!("P{}_V1", victim);
        let before = cart.count();

        prop_assert!(cart.remove_item(&id));
        prop_assert_eq!(cart.count(), before - u64::from(quantities[victim]));
        prop_assert!(cart.get(&id).is_none());
    }
}
