use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Fixed 5% VAT rate applied to the subtotal.
pub fn vat_rate() -> Decimal {
    Decimal::new(5, 2)
}

/// Derived monetary snapshot of the cart. Never stored, always recomputed from
/// the line items on every read.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Totals {
    pub count: u64,
    pub subtotal: Decimal,
    pub vat: Decimal,
    pub total: Decimal,
}

/// Display form of an amount: thousands-separated, two decimal places.
pub fn format_amount(amount: Decimal) -> String {
    let raw = format!("{:.2}", amount.round_dp(2));
    let (int_part, frac_part) = match raw.split_once('.') {
        Some(parts) => parts,
        None => (raw.as_str(), "00"),
    };

    let negative = int_part.starts_with('-');
    let digits = int_part.trim_start_matches('-');
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    format!("{}{}.{}", if negative { "-" } else { "" }, grouped, frac_part)
}
