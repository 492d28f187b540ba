// src/money.rs
//! Prices travel as major-unit decimals on the wire and are stored as integer cents.

pub fn dollars_to_cents(dollars: f64) -> i64 {
    (dollars * 100.0).round() as i64
}

pub fn cents_to_dollars(cents: i64) -> f64 {
    cents as f64 / 100.0
}

/// Whether a wire price can be stored: finite, non-negative and within range once scaled.
pub fn is_valid_price(dollars: f64) -> bool {
    dollars.is_finite() && dollars >= 0.0 && dollars * 100.0 <= i64::MAX as f64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn converts_dollars_to_whole_cents() {
        assert_eq!(dollars_to_cents(12.34), 1234);
        assert_eq!(dollars_to_cents(0.0), 0);
        assert_eq!(dollars_to_cents(19.999), 2000);
        assert_eq!(dollars_to_cents(0.005), 1);
    }

    #[test]
    fn converts_cents_back_to_dollars() {
        assert_eq!(cents_to_dollars(1234), 12.34);
        assert_eq!(cents_to_dollars(5), 0.05);
    }

    #[test]
    fn rejects_unstorable_prices() {
        assert!(is_valid_price(0.0));
        assert!(is_valid_price(129.99));
        assert!(!is_valid_price(-0.01));
        assert!(!is_valid_price(f64::NAN));
        assert!(!is_valid_price(f64::INFINITY));
        assert!(!is_valid_price(1e300));
    }
}
