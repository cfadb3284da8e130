//! Price arithmetic using decimal amounts.
//!
//! Prices are plain `Decimal` amounts in the store's single currency. All
//! rounding goes through [`round_to_cents`] so displayed and persisted values
//! agree.

use rust_decimal::{Decimal, RoundingStrategy};

/// Round an amount to two decimal places, halves away from zero.
#[must_use]
pub fn round_to_cents(amount: Decimal) -> Decimal {
    amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// Raise `price` by `percent` percent and round to cents.
///
/// `mark_up(100, 25)` is `125.00`. Used to derive a "before discount" price
/// from the current one.
#[must_use]
pub fn mark_up(price: Decimal, percent: Decimal) -> Decimal {
    round_to_cents(price * (Decimal::ONE + percent / Decimal::ONE_HUNDRED))
}

/// Total price of `quantity` units at `price` each.
#[must_use]
pub fn line_total(price: Decimal, quantity: u32) -> Decimal {
    price * Decimal::from(quantity)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_to_cents_half_away_from_zero() {
        assert_eq!(round_to_cents(Decimal::new(12_345, 3)), Decimal::new(1235, 2));
        assert_eq!(round_to_cents(Decimal::new(12_344, 3)), Decimal::new(1234, 2));
        assert_eq!(round_to_cents(Decimal::new(1999, 2)), Decimal::new(1999, 2));
    }

    #[test]
    fn test_mark_up() {
        assert_eq!(
            mark_up(Decimal::ONE_HUNDRED, Decimal::from(25)),
            Decimal::new(12_500, 2)
        );
        // 109.95 * 1.1 = 120.945 -> 120.95
        assert_eq!(
            mark_up(Decimal::new(10_995, 2), Decimal::TEN),
            Decimal::new(12_095, 2)
        );
    }

    #[test]
    fn test_mark_up_bounds_for_hundred() {
        let low = mark_up(Decimal::ONE_HUNDRED, Decimal::TEN);
        let high = mark_up(Decimal::ONE_HUNDRED, Decimal::new(39_999_999, 6));
        assert_eq!(low, Decimal::new(11_000, 2));
        assert_eq!(high, Decimal::new(14_000, 2));
    }

    #[test]
    fn test_line_total() {
        assert_eq!(line_total(Decimal::from(50), 2), Decimal::ONE_HUNDRED);
        assert_eq!(line_total(Decimal::new(1999, 2), 3), Decimal::new(5997, 2));
    }
}
