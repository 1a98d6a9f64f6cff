//! Currency amounts.
//!
//! Prices and totals are exact decimals; they serialize as JSON numbers. `Decimal` arithmetic
//! panics on overflow, so every total goes through the checked helpers here.

use rust_decimal::{Decimal, RoundingStrategy};

pub type Money = Decimal;

/// Highest price a menu item may carry: 1,000,000.00.
pub const MAX_PRICE: Money = Decimal::from_parts(100_000_000, 0, 0, false, 2);

/// Rounds to cents, halves away from zero.
pub fn round2(amount: Money) -> Money {
    amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// `price * quantity`, or `None` when it does not fit.
pub fn line_total(price: Money, quantity: u32) -> Option<Money> {
    price.checked_mul(Decimal::from(quantity))
}

/// Sum of `amounts`, or `None` on overflow.
pub fn checked_sum(amounts: impl IntoIterator<Item = Money>) -> Option<Money> {
    amounts
        .into_iter()
        .try_fold(Money::ZERO, |total, amount| total.checked_add(amount))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round2_rounds_halves_away_from_zero() {
        assert_eq!(round2(Decimal::new(1005, 3)), Decimal::new(101, 2));
        assert_eq!(round2(Decimal::new(1004, 3)), Decimal::new(100, 2));
    }

    #[test]
    fn line_total_is_exact() {
        // 3 x 0.10 is 0.30, not 0.30000000000000004
        assert_eq!(line_total(Decimal::new(10, 2), 3), Some(Decimal::new(30, 2)));
    }

    #[test]
    fn overflow_is_reported_not_raised() {
        assert_eq!(line_total(Decimal::MAX, 2), None);
        assert_eq!(checked_sum([Decimal::MAX, Decimal::ONE]), None);
        assert_eq!(
            checked_sum([Decimal::new(150, 2), Decimal::new(250, 2)]),
            Some(Decimal::new(400, 2))
        );
    }

    #[test]
    fn max_price_is_one_million() {
        assert_eq!(MAX_PRICE, Decimal::new(1_000_000, 0));
        // The largest line a cart can hold still fits
        assert!(line_total(MAX_PRICE, u32::MAX).is_some());
    }
}
