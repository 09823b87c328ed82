//! Prices are minor units (1000 = 10.00) held in `i64`.

use crate::error::{AppError, AppResult};

/// Highest unit price a product may carry (1,000,000,000.00).
pub const MAX_PRICE: i64 = 100_000_000_000;

/// Highest stock a product may carry. Cart lines never exceed stock, so this also bounds them.
pub const MAX_UNITS: i32 = 1_000_000;

pub const TOTAL_OUT_OF_RANGE: &str = "Total price is out of range.";

pub fn line_total(price: i64, quantity: i32) -> AppResult<i64> {
    price
        .checked_mul(i64::from(quantity))
        .ok_or_else(|| AppError::bad_request(TOTAL_OUT_OF_RANGE))
}

pub fn sum<I>(amounts: I) -> AppResult<i64>
where
    I: IntoIterator<Item = i64>,
{
    amounts
        .into_iter()
        .try_fold(0i64, |acc, amount| acc.checked_add(amount))
        .ok_or_else(|| AppError::bad_request(TOTAL_OUT_OF_RANGE))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn line_total_multiplies_price_by_quantity() {
        assert_eq!(line_total(1250, 3).unwrap(), 3750);
    }

    #[test]
    fn line_total_rejects_overflow() {
        let err = line_total(i64::MAX / 2 + 1, 2).unwrap_err();
        assert!(matches!(err, AppError::BadRequest(msg) if msg == TOTAL_OUT_OF_RANGE));
    }

    #[test]
    fn sum_rejects_overflow() {
        assert_eq!(sum([100, 250, 5]).unwrap(), 355);
        assert!(sum([i64::MAX, 1]).is_err());
    }

    #[test]
    fn bounded_lines_fit_in_a_total() {
        let line = line_total(MAX_PRICE, MAX_UNITS).unwrap();
        assert!(sum([line; 64]).is_ok());
    }
}
