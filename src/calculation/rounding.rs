//! Cent rounding and proportional apportionment.
//!
//! Every cent amount in the engine passes through [`round_to_cents`], and every
//! proportional split (pool distributions and refunds) through [`apportion`],
//! which guarantees the shares sum to exactly the total being split.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};

use crate::error::{EngineError, EngineResult};

/// Rounds a decimal cent amount to the nearest whole cent, half away from zero.
///
/// # Examples
///
/// ```
/// use tip_pool_engine::calculation::round_to_cents;
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// assert_eq!(round_to_cents(Decimal::from_str("16.65").unwrap()).unwrap(), 17);
/// assert_eq!(round_to_cents(Decimal::from_str("16.5").unwrap()).unwrap(), 17);
/// assert_eq!(round_to_cents(Decimal::from_str("16.49").unwrap()).unwrap(), 16);
/// ```
pub fn round_to_cents(value: Decimal) -> EngineResult<i64> {
    value
        .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
        .to_i64()
        .ok_or_else(|| EngineError::CalculationError {
            message: format!("amount {} does not fit in whole cents", value),
        })
}

/// Adds up cent amounts, failing instead of overflowing.
///
/// `what` names the total in the error message.
///
/// # Examples
///
/// ```
/// use tip_pool_engine::calculation::sum_cents;
///
/// assert_eq!(sum_cents([600, 450], "refunds").unwrap(), 1050);
/// assert!(sum_cents([i64::MAX, 1], "earnings").is_err());
/// ```
pub fn sum_cents<I>(amounts: I, what: &str) -> EngineResult<i64>
where
    I: IntoIterator<Item = i64>,
{
    amounts
        .into_iter()
        .try_fold(0i64, |acc, amount| acc.checked_add(amount))
        .ok_or_else(|| EngineError::CalculationError {
            message: format!("total {} overflowed", what),
        })
}

/// Splits `total_cents` across recipients in proportion to `weights`.
///
/// Each recipient with a positive weight gets `round(total * weight / Σweight)`,
/// and the last positive-weight recipient absorbs the signed residual so the
/// shares sum to `total_cents` exactly. Recipients with zero weight get 0.
/// A rounded share never exceeds the amount still unassigned, so no share can
/// go negative however many recipients round up.
///
/// Returns all zeros when `total_cents` is 0 or no weight is positive.
///
/// # Examples
///
/// ```
/// use tip_pool_engine::calculation::apportion;
/// use rust_decimal::Decimal;
///
/// let shares = apportion(1000, &[Decimal::from(6), Decimal::from(4)]).unwrap();
/// assert_eq!(shares, vec![600, 400]);
///
/// let shares = apportion(100, &[Decimal::ONE, Decimal::ONE, Decimal::ONE]).unwrap();
/// assert_eq!(shares, vec![33, 33, 34]);
/// ```
pub fn apportion(total_cents: i64, weights: &[Decimal]) -> EngineResult<Vec<i64>> {
    if total_cents < 0 {
        return Err(EngineError::CalculationError {
            message: format!("cannot apportion negative total {}", total_cents),
        });
    }

    let mut shares = vec![0; weights.len()];

    let total_weight = weights
        .iter()
        .filter(|w| w.is_sign_positive() && !w.is_zero())
        .try_fold(Decimal::ZERO, |acc, w| acc.checked_add(*w))
        .ok_or_else(|| EngineError::CalculationError {
            message: "total weight overflowed".to_string(),
        })?;

    let Some(last) = weights
        .iter()
        .rposition(|w| w.is_sign_positive() && !w.is_zero())
    else {
        return Ok(shares);
    };
    if total_cents == 0 {
        return Ok(shares);
    }

    let total = Decimal::from(total_cents);
    let mut remaining = total_cents;

    for (index, weight) in weights.iter().enumerate() {
        if !weight.is_sign_positive() || weight.is_zero() {
            continue;
        }
        if index == last {
            shares[index] = remaining;
            break;
        }

        // Huge weights overflow the product; the ratio is at most 1 and cannot
        let exact = total
            .checked_mul(*weight)
            .and_then(|v| v.checked_div(total_weight))
            .or_else(|| {
                weight
                    .checked_div(total_weight)
                    .and_then(|ratio| total.checked_mul(ratio))
            })
            .ok_or_else(|| EngineError::CalculationError {
                message: format!("share of {} at weight {} overflowed", total_cents, weight),
            })?;
        let share = round_to_cents(exact)?.min(remaining);
        shares[index] = share;
        remaining -= share;
    }

    Ok(shares)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn weights(values: &[&str]) -> Vec<Decimal> {
        values.iter().map(|v| dec(v)).collect()
    }

    #[test]
    fn test_round_half_away_from_zero() {
        assert_eq!(round_to_cents(dec("0.5")).unwrap(), 1);
        assert_eq!(round_to_cents(dec("1.5")).unwrap(), 2);
        assert_eq!(round_to_cents(dec("2.5")).unwrap(), 3);
        assert_eq!(round_to_cents(dec("-2.5")).unwrap(), -3);
    }

    /// 333 cents at 5% is 16.65, which rounds to 17
    #[test]
    fn test_round_333_at_five_percent() {
        let exact = dec("333") * dec("5") / dec("100");
        assert_eq!(round_to_cents(exact).unwrap(), 17);
    }

    #[test]
    fn test_round_out_of_range_is_error() {
        let result = round_to_cents(Decimal::MAX);
        assert!(matches!(result, Err(EngineError::CalculationError { .. })));
    }

    /// Hours 6 and 4 splitting 1000 cents
    #[test]
    fn test_apportion_by_hours() {
        assert_eq!(apportion(1000, &weights(&["6", "4"])).unwrap(), vec![600, 400]);
    }

    /// Role weights 3 and 1 splitting 1000 cents
    #[test]
    fn test_apportion_by_role_weight() {
        assert_eq!(apportion(1000, &weights(&["3", "1"])).unwrap(), vec![750, 250]);
    }

    #[test]
    fn test_last_recipient_absorbs_positive_residual() {
        assert_eq!(apportion(100, &weights(&["1", "1", "1"])).unwrap(), vec![33, 33, 34]);
    }

    #[test]
    fn test_last_recipient_absorbs_negative_residual() {
        // 5/3 = 1.67 rounds to 2 for each of the first two
        assert_eq!(apportion(5, &weights(&["1", "1", "1"])).unwrap(), vec![2, 2, 1]);
    }

    #[test]
    fn test_rounded_shares_never_exceed_remaining() {
        // Each exact share is 0.5, which rounds up to 1
        let shares = apportion(3, &weights(&["1", "1", "1", "1", "1", "1"])).unwrap();
        assert_eq!(shares, vec![1, 1, 1, 0, 0, 0]);
        assert_eq!(shares.iter().sum::<i64>(), 3);
    }

    #[test]
    fn test_zero_weights_are_skipped_and_never_absorb() {
        let shares = apportion(1000, &weights(&["6", "0", "4", "0"])).unwrap();
        assert_eq!(shares, vec![600, 0, 400, 0]);
    }

    #[test]
    fn test_all_zero_weights_yield_zero_shares() {
        assert_eq!(apportion(1000, &weights(&["0", "0"])).unwrap(), vec![0, 0]);
    }

    #[test]
    fn test_zero_total_yields_zero_shares() {
        assert_eq!(apportion(0, &weights(&["6", "4"])).unwrap(), vec![0, 0]);
    }

    #[test]
    fn test_empty_weights() {
        assert!(apportion(1000, &[]).unwrap().is_empty());
    }

    #[test]
    fn test_single_recipient_takes_all() {
        assert_eq!(apportion(1751, &weights(&["0.25"])).unwrap(), vec![1751]);
    }

    #[test]
    fn test_fractional_hours() {
        let shares = apportion(1001, &weights(&["7.5", "2.5"])).unwrap();
        // 1001 * 0.75 = 750.75 -> 751, last takes 250
        assert_eq!(shares, vec![751, 250]);
    }

    #[test]
    fn test_skewed_weights_conserve_total() {
        let shares = apportion(999_999, &weights(&["0.0001", "1000000", "0.0001", "3"])).unwrap();
        assert_eq!(shares.iter().sum::<i64>(), 999_999);
        assert!(shares.iter().all(|s| *s >= 0));
    }

    #[test]
    fn test_negative_total_is_error() {
        assert!(apportion(-1, &weights(&["1"])).is_err());
    }

    #[test]
    fn test_huge_hours_do_not_overflow() {
        let shares = apportion(
            1_000_000_000,
            &weights(&["10000000000000000000000000000", "30000000000000000000000000000"]),
        )
        .unwrap();
        assert_eq!(shares, vec![250_000_000, 750_000_000]);
    }

    #[test]
    fn test_sum_cents_adds_amounts() {
        assert_eq!(sum_cents([1000, 600, 0], "contributions").unwrap(), 1600);
        assert_eq!(sum_cents(Vec::<i64>::new(), "contributions").unwrap(), 0);
    }

    #[test]
    fn test_sum_cents_overflow_is_error() {
        let result = sum_cents([i64::MAX / 2 + 1, i64::MAX / 2 + 1], "earnings");
        assert!(matches!(result, Err(EngineError::CalculationError { .. })));
    }
}
