//! Pool refund functionality.
//!
//! When a pool has nobody to pay this period, its contributions go back to the
//! servers who made them, in proportion to what each contributed.

use rust_decimal::Decimal;

use crate::error::EngineResult;
use crate::models::{Contribution, PoolRefund};

use super::rounding::apportion;

/// Refunds a pool's total to its contributing servers.
///
/// Each server receives `round(total * contribution / total)` with the last
/// contributor absorbing any rounding residual. When `total_cents` is 0 no
/// ratio is computed and every contributor gets a zero refund.
///
/// # Arguments
///
/// * `pool_id` - The pool being refunded
/// * `contributions` - The pool's contributions, in server order
/// * `total_cents` - The pool's total contributed amount
///
/// # Examples
///
/// ```
/// use tip_pool_engine::calculation::refund_pool;
/// use tip_pool_engine::models::Contribution;
///
/// let contributions = vec![
///     Contribution { server_id: "srv_001".into(), pool_id: "bus".into(), amount_cents: 600 },
///     Contribution { server_id: "srv_002".into(), pool_id: "bus".into(), amount_cents: 450 },
/// ];
///
/// let refunds = refund_pool("bus", &contributions, 1050).unwrap();
/// assert_eq!(refunds[0].refund_cents, 600);
/// assert_eq!(refunds[1].refund_cents, 450);
/// ```
pub fn refund_pool(
    pool_id: &str,
    contributions: &[Contribution],
    total_cents: i64,
) -> EngineResult<Vec<PoolRefund>> {
    let weights: Vec<Decimal> = contributions
        .iter()
        .map(|c| Decimal::from(c.amount_cents))
        .collect();
    let shares = apportion(total_cents, &weights)?;

    Ok(contributions
        .iter()
        .zip(shares)
        .map(|(contribution, refund_cents)| PoolRefund {
            server_id: contribution.server_id.clone(),
            pool_id: pool_id.to_string(),
            refund_cents,
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn contribution(server_id: &str, amount_cents: i64) -> Contribution {
        Contribution {
            server_id: server_id.to_string(),
            pool_id: "bus".to_string(),
            amount_cents,
        }
    }

    /// RF-001: single contributor gets everything back
    #[test]
    fn test_single_contributor_full_refund() {
        let refunds = refund_pool("bus", &[contribution("srv_001", 1000)], 1000).unwrap();

        assert_eq!(
            refunds,
            vec![PoolRefund {
                server_id: "srv_001".to_string(),
                pool_id: "bus".to_string(),
                refund_cents: 1000,
            }]
        );
    }

    /// RF-002: refunds are proportional to contributions
    #[test]
    fn test_refunds_match_contributions() {
        let contributions = vec![
            contribution("srv_001", 17),
            contribution("srv_002", 333),
            contribution("srv_003", 1),
        ];

        let refunds = refund_pool("bus", &contributions, 351).unwrap();
        let amounts: Vec<i64> = refunds.iter().map(|r| r.refund_cents).collect();

        assert_eq!(amounts, vec![17, 333, 1]);
    }

    /// RF-003: zero total emits zero refunds for every contributor
    #[test]
    fn test_zero_total_emits_zero_refunds() {
        let contributions = vec![contribution("srv_001", 0), contribution("srv_002", 0)];

        let refunds = refund_pool("bus", &contributions, 0).unwrap();

        assert_eq!(refunds.len(), 2);
        assert!(refunds.iter().all(|r| r.refund_cents == 0));
    }

    #[test]
    fn test_zero_contributor_receives_zero() {
        let contributions = vec![contribution("srv_001", 500), contribution("srv_002", 0)];

        let refunds = refund_pool("bus", &contributions, 500).unwrap();

        assert_eq!(refunds[0].refund_cents, 500);
        assert_eq!(refunds[1].refund_cents, 0);
    }

    #[test]
    fn test_no_contributions() {
        assert!(refund_pool("bus", &[], 0).unwrap().is_empty());
    }
}
