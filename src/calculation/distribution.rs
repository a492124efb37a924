//! Pool distribution functionality.
//!
//! This module settles each pool for the period: its contributed total is
//! either split among the present eligible workers by the pool's share method,
//! or, if nobody on the roster carries weight, refunded to the servers.

use rust_decimal::Decimal;
use tracing::debug;

use crate::error::EngineResult;
use crate::models::{
    AuditStep, AuditWarning, Contribution, ContributionPool, PoolDistribution, PoolRefund,
    PoolResult, PoolWorker,
};

use super::refund::refund_pool;
use super::roster::{PoolRoster, build_pool_roster};
use super::rounding::{apportion, sum_cents};

/// The settled outcome of one pool, including the audit step.
#[derive(Debug, Clone)]
pub struct PoolAllocation {
    /// The pool's balance summary.
    pub pool_result: PoolResult,
    /// Worker shares; empty when the pool was refunded.
    pub distributions: Vec<PoolDistribution>,
    /// Server refunds; empty when the pool was distributed.
    pub refunds: Vec<PoolRefund>,
    /// Conditions noticed while building the roster or refunding.
    pub warnings: Vec<AuditWarning>,
    /// The audit step recording this pool's settlement.
    pub audit_step: AuditStep,
}

/// Splits `total_cents` across a roster in proportion to each worker's weight.
///
/// Zero-weight workers are omitted from the result. The last positive-weight
/// worker absorbs the rounding residual.
pub fn distribute_pool(
    pool_id: &str,
    roster: &PoolRoster<'_>,
    total_cents: i64,
) -> EngineResult<Vec<PoolDistribution>> {
    let shares = apportion(total_cents, &roster.weights())?;

    Ok(roster
        .entries
        .iter()
        .zip(shares)
        .filter(|(entry, _)| entry.weight > Decimal::ZERO)
        .map(|(entry, amount_cents)| PoolDistribution {
            pool_id: pool_id.to_string(),
            employee_id: entry.worker.employee_id.clone(),
            weight: entry.weight,
            amount_cents,
        })
        .collect())
}

/// Settles one pool: distribute to its roster, or refund its contributors.
///
/// # Arguments
///
/// * `pool` - The pool to settle
/// * `contributions` - Contributions targeting this pool, in server order
/// * `workers` - Every worker present during the period
/// * `step_number` - The step number for audit trail sequencing
///
/// # Examples
///
/// ```
/// use tip_pool_engine::calculation::allocate_pool;
/// use tip_pool_engine::models::{Contribution, ContributionPool, PoolWorker, ShareMethod};
/// use rust_decimal::Decimal;
///
/// let pool = ContributionPool::new("dish", "Dish", Decimal::from(5), ShareMethod::Hours)
///     .with_eligible(["dish_001"]);
/// let contributions = vec![
///     Contribution { server_id: "srv_001".into(), pool_id: "dish".into(), amount_cents: 1000 },
///     Contribution { server_id: "srv_002".into(), pool_id: "dish".into(), amount_cents: 750 },
/// ];
/// let workers = vec![PoolWorker::new("dish_001", "Sam", Decimal::from(6), "Dishwasher")];
///
/// let settled = allocate_pool(&pool, &contributions, &workers, 2).unwrap();
/// assert_eq!(settled.pool_result.total_distributed, 1750);
/// assert_eq!(settled.distributions[0].amount_cents, 1750);
/// ```
pub fn allocate_pool(
    pool: &ContributionPool,
    contributions: &[Contribution],
    workers: &[PoolWorker],
    step_number: u32,
) -> EngineResult<PoolAllocation> {
    let total_contributed = sum_cents(contributions.iter().map(|c| c.amount_cents), "contributed")?;
    let roster = build_pool_roster(pool, workers)?;
    let mut warnings = roster.warnings.clone();

    let input = serde_json::json!({
        "pool_id": pool.id,
        "share_method": pool.share_method.as_str(),
        "total_contributed": total_contributed,
        "roster": roster
            .entries
            .iter()
            .map(|e| serde_json::json!({
                "employee_id": e.worker.employee_id,
                "weight": e.weight.normalize().to_string()
            }))
            .collect::<Vec<_>>(),
        "total_weight": roster.total_weight.normalize().to_string()
    });

    if roster.has_recipients() {
        let distributions = distribute_pool(&pool.id, &roster, total_contributed)?;
        debug!(
            pool_id = %pool.id,
            total_contributed,
            recipients = distributions.len(),
            "Distributed pool"
        );

        let audit_step = AuditStep {
            step_number,
            rule_id: "pool_distribution".to_string(),
            rule_name: "Pool Distribution".to_string(),
            input,
            output: serde_json::json!({
                "outcome": "distributed",
                "shares": distributions
                    .iter()
                    .map(|d| serde_json::json!({
                        "employee_id": d.employee_id,
                        "amount_cents": d.amount_cents
                    }))
                    .collect::<Vec<_>>()
            }),
            reasoning: format!(
                "{} cents split by {} across {} present workers (total weight {})",
                total_contributed,
                pool.share_method.as_str(),
                distributions.len(),
                roster.total_weight.normalize()
            ),
        };

        return Ok(PoolAllocation {
            pool_result: PoolResult {
                pool_id: pool.id.clone(),
                share_method: pool.share_method,
                total_contributed,
                total_distributed: total_contributed,
                total_refunded: 0,
            },
            distributions,
            refunds: Vec::new(),
            warnings,
            audit_step,
        });
    }

    let refunds = refund_pool(&pool.id, contributions, total_contributed)?;
    debug!(
        pool_id = %pool.id,
        total_contributed,
        contributors = refunds.len(),
        "Refunded pool with no present recipients"
    );
    if total_contributed > 0 {
        warnings.push(AuditWarning::new(
            "POOL_REFUNDED",
            format!(
                "Pool '{}' had no present eligible workers; {} cents refunded to servers",
                pool.id, total_contributed
            ),
            "medium",
        ));
    }

    let audit_step = AuditStep {
        step_number,
        rule_id: "pool_refund".to_string(),
        rule_name: "Pool Refund".to_string(),
        input,
        output: serde_json::json!({
            "outcome": "refunded",
            "refunds": refunds
                .iter()
                .map(|r| serde_json::json!({
                    "server_id": r.server_id,
                    "refund_cents": r.refund_cents
                }))
                .collect::<Vec<_>>()
        }),
        reasoning: format!(
            "No present eligible worker with positive weight - {} cents refunded to {} contributing servers",
            total_contributed,
            refunds.len()
        ),
    };

    Ok(PoolAllocation {
        pool_result: PoolResult {
            pool_id: pool.id.clone(),
            share_method: pool.share_method,
            total_contributed,
            total_distributed: 0,
            total_refunded: total_contributed,
        },
        distributions: Vec::new(),
        refunds,
        warnings,
        audit_step,
    })
}
