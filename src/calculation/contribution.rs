//! Contribution calculation functionality.
//!
//! This module computes what each server owes each pool: the server's earned
//! tips multiplied by the pool's contribution percentage, rounded to the
//! nearest cent.

use rust_decimal::Decimal;

use crate::error::{EngineError, EngineResult};
use crate::models::{AuditStep, Contribution, ContributionPool, ServerEarning};

use super::rounding::{round_to_cents, sum_cents};

/// The result of computing contributions, including the audit step.
#[derive(Debug, Clone)]
pub struct ContributionCalculation {
    /// One contribution per (server, pool) pair, in server-then-pool order.
    pub contributions: Vec<Contribution>,
    /// The audit step recording this calculation.
    pub audit_step: AuditStep,
}

/// Computes `round(earned_cents * percentage / 100)`.
///
/// # Examples
///
/// ```
/// use tip_pool_engine::calculation::contribution_cents;
/// use rust_decimal::Decimal;
///
/// assert_eq!(contribution_cents(333, Decimal::from(5)).unwrap(), 17);
/// assert_eq!(contribution_cents(20000, Decimal::from(5)).unwrap(), 1000);
/// ```
pub fn contribution_cents(earned_cents: i64, percentage: Decimal) -> EngineResult<i64> {
    let exact = Decimal::from(earned_cents)
        .checked_mul(percentage)
        .and_then(|v| v.checked_div(Decimal::ONE_HUNDRED))
        .ok_or_else(|| EngineError::CalculationError {
            message: format!("{}% of {} cents overflowed", percentage, earned_cents),
        })?;
    round_to_cents(exact)
}

/// Computes every server's contribution to every pool.
///
/// The result is the full cross product in server-then-pool order, so a server
/// who earned nothing still appears with a zero contribution to each pool.
/// A contribution never exceeds what the server has left after its earlier
/// pools, which keeps retained amounts non-negative when several pools round
/// up on a tiny earning.
///
/// # Arguments
///
/// * `servers` - The servers who earned tips this period
/// * `pools` - The configured contribution pools
/// * `step_number` - The step number for audit trail sequencing
///
/// # Examples
///
/// ```
/// use tip_pool_engine::calculation::compute_contributions;
/// use tip_pool_engine::models::{ContributionPool, ServerEarning, ShareMethod};
/// use rust_decimal::Decimal;
///
/// let servers = vec![ServerEarning::new("srv_001", "Alex", 20000)];
/// let pools = vec![ContributionPool::new("dish", "Dish", Decimal::from(5), ShareMethod::Hours)];
///
/// let result = compute_contributions(&servers, &pools, 1).unwrap();
/// assert_eq!(result.contributions[0].amount_cents, 1000);
/// ```
pub fn compute_contributions(
    servers: &[ServerEarning],
    pools: &[ContributionPool],
    step_number: u32,
) -> EngineResult<ContributionCalculation> {
    let mut contributions = Vec::with_capacity(servers.len() * pools.len());
    let mut capped = Vec::new();

    for server in servers {
        let mut remaining = server.earned_amount_cents;

        for pool in pools {
            let rounded = contribution_cents(server.earned_amount_cents, pool.contribution_percentage)?;
            let amount_cents = rounded.min(remaining);
            if amount_cents < rounded {
                capped.push(serde_json::json!({
                    "server_id": server.employee_id,
                    "pool_id": pool.id,
                    "rounded": rounded,
                    "capped_to": amount_cents
                }));
            }
            remaining -= amount_cents;

            contributions.push(Contribution {
                server_id: server.employee_id.clone(),
                pool_id: pool.id.clone(),
                amount_cents,
            });
        }
    }

    let total_contributed = sum_cents(contributions.iter().map(|c| c.amount_cents), "contributed")?;
    let total_earned = sum_cents(servers.iter().map(|s| s.earned_amount_cents), "earned")?;

    let audit_step = AuditStep {
        step_number,
        rule_id: "pool_contributions".to_string(),
        rule_name: "Pool Contributions".to_string(),
        input: serde_json::json!({
            "server_count": servers.len(),
            "total_earned_cents": total_earned,
            "pools": pools
                .iter()
                .map(|p| serde_json::json!({
                    "pool_id": p.id,
                    "contribution_percentage": p.contribution_percentage.normalize().to_string()
                }))
                .collect::<Vec<_>>()
        }),
        output: serde_json::json!({
            "contribution_count": contributions.len(),
            "total_contributed_cents": total_contributed,
            "capped": capped
        }),
        reasoning: format!(
            "{} servers x {} pools: {} of {} earned cents owed to pools",
            servers.len(),
            pools.len(),
            total_contributed,
            total_earned
        ),
    };

    Ok(ContributionCalculation {
        contributions,
        audit_step,
    })
}
