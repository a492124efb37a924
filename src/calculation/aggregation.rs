//! Allocation aggregation and the end-to-end allocation pipeline.
//!
//! Servers keep what they earned minus their contributions plus any refunds;
//! pool workers receive their distributed shares. The final payout list is
//! merged by employee id, so someone who both served and worked a pool gets a
//! single line.

use std::collections::HashMap;

use tracing::debug;

use crate::error::{EngineError, EngineResult};
use crate::models::{
    AllocationResult, AuditStep, AuditTrace, Contribution, ContributionPool, PoolWorker,
    ServerEarning, ServerResult, SplitItem,
};

use super::contribution::compute_contributions;
use super::distribution::{PoolAllocation, allocate_pool};
use super::rounding::sum_cents;
use super::validation::validate_inputs;

/// Server summaries and payout lines, including the audit steps that built them.
#[derive(Debug, Clone)]
pub struct AggregatedResults {
    /// One summary per server, in input order.
    pub server_results: Vec<ServerResult>,
    /// One payout line per distinct employee.
    pub split_items: Vec<SplitItem>,
    /// The retention step followed by the merge step.
    pub audit_steps: Vec<AuditStep>,
}

/// Payout lines keyed by employee id, kept in first-credit order.
#[derive(Debug, Default)]
struct SplitLedger {
    index: HashMap<String, usize>,
    items: Vec<SplitItem>,
    merged: Vec<String>,
}

impl SplitLedger {
    /// Opens a line for an employee, or adds to the one they already have.
    fn credit(&mut self, employee_id: &str, amount_cents: i64) -> EngineResult<()> {
        match self.index.get(employee_id) {
            Some(&position) => {
                let line = &mut self.items[position];
                line.amount_cents = line.amount_cents.checked_add(amount_cents).ok_or_else(|| {
                    EngineError::CalculationError {
                        message: format!("payout line for '{}' overflowed", employee_id),
                    }
                })?;
                if !self.merged.iter().any(|id| id == employee_id) {
                    self.merged.push(employee_id.to_string());
                }
            }
            None => {
                self.index.insert(employee_id.to_string(), self.items.len());
                self.items.push(SplitItem {
                    employee_id: employee_id.to_string(),
                    amount_cents,
                });
            }
        }
        Ok(())
    }

    fn contains(&self, employee_id: &str) -> bool {
        self.index.contains_key(employee_id)
    }
}

/// Combines contributions and settled pools into server summaries and payout lines.
///
/// Every server gets a payout line, even at zero. A pool worker's share opens a
/// new line or is added to the employee's existing one; a zero share does not
/// open a line on its own.
///
/// # Arguments
///
/// * `servers` - The servers who earned tips this period
/// * `contributions` - Every (server, pool) contribution
/// * `allocations` - Every settled pool
/// * `step_number` - The first step number for audit trail sequencing
pub fn aggregate_results(
    servers: &[ServerEarning],
    contributions: &[Contribution],
    allocations: &[PoolAllocation],
    step_number: u32,
) -> EngineResult<AggregatedResults> {
    let contributed = totals_by_server(
        contributions
            .iter()
            .map(|c| (c.server_id.as_str(), c.amount_cents)),
        "contributed",
    )?;
    let refunded = totals_by_server(
        allocations
            .iter()
            .flat_map(|a| &a.refunds)
            .map(|r| (r.server_id.as_str(), r.refund_cents)),
        "refunded",
    )?;

    let server_results = servers
        .iter()
        .map(|server| {
            let contributed_amount_cents = contributed
                .get(server.employee_id.as_str())
                .copied()
                .unwrap_or(0);
            let refunded_amount_cents = refunded
                .get(server.employee_id.as_str())
                .copied()
                .unwrap_or(0);
            let retained_amount_cents = server
                .earned_amount_cents
                .checked_sub(contributed_amount_cents)
                .and_then(|v| v.checked_add(refunded_amount_cents))
                .ok_or_else(|| EngineError::CalculationError {
                    message: format!("retained amount for '{}' overflowed", server.employee_id),
                })?;
            Ok(ServerResult {
                employee_id: server.employee_id.clone(),
                earned_amount_cents: server.earned_amount_cents,
                contributed_amount_cents,
                retained_amount_cents,
                refunded_amount_cents,
            })
        })
        .collect::<EngineResult<Vec<ServerResult>>>()?;

    let total_earned = sum_cents(servers.iter().map(|s| s.earned_amount_cents), "earned")?;
    let total_contributed = sum_cents(contributed.values().copied(), "contributed")?;
    let total_refunded = sum_cents(refunded.values().copied(), "refunded")?;

    let retention_step = AuditStep {
        step_number,
        rule_id: "server_retention".to_string(),
        rule_name: "Server Retention".to_string(),
        input: serde_json::json!({
            "server_count": servers.len(),
            "total_earned_cents": total_earned,
            "total_contributed_cents": total_contributed,
            "total_refunded_cents": total_refunded
        }),
        output: serde_json::json!({
            "servers": server_results
                .iter()
                .map(|r| serde_json::json!({
                    "employee_id": r.employee_id,
                    "retained_amount_cents": r.retained_amount_cents,
                    "refunded_amount_cents": r.refunded_amount_cents
                }))
                .collect::<Vec<_>>()
        }),
        reasoning: "Retained = earned - contributed + refunded for each server".to_string(),
    };

    let mut ledger = SplitLedger::default();
    for result in &server_results {
        ledger.credit(&result.employee_id, result.retained_amount_cents)?;
    }
    for distribution in allocations.iter().flat_map(|a| &a.distributions) {
        if distribution.amount_cents == 0 && !ledger.contains(&distribution.employee_id) {
            continue;
        }
        ledger.credit(&distribution.employee_id, distribution.amount_cents)?;
    }

    let total_split = sum_cents(ledger.items.iter().map(|i| i.amount_cents), "split")?;
    let merge_step = AuditStep {
        step_number: step_number + 1,
        rule_id: "split_merge".to_string(),
        rule_name: "Split Item Merge".to_string(),
        input: serde_json::json!({
            "server_lines": server_results.len(),
            "distribution_lines": allocations.iter().map(|a| a.distributions.len()).sum::<usize>()
        }),
        output: serde_json::json!({
            "split_item_count": ledger.items.len(),
            "merged_employee_ids": ledger.merged,
            "total_split_cents": total_split
        }),
        reasoning: if ledger.merged.is_empty() {
            format!("{} payout lines, no employee both served and worked a pool", ledger.items.len())
        } else {
            format!(
                "{} payout lines; merged server and pool shares for {}",
                ledger.items.len(),
                ledger.merged.join(", ")
            )
        },
    };

    Ok(AggregatedResults {
        server_results,
        split_items: ledger.items,
        audit_steps: vec![retention_step, merge_step],
    })
}

/// Sums cent amounts per server id.
fn totals_by_server<'a>(
    amounts: impl Iterator<Item = (&'a str, i64)>,
    what: &str,
) -> EngineResult<HashMap<&'a str, i64>> {
    let mut totals: HashMap<&str, i64> = HashMap::new();
    for (server_id, cents) in amounts {
        let total = totals.entry(server_id).or_default();
        *total = total
            .checked_add(cents)
            .ok_or_else(|| EngineError::CalculationError {
                message: format!("{} total for '{}' overflowed", what, server_id),
            })?;
    }
    Ok(totals)
}

/// Computes a full percentage-pool allocation for one tip period.
///
/// Validates the input, computes every contribution, settles every pool, and
/// aggregates the outcome. The result is checked for money conservation before
/// it is returned. The function is pure: identical input yields identical output.
///
/// # Arguments
///
/// * `servers` - The servers who earned tips this period
/// * `pools` - The configured contribution pools
/// * `workers` - The pool workers present during the period
///
/// # Returns
///
/// Returns the complete [`AllocationResult`], or the first validation error.
///
/// # Examples
///
/// ```
/// use tip_pool_engine::calculation::compute_percentage_pool_allocations;
/// use tip_pool_engine::models::{ContributionPool, PoolWorker, ServerEarning, ShareMethod};
/// use rust_decimal::Decimal;
///
/// let servers = vec![ServerEarning::new("srv_001", "Alex", 20000)];
/// let pools = vec![
///     ContributionPool::new("dish", "Dish", Decimal::from(5), ShareMethod::Hours)
///         .with_eligible(["dish_001"]),
/// ];
/// let workers = vec![PoolWorker::new("dish_001", "Sam", Decimal::from(6), "Dishwasher")];
///
/// let result = compute_percentage_pool_allocations(&servers, &pools, &workers).unwrap();
/// assert_eq!(result.split_for("srv_001").unwrap().amount_cents, 19000);
/// assert_eq!(result.split_for("dish_001").unwrap().amount_cents, 1000);
/// assert_eq!(result.total_split_cents().unwrap(), 20000);
/// ```
pub fn compute_percentage_pool_allocations(
    servers: &[ServerEarning],
    pools: &[ContributionPool],
    workers: &[PoolWorker],
) -> EngineResult<AllocationResult> {
    validate_inputs(servers, pools, workers)?;

    let mut step_number: u32 = 1;
    let mut audit_trace = AuditTrace::default();

    let contribution_calculation = compute_contributions(servers, pools, step_number)?;
    audit_trace.steps.push(contribution_calculation.audit_step);
    step_number += 1;
    let contributions = contribution_calculation.contributions;

    let mut allocations = Vec::with_capacity(pools.len());
    for pool in pools {
        let pool_contributions: Vec<Contribution> = contributions
            .iter()
            .filter(|c| c.pool_id == pool.id)
            .cloned()
            .collect();
        let allocation = allocate_pool(pool, &pool_contributions, workers, step_number)?;
        audit_trace.steps.push(allocation.audit_step.clone());
        audit_trace.warnings.extend(allocation.warnings.iter().cloned());
        step_number += 1;
        allocations.push(allocation);
    }

    let aggregated = aggregate_results(servers, &contributions, &allocations, step_number)?;
    audit_trace.steps.extend(aggregated.audit_steps);

    let mut distributions = Vec::new();
    let mut refunds = Vec::new();
    let mut pool_results = Vec::with_capacity(allocations.len());
    for allocation in allocations {
        distributions.extend(allocation.distributions);
        refunds.extend(allocation.refunds);
        pool_results.push(allocation.pool_result);
    }

    let result = AllocationResult {
        contributions,
        distributions,
        refunds,
        server_results: aggregated.server_results,
        pool_results,
        split_items: aggregated.split_items,
        audit_trace,
    };

    let total_earned = sum_cents(servers.iter().map(|s| s.earned_amount_cents), "earned")?;
    result.verify_balanced(total_earned)?;

    debug!(
        servers = servers.len(),
        pools = pools.len(),
        workers = workers.len(),
        total_earned,
        split_items = result.split_items.len(),
        "Computed pool allocation"
    );

    Ok(result)
}
