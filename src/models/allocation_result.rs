//! Allocation result models for the Tip-Pool Engine.
//!
//! This module contains the [`AllocationResult`] type and the derived records
//! it is assembled from: per-pair contributions, per-worker distributions,
//! per-server refunds, pool and server summaries, the flattened payout list,
//! and an audit trace.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

use super::ShareMethod;

/// Cents a single server owes a single pool for the period.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contribution {
    /// The contributing server's employee id.
    pub server_id: String,
    /// The receiving pool's id.
    pub pool_id: String,
    /// The contribution in cents.
    pub amount_cents: i64,
}

/// Cents a pool worker receives from one pool.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PoolDistribution {
    /// The distributing pool's id.
    pub pool_id: String,
    /// The receiving worker's employee id.
    pub employee_id: String,
    /// The weight the share was computed from.
    pub weight: Decimal,
    /// The distributed share in cents.
    pub amount_cents: i64,
}

/// Cents returned to a contributing server because a pool had no recipients.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PoolRefund {
    /// The refunded server's employee id.
    pub server_id: String,
    /// The refunding pool's id.
    pub pool_id: String,
    /// The refund in cents.
    pub refund_cents: i64,
}

/// Summary of one pool's outcome for the period.
///
/// `total_contributed == total_distributed + total_refunded` always holds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PoolResult {
    /// The pool's id.
    pub pool_id: String,
    /// The share method the pool was split with.
    pub share_method: ShareMethod,
    /// Sum of every server's contribution to the pool.
    pub total_contributed: i64,
    /// Cents distributed to present workers.
    pub total_distributed: i64,
    /// Cents refunded to contributing servers.
    pub total_refunded: i64,
}

impl PoolResult {
    /// Returns true if every contributed cent was either distributed or refunded.
    pub fn is_balanced(&self) -> bool {
        self.total_distributed.checked_add(self.total_refunded) == Some(self.total_contributed)
    }
}

/// Summary of one server's outcome for the period.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerResult {
    /// The server's employee id.
    pub employee_id: String,
    /// Tips earned directly.
    pub earned_amount_cents: i64,
    /// Sum of the server's contributions across all pools.
    pub contributed_amount_cents: i64,
    /// Earned minus contributed plus refunded.
    pub retained_amount_cents: i64,
    /// Sum of refunds received across all pools.
    pub refunded_amount_cents: i64,
}

/// A final per-employee payout line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SplitItem {
    /// The employee being paid.
    pub employee_id: String,
    /// The payout in cents.
    pub amount_cents: i64,
}

/// A single step in the audit trace recording a calculation decision.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditStep {
    /// The sequential step number.
    pub step_number: u32,
    /// The unique identifier of the rule that was applied.
    pub rule_id: String,
    /// The human-readable name of the rule.
    pub rule_name: String,
    /// The input data for this step.
    pub input: serde_json::Value,
    /// The output data from this step.
    pub output: serde_json::Value,
    /// Human-readable explanation of the decision.
    pub reasoning: String,
}

/// A non-fatal condition noticed during allocation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditWarning {
    /// A code identifying the type of warning.
    pub code: String,
    /// A human-readable description of the warning.
    pub message: String,
    /// The severity level (e.g., "low", "medium", "high").
    pub severity: String,
}

impl AuditWarning {
    /// Creates a new warning.
    pub fn new(
        code: impl Into<String>,
        message: impl Into<String>,
        severity: impl Into<String>,
    ) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            severity: severity.into(),
        }
    }
}

/// The complete audit trace for an allocation run.
///
/// Contains no timings so that identical input yields identical output.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditTrace {
    /// The sequence of calculation steps.
    pub steps: Vec<AuditStep>,
    /// Any warnings generated during calculation.
    pub warnings: Vec<AuditWarning>,
}

/// The complete result of a percentage-pool allocation.
///
/// # Example
///
/// ```
/// use tip_pool_engine::models::{AllocationResult, SplitItem};
///
/// let result = AllocationResult {
///     split_items: vec![SplitItem { employee_id: "srv_001".to_string(), amount_cents: 500 }],
///     ..Default::default()
/// };
/// assert_eq!(result.total_split_cents().unwrap(), 500);
/// assert!(result.verify_balanced(500).is_ok());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AllocationResult {
    /// Every (server, pool) contribution, in server-then-pool order.
    pub contributions: Vec<Contribution>,
    /// Every worker share, in pool-then-worker order.
    pub distributions: Vec<PoolDistribution>,
    /// Every refund, in pool-then-server order.
    pub refunds: Vec<PoolRefund>,
    /// One summary per server, in input order.
    pub server_results: Vec<ServerResult>,
    /// One summary per pool, in input order.
    pub pool_results: Vec<PoolResult>,
    /// One payout line per distinct employee.
    pub split_items: Vec<SplitItem>,
    /// Record of every calculation decision.
    pub audit_trace: AuditTrace,
}

impl AllocationResult {
    /// Sum of all payout lines.
    ///
    /// Fails with [`EngineError::CalculationError`] if the sum does not fit in `i64`.
    pub fn total_split_cents(&self) -> EngineResult<i64> {
        self.split_items
            .iter()
            .try_fold(0i64, |acc, item| acc.checked_add(item.amount_cents))
            .ok_or_else(|| EngineError::CalculationError {
                message: "split items total overflowed".to_string(),
            })
    }

    /// Returns the payout line for an employee, if any.
    pub fn split_for(&self, employee_id: &str) -> Option<&SplitItem> {
        self.split_items
            .iter()
            .find(|item| item.employee_id == employee_id)
    }

    /// Returns the summary for a server, if any.
    pub fn server_result(&self, employee_id: &str) -> Option<&ServerResult> {
        self.server_results
            .iter()
            .find(|r| r.employee_id == employee_id)
    }

    /// Returns the summary for a pool, if any.
    pub fn pool_result(&self, pool_id: &str) -> Option<&PoolResult> {
        self.pool_results.iter().find(|r| r.pool_id == pool_id)
    }

    /// Checks money conservation against the total earned by all servers.
    ///
    /// Fails if the payout lines do not sum to `total_earned_cents`, if any pool
    /// is unbalanced, or if any amount is negative.
    pub fn verify_balanced(&self, total_earned_cents: i64) -> EngineResult<()> {
        if let Some(pool) = self.pool_results.iter().find(|p| !p.is_balanced()) {
            return Err(EngineError::CalculationError {
                message: format!(
                    "pool '{}' is unbalanced: contributed {} != distributed {} + refunded {}",
                    pool.pool_id, pool.total_contributed, pool.total_distributed, pool.total_refunded
                ),
            });
        }

        let negative = self
            .split_items
            .iter()
            .map(|i| (i.employee_id.as_str(), i.amount_cents))
            .chain(
                self.server_results
                    .iter()
                    .map(|r| (r.employee_id.as_str(), r.retained_amount_cents)),
            )
            .chain(
                self.distributions
                    .iter()
                    .map(|d| (d.employee_id.as_str(), d.amount_cents)),
            )
            .chain(
                self.refunds
                    .iter()
                    .map(|r| (r.server_id.as_str(), r.refund_cents)),
            )
            .find(|(_, cents)| *cents < 0);
        if let Some((employee_id, cents)) = negative {
            return Err(EngineError::CalculationError {
                message: format!("negative amount {} allocated to '{}'", cents, employee_id),
            });
        }

        let total_split = self.total_split_cents()?;
        if total_split != total_earned_cents {
            return Err(EngineError::CalculationError {
                message: format!(
                    "split items total {} does not match earned total {}",
                    total_split, total_earned_cents
                ),
            });
        }

        Ok(())
    }
}
