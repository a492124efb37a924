//! Input validation for allocation runs.
//!
//! The engine refuses to compute anything over malformed input: negative money,
//! negative hours or weights, percentages outside [0, 100], blank or repeated
//! ids, and server earnings whose total does not fit in `i64` cents. The first
//! violation is returned, checking servers, then pools, then workers, each in
//! input order.

use std::collections::HashSet;

use rust_decimal::Decimal;

use crate::error::{EngineError, EngineResult};
use crate::models::{ContributionPool, PoolWorker, ServerEarning};

/// Validates every input of an allocation run.
///
/// # Examples
///
/// ```
/// use tip_pool_engine::calculation::validate_inputs;
/// use tip_pool_engine::error::EngineError;
/// use tip_pool_engine::models::ServerEarning;
///
/// let servers = vec![ServerEarning::new("srv_001", "Alex", -1)];
/// let result = validate_inputs(&servers, &[], &[]);
/// assert!(matches!(result, Err(EngineError::InvalidServer { .. })));
/// ```
pub fn validate_inputs(
    servers: &[ServerEarning],
    pools: &[ContributionPool],
    workers: &[PoolWorker],
) -> EngineResult<()> {
    validate_servers(servers)?;
    validate_pools(pools)?;
    validate_workers(workers)
}

/// Validates server earning records.
pub fn validate_servers(servers: &[ServerEarning]) -> EngineResult<()> {
    let mut seen = HashSet::with_capacity(servers.len());
    let mut total_earned: i64 = 0;

    for server in servers {
        if server.employee_id.trim().is_empty() {
            return Err(EngineError::InvalidServer {
                employee_id: server.employee_id.clone(),
                field: "employee_id".to_string(),
                message: "must not be blank".to_string(),
            });
        }
        if server.earned_amount_cents < 0 {
            return Err(EngineError::InvalidServer {
                employee_id: server.employee_id.clone(),
                field: "earned_amount_cents".to_string(),
                message: format!("must not be negative (got {})", server.earned_amount_cents),
            });
        }
        if !seen.insert(server.employee_id.as_str()) {
            return Err(EngineError::DuplicateId {
                entity: "server".to_string(),
                id: server.employee_id.clone(),
            });
        }
        // Every later total is bounded by the combined earnings
        total_earned = total_earned
            .checked_add(server.earned_amount_cents)
            .ok_or_else(|| EngineError::InvalidServer {
                employee_id: server.employee_id.clone(),
                field: "earned_amount_cents".to_string(),
                message: format!(
                    "combined earnings exceed the largest representable amount ({} cents)",
                    i64::MAX
                ),
            })?;
    }

    Ok(())
}

/// Validates pool definitions, individually and combined.
pub fn validate_pools(pools: &[ContributionPool]) -> EngineResult<()> {
    let mut seen = HashSet::with_capacity(pools.len());

    for pool in pools {
        validate_pool(pool)?;
        if !seen.insert(pool.id.as_str()) {
            return Err(EngineError::DuplicateId {
                entity: "pool".to_string(),
                id: pool.id.clone(),
            });
        }
    }

    let total: Decimal = pools.iter().map(|p| p.contribution_percentage).sum();
    if total > Decimal::ONE_HUNDRED {
        return Err(EngineError::CombinedPercentageExceeded { total });
    }

    Ok(())
}

/// Validates a single pool definition.
pub fn validate_pool(pool: &ContributionPool) -> EngineResult<()> {
    if pool.id.trim().is_empty() {
        return Err(EngineError::InvalidPool {
            pool_id: pool.id.clone(),
            field: "id".to_string(),
            message: "must not be blank".to_string(),
        });
    }

    let percentage = pool.contribution_percentage;
    if percentage < Decimal::ZERO || percentage > Decimal::ONE_HUNDRED {
        return Err(EngineError::InvalidPercentage {
            pool_id: pool.id.clone(),
            value: percentage,
        });
    }

    if let Some((role, weight)) = pool.role_weights.iter().find(|(_, w)| **w < Decimal::ZERO) {
        return Err(EngineError::InvalidPool {
            pool_id: pool.id.clone(),
            field: format!("role_weights.{}", role),
            message: format!("must not be negative (got {})", weight),
        });
    }

    if let Some(weight) = pool.default_role_weight {
        if weight < Decimal::ZERO {
            return Err(EngineError::InvalidPool {
                pool_id: pool.id.clone(),
                field: "default_role_weight".to_string(),
                message: format!("must not be negative (got {})", weight),
            });
        }
    }

    Ok(())
}

/// Validates pool worker records.
pub fn validate_workers(workers: &[PoolWorker]) -> EngineResult<()> {
    let mut seen = HashSet::with_capacity(workers.len());

    for worker in workers {
        if worker.employee_id.trim().is_empty() {
            return Err(EngineError::InvalidWorker {
                employee_id: worker.employee_id.clone(),
                field: "employee_id".to_string(),
                message: "must not be blank".to_string(),
            });
        }
        if worker.hours_worked < Decimal::ZERO {
            return Err(EngineError::InvalidWorker {
                employee_id: worker.employee_id.clone(),
                field: "hours_worked".to_string(),
                message: format!("must not be negative (got {})", worker.hours_worked),
            });
        }
        if !seen.insert(worker.employee_id.as_str()) {
            return Err(EngineError::DuplicateId {
                entity: "worker".to_string(),
                id: worker.employee_id.clone(),
            });
        }
    }

    Ok(())
}
