//! Pool roster construction.
//!
//! A pool's roster is the intersection of its eligible employee ids with the
//! workers present in the period, each paired with the weight its share
//! method assigns. Eligible-but-absent and never-eligible workers are treated
//! identically: neither appears on the roster.

use rust_decimal::Decimal;

use crate::error::{EngineError, EngineResult};
use crate::models::{AuditWarning, ContributionPool, PoolWorker, ShareMethod};

/// A present eligible worker and the weight assigned by the pool's share method.
#[derive(Debug, Clone, PartialEq)]
pub struct RosterEntry<'a> {
    /// The worker.
    pub worker: &'a PoolWorker,
    /// The worker's weight; zero-weight entries take no share.
    pub weight: Decimal,
}

/// The present eligible workers of one pool, in worker-list order.
#[derive(Debug, Clone, PartialEq)]
pub struct PoolRoster<'a> {
    /// Roster entries in the order the workers were supplied.
    pub entries: Vec<RosterEntry<'a>>,
    /// Sum of every entry's weight.
    pub total_weight: Decimal,
    /// Conditions worth surfacing in the audit trace.
    pub warnings: Vec<AuditWarning>,
}

impl PoolRoster<'_> {
    /// Returns true if at least one present worker has a positive weight.
    pub fn has_recipients(&self) -> bool {
        self.total_weight > Decimal::ZERO
    }

    /// Returns the weights in roster order.
    pub fn weights(&self) -> Vec<Decimal> {
        self.entries.iter().map(|e| e.weight).collect()
    }
}

/// Returns the weight a pool's share method assigns to a worker.
///
/// # Examples
///
/// ```
/// use tip_pool_engine::calculation::worker_weight;
/// use tip_pool_engine::models::{ContributionPool, PoolWorker, ShareMethod};
/// use rust_decimal::Decimal;
///
/// let worker = PoolWorker::new("dish_001", "Sam", Decimal::from(6), "Dishwasher");
/// let hours = ContributionPool::new("dish", "Dish", Decimal::from(5), ShareMethod::Hours);
/// let even = ContributionPool::new("bus", "Bus", Decimal::from(3), ShareMethod::Even);
///
/// assert_eq!(worker_weight(&hours, &worker), Decimal::from(6));
/// assert_eq!(worker_weight(&even, &worker), Decimal::ONE);
/// ```
pub fn worker_weight(pool: &ContributionPool, worker: &PoolWorker) -> Decimal {
    match pool.share_method {
        ShareMethod::Hours => worker.hours_worked,
        ShareMethod::Role => pool.role_weight(&worker.role),
        ShareMethod::Even => Decimal::ONE,
    }
}

/// Builds the roster of present eligible workers for a pool.
///
/// # Arguments
///
/// * `pool` - The pool whose eligibility and share method apply
/// * `workers` - Every worker present during the period
pub fn build_pool_roster<'a>(
    pool: &ContributionPool,
    workers: &'a [PoolWorker],
) -> EngineResult<PoolRoster<'a>> {
    let mut entries = Vec::new();
    let mut warnings = Vec::new();
    let mut total_weight = Decimal::ZERO;

    for worker in workers.iter().filter(|w| pool.is_eligible(&w.employee_id)) {
        if pool.share_method == ShareMethod::Role
            && !pool.has_role_weight(&worker.role)
            && pool.default_role_weight.is_none()
        {
            warnings.push(AuditWarning::new(
                "ROLE_WEIGHT_MISSING",
                format!(
                    "Worker '{}' in pool '{}' has role '{}' with no weight and takes no share",
                    worker.employee_id, pool.id, worker.role
                ),
                "low",
            ));
        }

        let weight = worker_weight(pool, worker);
        total_weight = total_weight
            .checked_add(weight)
            .ok_or_else(|| EngineError::CalculationError {
                message: format!("total weight of pool '{}' overflowed", pool.id),
            })?;
        entries.push(RosterEntry { worker, weight });
    }

    for absent in pool
        .eligible_employee_ids
        .iter()
        .filter(|id| !workers.iter().any(|w| &w.employee_id == *id))
    {
        warnings.push(AuditWarning::new(
            "ELIGIBLE_WORKER_ABSENT",
            format!(
                "Eligible employee '{}' did not work this period and takes no share of pool '{}'",
                absent, pool.id
            ),
            "low",
        ));
    }

    Ok(PoolRoster {
        entries,
        total_weight,
        warnings,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn worker(id: &str, hours: &str, role: &str) -> PoolWorker {
        PoolWorker::new(id, id, dec(hours), role)
    }

    fn roster_ids<'a>(roster: &'a PoolRoster<'_>) -> Vec<&'a str> {
        roster
            .entries
            .iter()
            .map(|e| e.worker.employee_id.as_str())
            .collect()
    }

    #[test]
    fn test_roster_is_intersection_of_eligible_and_present() {
        let pool = ContributionPool::new("dish", "Dish", dec("5"), ShareMethod::Hours)
            .with_eligible(["dish_001", "dish_002"]);
        let workers = vec![
            worker("bus_001", "5", "Busser"),
            worker("dish_002", "4", "Dishwasher"),
            worker("dish_001", "6", "Dishwasher"),
        ];

        let roster = build_pool_roster(&pool, &workers).unwrap();

        // Worker-list order, not eligible-list order
        assert_eq!(roster_ids(&roster), vec!["dish_002", "dish_001"]);
        assert_eq!(roster.total_weight, dec("10"));
        assert!(roster.has_recipients());
        assert!(roster.warnings.is_empty());
    }

    #[test]
    fn test_eligible_but_absent_is_excluded_and_warned() {
        let pool = ContributionPool::new("bus", "Bus", dec("3"), ShareMethod::Even)
            .with_eligible(["bus_001"]);

        let roster = build_pool_roster(&pool, &[]).unwrap();

        assert!(roster.entries.is_empty());
        assert!(!roster.has_recipients());
        assert_eq!(roster.warnings.len(), 1);
        assert_eq!(roster.warnings[0].code, "ELIGIBLE_WORKER_ABSENT");
        assert!(roster.warnings[0].message.contains("bus_001"));
    }

    #[test]
    fn test_present_but_ineligible_is_excluded() {
        let pool = ContributionPool::new("bus", "Bus", dec("3"), ShareMethod::Even);
        let workers = vec![worker("bus_001", "5", "Busser")];

        let roster = build_pool_roster(&pool, &workers).unwrap();
        assert!(roster.entries.is_empty());
        assert_eq!(roster.total_weight, Decimal::ZERO);
    }

    #[test]
    fn test_even_weights_are_one() {
        let pool = ContributionPool::new("bus", "Bus", dec("3"), ShareMethod::Even)
            .with_eligible(["bus_001", "bus_002"]);
        let workers = vec![worker("bus_001", "0", ""), worker("bus_002", "9", "")];

        let roster = build_pool_roster(&pool, &workers).unwrap();
        assert_eq!(roster.weights(), vec![Decimal::ONE, Decimal::ONE]);
    }

    #[test]
    fn test_zero_hours_worker_has_zero_weight() {
        let pool = ContributionPool::new("dish", "Dish", dec("5"), ShareMethod::Hours)
            .with_eligible(["dish_001"]);
        let workers = vec![worker("dish_001", "0", "Dishwasher")];

        let roster = build_pool_roster(&pool, &workers).unwrap();
        assert_eq!(roster.entries.len(), 1);
        assert!(!roster.has_recipients());
    }

    #[test]
    fn test_role_weights_and_missing_role_warning() {
        let pool = ContributionPool::new("kitchen", "Kitchen", dec("5"), ShareMethod::Role)
            .with_eligible(["chef_001", "prep_001", "host_001"])
            .with_role_weight("Chef", dec("3"))
            .with_role_weight("Prep", dec("1"));
        let workers = vec![
            worker("chef_001", "8", "Chef"),
            worker("prep_001", "8", "Prep"),
            worker("host_001", "8", "Host"),
        ];

        let roster = build_pool_roster(&pool, &workers).unwrap();

        assert_eq!(roster.weights(), vec![dec("3"), dec("1"), Decimal::ZERO]);
        assert_eq!(roster.total_weight, dec("4"));
        assert_eq!(roster.warnings.len(), 1);
        assert_eq!(roster.warnings[0].code, "ROLE_WEIGHT_MISSING");
    }

    #[test]
    fn test_default_role_weight_suppresses_warning() {
        let pool = ContributionPool::new("kitchen", "Kitchen", dec("5"), ShareMethod::Role)
            .with_eligible(["host_001"])
            .with_role_weight("Chef", dec("3"))
            .with_default_role_weight(dec("0.5"));
        let workers = vec![worker("host_001", "8", "Host")];

        let roster = build_pool_roster(&pool, &workers).unwrap();
        assert_eq!(roster.weights(), vec![dec("0.5")]);
        assert!(roster.warnings.is_empty());
    }
}
