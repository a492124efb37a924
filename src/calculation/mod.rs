//! Calculation logic for the Tip-Pool Engine.
//!
//! This module contains the pure allocation pipeline: input validation,
//! contribution calculation, pool roster weighting by hours, role or even
//! split, pool distribution with refunds when nobody is present, and the
//! aggregation of server and worker amounts into merged payout lines. Every
//! proportional split goes through a shared rounding helper that preserves
//! exact totals.

mod aggregation;
mod contribution;
mod distribution;
mod refund;
mod roster;
mod rounding;
mod validation;

pub use aggregation::{AggregatedResults, aggregate_results, compute_percentage_pool_allocations};
pub use contribution::{ContributionCalculation, compute_contributions, contribution_cents};
pub use distribution::{PoolAllocation, allocate_pool, distribute_pool};
pub use refund::refund_pool;
pub use roster::{PoolRoster, RosterEntry, build_pool_roster, worker_weight};
pub use rounding::{apportion, round_to_cents, sum_cents};
pub use validation::{
    validate_inputs, validate_pool, validate_pools, validate_servers, validate_workers,
};
