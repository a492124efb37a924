//! Core data models for the Tip-Pool Engine.
//!
//! Input records supplied by the caller for one tip period, and the derived
//! records produced by an allocation run.

mod allocation_result;
mod pool;
mod server;
mod tip_period;
mod worker;

pub use allocation_result::{
    AllocationResult, AuditStep, AuditTrace, AuditWarning, Contribution, PoolDistribution,
    PoolRefund, PoolResult, ServerResult, SplitItem,
};
pub use pool::{ContributionPool, ShareMethod};
pub use server::ServerEarning;
pub use tip_period::TipPeriod;
pub use worker::PoolWorker;
