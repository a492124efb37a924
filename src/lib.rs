//! Tip-Pool Contribution and Allocation Engine
//!
//! This crate computes how servers' directly-earned tips are shared with
//! percentage-based contribution pools (dishwashers, bussers, kitchen staff),
//! how each pool is distributed among its present eligible workers, and the
//! final per-employee payout lines for a tip period.

#![warn(missing_docs)]

pub mod api;
pub mod calculation;
pub mod config;
pub mod error;
pub mod models;
