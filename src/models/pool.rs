//! Contribution pool model and related types.
//!
//! A contribution pool takes a percentage of every server's earned tips and
//! redistributes the accumulated amount to its eligible workers.

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// The weighting strategy used to split a pool among its present workers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ShareMethod {
    /// Weight is the worker's hours worked.
    Hours,
    /// Weight is the configured weight of the worker's role.
    Role,
    /// Every present worker has weight 1.
    Even,
}

impl ShareMethod {
    /// Returns the snake_case name used in configuration and audit output.
    pub fn as_str(&self) -> &'static str {
        match self {
            ShareMethod::Hours => "hours",
            ShareMethod::Role => "role",
            ShareMethod::Even => "even",
        }
    }
}

/// A restaurant-configured pool that receives a percentage cut of server tips.
///
/// # Example
///
/// ```
/// use tip_pool_engine::models::{ContributionPool, ShareMethod};
/// use rust_decimal::Decimal;
///
/// let pool = ContributionPool::new("kitchen", "Kitchen", Decimal::from(5), ShareMethod::Role)
///     .with_eligible(["chef_001", "prep_001"])
///     .with_role_weight("Chef", Decimal::from(3))
///     .with_role_weight("Prep", Decimal::ONE);
///
/// assert!(pool.is_eligible("chef_001"));
/// assert_eq!(pool.role_weight("Chef"), Decimal::from(3));
/// assert_eq!(pool.role_weight("Host"), Decimal::ZERO);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContributionPool {
    /// Unique identifier for the pool.
    pub id: String,
    /// Display name of the pool.
    #[serde(default)]
    pub name: String,
    /// Percentage of each server's earnings owed to this pool, in [0, 100].
    pub contribution_percentage: Decimal,
    /// How the pool is split among its present workers.
    pub share_method: ShareMethod,
    /// Employee ids allowed to receive a share of this pool.
    #[serde(default)]
    pub eligible_employee_ids: Vec<String>,
    /// Weight per role name, used only when `share_method` is `Role`.
    #[serde(default)]
    pub role_weights: BTreeMap<String, Decimal>,
    /// Weight for roles missing from `role_weights`. Absent means weight 0.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_role_weight: Option<Decimal>,
}

impl ContributionPool {
    /// Creates a pool with no eligible employees and no role weights.
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        contribution_percentage: Decimal,
        share_method: ShareMethod,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            contribution_percentage,
            share_method,
            eligible_employee_ids: Vec::new(),
            role_weights: BTreeMap::new(),
            default_role_weight: None,
        }
    }

    /// Adds employee ids to the eligible set.
    pub fn with_eligible<I, S>(mut self, ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.eligible_employee_ids
            .extend(ids.into_iter().map(Into::into));
        self
    }

    /// Sets the weight for a role.
    pub fn with_role_weight(mut self, role: impl Into<String>, weight: Decimal) -> Self {
        self.role_weights.insert(role.into(), weight);
        self
    }

    /// Sets the weight used for roles without an explicit entry.
    pub fn with_default_role_weight(mut self, weight: Decimal) -> Self {
        self.default_role_weight = Some(weight);
        self
    }

    /// Returns true if the employee may receive a share of this pool.
    pub fn is_eligible(&self, employee_id: &str) -> bool {
        self.eligible_employee_ids.iter().any(|id| id == employee_id)
    }

    /// Returns true if `role` has an explicit weight.
    pub fn has_role_weight(&self, role: &str) -> bool {
        self.role_weights.contains_key(role)
    }

    /// Resolves the weight of a role, falling back to the default and then 0.
    pub fn role_weight(&self, role: &str) -> Decimal {
        self.role_weights
            .get(role)
            .copied()
            .or(self.default_role_weight)
            .unwrap_or(Decimal::ZERO)
    }
}
