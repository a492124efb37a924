//! Request types for the Tip-Pool Engine API.
//!
//! This module defines the JSON request structure for the `/allocate` endpoint.

use serde::{Deserialize, Serialize};

use crate::models::{ContributionPool, PoolWorker, ServerEarning, TipPeriod};

/// Request body for the `/allocate` endpoint.
///
/// Carries one tip period's earnings and attendance. When `pools` is omitted,
/// the restaurant's configured pools are applied.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AllocationRequest {
    /// The tip period the records belong to.
    pub period: TipPeriod,
    /// Servers and the tips they earned directly.
    pub servers: Vec<ServerEarning>,
    /// Pool definitions overriding the configured pools.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pools: Option<Vec<ContributionPool>>,
    /// Pool workers present during the period.
    #[serde(default)]
    pub workers: Vec<PoolWorker>,
}

impl AllocationRequest {
    /// Returns the request's pools, or `configured` when the request has none.
    pub fn pools_or<'a>(&'a self, configured: &'a [ContributionPool]) -> &'a [ContributionPool] {
        self.pools.as_deref().unwrap_or(configured)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ShareMethod;
    use rust_decimal::Decimal;

    #[test]
    fn test_deserialize_allocation_request() {
        let json = r#"{
            "period": {"start_date": "2026-03-02", "end_date": "2026-03-08"},
            "servers": [
                {"employee_id": "srv_001", "name": "Alex", "earned_amount_cents": 20000}
            ],
            "pools": [
                {
                    "id": "dish",
                    "name": "Dishwashers",
                    "contribution_percentage": "5",
                    "share_method": "hours",
                    "eligible_employee_ids": ["dish_001"]
                }
            ],
            "workers": [
                {"employee_id": "dish_001", "name": "Sam", "hours_worked": "6", "role": "Dishwasher"}
            ]
        }"#;

        let request: AllocationRequest = serde_json::from_str(json).unwrap();
        assert_eq!(request.servers.len(), 1);
        assert_eq!(request.workers[0].hours_worked, Decimal::from(6));
        assert_eq!(request.pools.as_ref().unwrap()[0].share_method, ShareMethod::Hours);
    }

    #[test]
    fn test_pools_and_workers_are_optional() {
        let json = r#"{
            "period": {"start_date": "2026-03-02", "end_date": "2026-03-08"},
            "servers": []
        }"#;

        let request: AllocationRequest = serde_json::from_str(json).unwrap();
        assert!(request.pools.is_none());
        assert!(request.workers.is_empty());
    }

    #[test]
    fn test_pools_or_prefers_request_pools() {
        let configured = vec![ContributionPool::new("dish", "Dish", Decimal::from(5), ShareMethod::Hours)];
        let mut request: AllocationRequest = serde_json::from_str(
            r#"{"period": {"start_date": "2026-03-02", "end_date": "2026-03-08"}, "servers": []}"#,
        )
        .unwrap();

        assert_eq!(request.pools_or(&configured)[0].id, "dish");

        request.pools = Some(vec![]);
        assert!(request.pools_or(&configured).is_empty());
    }
}
