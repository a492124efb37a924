//! Pool worker model.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A pool-eligible worker's presence and activity during the tip period.
///
/// Only workers listed for the period are considered present. A worker who is
/// eligible for a pool but missing from the period's list takes no share.
///
/// # Example
///
/// ```
/// use tip_pool_engine::models::PoolWorker;
/// use rust_decimal::Decimal;
///
/// let worker = PoolWorker::new("dish_001", "Sam", Decimal::new(65, 1), "Dishwasher");
/// assert_eq!(worker.hours_worked, Decimal::new(65, 1));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PoolWorker {
    /// Unique identifier for the employee.
    pub employee_id: String,
    /// Display name of the employee.
    #[serde(default)]
    pub name: String,
    /// Hours worked during the period.
    #[serde(default)]
    pub hours_worked: Decimal,
    /// Role name used for role-weighted pools (e.g., "Chef", "Prep").
    #[serde(default)]
    pub role: String,
}

impl PoolWorker {
    /// Creates a new pool worker record.
    pub fn new(
        employee_id: impl Into<String>,
        name: impl Into<String>,
        hours_worked: Decimal,
        role: impl Into<String>,
    ) -> Self {
        Self {
            employee_id: employee_id.into(),
            name: name.into(),
            hours_worked,
            role: role.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_deserialize_worker_with_string_hours() {
        let json = r#"{
            "employee_id": "dish_001",
            "name": "Sam",
            "hours_worked": "6.5",
            "role": "Dishwasher"
        }"#;

        let worker: PoolWorker = serde_json::from_str(json).unwrap();
        assert_eq!(worker.employee_id, "dish_001");
        assert_eq!(worker.hours_worked, Decimal::from_str("6.5").unwrap());
        assert_eq!(worker.role, "Dishwasher");
    }

    #[test]
    fn test_optional_fields_default() {
        let json = r#"{"employee_id": "bus_001"}"#;

        let worker: PoolWorker = serde_json::from_str(json).unwrap();
        assert_eq!(worker.hours_worked, Decimal::ZERO);
        assert!(worker.role.is_empty());
    }
}
