//! Server earning model.
//!
//! A server is an employee who earned tips directly during the tip period
//! and contributes a percentage of those tips to each configured pool.

use serde::{Deserialize, Serialize};

/// One server's directly-earned tips for the period.
///
/// # Example
///
/// ```
/// use tip_pool_engine::models::ServerEarning;
///
/// let server = ServerEarning::new("srv_001", "Alex", 20_000);
/// assert_eq!(server.earned_amount_cents, 20_000);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerEarning {
    /// Unique identifier for the employee.
    pub employee_id: String,
    /// Display name of the employee.
    #[serde(default)]
    pub name: String,
    /// Tips earned directly during the period, in cents.
    pub earned_amount_cents: i64,
}

impl ServerEarning {
    /// Creates a new server earning record.
    pub fn new(
        employee_id: impl Into<String>,
        name: impl Into<String>,
        earned_amount_cents: i64,
    ) -> Self {
        Self {
            employee_id: employee_id.into(),
            name: name.into(),
            earned_amount_cents,
        }
    }
}
