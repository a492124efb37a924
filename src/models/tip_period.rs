//! Tip period model.
//!
//! This module contains the [`TipPeriod`] type identifying the date range a
//! set of server earnings and worker attendance records belongs to.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

/// Represents a tip period with its inclusive date range.
///
/// # Example
///
/// ```
/// use tip_pool_engine::models::TipPeriod;
/// use chrono::NaiveDate;
///
/// let period = TipPeriod {
///     start_date: NaiveDate::from_ymd_opt(2026, 3, 2).unwrap(),
///     end_date: NaiveDate::from_ymd_opt(2026, 3, 8).unwrap(),
/// };
///
/// assert!(period.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TipPeriod {
    /// The start date of the tip period (inclusive).
    pub start_date: NaiveDate,
    /// The end date of the tip period (inclusive).
    pub end_date: NaiveDate,
}

impl TipPeriod {
    /// Rejects periods whose end date is before the start date.
    pub fn validate(&self) -> EngineResult<()> {
        if self.end_date < self.start_date {
            return Err(EngineError::InvalidPeriod {
                message: format!(
                    "end_date {} is before start_date {}",
                    self.end_date, self.start_date
                ),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_week() -> TipPeriod {
        TipPeriod {
            start_date: NaiveDate::from_ymd_opt(2026, 3, 2).unwrap(),
            end_date: NaiveDate::from_ymd_opt(2026, 3, 8).unwrap(),
        }
    }

    #[test]
    fn test_single_day_period() {
        let day = NaiveDate::from_ymd_opt(2026, 3, 2).unwrap();
        let period = TipPeriod {
            start_date: day,
            end_date: day,
        };
        assert!(period.validate().is_ok());
    }

    #[test]
    fn test_reversed_period_is_rejected() {
        let period = TipPeriod {
            start_date: NaiveDate::from_ymd_opt(2026, 3, 8).unwrap(),
            end_date: NaiveDate::from_ymd_opt(2026, 3, 2).unwrap(),
        };

        match period.validate() {
            Err(EngineError::InvalidPeriod { message }) => {
                assert!(message.contains("2026-03-02"));
            }
            other => panic!("Expected InvalidPeriod error, got {:?}", other),
        }
    }

    #[test]
    fn test_deserialize_tip_period() {
        let json = r#"{"start_date": "2026-03-02", "end_date": "2026-03-08"}"#;
        let period: TipPeriod = serde_json::from_str(json).unwrap();
        assert_eq!(period, create_week());
    }
}
