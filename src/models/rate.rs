//! Rate profile and rate card models.
//!
//! An [`EmployeeRateProfile`] is the pair of hourly rates the engine applies to
//! one employee. A [`RateCard`] is a profile bounded by a validity window, so
//! historical attendance is paid at the rate that applied on the day.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

/// Regular and overtime hourly rates for one employee.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmployeeRateProfile {
    /// The employee these rates belong to.
    pub employee_id: String,
    /// Hourly rate for regular hours.
    pub regular_rate: Decimal,
    /// Hourly rate for overtime hours.
    pub overtime_rate: Decimal,
}

impl EmployeeRateProfile {
    /// Checks that both rates are non-negative.
    ///
    /// # Examples
    ///
    /// ```
    /// use site_payroll::models::EmployeeRateProfile;
    /// use rust_decimal::Decimal;
    ///
    /// let rate = EmployeeRateProfile {
    ///     employee_id: "emp_001".to_string(),
    ///     regular_rate: Decimal::from(-1),
    ///     overtime_rate: Decimal::from(30),
    /// };
    /// assert!(rate.validate().is_err());
    /// ```
    pub fn validate(&self) -> EngineResult<()> {
        if self.regular_rate < Decimal::ZERO {
            return Err(self.invalid(format!(
                "regular rate {} is negative",
                self.regular_rate
            )));
        }
        if self.overtime_rate < Decimal::ZERO {
            return Err(self.invalid(format!(
                "overtime rate {} is negative",
                self.overtime_rate
            )));
        }
        Ok(())
    }

    fn invalid(&self, message: String) -> EngineError {
        EngineError::InvalidRate {
            employee_id: self.employee_id.clone(),
            message,
        }
    }
}

/// A rate profile that applies within a date window.
///
/// `valid_to` is inclusive; `None` means the card is open-ended.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RateCard {
    /// Unique identifier for the rate card.
    pub id: String,
    /// The employee this card applies to.
    pub employee_id: String,
    /// Hourly rate for regular hours.
    pub regular_rate: Decimal,
    /// Hourly rate for overtime hours.
    pub overtime_rate: Decimal,
    /// First date the card applies to.
    pub valid_from: NaiveDate,
    /// Last date the card applies to, if bounded.
    #[serde(default)]
    pub valid_to: Option<NaiveDate>,
}

impl RateCard {
    /// Returns true if `date` falls inside the card's validity window.
    ///
    /// # Examples
    ///
    /// ```
    /// use site_payroll::models::RateCard;
    /// use chrono::NaiveDate;
    /// use rust_decimal::Decimal;
    ///
    /// let card = RateCard {
    ///     id: "rc_001".to_string(),
    ///     employee_id: "emp_001".to_string(),
    ///     regular_rate: Decimal::from(30),
    ///     overtime_rate: Decimal::from(45),
    ///     valid_from: NaiveDate::from_ymd_opt(2026, 1, 1).unwrap(),
    ///     valid_to: None,
    /// };
    /// assert!(card.covers(NaiveDate::from_ymd_opt(2030, 6, 1).unwrap()));
    /// assert!(!card.covers(NaiveDate::from_ymd_opt(2025, 12, 31).unwrap()));
    /// ```
    pub fn covers(&self, date: NaiveDate) -> bool {
        self.valid_from <= date && self.valid_to.is_none_or(|to| date <= to)
    }

    /// Returns the rates on this card as a profile.
    pub fn profile(&self) -> EmployeeRateProfile {
        EmployeeRateProfile {
            employee_id: self.employee_id.clone(),
            regular_rate: self.regular_rate,
            overtime_rate: self.overtime_rate,
        }
    }

    /// Checks the rates and the window bounds.
    pub fn validate(&self) -> EngineResult<()> {
        self.profile().validate()?;
        if let Some(valid_to) = self.valid_to {
            if valid_to < self.valid_from {
                return Err(EngineError::InvalidRate {
                    employee_id: self.employee_id.clone(),
                    message: format!(
                        "rate card '{}' ends on {} before it starts on {}",
                        self.id, valid_to, self.valid_from
                    ),
                });
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn profile(regular: &str, overtime: &str) -> EmployeeRateProfile {
        EmployeeRateProfile {
            employee_id: "emp_001".to_string(),
            regular_rate: dec(regular),
            overtime_rate: dec(overtime),
        }
    }

    fn card(valid_from: NaiveDate, valid_to: Option<NaiveDate>) -> RateCard {
        RateCard {
            id: "rc_001".to_string(),
            employee_id: "emp_001".to_string(),
            regular_rate: dec("25.00"),
            overtime_rate: dec("37.50"),
            valid_from,
            valid_to,
        }
    }

    #[test]
    fn test_valid_profile() {
        assert!(profile("20", "30").validate().is_ok());
    }

    #[test]
    fn test_zero_rates_are_valid() {
        assert!(profile("0", "0").validate().is_ok());
    }

    #[test]
    fn test_negative_regular_rate_rejected() {
        match profile("-1", "30").validate() {
            Err(EngineError::InvalidRate { message, .. }) => {
                assert_eq!(message, "regular rate -1 is negative");
            }
            other => panic!("Expected InvalidRate, got {:?}", other),
        }
    }

    #[test]
    fn test_negative_overtime_rate_rejected() {
        match profile("20", "-0.01").validate() {
            Err(EngineError::InvalidRate { message, .. }) => {
                assert!(message.starts_with("overtime rate"));
            }
            other => panic!("Expected InvalidRate, got {:?}", other),
        }
    }

    #[test]
    fn test_bounded_card_covers_both_ends() {
        let card = card(date(2026, 1, 1), Some(date(2026, 1, 31)));
        assert!(card.covers(date(2026, 1, 1)));
        assert!(card.covers(date(2026, 1, 31)));
        assert!(!card.covers(date(2026, 2, 1)));
        assert!(!card.covers(date(2025, 12, 31)));
    }

    #[test]
    fn test_card_with_inverted_window_rejected() {
        let card = card(date(2026, 2, 1), Some(date(2026, 1, 1)));
        assert!(matches!(
            card.validate(),
            Err(EngineError::InvalidRate { .. })
        ));
    }

    #[test]
    fn test_card_profile_copies_rates() {
        let card = card(date(2026, 1, 1), None);
        let profile = card.profile();
        assert_eq!(profile.regular_rate, dec("25.00"));
        assert_eq!(profile.overtime_rate, dec("37.50"));
    }
}
