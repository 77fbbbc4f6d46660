//! Date-scoped rate lookup.
//!
//! A [`RateBook`] answers "what did this employee earn per hour on this date".
//! Rate cards take precedence; the employee's current rates are only used for
//! dates no card covers. A rejected card still claims its window, so those
//! dates fail instead of falling back.

use std::collections::HashMap;

use chrono::NaiveDate;

use crate::error::{EngineError, EngineResult};
use crate::models::{Employee, EmployeeRateProfile, RateCard};

/// Rate cards and current employee rates, indexed by employee.
#[derive(Debug, Clone, Default)]
pub struct RateBook {
    /// Cards per employee, sorted by `valid_from` (oldest first).
    cards: HashMap<String, Vec<RateCard>>,
    /// Employees whose current rates act as the fallback.
    employees: HashMap<String, Employee>,
    /// Cards that failed validation, per employee.
    rejected: HashMap<String, Vec<RateCard>>,
}

impl RateBook {
    /// Creates an empty rate book.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a rate book from an employee roster and a set of rate cards.
    pub fn from_parts(
        employees: impl IntoIterator<Item = Employee>,
        cards: impl IntoIterator<Item = RateCard>,
    ) -> Self {
        let mut book = Self::new();
        for employee in employees {
            book.add_employee(employee);
        }
        for card in cards {
            book.add_card(card);
        }
        book
    }

    /// Registers an employee's current rates as the fallback for that employee.
    pub fn add_employee(&mut self, employee: Employee) {
        self.employees.insert(employee.id.clone(), employee);
    }

    /// Adds a rate card, keeping the employee's cards ordered by start date.
    pub fn add_card(&mut self, card: RateCard) {
        let cards = self.cards.entry(card.employee_id.clone()).or_default();
        let position = cards.partition_point(|c| c.valid_from <= card.valid_from);
        cards.insert(position, card);
    }

    /// Records a card that failed validation.
    ///
    /// Dates in its window where it would have been the winning card resolve
    /// to [`EngineError::InvalidRate`] rather than another rate.
    pub fn add_rejected_card(&mut self, card: RateCard) {
        self.rejected.entry(card.employee_id.clone()).or_default().push(card);
    }

    /// Returns the rates that applied to `employee_id` on `on_date`.
    ///
    /// The card covering the date with the latest `valid_from` wins. When no
    /// card covers the date, the employee's current rates are used.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::InvalidRate`] if the winning card for the date
    /// was rejected, or if no card covers the date and the employee is
    /// unknown or has no current rates.
    ///
    /// # Example
    ///
    /// ```
    /// use site_payroll::calculation::RateBook;
    /// use site_payroll::models::RateCard;
    /// use chrono::NaiveDate;
    /// use rust_decimal::Decimal;
    ///
    /// let mut book = RateBook::new();
    /// book.add_card(RateCard {
    ///     id: "rc_001".to_string(),
    ///     employee_id: "emp_001".to_string(),
    ///     regular_rate: Decimal::from(30),
    ///     overtime_rate: Decimal::from(45),
    ///     valid_from: NaiveDate::from_ymd_opt(2026, 1, 1).unwrap(),
    ///     valid_to: None,
    /// });
    ///
    /// let rate = book
    ///     .rate_for("emp_001", NaiveDate::from_ymd_opt(2026, 3, 2).unwrap())
    ///     .unwrap();
    /// assert_eq!(rate.regular_rate, Decimal::from(30));
    /// ```
    pub fn rate_for(&self, employee_id: &str, on_date: NaiveDate) -> EngineResult<EmployeeRateProfile> {
        let card = self
            .cards
            .get(employee_id)
            .and_then(|cards| cards.iter().rev().find(|c| c.covers(on_date)));

        let rejected = self
            .rejected
            .get(employee_id)
            .and_then(|cards| cards.iter().filter(|c| c.covers(on_date)).max_by_key(|c| c.valid_from));

        if let Some(bad) = rejected {
            if card.is_none_or(|good| bad.valid_from >= good.valid_from) {
                return Err(EngineError::InvalidRate {
                    employee_id: employee_id.to_string(),
                    message: format!("rate card '{}' covering {} was rejected", bad.id, on_date),
                });
            }
        }

        if let Some(card) = card {
            return Ok(card.profile());
        }

        match self.employees.get(employee_id) {
            Some(employee) => employee.current_rate_profile(),
            None => Err(EngineError::InvalidRate {
                employee_id: employee_id.to_string(),
                message: format!("no rate card or employee rate covers {}", on_date),
            }),
        }
    }
}
