//! Ranking of aggregates.

use std::cmp::Ordering;

use crate::models::AggregatedPayroll;

/// Returns the `n` aggregates with the highest `total_pay`.
///
/// Ties are broken by `employee_id` ascending, then by `job_site_id`, so the
/// result never depends on input order.
pub fn top_n_by_pay(aggregates: &[AggregatedPayroll], n: usize) -> Vec<AggregatedPayroll> {
    let mut ranked = aggregates.to_vec();
    ranked.sort_by(by_pay_descending);
    ranked.truncate(n);
    ranked
}

fn by_pay_descending(a: &AggregatedPayroll, b: &AggregatedPayroll) -> Ordering {
    b.total_pay
        .cmp(&a.total_pay)
        .then_with(|| a.employee_id.cmp(&b.employee_id))
        .then_with(|| a.job_site_id.cmp(&b.job_site_id))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;

    fn aggregate(employee_id: &str, pay: i64) -> AggregatedPayroll {
        AggregatedPayroll {
            employee_id: employee_id.to_string(),
            job_site_id: None,
            period: None,
            total_hours: Decimal::from(pay / 20),
            regular_hours: Decimal::from(pay / 20),
            overtime_hours: Decimal::ZERO,
            total_days: 1,
            total_regular_pay: Decimal::from(pay),
            total_overtime_pay: Decimal::ZERO,
            total_pay: Decimal::from(pay),
        }
    }

    fn ids(aggregates: &[AggregatedPayroll]) -> Vec<&str> {
        aggregates.iter().map(|a| a.employee_id.as_str()).collect()
    }

    #[test]
    fn test_sorted_by_pay_descending() {
        let input = vec![aggregate("emp_1", 100), aggregate("emp_2", 300), aggregate("emp_3", 200)];
        assert_eq!(ids(&top_n_by_pay(&input, 3)), vec!["emp_2", "emp_3", "emp_1"]);
    }

    #[test]
    fn test_ties_ordered_by_employee_id_not_insertion() {
        let input = vec![aggregate("emp_z", 500), aggregate("emp_a", 500)];
        assert_eq!(ids(&top_n_by_pay(&input, 2)), vec!["emp_a", "emp_z"]);

        let reversed = vec![aggregate("emp_a", 500), aggregate("emp_z", 500)];
        assert_eq!(ids(&top_n_by_pay(&reversed, 2)), vec!["emp_a", "emp_z"]);
    }

    #[test]
    fn test_truncates_to_n() {
        let input = vec![aggregate("emp_1", 100), aggregate("emp_2", 300), aggregate("emp_3", 200)];
        assert_eq!(ids(&top_n_by_pay(&input, 1)), vec!["emp_2"]);
        assert!(top_n_by_pay(&input, 0).is_empty());
        assert_eq!(top_n_by_pay(&input, 10).len(), 3);
    }

    #[test]
    fn test_tie_on_employee_falls_back_to_job_site() {
        let mut north = aggregate("emp_1", 100);
        north.job_site_id = Some("site_north".to_string());
        let mut east = aggregate("emp_1", 100);
        east.job_site_id = Some("site_east".to_string());

        let ranked = top_n_by_pay(&[north, east], 2);
        assert_eq!(ranked[0].job_site_id.as_deref(), Some("site_east"));
    }
}
