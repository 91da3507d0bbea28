//! Report models derived from the items of a run.
//!
//! None of these are persisted; they are rebuilt from the current items on
//! every request.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{PayPeriod, PayrollItem};
use crate::error::{EngineError, EngineResult};

/// Exact sums of the four monetary fields over a set of items.
///
/// Addition is exact decimal addition, so the result does not depend on the
/// order in which items are added. A sum that leaves the decimal range fails
/// with [`EngineError::AmountOverflow`] instead of wrapping or rounding.
///
/// # Example
///
/// ```
/// use payroll_engine::models::PayTotals;
///
/// let totals = PayTotals::default();
/// assert!(totals.total_net.is_zero());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayTotals {
    /// Sum of basic salaries.
    pub total_basic: Decimal,
    /// Sum of deductions.
    pub total_deductions: Decimal,
    /// Sum of bonuses.
    pub total_bonus: Decimal,
    /// Sum of net salaries.
    pub total_net: Decimal,
}

impl PayTotals {
    /// Adds one item's amounts to the running totals.
    ///
    /// On overflow the totals are left unchanged.
    pub fn add_item(&mut self, item: &PayrollItem) -> EngineResult<()> {
        let total_basic = checked_sum(self.total_basic, item.basic_salary, "total_basic")?;
        let total_deductions =
            checked_sum(self.total_deductions, item.deductions, "total_deductions")?;
        let total_bonus = checked_sum(self.total_bonus, item.bonus, "total_bonus")?;
        let total_net = checked_sum(self.total_net, item.net_salary, "total_net")?;

        *self = Self {
            total_basic,
            total_deductions,
            total_bonus,
            total_net,
        };
        Ok(())
    }

    /// Sums the amounts of all given items.
    pub fn from_items<'a>(
        items: impl IntoIterator<Item = &'a PayrollItem>,
    ) -> EngineResult<Self> {
        items.into_iter().try_fold(Self::default(), |mut totals, item| {
            totals.add_item(item)?;
            Ok(totals)
        })
    }
}

fn checked_sum(total: Decimal, amount: Decimal, field: &'static str) -> EngineResult<Decimal> {
    total
        .checked_add(amount)
        .ok_or(EngineError::AmountOverflow { field })
}

/// Payroll totals for one period.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayrollSummary {
    /// The period year.
    pub year: i32,
    /// The period month.
    pub month: u32,
    /// Number of items in the run.
    pub employee_count: usize,
    /// Exact sums over all items.
    #[serde(flatten)]
    pub totals: PayTotals,
}

impl PayrollSummary {
    /// Builds the summary for `period` from the items of its run.
    pub fn from_items(period: PayPeriod, items: &[PayrollItem]) -> EngineResult<Self> {
        Ok(Self {
            year: period.year,
            month: period.month,
            employee_count: items.len(),
            totals: PayTotals::from_items(items)?,
        })
    }
}

/// Payroll totals for one department within a period.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DepartmentCostRow {
    /// The department name, or `UNKNOWN`.
    pub department: String,
    /// Exact sums over the department's items.
    #[serde(flatten)]
    pub totals: PayTotals,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;
    use uuid::Uuid;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn item(basic: &str, deductions: &str, bonus: &str, net: &str) -> PayrollItem {
        PayrollItem {
            id: Uuid::new_v4(),
            run_id: Uuid::nil(),
            employee_id: "emp".to_string(),
            basic_salary: dec(basic),
            deductions: dec(deductions),
            bonus: dec(bonus),
            net_salary: dec(net),
        }
    }

    #[test]
    fn test_totals_of_no_items_are_zero() {
        let totals = PayTotals::from_items(&Vec::<PayrollItem>::new()).unwrap();
        assert_eq!(totals, PayTotals::default());
    }

    #[test]
    fn test_totals_sum_each_field() {
        let items = vec![
            item("100.00", "10.00", "0.00", "90.00"),
            item("200.00", "20.00", "5.00", "185.00"),
        ];
        let totals = PayTotals::from_items(&items).unwrap();
        assert_eq!(totals.total_basic, dec("300.00"));
        assert_eq!(totals.total_deductions, dec("30.00"));
        assert_eq!(totals.total_bonus, dec("5.00"));
        assert_eq!(totals.total_net, dec("275.00"));
    }

    #[test]
    fn test_totals_keep_cents_exact() {
        let items: Vec<PayrollItem> = (0..10)
            .map(|_| item("0.10", "0.01", "0.00", "0.09"))
            .collect();
        let totals = PayTotals::from_items(&items).unwrap();
        assert_eq!(totals.total_basic, dec("1.00"));
        assert_eq!(totals.total_net, dec("0.90"));
    }

    #[test]
    fn test_totals_overflow_is_an_error() {
        let huge = "50000000000000000000000000000";
        let items = vec![item(huge, "0", "0", "1"), item(huge, "0", "0", "1")];

        match PayTotals::from_items(&items) {
            Err(EngineError::AmountOverflow { field }) => assert_eq!(field, "total_basic"),
            other => panic!("Expected AmountOverflow, got {:?}", other),
        }
    }

    #[test]
    fn test_add_item_leaves_totals_unchanged_on_overflow() {
        let mut totals = PayTotals::default();
        totals.add_item(&item("1", "0", "0", "1")).unwrap();
        totals.total_net = Decimal::MAX;

        let err = totals.add_item(&item("1", "0", "0", "1")).unwrap_err();
        assert!(matches!(err, EngineError::AmountOverflow { field: "total_net" }));
        assert_eq!(totals.total_basic, dec("1"));
        assert_eq!(totals.total_net, Decimal::MAX);
    }

    #[test]
    fn test_summary_counts_items() {
        let period = PayPeriod::new(2025, 1).unwrap();
        let items = vec![item("1000", "50", "0", "950"), item("10", "0.5", "0", "9.5")];
        let summary = PayrollSummary::from_items(period, &items).unwrap();
        assert_eq!(summary.year, 2025);
        assert_eq!(summary.month, 1);
        assert_eq!(summary.employee_count, 2);
        assert_eq!(summary.totals.total_net, dec("959.5"));
    }

    #[test]
    fn test_serialize_summary_flattens_totals() {
        let period = PayPeriod::new(2025, 1).unwrap();
        let summary = PayrollSummary::from_items(period, &[item("100", "5", "0", "95")]).unwrap();
        let json = serde_json::to_value(&summary).unwrap();
        assert_eq!(json["employee_count"], 1);
        assert_eq!(json["total_net"], "95");
        assert!(json.get("totals").is_none());
    }

    #[test]
    fn test_serialize_department_row() {
        let row = DepartmentCostRow {
            department: "ENG".to_string(),
            totals: PayTotals::from_items(&[item("100", "10", "0", "90")]).unwrap(),
        };
        let json = serde_json::to_value(&row).unwrap();
        assert_eq!(json["department"], "ENG");
        assert_eq!(json["total_basic"], "100");
    }
}
