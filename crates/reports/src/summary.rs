use crate::error::ReportError;
use chrono::{Datelike, Days, NaiveDate};
use core_types::{FinanceRecord, FlowDirection};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Selection applied to the ledger before aggregating. Date bounds are inclusive.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FinanceFilter {
    pub start: Option<NaiveDate>,
    pub end: Option<NaiveDate>,
    pub category: Option<String>,
}

impl FinanceFilter {
    pub fn matches(&self, record: &FinanceRecord) -> bool {
        self.start.is_none_or(|s| record.date >= s)
            && self.end.is_none_or(|e| record.date <= e)
            && self
                .category
                .as_deref()
                .is_none_or(|c| record.category == c)
    }

    pub fn apply(&self, records: &[FinanceRecord]) -> Vec<FinanceRecord> {
        records.iter().filter(|r| self.matches(r)).cloned().collect()
    }
}

/// Calendar window of a finance summary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Period {
    Day,
    Month,
    Year,
}

impl Period {
    /// The window containing `today`, as `(first day, first day after the window)`.
    pub fn bounds(&self, today: NaiveDate) -> Result<(NaiveDate, NaiveDate), ReportError> {
        let out_of_range = || ReportError::DateOutOfRange(today.to_string());
        match self {
            Period::Day => {
                let next = today.checked_add_days(Days::new(1)).ok_or_else(out_of_range)?;
                Ok((today, next))
            }
            Period::Month => {
                let start = today.with_day(1).ok_or_else(out_of_range)?;
                let (year, month) = if today.month() == 12 {
                    (today.year() + 1, 1)
                } else {
                    (today.year(), today.month() + 1)
                };
                let next = NaiveDate::from_ymd_opt(year, month, 1).ok_or_else(out_of_range)?;
                Ok((start, next))
            }
            Period::Year => {
                let start = NaiveDate::from_ymd_opt(today.year(), 1, 1).ok_or_else(out_of_range)?;
                let next = NaiveDate::from_ymd_opt(today.year() + 1, 1, 1).ok_or_else(out_of_range)?;
                Ok((start, next))
            }
        }
    }
}

/// Revenue, expenses and balance over a period.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PeriodSummary {
    pub start: NaiveDate,
    pub end_exclusive: NaiveDate,
    pub revenue: Decimal,
    pub expenses: Decimal,
    pub balance: Decimal,
}

/// Totals the ledger over the `period` window that contains `today`.
pub fn period_summary(
    records: &[FinanceRecord],
    period: Period,
    today: NaiveDate,
) -> Result<PeriodSummary, ReportError> {
    let (start, end_exclusive) = period.bounds(today)?;
    let mut revenue = Decimal::ZERO;
    let mut expenses = Decimal::ZERO;

    for record in records
        .iter()
        .filter(|r| r.date >= start && r.date < end_exclusive)
    {
        match record.direction {
            FlowDirection::Inflow => revenue += record.amount,
            FlowDirection::Outflow => expenses += record.amount,
        }
    }

    Ok(PeriodSummary {
        start,
        end_exclusive,
        revenue,
        expenses,
        balance: revenue - expenses,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use uuid::Uuid;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn record(on: NaiveDate, amount: Decimal, category: &str, direction: FlowDirection) -> FinanceRecord {
        FinanceRecord {
            id: Uuid::new_v4(),
            date: on,
            amount,
            category: category.to_string(),
            direction,
            description: Some("lançamento".to_string()),
        }
    }

    #[test]
    fn month_bounds_roll_over_december() {
        assert_eq!(
            Period::Month.bounds(date(2024, 12, 17)).unwrap(),
            (date(2024, 12, 1), date(2025, 1, 1))
        );
        assert_eq!(
            Period::Month.bounds(date(2024, 2, 29)).unwrap(),
            (date(2024, 2, 1), date(2024, 3, 1))
        );
        assert_eq!(
            Period::Year.bounds(date(2024, 6, 3)).unwrap(),
            (date(2024, 1, 1), date(2025, 1, 1))
        );
        assert_eq!(
            Period::Day.bounds(date(2024, 6, 3)).unwrap(),
            (date(2024, 6, 3), date(2024, 6, 4))
        );
    }

    #[test]
    fn summary_excludes_the_next_period_start() {
        let records = vec![
            record(date(2024, 5, 1), dec!(5000), "venda", FlowDirection::Inflow),
            record(date(2024, 5, 20), dec!(1200), "racao", FlowDirection::Outflow),
            record(date(2024, 5, 31), dec!(300), "energia", FlowDirection::Outflow),
            record(date(2024, 6, 1), dec!(999), "venda", FlowDirection::Inflow),
            record(date(2024, 4, 30), dec!(50), "energia", FlowDirection::Outflow),
        ];
        let summary = period_summary(&records, Period::Month, date(2024, 5, 15)).unwrap();
        assert_eq!(summary.revenue, dec!(5000));
        assert_eq!(summary.expenses, dec!(1500));
        assert_eq!(summary.balance, dec!(3500));
    }

    #[test]
    fn empty_ledger_summarizes_to_zero() {
        let summary = period_summary(&[], Period::Year, date(2024, 5, 15)).unwrap();
        assert_eq!(summary.balance, Decimal::ZERO);
    }

    #[test]
    fn filter_combines_dates_and_category() {
        let records = vec![
            record(date(2024, 5, 1), dec!(10), "racao", FlowDirection::Outflow),
            record(date(2024, 5, 10), dec!(20), "racao", FlowDirection::Outflow),
            record(date(2024, 5, 10), dec!(30), "energia", FlowDirection::Outflow),
            record(date(2024, 5, 31), dec!(40), "racao", FlowDirection::Outflow),
        ];
        let filter = FinanceFilter {
            start: Some(date(2024, 5, 10)),
            end: Some(date(2024, 5, 31)),
            category: Some("racao".to_string()),
        };
        let amounts: Vec<Decimal> = filter.apply(&records).iter().map(|r| r.amount).collect();
        assert_eq!(amounts, vec![dec!(20), dec!(40)]);
        assert_eq!(FinanceFilter::default().apply(&records).len(), 4);
    }
}
