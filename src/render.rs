//! Terminal tables for the command outputs. Numbers are formatted here and
//! nowhere else.

use analytics::CycleReport;
use comfy_table::presets::UTF8_FULL;
use comfy_table::{Cell, Color, ContentArrangement, Table};
use core_types::{CultivationCycle, HarvestRecord, RiskLevel};
use reports::{ComparisonSummary, CycleComparisonRow, DailyFlow, MonthTotal, PeriodSummary};
use risk::Alert;
use rust_decimal::Decimal;
use std::collections::BTreeMap;

fn table(header: Vec<&str>) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(header);
    table
}

fn money(value: Decimal, currency: &str) -> String {
    format!("{currency} {:.2}", value)
}

fn optional(value: Option<Decimal>, places: usize) -> String {
    value.map_or_else(|| "N/A".to_string(), |v| format!("{:.*}", places, v))
}

fn risk_cell(level: RiskLevel) -> Cell {
    let color = match level {
        RiskLevel::Normal => Color::Green,
        RiskLevel::Warning => Color::Yellow,
        RiskLevel::Critical => Color::Red,
    };
    Cell::new(level.to_string()).fg(color)
}

pub fn cycle_report(cycle: &CultivationCycle, report: &CycleReport, level: RiskLevel) -> Table {
    let mut t = table(vec!["Metric", "Value"]);
    t.add_row(vec![Cell::new("Cycle"), Cell::new(&cycle.name)]);
    t.add_row(vec![Cell::new("Status"), Cell::new(format!("{:?}", report.status))]);
    t.add_row(vec![Cell::new("Risk"), risk_cell(level)]);
    t.add_row(vec![Cell::new("Cultivation days"), Cell::new(report.cultivation_days)]);
    t.add_row(vec![Cell::new("Total feed (kg)"), Cell::new(format!("{:.1}", report.total_feed_kg))]);
    t.add_row(vec![Cell::new("Total mortality"), Cell::new(report.total_mortality)]);
    t.add_row(vec![Cell::new("Initial weight (kg)"), Cell::new(format!("{:.1}", report.initial_weight_kg))]);
    t.add_row(vec![Cell::new("Current weight (kg)"), Cell::new(format!("{:.1}", report.current_weight_kg))]);
    t.add_row(vec![Cell::new("Weight gain (kg)"), Cell::new(format!("{:.1}", report.weight_gain_kg))]);
    t.add_row(vec![Cell::new("FCA"), Cell::new(optional(report.fca(), 2))]);
    t.add_row(vec![Cell::new("Survival (%)"), Cell::new(optional(report.survival_pct, 1))]);
    t
}

pub fn harvest(harvest: &HarvestRecord, feed_cost_per_kg: Decimal, currency: &str) -> Table {
    let mut t = table(vec!["Harvest", "Value"]);
    t.add_row(vec!["Date".to_string(), harvest.harvest_date.to_string()]);
    t.add_row(vec!["Final weight (kg)".to_string(), format!("{:.1}", harvest.final_weight_kg)]);
    t.add_row(vec!["Weight gain (kg)".to_string(), format!("{:.1}", harvest.weight_gain_kg)]);
    t.add_row(vec![
        "FCA".to_string(),
        optional(Some(harvest.fca).filter(|f| *f > Decimal::ZERO), 2),
    ]);
    t.add_row(vec!["Survival (%)".to_string(), optional(harvest.survival_pct, 1)]);
    t.add_row(vec!["Revenue".to_string(), money(harvest.revenue, currency)]);
    t.add_row(vec![
        "Harvest cost".to_string(),
        money(harvest.harvest_cost.unwrap_or(Decimal::ZERO), currency),
    ]);
    t.add_row(vec!["Feed cost per kg".to_string(), money(feed_cost_per_kg, currency)]);
    t.add_row(vec!["Profit".to_string(), money(harvest.profit, currency)]);
    t
}

pub fn alerts(alerts: &[Alert]) -> Table {
    let mut t = table(vec!["Date", "Level", "Alert"]);
    for alert in alerts {
        t.add_row(vec![
            Cell::new(alert.observed_at),
            risk_cell(alert.level),
            Cell::new(&alert.message),
        ]);
    }
    t
}

pub fn months(months: &[MonthTotal], currency: &str) -> Table {
    let mut t = table(vec!["Month", "Total"]);
    for month in months {
        t.add_row(vec![month.label.clone(), money(month.total, currency)]);
    }
    t
}

pub fn categories(categories: &BTreeMap<String, Decimal>, currency: &str) -> Table {
    let mut t = table(vec!["Category", "Total"]);
    for (category, total) in categories {
        t.add_row(vec![category.clone(), money(*total, currency)]);
    }
    t
}

pub fn daily(series: &[DailyFlow], currency: &str) -> Table {
    let mut t = table(vec!["Day", "Inflow", "Outflow", "Net"]);
    for day in series {
        t.add_row(vec![
            day.day.to_string(),
            money(day.inflow, currency),
            money(day.outflow, currency),
            money(day.net(), currency),
        ]);
    }
    t
}

pub fn period(summary: &PeriodSummary, currency: &str) -> Table {
    let mut t = table(vec!["From", "Until", "Revenue", "Expenses", "Balance"]);
    t.add_row(vec![
        summary.start.to_string(),
        summary.end_exclusive.to_string(),
        money(summary.revenue, currency),
        money(summary.expenses, currency),
        money(summary.balance, currency),
    ]);
    t
}

pub fn comparison(rows: &[CycleComparisonRow], summary: &ComparisonSummary, currency: &str) -> Table {
    let mut t = table(vec!["Cycle", "Period", "Days", "FCA", "Survival (%)", "Final weight (kg)", "Revenue"]);
    for row in rows {
        t.add_row(vec![
            row.name.clone(),
            row.period_label(),
            row.cultivation_days.to_string(),
            optional(row.fca, 2),
            optional(row.survival_pct, 1),
            optional(row.final_weight_kg, 2),
            row.revenue.map_or_else(|| "N/A".to_string(), |r| money(r, currency)),
        ]);
    }
    t.add_row(vec![
        format!("{} cycles", summary.cycle_count),
        String::new(),
        String::new(),
        optional(summary.average_fca, 2),
        optional(summary.average_survival_pct, 1),
        String::new(),
        money(summary.total_revenue, currency),
    ]);
    t
}
