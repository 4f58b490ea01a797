use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Normalized metric label. The source table carries two label columns used
/// inconsistently upstream: revenue rows are identified by `metric_name`,
/// net-income rows by `metric`. Each kind owns the physical column it is
/// matched against and the lowercase literal it must equal, so no query
/// repeats a label string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MetricKind {
    Revenue,
    TotalNetIncome,
}

impl MetricKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Revenue => "revenue",
            Self::TotalNetIncome => "total-net-income",
        }
    }

    /// Physical column holding this kind's label in `weekly_metrics_clean`.
    pub fn label_column(self) -> &'static str {
        match self {
            Self::Revenue => "metric_name",
            Self::TotalNetIncome => "metric",
        }
    }

    /// Lowercase literal the label column is compared against.
    /// Comparison is case-insensitive but exact: no trimming, no fuzzing.
    pub fn label_literal(self) -> &'static str {
        match self {
            Self::Revenue => "revenue",
            Self::TotalNetIncome => "total net income",
        }
    }
}

/// The five fixed reports, with slugs matching their output file names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ReportKind {
    TotalRevenuePerYear,
    TotalNetIncomePerYear,
    MostProfitableWeek,
    AvgWeeklyRevenue,
    WeeklyRevenue,
}

impl ReportKind {
    pub const ALL: [Self; 5] = [
        Self::TotalRevenuePerYear,
        Self::TotalNetIncomePerYear,
        Self::MostProfitableWeek,
        Self::AvgWeeklyRevenue,
        Self::WeeklyRevenue,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::TotalRevenuePerYear => "total_revenue_per_year",
            Self::TotalNetIncomePerYear => "total_net_income_per_year",
            Self::MostProfitableWeek => "most_profitable_week",
            Self::AvgWeeklyRevenue => "avg_weekly_revenue",
            Self::WeeklyRevenue => "weekly_revenue",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct YearlyRevenue {
    pub year: i64,
    pub total_revenue: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct YearlyNetIncome {
    pub year: i64,
    pub total_net_income: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MostProfitableWeek {
    pub year: i64,
    pub week: i64,
    pub net_income: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AvgWeeklyRevenue {
    pub year: i64,
    pub avg_weekly_revenue: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeeklyRevenuePoint {
    pub year: i64,
    pub week: i64,
    pub weekly_revenue: f64,
}

/// Distinct `(year, week)` coverage of the table, regardless of metric label.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeekCounts {
    pub weeks_total: i64,
    pub weeks_by_year: BTreeMap<i64, i64>,
}

/// All five result sets from one pass over the table.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportBundle {
    pub total_revenue_per_year: Vec<YearlyRevenue>,
    pub total_net_income_per_year: Vec<YearlyNetIncome>,
    pub most_profitable_week: Option<MostProfitableWeek>,
    pub avg_weekly_revenue: Vec<AvgWeeklyRevenue>,
    pub weekly_revenue: Vec<WeeklyRevenuePoint>,
    pub generated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RunSummary {
    pub weeks_total: i64,
    pub weeks_by_year: BTreeMap<i64, i64>,
    pub total_revenue_by_year: BTreeMap<i64, f64>,
    pub total_net_income_by_year: BTreeMap<i64, f64>,
    pub generated_at: DateTime<Utc>,
}
