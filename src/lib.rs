mod db;
mod errors;
mod export;
mod models;
mod reports;

pub use crate::db::{Database, METRICS_TABLE};
pub use crate::errors::{ReportError, ReportResult};
pub use crate::export::{write_report_csvs, write_summary};
pub use crate::models::{
    AvgWeeklyRevenue, MetricKind, MostProfitableWeek, ReportBundle, ReportKind, RunSummary, WeekCounts,
    WeeklyRevenuePoint, YearlyNetIncome, YearlyRevenue,
};
pub use crate::reports::{build_summary, run_all};
