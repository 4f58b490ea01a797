use crate::db::Database;
use crate::errors::ReportResult;
use crate::models::{ReportBundle, RunSummary};
use chrono::Utc;

/// Runs the five reports against the current table contents.
///
/// The queries are independent of one another; they run sequentially here but
/// nothing depends on their order.
pub fn run_all(db: &Database) -> ReportResult<ReportBundle> {
    Ok(ReportBundle {
        total_revenue_per_year: db.total_revenue_per_year()?,
        total_net_income_per_year: db.total_net_income_per_year()?,
        most_profitable_week: db.most_profitable_week()?,
        avg_weekly_revenue: db.avg_weekly_revenue_per_year()?,
        weekly_revenue: db.weekly_revenue_trend()?,
        generated_at: Utc::now(),
    })
}

/// Builds the run summary from the bundle plus the table's week coverage.
pub fn build_summary(db: &Database, bundle: &ReportBundle) -> ReportResult<RunSummary> {
    let counts = db.week_counts()?;
    Ok(RunSummary {
        weeks_total: counts.weeks_total,
        weeks_by_year: counts.weeks_by_year,
        total_revenue_by_year: bundle
            .total_revenue_per_year
            .iter()
            .map(|row| (row.year, row.total_revenue))
            .collect(),
        total_net_income_by_year: bundle
            .total_net_income_per_year
            .iter()
            .map(|row| (row.year, row.total_net_income))
            .collect(),
        generated_at: bundle.generated_at,
    })
}
