use crate::errors::{ReportError, ReportResult};
use crate::models::{ReportBundle, ReportKind, RunSummary};
use std::fs;
use std::path::{Path, PathBuf};

/// Writes one CSV per report into `out_dir`, named after the report slug.
/// Returns the paths written. Values are plain numerics so no quoting or
/// escaping is needed.
pub fn write_report_csvs(bundle: &ReportBundle, out_dir: &Path) -> ReportResult<Vec<PathBuf>> {
    fs::create_dir_all(out_dir).map_err(|err| ReportError::Io(err.to_string()))?;
    let mut written = Vec::with_capacity(ReportKind::ALL.len());

    for kind in ReportKind::ALL {
        let path = out_dir.join(format!("{}.csv", kind.as_str()));
        let body = render_csv(bundle, kind);
        fs::write(&path, body).map_err(|err| ReportError::Io(err.to_string()))?;
        written.push(path);
    }
    Ok(written)
}

fn render_csv(bundle: &ReportBundle, kind: ReportKind) -> String {
    let mut out = String::new();
    match kind {
        ReportKind::TotalRevenuePerYear => {
            out.push_str("year,total_revenue\n");
            for row in &bundle.total_revenue_per_year {
                out.push_str(&format!("{},{}\n", row.year, row.total_revenue));
            }
        }
        ReportKind::TotalNetIncomePerYear => {
            out.push_str("year,total_net_income\n");
            for row in &bundle.total_net_income_per_year {
                out.push_str(&format!("{},{}\n", row.year, row.total_net_income));
            }
        }
        ReportKind::MostProfitableWeek => {
            out.push_str("year,week,net_income\n");
            if let Some(row) = &bundle.most_profitable_week {
                out.push_str(&format!("{},{},{}\n", row.year, row.week, row.net_income));
            }
        }
        ReportKind::AvgWeeklyRevenue => {
            out.push_str("year,avg_weekly_revenue\n");
            for row in &bundle.avg_weekly_revenue {
                out.push_str(&format!("{},{}\n", row.year, row.avg_weekly_revenue));
            }
        }
        ReportKind::WeeklyRevenue => {
            out.push_str("year,week,weekly_revenue\n");
            for row in &bundle.weekly_revenue {
                out.push_str(&format!("{},{},{}\n", row.year, row.week, row.weekly_revenue));
            }
        }
    }
    out
}

/// Writes `run_summary.json` into `out_dir` and returns its path.
pub fn write_summary(summary: &RunSummary, out_dir: &Path) -> ReportResult<PathBuf> {
    fs::create_dir_all(out_dir).map_err(|err| ReportError::Io(err.to_string()))?;
    let path = out_dir.join("run_summary.json");
    let body = serde_json::to_string_pretty(summary)?;
    fs::write(&path, body).map_err(|err| ReportError::Io(err.to_string()))?;
    Ok(path)
}
