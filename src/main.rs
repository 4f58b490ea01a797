use std::path::{Path, PathBuf};
use std::process::ExitCode;

use weekly_metrics_reports::{build_summary, run_all, write_report_csvs, write_summary, Database};

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .try_init();
}

fn usage(program: &str) -> String {
    format!("usage: {program} <database-file> [out-dir]")
}

fn run(db_path: &Path, out_dir: &Path) -> Result<(), weekly_metrics_reports::ReportError> {
    let db = Database::open(db_path)?;
    tracing::info!(db = %db.db_path().display(), "database opened");

    let bundle = run_all(&db)?;
    tracing::info!(
        revenue_years = bundle.total_revenue_per_year.len(),
        net_income_years = bundle.total_net_income_per_year.len(),
        trend_points = bundle.weekly_revenue.len(),
        has_most_profitable_week = bundle.most_profitable_week.is_some(),
        "reports computed"
    );

    let written = write_report_csvs(&bundle, out_dir)?;
    for path in &written {
        tracing::info!(path = %path.display(), "report written");
    }

    let summary = build_summary(&db, &bundle)?;
    let summary_path = write_summary(&summary, out_dir)?;
    tracing::info!(path = %summary_path.display(), weeks_total = summary.weeks_total, "summary written");
    Ok(())
}

fn main() -> ExitCode {
    init_tracing();

    let mut args = std::env::args();
    let program = args.next().unwrap_or_else(|| "weekly-reports".to_string());
    let Some(db_path) = args.next().map(PathBuf::from) else {
        eprintln!("{}", usage(&program));
        return ExitCode::FAILURE;
    };
    let out_dir = args.next().map_or_else(|| PathBuf::from("outputs"), PathBuf::from);

    match run(&db_path, &out_dir) {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            tracing::error!(%error, "reporting run failed");
            ExitCode::FAILURE
        }
    }
}
