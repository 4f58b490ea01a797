use crate::errors::{ReportError, ReportResult};
use crate::models::{
    AvgWeeklyRevenue, MetricKind, MostProfitableWeek, WeekCounts, WeeklyRevenuePoint, YearlyNetIncome,
    YearlyRevenue,
};
use rusqlite::{Connection, OpenFlags, OptionalExtension};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

pub const METRICS_TABLE: &str = "weekly_metrics_clean";

/// Read-only handle over the `weekly_metrics_clean` table.
///
/// The table is populated and owned by an upstream ETL process; this side
/// never creates, mutates, or deletes rows, so the connection is opened with
/// read-only flags and `open` refuses databases where the table is missing.
#[derive(Debug)]
pub struct Database {
    conn: Mutex<Connection>,
    db_path: PathBuf,
}

impl Database {
    pub fn open(path: &Path) -> ReportResult<Self> {
        let conn = Connection::open_with_flags(
            path,
            OpenFlags::SQLITE_OPEN_READ_ONLY | OpenFlags::SQLITE_OPEN_NO_MUTEX,
        )
        .map_err(|err| ReportError::Io(format!("cannot open {}: {err}", path.display())))?;

        let table_present: i64 = conn.query_row(
            "SELECT COUNT(1) FROM sqlite_master WHERE type = 'table' AND name = ?1",
            [METRICS_TABLE],
            |row| row.get(0),
        )?;
        if table_present == 0 {
            return Err(ReportError::Schema(format!(
                "table {METRICS_TABLE} not found in {}",
                path.display()
            )));
        }

        Ok(Self {
            conn: Mutex::new(conn),
            db_path: path.to_path_buf(),
        })
    }

    pub fn db_path(&self) -> &Path {
        &self.db_path
    }

    /// Query 1: total revenue per year, ascending by year.
    pub fn total_revenue_per_year(&self) -> ReportResult<Vec<YearlyRevenue>> {
        let conn = self.conn.lock().map_err(|_| ReportError::Internal("database mutex poisoned".to_string()))?;
        let query = format!(
            "SELECT year, SUM(value) AS total_revenue
             FROM {METRICS_TABLE}
             WHERE lower({label}) = ?1
             GROUP BY year
             ORDER BY year ASC",
            label = MetricKind::Revenue.label_column(),
        );
        let mut stmt = conn.prepare(&query)?;
        let rows = stmt.query_map([MetricKind::Revenue.label_literal()], |row| {
            Ok(YearlyRevenue {
                year: row.get(0)?,
                total_revenue: row.get(1)?,
            })
        })?;
        rows.collect::<Result<Vec<_>, _>>().map_err(ReportError::from)
    }

    /// Query 2: total net income per year, ascending by year.
    pub fn total_net_income_per_year(&self) -> ReportResult<Vec<YearlyNetIncome>> {
        let conn = self.conn.lock().map_err(|_| ReportError::Internal("database mutex poisoned".to_string()))?;
        let query = format!(
            "SELECT year, SUM(value) AS total_net_income
             FROM {METRICS_TABLE}
             WHERE lower({label}) = ?1
             GROUP BY year
             ORDER BY year ASC",
            label = MetricKind::TotalNetIncome.label_column(),
        );
        let mut stmt = conn.prepare(&query)?;
        let rows = stmt.query_map([MetricKind::TotalNetIncome.label_literal()], |row| {
            Ok(YearlyNetIncome {
                year: row.get(0)?,
                total_net_income: row.get(1)?,
            })
        })?;
        rows.collect::<Result<Vec<_>, _>>().map_err(ReportError::from)
    }

    /// Query 3: the single week with the highest summed net income.
    ///
    /// Ties resolve to the earliest year, then the earliest week, so repeated
    /// runs over the same data return the same row. `None` when the table has
    /// no net-income rows at all.
    pub fn most_profitable_week(&self) -> ReportResult<Option<MostProfitableWeek>> {
        let conn = self.conn.lock().map_err(|_| ReportError::Internal("database mutex poisoned".to_string()))?;
        let query = format!(
            "SELECT year, week, SUM(value) AS net_income
             FROM {METRICS_TABLE}
             WHERE lower({label}) = ?1
             GROUP BY year, week
             ORDER BY net_income DESC, year ASC, week ASC
             LIMIT 1",
            label = MetricKind::TotalNetIncome.label_column(),
        );
        conn.query_row(&query, [MetricKind::TotalNetIncome.label_literal()], |row| {
            Ok(MostProfitableWeek {
                year: row.get(0)?,
                week: row.get(1)?,
                net_income: row.get(2)?,
            })
        })
        .optional()
        .map_err(ReportError::from)
    }

    /// Query 4: average weekly revenue per year, ascending by year.
    ///
    /// AVG runs over revenue rows, not over distinct weeks; if a week carries
    /// several revenue rows each contributes separately, matching SUM/COUNT
    /// over the same filtered rows.
    pub fn avg_weekly_revenue_per_year(&self) -> ReportResult<Vec<AvgWeeklyRevenue>> {
        let conn = self.conn.lock().map_err(|_| ReportError::Internal("database mutex poisoned".to_string()))?;
        let query = format!(
            "SELECT year, AVG(value) AS avg_weekly_revenue
             FROM {METRICS_TABLE}
             WHERE lower({label}) = ?1
             GROUP BY year
             ORDER BY year ASC",
            label = MetricKind::Revenue.label_column(),
        );
        let mut stmt = conn.prepare(&query)?;
        let rows = stmt.query_map([MetricKind::Revenue.label_literal()], |row| {
            Ok(AvgWeeklyRevenue {
                year: row.get(0)?,
                avg_weekly_revenue: row.get(1)?,
            })
        })?;
        rows.collect::<Result<Vec<_>, _>>().map_err(ReportError::from)
    }

    /// Query 5: weekly revenue trend ordered by year then week.
    ///
    /// Weeks with no revenue rows are absent from the result; the consumer
    /// treats gaps as "no data", never as zero.
    pub fn weekly_revenue_trend(&self) -> ReportResult<Vec<WeeklyRevenuePoint>> {
        let conn = self.conn.lock().map_err(|_| ReportError::Internal("database mutex poisoned".to_string()))?;
        let query = format!(
            "SELECT year, week, SUM(value) AS weekly_revenue
             FROM {METRICS_TABLE}
             WHERE lower({label}) = ?1
             GROUP BY year, week
             ORDER BY year ASC, week ASC",
            label = MetricKind::Revenue.label_column(),
        );
        let mut stmt = conn.prepare(&query)?;
        let rows = stmt.query_map([MetricKind::Revenue.label_literal()], |row| {
            Ok(WeeklyRevenuePoint {
                year: row.get(0)?,
                week: row.get(1)?,
                weekly_revenue: row.get(2)?,
            })
        })?;
        rows.collect::<Result<Vec<_>, _>>().map_err(ReportError::from)
    }

    /// Distinct `(year, week)` coverage, total and per year.
    pub fn week_counts(&self) -> ReportResult<WeekCounts> {
        let conn = self.conn.lock().map_err(|_| ReportError::Internal("database mutex poisoned".to_string()))?;
        let weeks_total: i64 = conn.query_row(
            &format!("SELECT COUNT(1) FROM (SELECT DISTINCT year, week FROM {METRICS_TABLE})"),
            [],
            |row| row.get(0),
        )?;

        let mut stmt = conn.prepare(&format!(
            "SELECT year, COUNT(DISTINCT week)
             FROM {METRICS_TABLE}
             GROUP BY year
             ORDER BY year ASC"
        ))?;
        let rows = stmt.query_map([], |row| Ok((row.get::<_, i64>(0)?, row.get::<_, i64>(1)?)))?;
        let mut weeks_by_year = BTreeMap::new();
        for row in rows {
            let (year, count) = row?;
            weeks_by_year.insert(year, count);
        }

        Ok(WeekCounts {
            weeks_total,
            weeks_by_year,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::{Database, METRICS_TABLE};
    use crate::errors::ReportError;
    use rusqlite::{params, Connection};
    use std::path::Path;

    fn create_fixture_db(path: &Path, rows: &[(i64, i64, &str, &str, f64)]) {
        let conn = Connection::open(path).expect("create fixture db");
        conn.execute_batch(&format!(
            "CREATE TABLE {METRICS_TABLE} (
               year INTEGER NOT NULL,
               week INTEGER NOT NULL,
               channel TEXT,
               metric_name TEXT,
               value REAL,
               metric TEXT
             )"
        ))
        .expect("create table");
        for (year, week, metric_name, metric, value) in rows {
            conn.execute(
                &format!(
                    "INSERT INTO {METRICS_TABLE} (year, week, metric_name, metric, value)
                     VALUES (?1, ?2, ?3, ?4, ?5)"
                ),
                params![year, week, metric_name, metric, value],
            )
            .expect("insert row");
        }
    }

    #[test]
    fn open_rejects_database_without_metrics_table() {
        let dir = tempfile::tempdir().expect("tempdir");
        let db_path = dir.path().join("empty.db");
        Connection::open(&db_path).expect("create empty db");

        let err = Database::open(&db_path).expect_err("open should fail");
        assert!(matches!(err, ReportError::Schema(_)));
    }

    #[test]
    fn label_match_is_case_insensitive_but_exact() {
        let dir = tempfile::tempdir().expect("tempdir");
        let db_path = dir.path().join("metrics.db");
        create_fixture_db(
            &db_path,
            &[
                (2024, 1, "Revenue", "CB Revenue", 100.0),
                (2024, 1, "REVENUE", "BG Revenue", 50.0),
                // leading space: must not match
                (2024, 1, " Revenue", "DS Revenue", 999.0),
            ],
        );
        let db = Database::open(&db_path).expect("open");

        let totals = db.total_revenue_per_year().expect("query");
        assert_eq!(totals.len(), 1);
        assert_eq!(totals[0].year, 2024);
        assert!((totals[0].total_revenue - 150.0).abs() < f64::EPSILON);
    }

    #[test]
    fn most_profitable_week_breaks_ties_on_earliest_week() {
        let dir = tempfile::tempdir().expect("tempdir");
        let db_path = dir.path().join("metrics.db");
        create_fixture_db(
            &db_path,
            &[
                (2024, 5, "Net Income", "Total Net Income", 40.0),
                (2024, 2, "Net Income", "Total Net Income", 40.0),
                (2025, 1, "Net Income", "Total Net Income", 40.0),
                (2024, 3, "Net Income", "Total Net Income", 10.0),
            ],
        );
        let db = Database::open(&db_path).expect("open");

        let best = db.most_profitable_week().expect("query").expect("row");
        assert_eq!((best.year, best.week), (2024, 2));
    }

    #[test]
    fn most_profitable_week_is_none_without_net_income_rows() {
        let dir = tempfile::tempdir().expect("tempdir");
        let db_path = dir.path().join("metrics.db");
        create_fixture_db(&db_path, &[(2024, 1, "Revenue", "CB Revenue", 100.0)]);
        let db = Database::open(&db_path).expect("open");

        assert!(db.most_profitable_week().expect("query").is_none());
    }

    #[test]
    fn week_counts_deduplicate_year_week_pairs() {
        let dir = tempfile::tempdir().expect("tempdir");
        let db_path = dir.path().join("metrics.db");
        create_fixture_db(
            &db_path,
            &[
                (2024, 1, "Revenue", "CB Revenue", 1.0),
                (2024, 1, "Net Income", "Total Net Income", 2.0),
                (2024, 2, "Revenue", "CB Revenue", 3.0),
                (2025, 1, "Revenue", "CB Revenue", 4.0),
            ],
        );
        let db = Database::open(&db_path).expect("open");

        let counts = db.week_counts().expect("query");
        assert_eq!(counts.weeks_total, 3);
        assert_eq!(counts.weeks_by_year.get(&2024), Some(&2));
        assert_eq!(counts.weeks_by_year.get(&2025), Some(&1));
    }
}
