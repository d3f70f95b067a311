use crate::model::{AssessmentItem, Category, EntitySummary, NewAssessment, Worker};
use anyhow::Context;
use rusqlite::{params, Connection, OptionalExtension};
use std::path::Path;
use std::sync::{Arc, Mutex, MutexGuard};

#[derive(Clone)]
pub struct Store {
    pub conn: Arc<Mutex<Connection>>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableCount {
    pub table: String,
    pub rows: Option<u64>,
}

impl Store {
    /// Open an existing database file. A missing file is an error rather
    /// than a fresh empty database.
    pub fn open(path: &Path) -> anyhow::Result<Self> {
        if !path.exists() {
            anyhow::bail!("database not found: {}", path.display());
        }
        let conn = Connection::open(path)
            .with_context(|| format!("failed to open sqlite db {}", path.display()))?;
        conn.execute("PRAGMA foreign_keys = ON", [])?;
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    pub fn memory() -> anyhow::Result<Self> {
        let conn = Connection::open_in_memory().context("failed to open in-memory sqlite db")?;
        conn.execute("PRAGMA foreign_keys = ON", [])?;
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    fn lock(&self) -> anyhow::Result<MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|_| anyhow::anyhow!("sqlite connection mutex poisoned"))
    }

    /// Create the dashboard tables if missing. Fixture use only.
    pub fn init_schema(&self) -> anyhow::Result<()> {
        let conn = self.lock()?;
        conn.execute_batch(crate::storage::schema::DDL)?;
        Ok(())
    }

    pub fn load_workers(&self) -> anyhow::Result<Vec<Worker>> {
        let conn = self.lock()?;
        let mut stmt = conn
            .prepare(
                "SELECT id, employee_id, name, entity FROM workers ORDER BY entity, employee_id",
            )
            .context("failed to query workers")?;

        let rows = stmt.query_map([], |row| {
            Ok(Worker {
                id: row.get(0)?,
                employee_id: row.get(1)?,
                name: row.get(2)?,
                entity: row.get(3)?,
            })
        })?;

        let mut workers = Vec::new();
        for r in rows {
            workers.push(r?);
        }
        tracing::info!(event = "load_reference", table = "workers", rows = workers.len());
        Ok(workers)
    }

    /// Items ordered by category. Rows with a category outside
    /// Level2/Level3/Level4 are skipped.
    pub fn load_items(&self) -> anyhow::Result<Vec<AssessmentItem>> {
        let conn = self.lock()?;
        let mut stmt = conn
            .prepare(
                "SELECT id, category, item_name FROM supervisor_assessment_items ORDER BY category",
            )
            .context("failed to query supervisor_assessment_items")?;

        let rows = stmt.query_map([], |row| {
            Ok((
                row.get::<_, i64>(0)?,
                row.get::<_, String>(1)?,
                row.get::<_, String>(2)?,
            ))
        })?;

        let mut items = Vec::new();
        for r in rows {
            let (id, category, item_name) = r?;
            match Category::parse(&category) {
                Some(category) => items.push(AssessmentItem {
                    id,
                    category,
                    item_name,
                }),
                None => {
                    tracing::warn!(
                        event = "unknown_category",
                        item_id = id,
                        category = %category
                    );
                }
            }
        }
        tracing::info!(
            event = "load_reference",
            table = "supervisor_assessment_items",
            rows = items.len()
        );
        Ok(items)
    }

    /// Insert every row inside one transaction. On error the transaction is
    /// dropped uncommitted and nothing from this batch persists.
    pub fn insert_assessments(&self, rows: &[NewAssessment]) -> anyhow::Result<usize> {
        let mut conn = self.lock()?;
        let tx = conn.transaction()?;
        {
            let mut stmt = tx.prepare(
                "INSERT INTO supervisor_assessments
                 (worker_id, item_id, level, assessed_by, assessment_date, comments)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            )?;
            for a in rows {
                stmt.execute(params![
                    a.worker_id,
                    a.item_id,
                    a.level,
                    a.assessed_by,
                    a.assessment_date_str(),
                    a.comments,
                ])
                .with_context(|| {
                    format!(
                        "failed to insert assessment (worker_id={}, item_id={})",
                        a.worker_id, a.item_id
                    )
                })?;
            }
        }
        tx.commit()?;
        tracing::info!(event = "assessments_inserted", rows = rows.len());
        Ok(rows.len())
    }

    /// Per-entity verification aggregate over workers joined with their
    /// assessments.
    pub fn entity_summary(&self) -> anyhow::Result<Vec<EntitySummary>> {
        let conn = self.lock()?;
        let mut stmt = conn.prepare(
            "SELECT
                w.entity,
                COUNT(DISTINCT w.id) AS workers,
                COUNT(sa.id) AS assessments,
                AVG(sa.level) AS avg_level
             FROM workers w
             JOIN supervisor_assessments sa ON w.id = sa.worker_id
             GROUP BY w.entity
             ORDER BY w.entity",
        )?;

        let rows = stmt.query_map([], |row| {
            Ok(EntitySummary {
                entity: row.get(0)?,
                workers: row.get(1)?,
                assessments: row.get(2)?,
                avg_level: row.get::<_, Option<f64>>(3)?.unwrap_or(0.0),
            })
        })?;

        let mut out = Vec::new();
        for r in rows {
            out.push(r?);
        }
        Ok(out)
    }

    pub fn count_assessments(&self) -> anyhow::Result<u64> {
        let conn = self.lock()?;
        let n: i64 = conn.query_row("SELECT COUNT(*) FROM supervisor_assessments", [], |r| {
            r.get(0)
        })?;
        Ok(n as u64)
    }

    /// Runs the cleanup statement. Returns the number of deleted rows.
    pub fn delete_all_assessments(&self) -> anyhow::Result<usize> {
        let conn = self.lock()?;
        let n = conn.execute(crate::storage::schema::CLEANUP_SQL, [])?;
        tracing::info!(event = "assessments_deleted", rows = n);
        Ok(n)
    }

    pub fn missing_tables(&self) -> anyhow::Result<Vec<String>> {
        let conn = self.lock()?;
        let mut missing = Vec::new();
        for table in crate::storage::schema::TABLES {
            let found: Option<String> = conn
                .query_row(
                    "SELECT name FROM sqlite_master WHERE type = 'table' AND name = ?1",
                    params![table],
                    |r| r.get(0),
                )
                .optional()?;
            if found.is_none() {
                missing.push(table.to_string());
            }
        }
        Ok(missing)
    }

    /// Best-effort row counts; `None` for tables that cannot be read.
    pub fn table_counts(&self) -> anyhow::Result<Vec<TableCount>> {
        let conn = self.lock()?;
        Ok(crate::storage::schema::TABLES
            .iter()
            .map(|table| TableCount {
                table: table.to_string(),
                rows: conn
                    .query_row(&format!("SELECT COUNT(*) FROM {}", table), [], |r| {
                        r.get::<_, i64>(0).map(|x| x as u64)
                    })
                    .ok(),
            })
            .collect())
    }
}
