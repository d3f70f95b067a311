/// Tables this tool reads from and writes to.
pub const TABLES: [&str; 3] = [
    "workers",
    "supervisor_assessment_items",
    "supervisor_assessments",
];

/// Layout of the dashboard tables as the tool expects them. Production
/// databases already carry these; this DDL is for fixtures.
pub const DDL: &str = r#"
CREATE TABLE IF NOT EXISTS workers (
  id INTEGER PRIMARY KEY AUTOINCREMENT,
  employee_id TEXT NOT NULL,
  name TEXT NOT NULL,
  entity TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS supervisor_assessment_items (
  id INTEGER PRIMARY KEY AUTOINCREMENT,
  category TEXT NOT NULL,
  item_name TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS supervisor_assessments (
  id INTEGER PRIMARY KEY AUTOINCREMENT,
  worker_id INTEGER NOT NULL REFERENCES workers(id),
  item_id INTEGER NOT NULL REFERENCES supervisor_assessment_items(id),
  level INTEGER NOT NULL CHECK (level BETWEEN 1 AND 5),
  assessed_by TEXT,
  assessment_date TEXT,
  comments TEXT
);
"#;

pub const CLEANUP_SQL: &str = "DELETE FROM supervisor_assessments;";
