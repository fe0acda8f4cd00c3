//! SQLite record store
//!
//! The store lives at `.crew/crew.db` and holds every record collection.
//! It is the only writer: each operation that touches more than one row runs
//! in a single transaction, so a failed command never leaves a partial write.
//!
//! Skill sets are kept comma-joined in their columns and turned back into
//! [`SkillSet`] values on the way out. Timestamps are RFC 3339 text with a
//! fixed width so they sort lexicographically.

use std::path::{Path, PathBuf};
use std::str::FromStr;

use chrono::{DateTime, SecondsFormat, Utc};
use rusqlite::types::Type;
use rusqlite::{params, Connection, OptionalExtension, Row};
use serde::Serialize;
use thiserror::Error;

use crate::domain::{
    Assignment, AssignmentId, AssignmentStatus, AssignmentView, AvailabilityPeriod, Chief,
    ChiefId, DateError, DateRange, MatchInput, PeriodId, Priority, SkillSet, Task, TaskId,
    TaskStatus, Worker, WorkerId,
};

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("No {kind} with id {id}")]
    NotFound { kind: &'static str, id: i64 },

    #[error("Database schema version {found} is newer than this build supports ({supported})")]
    UnsupportedSchema { found: i32, supported: i32 },

    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),
}

impl StoreError {
    fn not_found(kind: &'static str, id: i64) -> Self {
        StoreError::NotFound { kind, id }
    }
}

impl From<DateError> for StoreError {
    fn from(err: DateError) -> Self {
        StoreError::Validation(err.to_string())
    }
}

type Result<T> = std::result::Result<T, StoreError>;

/// Fields needed to register a worker
#[derive(Debug, Clone, Default)]
pub struct NewWorker {
    pub name: String,
    pub department: String,
    pub skills: SkillSet,
    pub phone_number: Option<String>,
    pub email: Option<String>,
}

/// Fields needed to register a chief
#[derive(Debug, Clone, Default)]
pub struct NewChief {
    pub name: String,
    pub department: String,
    pub email: Option<String>,
}

/// Fields needed to record an availability period
#[derive(Debug, Clone)]
pub struct NewPeriod {
    pub worker_id: WorkerId,
    pub dates: DateRange,
}

/// Fields needed to propose a task
#[derive(Debug, Clone)]
pub struct NewTask {
    pub chief_id: ChiefId,
    pub title: String,
    pub description: Option<String>,
    pub required_skills: SkillSet,
    pub required_department: String,
    pub priority: Priority,
    pub estimated_days: u32,
    pub dates: DateRange,
}

/// Fields needed to confirm an assignment
#[derive(Debug, Clone)]
pub struct NewAssignment {
    pub task_id: TaskId,
    pub worker_id: WorkerId,

    /// Defaults to the task's own range
    pub dates: Option<DateRange>,

    pub match_score: Option<f64>,
}

/// Rows removed or reset when a worker is deleted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct WorkerRemoval {
    pub periods: usize,
    pub assignments: usize,
    pub tasks_reset: usize,
}

/// Record counts per collection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct StoreCounts {
    pub workers: usize,
    pub chiefs: usize,
    pub periods: usize,
    pub tasks_pending: usize,
    pub tasks_matched: usize,
    pub tasks_assigned: usize,
    pub assignments: usize,
}

impl StoreCounts {
    pub fn tasks(&self) -> usize {
        self.tasks_pending + self.tasks_matched + self.tasks_assigned
    }
}

const WORKER_COLUMNS: &str = "id, name, department, skills, phone_number, email, created_at";
const CHIEF_COLUMNS: &str = "id, name, department, email, created_at";
const PERIOD_COLUMNS: &str = "id, worker_id, start_date, end_date, created_at";
const TASK_COLUMNS: &str = "id, chief_id, chief_name, title, description, required_skills, \
     required_department, priority, estimated_days, start_date, end_date, status, \
     matched_worker_id, created_at";
const ASSIGNMENT_COLUMNS: &str =
    "id, task_id, worker_id, start_date, end_date, match_score, status, created_at";

/// Handle to the record database
pub struct Store {
    /// Path to the SQLite database (None when in memory)
    path: Option<PathBuf>,

    conn: Connection,
}

impl Store {
    /// Schema version - bump when the schema changes
    const SCHEMA_VERSION: i32 = 1;

    /// Opens or creates the store at the given path
    pub fn open(path: &Path) -> Result<Self> {
        let conn = Connection::open(path)?;
        conn.execute_batch("PRAGMA journal_mode=WAL; PRAGMA synchronous=NORMAL;")?;
        Self::from_connection(conn, Some(path.to_path_buf()))
    }

    /// Opens a throwaway store held in memory
    pub fn open_in_memory() -> Result<Self> {
        Self::from_connection(Connection::open_in_memory()?, None)
    }

    fn from_connection(conn: Connection, path: Option<PathBuf>) -> Result<Self> {
        conn.execute_batch("PRAGMA foreign_keys=ON;")?;
        let mut store = Self { path, conn };
        store.ensure_schema()?;
        Ok(store)
    }

    /// Returns the database path, if on disk
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    fn ensure_schema(&mut self) -> Result<()> {
        let version: i32 = self
            .conn
            .query_row("PRAGMA user_version", [], |row| row.get(0))?;

        if version == Self::SCHEMA_VERSION {
            return Ok(());
        }
        if version > Self::SCHEMA_VERSION {
            return Err(StoreError::UnsupportedSchema {
                found: version,
                supported: Self::SCHEMA_VERSION,
            });
        }

        tracing::debug!(from = version, to = Self::SCHEMA_VERSION, "creating store schema");
        self.create_schema()
    }

    fn create_schema(&mut self) -> Result<()> {
        self.conn.execute_batch(
            "
            CREATE TABLE IF NOT EXISTS workers (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                name TEXT NOT NULL,
                department TEXT NOT NULL DEFAULT '',
                skills TEXT NOT NULL DEFAULT '',
                phone_number TEXT,
                email TEXT,
                created_at TEXT NOT NULL
            );

            CREATE TABLE IF NOT EXISTS chiefs (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                name TEXT NOT NULL,
                department TEXT NOT NULL DEFAULT '',
                email TEXT,
                created_at TEXT NOT NULL
            );

            CREATE TABLE IF NOT EXISTS availability_periods (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                worker_id INTEGER NOT NULL REFERENCES workers(id) ON DELETE CASCADE,
                start_date TEXT NOT NULL,
                end_date TEXT NOT NULL,
                created_at TEXT NOT NULL
            );

            -- chief_id carries no foreign key: tasks outlive their chief and keep chief_name
            CREATE TABLE IF NOT EXISTS tasks (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                chief_id INTEGER NOT NULL,
                chief_name TEXT NOT NULL,
                title TEXT NOT NULL,
                description TEXT,
                required_skills TEXT NOT NULL DEFAULT '',
                required_department TEXT NOT NULL DEFAULT '',
                priority TEXT NOT NULL DEFAULT 'medium',
                estimated_days INTEGER NOT NULL DEFAULT 1,
                start_date TEXT NOT NULL,
                end_date TEXT NOT NULL,
                status TEXT NOT NULL DEFAULT 'pending',
                matched_worker_id INTEGER,
                created_at TEXT NOT NULL
            );

            CREATE TABLE IF NOT EXISTS assignments (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                task_id INTEGER NOT NULL REFERENCES tasks(id) ON DELETE CASCADE,
                worker_id INTEGER NOT NULL REFERENCES workers(id) ON DELETE CASCADE,
                start_date TEXT NOT NULL,
                end_date TEXT NOT NULL,
                match_score REAL NOT NULL DEFAULT 0,
                status TEXT NOT NULL DEFAULT 'assigned',
                created_at TEXT NOT NULL
            );

            CREATE INDEX IF NOT EXISTS idx_periods_worker ON availability_periods(worker_id);
            CREATE INDEX IF NOT EXISTS idx_tasks_status ON tasks(status);
            CREATE INDEX IF NOT EXISTS idx_tasks_matched ON tasks(matched_worker_id);
            CREATE INDEX IF NOT EXISTS idx_assignments_worker ON assignments(worker_id);
            CREATE INDEX IF NOT EXISTS idx_assignments_task ON assignments(task_id);
            ",
        )?;

        self.conn.execute(
            &format!("PRAGMA user_version = {}", Self::SCHEMA_VERSION),
            [],
        )?;

        Ok(())
    }

    // ------------------------------------------------------------------
    // Workers
    // ------------------------------------------------------------------

    /// Registers a worker
    pub fn create_worker(&mut self, new: NewWorker) -> Result<Worker> {
        let name = required("name", &new.name)?;

        self.conn.execute(
            "INSERT INTO workers (name, department, skills, phone_number, email, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            params![
                name,
                new.department.trim(),
                new.skills.to_csv(),
                optional(new.phone_number),
                optional(new.email),
                timestamp_now(),
            ],
        )?;
        let id = WorkerId::new(self.conn.last_insert_rowid());
        tracing::debug!(worker = %id, "created worker");

        self.require_worker(id)
    }

    /// Lists workers, newest first
    pub fn workers(&self) -> Result<Vec<Worker>> {
        query_all(
            &self.conn,
            &format!("SELECT {WORKER_COLUMNS} FROM workers ORDER BY created_at DESC, id DESC"),
            worker_from_row,
        )
    }

    pub fn worker(&self, id: WorkerId) -> Result<Option<Worker>> {
        Ok(self
            .conn
            .query_row(
                &format!("SELECT {WORKER_COLUMNS} FROM workers WHERE id = ?1"),
                params![id.get()],
                worker_from_row,
            )
            .optional()?)
    }

    /// Like [`Store::worker`] but a missing worker is an error
    pub fn require_worker(&self, id: WorkerId) -> Result<Worker> {
        self.worker(id)?
            .ok_or_else(|| StoreError::not_found(WorkerId::KIND, id.get()))
    }

    /// Deletes a worker with their periods and assignments
    ///
    /// Tasks proposed for or assigned to the worker go back to pending.
    pub fn delete_worker(&mut self, id: WorkerId) -> Result<WorkerRemoval> {
        let tx = self.conn.transaction()?;

        if !exists(&tx, "workers", id.get())? {
            return Err(StoreError::not_found(WorkerId::KIND, id.get()));
        }

        let tasks_reset = tx.execute(
            "UPDATE tasks SET status = 'pending', matched_worker_id = NULL
             WHERE matched_worker_id = ?1",
            params![id.get()],
        )?;
        let assignments = tx.execute(
            "DELETE FROM assignments WHERE worker_id = ?1",
            params![id.get()],
        )?;
        let periods = tx.execute(
            "DELETE FROM availability_periods WHERE worker_id = ?1",
            params![id.get()],
        )?;
        tx.execute("DELETE FROM workers WHERE id = ?1", params![id.get()])?;

        tx.commit()?;

        let removal = WorkerRemoval {
            periods,
            assignments,
            tasks_reset,
        };
        tracing::debug!(worker = %id, ?removal, "deleted worker");
        Ok(removal)
    }

    // ------------------------------------------------------------------
    // Chiefs
    // ------------------------------------------------------------------

    /// Registers a chief
    pub fn create_chief(&mut self, new: NewChief) -> Result<Chief> {
        let name = required("name", &new.name)?;

        self.conn.execute(
            "INSERT INTO chiefs (name, department, email, created_at) VALUES (?1, ?2, ?3, ?4)",
            params![name, new.department.trim(), optional(new.email), timestamp_now()],
        )?;
        let id = ChiefId::new(self.conn.last_insert_rowid());
        tracing::debug!(chief = %id, "created chief");

        self.require_chief(id)
    }

    /// Lists chiefs, newest first
    pub fn chiefs(&self) -> Result<Vec<Chief>> {
        query_all(
            &self.conn,
            &format!("SELECT {CHIEF_COLUMNS} FROM chiefs ORDER BY created_at DESC, id DESC"),
            chief_from_row,
        )
    }

    pub fn chief(&self, id: ChiefId) -> Result<Option<Chief>> {
        Ok(self
            .conn
            .query_row(
                &format!("SELECT {CHIEF_COLUMNS} FROM chiefs WHERE id = ?1"),
                params![id.get()],
                chief_from_row,
            )
            .optional()?)
    }

    pub fn require_chief(&self, id: ChiefId) -> Result<Chief> {
        self.chief(id)?
            .ok_or_else(|| StoreError::not_found(ChiefId::KIND, id.get()))
    }

    /// Deletes a chief; their tasks remain with the recorded chief name
    pub fn delete_chief(&mut self, id: ChiefId) -> Result<()> {
        let removed = self
            .conn
            .execute("DELETE FROM chiefs WHERE id = ?1", params![id.get()])?;
        if removed == 0 {
            return Err(StoreError::not_found(ChiefId::KIND, id.get()));
        }
        tracing::debug!(chief = %id, "deleted chief");
        Ok(())
    }

    // ------------------------------------------------------------------
    // Availability
    // ------------------------------------------------------------------

    /// Records an availability period for an existing worker
    pub fn create_period(&mut self, new: NewPeriod) -> Result<AvailabilityPeriod> {
        let dates = DateRange::parse(&new.dates.start, &new.dates.end)?;
        self.require_worker(new.worker_id)?;

        self.conn.execute(
            "INSERT INTO availability_periods (worker_id, start_date, end_date, created_at)
             VALUES (?1, ?2, ?3, ?4)",
            params![new.worker_id.get(), dates.start, dates.end, timestamp_now()],
        )?;
        let id = PeriodId::new(self.conn.last_insert_rowid());
        tracing::debug!(period = %id, worker = %new.worker_id, %dates, "created availability period");

        self.conn
            .query_row(
                &format!("SELECT {PERIOD_COLUMNS} FROM availability_periods WHERE id = ?1"),
                params![id.get()],
                period_from_row,
            )
            .map_err(StoreError::from)
    }

    /// Lists all periods ordered by start date
    pub fn periods(&self) -> Result<Vec<AvailabilityPeriod>> {
        query_all(
            &self.conn,
            &format!(
                "SELECT {PERIOD_COLUMNS} FROM availability_periods ORDER BY start_date, id"
            ),
            period_from_row,
        )
    }

    /// Lists one worker's periods ordered by start date
    pub fn periods_for(&self, worker: WorkerId) -> Result<Vec<AvailabilityPeriod>> {
        let mut stmt = self.conn.prepare(&format!(
            "SELECT {PERIOD_COLUMNS} FROM availability_periods
             WHERE worker_id = ?1 ORDER BY start_date, id"
        ))?;
        let rows = stmt.query_map(params![worker.get()], period_from_row)?;
        Ok(rows.collect::<rusqlite::Result<Vec<_>>>()?)
    }

    pub fn delete_period(&mut self, id: PeriodId) -> Result<()> {
        let removed = self.conn.execute(
            "DELETE FROM availability_periods WHERE id = ?1",
            params![id.get()],
        )?;
        if removed == 0 {
            return Err(StoreError::not_found(PeriodId::KIND, id.get()));
        }
        tracing::debug!(period = %id, "deleted availability period");
        Ok(())
    }

    // ------------------------------------------------------------------
    // Tasks
    // ------------------------------------------------------------------

    /// Proposes a task on behalf of an existing chief
    pub fn create_task(&mut self, new: NewTask) -> Result<Task> {
        let title = required("title", &new.title)?;
        let dates = DateRange::parse(&new.dates.start, &new.dates.end)?;
        if new.estimated_days == 0 {
            return Err(StoreError::Validation(
                "estimated days must be at least 1".to_string(),
            ));
        }
        let chief = self.require_chief(new.chief_id)?;

        self.conn.execute(
            "INSERT INTO tasks (chief_id, chief_name, title, description, required_skills,
                                required_department, priority, estimated_days, start_date,
                                end_date, status, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, 'pending', ?11)",
            params![
                chief.id.get(),
                chief.name,
                title,
                optional(new.description),
                new.required_skills.to_csv(),
                new.required_department.trim(),
                new.priority.as_str(),
                new.estimated_days,
                dates.start,
                dates.end,
                timestamp_now(),
            ],
        )?;
        let id = TaskId::new(self.conn.last_insert_rowid());
        tracing::debug!(task = %id, chief = %chief.id, "created task");

        self.require_task(id)
    }

    /// Lists tasks, newest first
    pub fn tasks(&self) -> Result<Vec<Task>> {
        query_all(
            &self.conn,
            &format!("SELECT {TASK_COLUMNS} FROM tasks ORDER BY created_at DESC, id DESC"),
            task_from_row,
        )
    }

    /// Lists tasks in one status, newest first
    pub fn tasks_with_status(&self, status: TaskStatus) -> Result<Vec<Task>> {
        let mut stmt = self.conn.prepare(&format!(
            "SELECT {TASK_COLUMNS} FROM tasks WHERE status = ?1 ORDER BY created_at DESC, id DESC"
        ))?;
        let rows = stmt.query_map(params![status.as_str()], task_from_row)?;
        Ok(rows.collect::<rusqlite::Result<Vec<_>>>()?)
    }

    pub fn task(&self, id: TaskId) -> Result<Option<Task>> {
        Ok(self
            .conn
            .query_row(
                &format!("SELECT {TASK_COLUMNS} FROM tasks WHERE id = ?1"),
                params![id.get()],
                task_from_row,
            )
            .optional()?)
    }

    pub fn require_task(&self, id: TaskId) -> Result<Task> {
        self.task(id)?
            .ok_or_else(|| StoreError::not_found(TaskId::KIND, id.get()))
    }

    /// Deletes a task and its assignments, returning how many assignments went with it
    pub fn delete_task(&mut self, id: TaskId) -> Result<usize> {
        let tx = self.conn.transaction()?;

        if !exists(&tx, "tasks", id.get())? {
            return Err(StoreError::not_found(TaskId::KIND, id.get()));
        }

        let assignments = tx.execute(
            "DELETE FROM assignments WHERE task_id = ?1",
            params![id.get()],
        )?;
        tx.execute("DELETE FROM tasks WHERE id = ?1", params![id.get()])?;
        tx.commit()?;

        tracing::debug!(task = %id, assignments, "deleted task");
        Ok(assignments)
    }

    /// Overwrites a task's status
    pub fn set_task_status(&mut self, id: TaskId, status: TaskStatus) -> Result<Task> {
        let updated = self.conn.execute(
            "UPDATE tasks SET status = ?1 WHERE id = ?2",
            params![status.as_str(), id.get()],
        )?;
        if updated == 0 {
            return Err(StoreError::not_found(TaskId::KIND, id.get()));
        }
        tracing::debug!(task = %id, %status, "updated task status");

        self.require_task(id)
    }

    /// Records a proposed worker for a task and marks it matched
    pub fn propose_worker(&mut self, task: TaskId, worker: WorkerId) -> Result<Task> {
        self.require_worker(worker)?;

        let updated = self.conn.execute(
            "UPDATE tasks SET matched_worker_id = ?1, status = 'matched' WHERE id = ?2",
            params![worker.get(), task.get()],
        )?;
        if updated == 0 {
            return Err(StoreError::not_found(TaskId::KIND, task.get()));
        }
        tracing::debug!(%task, %worker, "proposed worker for task");

        self.require_task(task)
    }

    // ------------------------------------------------------------------
    // Assignments
    // ------------------------------------------------------------------

    /// Confirms a worker for a task
    ///
    /// Creates an active assignment and marks the task assigned to the worker.
    pub fn confirm_assignment(&mut self, new: NewAssignment) -> Result<Assignment> {
        let tx = self.conn.transaction()?;

        let task = tx
            .query_row(
                &format!("SELECT {TASK_COLUMNS} FROM tasks WHERE id = ?1"),
                params![new.task_id.get()],
                task_from_row,
            )
            .optional()?
            .ok_or_else(|| StoreError::not_found(TaskId::KIND, new.task_id.get()))?;

        if !exists(&tx, "workers", new.worker_id.get())? {
            return Err(StoreError::not_found(WorkerId::KIND, new.worker_id.get()));
        }

        let dates = match new.dates {
            Some(dates) => DateRange::parse(&dates.start, &dates.end)?,
            None => task.dates.clone(),
        };

        tx.execute(
            "INSERT INTO assignments (task_id, worker_id, start_date, end_date, match_score,
                                      status, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5, 'assigned', ?6)",
            params![
                task.id.get(),
                new.worker_id.get(),
                dates.start,
                dates.end,
                new.match_score.unwrap_or(0.0),
                timestamp_now(),
            ],
        )?;
        let id = AssignmentId::new(tx.last_insert_rowid());

        tx.execute(
            "UPDATE tasks SET status = 'assigned', matched_worker_id = ?1 WHERE id = ?2",
            params![new.worker_id.get(), task.id.get()],
        )?;

        let assignment = tx.query_row(
            &format!("SELECT {ASSIGNMENT_COLUMNS} FROM assignments WHERE id = ?1"),
            params![id.get()],
            assignment_from_row,
        )?;

        tx.commit()?;

        tracing::debug!(assignment = %id, task = %task.id, worker = %new.worker_id, "confirmed assignment");
        Ok(assignment)
    }

    /// Lists assignments with task and worker details, ordered by start date
    pub fn assignments(&self) -> Result<Vec<AssignmentView>> {
        let mut stmt = self.conn.prepare(
            "SELECT a.id, a.task_id, a.worker_id, a.start_date, a.end_date, a.match_score,
                    a.status, a.created_at, t.title, t.description, t.priority, w.name
             FROM assignments a
             JOIN tasks t ON a.task_id = t.id
             JOIN workers w ON a.worker_id = w.id
             ORDER BY a.start_date, a.id",
        )?;

        let rows = stmt.query_map([], |row| {
            Ok(AssignmentView {
                assignment: assignment_from_row(row)?,
                title: row.get(8)?,
                description: row.get(9)?,
                priority: parse_text(row, 10)?,
                worker_name: row.get(11)?,
            })
        })?;

        Ok(rows.collect::<rusqlite::Result<Vec<_>>>()?)
    }

    /// Cancels an assignment: deletes it and returns its task to pending
    pub fn cancel_assignment(&mut self, id: AssignmentId) -> Result<TaskId> {
        let tx = self.conn.transaction()?;

        let task_id: i64 = tx
            .query_row(
                "SELECT task_id FROM assignments WHERE id = ?1",
                params![id.get()],
                |row| row.get(0),
            )
            .optional()?
            .ok_or_else(|| StoreError::not_found(AssignmentId::KIND, id.get()))?;

        tx.execute("DELETE FROM assignments WHERE id = ?1", params![id.get()])?;
        tx.execute(
            "UPDATE tasks SET status = 'pending', matched_worker_id = NULL WHERE id = ?1",
            params![task_id],
        )?;
        tx.commit()?;

        tracing::debug!(assignment = %id, task = task_id, "cancelled assignment");
        Ok(TaskId::new(task_id))
    }

    // ------------------------------------------------------------------
    // Matching support
    // ------------------------------------------------------------------

    /// Reads the matcher's inputs in one read transaction
    ///
    /// Pending tasks and active assignments only; every collection in id order.
    pub fn snapshot(&mut self) -> Result<MatchInput> {
        let tx = self.conn.transaction()?;

        let input = MatchInput {
            tasks: query_all(
                &tx,
                &format!("SELECT {TASK_COLUMNS} FROM tasks WHERE status = 'pending' ORDER BY id"),
                task_from_row,
            )?,
            workers: query_all(
                &tx,
                &format!("SELECT {WORKER_COLUMNS} FROM workers ORDER BY id"),
                worker_from_row,
            )?,
            availability: query_all(
                &tx,
                &format!("SELECT {PERIOD_COLUMNS} FROM availability_periods ORDER BY id"),
                period_from_row,
            )?,
            assignments: query_all(
                &tx,
                &format!(
                    "SELECT {ASSIGNMENT_COLUMNS} FROM assignments
                     WHERE status = 'assigned' ORDER BY id"
                ),
                assignment_from_row,
            )?,
        };

        tx.commit()?;
        Ok(input)
    }

    /// Counts records in every collection
    pub fn counts(&self) -> Result<StoreCounts> {
        let count = |sql: &str| -> Result<usize> {
            let n: i64 = self.conn.query_row(sql, [], |row| row.get(0))?;
            Ok(n as usize)
        };

        Ok(StoreCounts {
            workers: count("SELECT COUNT(*) FROM workers")?,
            chiefs: count("SELECT COUNT(*) FROM chiefs")?,
            periods: count("SELECT COUNT(*) FROM availability_periods")?,
            tasks_pending: count("SELECT COUNT(*) FROM tasks WHERE status = 'pending'")?,
            tasks_matched: count("SELECT COUNT(*) FROM tasks WHERE status = 'matched'")?,
            tasks_assigned: count("SELECT COUNT(*) FROM tasks WHERE status = 'assigned'")?,
            assignments: count("SELECT COUNT(*) FROM assignments WHERE status = 'assigned'")?,
        })
    }
}

fn required(field: &str, value: &str) -> Result<String> {
    let value = value.trim();
    if value.is_empty() {
        return Err(StoreError::Validation(format!("{} is required", field)));
    }
    Ok(value.to_string())
}

/// Blank optional text is stored as NULL
fn optional(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn timestamp_now() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Micros, true)
}

fn exists(conn: &Connection, table: &str, id: i64) -> Result<bool> {
    let found: Option<i64> = conn
        .query_row(
            &format!("SELECT id FROM {} WHERE id = ?1", table),
            params![id],
            |row| row.get(0),
        )
        .optional()?;
    Ok(found.is_some())
}

fn query_all<T>(
    conn: &Connection,
    sql: &str,
    map: fn(&Row<'_>) -> rusqlite::Result<T>,
) -> Result<Vec<T>> {
    let mut stmt = conn.prepare(sql)?;
    let rows = stmt.query_map([], map)?;
    Ok(rows.collect::<rusqlite::Result<Vec<_>>>()?)
}

fn parse_timestamp(row: &Row<'_>, idx: usize) -> rusqlite::Result<DateTime<Utc>> {
    let text: String = row.get(idx)?;
    DateTime::parse_from_rfc3339(&text)
        .map(|t| t.with_timezone(&Utc))
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, Box::new(e)))
}

fn parse_text<T: FromStr<Err = String>>(row: &Row<'_>, idx: usize) -> rusqlite::Result<T> {
    let text: String = row.get(idx)?;
    text.parse()
        .map_err(|e: String| rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, e.into()))
}

fn worker_from_row(row: &Row<'_>) -> rusqlite::Result<Worker> {
    Ok(Worker {
        id: WorkerId::new(row.get(0)?),
        name: row.get(1)?,
        department: row.get(2)?,
        skills: SkillSet::from_csv(&row.get::<_, String>(3)?),
        phone_number: row.get(4)?,
        email: row.get(5)?,
        created_at: parse_timestamp(row, 6)?,
    })
}

fn chief_from_row(row: &Row<'_>) -> rusqlite::Result<Chief> {
    Ok(Chief {
        id: ChiefId::new(row.get(0)?),
        name: row.get(1)?,
        department: row.get(2)?,
        email: row.get(3)?,
        created_at: parse_timestamp(row, 4)?,
    })
}

fn period_from_row(row: &Row<'_>) -> rusqlite::Result<AvailabilityPeriod> {
    Ok(AvailabilityPeriod {
        id: PeriodId::new(row.get(0)?),
        worker_id: WorkerId::new(row.get(1)?),
        dates: DateRange::new(row.get::<_, String>(2)?, row.get::<_, String>(3)?),
        created_at: parse_timestamp(row, 4)?,
    })
}

fn task_from_row(row: &Row<'_>) -> rusqlite::Result<Task> {
    Ok(Task {
        id: TaskId::new(row.get(0)?),
        chief_id: ChiefId::new(row.get(1)?),
        chief_name: row.get(2)?,
        title: row.get(3)?,
        description: row.get(4)?,
        required_skills: SkillSet::from_csv(&row.get::<_, String>(5)?),
        required_department: row.get(6)?,
        priority: parse_text(row, 7)?,
        estimated_days: row.get(8)?,
        dates: DateRange::new(row.get::<_, String>(9)?, row.get::<_, String>(10)?),
        status: parse_text(row, 11)?,
        matched_worker_id: row.get::<_, Option<i64>>(12)?.map(WorkerId::new),
        created_at: parse_timestamp(row, 13)?,
    })
}

fn assignment_from_row(row: &Row<'_>) -> rusqlite::Result<Assignment> {
    Ok(Assignment {
        id: AssignmentId::new(row.get(0)?),
        task_id: TaskId::new(row.get(1)?),
        worker_id: WorkerId::new(row.get(2)?),
        dates: DateRange::new(row.get::<_, String>(3)?, row.get::<_, String>(4)?),
        match_score: row.get(5)?,
        status: parse_text::<AssignmentStatus>(row, 6)?,
        created_at: parse_timestamp(row, 7)?,
    })
}
