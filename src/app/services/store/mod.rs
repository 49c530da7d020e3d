//! Persisted student store
//!
//! SQLite-backed store of schools, students and vacancies. The schema is
//! owned here and created idempotently on open. Two constraints carry the
//! data-integrity rules the rest of the pipeline relies on: `AccNo` is
//! UNIQUE (duplicate detection backstop) and `Class` is CHECKed into the
//! canonical range (no raw grade label ever reaches a row).
//!
//! Every mutation that touches more than one row runs inside one explicit
//! transaction. An error mid-way drops the transaction uncommitted, which
//! rolls the batch back; the caller reports the batch rejected and moves
//! to the next file.

pub mod maintenance;
pub mod summary;

#[cfg(test)]
pub mod tests;

use std::path::Path;
use std::time::Duration;

use rusqlite::{params, Connection};
use tracing::{debug, info, warn};

use crate::app::models::{Batch, ExistingAccount, FillAssignment, Vacancy};
use crate::config::StorageConfig;
use crate::{Error, Result};

pub use maintenance::{PromotionStats, WithdrawReceipt};
pub use summary::StoreSummary;

const SCHEMA: &str = "
CREATE TABLE IF NOT EXISTS Schools (
    SchoolID   INTEGER PRIMARY KEY,
    SchoolName TEXT NOT NULL,
    District   TEXT NOT NULL,
    Place      TEXT NOT NULL DEFAULT '',
    Phone      TEXT NOT NULL DEFAULT '',
    Email      TEXT NOT NULL DEFAULT ''
);

CREATE TABLE IF NOT EXISTS Students (
    StudentID   INTEGER PRIMARY KEY,
    SchoolID    INTEGER NOT NULL REFERENCES Schools(SchoolID),
    StudentName TEXT NOT NULL,
    Class       INTEGER NOT NULL CHECK (Class BETWEEN 1 AND 17),
    IFSC        TEXT NOT NULL DEFAULT '',
    AccNo       TEXT NOT NULL UNIQUE,
    AccHolder   TEXT NOT NULL DEFAULT '',
    Branch      TEXT NOT NULL DEFAULT ''
);

CREATE TABLE IF NOT EXISTS Vacancies (
    VacancyID INTEGER PRIMARY KEY,
    SchoolID  INTEGER NOT NULL REFERENCES Schools(SchoolID),
    Class     INTEGER NOT NULL CHECK (Class BETWEEN 1 AND 17)
);

CREATE INDEX IF NOT EXISTS idx_students_school ON Students(SchoolID);
CREATE INDEX IF NOT EXISTS idx_vacancies_school_class ON Vacancies(SchoolID, Class);
";

/// Handle over the student database.
pub struct StudentStore {
    conn: Connection,
}

impl StudentStore {
    /// Open (or create) the store at the given path.
    ///
    /// PRAGMAs run on every open: `foreign_keys` is per-connection, and
    /// re-requesting WAL is a no-op once the store is already in WAL mode.
    pub fn open(path: &Path, config: &StorageConfig) -> Result<Self> {
        let conn = Connection::open(path).map_err(|e| {
            Error::storage(format!("cannot open store at {}", path.display()), Some(e))
        })?;

        let journal_mode: String = conn.query_row("PRAGMA journal_mode=WAL", [], |row| row.get(0))?;
        if !journal_mode.eq_ignore_ascii_case("wal") {
            warn!(
                "Store at {} is in journal mode '{}', not WAL",
                path.display(),
                journal_mode
            );
        }

        conn.execute_batch("PRAGMA synchronous=NORMAL; PRAGMA foreign_keys=ON;")?;
        conn.busy_timeout(Duration::from_millis(config.busy_timeout_ms))?;
        conn.execute_batch(SCHEMA)?;

        info!("Store open at {}", path.display());
        Ok(Self { conn })
    }

    /// In-memory store, used by tests and dry runs.
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()
            .map_err(|e| Error::storage("cannot open in-memory store", Some(e)))?;
        conn.execute_batch("PRAGMA foreign_keys=ON;")?;
        conn.execute_batch(SCHEMA)?;
        Ok(Self { conn })
    }

    /// Insert a whole batch: the school row plus every student, one
    /// transaction. Returns the new school id.
    ///
    /// Every grade must already be canonical; an unresolved label aborts
    /// before any row is written.
    pub fn insert_batch(&self, batch: &Batch) -> Result<i64> {
        for student in &batch.students {
            student.validate_for_storage()?;
        }

        let tx = self.conn.unchecked_transaction()?;

        tx.execute(
            "INSERT INTO Schools (SchoolName, District, Place, Phone, Email)
             VALUES (?1, ?2, ?3, ?4, ?5)",
            params![
                batch.institution.name,
                batch.district.name(),
                batch.institution.place,
                batch.institution.phone,
                batch.institution.email,
            ],
        )?;
        let school_id = tx.last_insert_rowid();

        for student in &batch.students {
            let grade = student.grade.code().ok_or_else(|| {
                Error::grade_validation(format!(
                    "student '{}' has unresolved grade label '{}'",
                    student.name,
                    student.grade.display_label()
                ))
            })?;
            tx.execute(
                "INSERT INTO Students (SchoolID, StudentName, Class, IFSC, AccNo, AccHolder, Branch)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
                params![
                    school_id,
                    student.name,
                    grade,
                    student.routing_code,
                    student.account_number,
                    student.account_holder,
                    student.branch,
                ],
            )?;
        }

        tx.commit()?;
        info!(
            "Inserted school '{}' (id {}) with {} students",
            batch.institution.name,
            school_id,
            batch.students.len()
        );
        Ok(school_id)
    }

    /// Stored students matching any of the given account numbers.
    ///
    /// The rows carry everything the duplicate diff view shows. An empty
    /// account set short-circuits to an empty result.
    pub fn find_existing_accounts(&self, accounts: &[&str]) -> Result<Vec<ExistingAccount>> {
        if accounts.is_empty() {
            return Ok(Vec::new());
        }

        let placeholders = vec!["?"; accounts.len()].join(", ");
        let sql = format!(
            "SELECT s.SchoolID, sc.SchoolName, s.StudentName, s.Class, s.AccNo, s.IFSC, s.Branch
             FROM Students s
             JOIN Schools sc ON sc.SchoolID = s.SchoolID
             WHERE s.AccNo IN ({placeholders})
             ORDER BY s.StudentID"
        );

        let mut stmt = self.conn.prepare(&sql)?;
        let rows = stmt.query_map(rusqlite::params_from_iter(accounts.iter()), |row| {
            Ok(ExistingAccount {
                school_id: row.get(0)?,
                school_name: row.get(1)?,
                student_name: row.get(2)?,
                grade: row.get(3)?,
                account_number: row.get(4)?,
                routing_code: row.get(5)?,
                branch: row.get(6)?,
            })
        })?;

        let mut existing = Vec::new();
        for row in rows {
            existing.push(row?);
        }
        debug!(
            "Account lookup: {} of {} already stored",
            existing.len(),
            accounts.len()
        );
        Ok(existing)
    }

    /// Update the stored grade of one student, found by account number.
    ///
    /// The `Class` CHECK rejects anything outside the canonical range.
    pub fn update_student_grade(&self, account: &str, grade: u8) -> Result<()> {
        let changed = self.conn.execute(
            "UPDATE Students SET Class = ?1 WHERE AccNo = ?2",
            params![grade, account],
        )?;
        if changed == 0 {
            return Err(Error::account_not_found(account));
        }
        Ok(())
    }

    /// Freed slots of one school, oldest first.
    pub fn vacancies_for_school(&self, school_id: i64) -> Result<Vec<Vacancy>> {
        let mut stmt = self.conn.prepare(
            "SELECT VacancyID, SchoolID, Class FROM Vacancies
             WHERE SchoolID = ?1 ORDER BY VacancyID",
        )?;
        let rows = stmt.query_map(params![school_id], |row| {
            Ok(Vacancy {
                id: row.get(0)?,
                school_id: row.get(1)?,
                grade: row.get(2)?,
            })
        })?;

        let mut vacancies = Vec::new();
        for row in rows {
            vacancies.push(row?);
        }
        Ok(vacancies)
    }

    /// Write a vacancy fill: insert each assigned student and consume the
    /// matching slot, all in one transaction.
    ///
    /// A slot that has meanwhile disappeared aborts the whole fill; either
    /// every assignment lands together with its slot deletion or none do.
    pub fn apply_vacancy_fill(
        &self,
        school_id: i64,
        assignments: &[FillAssignment],
    ) -> Result<usize> {
        if assignments.is_empty() {
            return Ok(0);
        }

        let tx = self.conn.unchecked_transaction()?;

        for assignment in assignments {
            let grade = assignment.record.grade.code().ok_or_else(|| {
                Error::grade_validation(format!(
                    "student '{}' has unresolved grade label '{}'",
                    assignment.record.name,
                    assignment.record.grade.display_label()
                ))
            })?;

            tx.execute(
                "INSERT INTO Students (SchoolID, StudentName, Class, IFSC, AccNo, AccHolder, Branch)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
                params![
                    school_id,
                    assignment.record.name,
                    grade,
                    assignment.record.routing_code,
                    assignment.record.account_number,
                    assignment.record.account_holder,
                    assignment.record.branch,
                ],
            )?;

            let consumed = tx.execute(
                "DELETE FROM Vacancies WHERE VacancyID = ?1 AND SchoolID = ?2",
                params![assignment.vacancy_id, school_id],
            )?;
            if consumed != 1 {
                return Err(Error::storage(
                    format!(
                        "vacancy {} for school {} is no longer available",
                        assignment.vacancy_id, school_id
                    ),
                    None,
                ));
            }
        }

        tx.commit()?;
        info!(
            "Filled {} vacancies for school {}",
            assignments.len(),
            school_id
        );
        Ok(assignments.len())
    }

    /// Open a fresh vacancy for a school and grade. Used by tests and the
    /// maintenance paths; normal processing only ever consumes slots.
    pub fn add_vacancy(&self, school_id: i64, grade: u8) -> Result<i64> {
        self.conn.execute(
            "INSERT INTO Vacancies (SchoolID, Class) VALUES (?1, ?2)",
            params![school_id, grade],
        )?;
        Ok(self.conn.last_insert_rowid())
    }
}
