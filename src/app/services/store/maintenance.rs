//! End-of-year and mid-year store maintenance
//!
//! `graduate_and_promote` runs the year rollover in one transaction:
//! graduating seats are captured as vacancies before their students are
//! deleted, everyone left moves up a grade, and the vacancy pool rides
//! along with its cohort. `remove_student_and_free_slot` is the mid-year
//! attrition path and the reason vacancies exist at arbitrary grades.

use rusqlite::{params, OptionalExtension};
use tracing::info;

use crate::constants;
use crate::{Error, Result};

use super::StudentStore;

/// Row counts from one promotion run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PromotionStats {
    /// Students removed from graduating grades
    pub graduates_removed: usize,

    /// Students moved up one grade
    pub students_promoted: usize,

    /// Vacancies captured from graduating seats
    pub vacancies_created: usize,

    /// Final-tier vacancies that lapsed
    pub vacancies_expired: usize,

    /// Vacancies moved up one grade
    pub vacancies_promoted: usize,
}

/// What a withdrawal removed and the slot it opened.
#[derive(Debug, Clone, PartialEq)]
pub struct WithdrawReceipt {
    /// Name of the removed student
    pub student_name: String,

    /// School the student belonged to
    pub school_name: String,

    /// School row id
    pub school_id: i64,

    /// Grade at withdrawal, which the new vacancy is pinned to
    pub grade: u8,

    /// Id of the vacancy opened by the withdrawal
    pub vacancy_id: i64,
}

impl StudentStore {
    /// Remove one student by account number and open a vacancy at their
    /// school and grade. One transaction.
    pub fn remove_student_and_free_slot(&self, account: &str) -> Result<WithdrawReceipt> {
        let tx = self.conn.unchecked_transaction()?;

        let found = tx
            .query_row(
                "SELECT s.StudentID, s.SchoolID, s.StudentName, s.Class, sc.SchoolName
                 FROM Students s
                 JOIN Schools sc ON sc.SchoolID = s.SchoolID
                 WHERE s.AccNo = ?1",
                params![account],
                |row| {
                    Ok((
                        row.get::<_, i64>(0)?,
                        row.get::<_, i64>(1)?,
                        row.get::<_, String>(2)?,
                        row.get::<_, u8>(3)?,
                        row.get::<_, String>(4)?,
                    ))
                },
            )
            .optional()?;

        let (student_id, school_id, student_name, grade, school_name) = match found {
            Some(row) => row,
            None => return Err(Error::account_not_found(account)),
        };

        tx.execute("DELETE FROM Students WHERE StudentID = ?1", params![student_id])?;
        tx.execute(
            "INSERT INTO Vacancies (SchoolID, Class) VALUES (?1, ?2)",
            params![school_id, grade],
        )?;
        let vacancy_id = tx.last_insert_rowid();

        tx.commit()?;
        info!(
            "Withdrew '{}' (grade {}) from '{}', vacancy {} opened",
            student_name,
            constants::display_grade(grade),
            school_name,
            vacancy_id
        );

        Ok(WithdrawReceipt {
            student_name,
            school_name,
            school_id,
            grade,
            vacancy_id,
        })
    }

    /// Year rollover, one transaction.
    ///
    /// Order matters: graduating seats are captured first, then their
    /// students leave, then survivors and vacancies each move up a grade.
    /// Final-tier vacancies are dropped before the vacancy promotion so a
    /// "2 PG" slot lapses instead of overflowing the grade range.
    pub fn graduate_and_promote(&self) -> Result<PromotionStats> {
        let graduating = constants::GRADUATING_GRADES
            .iter()
            .map(u8::to_string)
            .collect::<Vec<_>>()
            .join(", ");

        let tx = self.conn.unchecked_transaction()?;
        let mut stats = PromotionStats::default();

        // 1. Capture every graduating seat as a vacancy at its grade
        {
            let sql = format!("SELECT SchoolID, Class FROM Students WHERE Class IN ({graduating})");
            let mut stmt = tx.prepare(&sql)?;
            let seats = stmt.query_map([], |row| {
                Ok((row.get::<_, i64>(0)?, row.get::<_, u8>(1)?))
            })?;
            let mut captured = Vec::new();
            for seat in seats {
                captured.push(seat?);
            }
            for (school_id, grade) in captured {
                tx.execute(
                    "INSERT INTO Vacancies (SchoolID, Class) VALUES (?1, ?2)",
                    params![school_id, grade],
                )?;
                stats.vacancies_created += 1;
            }
        }

        // 2. Graduating students leave the store
        stats.graduates_removed = tx.execute(
            &format!("DELETE FROM Students WHERE Class IN ({graduating})"),
            [],
        )?;

        // 3. Verify before promoting; a leftover graduate would be pushed
        //    into the next tier's entry grade
        let remaining: i64 = tx.query_row(
            &format!("SELECT COUNT(*) FROM Students WHERE Class IN ({graduating})"),
            [],
            |row| row.get(0),
        )?;
        if remaining != 0 {
            return Err(Error::storage(
                format!("{remaining} graduating students survived removal"),
                None,
            ));
        }

        // 4. Everyone left moves up
        stats.students_promoted = tx.execute("UPDATE Students SET Class = Class + 1", [])?;

        // 5. Final-tier slots have no successor grade
        stats.vacancies_expired = tx.execute(
            "DELETE FROM Vacancies WHERE Class = ?1",
            params![constants::FINAL_GRADE],
        )?;

        // 6. Surviving slots ride with their cohort
        stats.vacancies_promoted = tx.execute("UPDATE Vacancies SET Class = Class + 1", [])?;

        tx.commit()?;
        info!(
            "Promotion: {} graduates out, {} students promoted, {} vacancies captured, {} expired, {} promoted",
            stats.graduates_removed,
            stats.students_promoted,
            stats.vacancies_created,
            stats.vacancies_expired,
            stats.vacancies_promoted
        );
        Ok(stats)
    }
}
