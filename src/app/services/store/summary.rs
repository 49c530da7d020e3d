//! Store summary for the status report

use rusqlite::params;
use serde::Serialize;

use crate::constants;
use crate::Result;

use super::StudentStore;

/// School count for one district.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DistrictCount {
    pub district: String,
    pub schools: i64,
}

/// Student count for one grade, with its display label.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GradeCount {
    pub grade: u8,
    pub label: String,
    pub count: i64,
}

/// Snapshot of everything the status command reports.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StoreSummary {
    pub school_count: i64,
    pub student_count: i64,
    pub vacancy_count: i64,
    pub schools_per_district: Vec<DistrictCount>,
    pub students_per_grade: Vec<GradeCount>,

    /// Award total for one year at current enrollment
    pub annual_disbursement: u64,
}

impl StudentStore {
    /// Collect the status snapshot.
    pub fn store_summary(&self) -> Result<StoreSummary> {
        let school_count: i64 =
            self.conn
                .query_row("SELECT COUNT(*) FROM Schools", [], |row| row.get(0))?;
        let student_count: i64 =
            self.conn
                .query_row("SELECT COUNT(*) FROM Students", [], |row| row.get(0))?;
        let vacancy_count: i64 =
            self.conn
                .query_row("SELECT COUNT(*) FROM Vacancies", [], |row| row.get(0))?;

        let mut stmt = self.conn.prepare(
            "SELECT District, COUNT(*) FROM Schools GROUP BY District ORDER BY District",
        )?;
        let rows = stmt.query_map(params![], |row| {
            Ok(DistrictCount {
                district: row.get(0)?,
                schools: row.get(1)?,
            })
        })?;
        let mut schools_per_district = Vec::new();
        for row in rows {
            schools_per_district.push(row?);
        }

        let mut stmt = self
            .conn
            .prepare("SELECT Class, COUNT(*) FROM Students GROUP BY Class ORDER BY Class")?;
        let rows = stmt.query_map(params![], |row| {
            let grade: u8 = row.get(0)?;
            Ok(GradeCount {
                grade,
                label: constants::display_grade(grade),
                count: row.get(1)?,
            })
        })?;
        let mut students_per_grade = Vec::new();
        for row in rows {
            students_per_grade.push(row?);
        }

        let annual_disbursement = students_per_grade
            .iter()
            .map(|entry| entry.count as u64 * u64::from(constants::award_amount(entry.grade)))
            .sum();

        Ok(StoreSummary {
            school_count,
            student_count,
            vacancy_count,
            schools_per_district,
            students_per_grade,
            annual_disbursement,
        })
    }
}
