//! Batch reconciliation against the store
//!
//! Pure decision logic between extraction and persistence. Duplicate
//! detection is keyed solely on the account number: names, grades and
//! branches legitimately change year over year, the account number does
//! not. When duplicates exist they must all point at one stored school;
//! duplicates spanning schools make the batch ambiguous and nothing is
//! written automatically, since merging students into the wrong school
//! cannot be undone.
//!
//! For an unambiguous school, new students are fitted into its freed
//! slots grade for grade. Planning happens here; the store applies the
//! resulting assignments in one transaction.

#[cfg(test)]
pub mod tests;

use std::collections::HashMap;

use tracing::debug;

use crate::app::models::{Batch, ExistingAccount, FillAssignment, StudentRecord, Vacancy};
use crate::app::services::store::StudentStore;
use crate::Result;

/// Stored rows matching the batch's account numbers.
pub fn find_existing(batch: &Batch, store: &StudentStore) -> Result<Vec<ExistingAccount>> {
    let accounts = batch.account_numbers();
    store.find_existing_accounts(&accounts)
}

/// One incoming record that collided with a stored account.
#[derive(Debug, Clone, PartialEq)]
pub struct DuplicateMatch {
    /// The record from the packet
    pub incoming: StudentRecord,

    /// The row already in the store
    pub stored: ExistingAccount,
}

/// A single field difference for the operator diff view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldChange {
    pub field: &'static str,
    pub stored: String,
    pub incoming: String,
}

impl DuplicateMatch {
    /// Fields where the packet disagrees with the store, in display order.
    pub fn changed_fields(&self) -> Vec<FieldChange> {
        let mut changes = Vec::new();
        let mut push = |field: &'static str, stored: &str, incoming: &str| {
            if stored != incoming {
                changes.push(FieldChange {
                    field,
                    stored: stored.to_string(),
                    incoming: incoming.to_string(),
                });
            }
        };

        push("Name", &self.stored.student_name, &self.incoming.name);
        push(
            "Grade",
            &crate::constants::display_grade(self.stored.grade),
            &self.incoming.grade.display_label(),
        );
        push(
            "Routing code",
            &self.stored.routing_code,
            &self.incoming.routing_code,
        );
        push("Branch", &self.stored.branch, &self.incoming.branch);
        changes
    }
}

/// Batch records split into new and duplicate, both in packet order.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Classification {
    pub new_records: Vec<StudentRecord>,
    pub duplicates: Vec<DuplicateMatch>,
}

impl Classification {
    pub fn has_duplicates(&self) -> bool {
        !self.duplicates.is_empty()
    }
}

/// Split a batch into new records and duplicates of stored rows.
pub fn classify(batch: &Batch, existing: &[ExistingAccount]) -> Classification {
    let stored: HashMap<&str, &ExistingAccount> = existing
        .iter()
        .map(|row| (row.account_number.as_str(), row))
        .collect();

    let mut classification = Classification::default();
    for record in &batch.students {
        match stored.get(record.account_number.as_str()) {
            Some(row) => classification.duplicates.push(DuplicateMatch {
                incoming: record.clone(),
                stored: (*row).clone(),
            }),
            None => classification.new_records.push(record.clone()),
        }
    }

    debug!(
        "Classified batch for '{}': {} new, {} duplicates",
        batch.institution.name,
        classification.new_records.len(),
        classification.duplicates.len()
    );
    classification
}

/// Which stored school the duplicates point at.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SchoolIdentity {
    /// Every duplicate belongs to this school
    Single(i64),

    /// Duplicates span schools; nothing may be written automatically
    Ambiguous(Vec<i64>),
}

/// Identify the school behind a set of stored rows.
///
/// `None` when the set is empty. School ids keep first-encounter order in
/// the ambiguous case so the escalation message lists them as seen.
pub fn identify_school(existing: &[ExistingAccount]) -> Option<SchoolIdentity> {
    let mut ids: Vec<i64> = Vec::new();
    for row in existing {
        if !ids.contains(&row.school_id) {
            ids.push(row.school_id);
        }
    }

    match ids.as_slice() {
        [] => None,
        [only] => Some(SchoolIdentity::Single(*only)),
        _ => Some(SchoolIdentity::Ambiguous(ids)),
    }
}

/// A planned fill: who goes into which slot, who gets turned away.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct FillOutcome {
    pub assignments: Vec<FillAssignment>,
    pub rejected: Vec<StudentRecord>,
}

impl FillOutcome {
    pub fn filled_count(&self) -> usize {
        self.assignments.len()
    }

    pub fn rejected_count(&self) -> usize {
        self.rejected.len()
    }
}

/// Fit new students into freed slots, grade for grade.
///
/// Students are taken in packet order; each consumes the oldest open slot
/// of exactly their grade. Students left without a slot are rejected
/// individually, as is any record whose grade label never resolved (a raw
/// label cannot match a slot).
pub fn plan_vacancy_fill(new_records: &[StudentRecord], vacancies: &[Vacancy]) -> FillOutcome {
    let mut consumed = vec![false; vacancies.len()];
    let mut outcome = FillOutcome::default();

    for record in new_records {
        let Some(grade) = record.grade.code() else {
            outcome.rejected.push(record.clone());
            continue;
        };

        let slot = (0..vacancies.len())
            .find(|&index| !consumed[index] && vacancies[index].grade == grade);
        match slot {
            Some(index) => {
                consumed[index] = true;
                outcome.assignments.push(FillAssignment {
                    record: record.clone(),
                    vacancy_id: vacancies[index].id,
                });
            }
            None => outcome.rejected.push(record.clone()),
        }
    }

    debug!(
        "Fill plan: {} assigned, {} rejected across {} open slots",
        outcome.filled_count(),
        outcome.rejected_count(),
        vacancies.len()
    );
    outcome
}
