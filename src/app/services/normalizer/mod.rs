//! Field cleaning and grade canonicalization
//!
//! Pure transformations applied to every extracted batch before
//! reconciliation. Cleaning runs first: multi-line cells are collapsed to
//! single lines and surrounding whitespace is stripped. Normalization then
//! fills an empty account holder from the student name, canonicalizes the
//! grade label through the alias table, and replaces the document branch
//! name with the registry branch when the registry has a usable one.
//!
//! Nothing here mutates its input and nothing here fails: an unresolvable
//! grade label stays raw and travels onward for the operator to see.

pub mod grade_aliases;

#[cfg(test)]
pub mod tests;

use tracing::debug;

use crate::app::models::{Batch, GradeValue, StudentRecord};
use crate::app::services::routing_registry::RoutingRegistry;
use crate::config::NormalizationConfig;
use crate::constants;

/// Collapse a multi-line cell value to a single trimmed line.
///
/// Lines are trimmed individually, empty lines dropped, and the remainder
/// joined with single spaces.
pub fn collapse_multiline(text: &str) -> String {
    text.split('\n')
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Canonicalize a grade value through the alias table.
///
/// Total and idempotent: canonical values pass through unchanged, raw
/// labels the table does not know stay raw.
pub fn canonicalize_grade(grade: &GradeValue) -> GradeValue {
    match grade {
        GradeValue::Canonical(code) => GradeValue::Canonical(*code),
        GradeValue::Raw(label) => match grade_aliases::canonical_code_for(label) {
            Some(code) => GradeValue::Canonical(code),
            None => GradeValue::Raw(label.clone()),
        },
    }
}

/// Pick the branch name for a record: registry over document.
///
/// The registry branch (with the settlement suffix stripped when
/// configured) replaces the document branch only when it is non-empty,
/// contains no comma, and is shorter than the configured limit. Branch
/// names that fail any of those checks are usually full addresses, and
/// the document value is kept instead.
pub fn resolve_branch_name(
    document_branch: &str,
    routing_code: &str,
    registry: &RoutingRegistry,
    config: &NormalizationConfig,
) -> String {
    let registry_branch = match registry.get(routing_code) {
        Some(info) => {
            if config.strip_settlement_suffix {
                info.branch
                    .replace(constants::SETTLEMENT_SUFFIX, "")
                    .trim()
                    .to_string()
            } else {
                info.branch.clone()
            }
        }
        None => String::new(),
    };

    let usable = !registry_branch.is_empty()
        && !registry_branch.contains(',')
        && registry_branch.chars().count() < config.max_branch_len;

    if usable {
        registry_branch
    } else {
        document_branch.to_string()
    }
}

/// Clean and normalize one student record.
fn normalize_record(
    record: &StudentRecord,
    registry: &RoutingRegistry,
    config: &NormalizationConfig,
) -> StudentRecord {
    let name = collapse_multiline(&record.name);
    let account_number = record.account_number.trim().to_string();
    let routing_code = record.routing_code.trim().to_string();

    let holder = collapse_multiline(&record.account_holder);
    let account_holder = if holder.is_empty() {
        name.clone()
    } else {
        holder
    };

    let grade = match &record.grade {
        GradeValue::Raw(label) => canonicalize_grade(&GradeValue::Raw(collapse_multiline(label))),
        canonical => canonicalize_grade(canonical),
    };

    let document_branch = collapse_multiline(&record.branch);
    let branch = resolve_branch_name(&document_branch, &routing_code, registry, config);

    StudentRecord {
        name,
        grade,
        account_number,
        routing_code,
        account_holder,
        branch,
    }
}

/// Normalize a whole batch, preserving record order.
///
/// Returns a new batch; the input is untouched. The batch district is
/// carried over as-is, resolution happens elsewhere.
pub fn normalize_batch(
    batch: &Batch,
    registry: &RoutingRegistry,
    config: &NormalizationConfig,
) -> Batch {
    let students: Vec<StudentRecord> = batch
        .students
        .iter()
        .map(|record| normalize_record(record, registry, config))
        .collect();

    let unresolved = students
        .iter()
        .filter(|record| !record.grade.is_canonical())
        .count();
    if unresolved > 0 {
        debug!(
            "Batch for '{}': {} of {} grade labels left unresolved",
            batch.institution.name,
            unresolved,
            students.len()
        );
    }

    Batch {
        institution: batch.institution.clone(),
        students,
        district: batch.district,
    }
}
