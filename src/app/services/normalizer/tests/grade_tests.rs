//! Grade canonicalization tests

use crate::app::models::GradeValue;
use crate::app::services::normalizer::{canonicalize_grade, collapse_multiline, grade_aliases};

#[test]
fn test_school_grade_aliases() {
    for label in ["5", "5 b", "V", "5th", "five", "FIFTH"] {
        assert_eq!(
            grade_aliases::canonical_code_for(label),
            Some(5),
            "label '{}' should resolve to grade 5",
            label
        );
    }
}

#[test]
fn test_higher_secondary_aliases() {
    for label in ["+1", "XI", "plus one", "plusone", "+1 Science", "11th"] {
        assert_eq!(
            grade_aliases::canonical_code_for(label),
            Some(11),
            "label '{}' should resolve to grade 11",
            label
        );
    }
    for label in ["+2", "XII", "plus two", "+2 Humanities"] {
        assert_eq!(grade_aliases::canonical_code_for(label), Some(12));
    }
}

#[test]
fn test_collegiate_aliases() {
    assert_eq!(grade_aliases::canonical_code_for("1 DC"), Some(13));
    assert_eq!(grade_aliases::canonical_code_for("IInd DC"), Some(14));
    assert_eq!(grade_aliases::canonical_code_for("3rd DC"), Some(15));
    assert_eq!(grade_aliases::canonical_code_for("1st PG"), Some(16));
    assert_eq!(grade_aliases::canonical_code_for("2 pg"), Some(17));
}

#[test]
fn test_ocr_confusions() {
    assert_eq!(grade_aliases::canonical_code_for("1v"), Some(4));
    assert_eq!(grade_aliases::canonical_code_for("v1"), Some(6));
    assert_eq!(grade_aliases::canonical_code_for("v11"), Some(7));
    assert_eq!(grade_aliases::canonical_code_for("v111"), Some(8));
    assert_eq!(grade_aliases::canonical_code_for("1x"), Some(9));
    assert_eq!(grade_aliases::canonical_code_for("x1"), Some(11));
    assert_eq!(grade_aliases::canonical_code_for("x11"), Some(12));
}

#[test]
fn test_lookup_trims_and_lowercases() {
    assert_eq!(grade_aliases::canonical_code_for("  Plus One  "), Some(11));
    assert_eq!(grade_aliases::canonical_code_for("IST DC"), Some(13));
}

#[test]
fn test_unknown_label_stays_raw() {
    let grade = canonicalize_grade(&GradeValue::raw("Standard Five"));
    assert_eq!(grade, GradeValue::raw("Standard Five"));
    assert!(!grade.is_canonical());
}

#[test]
fn test_collegiate_numeral_stays_raw() {
    let grade = canonicalize_grade(&GradeValue::raw("13"));
    assert_eq!(grade, GradeValue::raw("13"));
}

#[test]
fn test_canonical_value_passes_through() {
    let grade = GradeValue::canonical(9).unwrap();
    assert_eq!(canonicalize_grade(&grade), grade);
}

#[test]
fn test_canonicalization_is_idempotent() {
    for input in [
        GradeValue::raw("+1"),
        GradeValue::raw("nonsense"),
        GradeValue::canonical(17).unwrap(),
    ] {
        let once = canonicalize_grade(&input);
        let twice = canonicalize_grade(&once);
        assert_eq!(once, twice);
    }
}

#[test]
fn test_collapse_multiline() {
    assert_eq!(collapse_multiline("Alice\n  Smith \n"), "Alice Smith");
    assert_eq!(collapse_multiline("  single  "), "single");
    assert_eq!(collapse_multiline("\n\n"), "");
    assert_eq!(collapse_multiline("a\n\nb\nc"), "a b c");
}
