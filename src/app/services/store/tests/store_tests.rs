//! Core store operation tests

use crate::app::models::{FillAssignment, GradeValue};
use crate::app::services::store::tests::{
    create_test_batch, create_test_record, create_test_store,
};
use crate::Error;

#[test]
fn test_insert_batch_writes_school_and_students() {
    let store = create_test_store();
    let batch = create_test_batch(
        "St Marys HSS",
        vec![
            create_test_record("Anju Thomas", 5, "1001"),
            create_test_record("Rahul K", 11, "1002"),
        ],
    );

    let school_id = store.insert_batch(&batch).unwrap();
    assert!(school_id > 0);

    let summary = store.store_summary().unwrap();
    assert_eq!(summary.school_count, 1);
    assert_eq!(summary.student_count, 2);

    let existing = store.find_existing_accounts(&["1001", "1002"]).unwrap();
    assert_eq!(existing.len(), 2);
    assert_eq!(existing[0].school_id, school_id);
    assert_eq!(existing[0].school_name, "St Marys HSS");
    assert_eq!(existing[0].student_name, "Anju Thomas");
    assert_eq!(existing[0].grade, 5);
}

#[test]
fn test_insert_batch_rejects_raw_grade_before_writing() {
    let store = create_test_store();
    let mut record = create_test_record("Anju Thomas", 5, "1001");
    record.grade = GradeValue::raw("Standard Five");
    let batch = create_test_batch("St Marys HSS", vec![record]);

    let result = store.insert_batch(&batch);
    assert!(matches!(result, Err(Error::GradeValidation { .. })));

    let summary = store.store_summary().unwrap();
    assert_eq!(summary.school_count, 0);
    assert_eq!(summary.student_count, 0);
}

#[test]
fn test_duplicate_account_across_batches_is_a_constraint_violation() {
    let store = create_test_store();
    let first = create_test_batch(
        "St Marys HSS",
        vec![create_test_record("Anju Thomas", 5, "1001")],
    );
    store.insert_batch(&first).unwrap();

    let second = create_test_batch(
        "Govt VHSS Kundara",
        vec![create_test_record("Different Name", 7, "1001")],
    );
    let err = store.insert_batch(&second).unwrap_err();
    assert!(err.is_constraint_violation());
}

#[test]
fn test_failed_batch_leaves_no_rows() {
    // Third insert collides with the first inside the same transaction;
    // the school row and both successful student rows must vanish
    let store = create_test_store();
    let batch = create_test_batch(
        "St Marys HSS",
        vec![
            create_test_record("A", 5, "2001"),
            create_test_record("B", 6, "2002"),
            create_test_record("C", 7, "2001"),
        ],
    );

    let err = store.insert_batch(&batch).unwrap_err();
    assert!(err.is_constraint_violation());

    let summary = store.store_summary().unwrap();
    assert_eq!(summary.school_count, 0);
    assert_eq!(summary.student_count, 0);
    assert!(store.find_existing_accounts(&["2002"]).unwrap().is_empty());
}

#[test]
fn test_find_existing_accounts_matches_only_stored_numbers() {
    let store = create_test_store();
    let batch = create_test_batch(
        "St Marys HSS",
        vec![
            create_test_record("A", 5, "1001"),
            create_test_record("B", 6, "1002"),
        ],
    );
    store.insert_batch(&batch).unwrap();

    let existing = store
        .find_existing_accounts(&["1002", "9999", "8888"])
        .unwrap();
    assert_eq!(existing.len(), 1);
    assert_eq!(existing[0].account_number, "1002");
}

#[test]
fn test_find_existing_accounts_with_empty_set() {
    let store = create_test_store();
    assert!(store.find_existing_accounts(&[]).unwrap().is_empty());
}

#[test]
fn test_update_student_grade() {
    let store = create_test_store();
    let batch = create_test_batch(
        "St Marys HSS",
        vec![create_test_record("Anju Thomas", 5, "1001")],
    );
    store.insert_batch(&batch).unwrap();

    store.update_student_grade("1001", 6).unwrap();
    let existing = store.find_existing_accounts(&["1001"]).unwrap();
    assert_eq!(existing[0].grade, 6);
}

#[test]
fn test_update_unknown_account_fails() {
    let store = create_test_store();
    let err = store.update_student_grade("9999", 6).unwrap_err();
    assert!(matches!(err, Error::AccountNotFound { .. }));
}

#[test]
fn test_grade_check_constraint_rejects_out_of_range() {
    let store = create_test_store();
    let batch = create_test_batch(
        "St Marys HSS",
        vec![create_test_record("Anju Thomas", 5, "1001")],
    );
    let school_id = store.insert_batch(&batch).unwrap();

    let err = store.update_student_grade("1001", 18).unwrap_err();
    assert!(err.is_constraint_violation());

    let err = store.add_vacancy(school_id, 0).unwrap_err();
    assert!(err.is_constraint_violation());
}

#[test]
fn test_vacancies_for_school_are_oldest_first() {
    let store = create_test_store();
    let batch = create_test_batch(
        "St Marys HSS",
        vec![create_test_record("Anju Thomas", 5, "1001")],
    );
    let school_id = store.insert_batch(&batch).unwrap();

    let other = create_test_batch(
        "Govt VHSS Kundara",
        vec![create_test_record("Rahul K", 7, "1002")],
    );
    let other_id = store.insert_batch(&other).unwrap();

    let first = store.add_vacancy(school_id, 5).unwrap();
    let second = store.add_vacancy(school_id, 5).unwrap();
    store.add_vacancy(other_id, 5).unwrap();

    let vacancies = store.vacancies_for_school(school_id).unwrap();
    assert_eq!(vacancies.len(), 2);
    assert_eq!(vacancies[0].id, first);
    assert_eq!(vacancies[1].id, second);
    assert!(vacancies.iter().all(|v| v.school_id == school_id));
}

#[test]
fn test_apply_vacancy_fill_inserts_and_consumes() {
    let store = create_test_store();
    let batch = create_test_batch(
        "St Marys HSS",
        vec![create_test_record("Anju Thomas", 5, "1001")],
    );
    let school_id = store.insert_batch(&batch).unwrap();
    let slot = store.add_vacancy(school_id, 7).unwrap();

    let assignments = vec![FillAssignment {
        record: create_test_record("Rahul K", 7, "1002"),
        vacancy_id: slot,
    }];
    let filled = store.apply_vacancy_fill(school_id, &assignments).unwrap();
    assert_eq!(filled, 1);

    let existing = store.find_existing_accounts(&["1002"]).unwrap();
    assert_eq!(existing.len(), 1);
    assert_eq!(existing[0].school_id, school_id);
    assert!(store.vacancies_for_school(school_id).unwrap().is_empty());
}

#[test]
fn test_vanished_vacancy_rolls_the_fill_back() {
    let store = create_test_store();
    let batch = create_test_batch(
        "St Marys HSS",
        vec![create_test_record("Anju Thomas", 5, "1001")],
    );
    let school_id = store.insert_batch(&batch).unwrap();
    let slot = store.add_vacancy(school_id, 7).unwrap();

    let assignments = vec![
        FillAssignment {
            record: create_test_record("Rahul K", 7, "1002"),
            vacancy_id: slot,
        },
        FillAssignment {
            record: create_test_record("Meera S", 7, "1003"),
            vacancy_id: slot + 100,
        },
    ];
    let err = store.apply_vacancy_fill(school_id, &assignments).unwrap_err();
    assert!(matches!(err, Error::Storage { .. }));

    // First assignment must not survive the failed second one
    assert!(store.find_existing_accounts(&["1002"]).unwrap().is_empty());
    assert_eq!(store.vacancies_for_school(school_id).unwrap().len(), 1);
}

#[test]
fn test_empty_fill_is_a_no_op() {
    let store = create_test_store();
    let batch = create_test_batch(
        "St Marys HSS",
        vec![create_test_record("Anju Thomas", 5, "1001")],
    );
    let school_id = store.insert_batch(&batch).unwrap();
    assert_eq!(store.apply_vacancy_fill(school_id, &[]).unwrap(), 0);
}
