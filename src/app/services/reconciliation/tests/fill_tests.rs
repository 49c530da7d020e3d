//! Vacancy fill planning tests

use crate::app::models::GradeValue;
use crate::app::services::reconciliation::plan_vacancy_fill;
use crate::app::services::reconciliation::tests::{create_test_record, create_vacancy};

#[test]
fn test_three_slots_five_students() {
    let vacancies = vec![
        create_vacancy(1, 5),
        create_vacancy(2, 5),
        create_vacancy(3, 5),
    ];
    let students: Vec<_> = (1..=5)
        .map(|n| create_test_record(&format!("S{n}"), 5, &format!("100{n}")))
        .collect();

    let outcome = plan_vacancy_fill(&students, &vacancies);
    assert_eq!(outcome.filled_count(), 3);
    assert_eq!(outcome.rejected_count(), 2);

    // Packet order wins the slots; the tail is turned away
    let assigned: Vec<&str> = outcome
        .assignments
        .iter()
        .map(|a| a.record.name.as_str())
        .collect();
    assert_eq!(assigned, vec!["S1", "S2", "S3"]);
    let rejected: Vec<&str> = outcome
        .rejected
        .iter()
        .map(|r| r.name.as_str())
        .collect();
    assert_eq!(rejected, vec!["S4", "S5"]);
}

#[test]
fn test_slots_are_consumed_oldest_first() {
    let vacancies = vec![
        create_vacancy(10, 7),
        create_vacancy(11, 5),
        create_vacancy(12, 7),
    ];
    let students = vec![create_test_record("A", 7, "1001")];

    let outcome = plan_vacancy_fill(&students, &vacancies);
    assert_eq!(outcome.assignments[0].vacancy_id, 10);
}

#[test]
fn test_grade_must_match_exactly() {
    let vacancies = vec![create_vacancy(1, 5)];
    let students = vec![
        create_test_record("Wrong grade", 6, "1001"),
        create_test_record("Right grade", 5, "1002"),
    ];

    let outcome = plan_vacancy_fill(&students, &vacancies);
    assert_eq!(outcome.filled_count(), 1);
    assert_eq!(outcome.assignments[0].record.name, "Right grade");
    assert_eq!(outcome.rejected[0].name, "Wrong grade");
}

#[test]
fn test_unresolved_grade_cannot_take_a_slot() {
    let vacancies = vec![create_vacancy(1, 5)];
    let mut student = create_test_record("Unclear", 5, "1001");
    student.grade = GradeValue::raw("Standard Five");

    let outcome = plan_vacancy_fill(&[student], &vacancies);
    assert_eq!(outcome.filled_count(), 0);
    assert_eq!(outcome.rejected_count(), 1);
}

#[test]
fn test_no_vacancies_rejects_everyone() {
    let students = vec![
        create_test_record("A", 5, "1001"),
        create_test_record("B", 6, "1002"),
    ];
    let outcome = plan_vacancy_fill(&students, &[]);
    assert_eq!(outcome.filled_count(), 0);
    assert_eq!(outcome.rejected_count(), 2);
}

#[test]
fn test_leftover_slots_stay_open() {
    let vacancies = vec![
        create_vacancy(1, 5),
        create_vacancy(2, 5),
        create_vacancy(3, 8),
    ];
    let students = vec![create_test_record("A", 5, "1001")];

    let outcome = plan_vacancy_fill(&students, &vacancies);
    assert_eq!(outcome.filled_count(), 1);
    assert_eq!(outcome.rejected_count(), 0);

    // Slots 2 and 3 are untouched by the plan
    let used: Vec<i64> = outcome.assignments.iter().map(|a| a.vacancy_id).collect();
    assert_eq!(used, vec![1]);
}

#[test]
fn test_empty_batch_of_new_students() {
    let vacancies = vec![create_vacancy(1, 5)];
    let outcome = plan_vacancy_fill(&[], &vacancies);
    assert_eq!(outcome.filled_count(), 0);
    assert_eq!(outcome.rejected_count(), 0);
}
