//! Test fixtures for reconciliation

pub mod fill_tests;

use crate::app::models::{
    Batch, District, ExistingAccount, GradeValue, Institution, StudentRecord, Vacancy,
};

pub fn create_test_record(name: &str, grade: u8, account: &str) -> StudentRecord {
    StudentRecord::new(
        name.to_string(),
        GradeValue::canonical(grade).unwrap(),
        account.to_string(),
        "SBIN0070025".to_string(),
        name.to_string(),
        "Chavara".to_string(),
    )
}

pub fn create_test_batch(students: Vec<StudentRecord>) -> Batch {
    let institution = Institution {
        name: "St Marys HSS".to_string(),
        place: "Chavara".to_string(),
        phone: "0476 2680 321".to_string(),
        email: "office@stmarys.example".to_string(),
    };
    Batch::new(institution, students).with_district(District::Kollam)
}

pub fn create_stored_row(school_id: i64, name: &str, grade: u8, account: &str) -> ExistingAccount {
    ExistingAccount {
        school_id,
        school_name: format!("School {school_id}"),
        student_name: name.to_string(),
        grade,
        account_number: account.to_string(),
        routing_code: "SBIN0070025".to_string(),
        branch: "Chavara".to_string(),
    }
}

pub fn create_vacancy(id: i64, grade: u8) -> Vacancy {
    Vacancy {
        id,
        school_id: 1,
        grade,
    }
}
