//! Test fixtures for the store

pub mod store_tests;

use crate::app::models::{Batch, District, GradeValue, Institution, StudentRecord};
use crate::app::services::store::StudentStore;

pub fn create_test_store() -> StudentStore {
    StudentStore::open_in_memory().unwrap()
}

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

pub fn create_test_batch(school: &str, students: Vec<StudentRecord>) -> Batch {
    let institution = Institution {
        name: school.to_string(),
        place: "Chavara".to_string(),
        phone: "0476 2680 321".to_string(),
        email: "office@school.example".to_string(),
    };
    Batch::new(institution, students).with_district(District::Kollam)
}
