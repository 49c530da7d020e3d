//! Test fixtures for the normalizer

pub mod grade_tests;

use std::path::PathBuf;

use crate::app::models::{GradeValue, Institution, RoutingCodeInfo, StudentRecord};
use crate::app::services::routing_registry::{normalize_code, RoutingRegistry};

/// Registry with a handful of codes covering the branch replacement cases.
pub fn create_test_registry() -> RoutingRegistry {
    let mut registry = RoutingRegistry::new(PathBuf::from("/tmp/test_routing.csv"));
    for (code, branch) in [
        ("SBIN0070025", "Chavara IMPS"),
        ("SBIN0070026", "Karunagappally"),
        ("FDRL0001111", "Aluva, Ernakulam District, Kerala"),
        ("FDRL0002222", "Branch With An Exceedingly Long Descriptive Name"),
        ("FDRL0003333", ""),
    ] {
        registry.codes.insert(
            normalize_code(code),
            RoutingCodeInfo {
                code: code.to_string(),
                bank: "Test Bank".to_string(),
                branch: branch.to_string(),
                centre: String::new(),
                district: "Kollam".to_string(),
                state: "Kerala".to_string(),
                address: format!("{branch} address"),
                city: String::new(),
            },
        );
    }
    registry
}

pub fn create_test_record(name: &str, grade_label: &str, account: &str) -> StudentRecord {
    StudentRecord::new(
        name.to_string(),
        GradeValue::raw(grade_label),
        account.to_string(),
        "SBIN0070026".to_string(),
        String::new(),
        "Karunagappally branch".to_string(),
    )
}

pub fn create_test_institution() -> Institution {
    Institution {
        name: "St. Marys H.S.S".to_string(),
        place: "Kollam".to_string(),
        phone: "0474-2742222".to_string(),
        email: "office@stmarys.example".to_string(),
    }
}
