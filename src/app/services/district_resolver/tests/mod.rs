//! Test fixtures for district resolution


use std::path::PathBuf;

use crate::app::models::RoutingCodeInfo;
use crate::app::services::routing_registry::{normalize_code, RoutingRegistry};

/// All eight row columns in dataset order.
pub fn create_test_row(fields: [&str; 8]) -> RoutingCodeInfo {
    let [code, bank, branch, centre, district, state, address, city] = fields;
    RoutingCodeInfo {
        code: code.to_string(),
        bank: bank.to_string(),
        branch: branch.to_string(),
        centre: centre.to_string(),
        district: district.to_string(),
        state: state.to_string(),
        address: address.to_string(),
        city: city.to_string(),
    }
}

/// Registry exercising each resolution stage.
///
/// - `SBIN0070025`, `SBIN0070030`: district column is usable
/// - `FDRL0001111`: district column is a typo, cross-field scan works
/// - `HDFC0000001`: only the address names a district
/// - `HDFC0000002`: address names two districts, Kollam before Thrissur
/// - `HDFC0000003`: nothing usable anywhere
/// - `HDFC0000004`: cross-field tie between two districts
pub fn create_test_registry() -> RoutingRegistry {
    let rows = [
        create_test_row([
            "SBIN0070025",
            "State Bank of India",
            "Chavara",
            "Chavara",
            "Kollam",
            "Kerala",
            "Main Road Chavara",
            "Chavara",
        ]),
        create_test_row([
            "SBIN0070030",
            "State Bank of India",
            "Kundara",
            "Kundara",
            "KOLLAM",
            "Kerala",
            "Kundara PO",
            "Kundara",
        ]),
        create_test_row([
            "FDRL0001111",
            "Federal Bank",
            "Aluva",
            "Ernakulam",
            "Quilon",
            "Ernakulam",
            "Bank Junction Aluva",
            "Ernakulam",
        ]),
        create_test_row([
            "HDFC0000001",
            "HDFC Bank",
            "Town Branch",
            "Central",
            "KTYM",
            "KL",
            "MC Road, Kottayam 686001",
            "Town",
        ]),
        create_test_row([
            "HDFC0000002",
            "HDFC Bank",
            "Border Branch",
            "Central",
            "KL-08",
            "KL",
            "Near Kollam colony, Thrissur",
            "Town",
        ]),
        create_test_row([
            "HDFC0000003",
            "HDFC Bank",
            "City Branch",
            "Central",
            "KL-99",
            "KL",
            "First Cross Street",
            "Town",
        ]),
        create_test_row([
            "HDFC0000004",
            "B1",
            "B2",
            "Kollam",
            "XYZ",
            "Kollam",
            "Thrissur",
            "Thrissur",
        ]),
    ];

    let mut registry = RoutingRegistry::new(PathBuf::from("/tmp/test_routing.csv"));
    for row in rows {
        registry.codes.insert(normalize_code(&row.code), row);
    }
    registry
}
