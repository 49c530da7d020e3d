//! Data models for packet processing
//!
//! This module contains the core data structures for representing extracted
//! application packets: the submitting institution, individual student
//! records, grade values, administrative districts, and the rows exchanged
//! with the student store.

use crate::constants;
use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

// =============================================================================
// Institution Structure
// =============================================================================

/// Submitting institution identity, extracted from the packet header block
///
/// One institution opens every packet. The four fields mirror the four
/// labelled lines of the submission template.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Institution {
    /// Institution name as printed on the packet
    pub name: String,

    /// Town or locality
    pub place: String,

    /// Contact phone number, kept as text
    pub phone: String,

    /// Contact email address
    pub email: String,
}

impl Institution {
    /// Create a new institution
    pub fn new(name: String, place: String, phone: String, email: String) -> Self {
        Self {
            name,
            place,
            phone,
            email,
        }
    }

    /// Filename-safe form of the institution name.
    ///
    /// Dots and commas break downstream filing, so they are removed.
    pub fn file_label(&self) -> String {
        self.name.replace(['.', ','], "")
    }
}

// =============================================================================
// Grade Value
// =============================================================================

/// A grade as carried through the pipeline.
///
/// Extraction produces `Raw` labels exactly as written on the document.
/// Normalization turns every label the alias table knows into `Canonical`,
/// and leaves the rest `Raw` for operator review. Only `Canonical` values
/// may reach the store.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum GradeValue {
    /// Canonical grade code, 1 through 17
    Canonical(u8),

    /// Unrecognized label, preserved verbatim
    Raw(String),
}

impl GradeValue {
    /// Create a canonical grade value, rejecting out-of-range codes
    pub fn canonical(code: u8) -> Result<Self> {
        if !constants::is_valid_grade(code) {
            return Err(Error::grade_validation(format!(
                "grade code {} is outside the canonical range {}..={}",
                code,
                constants::MIN_GRADE,
                constants::MAX_GRADE
            )));
        }
        Ok(Self::Canonical(code))
    }

    /// Create a raw grade value from a document label
    pub fn raw(label: impl Into<String>) -> Self {
        Self::Raw(label.into())
    }

    /// The canonical code, if this value has one
    pub fn code(&self) -> Option<u8> {
        match self {
            Self::Canonical(code) => Some(*code),
            Self::Raw(_) => None,
        }
    }

    /// True once the value has been resolved to a canonical code
    pub fn is_canonical(&self) -> bool {
        matches!(self, Self::Canonical(_))
    }

    /// Human-readable form: "+1", "2 DC" and so on for canonical codes,
    /// the verbatim label for raw values
    pub fn display_label(&self) -> String {
        match self {
            Self::Canonical(code) => constants::display_grade(*code),
            Self::Raw(label) => label.clone(),
        }
    }
}

impl std::fmt::Display for GradeValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Canonical(code) => write!(f, "{}", code),
            Self::Raw(label) => write!(f, "{}", label),
        }
    }
}

// =============================================================================
// Student Record Structure
// =============================================================================

/// One student row from the packet table
///
/// Fields appear in template column order. All columns are text on the
/// document; the grade alone gets a typed representation.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct StudentRecord {
    /// Student name as printed
    pub name: String,

    /// Grade, raw or canonical
    pub grade: GradeValue,

    /// Bank account number, the duplicate-detection key
    pub account_number: String,

    /// Bank routing code
    pub routing_code: String,

    /// Account holder name; empty means the student holds the account
    pub account_holder: String,

    /// Bank branch name as printed
    pub branch: String,
}

impl StudentRecord {
    /// Create a new student record
    pub fn new(
        name: String,
        grade: GradeValue,
        account_number: String,
        routing_code: String,
        account_holder: String,
        branch: String,
    ) -> Self {
        Self {
            name,
            grade,
            account_number,
            routing_code,
            account_holder,
            branch,
        }
    }

    /// Check the record may be written to the store.
    ///
    /// The store only accepts canonical grades; a raw label reaching this
    /// point means review was skipped.
    pub fn validate_for_storage(&self) -> Result<()> {
        match &self.grade {
            GradeValue::Canonical(_) => Ok(()),
            GradeValue::Raw(label) => Err(Error::grade_validation(format!(
                "student '{}' still carries unresolved grade label '{}'",
                self.name, label
            ))),
        }
    }

    /// Annual disbursement amount for this record, zero while the grade
    /// is unresolved
    pub fn award_amount(&self) -> u32 {
        self.grade.code().map(constants::award_amount).unwrap_or(0)
    }
}

// =============================================================================
// Batch Structure
// =============================================================================

/// One packet's worth of extracted data: the institution plus its student
/// records in document order
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Batch {
    /// Submitting institution
    pub institution: Institution,

    /// Student records, in the order the document lists them
    pub students: Vec<StudentRecord>,

    /// Administrative district, `Unknown` until resolved
    pub district: District,
}

impl Batch {
    /// Create a batch with an unresolved district
    pub fn new(institution: Institution, students: Vec<StudentRecord>) -> Self {
        Self {
            institution,
            students,
            district: District::Unknown,
        }
    }

    /// Attach a resolved district
    pub fn with_district(mut self, district: District) -> Self {
        self.district = district;
        self
    }

    /// Number of student records
    pub fn len(&self) -> usize {
        self.students.len()
    }

    /// True when the batch holds no student records
    pub fn is_empty(&self) -> bool {
        self.students.is_empty()
    }

    /// Account numbers in document order
    pub fn account_numbers(&self) -> Vec<&str> {
        self.students
            .iter()
            .map(|s| s.account_number.as_str())
            .collect()
    }

    /// Grade labels normalization could not resolve, in document order
    pub fn unresolved_grade_labels(&self) -> Vec<&str> {
        self.students
            .iter()
            .filter_map(|s| match &s.grade {
                GradeValue::Raw(label) => Some(label.as_str()),
                GradeValue::Canonical(_) => None,
            })
            .collect()
    }

    /// True once every grade in the batch is canonical
    pub fn all_grades_canonical(&self) -> bool {
        self.students.iter().all(|s| s.grade.is_canonical())
    }

    /// Total annual disbursement across the batch
    pub fn total_award_amount(&self) -> u32 {
        self.students.iter().map(|s| s.award_amount()).sum()
    }
}

// =============================================================================
// District Enumeration
// =============================================================================

/// Administrative district of the state, plus the `Unknown` sentinel.
///
/// Every value outside the fourteen canonical districts collapses to
/// `Unknown`; no other free-text district can exist in the system.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum District {
    Thiruvananthapuram,
    Kollam,
    Pathanamthitta,
    Alappuzha,
    Kottayam,
    Idukki,
    Ernakulam,
    Thrissur,
    Palakkad,
    Malappuram,
    Kozhikode,
    Wayanad,
    Kannur,
    Kasargod,
    Unknown,
}

impl District {
    /// All fourteen canonical districts, south to north
    pub fn all_canonical() -> [District; 14] {
        [
            District::Thiruvananthapuram,
            District::Kollam,
            District::Pathanamthitta,
            District::Alappuzha,
            District::Kottayam,
            District::Idukki,
            District::Ernakulam,
            District::Thrissur,
            District::Palakkad,
            District::Malappuram,
            District::Kozhikode,
            District::Wayanad,
            District::Kannur,
            District::Kasargod,
        ]
    }

    /// Full district name
    pub fn name(&self) -> &'static str {
        match self {
            District::Thiruvananthapuram => "Thiruvananthapuram",
            District::Kollam => "Kollam",
            District::Pathanamthitta => "Pathanamthitta",
            District::Alappuzha => "Alappuzha",
            District::Kottayam => "Kottayam",
            District::Idukki => "Idukki",
            District::Ernakulam => "Ernakulam",
            District::Thrissur => "Thrissur",
            District::Palakkad => "Palakkad",
            District::Malappuram => "Malappuram",
            District::Kozhikode => "Kozhikode",
            District::Wayanad => "Wayanad",
            District::Kannur => "Kannur",
            District::Kasargod => "Kasargod",
            District::Unknown => "Unknown",
        }
    }

    /// Three-letter short code used in filing labels and operator input
    pub fn short_code(&self) -> Option<&'static str> {
        match self {
            District::Thiruvananthapuram => Some("TVM"),
            District::Kollam => Some("KLM"),
            District::Pathanamthitta => Some("PTA"),
            District::Alappuzha => Some("ALP"),
            District::Kottayam => Some("KTM"),
            District::Idukki => Some("IDK"),
            District::Ernakulam => Some("EKM"),
            District::Thrissur => Some("TSR"),
            District::Palakkad => Some("PKD"),
            District::Malappuram => Some("MLP"),
            District::Kozhikode => Some("KKD"),
            District::Wayanad => Some("WYD"),
            District::Kannur => Some("KNR"),
            District::Kasargod => Some("KSD"),
            District::Unknown => None,
        }
    }

    /// True for the fourteen canonical districts
    pub fn is_known(&self) -> bool {
        !matches!(self, District::Unknown)
    }

    /// The district as an optional value, `None` for `Unknown`
    pub fn known(self) -> Option<District> {
        self.is_known().then_some(self)
    }

    /// Lenient parse: any text that is not a canonical name or short
    /// code becomes `Unknown`
    pub fn from_text(text: &str) -> District {
        District::from_str(text).unwrap_or(District::Unknown)
    }

    /// District for a 1-based operator menu choice; anything off the
    /// menu is `Unknown`
    pub fn from_menu_index(index: usize) -> District {
        match index {
            1..=14 => Self::all_canonical()[index - 1],
            _ => District::Unknown,
        }
    }
}

impl FromStr for District {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let trimmed = s.trim();
        for district in Self::all_canonical() {
            if district.name().eq_ignore_ascii_case(trimmed) {
                return Ok(district);
            }
            if let Some(code) = district.short_code() {
                if code.eq_ignore_ascii_case(trimmed) {
                    return Ok(district);
                }
            }
        }
        if trimmed.eq_ignore_ascii_case("unknown") {
            return Ok(District::Unknown);
        }
        Err(Error::configuration(format!(
            "unrecognized district '{}': expected a district name or short code",
            s
        )))
    }
}

impl std::fmt::Display for District {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

// =============================================================================
// Routing Code Reference Row
// =============================================================================

/// One row of the routing-code reference dataset
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct RoutingCodeInfo {
    /// Routing code, the lookup key
    pub code: String,

    /// Bank name
    pub bank: String,

    /// Branch name as the registry spells it
    pub branch: String,

    /// Settlement centre
    pub centre: String,

    /// District column; free text, not always a canonical district
    pub district: String,

    /// State name
    pub state: String,

    /// Full postal address of the branch
    pub address: String,

    /// City name
    pub city: String,
}

impl RoutingCodeInfo {
    /// Every descriptive column of the row, for cross-field scans
    pub fn field_values(&self) -> [&str; 7] {
        [
            &self.bank,
            &self.branch,
            &self.centre,
            &self.district,
            &self.state,
            &self.address,
            &self.city,
        ]
    }
}

// =============================================================================
// Store Exchange Rows
// =============================================================================

/// A stored student matched by account number during duplicate detection
#[derive(Debug, Clone, PartialEq)]
pub struct ExistingAccount {
    /// School the stored student belongs to
    pub school_id: i64,

    /// Stored school name, for the operator diff view
    pub school_name: String,

    /// Stored student name
    pub student_name: String,

    /// Stored canonical grade
    pub grade: u8,

    /// Account number that collided
    pub account_number: String,

    /// Stored routing code
    pub routing_code: String,

    /// Stored branch name
    pub branch: String,
}

/// A freed enrollment slot waiting to be filled
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Vacancy {
    /// Row id; lower ids are older slots
    pub id: i64,

    /// School the slot belongs to
    pub school_id: i64,

    /// Grade the slot is pinned to
    pub grade: u8,
}

/// One new student paired with the freed slot that admits them
#[derive(Debug, Clone, PartialEq)]
pub struct FillAssignment {
    /// The incoming student
    pub record: StudentRecord,

    /// The slot being consumed
    pub vacancy_id: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    // Test data helpers
    fn create_test_institution() -> Institution {
        Institution {
            name: "St. Marys H.S.S".to_string(),
            place: "Chavara".to_string(),
            phone: "0476 2680 321".to_string(),
            email: "office@stmarys.example".to_string(),
        }
    }

    fn create_test_record(account: &str, grade: GradeValue) -> StudentRecord {
        StudentRecord::new(
            "Anju Thomas".to_string(),
            grade,
            account.to_string(),
            "SBIN0070025".to_string(),
            String::new(),
            "Chavara".to_string(),
        )
    }

    fn create_test_batch() -> Batch {
        Batch::new(
            create_test_institution(),
            vec![
                create_test_record("1001", GradeValue::Canonical(5)),
                create_test_record("1002", GradeValue::Canonical(13)),
                create_test_record("1003", GradeValue::raw("5th std")),
            ],
        )
    }

    mod institution_tests {
        use super::*;

        #[test]
        fn test_institution_creation() {
            let institution = Institution::new(
                "Govt. V.H.S.S".to_string(),
                "Kollam".to_string(),
                "0474 111 222".to_string(),
                "office@vhss.example".to_string(),
            );
            assert_eq!(institution.place, "Kollam");
        }

        #[test]
        fn test_file_label_strips_punctuation() {
            let institution = create_test_institution();
            assert_eq!(institution.file_label(), "St Marys HSS");
        }
    }

    mod grade_value_tests {
        use super::*;

        #[test]
        fn test_canonical_range_enforced() {
            assert!(GradeValue::canonical(1).is_ok());
            assert!(GradeValue::canonical(17).is_ok());
            assert!(GradeValue::canonical(0).is_err());
            assert!(GradeValue::canonical(18).is_err());
        }

        #[test]
        fn test_code_accessor() {
            assert_eq!(GradeValue::Canonical(7).code(), Some(7));
            assert_eq!(GradeValue::raw("7th").code(), None);
        }

        #[test]
        fn test_display_label() {
            assert_eq!(GradeValue::Canonical(11).display_label(), "+1");
            assert_eq!(GradeValue::Canonical(14).display_label(), "2 DC");
            assert_eq!(GradeValue::Canonical(4).display_label(), "4");
            assert_eq!(GradeValue::raw("1 pg sociology").display_label(), "1 pg sociology");
        }

        #[test]
        fn test_untagged_serde_shapes() {
            // Numbers deserialize as canonical codes, strings stay raw
            let canonical: GradeValue = serde_json::from_str("11").unwrap();
            assert_eq!(canonical, GradeValue::Canonical(11));

            let raw: GradeValue = serde_json::from_str("\"plus one\"").unwrap();
            assert_eq!(raw, GradeValue::raw("plus one"));

            assert_eq!(serde_json::to_string(&GradeValue::Canonical(11)).unwrap(), "11");
            assert_eq!(
                serde_json::to_string(&GradeValue::raw("plus one")).unwrap(),
                "\"plus one\""
            );
        }
    }

    mod student_record_tests {
        use super::*;

        #[test]
        fn test_storage_validation_requires_canonical_grade() {
            let canonical = create_test_record("1001", GradeValue::Canonical(5));
            assert!(canonical.validate_for_storage().is_ok());

            let raw = create_test_record("1002", GradeValue::raw("5th std"));
            let err = raw.validate_for_storage().unwrap_err();
            assert!(err.to_string().contains("5th std"));
        }

        #[test]
        fn test_award_amounts_by_stage() {
            assert_eq!(create_test_record("1", GradeValue::Canonical(5)).award_amount(), 600);
            assert_eq!(
                create_test_record("2", GradeValue::Canonical(16)).award_amount(),
                2000
            );
            assert_eq!(create_test_record("3", GradeValue::raw("5th")).award_amount(), 0);
        }
    }

    mod batch_tests {
        use super::*;

        #[test]
        fn test_new_batch_starts_unresolved() {
            let batch = create_test_batch();
            assert_eq!(batch.district, District::Unknown);
            assert_eq!(batch.len(), 3);
        }

        #[test]
        fn test_unresolved_grade_labels() {
            let batch = create_test_batch();
            assert!(!batch.all_grades_canonical());
            assert_eq!(batch.unresolved_grade_labels(), vec!["5th std"]);
        }

        #[test]
        fn test_account_numbers_keep_document_order() {
            let batch = create_test_batch();
            assert_eq!(batch.account_numbers(), vec!["1001", "1002", "1003"]);
        }

        #[test]
        fn test_total_award_skips_unresolved_grades() {
            let batch = create_test_batch();
            // 600 for grade 5, 2000 for grade 13, nothing for the raw label
            assert_eq!(batch.total_award_amount(), 2600);
        }
    }

    mod district_tests {
        use super::*;

        #[test]
        fn test_parse_full_names_case_insensitive() {
            assert_eq!(District::from_str("Kollam").unwrap(), District::Kollam);
            assert_eq!(District::from_str("kollam").unwrap(), District::Kollam);
            assert_eq!(
                District::from_str("  THIRUVANANTHAPURAM ").unwrap(),
                District::Thiruvananthapuram
            );
        }

        #[test]
        fn test_parse_short_codes() {
            assert_eq!(District::from_str("TVM").unwrap(), District::Thiruvananthapuram);
            assert_eq!(District::from_str("ksd").unwrap(), District::Kasargod);
        }

        #[test]
        fn test_strict_parse_rejects_noise() {
            assert!(District::from_str("Madras").is_err());
            assert!(District::from_str("").is_err());
        }

        #[test]
        fn test_lenient_parse_collapses_to_unknown() {
            assert_eq!(District::from_text("Kottayam"), District::Kottayam);
            assert_eq!(District::from_text("somewhere else"), District::Unknown);
        }

        #[test]
        fn test_known_drops_the_unknown_sentinel() {
            assert_eq!(District::Kollam.known(), Some(District::Kollam));
            assert_eq!(District::Unknown.known(), None);
        }

        #[test]
        fn test_menu_index_mapping() {
            assert_eq!(District::from_menu_index(1), District::Thiruvananthapuram);
            assert_eq!(District::from_menu_index(14), District::Kasargod);
            assert_eq!(District::from_menu_index(0), District::Unknown);
            assert_eq!(District::from_menu_index(15), District::Unknown);
        }

        #[test]
        fn test_every_canonical_district_has_a_short_code() {
            for district in District::all_canonical() {
                assert!(district.short_code().is_some(), "{} lacks a code", district);
            }
            assert_eq!(District::Unknown.short_code(), None);
        }
    }

    #[test]
    fn test_batch_serde_round_trip() {
        let batch = create_test_batch().with_district(District::Kollam);
        let json = serde_json::to_string(&batch).unwrap();
        let back: Batch = serde_json::from_str(&json).unwrap();
        assert_eq!(batch, back);
    }
}
