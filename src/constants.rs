//! Application constants for the intake processor
//!
//! This module contains the fixed submission template labels, grade code
//! boundaries, award amounts, and directory mappings used throughout the
//! intake processor application.

// =============================================================================
// Submission Template Labels
// =============================================================================

/// Labels and structural counts of the fixed submission template
pub mod template {
    /// Heading that opens the institution block
    pub const INSTITUTION_HEADING: &str = "Institution Details";

    /// Heading that opens the student section
    pub const STUDENT_HEADING: &str = "Student Details";

    /// Institution field labels, in template order
    pub const NAME_LABEL: &str = "Name of the Institution";
    pub const PLACE_LABEL: &str = "Place";
    pub const PHONE_LABEL: &str = "Phone number";
    pub const EMAIL_LABEL: &str = "Email Id";

    /// All institution labels in the order the template prints them
    pub const INSTITUTION_LABELS: &[&str] = &[NAME_LABEL, PLACE_LABEL, PHONE_LABEL, EMAIL_LABEL];

    /// Number of labelled lines in the institution block
    pub const INSTITUTION_LINE_COUNT: usize = 4;

    /// First header cell of the student table in letter-format packets
    pub const STUDENT_TABLE_HEADER_CELL: &str = "STUDENT NAME";

    /// Columns per student row: name, grade, account, routing code,
    /// holder, branch
    pub const STUDENT_FIELD_COUNT: usize = 6;
}

// =============================================================================
// Validation Flag Names
// =============================================================================

/// Names of the four template conformance checks.
///
/// Validation reports one boolean per name; a packet is accepted only
/// when every flag is true.
pub mod flags {
    pub const INSTITUTION_HEADING: &str = "Institution Heading";
    pub const INSTITUTION_LINES: &str = "Institution Lines";
    pub const STUDENT_HEADING: &str = "Student Heading";
    pub const STUDENT_TABLE: &str = "Student Table";

    /// All flag names, in report order
    pub const ALL: &[&str] = &[
        INSTITUTION_HEADING,
        INSTITUTION_LINES,
        STUDENT_HEADING,
        STUDENT_TABLE,
    ];
}

// =============================================================================
// Grade Code Constants
// =============================================================================

/// Lowest canonical grade code
pub const MIN_GRADE: u8 = 1;

/// Highest canonical grade code (second postgraduate year)
pub const MAX_GRADE: u8 = 17;

/// Grades whose students leave the institution at year end.
///
/// 10 and 12 close the school stages, 15 the degree course, 17 the
/// postgraduate course.
pub const GRADUATING_GRADES: &[u8] = &[10, 12, 15, 17];

/// Grade beyond which there is no promotion target
pub const FINAL_GRADE: u8 = 17;

/// Disbursement amounts by study stage
pub mod awards {
    /// Annual amount for school grades (1 through 12)
    pub const SCHOOL_AMOUNT: u32 = 600;

    /// Annual amount for collegiate grades (13 through 17)
    pub const COLLEGIATE_AMOUNT: u32 = 2000;

    /// First grade paid at the collegiate rate
    pub const COLLEGIATE_THRESHOLD: u8 = 13;
}

// =============================================================================
// Branch Name Constants
// =============================================================================

/// Settlement-network suffix stripped from registry branch names
pub const SETTLEMENT_SUFFIX: &str = "IMPS";

/// Longest registry branch name trusted to replace a document value
pub const MAX_BRANCH_LEN: usize = 30;

// =============================================================================
// File and Directory Constants
// =============================================================================

/// Extension of extracted packet files
pub const PACKET_EXTENSION: &str = "json";

/// Destination for packets escalated to operator review
pub const REVIEW_DIR_NAME: &str = "for checking";

/// Destination for packets that failed template validation
pub const FORMAT_ISSUES_DIR_NAME: &str = "formatting issues";

/// Destination for batches the store rejected
pub const REJECTED_DIR_NAME: &str = "rejected";

/// Default store filename
pub const STORE_FILENAME: &str = "students.db";

/// Default routing-code reference dataset filename
pub const REGISTRY_FILENAME: &str = "routing_codes.csv";

// =============================================================================
// Routing Registry Column Names
// =============================================================================

/// Header names in the routing-code reference dataset
pub mod registry_columns {
    pub const CODE: &str = "IFSC";
    pub const BANK: &str = "BANK";
    pub const BRANCH: &str = "BRANCH";
    pub const CENTRE: &str = "CENTRE";
    pub const DISTRICT: &str = "DISTRICT";
    pub const STATE: &str = "STATE";
    pub const ADDRESS: &str = "ADDRESS";
    pub const CITY: &str = "CITY";

    /// Columns the loader refuses to run without
    pub const REQUIRED: &[&str] = &[CODE, BRANCH, DISTRICT, ADDRESS];
}

// =============================================================================
// Reporting Constants
// =============================================================================

/// Width of the centered final report block
pub const REPORT_WIDTH: usize = 80;

// =============================================================================
// Helper Functions
// =============================================================================

/// Check whether a code falls inside the canonical grade range
pub fn is_valid_grade(code: u8) -> bool {
    (MIN_GRADE..=MAX_GRADE).contains(&code)
}

/// Check whether students at this grade leave at year end
pub fn is_graduating_grade(grade: u8) -> bool {
    GRADUATING_GRADES.contains(&grade)
}

/// Annual disbursement amount for a canonical grade code
pub fn award_amount(grade: u8) -> u32 {
    match grade {
        g if (MIN_GRADE..awards::COLLEGIATE_THRESHOLD).contains(&g) => awards::SCHOOL_AMOUNT,
        g if (awards::COLLEGIATE_THRESHOLD..=MAX_GRADE).contains(&g) => awards::COLLEGIATE_AMOUNT,
        _ => 0,
    }
}

/// Human-readable form of a canonical grade code.
///
/// School grades print as numbers, higher-secondary as "+1"/"+2",
/// degree years as "N DC" and postgraduate years as "N PG".
pub fn display_grade(grade: u8) -> String {
    match grade {
        11 => "+1".to_string(),
        12 => "+2".to_string(),
        13 => "1 DC".to_string(),
        14 => "2 DC".to_string(),
        15 => "3 DC".to_string(),
        16 => "1 PG".to_string(),
        17 => "2 PG".to_string(),
        other => other.to_string(),
    }
}
