//! Static grade alias table
//!
//! Every way a grade has ever been written on a submitted form, mapped to
//! its canonical code. The table is matched against trimmed lowercase
//! labels; membership is exact, never fuzzy. Labels outside the table stay
//! raw, which deliberately includes the bare numerals "13" through "17":
//! on real forms those digits are always OCR noise, while the collegiate
//! grades they would name are written as "1 DC", "2 PG" and so on.

use std::collections::HashMap;
use std::sync::LazyLock;

/// Alias table as (label, canonical code) pairs.
///
/// School grades carry their section suffixes (a through e, spaced and
/// unspaced), roman numerals with the OCR confusions actually observed
/// (1v, v1, v11, v111, 1x, x1, x11), ordinals and number words. The
/// higher-secondary grades add the "+1"/"+2" family with their stream
/// suffixes, and the collegiate grades their degree and postgraduate
/// year labels.
pub const ALIASES: &[(&str, u8)] = &[
    // Grade 1
    ("1", 1),
    ("1a", 1),
    ("1b", 1),
    ("1c", 1),
    ("1d", 1),
    ("1e", 1),
    ("1 a", 1),
    ("1 b", 1),
    ("1 c", 1),
    ("1 d", 1),
    ("1 e", 1),
    ("i", 1),
    ("1st", 1),
    ("one", 1),
    ("first", 1),
    // Grade 2
    ("2", 2),
    ("2a", 2),
    ("2b", 2),
    ("2c", 2),
    ("2d", 2),
    ("2e", 2),
    ("2 a", 2),
    ("2 b", 2),
    ("2 c", 2),
    ("2 d", 2),
    ("2 e", 2),
    ("ii", 2),
    ("2nd", 2),
    ("two", 2),
    ("second", 2),
    // Grade 3
    ("3", 3),
    ("3a", 3),
    ("3b", 3),
    ("3c", 3),
    ("3d", 3),
    ("3e", 3),
    ("3 a", 3),
    ("3 b", 3),
    ("3 c", 3),
    ("3 d", 3),
    ("3 e", 3),
    ("iii", 3),
    ("3rd", 3),
    ("three", 3),
    ("third", 3),
    // Grade 4
    ("4", 4),
    ("4a", 4),
    ("4b", 4),
    ("4c", 4),
    ("4d", 4),
    ("4e", 4),
    ("4 a", 4),
    ("4 b", 4),
    ("4 c", 4),
    ("4 d", 4),
    ("4 e", 4),
    ("iv", 4),
    ("1v", 4),
    ("4th", 4),
    ("four", 4),
    ("fourth", 4),
    // Grade 5
    ("5", 5),
    ("5a", 5),
    ("5b", 5),
    ("5c", 5),
    ("5d", 5),
    ("5e", 5),
    ("5 a", 5),
    ("5 b", 5),
    ("5 c", 5),
    ("5 d", 5),
    ("5 e", 5),
    ("v", 5),
    ("5th", 5),
    ("five", 5),
    ("fifth", 5),
    // Grade 6
    ("6", 6),
    ("6a", 6),
    ("6b", 6),
    ("6c", 6),
    ("6d", 6),
    ("6e", 6),
    ("6 a", 6),
    ("6 b", 6),
    ("6 c", 6),
    ("6 d", 6),
    ("6 e", 6),
    ("vi", 6),
    ("v1", 6),
    ("six", 6),
    ("6th", 6),
    ("sixth", 6),
    // Grade 7
    ("7", 7),
    ("7a", 7),
    ("7b", 7),
    ("7c", 7),
    ("7d", 7),
    ("7e", 7),
    ("7 a", 7),
    ("7 b", 7),
    ("7 c", 7),
    ("7 d", 7),
    ("7 e", 7),
    ("vii", 7),
    ("v11", 7),
    ("7th", 7),
    ("seven", 7),
    ("seventh", 7),
    // Grade 8
    ("8", 8),
    ("8a", 8),
    ("8b", 8),
    ("8c", 8),
    ("8d", 8),
    ("8e", 8),
    ("8 a", 8),
    ("8 b", 8),
    ("8 c", 8),
    ("8 d", 8),
    ("8 e", 8),
    ("viii", 8),
    ("v111", 8),
    ("8th", 8),
    ("eight", 8),
    ("eighth", 8),
    // Grade 9
    ("9", 9),
    ("9a", 9),
    ("9b", 9),
    ("9c", 9),
    ("9d", 9),
    ("9e", 9),
    ("9 a", 9),
    ("9 b", 9),
    ("9 c", 9),
    ("9 d", 9),
    ("9 e", 9),
    ("ix", 9),
    ("1x", 9),
    ("9th", 9),
    ("nine", 9),
    ("nineth", 9),
    // Grade 10
    ("10", 10),
    ("10a", 10),
    ("10b", 10),
    ("10c", 10),
    ("10d", 10),
    ("10e", 10),
    ("10 a", 10),
    ("10 b", 10),
    ("10 c", 10),
    ("10 d", 10),
    ("10 e", 10),
    ("x", 10),
    ("10th", 10),
    ("ten", 10),
    ("tenth", 10),
    // Grade 11 (+1)
    ("11", 11),
    ("x1", 11),
    ("xi", 11),
    ("11th", 11),
    ("plus one", 11),
    ("plusone", 11),
    ("+1", 11),
    ("+1 science", 11),
    ("+1 commerce", 11),
    ("+1 humanities", 11),
    // Grade 12 (+2)
    ("12", 12),
    ("x11", 12),
    ("xii", 12),
    ("12th", 12),
    ("plus two", 12),
    ("plustwo", 12),
    ("+2", 12),
    ("+2 science", 12),
    ("+2 commerce", 12),
    ("+2 humanities", 12),
    // Grade 13 (first degree year)
    ("1 dc", 13),
    ("1dc", 13),
    ("i dc", 13),
    ("idc", 13),
    ("ist dc", 13),
    ("1stdc", 13),
    ("1st dc", 13),
    // Grade 14 (second degree year)
    ("2 dc", 14),
    ("2dc", 14),
    ("ii dc", 14),
    ("iidc", 14),
    ("iind dc", 14),
    ("2nddc", 14),
    ("2nd dc", 14),
    // Grade 15 (third degree year)
    ("3 dc", 15),
    ("3dc", 15),
    ("iii dc", 15),
    ("iiidc", 15),
    ("iiird dc", 15),
    ("3rddc", 15),
    ("3rd dc", 15),
    // Grade 16 (first postgraduate year)
    ("1 pg", 16),
    ("1pg", 16),
    ("i pg", 16),
    ("ipg", 16),
    ("ist pg", 16),
    ("1st pg", 16),
    ("1stpg", 16),
    // Grade 17 (second postgraduate year)
    ("2 pg", 17),
    ("2pg", 17),
    ("ii pg", 17),
    ("iipg", 17),
    ("iind pg", 17),
    ("2ndpg", 17),
    ("2nd pg", 17),
];

static LOOKUP: LazyLock<HashMap<&'static str, u8>> =
    LazyLock::new(|| ALIASES.iter().copied().collect());

/// Canonical code for a document grade label, if the table knows it.
///
/// Matching trims and lowercases the label; nothing else.
pub fn canonical_code_for(label: &str) -> Option<u8> {
    let key = label.trim().to_lowercase();
    LOOKUP.get(key.as_str()).copied()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants;

    #[test]
    fn test_table_has_no_conflicting_entries() {
        let mut seen: HashMap<&str, u8> = HashMap::new();
        for (label, code) in ALIASES {
            if let Some(previous) = seen.insert(label, *code) {
                assert_eq!(
                    previous, *code,
                    "label '{}' maps to both {} and {}",
                    label, previous, code
                );
            }
        }
    }

    #[test]
    fn test_every_code_is_canonical() {
        for (label, code) in ALIASES {
            assert!(
                constants::is_valid_grade(*code),
                "alias '{}' maps outside the grade range",
                label
            );
        }
    }

    #[test]
    fn test_every_grade_has_aliases() {
        for code in constants::MIN_GRADE..=constants::MAX_GRADE {
            assert!(
                ALIASES.iter().any(|(_, c)| *c == code),
                "grade {} has no aliases",
                code
            );
        }
    }

    #[test]
    fn test_collegiate_numerals_are_not_aliases() {
        // Bare "13".."17" on a form is OCR noise, never a degree year
        for label in ["13", "14", "15", "16", "17"] {
            assert_eq!(canonical_code_for(label), None);
        }
    }
}
