//! Per-code resolution stages

use crate::app::models::{District, RoutingCodeInfo};

/// Stage one: take the district column at its word.
///
/// Canonical names and short codes pass in any letter case.
pub fn from_district_field(info: &RoutingCodeInfo) -> Option<District> {
    District::from_text(&info.district).known()
}

/// Stage two: the most common value across the descriptive columns.
///
/// A district name repeated through centre, city and state columns
/// outvotes a typo in the district column. Ties break toward the value
/// seen first, in column order.
pub fn from_most_common_field(info: &RoutingCodeInfo) -> Option<District> {
    let mut counts: Vec<(&str, usize)> = Vec::new();
    for value in info.field_values() {
        match counts.iter_mut().find(|(v, _)| *v == value) {
            Some((_, count)) => *count += 1,
            None => counts.push((value, 1)),
        }
    }

    counts.sort_by(|a, b| b.1.cmp(&a.1));
    let (value, _) = counts.first()?;
    District::from_text(value).known()
}

/// Stage three: scan the address for canonical district names.
///
/// Case-insensitive substring search; when the address mentions several
/// districts the first one in canonical order wins.
pub fn from_address_scan(info: &RoutingCodeInfo) -> Option<District> {
    let address = info.address.to_lowercase();
    District::all_canonical()
        .into_iter()
        .find(|district| address.contains(&district.name().to_lowercase()))
}
