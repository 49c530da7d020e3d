//! District inference from routing codes
//!
//! The reference dataset is messy: the district column holds canonical
//! names, abbreviations, taluk names and typos in no predictable mix. A
//! single code is resolved through three stages that each tolerate a
//! different kind of mess, and a whole batch is resolved by majority vote
//! over its codes. Resolution never fails; when every stage comes up
//! empty the answer is `District::Unknown` and the operator decides.

pub mod strategies;

#[cfg(test)]
pub mod tests;

use tracing::debug;

use crate::app::models::District;
use crate::app::services::routing_registry::RoutingRegistry;

/// Resolve the district for a single routing code.
///
/// Stages run in order until one produces a canonical district: the
/// district column itself, the most common value across the row's
/// descriptive columns, then a scan of the address for district names.
/// A code the registry does not know resolves to `Unknown`.
pub fn resolve_district(code: &str, registry: &RoutingRegistry) -> District {
    let Some(info) = registry.get(code) else {
        return District::Unknown;
    };

    if let Some(district) = strategies::from_district_field(info) {
        return district;
    }
    if let Some(district) = strategies::from_most_common_field(info) {
        debug!(
            "Code {}: district column unusable, cross-field scan gave {}",
            info.code, district
        );
        return district;
    }
    if let Some(district) = strategies::from_address_scan(info) {
        debug!("Code {}: address scan gave {}", info.code, district);
        return district;
    }
    District::Unknown
}

/// Resolve the district for a batch of routing codes by majority vote.
///
/// Each code votes with its own resolution. The most common answer wins;
/// when `Unknown` tops the count but canonical answers exist, the most
/// common canonical answer wins instead. Ties break toward the district
/// encountered first.
pub fn resolve_batch_district(codes: &[&str], registry: &RoutingRegistry) -> District {
    let mut ranking: Vec<(District, usize)> = Vec::new();
    for code in codes {
        let district = resolve_district(code, registry);
        match ranking.iter_mut().find(|(d, _)| *d == district) {
            Some((_, count)) => *count += 1,
            None => ranking.push((district, 1)),
        }
    }

    if ranking.is_empty() {
        return District::Unknown;
    }

    // Stable sort keeps first-encounter order within equal counts
    ranking.sort_by(|a, b| b.1.cmp(&a.1));

    let (winner, count) = ranking[0];
    if winner.is_known() {
        debug!(
            "Batch vote: {} with {} of {} codes",
            winner,
            count,
            codes.len()
        );
        return winner;
    }

    match ranking.iter().find(|(district, _)| district.is_known()) {
        Some((district, count)) => {
            debug!(
                "Batch vote: Unknown led, falling back to {} with {} of {} codes",
                district,
                count,
                codes.len()
            );
            *district
        }
        None => {
            debug!("Batch vote: no code resolved, codes were {:?}", codes);
            District::Unknown
        }
    }
}
