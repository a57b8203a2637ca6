// ── Vehicle identifier resolution ──

use crate::model::VehicleListItem;

/// Resolve a user-supplied identifier (display name fragment, VIN, or
/// license plate) to a VIN.
///
/// Matching is case-insensitive on the trimmed input, in three tiers:
/// name substring first, then exact VIN, then exact plate. The first
/// vehicle in fleet order wins within a tier. Returns `None` when
/// nothing matches.
///
/// Note the tier order means a vehicle whose display name contains
/// another vehicle's VIN would shadow that VIN. Names are short
/// human labels in practice, so name matching stays first.
pub fn resolve_vin(vehicles: &[VehicleListItem], identifier: &str) -> Option<String> {
    let needle = identifier.trim().to_lowercase();
    if needle.is_empty() {
        return None;
    }

    if let Some(found) = vehicles.iter().find(|v| {
        v.name
            .as_deref()
            .is_some_and(|name| name.to_lowercase().contains(&needle))
    }) {
        return Some(found.vin.clone());
    }

    if let Some(found) = vehicles.iter().find(|v| v.vin.to_lowercase() == needle) {
        return Some(found.vin.clone());
    }

    vehicles
        .iter()
        .find(|v| {
            v.license_plate
                .as_deref()
                .is_some_and(|plate| plate.to_lowercase() == needle)
        })
        .map(|v| v.vin.clone())
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn fleet() -> Vec<VehicleListItem> {
        vec![
            VehicleListItem {
                vin: "WVWZZZED4SE003938".into(),
                name: Some("ID7".into()),
                model: Some("ID.7 Tourer".into()),
                license_plate: Some("M-XY 5678".into()),
            },
            VehicleListItem {
                vin: "WV2ZZZSTZNH009136".into(),
                name: Some("T7".into()),
                model: Some("Multivan".into()),
                license_plate: Some("M-AB 1234".into()),
            },
        ]
    }

    #[test]
    fn name_substring_matches_case_insensitively() {
        assert_eq!(
            resolve_vin(&fleet(), "id7").as_deref(),
            Some("WVWZZZED4SE003938")
        );
        assert_eq!(
            resolve_vin(&fleet(), "  ID  ").as_deref(),
            Some("WVWZZZED4SE003938")
        );
    }

    #[test]
    fn vin_matches_exactly() {
        assert_eq!(
            resolve_vin(&fleet(), "wv2zzzstznh009136").as_deref(),
            Some("WV2ZZZSTZNH009136")
        );
        // A VIN prefix is not a VIN.
        assert_eq!(resolve_vin(&fleet(), "WV2ZZZ"), None);
    }

    #[test]
    fn plate_matches_exactly() {
        assert_eq!(
            resolve_vin(&fleet(), "m-ab 1234").as_deref(),
            Some("WV2ZZZSTZNH009136")
        );
    }

    #[test]
    fn name_tier_wins_over_vin_tier() {
        let mut vehicles = fleet();
        // A vehicle literally named after the other one's VIN.
        vehicles[1].name = Some("WVWZZZED4SE003938".into());
        assert_eq!(
            resolve_vin(&vehicles, "WVWZZZED4SE003938").as_deref(),
            Some("WV2ZZZSTZNH009136")
        );
    }

    #[test]
    fn first_match_wins_within_a_tier() {
        let mut vehicles = fleet();
        vehicles[1].name = Some("ID7 Backup".into());
        assert_eq!(
            resolve_vin(&vehicles, "ID7").as_deref(),
            Some("WVWZZZED4SE003938")
        );
    }

    #[test]
    fn unmatched_or_blank_is_none() {
        assert_eq!(resolve_vin(&fleet(), "Golf"), None);
        assert_eq!(resolve_vin(&fleet(), "   "), None);
        assert_eq!(resolve_vin(&[], "ID7"), None);
    }
}
