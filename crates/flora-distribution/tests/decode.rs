use std::collections::BTreeSet;

use proptest::prelude::*;

use flora_distribution::{DecodedDistribution, decode};
use flora_model::{Occurrence, OccurrenceStatus, RegionCatalog};

fn catalog(codes: &[&str]) -> RegionCatalog {
    RegionCatalog::new(codes.iter().map(|code| (*code, format!("Region {code}"))))
        .expect("valid catalog")
}

fn assert_statuses(occurrence: &Occurrence, expected: &[(&str, OccurrenceStatus)]) {
    for (code, status) in expected {
        assert_eq!(occurrence.get(code), Some(*status), "status of {code}");
    }
}

#[test]
fn decodes_all_layers() {
    let catalog = catalog(&["Fr", "Gr", "Sp", "It", "Tu", "Al"]);
    let occurrence = decode("<b>Fr Gr</b> [nSp cIt] ?Tu", &catalog);
    assert_statuses(
        &occurrence,
        &[
            ("Fr", OccurrenceStatus::Native),
            ("Gr", OccurrenceStatus::Native),
            ("Sp", OccurrenceStatus::Naturalized),
            ("It", OccurrenceStatus::Cultivated),
            ("Tu", OccurrenceStatus::DoubtfullyPresent),
            ("Al", OccurrenceStatus::Missing),
        ],
    );
    assert_eq!(occurrence.len(), 6);
}

#[test]
fn endemic_marker_upgrades_natives() {
    let catalog = catalog(&["Gr", "Al"]);
    let occurrence = decode("●<b>Gr</b>", &catalog);
    assert_statuses(
        &occurrence,
        &[
            ("Gr", OccurrenceStatus::Endemic),
            ("Al", OccurrenceStatus::Missing),
        ],
    );
}

#[test]
fn empty_fragment_is_all_missing() {
    let catalog = catalog(&["Gr", "Al", "Tu"]);
    let occurrence = decode("", &catalog);
    assert_eq!(occurrence.len(), 3);
    assert!(
        occurrence
            .iter()
            .all(|(_, status)| status == OccurrenceStatus::Missing)
    );
}

#[test]
fn subregion_detail_is_discarded() {
    let catalog = catalog(&["Gr"]);
    let occurrence = decode("<b>Gr(Kriti)</b>", &catalog);
    assert_statuses(&occurrence, &[("Gr", OccurrenceStatus::Native)]);
    assert_eq!(occurrence.len(), 1);
}

// Native, introduced, and remaining layers are applied in that order; the
// last layer listing a code decides its status.
#[test]
fn later_layer_wins_for_repeated_code() {
    let catalog = catalog(&["Fr"]);
    let occurrence = decode("<b>Fr</b> [nFr]", &catalog);
    assert_statuses(&occurrence, &[("Fr", OccurrenceStatus::Naturalized)]);

    let occurrence = decode("[Fr] †Fr", &catalog);
    assert_statuses(&occurrence, &[("Fr", OccurrenceStatus::PresumablyExtinct)]);
}

#[test]
fn remainder_modifiers() {
    let catalog = catalog(&["Al", "Bu", "Cr", "Tu", "Ge"]);
    let occurrence = decode("-Al †Bu dCr ?Tu Ge", &catalog);
    assert_statuses(
        &occurrence,
        &[
            ("Al", OccurrenceStatus::ReportedInError),
            ("Bu", OccurrenceStatus::PresumablyExtinct),
            ("Cr", OccurrenceStatus::DoubtfullyNative),
            ("Tu", OccurrenceStatus::DoubtfullyPresent),
            ("Ge", OccurrenceStatus::Undefined),
        ],
    );
}

#[test]
fn introduced_modifiers_and_bare_codes() {
    let catalog = catalog(&["Ge", "Be", "Ho", "Lu"]);
    let occurrence = decode("[aGe cBe nHo Lu Xx]", &catalog);
    assert_statuses(
        &occurrence,
        &[
            ("Ge", OccurrenceStatus::CasualAlien),
            ("Be", OccurrenceStatus::Cultivated),
            ("Ho", OccurrenceStatus::Naturalized),
            ("Lu", OccurrenceStatus::Introduced),
        ],
    );
    assert_eq!(occurrence.get("Xx"), None);
}

#[test]
fn unknown_codes_are_dropped() {
    let catalog = catalog(&["Gr"]);
    let occurrence = decode("<b>Gr Zz</b> [nYy] ?Qq Ww", &catalog);
    let codes: BTreeSet<&str> = occurrence.iter().map(|(code, _)| code).collect();
    assert_eq!(codes, BTreeSet::from(["Gr"]));
}

#[test]
fn realistic_fragment() {
    let catalog = catalog(&["AE", "Al", "Bu", "Cr", "Gr", "It", "Tu", "Si"]);
    let fragment = "<b>AE</b>(<b>G</b>) <b>Al Bu Gr</b> [cIt] ?Cr(Kriti) -Si(S)";
    let decoded = DecodedDistribution::parse(fragment);
    assert_eq!(decoded.native, "AE G Al Bu Gr");
    assert_eq!(
        decoded.remainder.split_whitespace().collect::<Vec<_>>(),
        vec!["?Cr", "-Si"]
    );

    let occurrence = decode(fragment, &catalog);
    assert_statuses(
        &occurrence,
        &[
            ("AE", OccurrenceStatus::Native),
            ("Al", OccurrenceStatus::Native),
            ("Bu", OccurrenceStatus::Native),
            ("Gr", OccurrenceStatus::Native),
            ("It", OccurrenceStatus::Cultivated),
            ("Cr", OccurrenceStatus::DoubtfullyPresent),
            ("Si", OccurrenceStatus::ReportedInError),
            ("Tu", OccurrenceStatus::Missing),
        ],
    );
}

proptest! {
    #[test]
    fn key_set_always_matches_catalog(fragment in ".{0,80}") {
        let catalog = catalog(&["Fr", "Gr", "Sp", "It", "Tu", "Al"]);
        let occurrence = decode(&fragment, &catalog);
        let codes: Vec<&str> = occurrence.iter().map(|(code, _)| code).collect();
        let mut expected: Vec<&str> = catalog.codes().collect();
        expected.sort_unstable();
        prop_assert_eq!(codes, expected);
    }

    #[test]
    fn key_set_matches_catalog_for_markup(
        parts in prop::collection::vec(
            prop::sample::select(vec![
                "<b>", "</b>", "[", "]", "(", ")", " ", "●", "†", "?", "-", "d", "a", "c", "n",
                "Fr", "Gr", "Sp", "Zz",
            ]),
            0..40,
        )
    ) {
        let catalog = catalog(&["Fr", "Gr", "Sp"]);
        let fragment: String = parts.concat();
        let mut occurrence = decode(&fragment, &catalog);
        prop_assert_eq!(occurrence.len(), catalog.len());
        for code in catalog.codes() {
            prop_assert!(occurrence.get(code).is_some());
        }
        let before = occurrence.clone();
        occurrence.retain_catalog(&catalog);
        prop_assert_eq!(before, occurrence);
    }
}
