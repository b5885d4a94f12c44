//! Integration tests for the terminal tables.

use flora_cli::summary::{occurrence_table, regions_table, run_summary_table};
use flora_distribution::decode;
use flora_fetch::RunSummary;
use flora_model::RegionCatalog;

fn catalog() -> RegionCatalog {
    RegionCatalog::new([("Gr", "Greece"), ("It", "Italy"), ("Al", "Albania")]).unwrap()
}

#[test]
fn occurrence_table_lists_catalog_in_order() {
    let catalog = catalog();
    let occurrence = decode("<b>Gr</b> [cIt]", &catalog);

    let mut table = occurrence_table(&catalog, &occurrence, false);
    table.force_no_tty();
    let text = table.to_string();

    let greece = text.find("Greece").unwrap();
    let italy = text.find("Italy").unwrap();
    let albania = text.find("Albania").unwrap();
    assert!(greece < italy && italy < albania);
    assert!(text.contains("native"));
    assert!(text.contains("cultivated"));
    assert!(text.contains("missing"));
}

#[test]
fn occurrence_table_can_hide_missing_regions() {
    let catalog = catalog();
    let occurrence = decode("●<b>Gr</b>", &catalog);

    let mut table = occurrence_table(&catalog, &occurrence, true);
    table.force_no_tty();
    let text = table.to_string();

    assert!(text.contains("endemic"));
    assert!(!text.contains("Albania"));
    assert!(!text.contains("missing"));
}

#[test]
fn regions_table_has_every_region() {
    let mut table = regions_table(&catalog());
    table.force_no_tty();
    let text = table.to_string();
    for name in ["Greece", "Italy", "Albania"] {
        assert!(text.contains(name));
    }
}

#[test]
fn run_summary_table_shows_counts() {
    let summary = RunSummary {
        written: 12,
        skipped: 3,
        failed: 1,
    };
    let mut table = run_summary_table(&summary);
    table.force_no_tty();
    let text = table.to_string();
    assert!(text.contains("Rows written"));
    assert!(text.contains("12"));
    assert!(text.contains("Failed"));
}
