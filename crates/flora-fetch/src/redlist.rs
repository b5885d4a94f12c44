//! IUCN Red List fetcher.
//!
//! Only taxa held in at least one BGCI collection are looked up: the
//! collections CSV is joined with the taxonomy CSV on `euro_med_id`.

use std::collections::{BTreeMap, HashSet};
use std::path::Path;

use flora_model::{EURO_MED_ID, REDLIST_FIELDS, RedListRecord};
use flora_output::{CsvSink, ExistingFile, Row, read_rows};
use serde_json::Value;
use tracing::{debug, info, warn};

use crate::client::{HttpClient, RequestProfile};
use crate::config::FetchConfig;
use crate::endpoints::RedListQuery;
use crate::error::{FetchError, Result};
use crate::summary::{RunSummary, fetched_at};

/// A species to look up, names lowercased.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RedListTaxon {
    pub genus: String,
    pub species: String,
    pub euro_med_id: String,
}

/// Join taxonomy rows with collection rows on `euro_med_id`.
///
/// Genus and species come from the collection rows. The result is
/// deduplicated and follows taxonomy order, then collection order.
pub fn select_taxa(taxonomy: &[Row], collections: &[Row]) -> Vec<RedListTaxon> {
    let field = |row: &Row, column: &str| row.get(column).cloned().unwrap_or_default();

    let mut by_id: BTreeMap<String, Vec<&Row>> = BTreeMap::new();
    for row in collections {
        by_id.entry(field(row, EURO_MED_ID)).or_default().push(row);
    }

    let mut seen = HashSet::new();
    let mut taxa = Vec::new();
    for taxon in taxonomy {
        let id = field(taxon, EURO_MED_ID);
        if id.is_empty() {
            continue;
        }
        for &row in by_id.get(&id).into_iter().flatten() {
            let candidate = RedListTaxon {
                genus: field(row, "genus").to_lowercase(),
                species: field(row, "species").to_lowercase(),
                euro_med_id: id.clone(),
            };
            if candidate.genus.is_empty() || candidate.species.is_empty() {
                continue;
            }
            if seen.insert(candidate.clone()) {
                taxa.push(candidate);
            }
        }
    }
    taxa
}

/// Text form of a JSON value for a CSV cell.
fn cell_text(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(text) => text.clone(),
        other => other.to_string(),
    }
}

/// Assessment fields of the first entry of a species summary response.
///
/// Returns `None` when the response has no `result` entries, which is how
/// the API reports a species that was never assessed.
pub fn parse_assessment(body: &Value) -> Option<BTreeMap<String, String>> {
    let first = body.get("result")?.as_array()?.first()?.as_object()?;
    Some(
        REDLIST_FIELDS
            .iter()
            .filter_map(|field| {
                first
                    .get(*field)
                    .map(|value| ((*field).to_string(), cell_text(value)))
            })
            .collect(),
    )
}

/// Fetch the summary assessment of one taxon.
pub fn fetch_assessment<C: HttpClient + ?Sized>(
    client: &C,
    config: &FetchConfig,
    token: &str,
    taxon: &RedListTaxon,
) -> Result<Option<RedListRecord>> {
    let url = RedListQuery::Summary.url(config, &taxon.genus, &taxon.species, token);
    let body = client.get_text(&url, RequestProfile::Api)?;
    let json: Value = serde_json::from_str(&body).map_err(|e| FetchError::json(&url, e))?;

    Ok(parse_assessment(&json).map(|assessment| RedListRecord {
        euro_med_id: taxon.euro_med_id.clone(),
        date_fetched: fetched_at(),
        assessment,
    }))
}

/// Look up every collected taxon in the Red List and write the assessments.
pub fn fetch_redlist<C: HttpClient + ?Sized>(
    client: &C,
    config: &FetchConfig,
    taxonomy: &Path,
    collections: &Path,
    output: &Path,
    existing: ExistingFile,
) -> Result<RunSummary> {
    let token = config.redlist_token()?;
    let taxa = select_taxa(&read_rows(taxonomy)?, &read_rows(collections)?);
    info!(taxa = taxa.len(), "collected taxa to look up");

    let mut sink = CsvSink::open(output, &RedListRecord::header(), existing)?;
    let mut summary = RunSummary::default();

    for taxon in &taxa {
        match fetch_assessment(client, config, token, taxon) {
            Ok(Some(record)) => {
                sink.write_row(&record.to_row())?;
                summary.written += 1;
            }
            Ok(None) => {
                debug!(genus = %taxon.genus, species = %taxon.species, "not assessed");
                summary.skipped += 1;
            }
            Err(err) => {
                warn!(
                    genus = %taxon.genus,
                    species = %taxon.species,
                    error = %err,
                    "failed to fetch Red List assessment"
                );
                summary.failed += 1;
            }
        }
    }

    sink.finish()?;
    info!(
        written = summary.written,
        skipped = summary.skipped,
        failed = summary.failed,
        "Red List fetch complete"
    );
    Ok(summary)
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn row(pairs: &[(&str, &str)]) -> Row {
        pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect()
    }

    #[test]
    fn test_select_taxa_joins_and_dedups() {
        let taxonomy = vec![
            row(&[("euro_med_id", "t2")]),
            row(&[("euro_med_id", "t1")]),
            row(&[("euro_med_id", "t3")]),
        ];
        let collections = vec![
            row(&[("genus", "Abies"), ("species", "alba"), ("euro_med_id", "t1")]),
            row(&[("genus", "ABIES"), ("species", "Alba"), ("euro_med_id", "t1")]),
            row(&[("genus", "Pinus"), ("species", "nigra"), ("euro_med_id", "t2")]),
            row(&[("genus", "Quercus"), ("species", "ilex"), ("euro_med_id", "t9")]),
        ];

        let taxa = select_taxa(&taxonomy, &collections);
        let names: Vec<(&str, &str, &str)> = taxa
            .iter()
            .map(|t| (t.genus.as_str(), t.species.as_str(), t.euro_med_id.as_str()))
            .collect();
        assert_eq!(names, vec![("pinus", "nigra", "t2"), ("abies", "alba", "t1")]);
    }

    #[test]
    fn test_parse_assessment() {
        let body = json!({
            "name": "abies alba",
            "result": [{
                "taxonid": 42895,
                "scientific_name": "Abies alba",
                "category": "LC",
                "criteria": null,
                "marine_system": false,
                "unlisted": "ignored"
            }]
        });
        let assessment = parse_assessment(&body).unwrap();
        assert_eq!(assessment["taxonid"], "42895");
        assert_eq!(assessment["scientific_name"], "Abies alba");
        assert_eq!(assessment["criteria"], "");
        assert_eq!(assessment["marine_system"], "false");
        assert!(!assessment.contains_key("unlisted"));
    }

    #[test]
    fn test_unassessed_species() {
        assert!(parse_assessment(&json!({"name": "x", "result": []})).is_none());
        assert!(parse_assessment(&json!({"message": "Token not valid!"})).is_none());
    }
}
