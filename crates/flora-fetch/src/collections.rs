//! BGCI ex situ collections fetcher.
//!
//! Taxa come from a Euro+Med taxonomy CSV. BGCI's search matches loosely, so
//! every exported row is checked against the requested name before it is
//! kept.

use std::fmt;
use std::path::Path;
use std::str::FromStr;

use flora_model::{CollectionRecord, EURO_MED_ID};
use flora_output::{CsvSink, ExistingFile, Row, read_rows, read_rows_from_str};
use tracing::{debug, info, warn};

use crate::client::{HttpClient, RequestProfile};
use crate::config::FetchConfig;
use crate::endpoints::bgci_search_url;
use crate::error::Result;
use crate::summary::{RunSummary, fetched_at};

const GENUS_COLUMN: &str = "Genus";
const SPECIES_COLUMN: &str = "Species";
const EPITHET_COLUMN: &str = "Infraspecific Epithet";

/// Taxonomy CSV column naming the species.
const TAXONOMY_SPECIES: &str = "Species";
/// Taxonomy CSV column naming the subspecies.
const TAXONOMY_SUBSPECIES: &str = "Subspecies";

/// Which taxa of the taxonomy CSV to look up.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TaxonLevel {
    /// Species rows (no subspecies).
    #[default]
    Species,
    /// Subspecies rows.
    Subspecies,
}

impl TaxonLevel {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Species => "species",
            Self::Subspecies => "subspecies",
        }
    }
}

impl fmt::Display for TaxonLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TaxonLevel {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "species" => Ok(Self::Species),
            "subspecies" => Ok(Self::Subspecies),
            other => Err(format!(
                "unknown taxon level '{other}'; choose 'species' or 'subspecies'"
            )),
        }
    }
}

/// Name parts sent to the BGCI search. Empty parts are not searched on.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct BgciQuery {
    pub genus: String,
    pub species: String,
    pub epithet: String,
}

impl BgciQuery {
    /// Build the query for one taxonomy row at `level`.
    ///
    /// Returns `None` when the row is not a taxon of that level or its name
    /// has too few words.
    pub fn from_taxonomy_row(row: &Row, level: TaxonLevel) -> Option<Self> {
        let field = |column: &str| row.get(column).map_or("", String::as_str);
        match level {
            TaxonLevel::Species => {
                if !field(TAXONOMY_SUBSPECIES).is_empty() {
                    return None;
                }
                let words: Vec<&str> = field(TAXONOMY_SPECIES).split_whitespace().collect();
                let [genus, species, ..] = words.as_slice() else {
                    return None;
                };
                Some(Self {
                    genus: (*genus).to_string(),
                    species: (*species).to_string(),
                    epithet: String::new(),
                })
            }
            TaxonLevel::Subspecies => {
                // "Genus species subsp. epithet": the rank marker is not searched on.
                let words: Vec<&str> = field(TAXONOMY_SUBSPECIES).split_whitespace().collect();
                let [genus, species, .., epithet] = words.as_slice() else {
                    return None;
                };
                Some(Self {
                    genus: (*genus).to_string(),
                    species: (*species).to_string(),
                    epithet: (*epithet).to_string(),
                })
            }
        }
    }

    pub fn url(&self, config: &FetchConfig) -> String {
        bgci_search_url(config, &self.genus, &self.species, &self.epithet)
    }

    /// Whether an exported row belongs to this name.
    ///
    /// Given parts must match case-insensitively; an empty genus or species
    /// requires an empty column. An empty epithet matches any row when
    /// `include_all_subspecies` is set, otherwise only rows without one.
    pub fn matches(&self, row: &Row, include_all_subspecies: bool) -> bool {
        [
            (GENUS_COLUMN, self.genus.as_str()),
            (SPECIES_COLUMN, self.species.as_str()),
            (EPITHET_COLUMN, self.epithet.as_str()),
        ]
        .into_iter()
        .all(|(column, wanted)| {
            let actual = row.get(column).map_or("", String::as_str);
            if wanted.is_empty() {
                (column == EPITHET_COLUMN && include_all_subspecies) || actual.is_empty()
            } else {
                actual.to_lowercase() == wanted.to_lowercase()
            }
        })
    }
}

impl fmt::Display for BgciQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.genus, self.species)?;
        if !self.epithet.is_empty() {
            write!(f, " {}", self.epithet)?;
        }
        Ok(())
    }
}

/// Options for [`fetch_collections`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CollectionOptions {
    pub existing: ExistingFile,
    pub level: TaxonLevel,
    pub include_all_subspecies: bool,
}

impl Default for CollectionOptions {
    fn default() -> Self {
        Self {
            existing: ExistingFile::Fail,
            level: TaxonLevel::Species,
            include_all_subspecies: true,
        }
    }
}

/// Query BGCI for one name and return the matching export rows.
pub fn search_collections<C: HttpClient + ?Sized>(
    client: &C,
    config: &FetchConfig,
    query: &BgciQuery,
    include_all_subspecies: bool,
) -> Result<Vec<Row>> {
    let url = query.url(config);
    let body = client.get_text(&url, RequestProfile::Api)?;
    let rows = read_rows_from_str(&body, &url)?;
    let total = rows.len();
    let kept: Vec<Row> = rows
        .into_iter()
        .filter(|row| query.matches(row, include_all_subspecies))
        .collect();
    debug!(taxon = %query, total, kept = kept.len(), "BGCI search");
    Ok(kept)
}

/// Look up every taxon of `input` in BGCI and write the matching collection
/// rows to `output`.
pub fn fetch_collections<C: HttpClient + ?Sized>(
    client: &C,
    config: &FetchConfig,
    input: &Path,
    output: &Path,
    options: CollectionOptions,
) -> Result<RunSummary> {
    let taxa = read_rows(input)?;
    let mut sink = CsvSink::open(output, &CollectionRecord::header(), options.existing)?;
    let mut summary = RunSummary::default();

    for taxon in &taxa {
        let Some(query) = BgciQuery::from_taxonomy_row(taxon, options.level) else {
            continue;
        };
        let euro_med_id = taxon.get(EURO_MED_ID).map_or("", String::as_str);

        let rows = match search_collections(client, config, &query, options.include_all_subspecies)
        {
            Ok(rows) => rows,
            Err(err) => {
                warn!(taxon = %query, error = %err, "failed to fetch BGCI collections");
                summary.failed += 1;
                continue;
            }
        };
        if rows.is_empty() {
            summary.skipped += 1;
            continue;
        }

        let date_fetched = fetched_at();
        for row in &rows {
            let record = CollectionRecord::from_bgci_row(row, euro_med_id, date_fetched.as_str());
            sink.write_row(&record.to_row())?;
            summary.written += 1;
        }
    }

    sink.finish()?;
    info!(
        level = %options.level,
        written = summary.written,
        skipped = summary.skipped,
        failed = summary.failed,
        "collections fetch complete"
    );
    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(pairs: &[(&str, &str)]) -> Row {
        pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect()
    }

    #[test]
    fn test_species_query() {
        let taxon = row(&[("Species", "Abies alba"), ("Subspecies", "")]);
        let query = BgciQuery::from_taxonomy_row(&taxon, TaxonLevel::Species).unwrap();
        assert_eq!(query.genus, "Abies");
        assert_eq!(query.species, "alba");
        assert_eq!(query.epithet, "");
        assert!(BgciQuery::from_taxonomy_row(&taxon, TaxonLevel::Subspecies).is_none());
    }

    #[test]
    fn test_subspecies_rows_are_not_species() {
        let taxon = row(&[
            ("Species", "Abies alba"),
            ("Subspecies", "Abies alba subsp. apennina"),
        ]);
        assert!(BgciQuery::from_taxonomy_row(&taxon, TaxonLevel::Species).is_none());

        let query = BgciQuery::from_taxonomy_row(&taxon, TaxonLevel::Subspecies).unwrap();
        assert_eq!(query.to_string(), "Abies alba apennina");
    }

    #[test]
    fn test_short_names_are_skipped() {
        let taxon = row(&[("Species", "Abies"), ("Subspecies", "")]);
        assert!(BgciQuery::from_taxonomy_row(&taxon, TaxonLevel::Species).is_none());

        let taxon = row(&[("Subspecies", "Abies alba")]);
        assert!(BgciQuery::from_taxonomy_row(&taxon, TaxonLevel::Subspecies).is_none());
    }

    #[test]
    fn test_matches() {
        let query = BgciQuery {
            genus: "Abies".to_string(),
            species: "alba".to_string(),
            epithet: String::new(),
        };
        let plain = row(&[("Genus", "ABIES"), ("Species", "Alba"), ("Infraspecific Epithet", "")]);
        let subspecies = row(&[
            ("Genus", "Abies"),
            ("Species", "alba"),
            ("Infraspecific Epithet", "apennina"),
        ]);
        let other = row(&[("Genus", "Abies"), ("Species", "albana")]);

        assert!(query.matches(&plain, true));
        assert!(query.matches(&subspecies, true));
        assert!(!query.matches(&subspecies, false));
        assert!(!query.matches(&other, true));
    }

    #[test]
    fn test_level_from_str() {
        assert_eq!("Subspecies".parse::<TaxonLevel>(), Ok(TaxonLevel::Subspecies));
        assert!("genus".parse::<TaxonLevel>().is_err());
    }
}
