//! Output row types and their column layouts.
//!
//! Every fetcher writes one of these layouts. Column names are part of the
//! file format consumed downstream, so they are spelled out here once.

use std::collections::BTreeMap;

use crate::catalog::RegionCatalog;
use crate::occurrence::Occurrence;

pub const EURO_MED_ID: &str = "euro_med_id";
pub const DATE_FETCHED: &str = "date_fetched";
pub const TAXON_STATUS: &str = "taxon_status";

/// Euro+Med ranks recorded for each taxon, from the root down.
pub const TAXON_RANKS: [&str; 10] = [
    "Division",
    "Subdivision",
    "Class",
    "Subclass",
    "Superorder",
    "Order",
    "Family",
    "Genus",
    "Species",
    "Subspecies",
];

/// One leaf of the Euro+Med classification with its lineage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaxonRecord {
    /// Rank label to scientific name.
    pub lineage: BTreeMap<String, String>,
    pub taxon_status: String,
    pub euro_med_id: String,
    pub date_fetched: String,
}

impl TaxonRecord {
    pub fn header() -> Vec<&'static str> {
        let mut header = TAXON_RANKS.to_vec();
        header.extend([TAXON_STATUS, EURO_MED_ID, DATE_FETCHED]);
        header
    }

    /// Values in [`TaxonRecord::header`] order; ranks outside
    /// [`TAXON_RANKS`] are not written.
    pub fn to_row(&self) -> Vec<String> {
        let mut row: Vec<String> = TAXON_RANKS
            .iter()
            .map(|rank| self.lineage.get(*rank).cloned().unwrap_or_default())
            .collect();
        row.push(self.taxon_status.clone());
        row.push(self.euro_med_id.clone());
        row.push(self.date_fetched.clone());
        row
    }
}

/// Output column to BGCI export column.
pub const COLLECTION_COLUMNS: [(&str, &str); 12] = [
    ("bgci_id", "ID"),
    ("hybrid_genus", "Genus Hybrid"),
    ("genus", "Genus"),
    ("hybrid_species", "Species Hybrid"),
    ("species", "Species"),
    ("epithet_rank", "Infraspecific Rank"),
    ("epithet", "Infraspecific Epithet"),
    ("status", "Status"),
    ("n_collections", "No. of ex situ sites worldwide"),
    ("iucn_red_list", "IUCN Red List"),
    ("iucn_red_list_1997", "IUCN Red List 1997"),
    ("cites", "CITES Appendix"),
];

/// One BGCI ex situ collection entry linked to a Euro+Med taxon.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CollectionRecord {
    pub bgci_id: String,
    pub hybrid_genus: String,
    pub genus: String,
    pub hybrid_species: String,
    pub species: String,
    pub epithet_rank: String,
    pub epithet: String,
    pub status: String,
    pub n_collections: String,
    pub iucn_red_list: String,
    pub iucn_red_list_1997: String,
    pub cites: String,
    pub euro_med_id: String,
    pub date_fetched: String,
}

impl CollectionRecord {
    pub fn header() -> Vec<&'static str> {
        let mut header: Vec<&str> = COLLECTION_COLUMNS.iter().map(|(field, _)| *field).collect();
        header.extend([EURO_MED_ID, DATE_FETCHED]);
        header
    }

    /// Build from a BGCI export row keyed by the export's column names.
    pub fn from_bgci_row(
        row: &BTreeMap<String, String>,
        euro_med_id: impl Into<String>,
        date_fetched: impl Into<String>,
    ) -> Self {
        let field = |column: &str| row.get(column).cloned().unwrap_or_default();
        Self {
            bgci_id: field("ID"),
            hybrid_genus: field("Genus Hybrid"),
            genus: field("Genus"),
            hybrid_species: field("Species Hybrid"),
            species: field("Species"),
            epithet_rank: field("Infraspecific Rank"),
            epithet: field("Infraspecific Epithet"),
            status: field("Status"),
            n_collections: field("No. of ex situ sites worldwide"),
            iucn_red_list: field("IUCN Red List"),
            iucn_red_list_1997: field("IUCN Red List 1997"),
            cites: field("CITES Appendix"),
            euro_med_id: euro_med_id.into(),
            date_fetched: date_fetched.into(),
        }
    }

    pub fn to_row(&self) -> Vec<String> {
        vec![
            self.bgci_id.clone(),
            self.hybrid_genus.clone(),
            self.genus.clone(),
            self.hybrid_species.clone(),
            self.species.clone(),
            self.epithet_rank.clone(),
            self.epithet.clone(),
            self.status.clone(),
            self.n_collections.clone(),
            self.iucn_red_list.clone(),
            self.iucn_red_list_1997.clone(),
            self.cites.clone(),
            self.euro_med_id.clone(),
            self.date_fetched.clone(),
        ]
    }
}

/// Fields of an IUCN Red List species summary, in output order.
pub const REDLIST_FIELDS: [&str; 30] = [
    "taxonid",
    "scientific_name",
    "kingdom",
    "phylum",
    "class",
    "order",
    "family",
    "genus",
    "main_common_name",
    "authority",
    "published_year",
    "assessment_date",
    "category",
    "criteria",
    "population_trend",
    "marine_system",
    "freshwater_system",
    "terrestrial_system",
    "assessor",
    "reviewer",
    "aoo_km2",
    "eoo_km2",
    "elevation_upper",
    "elevation_lower",
    "depth_upper",
    "depth_lower",
    "errata_flag",
    "errata_reason",
    "amended_flag",
    "amended_reason",
];

/// Red List assessment summary for one taxon.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RedListRecord {
    pub euro_med_id: String,
    pub date_fetched: String,
    /// Field name to its text value.
    pub assessment: BTreeMap<String, String>,
}

impl RedListRecord {
    pub fn header() -> Vec<&'static str> {
        let mut header = vec![EURO_MED_ID, DATE_FETCHED];
        header.extend(REDLIST_FIELDS);
        header
    }

    pub fn to_row(&self) -> Vec<String> {
        let mut row = vec![self.euro_med_id.clone(), self.date_fetched.clone()];
        row.extend(
            REDLIST_FIELDS
                .iter()
                .map(|field| self.assessment.get(*field).cloned().unwrap_or_default()),
        );
        row
    }
}

/// Decoded distribution of one Euro+Med taxon.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DistributionRecord {
    pub euro_med_id: String,
    pub date_fetched: String,
    pub occurrence: Occurrence,
}

impl DistributionRecord {
    /// `euro_med_id`, `date_fetched`, then one column per catalog code.
    pub fn header(catalog: &RegionCatalog) -> Vec<String> {
        let mut header = vec![EURO_MED_ID.to_string(), DATE_FETCHED.to_string()];
        header.extend(catalog.codes().map(str::to_string));
        header
    }

    pub fn to_row(&self, catalog: &RegionCatalog) -> Vec<String> {
        let mut row = vec![self.euro_med_id.clone(), self.date_fetched.clone()];
        row.extend(
            self.occurrence
                .labels(catalog)
                .into_iter()
                .map(str::to_string),
        );
        row
    }
}
