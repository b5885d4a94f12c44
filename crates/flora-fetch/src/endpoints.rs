//! Request URLs for the remote sources.

use crate::config::FetchConfig;

/// Euro+Med classification holding the plant tree.
pub const EURO_MED_CLASSIFICATION: &str = "314a68f9-8449-495a-91c2-92fde8bcf344";

/// Euro+Med taxon at the top of the plant tree.
pub const EURO_MED_PLANT_ROOT: &str = "4a889e6c-9816-4745-9d06-146969da30c0";

/// Child listing of a node in the Euro+Med classification (JSON).
pub fn euromed_children_url(config: &FetchConfig, taxon_id: &str) -> String {
    format!(
        "{}/classification/{EURO_MED_CLASSIFICATION}/childNodesOf/{taxon_id}",
        base(&config.euromed_api)
    )
}

/// Data portal page of a Euro+Med taxon (HTML).
pub fn euromed_taxon_page_url(config: &FetchConfig, taxon_id: &str) -> String {
    format!(
        "{}/cdm_dataportal/taxon/{taxon_id}",
        base(&config.euromed_portal)
    )
}

/// BGCI PlantSearch CSV export for one name; empty parts are left unfiltered.
pub fn bgci_search_url(config: &FetchConfig, genus: &str, species: &str, epithet: &str) -> String {
    format!(
        "{}/plant_search.php?ftrFamily=&ftrExcludeCultivar=Y&ftrRedList=&ftrGenus={genus}\
         &ftrRedList1997=&ftrSpecies={species}&ftrEpithet={epithet}&ftrGardenID=&ftrPagerLimit=100000\
         &ftrCWR=&ftrMedicinal=&ftrNewZealand=&ftrMexico=&ftrCITES=&ftrTCD=&ftrGTC=&action=Find&export=1",
        base(&config.bgci_base)
    )
}

/// IUCN Red List v3 lookups by species name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RedListQuery {
    /// Assessment summary.
    #[default]
    Summary,
    Habitat,
    Threats,
}

impl RedListQuery {
    pub fn url(self, config: &FetchConfig, genus: &str, species: &str, token: &str) -> String {
        let path = match self {
            Self::Summary => "species",
            Self::Habitat => "habitats/species/name",
            Self::Threats => "threats/species/name",
        };
        format!(
            "{}/{path}/{genus}%20{species}?token={token}",
            base(&config.redlist_api)
        )
    }
}

fn base(url: &str) -> &str {
    url.trim_end_matches('/')
}
