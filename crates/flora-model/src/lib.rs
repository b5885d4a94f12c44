//! Data model for plant occurrence harvesting.
//!
//! Holds the region catalog, occurrence statuses, and the row layouts written
//! by the fetchers.

pub mod catalog;
pub mod error;
pub mod occurrence;
pub mod records;
pub mod status;

pub use catalog::{Region, RegionCatalog};
pub use error::{ModelError, Result};
pub use occurrence::Occurrence;
pub use records::{
    COLLECTION_COLUMNS, CollectionRecord, DATE_FETCHED, DistributionRecord, EURO_MED_ID,
    REDLIST_FIELDS, RedListRecord, TAXON_RANKS, TAXON_STATUS, TaxonRecord,
};
pub use status::OccurrenceStatus;
