//! Fetchers for plant records from Euro+Med PlantBase, BGCI PlantSearch, and
//! the IUCN Red List.
//!
//! Each fetcher reads its inputs, requests one taxon at a time through an
//! [`HttpClient`], and appends rows to a CSV file. A taxon whose request
//! fails is logged and counted in the returned [`RunSummary`]; only input and
//! output errors end a run early.

pub mod client;
pub mod collections;
pub mod config;
pub mod distribution;
pub mod endpoints;
pub mod error;
pub mod redlist;
pub mod summary;
pub mod taxonomy;

pub use client::{HttpClient, ReqwestClient, RequestProfile};
pub use collections::{
    BgciQuery, CollectionOptions, TaxonLevel, fetch_collections, search_collections,
};
pub use config::{FetchConfig, REDLIST_TOKEN_ENV};
pub use distribution::{DistributionOptions, PageOutcome, fetch_distribution, fetch_distributions};
pub use endpoints::{EURO_MED_PLANT_ROOT, RedListQuery};
pub use error::{FetchError, Result};
pub use redlist::{RedListTaxon, fetch_assessment, fetch_redlist, parse_assessment, select_taxa};
pub use summary::{RunSummary, fetched_at};
pub use taxonomy::{TaxonomyWalk, fetch_taxonomy};
