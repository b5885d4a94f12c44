//! Euro+Med distribution decoding.
//!
//! # Example
//!
//! ```
//! use flora_distribution::decode;
//! use flora_model::{OccurrenceStatus, RegionCatalog};
//!
//! let catalog = RegionCatalog::new([("Gr", "Greece"), ("Al", "Albania")]).unwrap();
//! let occurrence = decode("●<b>Gr</b>", &catalog);
//! assert_eq!(occurrence.get("Gr"), Some(OccurrenceStatus::Endemic));
//! assert_eq!(occurrence.get("Al"), Some(OccurrenceStatus::Missing));
//! ```

pub mod decoder;
pub mod page;

pub use decoder::{DecodedDistribution, ENDEMIC_MARKER, EXTINCT_MARKER, RegionToken, decode};
pub use page::extract_condensed_distribution;
