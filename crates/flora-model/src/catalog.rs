//! Region catalog: the ordered set of region codes a distribution can mention.
//!
//! The catalog is loaded once by the owning process and handed to every
//! decode call by reference. Its order is the column order of distribution
//! output files.

use std::collections::HashMap;
use std::fmt;
use std::path::Path;

use serde::de::{Deserialize, Deserializer, MapAccess, Visitor};

use crate::error::{ModelError, Result};

/// One region of the catalog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Region {
    pub code: String,
    pub name: String,
}

/// Ordered, immutable mapping from region code to display name.
#[derive(Debug, Clone)]
pub struct RegionCatalog {
    regions: Vec<Region>,
    index: HashMap<String, usize>,
}

impl RegionCatalog {
    /// Build a catalog from `(code, name)` pairs, keeping their order.
    ///
    /// # Errors
    ///
    /// Fails on an empty input or a repeated code.
    pub fn new<I, C, N>(entries: I) -> Result<Self>
    where
        I: IntoIterator<Item = (C, N)>,
        C: Into<String>,
        N: Into<String>,
    {
        let mut regions = Vec::new();
        let mut index = HashMap::new();
        for (code, name) in entries {
            let code = code.into();
            if index.contains_key(&code) {
                return Err(ModelError::DuplicateRegion { code });
            }
            index.insert(code.clone(), regions.len());
            regions.push(Region {
                code,
                name: name.into(),
            });
        }
        if regions.is_empty() {
            return Err(ModelError::EmptyCatalog);
        }
        Ok(Self { regions, index })
    }

    /// Parse a JSON object of `code -> name`; key order becomes catalog order.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let CatalogEntries(entries) = serde_json::from_str(json)?;
        Self::new(entries)
    }

    /// Load a catalog from a JSON file.
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path).map_err(|source| ModelError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&text).map_err(|source| ModelError::Catalog {
            path: path.to_path_buf(),
            source: Box::new(source),
        })
    }

    pub fn contains(&self, code: &str) -> bool {
        self.index.contains_key(code)
    }

    /// Display name for a code.
    pub fn name(&self, code: &str) -> Option<&str> {
        self.index
            .get(code)
            .map(|&idx| self.regions[idx].name.as_str())
    }

    /// Codes in catalog order.
    pub fn codes(&self) -> impl Iterator<Item = &str> {
        self.regions.iter().map(|region| region.code.as_str())
    }

    pub fn regions(&self) -> &[Region] {
        &self.regions
    }

    pub fn len(&self) -> usize {
        self.regions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.regions.is_empty()
    }
}

/// JSON object entries in document order.
struct CatalogEntries(Vec<(String, String)>);

impl<'de> Deserialize<'de> for CatalogEntries {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct EntriesVisitor;

        impl<'de> Visitor<'de> for EntriesVisitor {
            type Value = CatalogEntries;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("an object mapping region codes to region names")
            }

            fn visit_map<A>(self, mut map: A) -> std::result::Result<Self::Value, A::Error>
            where
                A: MapAccess<'de>,
            {
                let mut entries = Vec::with_capacity(map.size_hint().unwrap_or(0));
                while let Some((code, name)) = map.next_entry::<String, String>()? {
                    entries.push((code, name));
                }
                Ok(CatalogEntries(entries))
            }
        }

        deserializer.deserialize_map(EntriesVisitor)
    }
}
