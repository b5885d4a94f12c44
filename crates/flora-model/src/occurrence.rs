use std::collections::BTreeMap;

use crate::catalog::RegionCatalog;
use crate::status::OccurrenceStatus;

/// Resolved status per region code for one species.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Occurrence {
    statuses: BTreeMap<String, OccurrenceStatus>,
}

impl Occurrence {
    /// Every catalog code set to [`OccurrenceStatus::Missing`].
    pub fn seeded(catalog: &RegionCatalog) -> Self {
        let statuses = catalog
            .codes()
            .map(|code| (code.to_string(), OccurrenceStatus::Missing))
            .collect();
        Self { statuses }
    }

    /// Set the status of a code, replacing any earlier status.
    pub fn set(&mut self, code: impl Into<String>, status: OccurrenceStatus) {
        self.statuses.insert(code.into(), status);
    }

    pub fn get(&self, code: &str) -> Option<OccurrenceStatus> {
        self.statuses.get(code).copied()
    }

    /// Drop every code the catalog does not know.
    pub fn retain_catalog(&mut self, catalog: &RegionCatalog) {
        self.statuses.retain(|code, _| catalog.contains(code));
    }

    pub fn len(&self) -> usize {
        self.statuses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.statuses.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, OccurrenceStatus)> {
        self.statuses
            .iter()
            .map(|(code, status)| (code.as_str(), *status))
    }

    /// Status labels in catalog order, `missing` for codes without an entry.
    pub fn labels(&self, catalog: &RegionCatalog) -> Vec<&'static str> {
        catalog
            .codes()
            .map(|code| self.get(code).unwrap_or_default().as_str())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn catalog() -> RegionCatalog {
        RegionCatalog::new([("Gr", "Greece"), ("Al", "Albania")]).unwrap()
    }

    #[test]
    fn test_retain_is_idempotent() {
        let catalog = catalog();
        let mut occurrence = Occurrence::seeded(&catalog);
        occurrence.set("Gr", OccurrenceStatus::Native);
        occurrence.set("Xx", OccurrenceStatus::Native);
        occurrence.retain_catalog(&catalog);
        let once = occurrence.clone();
        occurrence.retain_catalog(&catalog);
        assert_eq!(once, occurrence);
        assert_eq!(occurrence.len(), 2);
        assert_eq!(occurrence.get("Xx"), None);
    }

    #[test]
    fn test_labels_follow_catalog_order() {
        let catalog = catalog();
        let mut occurrence = Occurrence::default();
        occurrence.set("Al", OccurrenceStatus::Cultivated);
        assert_eq!(occurrence.labels(&catalog), vec!["missing", "cultivated"]);
    }
}
