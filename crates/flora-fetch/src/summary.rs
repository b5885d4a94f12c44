//! Run bookkeeping shared by the fetchers.

use chrono::Local;

/// Outcome counts of one fetch run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSummary {
    /// Rows written to the output.
    pub written: usize,
    /// Taxa passed over without a request failure (already fetched, no data).
    pub skipped: usize,
    /// Taxa whose request or response failed.
    pub failed: usize,
}

impl RunSummary {
    #[must_use]
    pub fn has_failures(&self) -> bool {
        self.failed > 0
    }
}

/// Local time of a fetch in RFC 3339 form, used for `date_fetched`.
pub fn fetched_at() -> String {
    Local::now().to_rfc3339()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_has_failures() {
        let mut summary = RunSummary::default();
        assert!(!summary.has_failures());
        summary.failed = 1;
        assert!(summary.has_failures());
    }

    #[test]
    fn test_fetched_at_is_rfc3339() {
        let stamp = fetched_at();
        assert!(chrono::DateTime::parse_from_rfc3339(&stamp).is_ok());
    }
}
