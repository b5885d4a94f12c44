//! Occurrence status labels for a species within one region.
//!
//! The label text is what ends up in the distribution CSV, so `as_str` is
//! part of the output format and must not change.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ModelError;

/// How a species occurs in a single region.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum OccurrenceStatus {
    /// No record for the region.
    #[default]
    #[serde(rename = "missing")]
    Missing,
    #[serde(rename = "native")]
    Native,
    /// Native, and the species occurs nowhere else.
    #[serde(rename = "endemic")]
    Endemic,
    #[serde(rename = "introduced")]
    Introduced,
    #[serde(rename = "cultivated")]
    Cultivated,
    #[serde(rename = "naturalized")]
    Naturalized,
    #[serde(rename = "casual alien")]
    CasualAlien,
    #[serde(rename = "doubtfully present")]
    DoubtfullyPresent,
    #[serde(rename = "doubtfully native")]
    DoubtfullyNative,
    #[serde(rename = "presumably extinct")]
    PresumablyExtinct,
    /// Listed for the region in the literature, but the record is an error.
    #[serde(rename = "absent but reported in error")]
    ReportedInError,
    /// Mentioned for the region without any status marker.
    #[serde(rename = "undefined")]
    Undefined,
}

impl OccurrenceStatus {
    pub const ALL: [OccurrenceStatus; 12] = [
        OccurrenceStatus::Missing,
        OccurrenceStatus::Native,
        OccurrenceStatus::Endemic,
        OccurrenceStatus::Introduced,
        OccurrenceStatus::Cultivated,
        OccurrenceStatus::Naturalized,
        OccurrenceStatus::CasualAlien,
        OccurrenceStatus::DoubtfullyPresent,
        OccurrenceStatus::DoubtfullyNative,
        OccurrenceStatus::PresumablyExtinct,
        OccurrenceStatus::ReportedInError,
        OccurrenceStatus::Undefined,
    ];

    /// Returns the label written to output files.
    pub fn as_str(&self) -> &'static str {
        match self {
            OccurrenceStatus::Missing => "missing",
            OccurrenceStatus::Native => "native",
            OccurrenceStatus::Endemic => "endemic",
            OccurrenceStatus::Introduced => "introduced",
            OccurrenceStatus::Cultivated => "cultivated",
            OccurrenceStatus::Naturalized => "naturalized",
            OccurrenceStatus::CasualAlien => "casual alien",
            OccurrenceStatus::DoubtfullyPresent => "doubtfully present",
            OccurrenceStatus::DoubtfullyNative => "doubtfully native",
            OccurrenceStatus::PresumablyExtinct => "presumably extinct",
            OccurrenceStatus::ReportedInError => "absent but reported in error",
            OccurrenceStatus::Undefined => "undefined",
        }
    }

    /// Returns true when the species is recorded as growing in the region
    /// without human introduction.
    pub fn is_native(&self) -> bool {
        matches!(self, OccurrenceStatus::Native | OccurrenceStatus::Endemic)
    }

    /// Returns true for the statuses produced from bracketed (introduced) segments.
    pub fn is_introduced(&self) -> bool {
        matches!(
            self,
            OccurrenceStatus::Introduced
                | OccurrenceStatus::Cultivated
                | OccurrenceStatus::Naturalized
                | OccurrenceStatus::CasualAlien
        )
    }
}

impl fmt::Display for OccurrenceStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for OccurrenceStatus {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase();
        OccurrenceStatus::ALL
            .iter()
            .copied()
            .find(|status| status.as_str() == normalized)
            .ok_or_else(|| ModelError::UnknownStatus(s.to_string()))
    }
}
