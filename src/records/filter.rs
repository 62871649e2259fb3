//! Patient list filters
//!
//! Dashboard location tabs and the search box both reduce to a
//! [`PatientFilter`] value instead of ad hoc string flags.

use super::types::{Location, Patient};
use crate::errors::Result;

/// Which patients a roster view shows
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum PatientFilter {
    /// Unfiltered roster
    #[default]
    All,
    /// Patients registered at one clinic
    ByLocation(Location),
    /// Name or phone contains the text (case-insensitive)
    ByText(String),
}

impl PatientFilter {
    /// Search box input; blank text shows the full roster
    pub fn search(query: &str) -> Self {
        let trimmed = query.trim();
        if trimmed.is_empty() {
            PatientFilter::All
        } else {
            PatientFilter::ByText(trimmed.to_string())
        }
    }

    /// Dashboard tab value: `"all"` or a location name in any case
    pub fn from_location_str(tab: &str) -> Result<Self> {
        if tab.trim().eq_ignore_ascii_case("all") {
            return Ok(PatientFilter::All);
        }
        Ok(PatientFilter::ByLocation(tab.parse()?))
    }

    pub fn matches(&self, patient: &Patient) -> bool {
        match self {
            PatientFilter::All => true,
            PatientFilter::ByLocation(location) => patient.location == *location,
            PatientFilter::ByText(text) => {
                let needle = text.trim().to_lowercase();
                needle.is_empty()
                    || patient.name.to_lowercase().contains(&needle)
                    || patient.phone.to_lowercase().contains(&needle)
            }
        }
    }
}
