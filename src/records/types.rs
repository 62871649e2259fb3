//! Core data types for patient and treatment records

use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

use crate::errors::{ClinicError, Result};

/// Fixed textual date format used at data entry, e.g. `10 Jun 2024`
pub const CLINIC_DATE_FORMAT: &str = "%d %b %Y";

/// Output form of [`CLINIC_DATE_FORMAT`] without zero padding
const CLINIC_DATE_DISPLAY: &str = "%-d %b %Y";

/// Calendar date attached to a record
///
/// Parsed once from `"<day> <Mon> <year>"` text when a record is created,
/// so ordering never depends on locale-aware parsing of display strings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ClinicDate(NaiveDate);

impl ClinicDate {
    /// Parse a date in the clinic format (`8 Jun 2024` or `08 Jun 2024`)
    pub fn parse(value: &str) -> Result<Self> {
        NaiveDate::parse_from_str(value.trim(), CLINIC_DATE_FORMAT)
            .map(ClinicDate)
            .map_err(|_| ClinicError::InvalidDate {
                value: value.to_string(),
                expected: "10 Jun 2024".to_string(),
            })
    }

    /// Today's date on the local clock
    pub fn today() -> Self {
        ClinicDate(chrono::Local::now().date_naive())
    }

    pub fn as_naive(&self) -> NaiveDate {
        self.0
    }
}

impl fmt::Display for ClinicDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format(CLINIC_DATE_DISPLAY))
    }
}

impl FromStr for ClinicDate {
    type Err = ClinicError;

    fn from_str(s: &str) -> Result<Self> {
        ClinicDate::parse(s)
    }
}

impl Serialize for ClinicDate {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for ClinicDate {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        ClinicDate::parse(&raw).map_err(serde::de::Error::custom)
    }
}

/// Patient gender as recorded on the registration form
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Gender {
    Male,
    Female,
    Other,
}

impl Gender {
    pub const ALL: [Gender; 3] = [Gender::Male, Gender::Female, Gender::Other];

    pub fn as_str(&self) -> &'static str {
        match self {
            Gender::Male => "Male",
            Gender::Female => "Female",
            Gender::Other => "Other",
        }
    }
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl FromStr for Gender {
    type Err = ClinicError;

    fn from_str(s: &str) -> Result<Self> {
        let wanted = s.trim();
        Gender::ALL
            .into_iter()
            .find(|g| g.as_str().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| ClinicError::validation("gender", format!("Unknown gender '{}'", s)))
    }
}

/// Clinic branch a patient is registered at
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Location {
    Nashik,
    Pune,
    Bhusawal,
}

impl Location {
    pub const ALL: [Location; 3] = [Location::Nashik, Location::Pune, Location::Bhusawal];

    pub fn as_str(&self) -> &'static str {
        match self {
            Location::Nashik => "Nashik",
            Location::Pune => "Pune",
            Location::Bhusawal => "Bhusawal",
        }
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl FromStr for Location {
    type Err = ClinicError;

    /// Case-insensitive: `"nashik"`, `"NASHIK"` and `"Nashik"` are equal
    fn from_str(s: &str) -> Result<Self> {
        let wanted = s.trim();
        Location::ALL
            .into_iter()
            .find(|l| l.as_str().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| ClinicError::InvalidLocation(s.to_string()))
    }
}

/// Registered clinic patient
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Patient {
    pub id: String,
    pub name: String,
    pub age: u32,
    pub gender: Gender,
    pub phone: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    pub location: Location,
    pub registered_date: ClinicDate,
    pub last_visit: ClinicDate,
    #[serde(default)]
    pub notes: String,
}

impl Patient {
    /// Initial shown in avatar placeholders
    pub fn initial(&self) -> Option<char> {
        self.name.chars().next()
    }
}

/// Labelled photo taken during a treatment session
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TreatmentImage {
    pub label: String,
    pub url: String,
}

impl TreatmentImage {
    pub fn new(label: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            url: url.into(),
        }
    }
}

/// Single clinical visit for one patient
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Treatment {
    pub id: String,
    pub patient_id: String,
    pub date: ClinicDate,
    #[serde(rename = "type")]
    pub treatment_type: String,
    #[serde(default)]
    pub notes: String,
    /// Display order matters: the first image is the thumbnail
    #[serde(default)]
    pub images: Vec<TreatmentImage>,
}

impl Treatment {
    /// Thumbnail image, if the session has any photos
    pub fn primary_image(&self) -> Option<&TreatmentImage> {
        self.images.first()
    }
}
