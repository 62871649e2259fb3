//! Form checks for the "new patient" and "upload photos" screens
//!
//! Validated drafts are handed back to the UI; nothing is persisted.

use std::collections::BTreeMap;

use super::repository::RecordRepository;
use super::types::{ClinicDate, Gender, Location, TreatmentImage};
use crate::errors::{ClinicError, Result};

pub const MISSING_REQUIRED: &str = "Please fill all required fields";

/// Raw input of the registration form
#[derive(Debug, Clone, Default)]
pub struct NewPatientForm {
    pub name: String,
    pub age: String,
    pub gender: String,
    pub phone: String,
    pub email: String,
    pub location: String,
    pub notes: String,
}

/// Registration data that passed validation
#[derive(Debug, Clone, PartialEq)]
pub struct PatientDraft {
    pub name: String,
    pub age: u32,
    pub gender: Gender,
    pub phone: String,
    pub email: Option<String>,
    pub location: Location,
    pub notes: String,
}

impl NewPatientForm {
    /// Check required fields; `locations` are the clinics accepting patients
    pub fn validate(&self, locations: &[Location]) -> Result<PatientDraft> {
        let required = [
            ("name", &self.name),
            ("age", &self.age),
            ("gender", &self.gender),
            ("phone", &self.phone),
            ("location", &self.location),
        ];
        if let Some((field, _)) = required.iter().find(|(_, value)| value.trim().is_empty()) {
            return Err(ClinicError::validation(*field, MISSING_REQUIRED));
        }

        let age = match self.age.trim().parse::<u32>() {
            Ok(age) if age > 0 => age,
            _ => return Err(ClinicError::validation("age", "Age must be a positive number")),
        };

        let gender: Gender = self.gender.parse()?;

        let location = self
            .location
            .parse::<Location>()
            .ok()
            .filter(|l| locations.contains(l))
            .ok_or_else(|| ClinicError::validation("location", "Please select a clinic location"))?;

        let email = Some(self.email.trim())
            .filter(|e| !e.is_empty())
            .map(str::to_string);

        Ok(PatientDraft {
            name: self.name.trim().to_string(),
            age,
            gender,
            phone: self.phone.trim().to_string(),
            email,
            location,
            notes: self.notes.trim().to_string(),
        })
    }
}

/// Camera angle slots on the upload screen
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum PhotoAngle {
    Front,
    Left,
    Right,
    Back,
}

impl PhotoAngle {
    pub const ALL: [PhotoAngle; 4] = [
        PhotoAngle::Front,
        PhotoAngle::Left,
        PhotoAngle::Right,
        PhotoAngle::Back,
    ];

    /// Name accepted on the command line, e.g. `front`
    pub fn key(&self) -> &'static str {
        match self {
            PhotoAngle::Front => "front",
            PhotoAngle::Left => "left",
            PhotoAngle::Right => "right",
            PhotoAngle::Back => "back",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            PhotoAngle::Front => "Front View",
            PhotoAngle::Left => "Left View",
            PhotoAngle::Right => "Right View",
            PhotoAngle::Back => "Back View",
        }
    }
}

impl std::str::FromStr for PhotoAngle {
    type Err = ClinicError;

    fn from_str(s: &str) -> Result<Self> {
        let wanted = s.trim();
        PhotoAngle::ALL
            .into_iter()
            .find(|angle| angle.key().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| {
                ClinicError::validation("photo", format!("Unknown photo angle '{}'", wanted))
            })
    }
}

/// Raw input of the photo upload screen
#[derive(Debug, Clone, Default)]
pub struct NewTreatmentForm {
    pub patient_id: String,
    pub treatment_type: String,
    pub notes: String,
    pub photos: BTreeMap<PhotoAngle, String>,
}

/// Session record that passed validation
#[derive(Debug, Clone, PartialEq)]
pub struct TreatmentDraft {
    pub patient_id: String,
    pub date: ClinicDate,
    pub treatment_type: String,
    pub notes: String,
    /// Front, left, right, back; empty slots skipped
    pub images: Vec<TreatmentImage>,
}

impl NewTreatmentForm {
    pub fn set_photo(&mut self, angle: PhotoAngle, url: impl Into<String>) {
        self.photos.insert(angle, url.into());
    }

    pub fn remove_photo(&mut self, angle: PhotoAngle) {
        self.photos.remove(&angle);
    }

    /// Check the form against the current records, dating it `date`
    pub fn validate(&self, records: &RecordRepository, date: ClinicDate) -> Result<TreatmentDraft> {
        records.get_patient(&self.patient_id)?;

        if self.photos.values().all(|url| url.trim().is_empty()) {
            return Err(ClinicError::validation("photos", "Please add at least one photo"));
        }

        let images = self
            .photos
            .iter()
            .filter(|(_, url)| !url.trim().is_empty())
            .map(|(angle, url)| TreatmentImage::new(angle.label(), url.trim()))
            .collect();

        let treatment_type = match self.treatment_type.trim() {
            "" => "Follow-up".to_string(),
            other => other.to_string(),
        };

        Ok(TreatmentDraft {
            patient_id: self.patient_id.clone(),
            date,
            treatment_type,
            notes: self.notes.trim().to_string(),
            images,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filled_form() -> NewPatientForm {
        NewPatientForm {
            name: " Meera Joshi ".to_string(),
            age: "31".to_string(),
            gender: "Female".to_string(),
            phone: "678-901-2345".to_string(),
            email: String::new(),
            location: "pune".to_string(),
            notes: String::new(),
        }
    }

    #[test]
    fn test_valid_patient_form() {
        let draft = filled_form().validate(&Location::ALL).unwrap();
        assert_eq!(draft.name, "Meera Joshi");
        assert_eq!(draft.age, 31);
        assert_eq!(draft.location, Location::Pune);
        assert!(draft.email.is_none());
    }

    #[test]
    fn test_missing_required_field() {
        let mut form = filled_form();
        form.phone = "  ".to_string();
        let err = form.validate(&Location::ALL).unwrap_err();
        assert_eq!(err.user_message(), MISSING_REQUIRED);
        assert!(matches!(err, ClinicError::Validation { ref field, .. } if field == "phone"));
    }

    #[test]
    fn test_age_must_be_positive() {
        let mut form = filled_form();
        form.age = "0".to_string();
        assert!(form.validate(&Location::ALL).is_err());
        form.age = "abc".to_string();
        assert!(form.validate(&Location::ALL).is_err());
    }

    #[test]
    fn test_location_must_be_offered() {
        let form = filled_form();
        assert!(form.validate(&[Location::Nashik]).is_err());
    }

    #[test]
    fn test_treatment_form_orders_images_by_angle() {
        let records = RecordRepository::seeded().unwrap();
        let mut form = NewTreatmentForm {
            patient_id: "p3".to_string(),
            ..Default::default()
        };
        form.set_photo(PhotoAngle::Back, "back.jpg");
        form.set_photo(PhotoAngle::Front, "front.jpg");

        let date = ClinicDate::parse("20 Jun 2024").unwrap();
        let draft = form.validate(&records, date).unwrap();
        let labels: Vec<_> = draft.images.iter().map(|i| i.label.as_str()).collect();
        assert_eq!(labels, vec!["Front View", "Back View"]);
        assert_eq!(draft.treatment_type, "Follow-up");
    }

    #[test]
    fn test_treatment_form_requires_photo_and_patient() {
        let records = RecordRepository::seeded().unwrap();
        let date = ClinicDate::parse("20 Jun 2024").unwrap();

        let mut form = NewTreatmentForm {
            patient_id: "p3".to_string(),
            ..Default::default()
        };
        assert!(matches!(
            form.validate(&records, date),
            Err(ClinicError::Validation { .. })
        ));

        form.set_photo(PhotoAngle::Left, "left.jpg");
        form.remove_photo(PhotoAngle::Left);
        assert!(form.validate(&records, date).is_err());

        form.set_photo(PhotoAngle::Left, "left.jpg");
        form.patient_id = "p404".to_string();
        assert!(matches!(
            form.validate(&records, date),
            Err(ClinicError::NotFound { .. })
        ));
    }

    #[test]
    fn test_photo_angle_parse() {
        assert_eq!("FRONT".parse::<PhotoAngle>().unwrap(), PhotoAngle::Front);
        assert!("top".parse::<PhotoAngle>().is_err());
    }
}
