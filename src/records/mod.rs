//! Patient and treatment records
//!
//! Components:
//! - Types: Patient, Treatment, fixed-format clinic dates
//! - Repository: in-memory snapshot with lookup, join and filter queries
//! - Filter: tagged roster filter (location tab or free-text search)
//! - Timeline: newest-first session view, photo comparison, reports
//! - Schedule: appointments and treatment-plan progress
//! - Validation: new-patient and photo-upload form checks
//! - Seed: sample roster

pub mod filter;
pub mod repository;
pub mod schedule;
pub mod seed;
pub mod timeline;
pub mod types;
pub mod validation;

pub use filter::PatientFilter;
pub use repository::{RecordRepository, RosterStats};
pub use schedule::{Appointment, TreatmentPlan, TreatmentProgress};
pub use timeline::{sort_treatments_by_date_descending, PhotoComparison, Report, Timeline};
pub use types::{ClinicDate, Gender, Location, Patient, Treatment, TreatmentImage};
pub use validation::{NewPatientForm, NewTreatmentForm, PatientDraft, PhotoAngle, TreatmentDraft};
