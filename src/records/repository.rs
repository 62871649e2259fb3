//! In-memory record repository
//!
//! Read-only queries over a snapshot of patients and treatments. The
//! snapshot is checked once on construction: patient ids and treatment
//! ids are unique, every patient has a name, a phone and a positive age,
//! and every treatment points at a known patient.

use std::collections::{BTreeMap, HashSet};

use tracing::debug;

use super::filter::PatientFilter;
use super::schedule::{self, Appointment, TreatmentPlan, TreatmentProgress};
use super::seed;
use super::timeline::Timeline;
use super::types::{ClinicDate, Location, Patient, Treatment};
use crate::errors::{ClinicError, Result};

/// Dashboard header numbers
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RosterStats {
    pub total_patients: usize,
    pub total_treatments: usize,
    pub by_location: BTreeMap<Location, usize>,
}

fn check_required_fields(patient: &Patient) -> Result<()> {
    let missing = if patient.id.trim().is_empty() {
        Some("id")
    } else if patient.name.trim().is_empty() {
        Some("name")
    } else if patient.phone.trim().is_empty() {
        Some("phone")
    } else {
        None
    };
    if let Some(field) = missing {
        return Err(ClinicError::Integrity(format!(
            "patient '{}' has an empty {}",
            patient.id, field
        )));
    }
    if patient.age == 0 {
        return Err(ClinicError::Integrity(format!(
            "patient '{}' must have a positive age",
            patient.id
        )));
    }
    Ok(())
}

/// Patient and treatment records held in memory
#[derive(Debug, Clone, Default)]
pub struct RecordRepository {
    patients: Vec<Patient>,
    treatments: Vec<Treatment>,
    appointments: Vec<Appointment>,
    plans: Vec<TreatmentPlan>,
}

impl RecordRepository {
    /// Build a repository, rejecting duplicate ids and orphan treatments
    pub fn new(patients: Vec<Patient>, treatments: Vec<Treatment>) -> Result<Self> {
        let mut patient_ids = HashSet::new();
        for patient in &patients {
            check_required_fields(patient)?;
            if !patient_ids.insert(patient.id.as_str()) {
                return Err(ClinicError::Integrity(format!(
                    "duplicate patient id '{}'",
                    patient.id
                )));
            }
        }

        let mut treatment_ids = HashSet::new();
        for treatment in &treatments {
            if !treatment_ids.insert(treatment.id.as_str()) {
                return Err(ClinicError::Integrity(format!(
                    "duplicate treatment id '{}'",
                    treatment.id
                )));
            }
            if !patient_ids.contains(treatment.patient_id.as_str()) {
                return Err(ClinicError::Integrity(format!(
                    "treatment '{}' references unknown patient '{}'",
                    treatment.id, treatment.patient_id
                )));
            }
        }

        debug!(
            patients = patients.len(),
            treatments = treatments.len(),
            "record snapshot loaded"
        );

        Ok(Self {
            patients,
            treatments,
            ..Default::default()
        })
    }

    /// Attach appointments and treatment plans; both must name known patients
    pub fn with_schedule(
        mut self,
        appointments: Vec<Appointment>,
        plans: Vec<TreatmentPlan>,
    ) -> Result<Self> {
        let mut appointment_ids = HashSet::new();
        for appointment in &appointments {
            if !appointment_ids.insert(appointment.id.as_str()) {
                return Err(ClinicError::Integrity(format!(
                    "duplicate appointment id '{}'",
                    appointment.id
                )));
            }
            self.check_patient_ref("appointment", &appointment.id, &appointment.patient_id)?;
        }

        let mut planned = HashSet::new();
        for plan in &plans {
            self.check_patient_ref("treatment plan", &plan.patient_id, &plan.patient_id)?;
            if !planned.insert(plan.patient_id.as_str()) {
                return Err(ClinicError::Integrity(format!(
                    "more than one treatment plan for '{}'",
                    plan.patient_id
                )));
            }
        }

        self.appointments = appointments;
        self.plans = plans;
        Ok(self)
    }

    fn check_patient_ref(&self, kind: &str, id: &str, patient_id: &str) -> Result<()> {
        if self.find_patient_by_id(patient_id).is_none() {
            return Err(ClinicError::Integrity(format!(
                "{} '{}' references unknown patient '{}'",
                kind, id, patient_id
            )));
        }
        Ok(())
    }

    /// Repository preloaded with the clinic's sample data
    pub fn seeded() -> Result<Self> {
        Self::new(seed::sample_patients()?, seed::sample_treatments()?)?
            .with_schedule(seed::sample_appointments()?, seed::sample_treatment_plans())
    }

    pub fn patients(&self) -> &[Patient] {
        &self.patients
    }

    pub fn treatments(&self) -> &[Treatment] {
        &self.treatments
    }

    pub fn find_patient_by_id(&self, id: &str) -> Option<&Patient> {
        self.patients.iter().find(|p| p.id == id)
    }

    /// Like [`find_patient_by_id`](Self::find_patient_by_id) but with a
    /// `NotFound` error for callers that propagate with `?`
    pub fn get_patient(&self, id: &str) -> Result<&Patient> {
        self.find_patient_by_id(id)
            .ok_or_else(|| ClinicError::NotFound {
                entity: "Patient",
                id: id.to_string(),
            })
    }

    /// Treatments for a patient in input order; unknown ids yield an empty list
    pub fn list_treatments_for_patient(&self, id: &str) -> Vec<&Treatment> {
        self.treatments.iter().filter(|t| t.patient_id == id).collect()
    }

    /// Roster view for a filter; original order is preserved
    pub fn filter_patients(&self, filter: &PatientFilter) -> Vec<&Patient> {
        let hits: Vec<&Patient> = self.patients.iter().filter(|p| filter.matches(p)).collect();
        debug!(?filter, hits = hits.len(), "patients filtered");
        hits
    }

    /// Patient's sessions sorted newest first
    pub fn timeline_for_patient(&self, id: &str) -> Timeline<'_> {
        Timeline::new(self.treatments.iter().filter(|t| t.patient_id == id))
    }

    /// Patient's appointments on or after `from`, earliest first
    pub fn upcoming_appointments(&self, id: &str, from: ClinicDate) -> Vec<&Appointment> {
        schedule::upcoming(self.appointments.iter().filter(|a| a.patient_id == id), from)
    }

    pub fn next_appointment(&self, id: &str, from: ClinicDate) -> Option<&Appointment> {
        self.upcoming_appointments(id, from).into_iter().next()
    }

    /// Recorded sessions against the planned course; `None` without a plan
    pub fn treatment_progress(&self, id: &str) -> Option<TreatmentProgress> {
        let plan = self.plans.iter().find(|p| p.patient_id == id)?;
        let completed = self.treatments.iter().filter(|t| t.patient_id == id).count();
        Some(TreatmentProgress {
            completed: u32::try_from(completed).unwrap_or(u32::MAX),
            total: plan.planned_sessions,
        })
    }

    pub fn stats(&self) -> RosterStats {
        let mut by_location = BTreeMap::new();
        for patient in &self.patients {
            *by_location.entry(patient.location).or_insert(0) += 1;
        }
        RosterStats {
            total_patients: self.patients.len(),
            total_treatments: self.treatments.len(),
            by_location,
        }
    }
}
