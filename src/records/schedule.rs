//! Appointments and treatment plans shown on the patient dashboard

use chrono::NaiveTime;
use serde::{Deserialize, Serialize};

use super::types::ClinicDate;
use crate::errors::{ClinicError, Result};

/// Clock format used on appointment cards, e.g. `10:30 AM`
pub const APPOINTMENT_TIME_FORMAT: &str = "%I:%M %p";

/// Booked clinic visit
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Appointment {
    pub id: String,
    pub patient_id: String,
    pub date: ClinicDate,
    pub time: NaiveTime,
    pub doctor: String,
    #[serde(rename = "type")]
    pub appointment_type: String,
}

impl Appointment {
    /// Parse a card time such as `2:00 PM`
    pub fn parse_time(value: &str) -> Result<NaiveTime> {
        NaiveTime::parse_from_str(value.trim(), APPOINTMENT_TIME_FORMAT).map_err(|_| {
            ClinicError::InvalidDate {
                value: value.to_string(),
                expected: "10:30 AM".to_string(),
            }
        })
    }

    /// `10:30 AM` style label without zero padding
    pub fn time_label(&self) -> String {
        self.time.format("%-I:%M %p").to_string()
    }
}

/// Number of sessions a patient's treatment course is planned for
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TreatmentPlan {
    pub patient_id: String,
    pub planned_sessions: u32,
}

/// Completed against planned sessions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TreatmentProgress {
    pub completed: u32,
    pub total: u32,
}

impl TreatmentProgress {
    /// Completed share in whole percent, capped at 100
    pub fn percent(&self) -> u32 {
        if self.total == 0 {
            return 0;
        }
        (self.completed.min(self.total) * 100) / self.total
    }
}

/// Appointments on or after `from`, earliest first; same-slot entries keep input order
pub fn upcoming<'a, I>(appointments: I, from: ClinicDate) -> Vec<&'a Appointment>
where
    I: IntoIterator<Item = &'a Appointment>,
{
    let mut list: Vec<&Appointment> = appointments.into_iter().filter(|a| a.date >= from).collect();
    list.sort_by_key(|a| (a.date, a.time));
    list
}
