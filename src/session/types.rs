//! Session value types

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::errors::{ClinicError, Result};

/// Which screen set a logged-in user can reach
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Doctor,
    Patient,
}

impl Role {
    /// Value stored under the `userRole` key
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Doctor => "doctor",
            Role::Patient => "patient",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl FromStr for Role {
    type Err = ClinicError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "doctor" => Ok(Role::Doctor),
            "patient" => Ok(Role::Patient),
            _ => Err(ClinicError::InvalidRole(s.to_string())),
        }
    }
}

/// Snapshot of who is using the device
///
/// `role` is `None` whenever `is_logged_in` is false.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Session {
    pub is_logged_in: bool,
    pub role: Option<Role>,
    pub has_seen_onboarding: bool,
}

impl Session {
    pub fn logged_out(has_seen_onboarding: bool) -> Self {
        Self {
            is_logged_in: false,
            role: None,
            has_seen_onboarding,
        }
    }

    pub fn logged_in(role: Role, has_seen_onboarding: bool) -> Self {
        Self {
            is_logged_in: true,
            role: Some(role),
            has_seen_onboarding,
        }
    }

    /// Role of a logged-in session
    pub fn active_role(&self) -> Option<Role> {
        if self.is_logged_in {
            self.role
        } else {
            None
        }
    }

    /// Whether this session may open `patient_id`'s records
    ///
    /// Doctors see every patient; a patient session sees only
    /// `own_patient_id`.
    pub fn check_patient_access(&self, own_patient_id: &str, patient_id: &str) -> Result<()> {
        match self.active_role() {
            Some(Role::Doctor) => Ok(()),
            Some(Role::Patient) if patient_id == own_patient_id => Ok(()),
            Some(Role::Patient) => Err(ClinicError::AccessDenied(
                "You can only view your own treatment records".to_string(),
            )),
            None => Err(ClinicError::AccessDenied("Please log in first".to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_round_trip() {
        for role in [Role::Doctor, Role::Patient] {
            assert_eq!(role.as_str().parse::<Role>().unwrap(), role);
        }
        assert_eq!("Doctor".parse::<Role>().unwrap(), Role::Doctor);
        assert!("nurse".parse::<Role>().is_err());
    }

    #[test]
    fn test_default_session_is_logged_out() {
        let session = Session::default();
        assert!(!session.is_logged_in);
        assert!(session.role.is_none());
        assert!(!session.has_seen_onboarding);
    }

    #[test]
    fn test_patient_sees_only_own_records() {
        let patient = Session::logged_in(Role::Patient, true);
        assert!(patient.check_patient_access("p1", "p1").is_ok());

        let err = patient.check_patient_access("p1", "p3").unwrap_err();
        assert!(matches!(err, ClinicError::AccessDenied(_)));
        assert!(err.is_recoverable());

        let doctor = Session::logged_in(Role::Doctor, true);
        assert!(doctor.check_patient_access("p1", "p3").is_ok());

        assert!(Session::logged_out(true).check_patient_access("p1", "p1").is_err());
    }

    #[test]
    fn test_active_role_requires_login() {
        let session = Session {
            is_logged_in: false,
            role: Some(Role::Doctor),
            has_seen_onboarding: true,
        };
        assert_eq!(session.active_role(), None);
        assert_eq!(
            Session::logged_in(Role::Doctor, false).active_role(),
            Some(Role::Doctor)
        );
    }
}
