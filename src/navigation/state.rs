//! Screen state machine
//!
//! Startup is a single decision made from the splash screen:
//! - Splash → DoctorHome    (logged in as doctor)
//! - Splash → PatientHome   (logged in as patient)
//! - Splash → Login         (logged out, onboarding already seen)
//! - Splash → Onboarding    (otherwise)
//!
//! The remaining edges are user-driven and only used by front-ends:
//! - Onboarding → Login         (on: OnboardingFinished)
//! - Login      → role home     (on: LoggedIn)
//! - role home  → Login         (on: LoggedOut)

use crate::errors::{ClinicError, Result};
use crate::session::{Role, Session};
use serde::{Deserialize, Serialize};

/// Top-level screens
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Screen {
    Splash,
    Onboarding,
    Login,
    DoctorHome,
    PatientHome,
}

/// Events that move between screens
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavigationEvent {
    /// Splash delay finished with the restored session
    SplashElapsed(Session),
    OnboardingFinished,
    LoggedIn(Role),
    LoggedOut,
}

/// Startup decision; depends only on the session flags
pub fn resolve(session: &Session) -> Screen {
    match session.active_role() {
        Some(role) => Screen::home_for(role),
        None if session.has_seen_onboarding => Screen::Login,
        None => Screen::Onboarding,
    }
}

impl Screen {
    pub fn home_for(role: Role) -> Screen {
        match role {
            Role::Doctor => Screen::DoctorHome,
            Role::Patient => Screen::PatientHome,
        }
    }

    /// No automatic transition leaves these screens
    pub fn is_terminal(&self) -> bool {
        !matches!(self, Screen::Splash)
    }

    pub fn transition(&self, event: NavigationEvent) -> Result<Screen> {
        use NavigationEvent::*;
        use Screen::*;

        let next = match (self, event) {
            (Splash, SplashElapsed(session)) => resolve(&session),

            // the splash timer may fire after the user already moved on
            (screen, SplashElapsed(_)) => *screen,

            (Onboarding, OnboardingFinished) => Login,
            (Login, LoggedIn(role)) => Screen::home_for(role),
            (DoctorHome | PatientHome, LoggedOut) => Login,

            (from, event) => {
                return Err(ClinicError::InvalidTransition {
                    from: format!("{:?}", from),
                    event: format!("{:?}", event),
                    reason: format!("{} does not handle this event", from.display_name()),
                });
            }
        };

        Ok(next)
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Screen::Splash => "Splash",
            Screen::Onboarding => "Onboarding",
            Screen::Login => "Login",
            Screen::DoctorHome => "Doctor Dashboard",
            Screen::PatientHome => "Patient Dashboard",
        }
    }

    /// Route path in the mobile app
    pub fn route(&self) -> &'static str {
        match self {
            Screen::Splash => "/splash",
            Screen::Onboarding => "/onboarding",
            Screen::Login => "/auth/login",
            Screen::DoctorHome => "/(doctor)/dashboard",
            Screen::PatientHome => "/(patient)/dashboard",
        }
    }
}
