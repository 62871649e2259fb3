//! Login, signup and password-reset forms
//!
//! Credentials are not verified anywhere: a form with every field filled
//! in is accepted. Only blank-field checks happen here.

use super::types::Role;
use crate::errors::{ClinicError, Result};

fn blank(value: &str) -> bool {
    value.trim().is_empty()
}

#[derive(Debug, Clone)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
    pub role: Role,
}

impl LoginForm {
    /// Role to log in with once the form is complete
    pub fn validate(&self) -> Result<Role> {
        if blank(&self.email) || blank(&self.password) {
            return Err(ClinicError::validation(
                "credentials",
                "Please enter both email and password",
            ));
        }
        Ok(self.role)
    }
}

#[derive(Debug, Clone)]
pub struct SignupForm {
    pub name: String,
    pub email: String,
    pub password: String,
    pub role: Role,
}

impl SignupForm {
    pub fn validate(&self) -> Result<()> {
        if blank(&self.name) || blank(&self.email) || blank(&self.password) {
            return Err(ClinicError::validation("signup", "Please fill all fields"));
        }
        Ok(())
    }
}

#[derive(Debug, Clone)]
pub struct ResetPasswordForm {
    pub email: String,
}

impl ResetPasswordForm {
    /// Confirmation text shown after a (simulated) reset request
    pub fn validate(&self) -> Result<String> {
        if blank(&self.email) {
            return Err(ClinicError::validation("email", "Please enter your email"));
        }
        Ok(format!(
            "We've sent password reset instructions to {}",
            self.email.trim()
        ))
    }
}
