//! HairCare+ clinic core
//!
//! Session handling, startup navigation and patient/treatment record
//! queries for a hair-treatment clinic app with doctor and patient views.
//!
//! # Architecture
//!
//! - **session**: persisted login flags, role, onboarding flag
//! - **records**: in-memory patients and treatments with filter/sort/join queries
//! - **navigation**: splash → onboarding / login / role dashboard decision
//!
//! Front-ends (the bundled terminal binary, or any UI) only render what
//! these modules compute.

pub mod errors;

// Re-export commonly used types
pub use errors::{ClinicError, Result};

pub mod navigation;
pub mod records;
pub mod session;

pub mod cli;
pub mod config;
pub mod display;
pub mod logging;
