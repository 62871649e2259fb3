//! Command-line argument parsing for HairCare+
//!
//! Provides clap-based CLI with subcommands and verbosity control.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::records::ClinicDate;
use crate::session::Role;

/// HairCare+ - hair treatment clinic records in the terminal
#[derive(Parser, Debug)]
#[command(name = "haircare")]
#[command(version)]
#[command(about = "Patient rosters, treatment timelines and sessions for HairCare+ clinics", long_about = None)]
pub struct Args {
    /// Configuration file path
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Directory holding the session file (overrides config)
    #[arg(long, global = true)]
    pub state_dir: Option<PathBuf>,

    /// Verbosity level: -q (quiet), default (normal), -v (verbose), -vv (very verbose)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Quiet mode (errors only)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Date treated as today for appointment listings, e.g. "20 Jun 2024"
    #[arg(long, global = true, value_parser = parse_date)]
    pub today: Option<ClinicDate>,

    /// Subcommand
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Show the splash screen and open the screen for the stored session
    Start,

    /// Log in (any non-empty email and password are accepted)
    Login {
        #[arg(long, value_parser = parse_role, default_value = "patient")]
        role: Role,
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
    },

    /// Create an account, then log in
    Signup {
        #[arg(long)]
        name: String,
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
        #[arg(long, value_parser = parse_role, default_value = "patient")]
        role: Role,
    },

    /// Request a password reset email
    ForgotPassword {
        #[arg(long)]
        email: String,
    },

    /// Clear the stored session
    Logout,

    /// Finish onboarding on this device
    Onboarding,

    /// Patient roster (doctor only)
    Patients {
        /// Clinic tab: all, nashik, pune, bhusawal (default: all)
        #[arg(long)]
        location: Option<String>,
        /// Name or phone number fragment
        #[arg(long, conflicts_with = "location")]
        search: Option<String>,
    },

    /// Patient profile with treatment history (doctor only)
    Patient {
        /// Patient id, e.g. p1
        id: String,
    },

    /// Treatment timeline, newest first
    Timeline {
        id: String,
    },

    /// Downloadable session reports
    Downloads {
        id: String,
    },

    /// Validate a new patient registration (not saved)
    NewPatient {
        #[arg(long, default_value = "")]
        name: String,
        #[arg(long, default_value = "")]
        age: String,
        #[arg(long, default_value = "")]
        gender: String,
        #[arg(long, default_value = "")]
        phone: String,
        #[arg(long, default_value = "")]
        email: String,
        #[arg(long, default_value = "")]
        location: String,
        #[arg(long, default_value = "")]
        notes: String,
    },

    /// Validate a photo upload for a patient (not saved)
    UploadPhotos {
        id: String,
        /// angle=url, angle is front, left, right or back
        #[arg(long = "photo", value_name = "ANGLE=URL")]
        photos: Vec<String>,
        #[arg(long, default_value = "")]
        notes: String,
    },

    /// Display current configuration
    Config,

    /// Remove stored session state
    Clean,
}

fn parse_role(value: &str) -> Result<Role, String> {
    value.parse().map_err(|e: crate::errors::ClinicError| e.to_string())
}

fn parse_date(value: &str) -> Result<ClinicDate, String> {
    ClinicDate::parse(value).map_err(|e| e.to_string())
}

/// Verbosity level enum
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verbosity {
    Quiet,
    Normal,
    Verbose,
    VeryVerbose,
}

impl Args {
    /// Get verbosity level based on flags
    pub fn verbosity(&self) -> Verbosity {
        if self.quiet {
            Verbosity::Quiet
        } else {
            match self.verbose {
                0 => Verbosity::Normal,
                1 => Verbosity::Verbose,
                _ => Verbosity::VeryVerbose,
            }
        }
    }
}

impl Verbosity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Verbosity::Quiet => "quiet",
            Verbosity::Normal => "normal",
            Verbosity::Verbose => "verbose",
            Verbosity::VeryVerbose => "very_verbose",
        }
    }

    /// Log filter used when HAIRCARE_LOG is unset
    pub fn log_filter(&self) -> &'static str {
        match self {
            Verbosity::Quiet => "error",
            Verbosity::Normal => "warn",
            Verbosity::Verbose => "haircare=info",
            Verbosity::VeryVerbose => "haircare=debug",
        }
    }

    /// Check if should show the splash spinner
    pub fn show_progress(&self) -> bool {
        !matches!(self, Verbosity::Quiet)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(argv: &[&str]) -> Args {
        Args::try_parse_from(argv).unwrap()
    }

    #[test]
    fn test_verbosity_levels() {
        assert_eq!(parse(&["haircare", "-q"]).verbosity(), Verbosity::Quiet);
        assert_eq!(parse(&["haircare"]).verbosity(), Verbosity::Normal);
        assert_eq!(parse(&["haircare", "-v"]).verbosity(), Verbosity::Verbose);
        assert_eq!(parse(&["haircare", "-vv"]).verbosity(), Verbosity::VeryVerbose);
    }

    #[test]
    fn test_login_role_parsing() {
        let args = parse(&[
            "haircare", "login", "--role", "Doctor", "--email", "a@b.c", "--password", "pw",
        ]);
        match args.command {
            Some(Commands::Login { role, .. }) => assert_eq!(role, Role::Doctor),
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_login_rejects_unknown_role() {
        let result = Args::try_parse_from([
            "haircare", "login", "--role", "nurse", "--email", "a@b.c", "--password", "pw",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn test_global_state_dir_after_subcommand() {
        let args = parse(&["haircare", "logout", "--state-dir", "/tmp/hc"]);
        assert_eq!(args.state_dir, Some(PathBuf::from("/tmp/hc")));
    }

    #[test]
    fn test_upload_photos_collects_repeated_flags() {
        let args = parse(&[
            "haircare", "upload-photos", "p1", "--photo", "front=a.jpg", "--photo", "back=b.jpg",
        ]);
        match args.command {
            Some(Commands::UploadPhotos { id, photos, .. }) => {
                assert_eq!(id, "p1");
                assert_eq!(photos.len(), 2);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_search_and_location_conflict() {
        let result = Args::try_parse_from([
            "haircare", "patients", "--location", "pune", "--search", "raj",
        ]);
        assert!(result.is_err());

        match parse(&["haircare", "patients", "--search", "raj"]).command {
            Some(Commands::Patients { location, search }) => {
                assert_eq!(location, None);
                assert_eq!(search.as_deref(), Some("raj"));
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_today_override() {
        let args = parse(&["haircare", "start", "--today", "20 Jun 2024"]);
        assert_eq!(args.today.unwrap().to_string(), "20 Jun 2024");
        assert!(Args::try_parse_from(["haircare", "--today", "2024-06-20"]).is_err());
    }

    #[test]
    fn test_verbosity_methods() {
        assert!(!Verbosity::Quiet.show_progress());
        assert!(Verbosity::Normal.show_progress());
        assert_eq!(Verbosity::VeryVerbose.log_filter(), "haircare=debug");
    }
}
