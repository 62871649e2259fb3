//! Terminal rendering of the app screens
//!
//! Everything here only formats what the core already computed.

use colored::*;
use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

use crate::navigation::Screen;
use crate::records::{Appointment, Patient, RosterStats, Timeline, Treatment, TreatmentProgress};
use crate::session::Session;

/// Spinner shown for the splash delay
pub fn splash_spinner(clinic_name: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::default_spinner().template("{spinner:.cyan} {msg}") {
        pb.set_style(style);
    }
    pb.set_message(format!(
        "{} - Track your treatment. See your progress.",
        clinic_name
    ));
    pb.enable_steady_tick(Duration::from_millis(100));
    pb
}

pub fn banner(title: &str) {
    let width = 56;
    println!("\n{}", "=".repeat(width).cyan());
    println!("  {}", title.bold().cyan());
    println!("{}\n", "=".repeat(width).cyan());
}

pub fn show_error(message: &str) {
    eprintln!("{} {}", "✗".red(), message.red());
}

pub fn show_success(message: &str) {
    println!("{} {}", "✓".green(), message);
}

pub fn show_info(message: &str) {
    println!("{} {}", "ℹ".blue(), message.dimmed());
}

pub fn show_session(session: &Session) {
    let role = session
        .active_role()
        .map(|r| r.to_string())
        .unwrap_or_else(|| "none".to_string());
    println!("  Logged in:  {}", session.is_logged_in);
    println!("  Role:       {}", role);
    println!("  Onboarding: {}", if session.has_seen_onboarding { "seen" } else { "not seen" });
}

/// One roster row: name, demographics, location, phone, last visit
pub fn patient_line(patient: &Patient) -> String {
    format!(
        "{:<4} {:<16} {:>3} yrs, {:<6}  {:<9} {:<13} Last visit: {}",
        patient.id,
        patient.name,
        patient.age,
        patient.gender,
        patient.location,
        patient.phone,
        patient.last_visit
    )
}

pub fn show_roster(stats: &RosterStats, patients: &[&Patient]) {
    println!(
        "{} patients, {} treatment sessions",
        stats.total_patients.to_string().bold(),
        stats.total_treatments.to_string().bold()
    );
    let per_location: Vec<String> = stats
        .by_location
        .iter()
        .map(|(location, count)| format!("{}: {}", location, count))
        .collect();
    println!("{}\n", per_location.join(" | ").dimmed());

    if patients.is_empty() {
        println!("  No patients found");
        return;
    }
    for patient in patients {
        println!("  {}", patient_line(patient));
    }
}

pub fn show_patient(patient: &Patient, treatments: &[&Treatment]) {
    banner(&patient.name);
    println!("  {} yrs, {}", patient.age, patient.gender);
    println!("  Phone:      {}", patient.phone);
    if let Some(email) = &patient.email {
        println!("  Email:      {}", email);
    }
    println!("  Location:   {}", patient.location);
    println!("  Registered: {}", patient.registered_date);
    println!("  Last visit: {}", patient.last_visit);
    if !patient.notes.is_empty() {
        println!("\n  {}", patient.notes.dimmed());
    }

    println!("\n{}", "Treatment History".bold());
    if treatments.is_empty() {
        println!("  No treatments recorded");
    }
    for treatment in treatments {
        println!("  {}  {}", treatment.date, treatment.treatment_type.bold());
        for image in &treatment.images {
            println!("      {}: {}", image.label, image.url.dimmed());
        }
    }
}

/// Patient dashboard header: next appointment, upcoming list, course progress
pub fn show_patient_home(
    patient: &Patient,
    upcoming: &[&Appointment],
    progress: Option<TreatmentProgress>,
) {
    let avatar = patient.initial().map(|c| format!("({}) ", c)).unwrap_or_default();
    banner(&format!("{}Hello, {}", avatar, patient.name));

    println!("{}", "Next Appointment".bold());
    match upcoming.first() {
        Some(next) => println!(
            "  {}  {}  {} with {}",
            next.date.to_string().cyan(),
            next.time_label(),
            next.appointment_type.bold(),
            next.doctor
        ),
        None => println!("  No upcoming appointments"),
    }
    if upcoming.len() > 1 {
        println!("\n{}", "Upcoming Appointments".bold());
        for appointment in upcoming {
            println!("  {}", appointment_line(appointment));
        }
    }

    if let Some(progress) = progress {
        println!("\n{}", "Treatment Progress".bold());
        println!(
            "  {}/{} Sessions Completed ({}%)",
            progress.completed, progress.total, progress.percent()
        );
    }
}

pub fn appointment_line(appointment: &Appointment) -> String {
    format!(
        "{:<12} {:>8}  {:<18} {}",
        appointment.date.to_string(),
        appointment.time_label(),
        appointment.appointment_type,
        appointment.doctor
    )
}

pub fn show_timeline(timeline: &Timeline<'_>) {
    banner("Treatment Timeline");
    if let Some((from, to)) = timeline.date_range() {
        println!("  {} - {}", from, to);
    }

    if let Some(comparison) = timeline.comparison() {
        println!("\n  {}", "Before / After".bold());
        println!("    Before: {}", comparison.before.url.dimmed());
        println!("    After:  {}", comparison.after.url.dimmed());
    }

    if timeline.is_empty() {
        println!("  No sessions yet");
        return;
    }

    for (index, treatment) in timeline.sessions().iter().enumerate() {
        println!(
            "\n  {} {}  {}",
            format!("[{}]", timeline.session_number(index)).cyan(),
            timeline.session_title(index).bold(),
            treatment.date
        );
        println!("      {}", treatment.treatment_type);
        if !treatment.notes.is_empty() {
            println!("      {}", treatment.notes.dimmed());
        }
    }
}

/// Short description of what a screen shows, for screens without data
pub fn show_screen(screen: Screen, clinic_name: &str) {
    match screen {
        Screen::Splash => println!("{}", clinic_name.bold()),
        Screen::Onboarding => {
            banner(&format!("Welcome to {}", clinic_name));
            println!("  The complete hair treatment management solution for clinics and patients.");
            println!("  Run `haircare onboarding` to continue.");
        }
        Screen::Login => {
            banner("Login");
            println!("  Run `haircare login --role <doctor|patient> --email <EMAIL> --password <PASSWORD>`");
        }
        Screen::DoctorHome | Screen::PatientHome => banner(screen.display_name()),
    }
}
