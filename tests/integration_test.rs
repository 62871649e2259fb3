//! Integration tests for HairCare+
//!
//! Session lifecycle against a real session file, startup navigation and
//! the record queries a dashboard needs.

use haircare::{
    config::Config,
    navigation::{resolve, NavigationEvent, NavigationResolver, Screen},
    records::{
        sort_treatments_by_date_descending, ClinicDate, Location, PatientFilter, RecordRepository,
        TreatmentProgress,
    },
    session::{FileStore, KeyValueStore, MemoryStore, Role, Session, SessionManager},
};
use std::sync::Arc;
use std::time::Duration;
use tempfile::TempDir;

fn file_sessions(temp: &TempDir) -> SessionManager {
    SessionManager::new(Arc::new(FileStore::new(temp.path().join("session.json"))))
}

#[tokio::test]
async fn test_first_launch_flow() {
    let temp = TempDir::new().unwrap();
    let resolver = NavigationResolver::new(Duration::ZERO);

    // fresh device: onboarding first
    let mut sessions = file_sessions(&temp);
    assert_eq!(resolver.boot(&mut sessions).await, Screen::Onboarding);

    sessions.mark_onboarding_seen().await;
    let screen = Screen::Onboarding
        .transition(NavigationEvent::OnboardingFinished)
        .unwrap();
    assert_eq!(screen, Screen::Login);

    sessions.login(Role::Doctor).await.unwrap();
    let screen = screen.transition(NavigationEvent::LoggedIn(Role::Doctor)).unwrap();
    assert_eq!(screen, Screen::DoctorHome);

    // next launch reads everything back from disk
    let mut relaunched = file_sessions(&temp);
    assert_eq!(resolver.boot(&mut relaunched).await, Screen::DoctorHome);
    assert_eq!(relaunched.session(), Session::logged_in(Role::Doctor, true));
}

#[tokio::test]
async fn test_logout_then_restore_is_logged_out() {
    let temp = TempDir::new().unwrap();

    let mut sessions = file_sessions(&temp);
    sessions.restore().await;
    sessions.mark_onboarding_seen().await;
    sessions.login(Role::Patient).await.unwrap();
    sessions.logout().await;

    let mut relaunched = file_sessions(&temp);
    let session = relaunched.restore().await;
    assert!(!session.is_logged_in);
    assert_eq!(session.role, None);
    assert!(session.has_seen_onboarding);

    let resolver = NavigationResolver::new(Duration::ZERO);
    assert_eq!(resolver.boot(&mut relaunched).await, Screen::Login);
}

#[tokio::test]
async fn test_token_without_role_restores_as_patient() {
    let store = Arc::new(MemoryStore::new());
    store.set("userToken", "legacy-token").await.unwrap();

    let mut sessions = SessionManager::new(store);
    let session = sessions.restore().await;
    assert_eq!(session.active_role(), Some(Role::Patient));
    assert_eq!(resolve(&session), Screen::PatientHome);
}

#[tokio::test]
async fn test_corrupt_session_file_boots_to_onboarding() {
    let temp = TempDir::new().unwrap();
    std::fs::write(temp.path().join("session.json"), "not json").unwrap();

    let mut sessions = file_sessions(&temp);
    let resolver = NavigationResolver::new(Duration::ZERO);
    assert_eq!(resolver.boot(&mut sessions).await, Screen::Onboarding);
}

#[tokio::test]
async fn test_login_failure_keeps_previous_session() {
    let store = Arc::new(MemoryStore::new());
    let mut sessions = SessionManager::new(store.clone());
    sessions.restore().await;
    sessions.login(Role::Patient).await.unwrap();

    store.set_offline(true);
    assert!(sessions.login(Role::Doctor).await.is_err());
    assert_eq!(sessions.session().active_role(), Some(Role::Patient));
}

#[test]
fn test_navigation_resolution_table() {
    let cases = [
        (Session::logged_out(false), Screen::Onboarding),
        (Session::logged_out(true), Screen::Login),
        (Session::logged_in(Role::Doctor, false), Screen::DoctorHome),
        (Session::logged_in(Role::Doctor, true), Screen::DoctorHome),
        (Session::logged_in(Role::Patient, false), Screen::PatientHome),
        (Session::logged_in(Role::Patient, true), Screen::PatientHome),
    ];

    for (session, expected) in cases {
        assert_eq!(resolve(&session), expected, "{:?}", session);
    }
}

#[test]
fn test_every_patient_found_by_id() {
    let repo = RecordRepository::seeded().unwrap();
    for patient in repo.patients() {
        assert_eq!(repo.find_patient_by_id(&patient.id), Some(patient));
    }
    assert!(repo.find_patient_by_id("missing").is_none());
}

#[test]
fn test_every_treatment_listed_once_for_its_patient() {
    let repo = RecordRepository::seeded().unwrap();
    for treatment in repo.treatments() {
        let listed = repo.list_treatments_for_patient(&treatment.patient_id);
        let hits = listed.iter().filter(|t| t.id == treatment.id).count();
        assert_eq!(hits, 1, "{} listed {} times", treatment.id, hits);
    }
}

#[test]
fn test_blank_search_returns_full_roster_in_order() {
    let repo = RecordRepository::seeded().unwrap();
    let ids: Vec<&str> = repo
        .filter_patients(&PatientFilter::search(""))
        .iter()
        .map(|p| p.id.as_str())
        .collect();
    assert_eq!(ids, vec!["p1", "p2", "p3", "p4", "p5"]);
}

#[test]
fn test_nashik_tab_shows_only_nashik() {
    let repo = RecordRepository::seeded().unwrap();
    let filter = PatientFilter::from_location_str("nashik").unwrap();
    let patients = repo.filter_patients(&filter);

    let names: Vec<&str> = patients.iter().map(|p| p.name.as_str()).collect();
    assert_eq!(names, vec!["John Smith", "Raj Patel"]);
    assert!(patients.iter().all(|p| p.location == Location::Nashik));
}

#[test]
fn test_search_by_phone_fragment() {
    let repo = RecordRepository::seeded().unwrap();
    let patients = repo.filter_patients(&PatientFilter::search("345-678"));
    assert_eq!(patients.len(), 1);
    assert_eq!(patients[0].name, "Raj Patel");
}

#[test]
fn test_sort_is_idempotent() {
    let repo = RecordRepository::seeded().unwrap();
    let once = sort_treatments_by_date_descending(repo.treatments());
    let twice = sort_treatments_by_date_descending(once.iter().copied());
    assert_eq!(once, twice);

    let dates: Vec<String> = once.iter().map(|t| t.date.to_string()).collect();
    assert_eq!(dates[0], "12 Jun 2024");
    assert_eq!(dates[dates.len() - 1], "10 Apr 2024");
}

#[test]
fn test_patient_timeline() {
    let repo = RecordRepository::seeded().unwrap();
    let timeline = repo.timeline_for_patient("p1");

    assert_eq!(timeline.len(), 3);
    assert_eq!(timeline.session_title(0), "Latest Session");
    assert_eq!(timeline.session_title(2), "Session 1");
    assert!(timeline.comparison().is_some());

    let reports = timeline.reports();
    assert_eq!(reports[0].title, "Treatment Report - 10 Jun 2024");
}

#[test]
fn test_default_config_matches_app_defaults() {
    let config = Config::default();
    assert!(config.validate().is_ok());
    assert_eq!(
        NavigationResolver::from_config(&config.navigation).splash_delay(),
        Duration::from_millis(2000)
    );
    assert_eq!(config.clinic.locations.len(), 3);
}

#[test]
fn test_mark_onboarding_seen_blocking() {
    let store = Arc::new(MemoryStore::new());
    let mut sessions = SessionManager::new(store.clone());

    let session = tokio_test::block_on(sessions.mark_onboarding_seen());
    assert!(session.has_seen_onboarding);
    assert_eq!(
        tokio_test::block_on(store.get("hasSeenOnboarding")).unwrap(),
        Some("true".to_string())
    );
}

#[tokio::test]
async fn test_patient_login_reads_only_own_records() {
    let config = Config::default();
    let own = config.clinic.patient_account.as_str();

    let mut sessions = SessionManager::new(Arc::new(MemoryStore::new()));
    sessions.login(Role::Patient).await.unwrap();
    let session = sessions.session();

    assert!(session.check_patient_access(own, "p1").is_ok());
    let err = session.check_patient_access(own, "p3").unwrap_err();
    assert!(err.is_recoverable());

    sessions.login(Role::Doctor).await.unwrap();
    assert!(sessions.session().check_patient_access(own, "p3").is_ok());
}

#[test]
fn test_patient_dashboard_schedule() {
    let repo = RecordRepository::seeded().unwrap();
    let today = ClinicDate::parse("20 Jun 2024").unwrap();

    let next = repo.next_appointment("p1", today).unwrap();
    assert_eq!(next.appointment_type, "Regular Checkup");
    assert_eq!(next.time_label(), "10:30 AM");

    let upcoming = repo.upcoming_appointments("p1", today);
    assert_eq!(upcoming.len(), 2);
    assert!(upcoming[0].date <= upcoming[1].date);

    assert_eq!(
        repo.treatment_progress("p1"),
        Some(TreatmentProgress { completed: 3, total: 8 })
    );
}
