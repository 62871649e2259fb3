//! HairCare+ - Terminal front-end

use anyhow::{bail, Context, Result};
use clap::Parser;
use haircare::{
    cli::{Args, Commands},
    config::Config,
    display,
    logging,
    navigation::{resolve, NavigationResolver, Screen},
    records::{
        ClinicDate, NewPatientForm, NewTreatmentForm, PatientFilter, PhotoAngle, RecordRepository,
    },
    session::{FileStore, LoginForm, ResetPasswordForm, Role, SessionManager, SignupForm},
    ClinicError,
};
use std::sync::Arc;

/// Everything a command needs, built once from args and config
struct App {
    config: Config,
    sessions: SessionManager,
    records: RecordRepository,
    store_path: std::path::PathBuf,
    today: ClinicDate,
}

impl App {
    async fn build(args: &Args) -> Result<Self> {
        let mut config = Config::load(args.config.clone())?;
        if let Some(dir) = &args.state_dir {
            config.storage.state_dir = dir.to_string_lossy().into_owned();
        }

        let store_path = config.state_file();
        let mut sessions = SessionManager::new(Arc::new(FileStore::new(&store_path)));
        sessions.restore().await;

        let records = RecordRepository::seeded().context("Failed to load clinic records")?;

        Ok(Self {
            config,
            sessions,
            records,
            store_path,
            today: args.today.unwrap_or_else(ClinicDate::today),
        })
    }

    /// Patient data views are reachable only after login
    fn require_login(&self) -> Result<Role> {
        match self.sessions.session().active_role() {
            Some(role) => Ok(role),
            None => bail!("Not logged in. Run `haircare login` first."),
        }
    }

    fn require_doctor(&self) -> Result<()> {
        if self.require_login()? != Role::Doctor {
            bail!("This screen is only available to clinic staff.");
        }
        Ok(())
    }

    /// Doctors may open any patient; patients only their own record
    fn check_patient_access(&self, patient_id: &str) -> haircare::Result<()> {
        self.sessions
            .session()
            .check_patient_access(&self.config.clinic.patient_account, patient_id)
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    logging::init(args.verbosity());

    let mut app = App::build(&args).await?;

    match &args.command {
        Some(Commands::Start) | None => run_start(&args, &mut app).await?,
        Some(Commands::Login {
            role,
            email,
            password,
        }) => {
            let form = LoginForm {
                email: email.clone(),
                password: password.clone(),
                role: *role,
            };
            login(&mut app, &form).await?;
        }
        Some(Commands::Signup {
            name,
            email,
            password,
            role,
        }) => {
            let form = SignupForm {
                name: name.clone(),
                email: email.clone(),
                password: password.clone(),
                role: *role,
            };
            if let Err(e) = form.validate() {
                return report(e);
            }
            let login_form = LoginForm {
                email: email.clone(),
                password: password.clone(),
                role: *role,
            };
            display::show_success("Account created");
            login(&mut app, &login_form).await?;
        }
        Some(Commands::ForgotPassword { email }) => {
            match (ResetPasswordForm { email: email.clone() }).validate() {
                Ok(message) => display::show_success(&message),
                Err(e) => return report(e),
            }
        }
        Some(Commands::Logout) => {
            app.sessions.logout().await;
            display::show_success("Logged out");
            display::show_screen(Screen::Login, &app.config.clinic.name);
        }
        Some(Commands::Onboarding) => {
            let session = app.sessions.mark_onboarding_seen().await;
            render_home(&app, resolve(&session));
        }
        Some(Commands::Patients { location, search }) => {
            app.require_doctor()?;
            let filter = match search {
                Some(query) => PatientFilter::search(query),
                None => PatientFilter::from_location_str(location.as_deref().unwrap_or("all"))?,
            };
            display::banner("Patients");
            display::show_roster(&app.records.stats(), &app.records.filter_patients(&filter));
        }
        Some(Commands::Patient { id }) => {
            app.require_doctor()?;
            let patient = match app.records.find_patient_by_id(id) {
                Some(patient) => patient,
                None => {
                    display::show_error("Patient not found");
                    return Ok(());
                }
            };
            display::show_patient(patient, &app.records.list_treatments_for_patient(id));
        }
        Some(Commands::Timeline { id }) => {
            app.require_login()?;
            if let Err(e) = app.check_patient_access(id) {
                return report(e);
            }
            display::show_timeline(&app.records.timeline_for_patient(id));
        }
        Some(Commands::Downloads { id }) => {
            app.require_login()?;
            if let Err(e) = app.check_patient_access(id) {
                return report(e);
            }
            display::banner("Downloads");
            let reports = app.records.timeline_for_patient(id).reports();
            if reports.is_empty() {
                display::show_info("No reports available");
            }
            for entry in reports {
                println!("  {}  {}", entry.title, entry.thumbnail_url.unwrap_or_default());
            }
        }
        Some(Commands::NewPatient {
            name,
            age,
            gender,
            phone,
            email,
            location,
            notes,
        }) => {
            app.require_doctor()?;
            let form = NewPatientForm {
                name: name.clone(),
                age: age.clone(),
                gender: gender.clone(),
                phone: phone.clone(),
                email: email.clone(),
                location: location.clone(),
                notes: notes.clone(),
            };
            match form.validate(&app.config.clinic.locations) {
                Ok(draft) => display::show_success(&format!(
                    "{} ({} yrs, {}) ready to register at {}",
                    draft.name, draft.age, draft.gender, draft.location
                )),
                Err(e) => return report(e),
            }
        }
        Some(Commands::UploadPhotos { id, photos, notes }) => {
            app.require_doctor()?;
            let mut form = NewTreatmentForm {
                patient_id: id.clone(),
                notes: notes.clone(),
                ..Default::default()
            };
            for entry in photos {
                let (angle, url) = entry
                    .split_once('=')
                    .with_context(|| format!("Expected ANGLE=URL, got '{}'", entry))?;
                form.set_photo(angle.parse::<PhotoAngle>()?, url);
            }
            match form.validate(&app.records, app.today) {
                Ok(draft) => display::show_success(&format!(
                    "{} photo(s) ready for {} on {}",
                    draft.images.len(),
                    draft.patient_id,
                    draft.date
                )),
                Err(e) => return report(e),
            }
        }
        Some(Commands::Config) => show_config(&app),
        Some(Commands::Clean) => clean_state(&app).await?,
    }

    Ok(())
}

/// Recoverable errors are shown inline; anything else aborts
fn report(err: ClinicError) -> Result<()> {
    if err.is_recoverable() {
        display::show_error(&err.user_message());
        Ok(())
    } else {
        Err(err.into())
    }
}

async fn login(app: &mut App, form: &LoginForm) -> Result<()> {
    let role = match form.validate() {
        Ok(role) => role,
        Err(e) => return report(e),
    };

    match app.sessions.login(role).await {
        Ok(_) => {
            display::show_success(&format!("Logged in as {}", role));
            render_home(app, Screen::home_for(role));
        }
        Err(e) => {
            tracing::warn!(error = %e, "login could not be persisted");
            display::show_error("Login failed. Please try again.");
        }
    }
    Ok(())
}

async fn run_start(args: &Args, app: &mut App) -> Result<()> {
    let resolver = NavigationResolver::from_config(&app.config.navigation);

    let spinner = args
        .verbosity()
        .show_progress()
        .then(|| display::splash_spinner(&app.config.clinic.name));
    let screen = resolver.boot(&mut app.sessions).await;
    if let Some(pb) = spinner {
        pb.finish_and_clear();
    }

    render_home(app, screen);
    Ok(())
}

fn render_home(app: &App, screen: Screen) {
    match screen {
        Screen::DoctorHome => {
            display::banner("Hello, Doctor");
            display::show_roster(
                &app.records.stats(),
                &app.records.filter_patients(&PatientFilter::All),
            );
        }
        Screen::PatientHome => {
            let id = app.config.clinic.patient_account.as_str();
            match app.records.find_patient_by_id(id) {
                Some(patient) => display::show_patient_home(
                    patient,
                    &app.records.upcoming_appointments(id, app.today),
                    app.records.treatment_progress(id),
                ),
                None => display::show_error("Patient record not found"),
            }
            display::show_timeline(&app.records.timeline_for_patient(id));
        }
        other => display::show_screen(other, &app.config.clinic.name),
    }
}

fn show_config(app: &App) {
    display::banner(&format!("{} Configuration", app.config.clinic.name));
    println!("Storage:");
    println!("  Session file:  {}", app.store_path.display());
    println!();
    println!("Navigation:");
    println!("  Splash delay:  {} ms", app.config.navigation.splash_delay_ms);
    println!();
    println!("Clinic:");
    let locations: Vec<String> = app.config.clinic.locations.iter().map(|l| l.to_string()).collect();
    println!("  Locations:     {}", locations.join(", "));
    println!("  Patient login: {}", app.config.clinic.patient_account);
    println!();
    println!("Session:");
    display::show_session(&app.sessions.session());
    println!();
}

async fn clean_state(app: &App) -> Result<()> {
    use tokio::fs;

    if app.store_path.exists() {
        fs::remove_file(&app.store_path).await?;
        display::show_success(&format!("Removed session file {:?}", app.store_path));
    } else {
        display::show_info("No session file found.");
    }

    Ok(())
}
