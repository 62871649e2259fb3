//! Startup navigation

use std::time::Duration;
use tracing::info;

use super::state::{NavigationEvent, Screen};
use crate::config::NavigationConfig;
use crate::session::SessionManager;

/// Decides the first screen after the splash delay
#[derive(Debug, Clone)]
pub struct NavigationResolver {
    splash_delay: Duration,
}

impl NavigationResolver {
    pub fn new(splash_delay: Duration) -> Self {
        Self { splash_delay }
    }

    pub fn from_config(config: &NavigationConfig) -> Self {
        Self::new(Duration::from_millis(config.splash_delay_ms))
    }

    pub fn splash_delay(&self) -> Duration {
        self.splash_delay
    }

    /// Restore the session while the splash is shown, then pick a screen
    pub async fn boot(&self, sessions: &mut SessionManager) -> Screen {
        let (session, _) = tokio::join!(sessions.restore(), tokio::time::sleep(self.splash_delay));

        // SplashElapsed is always handled from Splash
        let screen = Screen::Splash
            .transition(NavigationEvent::SplashElapsed(session))
            .unwrap_or(Screen::Onboarding);

        info!(screen = screen.display_name(), route = screen.route(), "startup screen resolved");
        screen
    }
}

impl Default for NavigationResolver {
    fn default() -> Self {
        Self::from_config(&NavigationConfig::default())
    }
}
