//! Session state manager
//!
//! Owns the persisted login flags and the in-memory [`Session`] snapshot.
//! `restore` runs once at startup; `login`, `logout` and
//! `mark_onboarding_seen` are the only mutators.

use std::sync::Arc;
use tracing::{debug, info, warn};
use uuid::Uuid;

use super::store::{KeyValueStore, ONBOARDING_KEY, USER_ROLE_KEY, USER_TOKEN_KEY};
use super::types::{Role, Session};
use crate::errors::Result;

pub struct SessionManager {
    store: Arc<dyn KeyValueStore>,
    session: Session,
}

impl SessionManager {
    /// Create a manager; the snapshot starts logged out until `restore`
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self {
            store,
            session: Session::default(),
        }
    }

    /// Current snapshot
    pub fn session(&self) -> Session {
        self.session
    }

    /// Load the session from storage
    ///
    /// Never fails: unreadable storage yields a logged-out session.
    pub async fn restore(&mut self) -> Session {
        self.session = match self.read_persisted().await {
            Ok(session) => session,
            Err(e) => {
                warn!(error = %e, "session restore failed, continuing logged out");
                Session::default()
            }
        };
        info!(
            logged_in = self.session.is_logged_in,
            role = ?self.session.role,
            onboarding_seen = self.session.has_seen_onboarding,
            "session restored"
        );
        self.session
    }

    async fn read_persisted(&self) -> Result<Session> {
        let token = self.store.get(USER_TOKEN_KEY).await?;
        let stored_role = self.store.get(USER_ROLE_KEY).await?;
        let has_seen_onboarding = self.store.get(ONBOARDING_KEY).await?.as_deref() == Some("true");

        if token.is_none() {
            return Ok(Session::logged_out(has_seen_onboarding));
        }

        // a token without a usable role still counts as a patient login
        let role = match stored_role.as_deref().map(str::parse::<Role>) {
            Some(Ok(role)) => role,
            Some(Err(_)) | None => {
                debug!(stored = ?stored_role, "no valid role stored, defaulting to patient");
                Role::Patient
            }
        };

        Ok(Session::logged_in(role, has_seen_onboarding))
    }

    /// Log in as `role` without checking credentials
    ///
    /// Repeating a login with the same role keeps the stored token. The role
    /// is written before the token, so a token on disk always sits next to
    /// the role it was issued for. If the role cannot be written the
    /// snapshot is left unchanged; if the token cannot be written after the
    /// role was, any older token is dropped and the session is logged out.
    pub async fn login(&mut self, role: Role) -> Result<Session> {
        let existing = self.store.get(USER_TOKEN_KEY).await?;
        let token = match existing {
            Some(token) if self.session.active_role() == Some(role) => token,
            _ => Uuid::new_v4().to_string(),
        };

        self.store.set(USER_ROLE_KEY, role.as_str()).await?;
        if let Err(e) = self.store.set(USER_TOKEN_KEY, &token).await {
            // the stored role is already the new one; an older token must not pair with it
            if let Err(clear) = self.store.remove(USER_TOKEN_KEY).await {
                warn!(error = %clear, "could not clear stale session token");
            }
            self.session = Session::logged_out(self.session.has_seen_onboarding);
            return Err(e);
        }

        self.session = Session::logged_in(role, self.session.has_seen_onboarding);
        info!(%role, "logged in");
        Ok(self.session)
    }

    /// Clear the persisted token and role
    ///
    /// The snapshot is reset to logged out even if storage fails, so the
    /// worst case is a stale token that the next `logout` clears.
    pub async fn logout(&mut self) -> Session {
        for key in [USER_TOKEN_KEY, USER_ROLE_KEY] {
            if let Err(e) = self.store.remove(key).await {
                warn!(key, error = %e, "could not clear session key");
            }
        }
        self.session = Session::logged_out(self.session.has_seen_onboarding);
        info!("logged out");
        self.session
    }

    /// Remember that onboarding was shown; there is no inverse
    pub async fn mark_onboarding_seen(&mut self) -> Session {
        if let Err(e) = self.store.set(ONBOARDING_KEY, "true").await {
            warn!(error = %e, "could not persist onboarding flag");
        }
        self.session.has_seen_onboarding = true;
        self.session
    }
}
