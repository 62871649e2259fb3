// Session state: who is logged in, as which role, and whether the
// onboarding flow has been shown on this device.
//
// Components:
// - Types: Role and the Session snapshot
// - Store: async key-value storage (JSON file or in-memory)
// - Manager: restore / login / logout / mark_onboarding_seen
// - Credentials: stub login, signup and reset-password forms

pub mod credentials;
pub mod manager;
pub mod store;
pub mod types;

// Re-export key types
pub use credentials::{LoginForm, ResetPasswordForm, SignupForm};
pub use manager::SessionManager;
pub use store::{FileStore, KeyValueStore, MemoryStore};
pub use types::{Role, Session};
