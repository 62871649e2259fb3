//! Navigation resolver
//!
//! Decides which screen set a user reaches from the session flags.

pub mod resolver;
pub mod state;

pub use resolver::NavigationResolver;
pub use state::{resolve, NavigationEvent, Screen};
