//! Login, refresh, and logout orchestration.

pub mod service;

pub use service::{AuthService, LoginOutcome};
