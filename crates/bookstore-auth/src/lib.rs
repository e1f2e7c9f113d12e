//! # bookstore-auth
//!
//! The authentication/authorization core for the bookstore API.
//!
//! ## Modules
//!
//! - `password` — bcrypt password hashing and verification
//! - `jwt` — signed token creation and validation (access + refresh)
//! - `revocation` — token blacklist and in-memory refresh-token store
//! - `rbac` — permission evaluation over the role/permission graph
//! - `audit` — best-effort audit recording
//! - `session` — login, refresh, and logout orchestration

pub mod audit;
pub mod jwt;
pub mod password;
pub mod rbac;
pub mod revocation;
pub mod session;

pub use audit::AuditRecorder;
pub use jwt::{Claims, JwtDecoder, JwtEncoder, TokenPair};
pub use password::PasswordHasher;
pub use rbac::PermissionEvaluator;
pub use revocation::{MemoryRefreshTokenStore, TokenBlacklist};
pub use session::{AuthService, LoginOutcome};
