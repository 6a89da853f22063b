//! HTTP middleware: authentication extraction, request tracing and
//! response security headers.

pub mod auth;
pub mod security;
pub mod tracing;

pub use auth::AuthenticatedUser;
pub use security::security_headers;
pub use self::tracing::request_tracing;
