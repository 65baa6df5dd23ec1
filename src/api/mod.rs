//! One function per remote operation. Each façade delegates to [`ApiClient`]
//! and mirrors successful results into its store before returning them.
//!
//! [`ApiClient`]: crate::http::ApiClient

pub mod auth;
pub mod lgpd;

pub use auth::AuthService;
pub use lgpd::LgpdService;
