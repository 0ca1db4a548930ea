pub mod auth;
pub mod error_envelope;
pub mod rate_limit;
pub mod rbac;
