pub mod auth;
pub mod digest;
