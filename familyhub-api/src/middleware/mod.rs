/// Middleware modules for the API server
///
/// Authentication lives in `familyhub_shared::auth::middleware` and is wired
/// up in [`crate::app`]; this module holds the response-side layers.

pub mod security;
