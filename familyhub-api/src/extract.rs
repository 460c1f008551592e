//! Request extractors
//!
//! [`ApiJson`] wraps `axum::Json` so a malformed body, a wrongly typed field
//! or a missing content type answers with the API's own 400 body instead of
//! axum's plain-text rejection.

use crate::error::ApiError;
use axum::extract::FromRequest;

/// JSON body extractor with [`ApiError`] rejections
#[derive(Debug, Clone, Copy, Default, FromRequest)]
#[from_request(via(axum::Json), rejection(ApiError))]
pub struct ApiJson<T>(pub T);
