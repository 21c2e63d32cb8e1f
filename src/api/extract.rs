use axum::Json;
use axum::extract::{FromRequest, FromRequestParts, Query};

use crate::error::ApiError;

/// `Json` whose rejections answer with the service's `{message}` body.
#[derive(FromRequest)]
#[from_request(via(Json), rejection(ApiError))]
pub struct ApiJson<T>(pub T);

#[derive(FromRequestParts)]
#[from_request(via(Query), rejection(ApiError))]
pub struct ApiQuery<T>(pub T);
