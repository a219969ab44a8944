use axum::extract::FromRequest;

use crate::errors::AppError;

/// `axum::Json` whose rejections use the `AppError` JSON body.
#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(AppError))]
pub struct AppJson<T>(pub T);
