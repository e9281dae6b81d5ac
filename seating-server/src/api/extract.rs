//! Request Extractors
//!
//! `Json` / `Path` / `Query` 的包装，解析失败时返回 [`AppError`] (InvalidRequest)，
//! 保证所有错误响应都是 `ApiResponse` JSON。

use axum::Json;
use axum::extract::{FromRequest, FromRequestParts, Path, Query, Request};
use axum::http::request::Parts;
use serde::de::DeserializeOwned;

use crate::utils::AppError;

fn rejected(source: &'static str, reason: String) -> AppError {
    tracing::debug!(source, reason = %reason, "Request rejected");
    AppError::invalid_request(reason)
}

/// JSON body extractor
pub struct AppJson<T>(pub T);

impl<S, T> FromRequest<S> for AppJson<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|e| rejected("body", e.body_text()))?;
        Ok(Self(value))
    }
}

/// Path parameter extractor
pub struct AppPath<T>(pub T);

impl<S, T> FromRequestParts<S> for AppPath<T>
where
    T: DeserializeOwned + Send,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(value) = Path::<T>::from_request_parts(parts, state)
            .await
            .map_err(|e| rejected("path", e.body_text()))?;
        Ok(Self(value))
    }
}

/// Query string extractor
pub struct AppQuery<T>(pub T);

impl<S, T> FromRequestParts<S> for AppQuery<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(value) = Query::<T>::from_request_parts(parts, state)
            .await
            .map_err(|e| rejected("query", e.body_text()))?;
        Ok(Self(value))
    }
}
