//! Local HTTP host for the profile endpoint.
//!
//! `GET` and `POST` on [`PROFILE_ROUTE`] both go through the resolver and
//! always answer `200` with the resolved JSON. The request body is streamed
//! only when the query leaves a field unsupplied.

use crate::core::resolver::RequestFieldResolver;
use crate::core::{RawInput, RequestSource, ResolvedFields, Result};
use crate::utils::error::IntakeError;
use async_trait::async_trait;
use axum::body::Body;
use axum::extract::{RawQuery, State};
use axum::routing::get;
use axum::{Json, Router};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::sync::Mutex;

pub const PROFILE_ROUTE: &str = "/api/profile";

/// Bodies beyond this size count as unreadable, not as a rejected request.
pub const MAX_BODY_BYTES: usize = 2 * 1024 * 1024;

/// Query parameters plus the not-yet-read request body.
pub struct HttpRequest {
    query: RawInput,
    body: Mutex<Option<Body>>,
    limit: usize,
}

impl HttpRequest {
    pub fn new(query: Option<&str>, body: Body, limit: usize) -> Self {
        Self {
            query: RawInput::from_query_string(query.unwrap_or_default()),
            body: Mutex::new(Some(body)),
            limit,
        }
    }
}

#[async_trait]
impl RequestSource for HttpRequest {
    fn query_param(&self, key: &str) -> Option<&str> {
        self.query.query_param(key)
    }

    /// The body stream can only be taken once; later calls see no body.
    async fn read_body(&self) -> Result<Option<Vec<u8>>> {
        let Some(body) = self.body.lock().await.take() else {
            return Ok(None);
        };

        let bytes = axum::body::to_bytes(body, self.limit)
            .await
            .map_err(|e| IntakeError::BodyReadError {
                message: format!("{} (limit {} bytes)", e, self.limit),
            })?;

        Ok((!bytes.is_empty()).then(|| bytes.to_vec()))
    }
}

pub fn router(resolver: Arc<RequestFieldResolver>) -> Router {
    Router::new()
        .route(PROFILE_ROUTE, get(profile_handler).post(profile_handler))
        .with_state(resolver)
}

async fn profile_handler(
    State(resolver): State<Arc<RequestFieldResolver>>,
    RawQuery(query): RawQuery,
    body: Body,
) -> Json<ResolvedFields> {
    let request = HttpRequest::new(query.as_deref(), body, MAX_BODY_BYTES);

    Json(resolver.resolve(&request).await)
}

pub async fn bind(addr: SocketAddr) -> std::result::Result<TcpListener, anyhow::Error> {
    TcpListener::bind(addr)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to bind profile server to {}: {}", addr, e))
}

/// Serves until the listener fails.
pub async fn serve(
    listener: TcpListener,
    resolver: RequestFieldResolver,
) -> std::result::Result<(), anyhow::Error> {
    let addr = listener.local_addr()?;
    tracing::info!("🚀 Profile endpoint listening on http://{}{}", addr, PROFILE_ROUTE);

    axum::serve(listener, router(Arc::new(resolver)))
        .await
        .map_err(|e| anyhow::anyhow!("Profile server error: {}", e))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_body_is_taken_once() {
        let request = HttpRequest::new(Some("name=ana"), Body::from("{}"), MAX_BODY_BYTES);

        assert_eq!(request.query_param("name"), Some("ana"));
        assert_eq!(request.read_body().await.unwrap(), Some(b"{}".to_vec()));
        assert_eq!(request.read_body().await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_empty_body_is_no_body() {
        let request = HttpRequest::new(None, Body::empty(), MAX_BODY_BYTES);
        assert_eq!(request.read_body().await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_body_over_limit_is_a_read_error() {
        let request = HttpRequest::new(None, Body::from(vec![b' '; 64]), 16);

        let err = request.read_body().await.unwrap_err();

        assert!(matches!(err, IntakeError::BodyReadError { .. }));
    }

    #[tokio::test]
    async fn test_oversized_body_resolves_with_query_values() {
        let resolver = RequestFieldResolver::default();
        let request = HttpRequest::new(Some("name=bob&age=5"), Body::from(vec![b'x'; 64]), 16);

        let resolved = resolver.resolve(&request).await;

        assert_eq!(resolved.name, "Bob");
        assert_eq!(resolved.email, crate::core::resolver::DEFAULT_EMAIL);
    }
}
