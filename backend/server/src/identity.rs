//! # Identity
//!
//! The store owns no authentication. Whoever sits in front of it (gateway, blocklet
//! server, reverse proxy) describes the caller and an [`IdentityProvider`] turns that
//! description into an [`Identity`] attached to the request.
//!
//! `GET /api/user` only echoes what was attached, `{}` when the provider found nobody.
use std::sync::Arc;

use async_trait::async_trait;
use axum::{
    extract::{Request, State},
    http::HeaderMap,
    middleware::Next,
    response::Response,
};
use serde_json::{Map, Value};
use shared::Identity;
use tracing::debug;

use crate::state::AppState;

#[async_trait]
pub trait IdentityProvider: Send + Sync {
    async fn identify(&self, headers: &HeaderMap) -> Option<Identity>;
}

/// Reads the caller from `x-user-*` headers set by an upstream gateway.
///
/// No identity unless `x-user-did` is present.
pub struct HeaderIdentity;

const USER_HEADERS: [(&str, &str); 5] = [
    ("x-user-did", "did"),
    ("x-user-role", "role"),
    ("x-user-provider", "provider"),
    ("x-user-fullname", "fullName"),
    ("x-user-wallet-os", "walletOS"),
];

#[async_trait]
impl IdentityProvider for HeaderIdentity {
    async fn identify(&self, headers: &HeaderMap) -> Option<Identity> {
        headers.get("x-user-did")?;

        let fields: Map<String, Value> = USER_HEADERS
            .iter()
            .filter_map(|(header, key)| {
                let value = headers.get(*header)?.to_str().ok()?;
                Some((key.to_string(), Value::String(value.to_string())))
            })
            .collect();

        Some(Identity(fields))
    }
}

/// Provider for deployments without any identity in front of the store.
pub struct NoIdentity;

#[async_trait]
impl IdentityProvider for NoIdentity {
    async fn identify(&self, _headers: &HeaderMap) -> Option<Identity> {
        None
    }
}

pub async fn attach_identity(
    State(state): State<Arc<AppState>>,
    mut request: Request,
    next: Next,
) -> Response {
    let identity = state
        .identity
        .identify(request.headers())
        .await
        .unwrap_or_default();
    debug!("Caller identity: {:?}", identity.0.get("did"));

    request.extensions_mut().insert(identity);

    next.run(request).await
}
