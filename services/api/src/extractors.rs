use axum::extract::{FromRef, FromRequestParts};
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;

use apex_common::types::TenantId;

use crate::auth::JwtKeys;
use crate::error::ApiError;

/// Tenant resolved from the bearer token's `organizationId` claim.
pub struct Tenant(pub TenantId);

impl<S> FromRequestParts<S> for Tenant
where
    JwtKeys: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let header = parts
            .headers
            .get(AUTHORIZATION)
            .ok_or_else(|| ApiError::unauthorized("missing Authorization header"))?;

        let value = header
            .to_str()
            .map_err(|_| ApiError::unauthorized("invalid Authorization header value"))?;

        let token = bearer_token(value)
            .ok_or_else(|| ApiError::unauthorized("expected a Bearer token"))?;

        let keys = JwtKeys::from_ref(state);
        let tenant = keys.tenant_of(token)?;
        Ok(Tenant(tenant))
    }
}

fn bearer_token(value: &str) -> Option<&str> {
    let (scheme, token) = value.split_once(' ')?;
    let token = token.trim();
    (scheme.eq_ignore_ascii_case("bearer") && !token.is_empty()).then_some(token)
}
