//! Admin authorization
//!
//! The admin panel is gated by a single shared password. A successful login
//! issues an opaque session token which admin routes expect as
//! `Authorization: Bearer <token>`.

use crate::core::error::{AuthError, ConfigError, StoreError};
use async_trait::async_trait;
use axum::extract::{FromRef, FromRequestParts};
use axum::http::{HeaderMap, header, request::Parts};
use chrono::{DateTime, Duration, Utc};
use std::collections::HashMap;
use std::sync::{Arc, RwLock};
use uuid::Uuid;

/// Authorization context extracted from a request
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthContext {
    /// Holder of a live admin session
    Admin { session_id: Uuid },

    /// No authentication (public access)
    Anonymous,
}

impl AuthContext {
    /// Check if context represents an admin
    pub fn is_admin(&self) -> bool {
        matches!(self, AuthContext::Admin { .. })
    }
}

/// Authorization policy for an operation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthPolicy {
    /// Public access (no auth required)
    Public,

    /// Admin only
    AdminOnly,
}

impl AuthPolicy {
    /// Check if auth context satisfies this policy
    pub fn check(&self, context: &AuthContext) -> bool {
        match self {
            AuthPolicy::Public => true,
            AuthPolicy::AdminOnly => context.is_admin(),
        }
    }
}

/// Trait for auth providers
#[async_trait]
pub trait AuthProvider: Send + Sync {
    /// Extract auth context from request headers
    ///
    /// Absent credentials yield [`AuthContext::Anonymous`]; credentials that
    /// are present but not valid are an error.
    async fn extract_context(&self, headers: &HeaderMap) -> Result<AuthContext, AuthError>;
}

/// Bearer token from the `Authorization` header, if any
pub fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(header::AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
        .map(str::trim)
        .filter(|t| !t.is_empty())
}

/// Compare two secrets without short-circuiting on the first differing byte
fn secrets_match(expected: &str, given: &str) -> bool {
    let (a, b) = (expected.as_bytes(), given.as_bytes());
    if a.len() != b.len() {
        return false;
    }
    a.iter().zip(b).fold(0u8, |acc, (x, y)| acc | (x ^ y)) == 0
}

/// Issued admin sessions
///
/// Tokens are random UUIDs held in memory with an expiry. Clones share the
/// same session table.
#[derive(Clone)]
pub struct AdminSessions {
    password: Option<Arc<str>>,
    ttl: Duration,
    sessions: Arc<RwLock<HashMap<Uuid, DateTime<Utc>>>>,
}

impl AdminSessions {
    /// Create a session table
    ///
    /// `password` is the configured admin secret; `None` means the admin
    /// panel is not configured and every login fails with a config error.
    pub fn new(password: Option<String>, ttl: Duration) -> Self {
        Self {
            password: password.filter(|p| !p.is_empty()).map(Arc::from),
            ttl,
            sessions: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Check the password and open a session
    pub fn login(&self, given: &str) -> Result<Uuid, StoreError> {
        self.login_at(given, Utc::now())
    }

    fn login_at(&self, given: &str, now: DateTime<Utc>) -> Result<Uuid, StoreError> {
        let Some(expected) = self.password.as_deref() else {
            tracing::error!("admin password not configured");
            return Err(ConfigError::MissingValue {
                key: "admin.password".to_string(),
            }
            .into());
        };

        let valid = secrets_match(expected, given);
        tracing::info!(valid, "admin password validation");
        if !valid {
            return Err(AuthError::WrongPassword.into());
        }

        let token = Uuid::new_v4();
        let mut sessions = self
            .sessions
            .write()
            .map_err(|e| StoreError::Internal(e.to_string()))?;
        sessions.retain(|_, expires| *expires > now);
        sessions.insert(token, now + self.ttl);

        Ok(token)
    }

    /// Whether a token belongs to a live session
    pub fn is_valid(&self, token: &Uuid) -> bool {
        self.is_valid_at(token, Utc::now())
    }

    fn is_valid_at(&self, token: &Uuid, now: DateTime<Utc>) -> bool {
        match self.sessions.read() {
            Ok(sessions) => sessions.get(token).is_some_and(|expires| *expires > now),
            Err(e) => {
                tracing::error!(error = %e, "session table poisoned; rejecting token");
                false
            }
        }
    }

    /// End a session; unknown tokens are ignored
    pub fn revoke(&self, token: &Uuid) -> Result<(), StoreError> {
        let mut sessions = self
            .sessions
            .write()
            .map_err(|e| StoreError::Internal(e.to_string()))?;
        sessions.remove(token);
        Ok(())
    }

    /// Number of sessions currently stored (including expired, not yet purged)
    pub fn len(&self) -> usize {
        self.sessions.read().map(|s| s.len()).unwrap_or(0)
    }

    /// Whether no session is stored
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl AuthProvider for AdminSessions {
    async fn extract_context(&self, headers: &HeaderMap) -> Result<AuthContext, AuthError> {
        let Some(raw) = bearer_token(headers) else {
            return Ok(AuthContext::Anonymous);
        };

        let token = Uuid::parse_str(raw).map_err(|_| AuthError::InvalidToken)?;
        if self.is_valid(&token) {
            Ok(AuthContext::Admin { session_id: token })
        } else {
            Err(AuthError::InvalidToken)
        }
    }
}

/// Extractor for routes under [`AuthPolicy::AdminOnly`]
///
/// Rejects with 401 unless the request carries a live session token.
#[derive(Debug, Clone, Copy)]
pub struct AdminSession {
    pub session_id: Uuid,
}

impl<S> FromRequestParts<S> for AdminSession
where
    AdminSessions: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = StoreError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let sessions = AdminSessions::from_ref(state);
        let context = sessions.extract_context(&parts.headers).await?;

        match &context {
            AuthContext::Admin { session_id } if AuthPolicy::AdminOnly.check(&context) => {
                Ok(AdminSession {
                    session_id: *session_id,
                })
            }
            _ => Err(AuthError::MissingToken.into()),
        }
    }
}
