//! Identity service trait and wire types

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::domain::entities::user::UserStatus;
use crate::errors::IdentityError;

/// Token introspection response (RFC 7662 subset)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenIntrospection {
    /// Whether the token is currently valid
    pub active: bool,

    /// Client the token was issued to
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub client_id: Option<String>,

    /// Subject of the token
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sub: Option<String>,

    /// Space separated scopes
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scope: Option<String>,

    /// Expiry as a unix timestamp
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exp: Option<i64>,
}

impl TokenIntrospection {
    /// Response for an active token
    pub fn active() -> Self {
        Self {
            active: true,
            ..Default::default()
        }
    }

    /// Response for an unknown, revoked or expired token
    pub fn inactive() -> Self {
        Self::default()
    }
}

/// Operations the user management service needs from the identity service
#[async_trait]
pub trait IdentityService: Send + Sync {
    /// Propagate a user's new account status
    async fn update_user_status(&self, user_id: &str, status: UserStatus) -> Result<(), IdentityError>;

    /// Ask whether a bearer token is active
    async fn introspect_token(&self, token: &str) -> Result<TokenIntrospection, IdentityError>;
}
