//! Recording identity service used by tests

use async_trait::async_trait;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use crate::domain::entities::user::UserStatus;
use crate::errors::IdentityError;

use super::traits::{IdentityService, TokenIntrospection};

/// Identity service double that records every call
///
/// Any non-empty token introspects as active unless configured otherwise.
#[derive(Clone, Default)]
pub struct MockIdentityService {
    status_updates: Arc<Mutex<Vec<(String, UserStatus)>>>,
    introspected: Arc<Mutex<Vec<String>>>,
    tokens_inactive: Arc<AtomicBool>,
    introspection_unavailable: Arc<AtomicBool>,
    fail_status_updates: Arc<AtomicBool>,
}

impl MockIdentityService {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every token introspect as inactive
    pub fn set_tokens_inactive(&self, inactive: bool) {
        self.tokens_inactive.store(inactive, Ordering::SeqCst);
    }

    /// Make introspection fail as if the service were unreachable
    pub fn set_introspection_unavailable(&self, unavailable: bool) {
        self.introspection_unavailable.store(unavailable, Ordering::SeqCst);
    }

    /// Make status updates fail with a 500 from the identity service
    pub fn set_fail_status_updates(&self, fail: bool) {
        self.fail_status_updates.store(fail, Ordering::SeqCst);
    }

    /// Status updates received, in order
    pub fn status_updates(&self) -> Vec<(String, UserStatus)> {
        self.status_updates
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }

    /// Tokens introspected, in order
    pub fn introspected_tokens(&self) -> Vec<String> {
        self.introspected
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }
}

#[async_trait]
impl IdentityService for MockIdentityService {
    async fn update_user_status(&self, user_id: &str, status: UserStatus) -> Result<(), IdentityError> {
        self.status_updates
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push((user_id.to_string(), status));

        if self.fail_status_updates.load(Ordering::SeqCst) {
            return Err(IdentityError::UnexpectedStatus {
                status: 500,
                body: "mock identity failure".to_string(),
            });
        }
        Ok(())
    }

    async fn introspect_token(&self, token: &str) -> Result<TokenIntrospection, IdentityError> {
        self.introspected
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(token.to_string());

        if self.introspection_unavailable.load(Ordering::SeqCst) {
            return Err(IdentityError::Unavailable {
                message: "connection refused".to_string(),
            });
        }

        if token.is_empty() || self.tokens_inactive.load(Ordering::SeqCst) {
            Ok(TokenIntrospection::inactive())
        } else {
            Ok(TokenIntrospection::active())
        }
    }
}
