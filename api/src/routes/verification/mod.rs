//! Account activation routes

use std::sync::Arc;

use um_core::repositories::{AuditEventRepository, UserRepository};
use um_core::services::identity::IdentityService;
use um_core::services::verification::EmailVerificationService;

pub mod verify_email;

/// Application state shared by the verification handlers
pub struct AppState<U, A, I>
where
    U: UserRepository,
    A: AuditEventRepository,
    I: IdentityService,
{
    pub verification_service: Arc<EmailVerificationService<U, A, I>>,
    /// Also used by the bearer token middleware
    pub identity_service: Arc<I>,
}

impl<U, A, I> AppState<U, A, I>
where
    U: UserRepository,
    A: AuditEventRepository,
    I: IdentityService,
{
    pub fn new(
        verification_service: Arc<EmailVerificationService<U, A, I>>,
        identity_service: Arc<I>,
    ) -> Self {
        Self {
            verification_service,
            identity_service,
        }
    }
}
