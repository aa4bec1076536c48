//! Main email verification service implementation

use chrono::{DateTime, Utc};
use std::sync::Arc;

use um_shared::email::{mask_email, normalize_email};

use crate::domain::entities::audit::UserMgmtEvent;
use crate::domain::entities::user::{User, UserStatus};
use crate::domain::entities::verification::{classify, AuditContext, VerificationOutcome};
use crate::errors::{DomainError, DomainResult, VerificationError};
use crate::repositories::{AuditEventRepository, UserRepository};
use crate::services::audit::AuditService;
use crate::services::identity::IdentityService;

use super::types::VerifyEmailResult;

/// Verifies account activation codes sent by email
pub struct EmailVerificationService<U, A, I>
where
    U: UserRepository,
    A: AuditEventRepository,
    I: IdentityService,
{
    /// User storage
    user_repository: Arc<U>,
    /// Identity service notified of activations
    identity_service: Arc<I>,
    /// Audit trail
    audit_service: Arc<AuditService<A>>,
}

impl<U, A, I> EmailVerificationService<U, A, I>
where
    U: UserRepository,
    A: AuditEventRepository + 'static,
    I: IdentityService,
{
    /// Create a new verification service
    pub fn new(
        user_repository: Arc<U>,
        identity_service: Arc<I>,
        audit_service: Arc<AuditService<A>>,
    ) -> Self {
        Self {
            user_repository,
            identity_service,
            audit_service,
        }
    }

    /// Verify the activation code submitted for `email`
    ///
    /// The user is looked up by email within `context.app_id`. On success the
    /// record is activated with a compare-and-set on its pending code, then
    /// the identity service is told. A failed notification reverts the record
    /// to pending so the code stays usable.
    ///
    /// # Returns
    ///
    /// * `Ok(VerifyEmailResult)` - Account activated, or already active (including
    ///   a concurrent request consuming the same code first)
    /// * `Err(DomainError::Verification(_))` - Wrong code, expired code or unknown email
    /// * `Err(DomainError::Identity(_))` - Identity service rejected the update
    /// * `Err(DomainError::Internal { .. })` - Storage failure
    pub async fn verify_email(
        &self,
        email: &str,
        code: &str,
        context: &AuditContext,
    ) -> DomainResult<VerifyEmailResult> {
        let email = normalize_email(email);
        let user = self
            .user_repository
            .find_by_email_and_app_id(&email, &context.app_id)
            .await?;

        let now = Utc::now();
        let outcome = classify(user.as_ref(), code.trim(), now);

        let user = match (outcome, user) {
            (VerificationOutcome::Verified, Some(user)) => user,
            (VerificationOutcome::AlreadyActive, Some(user)) => {
                tracing::info!(
                    user_id = %user.user_id,
                    app_id = %context.app_id,
                    "Email already verified, nothing to do"
                );
                return Ok(VerifyEmailResult::already_active(user.user_id));
            }
            (outcome, user) => {
                return Err(self.reject(outcome, &email, user.as_ref(), context).await);
            }
        };

        self.activate(user, context, now).await
    }

    /// Activate a verified user and propagate the new status
    ///
    /// The code is consumed in storage before the identity service is told,
    /// so concurrent requests with the same code activate the account once.
    /// A rejected notification puts the record back to pending.
    async fn activate(
        &self,
        pending: User,
        context: &AuditContext,
        now: DateTime<Utc>,
    ) -> DomainResult<VerifyEmailResult> {
        let Some(user) = self.user_repository.activate_pending(&pending, now).await? else {
            tracing::info!(
                user_id = %pending.user_id,
                app_id = %context.app_id,
                "Verification code already consumed by a concurrent request"
            );
            return Ok(VerifyEmailResult::already_active(pending.user_id));
        };

        if let Err(e) = self
            .identity_service
            .update_user_status(&user.user_id, UserStatus::Active)
            .await
        {
            tracing::error!(
                user_id = %user.user_id,
                error = %e,
                "Identity service rejected account activation"
            );
            self.revert(&pending).await;
            return Err(e.into());
        }

        tracing::info!(
            user_id = %user.user_id,
            app_id = %context.app_id,
            email = %mask_email(&user.email),
            "Email verified, account activated"
        );

        self.emit(UserMgmtEvent::EmailVerifiedForAccountActivation, Some(&user.user_id), context)
            .await;
        self.emit(UserMgmtEvent::AccountActivated, Some(&user.user_id), context)
            .await;

        Ok(VerifyEmailResult::activated(user.user_id))
    }

    /// Undo a claimed activation after the identity service refused it
    async fn revert(&self, pending: &User) {
        match self.user_repository.revert_activation(pending).await {
            Ok(true) => {
                tracing::info!(user_id = %pending.user_id, "Account returned to pending");
            }
            Ok(false) => {
                tracing::warn!(
                    user_id = %pending.user_id,
                    "Account changed after activation claim, not reverted"
                );
            }
            Err(e) => {
                tracing::error!(
                    user_id = %pending.user_id,
                    error = %e,
                    "Failed to return account to pending"
                );
            }
        }
    }

    /// Audit a rejected attempt and build the client error
    async fn reject(
        &self,
        outcome: VerificationOutcome,
        email: &str,
        user: Option<&User>,
        context: &AuditContext,
    ) -> DomainError {
        let (event, error) = match outcome {
            VerificationOutcome::WrongCode => (
                UserMgmtEvent::EmailVerificationFailedWrongCode,
                VerificationError::WrongCode,
            ),
            VerificationOutcome::ExpiredCode => (
                UserMgmtEvent::EmailVerificationFailedExpiredCode,
                VerificationError::ExpiredCode,
            ),
            VerificationOutcome::UnknownEmail
            | VerificationOutcome::Verified
            | VerificationOutcome::AlreadyActive => (
                UserMgmtEvent::EmailVerificationFailed,
                VerificationError::EmailNotFound,
            ),
        };

        let user_id = user
            .map(|u| u.user_id.as_str())
            .or(context.caller_user_id.as_deref());

        tracing::warn!(
            email = %mask_email(email),
            app_id = %context.app_id,
            user_id = user_id.unwrap_or("-"),
            reason = event.as_str(),
            "Email verification rejected"
        );

        self.emit(event, user_id, context).await;
        error.into()
    }

    async fn emit(&self, event: UserMgmtEvent, user_id: Option<&str>, context: &AuditContext) {
        if let Err(e) = self.audit_service.record(event, user_id, context).await {
            tracing::error!(error = %e, event_code = event.as_str(), "Failed to record audit event");
        }
    }
}
