//! Integration tests for the email verification workflow through the public API

#[cfg(test)]
mod tests {
    use async_trait::async_trait;
    use chrono::{DateTime, Duration, Utc};
    use std::sync::{Arc, Mutex};
    use uuid::Uuid;

    use um_core::{
        AuditContext, AuditService, AuditServiceConfig, DomainError, EmailVerificationService,
        IdentityError, IdentityService, MockAuditEventRepository, MockIdentityService,
        MockUserRepository, TokenIntrospection, User, UserMgmtEvent, UserRepository, UserStatus,
    };

    fn audit_service(audit: &Arc<MockAuditEventRepository>) -> Arc<AuditService<MockAuditEventRepository>> {
        Arc::new(AuditService::new(
            Arc::clone(audit),
            AuditServiceConfig {
                async_writes: false,
                ..Default::default()
            },
        ))
    }

    // Identity service that records the stored status at notification time
    struct OrderedIdentityService {
        users: Arc<MockUserRepository>,
        seen_status_at_update: Mutex<Vec<UserStatus>>,
    }

    #[async_trait]
    impl IdentityService for OrderedIdentityService {
        async fn update_user_status(
            &self,
            user_id: &str,
            _status: UserStatus,
        ) -> Result<(), IdentityError> {
            let stored = self
                .users
                .find_by_user_id(user_id)
                .await
                .map_err(|e| IdentityError::Unavailable {
                    message: e.to_string(),
                })?
                .ok_or_else(|| IdentityError::UnexpectedStatus {
                    status: 404,
                    body: "unknown user".to_string(),
                })?;
            self.seen_status_at_update
                .lock()
                .unwrap()
                .push(stored.status);
            Ok(())
        }

        async fn introspect_token(&self, _token: &str) -> Result<TokenIntrospection, IdentityError> {
            Ok(TokenIntrospection::active())
        }
    }

    #[tokio::test]
    async fn test_code_is_claimed_before_identity_notification() {
        let user = User::new("ext-42", "sam@example.com", Uuid::new_v4(), "app-7")
            .with_verification_code("111222", Utc::now() + Duration::minutes(30));
        let users = Arc::new(MockUserRepository::with_users(vec![user]));
        let identity = Arc::new(OrderedIdentityService {
            users: Arc::clone(&users),
            seen_status_at_update: Mutex::new(Vec::new()),
        });
        let audit = Arc::new(MockAuditEventRepository::new());

        let service = EmailVerificationService::new(
            Arc::clone(&users),
            Arc::clone(&identity),
            audit_service(&audit),
        );

        let ctx = AuditContext::new("app-7").with_org_id(Some("org-3".to_string()));
        let result = service
            .verify_email("sam@example.com", "111222", &ctx)
            .await
            .unwrap();
        assert!(result.verified);

        assert_eq!(
            *identity.seen_status_at_update.lock().unwrap(),
            vec![UserStatus::Active]
        );

        let events = audit.get_all_events();
        assert_eq!(
            events.iter().map(|e| e.event).collect::<Vec<_>>(),
            vec![
                UserMgmtEvent::EmailVerifiedForAccountActivation,
                UserMgmtEvent::AccountActivated
            ]
        );
        assert!(events.iter().all(|e| e.org_id.as_deref() == Some("org-3")));
    }

    // Repository whose lookups suspend once, letting a concurrent request read
    // the same pending row before either writes
    struct YieldingUserRepository {
        inner: MockUserRepository,
    }

    #[async_trait]
    impl UserRepository for YieldingUserRepository {
        async fn find_by_email_and_app_id(
            &self,
            email: &str,
            app_id: &str,
        ) -> Result<Option<User>, DomainError> {
            let found = self.inner.find_by_email_and_app_id(email, app_id).await;
            tokio::task::yield_now().await;
            found
        }

        async fn find_by_user_id(&self, user_id: &str) -> Result<Option<User>, DomainError> {
            self.inner.find_by_user_id(user_id).await
        }

        async fn activate_pending(
            &self,
            pending: &User,
            activated_at: DateTime<Utc>,
        ) -> Result<Option<User>, DomainError> {
            self.inner.activate_pending(pending, activated_at).await
        }

        async fn revert_activation(&self, pending: &User) -> Result<bool, DomainError> {
            self.inner.revert_activation(pending).await
        }
    }

    // Identity service that suspends inside the status update
    struct YieldingIdentityService {
        inner: MockIdentityService,
    }

    #[async_trait]
    impl IdentityService for YieldingIdentityService {
        async fn update_user_status(
            &self,
            user_id: &str,
            status: UserStatus,
        ) -> Result<(), IdentityError> {
            tokio::task::yield_now().await;
            self.inner.update_user_status(user_id, status).await
        }

        async fn introspect_token(&self, token: &str) -> Result<TokenIntrospection, IdentityError> {
            self.inner.introspect_token(token).await
        }
    }

    #[tokio::test]
    async fn test_concurrent_verifications_activate_once() {
        let user = User::new("ext-77", "kim@example.com", Uuid::new_v4(), "app-7")
            .with_verification_code("909090", Utc::now() + Duration::minutes(30));
        let user_id = user.id;
        let users = Arc::new(YieldingUserRepository {
            inner: MockUserRepository::with_users(vec![user]),
        });
        let identity = Arc::new(YieldingIdentityService {
            inner: MockIdentityService::new(),
        });
        let audit = Arc::new(MockAuditEventRepository::new());
        let service = EmailVerificationService::new(
            Arc::clone(&users),
            Arc::clone(&identity),
            audit_service(&audit),
        );

        let ctx = AuditContext::new("app-7");
        let (first, second) = tokio::join!(
            service.verify_email("kim@example.com", "909090", &ctx),
            service.verify_email("kim@example.com", "909090", &ctx),
        );
        let results = [first.unwrap(), second.unwrap()];

        assert!(results.iter().all(|r| r.verified));
        assert_eq!(results.iter().filter(|r| !r.already_active).count(), 1);
        assert_eq!(
            identity.inner.status_updates(),
            vec![("ext-77".to_string(), UserStatus::Active)]
        );
        let activations = audit
            .get_all_events()
            .into_iter()
            .filter(|e| e.event == UserMgmtEvent::AccountActivated)
            .count();
        assert_eq!(activations, 1);
        assert!(users.inner.get(user_id).await.unwrap().is_active());
    }
}
