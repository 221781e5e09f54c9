#[cfg(test)]
mod tests {
    use chrono::Duration;
    use roombook_common::{HttpStatusCode, IdentityProvider, RoombookError};
    use roombook_db::{DbClientFactory, SqlAccountRepository};

    use crate::provider::LocalIdentityProvider;
    use crate::token::TokenIssuer;

    async fn provider() -> LocalIdentityProvider<SqlAccountRepository> {
        let client = DbClientFactory::new()
            .from_url("sqlite::memory:", &[])
            .await
            .expect("in-memory database");
        LocalIdentityProvider::new(
            SqlAccountRepository::new(client),
            TokenIssuer::new("test-secret", Duration::hours(168)),
            6,
        )
    }

    #[tokio::test]
    async fn test_register_login_and_profile() {
        let provider = provider().await;

        let session = provider
            .register(" Ana@Example.com ", "hunter22", Some("Ana Martin"))
            .await
            .unwrap();
        assert_eq!(session.user.email, "ana@example.com");
        assert_eq!(session.user.full_name.as_deref(), Some("Ana Martin"));

        let login = provider.login("ana@example.com", "hunter22").await.unwrap();
        assert_eq!(login.user.id, session.user.id);

        let caller = provider.authenticate(&login.token).await.unwrap();
        assert_eq!(caller.id, session.user.id);

        let profile = provider.profile(&caller.id).await.unwrap();
        assert_eq!(profile, session.user);
    }

    #[tokio::test]
    async fn test_account_without_full_name_can_log_in() {
        let provider = provider().await;

        let session = provider
            .register("bob@example.com", "hunter22", Some("   "))
            .await
            .unwrap();
        assert_eq!(session.user.full_name, None);

        let login = provider.login("bob@example.com", "hunter22").await.unwrap();
        assert_eq!(login.user.full_name, None);

        let profile = provider.profile(&login.user.id).await.unwrap();
        assert_eq!(profile.full_name, None);
        assert_eq!(profile.email, "bob@example.com");
    }

    #[tokio::test]
    async fn test_register_validation() {
        let provider = provider().await;

        for (email, password) in [("", "hunter22"), ("ana@example.com", ""), ("ana", "hunter22"), ("ana@example.com", "short")] {
            let err = provider.register(email, password, None).await.unwrap_err();
            assert!(matches!(err, RoombookError::ValidationError(_)), "{email}/{password}");
        }

        provider.register("ana@example.com", "hunter22", None).await.unwrap();
        let err = provider
            .register("ANA@example.com", "hunter22", None)
            .await
            .unwrap_err();
        assert_eq!(err.status_code(), 400);
    }

    #[tokio::test]
    async fn test_bad_credentials_are_unauthorized() {
        let provider = provider().await;
        provider.register("ana@example.com", "hunter22", None).await.unwrap();

        let err = provider.login("ana@example.com", "wrong-pass").await.unwrap_err();
        assert_eq!(err.status_code(), 401);

        let err = provider.login("bob@example.com", "hunter22").await.unwrap_err();
        assert_eq!(err.status_code(), 401);

        let err = provider.login("", "").await.unwrap_err();
        assert_eq!(err.status_code(), 400);
    }

    #[tokio::test]
    async fn test_logout_revokes_only_that_token() {
        let provider = provider().await;
        let first = provider.register("ana@example.com", "hunter22", None).await.unwrap();
        let second = provider.login("ana@example.com", "hunter22").await.unwrap();

        let caller = provider.authenticate(&first.token).await.unwrap();
        provider.logout(&caller).await.unwrap();

        let err = provider.authenticate(&first.token).await.unwrap_err();
        assert_eq!(err.status_code(), 401);
        assert!(provider.authenticate(&second.token).await.is_ok());
    }
}
