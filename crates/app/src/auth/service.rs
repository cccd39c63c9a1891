//! Auth service.

use async_trait::async_trait;
use jiff::Timestamp;
use mockall::automock;
use sqlx::PgPool;
use tracing::warn;

use crate::{
    auth::{
        ApiTokenMetadata, ApiTokenUuid, ApiTokenVersion, AuthServiceError, IssuedApiToken,
        TokenHasher, build_verifier_input, format_api_token, generate_api_token_secret,
        models::NewApiToken, parse_api_token, repository::PgAuthRepository,
    },
    domain::users::records::UserUuid,
};

#[derive(Debug, Clone)]
pub struct PgAuthService {
    repository: PgAuthRepository,
    hasher: TokenHasher,
}

impl PgAuthService {
    #[must_use]
    pub fn new(pool: PgPool, hasher: TokenHasher) -> Self {
        Self {
            repository: PgAuthRepository::new(pool),
            hasher,
        }
    }

    /// Issue a new API token for the given user.
    ///
    /// # Errors
    ///
    /// Returns an error if HMAC computation or database insertion fails.
    pub async fn issue_api_token(
        &self,
        user_uuid: UserUuid,
        expires_at: Option<Timestamp>,
    ) -> Result<IssuedApiToken, AuthServiceError> {
        let token_uuid = ApiTokenUuid::new();
        let version = ApiTokenVersion::V1;
        let secret = generate_api_token_secret();
        let token = format_api_token(token_uuid.into_uuid(), version, &secret);

        let verifier_input =
            build_verifier_input(&token_uuid.into_uuid(), version, &user_uuid, &secret);

        let token_hash = self.hasher.hash(&verifier_input)?;

        let metadata = self
            .repository
            .create_api_token(&NewApiToken {
                uuid: token_uuid,
                user_uuid,
                version,
                token_hash,
                expires_at,
            })
            .await?;

        Ok(IssuedApiToken { token, metadata })
    }

    /// List all tokens for the given user.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn list_api_tokens(
        &self,
        user_uuid: UserUuid,
    ) -> Result<Vec<ApiTokenMetadata>, AuthServiceError> {
        Ok(self.repository.list_api_tokens_by_user(user_uuid).await?)
    }

    /// Revoke a token by UUID. Returns `true` if the token was active.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn revoke_api_token(
        &self,
        token_uuid: ApiTokenUuid,
    ) -> Result<bool, AuthServiceError> {
        self.repository
            .revoke_api_token(token_uuid)
            .await
            .map(|record| record.is_some())
            .map_err(AuthServiceError::from)
    }
}

#[async_trait]
impl AuthService for PgAuthService {
    async fn authenticate_bearer(&self, bearer_token: &str) -> Result<UserUuid, AuthServiceError> {
        let parsed_token = parse_api_token(bearer_token).or(Err(AuthServiceError::NotFound))?;

        let token_uuid = ApiTokenUuid::from_uuid(parsed_token.token_uuid);

        let token = self
            .repository
            .find_active_api_token(token_uuid, parsed_token.version)
            .await?
            .ok_or(AuthServiceError::NotFound)?;

        if token.version != parsed_token.version {
            return Err(AuthServiceError::NotFound);
        }

        let verifier_input = build_verifier_input(
            &parsed_token.token_uuid,
            parsed_token.version,
            &token.user_uuid,
            &parsed_token.secret,
        );

        if !self.hasher.verify(&verifier_input, &token.token_hash) {
            return Err(AuthServiceError::NotFound);
        }

        // Best-effort metadata update; auth success should not depend on this write.
        if let Err(error) = self.repository.touch_api_token_last_used(token_uuid).await {
            warn!(token = %token_uuid, "failed to record token use: {error}");
        }

        Ok(token.user_uuid)
    }
}

#[automock]
#[async_trait]
pub trait AuthService: Send + Sync {
    /// Resolve a raw bearer token to the user that owns it.
    async fn authenticate_bearer(&self, bearer_token: &str) -> Result<UserUuid, AuthServiceError>;
}

#[cfg(test)]
mod tests {
    use jiff::ToSpan;
    use testresult::TestResult;

    use crate::test::{TestContext, helpers::create_user};

    use super::*;

    #[tokio::test]
    #[ignore = "requires Docker for the Postgres test container"]
    async fn issued_token_authenticates_its_user() -> TestResult {
        let ctx = TestContext::new().await;
        let user = create_user(&ctx).await?;

        let issued = ctx.auth.issue_api_token(user, None).await?;

        assert_eq!(ctx.auth.authenticate_bearer(&issued.token).await?, user);

        let tokens = ctx.auth.list_api_tokens(user).await?;

        assert_eq!(tokens.len(), 1);
        assert!(
            tokens.first().and_then(|token| token.last_used_at).is_some(),
            "last_used_at should be recorded"
        );

        Ok(())
    }

    #[tokio::test]
    #[ignore = "requires Docker for the Postgres test container"]
    async fn revoked_token_is_rejected() -> TestResult {
        let ctx = TestContext::new().await;
        let user = create_user(&ctx).await?;

        let issued = ctx.auth.issue_api_token(user, None).await?;

        assert!(ctx.auth.revoke_api_token(issued.metadata.uuid).await?);
        assert!(!ctx.auth.revoke_api_token(issued.metadata.uuid).await?);

        let result = ctx.auth.authenticate_bearer(&issued.token).await;

        assert!(
            matches!(result, Err(AuthServiceError::NotFound)),
            "expected NotFound, got {result:?}"
        );

        Ok(())
    }

    #[tokio::test]
    #[ignore = "requires Docker for the Postgres test container"]
    async fn expired_token_is_rejected() -> TestResult {
        let ctx = TestContext::new().await;
        let user = create_user(&ctx).await?;

        let expired = Timestamp::now().checked_sub(1.hour())?;
        let issued = ctx.auth.issue_api_token(user, Some(expired)).await?;

        let result = ctx.auth.authenticate_bearer(&issued.token).await;

        assert!(
            matches!(result, Err(AuthServiceError::NotFound)),
            "expected NotFound, got {result:?}"
        );

        Ok(())
    }

    #[tokio::test]
    #[ignore = "requires Docker for the Postgres test container"]
    async fn tampered_secret_is_rejected() -> TestResult {
        let ctx = TestContext::new().await;
        let user = create_user(&ctx).await?;

        let issued = ctx.auth.issue_api_token(user, None).await?;

        let (id, _secret) = issued.token.split_once('.').expect("token should have a secret");
        let forged = format!("{id}.{}", "00".repeat(32));

        let result = ctx.auth.authenticate_bearer(&forged).await;

        assert!(
            matches!(result, Err(AuthServiceError::NotFound)),
            "expected NotFound, got {result:?}"
        );

        Ok(())
    }

    #[tokio::test]
    #[ignore = "requires Docker for the Postgres test container"]
    async fn malformed_token_is_rejected() -> TestResult {
        let ctx = TestContext::new().await;

        let result = ctx.auth.authenticate_bearer("not-a-token").await;

        assert!(
            matches!(result, Err(AuthServiceError::NotFound)),
            "expected NotFound, got {result:?}"
        );

        Ok(())
    }

    #[tokio::test]
    #[ignore = "requires Docker for the Postgres test container"]
    async fn issuing_for_unknown_user_fails() -> TestResult {
        let ctx = TestContext::new().await;

        let result = ctx.auth.issue_api_token(UserUuid::new(), None).await;

        assert!(
            matches!(result, Err(AuthServiceError::UserNotFound)),
            "expected UserNotFound, got {result:?}"
        );

        Ok(())
    }
}
