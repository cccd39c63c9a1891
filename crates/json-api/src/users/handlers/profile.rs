//! User Profile Handler

use std::sync::Arc;

use salvo::{oapi::ToSchema, prelude::*};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use bazaar_app::domain::users::records::UserRecord;

use crate::{extensions::*, state::State, users::errors::into_status_error};

/// Public profile of the authenticated user.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct UserResponse {
    pub id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub created_at: String,
}

impl From<UserRecord> for UserResponse {
    fn from(user: UserRecord) -> Self {
        Self {
            id: user.uuid.into(),
            first_name: user.first_name,
            last_name: user.last_name,
            email: user.email,
            created_at: user.created_at.to_string(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct UserEnvelope {
    pub user: UserResponse,
}

/// User Profile Handler
#[endpoint(
    tags("users"),
    summary = "Get Profile",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Profile of the caller"),
        (status_code = StatusCode::UNAUTHORIZED, description = "Unauthorized"),
        (status_code = StatusCode::NOT_FOUND, description = "User not found"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(depot: &mut Depot) -> Result<Json<UserEnvelope>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let user = depot.user_uuid_or_401()?;

    let user = state
        .app
        .users
        .get_user(user)
        .await
        .map_err(into_status_error)?;

    Ok(Json(UserEnvelope { user: user.into() }))
}

#[cfg(test)]
mod tests {
    use bazaar_app::domain::users::{MockUsersService, UsersServiceError};
    use jiff::Timestamp;
    use salvo::test::{ResponseExt, TestClient};
    use testresult::TestResult;

    use crate::test_helpers::{TEST_USER_UUID, users_service};

    use super::*;

    fn make_service(repo: MockUsersService) -> Service {
        users_service(repo, Router::with_path("users/profile").get(handler))
    }

    #[tokio::test]
    async fn test_profile_returns_caller() -> TestResult {
        let mut repo = MockUsersService::new();

        repo.expect_get_user()
            .once()
            .withf(|user| *user == TEST_USER_UUID)
            .return_once(|uuid| {
                Ok(UserRecord {
                    uuid,
                    first_name: "Ada".to_string(),
                    last_name: "Lovelace".to_string(),
                    email: "ada@example.com".to_string(),
                    created_at: Timestamp::UNIX_EPOCH,
                    updated_at: Timestamp::UNIX_EPOCH,
                })
            });

        repo.expect_create_user().never();

        let mut res = TestClient::get("http://example.com/users/profile")
            .send(&make_service(repo))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::OK));

        let body: UserEnvelope = res.take_json().await?;

        assert_eq!(body.user.id, TEST_USER_UUID.into_uuid());
        assert_eq!(body.user.email, "ada@example.com");

        Ok(())
    }

    #[tokio::test]
    async fn test_profile_missing_user_returns_404() -> TestResult {
        let mut repo = MockUsersService::new();

        repo.expect_get_user()
            .once()
            .return_once(|_| Err(UsersServiceError::NotFound));

        repo.expect_create_user().never();

        let res = TestClient::get("http://example.com/users/profile")
            .send(&make_service(repo))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::NOT_FOUND));

        Ok(())
    }
}
