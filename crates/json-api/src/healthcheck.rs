//! Healthcheck Handler

use salvo::{oapi::ToSchema, prelude::*};
use serde::{Deserialize, Serialize};

/// Healthcheck response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct HealthResponse {
    /// Always `ok` while the process is serving requests
    pub status: String,
}

/// Healthcheck handler
///
/// Liveness only; the database is not consulted.
#[endpoint(tags("health"), summary = "Health check endpoint")]
pub(crate) async fn handler() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_owned(),
    })
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use testresult::TestResult;

    use super::*;

    #[tokio::test]
    async fn test_healthcheck_needs_no_state() -> TestResult {
        let router = Router::with_path("healthcheck").get(handler);

        let mut res = TestClient::get("http://example.com/healthcheck")
            .send(&Service::new(router))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::OK));

        let body: HealthResponse = res.take_json().await?;

        assert_eq!(body.status, "ok");

        Ok(())
    }
}
