use std::sync::Arc;

use axum::{
    Extension, Json,
    body::Bytes,
    extract::State,
    http::StatusCode,
    response::IntoResponse,
};
use shared::Identity;
use tokio::task::spawn_blocking;
use tracing::{info, warn};

use crate::{error::AppError, state::AppState, utils::get_input_from_body};

pub async fn get_profile_handler(
    State(state): State<Arc<AppState>>,
) -> Result<impl IntoResponse, AppError> {
    let profile = spawn_blocking(move || state.store.read())
        .await?
        .inspect_err(|e| warn!("Failed to read profile: {e}"))?;

    Ok((StatusCode::OK, Json(profile)))
}

pub async fn post_profile_handler(
    State(state): State<Arc<AppState>>,
    body: Bytes,
) -> Result<impl IntoResponse, AppError> {
    let input = get_input_from_body(body)?;

    let outcome = spawn_blocking(move || state.store.upsert(&input))
        .await?
        .inspect_err(|e| warn!("Failed to write profile: {e}"))?;
    info!("{outcome}");

    Ok((StatusCode::OK, outcome.to_string()))
}

pub async fn user_handler(Extension(identity): Extension<Identity>) -> impl IntoResponse {
    (StatusCode::OK, Json(identity))
}

#[cfg(test)]
mod tests {
    use axum::{
        Router,
        body::{Body, to_bytes},
        http::{Request, Response, header::CONTENT_TYPE},
    };
    use serde_json::{Value, json};
    use shared::WriteOutcome;
    use tower::ServiceExt;

    use super::*;
    use crate::{
        app,
        config::Config,
        database::ProfileStore,
        identity::{HeaderIdentity, NoIdentity},
    };

    fn test_state() -> Arc<AppState> {
        let config = Config {
            port: 0,
            db_path: ":memory:".to_string(),
        };

        AppState::with_parts(
            config,
            ProfileStore::open_in_memory().unwrap(),
            Arc::new(HeaderIdentity),
        )
    }

    async fn body_text(response: Response<Body>) -> String {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    async fn get(router: &Router, uri: &str) -> Response<Body> {
        router
            .clone()
            .oneshot(Request::get(uri).body(Body::empty()).unwrap())
            .await
            .unwrap()
    }

    async fn post(router: &Router, body: Value) -> Response<Body> {
        router
            .clone()
            .oneshot(
                Request::post("/api/profile")
                    .header(CONTENT_TYPE, "application/json")
                    .body(Body::from(body.to_string()))
                    .unwrap(),
            )
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn test_read_before_write() {
        let router = app(test_state());

        let response = get(&router, "/api/profile").await;
        assert_eq!(response.status(), StatusCode::OK);

        let body: Value = serde_json::from_str(&body_text(response).await).unwrap();
        assert_eq!(
            body,
            json!({ "id": null, "username": "", "email": "", "phone": "" })
        );
    }

    #[tokio::test]
    async fn test_created_then_updated_then_read() {
        let router = app(test_state());
        let profile = json!({ "username": "alice", "email": "a@b.com", "phone": "1234567890" });

        let response = post(&router, profile.clone()).await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_text(response).await, "Profile Created");

        let profile = json!({ "username": "用户名", "email": "x@y.org", "phone": "+861234567890" });
        let response = post(&router, profile).await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_text(response).await, "Profile Updated");

        let response = get(&router, "/api/profile").await;
        let body: Value = serde_json::from_str(&body_text(response).await).unwrap();
        assert_eq!(
            body,
            json!({ "id": 1, "username": "用户名", "email": "x@y.org", "phone": "+861234567890" })
        );
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_posts_one_created() {
        let router = app(test_state());
        let profile = json!({ "username": "alice", "email": "a@b.com", "phone": "1234567890" });

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let router = router.clone();
                let profile = profile.clone();
                tokio::spawn(async move {
                    let response = post(&router, profile).await;
                    assert_eq!(response.status(), StatusCode::OK);
                    body_text(response).await
                })
            })
            .collect();

        let mut created = 0;
        for handle in handles {
            let outcome: WriteOutcome = handle.await.unwrap().parse().unwrap();
            if outcome == WriteOutcome::Created {
                created += 1;
            }
        }
        assert_eq!(created, 1);
    }

    #[tokio::test]
    async fn test_malformed_post() {
        let router = app(test_state());

        let response = router
            .clone()
            .oneshot(
                Request::post("/api/profile")
                    .header(CONTENT_TYPE, "application/json")
                    .body(Body::from("{ nope"))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(body_text(response).await, "Malformed payload");
    }

    #[tokio::test]
    async fn test_storage_failure_is_bad_request() {
        let failing = AppState::with_parts(
            Config {
                port: 0,
                db_path: ":memory:".to_string(),
            },
            ProfileStore::with_connection(read_only_connection()),
            Arc::new(NoIdentity),
        );
        let router = app(failing);

        let response = get(&router, "/api/profile").await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert!(body_text(response).await.contains("no such table"));

        let response = post(&router, json!({ "username": "alice" })).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    // Table creation fails on this connection, startup still goes through.
    fn read_only_connection() -> rusqlite::Connection {
        let connection = rusqlite::Connection::open_in_memory().unwrap();
        connection.pragma_update(None, "query_only", true).unwrap();
        connection
    }

    #[tokio::test]
    async fn test_user_without_identity() {
        let router = app(test_state());

        let response = get(&router, "/api/user").await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_text(response).await, "{}");
    }

    #[tokio::test]
    async fn test_user_is_get_only() {
        let router = app(test_state());

        let response = router
            .clone()
            .oneshot(Request::post("/api/user").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
    }

    #[tokio::test]
    async fn test_user_with_identity() {
        let router = app(test_state());

        let response = router
            .clone()
            .oneshot(
                Request::get("/api/user")
                    .header("x-user-did", "z1abc")
                    .header("x-user-role", "owner")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body: Value = serde_json::from_str(&body_text(response).await).unwrap();
        assert_eq!(body, json!({ "did": "z1abc", "role": "owner" }));
    }
}
