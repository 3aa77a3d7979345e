use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Malformed payload")]
    MalformedPayload,

    #[error("{0}")]
    Storage(#[from] rusqlite::Error),

    #[error("Storage unavailable")]
    StoragePoisoned,

    #[error("Storage task failed: {0}")]
    StorageTask(#[from] tokio::task::JoinError),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match self {
            AppError::MalformedPayload => StatusCode::BAD_REQUEST,
            AppError::Storage(_) => StatusCode::BAD_REQUEST,
            AppError::StoragePoisoned | AppError::StorageTask(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };

        (status, self.to_string()).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_storage_error_is_client_error_with_message() {
        let err = AppError::from(rusqlite::Error::InvalidQuery);
        let message = err.to_string();
        let response = err.into_response();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(message, rusqlite::Error::InvalidQuery.to_string());
    }

    #[tokio::test]
    async fn test_panicked_storage_task_is_server_error() {
        let join_error = tokio::task::spawn_blocking(|| panic!("storage thread died"))
            .await
            .unwrap_err();

        let response = AppError::from(join_error).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_malformed_payload_status() {
        let response = AppError::MalformedPayload.into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}
