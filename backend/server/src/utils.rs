use axum::body::Bytes;
use shared::ProfileInput;

use crate::error::AppError;

pub fn get_input_from_body(body: Bytes) -> Result<ProfileInput, AppError> {
    serde_json::from_slice(&body).map_err(|_| AppError::MalformedPayload)
}
