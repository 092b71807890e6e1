//! REST handlers for the memory endpoints.

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value as JsonValue;
use tracing::instrument;

use crate::convert::json_to_text;
use crate::dispatch::{Dispatcher, Operation, Outcome, OutcomeKind};
use crate::error::McpError;

/// Body of every memory endpoint response.
#[derive(Debug, Serialize, Deserialize)]
pub struct MessageResponse {
    /// Human-readable result message
    pub message: String,
}

/// Health check response.
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Service status
    pub status: String,
}

/// Body of `POST /api/memory/store`.
///
/// Field names are accepted in either case (`key` or `Key`). An absent field
/// is `None`; a field sent as `null` is `Some(Null)` and coerces to `""`.
#[derive(Debug, Deserialize)]
pub struct StoreRequest {
    #[serde(default, alias = "Key", deserialize_with = "present")]
    key: Option<JsonValue>,
    #[serde(default, alias = "Value", deserialize_with = "present")]
    value: Option<JsonValue>,
}

fn present<'de, D>(deserializer: D) -> Result<Option<JsonValue>, D::Error>
where
    D: Deserializer<'de>,
{
    JsonValue::deserialize(deserializer).map(Some)
}

impl TryFrom<StoreRequest> for Operation {
    type Error = McpError;

    fn try_from(req: StoreRequest) -> Result<Self, Self::Error> {
        match (req.key, req.value) {
            (Some(key), Some(value)) => Ok(Operation::Store {
                key: json_to_text(&key),
                value: json_to_text(&value),
            }),
            (None, Some(_)) => Err(McpError::MissingArg("key".to_string())),
            (Some(_), None) => Err(McpError::MissingArg("value".to_string())),
            (None, None) => Err(McpError::MissingArg("key, value".to_string())),
        }
    }
}

fn message(status: StatusCode, message: String) -> Response {
    (status, Json(MessageResponse { message })).into_response()
}

impl IntoResponse for Outcome {
    fn into_response(self) -> Response {
        let status = match self.kind {
            OutcomeKind::Success => StatusCode::OK,
            OutcomeKind::NotFound => StatusCode::NOT_FOUND,
            OutcomeKind::Invalid => StatusCode::BAD_REQUEST,
            OutcomeKind::Error => StatusCode::INTERNAL_SERVER_ERROR,
        };
        message(status, self.message)
    }
}

impl IntoResponse for McpError {
    fn into_response(self) -> Response {
        let status = if self.is_client_error() {
            StatusCode::BAD_REQUEST
        } else {
            StatusCode::INTERNAL_SERVER_ERROR
        };
        message(status, self.to_string())
    }
}

/// `GET /health`
#[instrument]
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
    })
}

/// `POST /api/memory/store`
#[instrument(skip(dispatcher, payload))]
pub async fn store(
    State(dispatcher): State<Dispatcher>,
    payload: Result<Json<StoreRequest>, JsonRejection>,
) -> Response {
    let Json(req) = match payload {
        Ok(json) => json,
        Err(rejection) => return message(rejection.status(), rejection.body_text()),
    };

    match Operation::try_from(req) {
        Ok(op) => dispatcher.dispatch(op).into_response(),
        Err(err) => err.into_response(),
    }
}

/// `GET /api/memory/list`
#[instrument(skip(dispatcher))]
pub async fn list(State(dispatcher): State<Dispatcher>) -> Outcome {
    dispatcher.dispatch(Operation::List)
}

/// `DELETE /api/memory/clear`
#[instrument(skip(dispatcher))]
pub async fn clear(State(dispatcher): State<Dispatcher>) -> Outcome {
    dispatcher.dispatch(Operation::Clear)
}

/// `GET /api/memory/{key}`
#[instrument(skip(dispatcher))]
pub async fn get(State(dispatcher): State<Dispatcher>, Path(key): Path<String>) -> Outcome {
    dispatcher.dispatch(Operation::Get { key })
}

/// `DELETE /api/memory/{key}`
#[instrument(skip(dispatcher))]
pub async fn delete(State(dispatcher): State<Dispatcher>, Path(key): Path<String>) -> Outcome {
    dispatcher.dispatch(Operation::Delete { key })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn request(value: JsonValue) -> StoreRequest {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_store_request_accepts_either_case() {
        let op = Operation::try_from(request(json!({"Key": "foo", "Value": "bar"}))).unwrap();
        assert_eq!(
            op,
            Operation::Store {
                key: "foo".to_string(),
                value: "bar".to_string()
            }
        );
    }

    #[test]
    fn test_store_request_missing_fields() {
        let err = Operation::try_from(request(json!({"key": "foo"}))).unwrap_err();
        assert_eq!(err, McpError::MissingArg("value".to_string()));
        let err = Operation::try_from(request(json!({}))).unwrap_err();
        assert_eq!(err, McpError::MissingArg("key, value".to_string()));
    }

    #[test]
    fn test_store_request_null_key_is_empty() {
        let op = Operation::try_from(request(json!({"key": null, "value": "v"}))).unwrap();
        assert_eq!(
            op,
            Operation::Store {
                key: String::new(),
                value: "v".to_string()
            }
        );
    }

    #[test]
    fn test_outcome_status_codes() {
        assert_eq!(Outcome::success("ok").into_response().status(), StatusCode::OK);
        assert_eq!(
            Outcome::not_found("gone").into_response().status(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            Outcome::invalid("bad").into_response().status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            Outcome::error("boom").into_response().status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
