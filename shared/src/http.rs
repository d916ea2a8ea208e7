//! HTTP helpers for the Lambda handler.

use lambda_http::{Body, Response};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{Map, Value};

use crate::models::ErrorResponse;
use crate::Error;

/// Create a JSON response with the given status code and data.
pub fn json_response<T: Serialize>(status: u16, data: &T) -> Result<Response<Body>, lambda_http::Error> {
    let response = Response::builder()
        .status(status)
        .header("content-type", "application/json")
        .body(Body::from(serde_json::to_string(data)?))
        .map_err(Box::new)?;
    Ok(response)
}

/// Create a plain-text response.
pub fn text_response(status: u16, text: &str) -> Result<Response<Body>, lambda_http::Error> {
    let response = Response::builder()
        .status(status)
        .header("content-type", "text/plain; charset=utf-8")
        .body(Body::from(text.to_string()))
        .map_err(Box::new)?;
    Ok(response)
}

/// Create an `{ok: false, error}` response with the given status code.
pub fn error_response(status: u16, message: impl Into<String>) -> Result<Response<Body>, lambda_http::Error> {
    json_response(status, &ErrorResponse::new(message))
}

/// Parse a request body that must be a JSON object.
///
/// An empty body reads as `{}`. Arrays and other non-object values are
/// rejected before field extraction so they cannot fill fields by position.
pub fn parse_json_body<T: DeserializeOwned>(body: &[u8]) -> crate::Result<T> {
    let value = if body.is_empty() {
        Value::Object(Map::new())
    } else {
        serde_json::from_slice(body)
            .map_err(|e| Error::Validation(format!("Invalid request body: {}", e)))?
    };

    if !value.is_object() {
        return Err(Error::Validation(
            "Invalid request body: expected a JSON object".to_string(),
        ));
    }

    serde_json::from_value(value).map_err(|e| Error::Validation(format!("Invalid request body: {}", e)))
}

/// Map a crate error to its HTTP response.
pub fn from_error(err: &crate::Error) -> Result<Response<Body>, lambda_http::Error> {
    error_response(err.status_code(), err.client_message())
}
