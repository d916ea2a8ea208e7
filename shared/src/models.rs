//! Request and response payloads for the agenda endpoints.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Body of `POST /agenda`.
///
/// Field values stay loosely typed here; [`crate::Entry::from_request`] turns
/// them into text and reports the first missing required field.
#[derive(Debug, Default, Deserialize)]
pub struct AgendaRequest {
    #[serde(rename = "Nombre", default)]
    pub nombre: Option<Value>,
    #[serde(rename = "Fecha", default)]
    pub fecha: Option<Value>,
    /// A single label or a list of labels
    #[serde(rename = "Tipo", default)]
    pub tipo: Option<Value>,
    #[serde(rename = "Personas", default)]
    pub personas: Option<Value>,
    #[serde(rename = "Descripción", default)]
    pub descripcion: Option<Value>,
    #[serde(rename = "Estado", default)]
    pub estado: Option<Value>,
}

/// Normalized values echoed back to the caller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NormalizedFields {
    #[serde(rename = "Estado")]
    pub estado: String,
    #[serde(rename = "Tipo")]
    pub tipo: Vec<String>,
}

/// Successful `POST /agenda` response.
#[derive(Debug, Serialize, Deserialize)]
pub struct AgendaResponse {
    pub ok: bool,
    pub notion_page_id: String,
    pub normalized: NormalizedFields,
}

impl AgendaResponse {
    pub fn created(notion_page_id: String, normalized: NormalizedFields) -> Self {
        Self {
            ok: true,
            notion_page_id,
            normalized,
        }
    }
}

/// Error body shared by every failing response.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub ok: bool,
    pub error: String,
}

impl ErrorResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            ok: false,
            error: message.into(),
        }
    }
}
