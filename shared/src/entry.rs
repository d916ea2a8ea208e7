//! Validated agenda entry and its conversion from the loose request body.

use serde_json::Value;

use crate::models::{AgendaRequest, NormalizedFields};
use crate::normalize::Vocabulary;
use crate::{Error, Result};

/// A validated, normalized agenda entry ready to be sent to Notion.
#[derive(Debug, Clone, PartialEq)]
pub struct Entry {
    /// Title (`Nombre`)
    pub name: String,
    /// Date text (`Fecha`), passed through verbatim
    pub when: String,
    /// Canonical or passthrough labels (`Tipo`), never empty
    pub categories: Vec<String>,
    /// `Personas`
    pub participants: String,
    /// `Descripción`
    pub description: String,
    /// Canonical status label (`Estado`)
    pub status: String,
}

impl Entry {
    /// Validate and normalize a request body.
    ///
    /// Required fields are checked in order `Nombre`, `Fecha`, `Tipo` and the
    /// first missing one is reported as `Falta <Field>`.
    pub fn from_request(
        request: AgendaRequest,
        status_vocab: &Vocabulary,
        category_vocab: &Vocabulary,
    ) -> Result<Self> {
        let name = required_text("Nombre", request.nombre.as_ref())?;
        let when = required_text("Fecha", request.fecha.as_ref())?;
        let raw_categories = category_values(request.tipo.as_ref())?;

        let participants = optional_text("Personas", request.personas.as_ref())?.unwrap_or_default();
        let description =
            optional_text("Descripción", request.descripcion.as_ref())?.unwrap_or_default();
        let raw_status = optional_text("Estado", request.estado.as_ref())?.unwrap_or_default();

        let categories = raw_categories
            .iter()
            .map(|c| category_vocab.canonical_or_passthrough(c))
            .collect();

        Ok(Self {
            name,
            when,
            categories,
            participants,
            description,
            status: status_vocab.canonical_or_default(&raw_status),
        })
    }

    /// Fields echoed back in the success response.
    pub fn normalized(&self) -> NormalizedFields {
        NormalizedFields {
            estado: self.status.clone(),
            tipo: self.categories.clone(),
        }
    }
}

fn missing(field: &str) -> Error {
    Error::Validation(format!("Falta {}", field))
}

fn invalid(field: &str) -> Error {
    Error::Validation(format!("Campo inválido: {}", field))
}

/// Render a scalar JSON value as text. `null`, `false`, `0` and `""` count as absent.
fn scalar_text(field: &str, value: &Value) -> Result<Option<String>> {
    match value {
        Value::Null | Value::Bool(false) => Ok(None),
        Value::Number(n) if n.as_f64() == Some(0.0) => Ok(None),
        Value::Bool(true) => Ok(Some("true".to_string())),
        Value::Number(n) => Ok(Some(n.to_string())),
        Value::String(s) if s.is_empty() => Ok(None),
        Value::String(s) => Ok(Some(s.clone())),
        Value::Array(_) | Value::Object(_) => Err(invalid(field)),
    }
}

fn optional_text(field: &str, value: Option<&Value>) -> Result<Option<String>> {
    match value {
        Some(v) => scalar_text(field, v),
        None => Ok(None),
    }
}

fn required_text(field: &str, value: Option<&Value>) -> Result<String> {
    optional_text(field, value)?.ok_or_else(|| missing(field))
}

/// Coerce `Tipo` into a non-empty list of trimmed, non-blank labels.
fn category_values(value: Option<&Value>) -> Result<Vec<String>> {
    let items: Vec<&Value> = match value {
        Some(Value::Array(items)) => items.iter().collect(),
        Some(other) => vec![other],
        None => Vec::new(),
    };

    let mut labels = Vec::with_capacity(items.len());
    for item in items {
        if let Some(text) = scalar_text("Tipo", item)? {
            if !text.trim().is_empty() {
                labels.push(text);
            }
        }
    }

    if labels.is_empty() {
        return Err(missing("Tipo"));
    }
    Ok(labels)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn build(body: Value) -> Result<Entry> {
        let request: AgendaRequest = serde_json::from_value(body).unwrap();
        Entry::from_request(
            request,
            &Vocabulary::default_status(),
            &Vocabulary::default_category(),
        )
    }

    fn validation_message(result: Result<Entry>) -> String {
        match result {
            Err(Error::Validation(msg)) => msg,
            other => panic!("expected validation error, got {:?}", other),
        }
    }

    #[test]
    fn test_minimal_payload() {
        let entry = build(json!({"Nombre": "A", "Fecha": "2026-01-01", "Tipo": "Tarea"})).unwrap();
        assert_eq!(entry.name, "A");
        assert_eq!(entry.when, "2026-01-01");
        assert_eq!(entry.categories, vec!["Tarea"]);
        assert_eq!(entry.status, "Sin empezar");
        assert_eq!(entry.participants, "");
        assert_eq!(entry.description, "");
    }

    #[test]
    fn test_missing_fields_reported_in_order() {
        assert_eq!(validation_message(build(json!({}))), "Falta Nombre");
        assert_eq!(
            validation_message(build(json!({"Fecha": "x", "Tipo": "Cita"}))),
            "Falta Nombre"
        );
        assert_eq!(
            validation_message(build(json!({"Nombre": "A", "Tipo": "Cita"}))),
            "Falta Fecha"
        );
        assert_eq!(
            validation_message(build(json!({"Nombre": "A", "Fecha": "x"}))),
            "Falta Tipo"
        );
    }

    #[test]
    fn test_falsy_values_count_as_missing() {
        assert_eq!(
            validation_message(build(json!({"Nombre": "", "Fecha": "x", "Tipo": "Cita"}))),
            "Falta Nombre"
        );
        assert_eq!(
            validation_message(build(json!({"Nombre": "A", "Fecha": null, "Tipo": "Cita"}))),
            "Falta Fecha"
        );
        assert_eq!(
            validation_message(build(json!({"Nombre": "A", "Fecha": "x", "Tipo": []}))),
            "Falta Tipo"
        );
        assert_eq!(
            validation_message(build(json!({"Nombre": "A", "Fecha": "x", "Tipo": ["  ", ""]}))),
            "Falta Tipo"
        );
    }

    #[test]
    fn test_zero_counts_as_missing() {
        assert_eq!(
            validation_message(build(json!({"Nombre": 0, "Fecha": "x", "Tipo": "Cita"}))),
            "Falta Nombre"
        );
        assert_eq!(
            validation_message(build(json!({"Nombre": "A", "Fecha": 0.0, "Tipo": "Cita"}))),
            "Falta Fecha"
        );
        assert_eq!(
            validation_message(build(json!({"Nombre": "A", "Fecha": "x", "Tipo": 0}))),
            "Falta Tipo"
        );
        let entry = build(json!({"Nombre": "A", "Fecha": "x", "Tipo": "Cita", "Personas": 0})).unwrap();
        assert_eq!(entry.participants, "");
    }

    #[test]
    fn test_scalar_values_rendered_as_text() {
        let entry = build(json!({"Nombre": 42, "Fecha": "x", "Tipo": "Cita", "Personas": true})).unwrap();
        assert_eq!(entry.name, "42");
        assert_eq!(entry.participants, "true");
    }

    #[test]
    fn test_structured_values_rejected() {
        assert_eq!(
            validation_message(build(json!({"Nombre": {"a": 1}, "Fecha": "x", "Tipo": "Cita"}))),
            "Campo inválido: Nombre"
        );
        assert_eq!(
            validation_message(build(json!({"Nombre": "A", "Fecha": "x", "Tipo": [["Cita"]]}))),
            "Campo inválido: Tipo"
        );
    }

    #[test]
    fn test_categories_keep_order_and_length() {
        let entry = build(json!({
            "Nombre": "A",
            "Fecha": "x",
            "Tipo": ["recordatorio", " Llamada ", "REUNION"]
        }))
        .unwrap();
        assert_eq!(entry.categories, vec!["Recordatorio", "Llamada", "Reunión"]);
    }

    #[test]
    fn test_blank_category_elements_dropped() {
        let entry = build(json!({"Nombre": "A", "Fecha": "x", "Tipo": ["Cita", " ", null]})).unwrap();
        assert_eq!(entry.categories, vec!["Cita"]);
    }

    #[test]
    fn test_status_normalized() {
        let entry = build(json!({"Nombre": "A", "Fecha": "x", "Tipo": "Cita", "Estado": " SIN EMPEZAR "})).unwrap();
        assert_eq!(entry.status, "Sin empezar");

        let entry = build(json!({"Nombre": "A", "Fecha": "x", "Tipo": "Cita", "Estado": "Terminada"})).unwrap();
        assert_eq!(entry.status, "Listo");

        let entry = build(json!({"Nombre": "A", "Fecha": "x", "Tipo": "Cita", "Estado": "archivado"})).unwrap();
        assert_eq!(entry.status, "Sin empezar");
    }

    #[test]
    fn test_fecha_passed_through_verbatim() {
        let entry = build(json!({"Nombre": "A", "Fecha": " 2026-01-12T16:00:00-05:00", "Tipo": "Cita"})).unwrap();
        assert_eq!(entry.when, " 2026-01-12T16:00:00-05:00");
    }

    #[test]
    fn test_normalized_echo() {
        let entry = build(json!({"Nombre": "A", "Fecha": "x", "Tipo": "cita", "Estado": "en curso"})).unwrap();
        let normalized = entry.normalized();
        assert_eq!(normalized.estado, "En progreso");
        assert_eq!(normalized.tipo, vec!["Cita"]);
    }
}
