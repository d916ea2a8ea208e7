//! Vocabulary lookups for the free-text `Estado` and `Tipo` fields.
//!
//! A [`Vocabulary`] maps folded aliases to canonical labels. Folding trims,
//! lowercases and strips diacritics so `" SIN EMPEZAR "` and `"sin empezar"`
//! hit the same entry. The folded form is only ever used as a lookup key.

use std::collections::HashMap;

use serde::Deserialize;
use unicode_normalization::{char::is_combining_mark, UnicodeNormalization};

use crate::{Error, Result};

/// Fold free text into its lookup key.
pub fn fold(input: &str) -> String {
    input
        .trim()
        .to_lowercase()
        .nfd()
        .filter(|c| !is_combining_mark(*c))
        .collect()
}

/// Alias table mapping free text to canonical labels.
#[derive(Debug, Clone)]
pub struct Vocabulary {
    aliases: HashMap<String, String>,
    default_label: Option<String>,
}

/// Wire shape of a vocabulary override (`ESTADO_VOCABULARY`, `TIPO_VOCABULARY`).
#[derive(Debug, Deserialize)]
struct VocabularySpec {
    #[serde(default)]
    default: Option<String>,
    aliases: HashMap<String, String>,
}

impl Vocabulary {
    /// Build a vocabulary from `(alias, label)` pairs. Aliases are folded.
    pub fn new<'a>(
        entries: impl IntoIterator<Item = (&'a str, &'a str)>,
        default_label: Option<&str>,
    ) -> Self {
        Self {
            aliases: entries
                .into_iter()
                .map(|(alias, label)| (fold(alias), label.to_string()))
                .collect(),
            default_label: default_label.map(str::to_string),
        }
    }

    /// Parse a vocabulary from its JSON override form.
    pub fn from_json(raw: &str) -> Result<Self> {
        let spec: VocabularySpec = serde_json::from_str(raw)
            .map_err(|e| Error::Config(format!("Invalid vocabulary: {}", e)))?;

        if spec.aliases.values().any(|label| label.trim().is_empty()) {
            return Err(Error::Config("Vocabulary labels cannot be empty".to_string()));
        }
        if matches!(&spec.default, Some(label) if label.trim().is_empty()) {
            return Err(Error::Config("Vocabulary default cannot be empty".to_string()));
        }

        Ok(Self::new(
            spec.aliases.iter().map(|(a, l)| (a.as_str(), l.as_str())),
            spec.default.as_deref(),
        ))
    }

    /// Status vocabulary of the deployed Notion board.
    pub fn default_status() -> Self {
        Self::new(
            [
                ("sin empezar", "Sin empezar"),
                ("pendiente", "Sin empezar"),
                ("no iniciado", "Sin empezar"),
                ("en progreso", "En progreso"),
                ("progreso", "En progreso"),
                ("en curso", "En progreso"),
                ("listo", "Listo"),
                ("completado", "Listo"),
                ("completada", "Listo"),
                ("terminado", "Listo"),
                ("terminada", "Listo"),
            ],
            Some("Sin empezar"),
        )
    }

    /// Category vocabulary of the deployed Notion board.
    pub fn default_category() -> Self {
        Self::new(
            [
                ("reunion", "Reunión"),
                ("cita", "Cita"),
                ("tarea", "Tarea"),
                ("recordatorio", "Recordatorio"),
            ],
            None,
        )
    }

    /// Canonical label for `input`, if any alias matches.
    pub fn lookup(&self, input: &str) -> Option<&str> {
        self.aliases.get(&fold(input)).map(String::as_str)
    }

    /// Label used when nothing matches.
    pub fn default_label(&self) -> Option<&str> {
        self.default_label.as_deref()
    }

    /// Map to a canonical label, falling back to the default label.
    ///
    /// Vocabularies without a default fall back to the trimmed input.
    pub fn canonical_or_default(&self, input: &str) -> String {
        self.lookup(input)
            .or(self.default_label())
            .map(str::to_string)
            .unwrap_or_else(|| input.trim().to_string())
    }

    /// Map to a canonical label, passing unmatched input through trimmed.
    pub fn canonical_or_passthrough(&self, input: &str) -> String {
        self.lookup(input)
            .map(str::to_string)
            .unwrap_or_else(|| input.trim().to_string())
    }
}
