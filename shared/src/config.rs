//! Configuration loaded from environment variables at cold start.

use std::collections::HashMap;
use std::env;
use std::fmt;

use validator::Validate;

use crate::normalize::Vocabulary;
use crate::{Error, Result};

/// Default Notion API base URL.
pub const DEFAULT_NOTION_API_URL: &str = "https://api.notion.com";

/// Notion API version sent with every request.
pub const DEFAULT_NOTION_VERSION: &str = "2022-06-28";

/// Application configuration loaded from environment variables.
#[derive(Clone, Validate)]
pub struct Config {
    /// Notion integration token
    #[validate(length(min = 1, message = "NOTION_TOKEN"))]
    pub notion_token: String,
    /// Target Notion database
    #[validate(length(min = 1, message = "NOTION_DATABASE_ID"))]
    pub notion_database_id: String,
    /// Shared secret expected in `x-api-key`
    #[validate(length(min = 1, message = "API_KEY"))]
    pub api_key: String,
    /// Notion API base URL
    #[validate(url)]
    pub notion_api_url: String,
    pub notion_version: String,
    /// Raw `ESTADO_VOCABULARY` override
    pub status_vocabulary: Option<String>,
    /// Raw `TIPO_VOCABULARY` override
    pub category_vocabulary: Option<String>,
}

impl Config {
    /// Load configuration from the process environment.
    pub fn from_env() -> Result<Self> {
        Self::from_vars(&env::vars().collect())
    }

    /// Load configuration from a variable map.
    pub fn from_vars(vars: &HashMap<String, String>) -> Result<Self> {
        let get = |key: &str| vars.get(key).cloned().unwrap_or_default();
        let non_empty = |key: &str| vars.get(key).filter(|v| !v.trim().is_empty()).cloned();

        let config = Self {
            notion_token: get("NOTION_TOKEN"),
            notion_database_id: get("NOTION_DATABASE_ID"),
            api_key: get("API_KEY"),
            notion_api_url: non_empty("NOTION_API_URL")
                .unwrap_or_else(|| DEFAULT_NOTION_API_URL.to_string()),
            notion_version: non_empty("NOTION_VERSION")
                .unwrap_or_else(|| DEFAULT_NOTION_VERSION.to_string()),
            status_vocabulary: non_empty("ESTADO_VOCABULARY"),
            category_vocabulary: non_empty("TIPO_VOCABULARY"),
        };

        config.validate().map_err(|errors| {
            let mut missing: Vec<String> = errors
                .field_errors()
                .into_iter()
                .flat_map(|(field, errs)| {
                    errs.iter().map(move |e| match &e.message {
                        Some(name) => format!("missing {}", name),
                        None => format!("invalid {}", field),
                    })
                })
                .collect();
            missing.sort();
            Error::Config(missing.join(", "))
        })?;

        Ok(config)
    }

    /// Status vocabulary, from `ESTADO_VOCABULARY` or the built-in table.
    pub fn status_vocabulary(&self) -> Result<Vocabulary> {
        let vocab = match &self.status_vocabulary {
            Some(raw) => Vocabulary::from_json(raw)?,
            None => Vocabulary::default_status(),
        };
        if vocab.default_label().is_none() {
            return Err(Error::Config(
                "ESTADO_VOCABULARY needs a default label".to_string(),
            ));
        }
        Ok(vocab)
    }

    /// Category vocabulary, from `TIPO_VOCABULARY` or the built-in table.
    pub fn category_vocabulary(&self) -> Result<Vocabulary> {
        match &self.category_vocabulary {
            Some(raw) => Vocabulary::from_json(raw),
            None => Ok(Vocabulary::default_category()),
        }
    }
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("notion_token", &"<redacted>")
            .field("notion_database_id", &self.notion_database_id)
            .field("api_key", &"<redacted>")
            .field("notion_api_url", &self.notion_api_url)
            .field("notion_version", &self.notion_version)
            .field("status_vocabulary", &self.status_vocabulary.is_some())
            .field("category_vocabulary", &self.category_vocabulary.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vars(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    fn required() -> Vec<(&'static str, &'static str)> {
        vec![
            ("NOTION_TOKEN", "secret_abc"),
            ("NOTION_DATABASE_ID", "db-123"),
            ("API_KEY", "k3y"),
        ]
    }

    #[test]
    fn test_loads_with_defaults() {
        let config = Config::from_vars(&vars(&required())).unwrap();
        assert_eq!(config.notion_database_id, "db-123");
        assert_eq!(config.api_key, "k3y");
        assert_eq!(config.notion_api_url, DEFAULT_NOTION_API_URL);
        assert_eq!(config.notion_version, DEFAULT_NOTION_VERSION);
        assert!(config.status_vocabulary.is_none());
    }

    #[test]
    fn test_missing_required_vars() {
        let err = Config::from_vars(&vars(&[("NOTION_TOKEN", "t")])).unwrap_err();
        let message = err.to_string();
        assert!(message.contains("missing API_KEY"), "{}", message);
        assert!(message.contains("missing NOTION_DATABASE_ID"), "{}", message);
        assert!(!message.contains("NOTION_TOKEN"), "{}", message);
    }

    #[test]
    fn test_empty_var_counts_as_missing() {
        let mut pairs = required();
        pairs[2] = ("API_KEY", "");
        let err = Config::from_vars(&vars(&pairs)).unwrap_err();
        assert!(err.to_string().contains("missing API_KEY"));
    }

    #[test]
    fn test_invalid_api_url() {
        let mut pairs = required();
        pairs.push(("NOTION_API_URL", "not a url"));
        let err = Config::from_vars(&vars(&pairs)).unwrap_err();
        assert!(err.to_string().contains("invalid notion_api_url"));
    }

    #[test]
    fn test_status_vocabulary_override() {
        let mut pairs = required();
        pairs.push((
            "ESTADO_VOCABULARY",
            r#"{"default":"pendiente","aliases":{"sin empezar":"pendiente","hecho":"completado"}}"#,
        ));
        let config = Config::from_vars(&vars(&pairs)).unwrap();
        let vocab = config.status_vocabulary().unwrap();
        assert_eq!(vocab.canonical_or_default("Sin Empezar"), "pendiente");
        assert_eq!(vocab.canonical_or_default("HECHO"), "completado");
    }

    #[test]
    fn test_status_vocabulary_requires_default() {
        let mut pairs = required();
        pairs.push(("ESTADO_VOCABULARY", r#"{"aliases":{"hecho":"Listo"}}"#));
        let config = Config::from_vars(&vars(&pairs)).unwrap();
        assert!(matches!(config.status_vocabulary(), Err(Error::Config(_))));
    }

    #[test]
    fn test_debug_redacts_secrets() {
        let config = Config::from_vars(&vars(&required())).unwrap();
        let debug = format!("{:?}", config);
        assert!(!debug.contains("secret_abc"));
        assert!(!debug.contains("k3y"));
    }
}
