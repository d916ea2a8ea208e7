//! Notion client for creating agenda pages in a database.

use std::future::Future;

use serde::{Deserialize, Serialize};
use tracing::{debug, error};

use crate::{Config, Entry, Error, Result};

/// Creates one remote record per entry and returns its identifier.
pub trait PageCreator {
    fn create_page(&self, entry: &Entry) -> impl Future<Output = Result<String>> + Send;
}

/// `POST /v1/pages` request body.
#[derive(Debug, Serialize)]
pub struct CreatePageRequest<'a> {
    pub parent: DatabaseParent<'a>,
    pub properties: PageProperties,
}

#[derive(Debug, Serialize)]
pub struct DatabaseParent<'a> {
    pub database_id: &'a str,
}

/// The six database columns an agenda page fills in.
#[derive(Debug, Serialize)]
pub struct PageProperties {
    #[serde(rename = "Nombre")]
    pub nombre: TitleProperty,
    #[serde(rename = "Fecha")]
    pub fecha: DateProperty,
    #[serde(rename = "Tipo")]
    pub tipo: MultiSelectProperty,
    #[serde(rename = "Personas")]
    pub personas: RichTextProperty,
    #[serde(rename = "Descripción")]
    pub descripcion: RichTextProperty,
    #[serde(rename = "Estado")]
    pub estado: StatusProperty,
}

#[derive(Debug, Serialize)]
pub struct TextContent {
    pub content: String,
}

#[derive(Debug, Serialize)]
pub struct RichText {
    pub text: TextContent,
}

impl RichText {
    fn plain(content: &str) -> Vec<Self> {
        vec![Self {
            text: TextContent {
                content: content.to_string(),
            },
        }]
    }
}

#[derive(Debug, Serialize)]
pub struct TitleProperty {
    pub title: Vec<RichText>,
}

#[derive(Debug, Serialize)]
pub struct DateValue {
    pub start: String,
}

#[derive(Debug, Serialize)]
pub struct DateProperty {
    pub date: DateValue,
}

#[derive(Debug, Serialize)]
pub struct SelectOption {
    pub name: String,
}

#[derive(Debug, Serialize)]
pub struct MultiSelectProperty {
    pub multi_select: Vec<SelectOption>,
}

#[derive(Debug, Serialize)]
pub struct RichTextProperty {
    pub rich_text: Vec<RichText>,
}

#[derive(Debug, Serialize)]
pub struct StatusProperty {
    pub status: SelectOption,
}

impl From<&Entry> for PageProperties {
    fn from(entry: &Entry) -> Self {
        Self {
            nombre: TitleProperty {
                title: RichText::plain(&entry.name),
            },
            fecha: DateProperty {
                date: DateValue {
                    start: entry.when.clone(),
                },
            },
            tipo: MultiSelectProperty {
                multi_select: entry
                    .categories
                    .iter()
                    .map(|name| SelectOption { name: name.clone() })
                    .collect(),
            },
            personas: RichTextProperty {
                rich_text: RichText::plain(&entry.participants),
            },
            descripcion: RichTextProperty {
                rich_text: RichText::plain(&entry.description),
            },
            estado: StatusProperty {
                status: SelectOption {
                    name: entry.status.clone(),
                },
            },
        }
    }
}

/// Subset of the created page we care about.
#[derive(Debug, Deserialize)]
struct CreatedPage {
    id: String,
}

/// Notion error object (`{"object":"error","code":...,"message":...}`).
#[derive(Debug, Deserialize)]
struct NotionErrorBody {
    code: Option<String>,
    message: String,
}

/// HTTP client for the Notion pages API.
pub struct NotionClient {
    http_client: reqwest::Client,
    base_url: String,
    token: String,
    version: String,
    database_id: String,
}

impl NotionClient {
    /// Create a new Notion client from configuration.
    pub fn new(config: &Config) -> Self {
        Self::with_http_client(reqwest::Client::new(), config)
    }

    /// Create a client around an existing `reqwest::Client`.
    pub fn with_http_client(http_client: reqwest::Client, config: &Config) -> Self {
        Self {
            http_client,
            base_url: config.notion_api_url.trim_end_matches('/').to_string(),
            token: config.notion_token.clone(),
            version: config.notion_version.clone(),
            database_id: config.notion_database_id.clone(),
        }
    }

    fn page_request<'a>(&'a self, entry: &Entry) -> CreatePageRequest<'a> {
        CreatePageRequest {
            parent: DatabaseParent {
                database_id: &self.database_id,
            },
            properties: PageProperties::from(entry),
        }
    }
}

impl PageCreator for NotionClient {
    async fn create_page(&self, entry: &Entry) -> Result<String> {
        let url = format!("{}/v1/pages", self.base_url);
        let payload = self.page_request(entry);

        let response = self
            .http_client
            .post(&url)
            .bearer_auth(&self.token)
            .header("Notion-Version", &self.version)
            .json(&payload)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(match serde_json::from_str::<NotionErrorBody>(&body) {
                Ok(notion_error) => {
                    error!(
                        "Notion rejected page: {} ({})",
                        notion_error.message,
                        notion_error.code.as_deref().unwrap_or("unknown")
                    );
                    Error::Upstream(notion_error.message)
                }
                Err(_) => {
                    error!("Notion API error: {} - {}", status, body);
                    Error::Upstream(format!("Notion API error: {}", status))
                }
            });
        }

        let page: CreatedPage = response
            .json()
            .await
            .map_err(|e| Error::Upstream(format!("Failed to parse Notion response: {}", e)))?;

        debug!("Notion page created: {}", page.id);
        Ok(page.id)
    }
}
