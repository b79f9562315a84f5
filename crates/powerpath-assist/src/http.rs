//! HTTP collaborator — `generateContent`-style transport to the remote
//! conversational model.

use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use powerpath_core::collaborator::{Collaborator, CollaboratorError};
use powerpath_core::turn::{Role, Turn};

use crate::briefing::SYSTEM_BRIEFING;

/// Default API endpoint base.
pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com";

/// Default per-request timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Configuration for the HTTP collaborator.
#[derive(Debug, Clone)]
pub struct HttpCollaboratorConfig {
    /// API endpoint base URL.
    pub base_url: String,
    /// Model identifier.
    pub model: String,
    /// API key sent as a query parameter.
    pub api_key: String,
    /// Per-request timeout.
    pub timeout: Duration,
}

impl HttpCollaboratorConfig {
    /// Configuration with the default endpoint and timeout.
    #[must_use]
    pub fn new(api_key: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_owned(),
            model: model.into(),
            api_key: api_key.into(),
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

/// Collaborator implementation over the remote model's REST API.
#[derive(Debug, Clone)]
pub struct HttpCollaborator {
    client: reqwest::Client,
    config: HttpCollaboratorConfig,
}

impl HttpCollaborator {
    /// Builds the client with the configured request timeout.
    ///
    /// # Errors
    ///
    /// Returns [`CollaboratorError::Unavailable`] when the underlying
    /// client cannot be constructed.
    pub fn new(config: HttpCollaboratorConfig) -> Result<Self, CollaboratorError> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| CollaboratorError::Unavailable(e.to_string()))?;
        Ok(Self { client, config })
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/v1beta/models/{}:generateContent",
            self.config.base_url.trim_end_matches('/'),
            self.config.model
        )
    }
}

#[derive(Debug, Serialize)]
struct GenerateContentRequest {
    #[serde(rename = "systemInstruction")]
    system_instruction: Content,
    contents: Vec<Content>,
}

#[derive(Debug, Serialize, Deserialize)]
struct Content {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    role: Option<String>,
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Debug, Serialize, Deserialize)]
struct Part {
    text: String,
}

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Content,
}

fn wire_role(role: Role) -> &'static str {
    match role {
        Role::User => "user",
        Role::Assistant => "model",
    }
}

fn build_request(history: &[Turn], utterance: &str) -> GenerateContentRequest {
    let mut contents: Vec<Content> = history
        .iter()
        .map(|turn| Content {
            role: Some(wire_role(turn.role).to_owned()),
            parts: vec![Part {
                text: turn.message.clone(),
            }],
        })
        .collect();
    contents.push(Content {
        role: Some("user".to_owned()),
        parts: vec![Part {
            text: utterance.to_owned(),
        }],
    });

    GenerateContentRequest {
        system_instruction: Content {
            role: None,
            parts: vec![Part {
                text: SYSTEM_BRIEFING.to_owned(),
            }],
        },
        contents,
    }
}

#[async_trait]
impl Collaborator for HttpCollaborator {
    async fn complete(
        &self,
        history: &[Turn],
        utterance: &str,
    ) -> Result<String, CollaboratorError> {
        let request = build_request(history, utterance);

        let response = self
            .client
            .post(self.endpoint())
            .query(&[("key", self.config.api_key.as_str())])
            .json(&request)
            .send()
            .await
            .map_err(|e| CollaboratorError::Unavailable(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(CollaboratorError::Unavailable(format!(
                "unexpected status {status}"
            )));
        }

        let payload: GenerateContentResponse = response
            .json()
            .await
            .map_err(|e| CollaboratorError::Unavailable(e.to_string()))?;

        payload
            .candidates
            .into_iter()
            .next()
            .and_then(|candidate| candidate.content.parts.into_iter().next())
            .map(|part| part.text)
            .filter(|text| !text.trim().is_empty())
            .ok_or(CollaboratorError::EmptyCompletion)
    }
}
