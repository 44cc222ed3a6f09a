//! Client for an OpenAI-compatible chat completion endpoint

use nutri_core::AssistError;
use serde::{Deserialize, Serialize};

/// Placeholder value shipped in sample `.env` files. Treated as no credential.
pub const PLACEHOLDER_KEY: &str = "your_groq_api_key_here";

/// Client for the chat completion endpoint
#[derive(Clone)]
pub struct CompletionClient {
    http: reqwest::Client,
    api_key: Option<String>,
    url: String,
    model: String,
    vision_model: String,
}

/// A message in the conversation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Message {
    pub role: String,
    pub content: Content,
}

/// Message content, either a plain string or multimodal parts
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Content {
    Text(String),
    Parts(Vec<ContentPart>),
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum ContentPart {
    #[serde(rename = "text")]
    Text { text: String },
    #[serde(rename = "image_url")]
    ImageUrl { image_url: ImageUrl },
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImageUrl {
    pub url: String,
}

/// Request body for the completions API
#[derive(Serialize)]
struct ApiRequest<'a> {
    model: &'a str,
    messages: Vec<Message>,
    max_tokens: u32,
}

/// Response from the completions API
#[derive(Debug, Deserialize)]
struct ApiResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChoiceMessage {
    #[serde(default)]
    content: Option<String>,
}

impl CompletionClient {
    pub fn new(
        api_key: Option<String>,
        url: impl Into<String>,
        model: impl Into<String>,
        vision_model: impl Into<String>,
    ) -> Self {
        Self {
            http: reqwest::Client::new(),
            api_key: api_key.filter(|k| usable_key(k)),
            url: url.into(),
            model: model.into(),
            vision_model: vision_model.into(),
        }
    }

    /// Whether live calls will be attempted
    pub fn has_credential(&self) -> bool {
        self.api_key.is_some()
    }

    /// Send a prompt as a single system message and return the reply text
    pub async fn complete(&self, prompt: &str, max_tokens: u32) -> Result<String, AssistError> {
        let messages = vec![Message {
            role: "system".to_string(),
            content: Content::Text(prompt.to_string()),
        }];
        self.send(&self.model, messages, max_tokens).await
    }

    /// Ask the vision model to describe an image given as a data URL
    pub async fn describe_image(
        &self,
        system: &str,
        instruction: &str,
        image_data_url: String,
        max_tokens: u32,
    ) -> Result<String, AssistError> {
        let messages = vec![
            Message {
                role: "system".to_string(),
                content: Content::Text(system.to_string()),
            },
            Message {
                role: "user".to_string(),
                content: Content::Parts(vec![
                    ContentPart::Text {
                        text: instruction.to_string(),
                    },
                    ContentPart::ImageUrl {
                        image_url: ImageUrl {
                            url: image_data_url,
                        },
                    },
                ]),
            },
        ];
        self.send(&self.vision_model, messages, max_tokens).await
    }

    /// One attempt, no retry. The outcome is classified into an [`AssistError`] kind.
    async fn send(
        &self,
        model: &str,
        messages: Vec<Message>,
        max_tokens: u32,
    ) -> Result<String, AssistError> {
        let api_key = self.api_key.as_deref().ok_or(AssistError::NoCredential)?;

        let request = ApiRequest {
            model,
            messages,
            max_tokens,
        };

        let response = self
            .http
            .post(&self.url)
            .bearer_auth(api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| AssistError::Transport(e.to_string()))?;

        let status = response.status();
        if status == reqwest::StatusCode::UNAUTHORIZED {
            return Err(AssistError::AuthFailure);
        }
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(AssistError::Upstream {
                status: status.as_u16(),
                body,
            });
        }

        let parsed = response
            .json::<ApiResponse>()
            .await
            .map_err(|e| AssistError::Transport(format!("Failed to parse response: {}", e)))?;

        parsed
            .choices
            .into_iter()
            .next()
            .map(|choice| choice.message.content.unwrap_or_default())
            .ok_or_else(|| AssistError::Upstream {
                status: status.as_u16(),
                body: "no choices in response".to_string(),
            })
    }
}

/// Non-blank and not the placeholder
pub fn usable_key(key: &str) -> bool {
    let key = key.trim();
    !key.is_empty() && key != PLACEHOLDER_KEY
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client(key: Option<&str>) -> CompletionClient {
        CompletionClient::new(
            key.map(str::to_string),
            "http://127.0.0.1:9/unreachable",
            "m",
            "v",
        )
    }

    #[tokio::test]
    async fn placeholder_key_never_calls_out() {
        for key in [None, Some(""), Some("  "), Some(PLACEHOLDER_KEY)] {
            let c = client(key);
            assert!(!c.has_credential());
            assert_eq!(c.complete("hi", 10).await, Err(AssistError::NoCredential));
        }
    }

    #[test]
    fn multimodal_content_serializes_as_parts() {
        let msg = Message {
            role: "user".into(),
            content: Content::Parts(vec![
                ContentPart::Text { text: "what".into() },
                ContentPart::ImageUrl {
                    image_url: ImageUrl {
                        url: "data:image/png;base64,AA==".into(),
                    },
                },
            ]),
        };
        let json = serde_json::to_value(&msg).unwrap();
        assert_eq!(json["content"][0]["type"], "text");
        assert_eq!(json["content"][1]["type"], "image_url");
        assert_eq!(json["content"][1]["image_url"]["url"], "data:image/png;base64,AA==");
    }

    #[test]
    fn plain_content_serializes_as_string() {
        let msg = Message {
            role: "system".into(),
            content: Content::Text("hello".into()),
        };
        let json = serde_json::to_value(&msg).unwrap();
        assert_eq!(json["content"], "hello");
    }
}
