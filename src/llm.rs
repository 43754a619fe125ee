use crate::config::LlmConfig;
use crate::error::{Error, Result};
use crate::http::HttpClient;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::str::FromStr;
use std::time::Duration;
use tracing::{debug, warn};

/// LLM provider — determines API format and endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Provider {
    /// Local ollama server, native `/api/chat` endpoint.
    #[default]
    Ollama,
    /// Any OpenAI-compatible API (openai.com, vLLM, llama.cpp server, etc.)
    #[serde(rename = "openai")]
    OpenAi,
    OpenRouter,
}

impl Provider {
    fn default_base_url(&self) -> &'static str {
        match self {
            Self::Ollama => "http://localhost:11434",
            Self::OpenAi => "https://api.openai.com/v1",
            Self::OpenRouter => "https://openrouter.ai/api/v1",
        }
    }

    fn default_api_key_env(&self) -> Option<&'static str> {
        match self {
            Self::Ollama => None,
            Self::OpenAi => Some("OPENAI_API_KEY"),
            Self::OpenRouter => Some("OPENROUTER_API_KEY"),
        }
    }
}

impl FromStr for Provider {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "ollama" => Ok(Self::Ollama),
            "openai" => Ok(Self::OpenAi),
            "openrouter" => Ok(Self::OpenRouter),
            other => Err(format!(
                "unknown provider '{other}' (expected ollama, openai or openrouter)"
            )),
        }
    }
}

impl std::fmt::Display for Provider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Ollama => write!(f, "ollama"),
            Self::OpenAi => write!(f, "openai"),
            Self::OpenRouter => write!(f, "openrouter"),
        }
    }
}

pub struct LlmClient {
    provider: Provider,
    api_key: String,
    model: String,
    base_url: String,
    http: HttpClient,
}

// -- Ollama native format --

#[derive(Serialize)]
struct OllamaChatRequest<'a> {
    model: &'a str,
    messages: Vec<Msg<'a>>,
    format: &'a Value,
    stream: bool,
}

#[derive(Deserialize)]
struct OllamaChatResponse {
    message: ChatMessage,
}

// -- OpenAI-compatible format --

#[derive(Serialize)]
struct OpenAiRequest<'a> {
    model: &'a str,
    messages: Vec<Msg<'a>>,
    response_format: ResponseFormat<'a>,
}

#[derive(Serialize)]
struct ResponseFormat<'a> {
    #[serde(rename = "type")]
    kind: &'static str,
    json_schema: JsonSchemaFormat<'a>,
}

#[derive(Serialize)]
struct JsonSchemaFormat<'a> {
    name: &'a str,
    schema: &'a Value,
    strict: bool,
}

#[derive(Deserialize)]
struct OpenAiResponse {
    choices: Vec<OpenAiChoice>,
}

#[derive(Deserialize)]
struct OpenAiChoice {
    message: ChatMessage,
}

// -- Shared --

#[derive(Serialize)]
struct Msg<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Deserialize)]
struct ChatMessage {
    #[serde(default)]
    content: String,
}

impl LlmClient {
    pub fn new(
        provider: Provider,
        api_key: String,
        model: String,
        base_url: Option<String>,
        timeout: Duration,
    ) -> Result<Self> {
        let http = HttpClient::new(concat!("artic-tools/", env!("CARGO_PKG_VERSION")), timeout)?;
        let base_url = base_url
            .unwrap_or_else(|| provider.default_base_url().into())
            .trim_end_matches('/')
            .to_string();
        Ok(Self {
            provider,
            api_key,
            model,
            base_url,
            http,
        })
    }

    /// Build from config, reading the API key from the configured (or provider default) env var.
    pub fn from_config(config: &LlmConfig) -> Result<Self> {
        let env_var = config
            .api_key_env
            .as_deref()
            .or_else(|| config.provider.default_api_key_env());
        let api_key = env_var
            .and_then(|var| std::env::var(var).ok())
            .unwrap_or_default();
        Self::new(
            config.provider,
            api_key,
            config.model.clone(),
            config.base_url.clone(),
            config.timeout(),
        )
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub fn provider(&self) -> Provider {
        self.provider
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Send a system + user prompt, constraining the reply to `schema`.
    /// Returns the model's message content untouched.
    pub async fn complete_with_schema(
        &self,
        system: &str,
        user_message: &str,
        schema_name: &str,
        schema: &Value,
    ) -> Result<String> {
        debug!(provider = %self.provider, model = %self.model, schema_name, "sending LLM request");

        let messages = vec![
            Msg {
                role: "system",
                content: system,
            },
            Msg {
                role: "user",
                content: user_message,
            },
        ];

        match self.provider {
            Provider::Ollama => self.complete_ollama(messages, schema).await,
            Provider::OpenAi | Provider::OpenRouter => {
                self.complete_openai(messages, schema_name, schema).await
            }
        }
    }

    async fn complete_ollama(&self, messages: Vec<Msg<'_>>, schema: &Value) -> Result<String> {
        let request = OllamaChatRequest {
            model: &self.model,
            messages,
            format: schema,
            stream: false,
        };

        let body = serde_json::to_string(&request)
            .map_err(|e| Error::parse(format!("serialize request: {e}")))?;

        let url = format!("{}/api/chat", self.base_url);
        let auth = self.bearer();
        let response_text = self
            .http
            .post_json_raw(&url, &body, &auth_header(auth.as_deref()))
            .await
            .inspect_err(|e| warn!("ollama API error: {e}"))?;

        let resp: OllamaChatResponse = serde_json::from_str(&response_text)
            .map_err(|e| Error::parse(format!("parse ollama response: {e}")))?;

        Ok(resp.message.content)
    }

    async fn complete_openai(
        &self,
        messages: Vec<Msg<'_>>,
        schema_name: &str,
        schema: &Value,
    ) -> Result<String> {
        let request = OpenAiRequest {
            model: &self.model,
            messages,
            response_format: ResponseFormat {
                kind: "json_schema",
                json_schema: JsonSchemaFormat {
                    name: schema_name,
                    schema,
                    strict: true,
                },
            },
        };

        let body = serde_json::to_string(&request)
            .map_err(|e| Error::parse(format!("serialize request: {e}")))?;

        let url = format!("{}/chat/completions", self.base_url);
        let auth = self.bearer();
        let response_text = self
            .http
            .post_json_raw(&url, &body, &auth_header(auth.as_deref()))
            .await
            .inspect_err(|e| warn!("LLM API error: {e}"))?;

        let resp: OpenAiResponse = serde_json::from_str(&response_text)
            .map_err(|e| Error::parse(format!("parse LLM response: {e}")))?;

        resp.choices
            .into_iter()
            .next()
            .map(|c| c.message.content)
            .ok_or_else(|| Error::parse("empty response from LLM"))
    }

    fn bearer(&self) -> Option<String> {
        (!self.api_key.is_empty()).then(|| format!("Bearer {}", self.api_key))
    }
}

fn auth_header(bearer: Option<&str>) -> Vec<(&'static str, &str)> {
    bearer
        .map(|value| vec![("Authorization", value)])
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn provider_parses_case_insensitively() {
        assert_eq!("Ollama".parse::<Provider>().unwrap(), Provider::Ollama);
        assert_eq!("openai".parse::<Provider>().unwrap(), Provider::OpenAi);
        assert_eq!("OPENROUTER".parse::<Provider>().unwrap(), Provider::OpenRouter);
        assert!("anthropic".parse::<Provider>().is_err());
    }

    #[test]
    fn default_base_url_follows_provider() {
        let client = LlmClient::new(
            Provider::Ollama,
            String::new(),
            "gemma3:1b".into(),
            None,
            Duration::from_secs(5),
        )
        .unwrap();
        assert_eq!(client.base_url(), "http://localhost:11434");
        assert_eq!(client.model(), "gemma3:1b");
    }

    #[test]
    fn trailing_slash_is_trimmed_from_base_url() {
        let client = LlmClient::new(
            Provider::OpenAi,
            "key".into(),
            "m".into(),
            Some("http://localhost:9000/v1/".into()),
            Duration::from_secs(5),
        )
        .unwrap();
        assert_eq!(client.base_url(), "http://localhost:9000/v1");
    }

    #[test]
    fn empty_key_sends_no_auth_header() {
        assert!(auth_header(None).is_empty());
        assert_eq!(
            auth_header(Some("Bearer k")),
            vec![("Authorization", "Bearer k")]
        );
    }

    #[test]
    fn openai_request_carries_json_schema_format() {
        let schema = serde_json::json!({"type": "object"});
        let request = OpenAiRequest {
            model: "m",
            messages: vec![Msg {
                role: "user",
                content: "hi",
            }],
            response_format: ResponseFormat {
                kind: "json_schema",
                json_schema: JsonSchemaFormat {
                    name: "User",
                    schema: &schema,
                    strict: true,
                },
            },
        };
        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(value["response_format"]["type"], "json_schema");
        assert_eq!(value["response_format"]["json_schema"]["name"], "User");
        assert_eq!(
            value["response_format"]["json_schema"]["schema"]["type"],
            "object"
        );
    }
}
