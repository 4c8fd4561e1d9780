// Copyright 2025 the wordcards authors
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! The content generator: an opaque `generate(prompt) -> text` capability.
//!
//! Generation failures are recoverable by design: callers must still be
//! able to create a card with an empty back, and the error text is never
//! stored as card content.

use serde::Deserialize;
use serde::Serialize;

use crate::config::GeneratorConfig;
use crate::error::Fallible;
use crate::error::fail;

const GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com";

/// The instruction wrapped around a card front when generating its back.
const BACK_PROMPT: &str = "You are a USA native English professor. Give me \
the back of a simple flashcard (use simple markdown). The first line of \
your response must be the word/expression (use '####'), then give the \
meaning/s of the following word/expression and a few different examples. \
The word/expression is: ";

/// The full prompt for generating the back of a card from its front text.
pub fn back_prompt(front: &str) -> String {
    format!("{BACK_PROMPT}{front}")
}

pub trait Generator {
    fn generate(&self, prompt: &str) -> impl Future<Output = Fallible<String>> + Send;
}

/// A generator backed by the Gemini `generateContent` endpoint.
pub struct GeminiGenerator {
    api_key: String,
    model: String,
    base_url: String,
    client: reqwest::Client,
}

impl GeminiGenerator {
    /// Builds a generator from the collection config. Fails if no API key
    /// is configured.
    pub fn from_config(config: &GeneratorConfig) -> Fallible<Self> {
        let Some(api_key) = config.api_key.clone() else {
            return fail(
                "no generator API key configured; set GEMINI_API_KEY or add it to config.toml.",
            );
        };
        Ok(GeminiGenerator {
            api_key,
            model: config.model.clone(),
            base_url: GEMINI_BASE_URL.to_string(),
            client: reqwest::Client::new(),
        })
    }

    #[cfg(test)]
    fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }
}

impl Generator for GeminiGenerator {
    async fn generate(&self, prompt: &str) -> Fallible<String> {
        let url = format!(
            "{}/v1beta/models/{}:generateContent?key={}",
            self.base_url, self.model, self.api_key
        );
        let request = GenerateRequest {
            contents: vec![Content {
                parts: vec![Part {
                    text: prompt.to_string(),
                }],
            }],
        };
        let response = self.client.post(&url).json(&request).send().await?;
        if !response.status().is_success() {
            return fail(format!(
                "generator returned status {}.",
                response.status().as_u16()
            ));
        }
        let response: GenerateResponse = response.json().await?;
        let text = response
            .candidates
            .into_iter()
            .next()
            .and_then(|candidate| candidate.content.parts.into_iter().next())
            .map(|part| part.text);
        match text {
            Some(text) if !text.is_empty() => Ok(text),
            _ => fail("generator returned no text."),
        }
    }
}

// Wire types for the generateContent endpoint.

#[derive(Serialize, Deserialize)]
struct GenerateRequest {
    contents: Vec<Content>,
}

#[derive(Serialize, Deserialize)]
struct Content {
    parts: Vec<Part>,
}

#[derive(Serialize, Deserialize)]
struct Part {
    text: String,
}

#[derive(Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Deserialize)]
struct Candidate {
    content: Content,
}

#[cfg(test)]
mod tests {
    use axum::Json;
    use axum::Router;
    use axum::routing::post;
    use portpicker::pick_unused_port;
    use serde_json::Value;
    use serde_json::json;
    use tokio::net::TcpListener;
    use tokio::spawn;

    use super::*;
    use crate::utils::wait_for_server;

    const TEST_HOST: &str = "127.0.0.1";

    fn test_generator(port: u16) -> GeminiGenerator {
        let config = GeneratorConfig {
            api_key: Some("test-key".to_string()),
            model: "test-model".to_string(),
        };
        GeminiGenerator::from_config(&config)
            .unwrap()
            .with_base_url(format!("http://{TEST_HOST}:{port}"))
    }

    async fn serve(port: u16, app: Router) {
        let listener = TcpListener::bind(format!("{TEST_HOST}:{port}"))
            .await
            .unwrap();
        spawn(async move { axum::serve(listener, app).await.unwrap() });
        wait_for_server(TEST_HOST, port).await.unwrap();
    }

    #[test]
    fn test_from_config_requires_api_key() {
        let config = GeneratorConfig::default();
        assert!(GeminiGenerator::from_config(&config).is_err());
    }

    #[test]
    fn test_back_prompt_contains_front() {
        let prompt = back_prompt("serendipity");
        assert!(prompt.ends_with("serendipity"));
        assert!(prompt.contains("flashcard"));
    }

    #[tokio::test]
    async fn test_generate_extracts_text() -> Fallible<()> {
        let port = pick_unused_port().unwrap();
        let app = Router::new().route(
            "/v1beta/models/test-model:generateContent",
            post(|| async {
                Json(json!({
                    "candidates": [
                        {"content": {"parts": [{"text": "#### serendipity\n\na happy accident"}]}}
                    ]
                }))
            }),
        );
        serve(port, app).await;
        let text = test_generator(port).generate("serendipity").await?;
        assert_eq!(text, "#### serendipity\n\na happy accident");
        Ok(())
    }

    #[tokio::test]
    async fn test_generate_sends_prompt() -> Fallible<()> {
        let port = pick_unused_port().unwrap();
        let app = Router::new().route(
            "/v1beta/models/test-model:generateContent",
            post(|Json(body): Json<Value>| async move {
                let prompt = body["contents"][0]["parts"][0]["text"]
                    .as_str()
                    .unwrap_or_default()
                    .to_string();
                Json(json!({
                    "candidates": [{"content": {"parts": [{"text": prompt}]}}]
                }))
            }),
        );
        serve(port, app).await;
        let text = test_generator(port).generate("echo me").await?;
        assert_eq!(text, "echo me");
        Ok(())
    }

    #[tokio::test]
    async fn test_generate_error_status() -> Fallible<()> {
        let port = pick_unused_port().unwrap();
        let app = Router::new().route(
            "/v1beta/models/test-model:generateContent",
            post(|| async { (axum::http::StatusCode::FORBIDDEN, "nope") }),
        );
        serve(port, app).await;
        let result = test_generator(port).generate("serendipity").await;
        assert!(result.is_err());
        assert_eq!(
            result.err().unwrap().to_string(),
            "error: generator returned status 403."
        );
        Ok(())
    }

    #[tokio::test]
    async fn test_generate_empty_candidates() -> Fallible<()> {
        let port = pick_unused_port().unwrap();
        let app = Router::new().route(
            "/v1beta/models/test-model:generateContent",
            post(|| async { Json(json!({"candidates": []})) }),
        );
        serve(port, app).await;
        let result = test_generator(port).generate("serendipity").await;
        assert!(result.is_err());
        Ok(())
    }
}
