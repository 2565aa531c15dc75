use crate::error::{Error, Result};
use reqwest::{Client, Response, StatusCode};
use serde_json::Value as JsonValue;
use std::time::Duration;

/// Chat-completion client for the OpenRouter endpoint.
///
/// Credentials are tried in order. A response is kept as soon as it either
/// succeeds or fails with a client error that the next key could not fix
/// (any 4xx except 401/403/429). Auth problems, rate limits, 5xx and network
/// errors all rotate to the next key; running out of keys is a
/// `ServiceUnavailable`.
#[derive(Clone)]
pub struct ModelClient {
    client: Client,
    api_keys: Vec<String>,
    base_url: String,
    model: String,
}

const REFERER: &str = "https://examsphere.app";
const APP_TITLE: &str = "ExamSphere";

impl ModelClient {
    pub fn new(api_keys: Vec<String>, base_url: String, model: String, client: Client) -> Self {
        Self {
            client,
            api_keys,
            base_url,
            model,
        }
    }

    /// Issues one completion request and returns the raw text content of the
    /// first choice.
    pub async fn complete(&self, system_prompt: &str, user_prompt: &str) -> Result<String> {
        let payload = serde_json::json!({
            "model": self.model,
            "messages": [
                {"role": "system", "content": system_prompt},
                {"role": "user", "content": user_prompt}
            ],
            "temperature": 0.7,
        });

        let response = self.post_with_failover(&payload).await?;

        if !response.status().is_success() {
            let status = response.status();
            let text = response.text().await.unwrap_or_default();
            return Err(Error::Internal(format!(
                "OpenRouter API error {}: {}",
                status, text
            )));
        }

        let body: JsonValue = response.json().await?;
        body.get("choices")
            .and_then(|c| c.get(0))
            .and_then(|c| c.get("message"))
            .and_then(|m| m.get("content"))
            .and_then(|c| c.as_str())
            .map(|s| s.to_string())
            .ok_or_else(|| Error::Parse("Respuesta del modelo sin contenido".to_string()))
    }

    async fn post_with_failover(&self, payload: &JsonValue) -> Result<Response> {
        let url = format!("{}/chat/completions", self.base_url);

        for api_key in &self.api_keys {
            let attempt = self
                .client
                .post(&url)
                .bearer_auth(api_key)
                .header("HTTP-Referer", REFERER)
                .header("X-Title", APP_TITLE)
                .json(payload)
                .timeout(Duration::from_secs(120))
                .send()
                .await;

            match attempt {
                Ok(response) => {
                    if response.status().is_success() || is_terminal_client_error(response.status())
                    {
                        return Ok(response);
                    }
                    tracing::warn!(
                        status = %response.status(),
                        "API key rechazada, probando la siguiente si existe"
                    );
                }
                Err(err) => {
                    tracing::warn!(error = %err, "Error de red con la API key, probando la siguiente");
                }
            }
        }

        Err(Error::ServiceUnavailable)
    }
}

/// 4xx statuses that no other credential can fix, except the auth and
/// rate-limit family which failover exists for.
fn is_terminal_client_error(status: StatusCode) -> bool {
    status.is_client_error()
        && !matches!(
            status,
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN | StatusCode::TOO_MANY_REQUESTS
        )
}
