use async_trait::async_trait;
use glossa_config::translator::TranslatorConfig;
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};

use crate::{LanguageCode, ProviderMetadata, TranslateError, Translation, Translator};

#[derive(Serialize)]
struct TranslateRequest<'a> {
    q: &'a str,
    source: &'a str,
    target: &'a str,
    format: &'static str,
    api_key: &'a str,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct TranslateResponse {
    translated_text: String,
}

#[derive(Deserialize)]
struct ErrorResponse {
    error: Option<String>,
}

/// LibreTranslate-compatible HTTP provider
#[derive(Clone)]
pub struct LibreTranslator {
    client: reqwest::Client,
    api_key: String,
    translate_url: String,
}

impl LibreTranslator {
    pub fn new(config: &TranslatorConfig) -> Result<Self, TranslateError> {
        let client = reqwest::Client::builder()
            .timeout(config.request_timeout())
            .build()?;

        Ok(Self {
            client,
            api_key: config.api_key.clone(),
            translate_url: config.translate_url(),
        })
    }

    pub fn translate_url(&self) -> &str {
        &self.translate_url
    }
}

/// Best-effort message for a failed call: the body's `error` field, or the
/// status text when the body is not JSON.
fn error_message(status: StatusCode, body: &str) -> String {
    let message = match serde_json::from_str::<ErrorResponse>(body) {
        Ok(parsed) => parsed.error,
        Err(_) => status.canonical_reason().map(str::to_string),
    };

    message
        .filter(|m| !m.is_empty())
        .unwrap_or_else(|| "Unknown error".to_string())
}

#[async_trait]
impl Translator for LibreTranslator {
    async fn translate(
        &self,
        text: &str,
        from: LanguageCode,
        to: LanguageCode,
    ) -> Result<Translation, TranslateError> {
        let body = TranslateRequest {
            q: text,
            source: &from,
            target: &to,
            format: "text",
            api_key: &self.api_key,
        };

        let response = self
            .client
            .post(&self.translate_url)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let raw = response.text().await.unwrap_or_default();
            let message = error_message(status, &raw);
            tracing::error!("Translation API error: {} {}", status.as_u16(), message);
            return Err(TranslateError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let raw = response.text().await?;
        let parsed: TranslateResponse = serde_json::from_str(&raw)
            .map_err(|e| TranslateError::Parse(format!("Failed to parse response: {}", e)))?;

        Ok(Translation {
            text: parsed.translated_text,
            from,
            to,
            provider: "libretranslate".to_string(),
        })
    }

    fn metadata(&self) -> ProviderMetadata {
        ProviderMetadata {
            name: "LibreTranslate".to_string(),
            requires_api_key: !self.api_key.is_empty(),
        }
    }
}
