use crate::core::resolver::RequestFieldResolver;
use crate::core::{ConfigProvider, RequestSource, ResolvedFields};
use crate::utils::error::Result;
use crate::utils::validation::{validate_bool_flag, validate_culture_tag, Validate};
use async_trait::async_trait;
use base64::{engine::general_purpose::STANDARD, Engine as _};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

#[derive(Debug, Clone, Default)]
pub struct LambdaConfig {
    pub culture: String,
    pub preserve_uppercase_words: bool,
}

impl LambdaConfig {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let preserve_uppercase_words = match lookup("PROFILE_PRESERVE_UPPERCASE_WORDS") {
            Some(raw) => validate_bool_flag("PROFILE_PRESERVE_UPPERCASE_WORDS", &raw)?,
            None => false,
        };

        Ok(Self {
            culture: lookup("PROFILE_CULTURE").unwrap_or_default(),
            preserve_uppercase_words,
        })
    }
}

impl ConfigProvider for LambdaConfig {
    fn culture(&self) -> &str {
        &self.culture
    }

    fn preserve_uppercase_words(&self) -> bool {
        self.preserve_uppercase_words
    }
}

impl Validate for LambdaConfig {
    fn validate(&self) -> Result<()> {
        validate_culture_tag("PROFILE_CULTURE", &self.culture)?;

        tracing::info!("✅ Lambda configuration validation passed");
        Ok(())
    }
}

/// HTTP API (payload 1.0 / 2.0) event fields the handler needs.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HttpRequestEvent {
    #[serde(default)]
    pub query_string_parameters: Option<HashMap<String, String>>,
    #[serde(default)]
    pub body: Option<String>,
    #[serde(default)]
    pub is_base64_encoded: bool,
}

#[async_trait]
impl RequestSource for HttpRequestEvent {
    fn query_param(&self, key: &str) -> Option<&str> {
        self.query_string_parameters
            .as_ref()
            .and_then(|params| params.get(key))
            .map(String::as_str)
    }

    async fn read_body(&self) -> Result<Option<Vec<u8>>> {
        match &self.body {
            None => Ok(None),
            Some(body) if self.is_base64_encoded => Ok(Some(STANDARD.decode(body)?)),
            Some(body) => Ok(Some(body.clone().into_bytes())),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HttpResponse {
    pub status_code: u16,
    pub headers: HashMap<String, String>,
    pub body: String,
    pub is_base64_encoded: bool,
}

impl HttpResponse {
    pub fn ok_json(fields: &ResolvedFields) -> Result<Self> {
        let headers = HashMap::from([(
            "content-type".to_string(),
            "application/json".to_string(),
        )]);

        Ok(Self {
            status_code: 200,
            headers,
            body: serde_json::to_string(fields)?,
            is_base64_encoded: false,
        })
    }
}

pub async fn handle_event(
    resolver: &RequestFieldResolver,
    event: &HttpRequestEvent,
) -> Result<HttpResponse> {
    let resolved = resolver.resolve(event).await;
    HttpResponse::ok_json(&resolved)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_from_lookup() {
        let vars = HashMap::from([
            ("PROFILE_CULTURE", "tr-TR"),
            ("PROFILE_PRESERVE_UPPERCASE_WORDS", "yes"),
        ]);
        let config =
            LambdaConfig::from_lookup(|key| vars.get(key).map(|v| v.to_string())).unwrap();
        assert_eq!(config.culture, "tr-TR");
        assert!(config.preserve_uppercase_words);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_defaults_and_bad_flag() {
        let config = LambdaConfig::from_lookup(|_| None).unwrap();
        assert_eq!(config.culture, "");
        assert!(!config.preserve_uppercase_words);

        let bad = LambdaConfig::from_lookup(|key| {
            (key == "PROFILE_PRESERVE_UPPERCASE_WORDS").then(|| "sometimes".to_string())
        });
        assert!(bad.is_err());
    }

    #[test]
    fn test_event_deserializes_with_nulls() {
        let event: HttpRequestEvent = serde_json::from_str(
            r#"{"queryStringParameters":null,"body":null,"requestContext":{"http":{"method":"GET"}}}"#,
        )
        .unwrap();
        assert!(event.query_string_parameters.is_none());
        assert!(event.body.is_none());
        assert!(!event.is_base64_encoded);
    }

    #[tokio::test]
    async fn test_base64_body_is_decoded() {
        let event = HttpRequestEvent {
            body: Some(STANDARD.encode(r#"{"name":"ana"}"#)),
            is_base64_encoded: true,
            ..Default::default()
        };
        let body = event.read_body().await.unwrap().unwrap();
        assert_eq!(body, br#"{"name":"ana"}"#);

        let broken = HttpRequestEvent {
            body: Some("%%%".to_string()),
            is_base64_encoded: true,
            ..Default::default()
        };
        assert!(broken.read_body().await.is_err());
    }

    #[tokio::test]
    async fn test_handle_event_response_shape() {
        let event = HttpRequestEvent {
            query_string_parameters: Some(HashMap::from([(
                "name".to_string(),
                "bob smith".to_string(),
            )])),
            body: Some(r#"{"age": 42}"#.to_string()),
            is_base64_encoded: false,
        };

        let response = handle_event(&RequestFieldResolver::default(), &event)
            .await
            .unwrap();

        assert_eq!(response.status_code, 200);
        assert_eq!(response.headers["content-type"], "application/json");
        assert_eq!(
            response.body,
            r#"{"name":"Bob Smith","email":"unknown@example.com","age":42}"#
        );
    }
}
