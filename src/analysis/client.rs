//! HTTP client for the Watson Tone Analyzer v3 API.

use reqwest::blocking::{Client, RequestBuilder};
use reqwest::StatusCode;
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, info};

use super::mapper::{ResponseMapper, ToneResponse};
use super::{AnalyzerError, ServiceError, ToneService, NOT_AUTHORIZED};
use crate::config::{Credentials, ServiceSettings};

const TONE_PATH: &str = "/v3/tone";
const API_KEY_USER: &str = "apikey";

#[derive(Serialize)]
struct ToneInput<'a> {
    text: &'a str,
}

/// Blocking client for the Watson Tone Analyzer v3 `tone` endpoint.
#[derive(Debug)]
pub struct WatsonClient {
    client: Client,
    endpoint: String,
    credentials: Credentials,
    settings: ServiceSettings,
}

impl WatsonClient {
    pub fn new(credentials: Credentials, settings: ServiceSettings) -> super::Result<Self> {
        let client = Client::builder()
            .timeout(settings.timeout)
            .build()
            .map_err(|err| AnalyzerError::TransportFailure(err.to_string()))?;
        let endpoint = tone_endpoint(credentials.url());
        info!(endpoint = %endpoint, auth = credentials.scheme(), "tone analyzer client configured");
        Ok(Self {
            client,
            endpoint,
            credentials,
            settings,
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        match &self.credentials {
            Credentials::ApiKey { key, .. } => request.basic_auth(API_KEY_USER, Some(key)),
            Credentials::UserPassword {
                username, password, ..
            } => request.basic_auth(username, Some(password)),
        }
    }
}

impl ToneService for WatsonClient {
    fn analyze(&self, text: &str) -> Result<Option<ToneResponse>, ServiceError> {
        let request = self
            .client
            .post(&self.endpoint)
            .query(&[
                ("version", self.settings.version.as_str()),
                ("sentences", if self.settings.sentences { "true" } else { "false" }),
            ])
            .header("Accept", "application/json")
            .json(&ToneInput { text });
        let response = self
            .authorize(request)
            .send()
            .map_err(|err| ServiceError::new(err.to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .map_err(|err| ServiceError::new(err.to_string()).with_status(status.as_u16()))?;
        debug!(status = status.as_u16(), bytes = body.len(), "tone response received");

        if !status.is_success() {
            return Err(status_error(status, &body));
        }
        ResponseMapper::parse(&body).map_err(|err| {
            ServiceError::new(format!("malformed tone response: {err}"))
                .with_status(status.as_u16())
        })
    }
}

fn tone_endpoint(url: &str) -> String {
    format!("{}{}", url.trim_end_matches('/'), TONE_PATH)
}

fn status_error(status: StatusCode, body: &str) -> ServiceError {
    let message = if matches!(status, StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN) {
        NOT_AUTHORIZED.to_string()
    } else {
        error_message(body).unwrap_or_else(|| status.to_string())
    };
    ServiceError::new(message).with_status(status.as_u16())
}

/// Pulls the service's `error` text out of a failure body, if it has one.
fn error_message(body: &str) -> Option<String> {
    let value: Value = serde_json::from_str(body).ok()?;
    value
        .get("error")
        .and_then(Value::as_str)
        .filter(|message| !message.trim().is_empty())
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use reqwest::StatusCode;

    use super::{error_message, status_error, tone_endpoint};

    #[test]
    fn endpoint_joins_without_double_slash() {
        assert_eq!(
            tone_endpoint("https://api.example.com/tone-analyzer/api/"),
            "https://api.example.com/tone-analyzer/api/v3/tone"
        );
        assert_eq!(
            tone_endpoint("https://api.example.com"),
            "https://api.example.com/v3/tone"
        );
    }

    #[test]
    fn unauthorized_status_uses_not_authorized_message() {
        let err = status_error(StatusCode::UNAUTHORIZED, "{}");
        assert_eq!(err.message, "Not Authorized");
        assert_eq!(err.status, Some(401));
    }

    #[test]
    fn service_error_text_is_preferred_over_status() {
        let err = status_error(
            StatusCode::BAD_REQUEST,
            r#"{"code": 400, "error": "No text given"}"#,
        );
        assert_eq!(err.message, "No text given");
        assert_eq!(error_message("not json"), None);
    }

    #[test]
    fn falls_back_to_status_line() {
        let err = status_error(StatusCode::INTERNAL_SERVER_ERROR, "");
        assert_eq!(err.message, "500 Internal Server Error");
    }
}
