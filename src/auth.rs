use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tokio::sync::OnceCell;

use crate::credentials::Credentials;

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("failed to reach the identity provider: {0}")]
    HttpError(#[from] reqwest::Error),
    #[error("authentication failed: HTTP {status} {details}")]
    AuthFailed { status: StatusCode, details: String },
    #[error("authentication failed: unreadable token response: {0}")]
    InvalidTokenResponse(String),
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct TokenResponse {
    pub access_token: String,
    #[serde(default)]
    pub expires_in: Option<u64>,
    #[serde(default)]
    pub token_type: Option<String>,
}

/// OIDC client-credentials token provider.
///
/// The token is requested on first use and kept in memory for the rest of
/// the run. Nothing is written to disk.
pub struct AuthClient {
    http: reqwest::Client,
    token_url: String,
    client_id: String,
    client_secret: String,
    scopes: Vec<String>,
    token: OnceCell<String>,
}

impl AuthClient {
    pub fn new(http: reqwest::Client, credentials: &Credentials) -> Self {
        Self {
            http,
            token_url: credentials.token_url(),
            client_id: credentials.client_id().to_string(),
            client_secret: credentials.client_secret().to_string(),
            scopes: credentials.scopes(),
            token: OnceCell::new(),
        }
    }

    pub async fn access_token(&self) -> Result<&str, AuthError> {
        self.token
            .get_or_try_init(|| self.request_token())
            .await
            .map(String::as_str)
    }

    async fn request_token(&self) -> Result<String, AuthError> {
        tracing::debug!("Authenticating with token URL: {}", &self.token_url);
        tracing::debug!("Client ID: {}", &self.client_id);

        let scope = self.scopes.join(" ");
        let params = [
            ("grant_type", "client_credentials"),
            ("client_id", self.client_id.as_str()),
            ("client_secret", self.client_secret.as_str()),
            ("scope", scope.as_str()),
        ];

        let response = self.http.post(&self.token_url).form(&params).send().await?;

        tracing::debug!("Authentication response status: {}", response.status());

        let status = response.status();
        if status.is_success() {
            let token_response = response.json::<TokenResponse>().await.map_err(|e| {
                if e.is_decode() {
                    AuthError::InvalidTokenResponse(e.to_string())
                } else {
                    AuthError::HttpError(e)
                }
            })?;
            tracing::debug!(
                "Authentication successful, token expires in {:?} seconds",
                token_response.expires_in
            );
            return Ok(token_response.access_token);
        }

        let error_body = match response.text().await {
            Ok(text) => text,
            Err(e) => {
                tracing::error!("Failed to read error response body: {}", e);
                "Unable to read error response body".to_string()
            }
        };
        tracing::error!("Authentication request failed with status {}: {}", status, &error_body);

        Err(AuthError::AuthFailed {
            status,
            details: describe_token_error(&error_body),
        })
    }
}

/// Turn an OAuth 2.0 error response body into a message for the user.
///
/// Bodies that are not JSON, or lack an `error` field, are returned as is.
pub fn describe_token_error(error_body: &str) -> String {
    let error_json = match serde_json::from_str::<serde_json::Value>(error_body) {
        Ok(json) => json,
        Err(json_err) => {
            tracing::warn!("Failed to parse error response as JSON: {}", json_err);
            return error_body.to_string();
        }
    };

    let Some(error_val) = error_json.get("error") else {
        return error_body.to_string();
    };
    let error_str = error_val.as_str().unwrap_or("unknown");

    let error_description = match error_json.get("error_description").and_then(|d| d.as_str()) {
        // Azure AD appends trace and correlation ids on extra lines
        Some(desc) => format!(" - {}", desc.lines().next().unwrap_or(desc)),
        None => "".to_string(),
    };

    match error_str {
        "invalid_client" => format!(
            "Invalid client credentials{}. Please check IDP_CLIENT_ID and IDP_CLIENT_SECRET.",
            error_description
        ),
        "unauthorized_client" => format!(
            "Unauthorized client{}. The client is not authorized to use the client credentials grant.",
            error_description
        ),
        "invalid_scope" => format!(
            "Invalid scope{}. Please check CDF_CLUSTER or IDP_SCOPES.",
            error_description
        ),
        "invalid_request" => format!(
            "Invalid request{}. Please check IDP_TENANT_ID.",
            error_description
        ),
        _ => format!("{}{}", error_str, error_description),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_client_message() {
        let body = r#"{"error":"invalid_client","error_description":"AADSTS7000215: Invalid client secret provided.\r\nTrace ID: 1"}"#;
        let message = describe_token_error(body);
        assert!(message.starts_with("Invalid client credentials - AADSTS7000215"));
        assert!(message.contains("IDP_CLIENT_SECRET"));
        assert!(!message.contains("Trace ID"));
    }

    #[test]
    fn test_unknown_error_code_is_passed_through() {
        let message = describe_token_error(r#"{"error":"temporarily_unavailable"}"#);
        assert_eq!(message, "temporarily_unavailable");
    }

    #[test]
    fn test_non_json_body_is_kept() {
        assert_eq!(describe_token_error("Bad Gateway"), "Bad Gateway");
        assert_eq!(describe_token_error(r#"{"message":"nope"}"#), r#"{"message":"nope"}"#);
    }

    #[test]
    fn test_token_response_tolerates_missing_optional_fields() {
        let response: TokenResponse =
            serde_json::from_str(r#"{"access_token":"abc"}"#).unwrap();
        assert_eq!(response.access_token, "abc");
        assert_eq!(response.expires_in, None);
    }
}
