//! HTTP request helpers for the PostgREST backend.

use reqwest::{RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::{RegistryError, Result};

use super::types::ApiErrorBody;
use super::RestDomainRegistry;

/// Postgres unique-violation code surfaced by PostgREST on duplicate inserts.
const UNIQUE_VIOLATION: &str = "23505";

impl RestDomainRegistry {
    /// Execute a GET request against `path` (relative to the REST root).
    pub(crate) async fn get<T: DeserializeOwned>(
        &self,
        path: &str,
        subject: Option<&str>,
    ) -> Result<T> {
        let url = format!("{}/{path}", self.base_url);
        let request = self.authorized(self.client.get(&url));
        let text = self.execute(request, "GET", &url, subject).await?;
        parse_body(&text)
    }

    /// Execute a POST request with a JSON body, asking for the inserted rows back.
    pub(crate) async fn post<B: Serialize, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
        subject: Option<&str>,
    ) -> Result<T> {
        let url = format!("{}/{path}", self.base_url);
        let request = self
            .authorized(self.client.post(&url))
            .header("Prefer", "return=representation")
            .json(body);
        let text = self.execute(request, "POST", &url, subject).await?;
        parse_body(&text)
    }

    /// Execute a PATCH request with a JSON body, asking for the updated rows back.
    pub(crate) async fn patch<B: Serialize, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
        subject: Option<&str>,
    ) -> Result<T> {
        let url = format!("{}/{path}", self.base_url);
        let request = self
            .authorized(self.client.patch(&url))
            .header("Prefer", "return=representation")
            .json(body);
        let text = self.execute(request, "PATCH", &url, subject).await?;
        parse_body(&text)
    }

    /// Execute a DELETE request, asking for the deleted rows back so the
    /// caller can tell a no-op from a real deletion (PostgREST returns 2xx
    /// either way).
    pub(crate) async fn delete<T: DeserializeOwned>(
        &self,
        path: &str,
        subject: Option<&str>,
    ) -> Result<T> {
        let url = format!("{}/{path}", self.base_url);
        let request = self
            .authorized(self.client.delete(&url))
            .header("Prefer", "return=representation");
        let text = self.execute(request, "DELETE", &url, subject).await?;
        parse_body(&text)
    }

    fn authorized(&self, request: RequestBuilder) -> RequestBuilder {
        request
            .header("apikey", &self.api_key)
            .header("Authorization", format!("Bearer {}", self.api_key))
    }

    /// Send a request, log the round trip, and map non-2xx statuses into
    /// [`RegistryError`]. Returns the response body on success.
    async fn execute(
        &self,
        request: RequestBuilder,
        method: &str,
        url: &str,
        subject: Option<&str>,
    ) -> Result<String> {
        log::debug!("{method} {url}");

        let response = request.send().await.map_err(|e| {
            if e.is_timeout() {
                RegistryError::Timeout {
                    detail: e.to_string(),
                }
            } else {
                RegistryError::NetworkError {
                    detail: e.to_string(),
                }
            }
        })?;

        let status = response.status();
        log::debug!("Response Status: {status}");

        let retry_after = response
            .headers()
            .get("retry-after")
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.parse::<u64>().ok());

        let text = response
            .text()
            .await
            .map_err(|e| RegistryError::NetworkError {
                detail: format!("failed to read response body: {e}"),
            })?;

        if status.is_success() {
            return Ok(text);
        }

        let error = map_status_error(status, retry_after, &text, subject);
        if error.is_expected() {
            log::warn!("{method} {url} failed: {error}");
        } else {
            log::error!("{method} {url} failed: {error}");
        }
        Err(error)
    }
}

/// Map an error status plus body into the structured error taxonomy.
fn map_status_error(
    status: StatusCode,
    retry_after: Option<u64>,
    body: &str,
    subject: Option<&str>,
) -> RegistryError {
    let parsed: ApiErrorBody = serde_json::from_str(body).unwrap_or(ApiErrorBody {
        code: None,
        message: None,
    });
    let raw_message = parsed
        .message
        .clone()
        .unwrap_or_else(|| body.trim().to_string());

    match status.as_u16() {
        401 | 403 => RegistryError::Unauthorized {
            raw_message: Some(raw_message),
        },
        404 => RegistryError::DomainNotFound {
            domain_id: subject.unwrap_or_default().to_string(),
            raw_message: Some(raw_message),
        },
        409 if parsed.code.as_deref() == Some(UNIQUE_VIOLATION) => RegistryError::DomainExists {
            domain: subject.unwrap_or_default().to_string(),
            raw_message: Some(raw_message),
        },
        429 => RegistryError::RateLimited {
            retry_after,
            raw_message: Some(raw_message),
        },
        502..=504 => RegistryError::NetworkError {
            detail: format!("HTTP {status}: {raw_message}"),
        },
        _ => RegistryError::Unknown {
            status: Some(status.as_u16()),
            raw_message,
        },
    }
}

fn parse_body<T: DeserializeOwned>(text: &str) -> Result<T> {
    serde_json::from_str(text).map_err(|e| {
        log::error!("Failed to parse registry response: {e}");
        RegistryError::ParseError {
            detail: e.to_string(),
        }
    })
}
