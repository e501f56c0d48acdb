//! HTTP client for the backend REST surfaces.
//!
//! This module provides a low-level HTTP client wrapper for the identity
//! endpoints (sign-up/sign-in) and the document endpoints (session storage),
//! handling authentication headers, error responses, and response parsing.

use super::error::FirebaseError;
use reqwest::{Method, Response};
use serde::de::DeserializeOwned;

const AUTH_BASE_URL: &str = "https://identitytoolkit.googleapis.com/v1";
const DOCUMENTS_BASE_URL: &str = "https://firestore.googleapis.com/v1";

/// Makes requests to the backend and tries to conform response data to the
/// wire models.
///
pub struct Client {
    api_key: String,
    project_id: String,
    auth_base_url: String,
    documents_base_url: String,
    id_token: Option<String>,
    http_client: reqwest::Client,
}

impl Client {
    /// Returns a new instance for the given project credentials.
    ///
    /// # Panics
    /// Panics if the HTTP client cannot be created. This should never happen
    /// in practice as reqwest::Client::builder().build() only fails on
    /// invalid configuration, which we don't use.
    pub fn new(api_key: &str, project_id: &str) -> Self {
        Client {
            api_key: api_key.to_owned(),
            project_id: project_id.to_owned(),
            auth_base_url: AUTH_BASE_URL.to_owned(),
            documents_base_url: DOCUMENTS_BASE_URL.to_owned(),
            id_token: None,
            http_client: reqwest::Client::builder()
                .build()
                .expect("Failed to create HTTP client - this should never happen"),
        }
    }

    /// Returns an instance pointed at alternate base URLs, for exercising
    /// the client against a local mock server.
    #[cfg(test)]
    pub(crate) fn with_base_urls(
        api_key: &str,
        project_id: &str,
        auth_base_url: &str,
        documents_base_url: &str,
    ) -> Self {
        let mut client = Client::new(api_key, project_id);
        client.auth_base_url = auth_base_url.to_owned();
        client.documents_base_url = documents_base_url.to_owned();
        client
    }

    /// Store the bearer token for subsequent document calls.
    ///
    pub fn set_id_token(&mut self, token: String) {
        self.id_token = Some(token);
    }

    /// Discard the bearer token, ending the authenticated session.
    ///
    pub fn clear_id_token(&mut self) {
        self.id_token = None;
    }

    /// Call an identity endpoint (`signUp`, `signInWithPassword`) and parse
    /// the token response.
    ///
    pub(crate) async fn auth_call<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        body: serde_json::Value,
    ) -> Result<T, FirebaseError> {
        let url = format!(
            "{}/accounts:{}?key={}",
            self.auth_base_url, endpoint, self.api_key
        );
        let response = self.http_client.post(&url).json(&body).send().await?;
        let response = Self::check_status(response).await?;
        Ok(response.json::<T>().await?)
    }

    /// Make a request against the `sessions` document collection, returning
    /// the raw response for the caller to parse. Requires a signed-in user.
    ///
    pub(crate) async fn document_call(
        &self,
        method: Method,
        path: &str,
        body: Option<serde_json::Value>,
    ) -> Result<Response, FirebaseError> {
        let id_token = self.id_token.as_ref().ok_or(FirebaseError::NotAuthenticated)?;
        let url = format!(
            "{}/projects/{}/databases/(default)/documents/{}",
            self.documents_base_url, self.project_id, path
        );

        let mut request = self
            .http_client
            .request(method, &url)
            .header("Authorization", format!("Bearer {}", id_token));
        if let Some(body) = body {
            request = request.json(&body);
        }

        let response = request.send().await?;
        Self::check_status(response).await
    }

    /// Turn non-success responses into typed API errors, extracting the
    /// message from the standard error body when present.
    ///
    async fn check_status(response: Response) -> Result<Response, FirebaseError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let body = response
            .text()
            .await
            .unwrap_or_else(|_| String::from("Unable to read response"));
        Err(FirebaseError::Api {
            status: status.as_u16(),
            message: api_error_message(&body),
        })
    }
}

/// Extract the `error.message` field from an API error body, falling back to
/// the raw body when it doesn't match the standard shape.
///
fn api_error_message(body: &str) -> String {
    serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|value| {
            value
                .get("error")
                .and_then(|error| error.get("message"))
                .and_then(|message| message.as_str())
                .map(str::to_owned)
        })
        .unwrap_or_else(|| body.to_string())
}
