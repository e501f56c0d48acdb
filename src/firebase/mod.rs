mod client;
mod error;
mod models;
mod resource;

pub use error::FirebaseError;
pub use resource::*;

use client::Client;
use log::*;
use models::{DocumentList, TokenResponse};
use reqwest::Method;
use serde_json::json;

/// Responsible for asynchronous interaction with the managed backend (the
/// identity service for account handling and the document store for session
/// records) including transformation of response data into
/// explicitly-defined types.
///
pub struct Firebase {
    client: Client,
}

impl Firebase {
    /// Returns a new instance for the given project credentials.
    ///
    pub fn new(api_key: &str, project_id: &str) -> Firebase {
        debug!("Initializing backend client for project {}...", project_id);
        Firebase {
            client: Client::new(api_key, project_id),
        }
    }

    #[cfg(test)]
    fn with_client(client: Client) -> Firebase {
        Firebase { client }
    }

    /// Create a new account and begin an authenticated session for it.
    ///
    pub async fn sign_up(
        &mut self,
        email: &str,
        password: &str,
    ) -> Result<UserHandle, FirebaseError> {
        debug!("Requesting account creation for {}...", email);
        let data: TokenResponse = self
            .client
            .auth_call(
                "signUp",
                json!({
                    "email": email,
                    "password": password,
                    "returnSecureToken": true,
                }),
            )
            .await?;
        self.client.set_id_token(data.id_token);
        Ok(UserHandle {
            local_id: data.local_id,
            email: data.email,
        })
    }

    /// Begin an authenticated session for an existing account.
    ///
    pub async fn sign_in(
        &mut self,
        email: &str,
        password: &str,
    ) -> Result<UserHandle, FirebaseError> {
        debug!("Requesting sign-in for {}...", email);
        let data: TokenResponse = self
            .client
            .auth_call(
                "signInWithPassword",
                json!({
                    "email": email,
                    "password": password,
                    "returnSecureToken": true,
                }),
            )
            .await?;
        self.client.set_id_token(data.id_token);
        Ok(UserHandle {
            local_id: data.local_id,
            email: data.email,
        })
    }

    /// End the authenticated session. The identity service holds no
    /// server-side session for password sign-in, so this is token disposal.
    ///
    pub fn sign_out(&mut self) {
        debug!("Discarding authenticated session...");
        self.client.clear_id_token();
    }

    /// Store a new session document and return its server-assigned id.
    ///
    pub async fn create_session(&mut self, session: &Session) -> Result<String, FirebaseError> {
        debug!("Requesting creation of session '{}'...", session.category);
        let body = serde_json::to_value(models::encode_session(session))?;
        let response = self
            .client
            .document_call(Method::POST, "sessions", Some(body))
            .await?;
        let document: models::Document = response.json().await?;
        models::document_id(&document)
    }

    /// Return all stored sessions with their document ids.
    ///
    pub async fn sessions(&mut self) -> Result<Vec<StoredSession>, FirebaseError> {
        debug!("Requesting stored sessions...");
        let response = self
            .client
            .document_call(Method::GET, "sessions", None)
            .await?;
        let list: DocumentList = response.json().await?;
        let sessions = list
            .documents
            .iter()
            .map(models::decode_stored_session)
            .collect::<Result<Vec<StoredSession>, FirebaseError>>()?;
        debug!("Retrieved {} stored sessions", sessions.len());
        Ok(sessions)
    }

    /// Return one stored session by document id.
    ///
    pub async fn session(&mut self, id: &str) -> Result<Session, FirebaseError> {
        debug!("Requesting session document {}...", id);
        let response = self
            .client
            .document_call(Method::GET, &format!("sessions/{}", id), None)
            .await?;
        let document: models::Document = response.json().await?;
        models::decode_session(&document)
    }

    /// Delete one stored session by document id.
    ///
    pub async fn delete_session(&mut self, id: &str) -> Result<(), FirebaseError> {
        debug!("Requesting deletion of session document {}...", id);
        self.client
            .document_call(Method::DELETE, &format!("sessions/{}", id), None)
            .await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use httpmock::prelude::*;

    const DOCUMENTS_PATH: &str = "/projects/demo/databases/(default)/documents/sessions";

    fn mocked_firebase(server: &MockServer) -> Firebase {
        Firebase::with_client(Client::with_base_urls(
            "test-key",
            "demo",
            &server.base_url(),
            &server.base_url(),
        ))
    }

    fn token_body() -> serde_json::Value {
        json!({
            "idToken": "token-abc",
            "email": "lifter@example.com",
            "localId": "user-1",
            "refreshToken": "refresh-abc",
            "expiresIn": "3600",
        })
    }

    fn sample_session() -> Session {
        Session {
            category: "Push Day".to_string(),
            date: chrono::Utc.with_ymd_and_hms(2024, 3, 4, 0, 0, 0).unwrap(),
            exercises: vec![Exercise {
                name: "Bench Press".to_string(),
                weight: "60".to_string(),
                sets: "3".to_string(),
                reps: "10".to_string(),
            }],
        }
    }

    #[tokio::test]
    async fn test_sign_in_returns_user_handle() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(POST)
                    .path("/accounts:signInWithPassword")
                    .query_param("key", "test-key")
                    .json_body_partial(r#"{"email":"lifter@example.com"}"#);
                then.status(200).json_body(token_body());
            })
            .await;

        let mut firebase = mocked_firebase(&server);
        let user = firebase
            .sign_in("lifter@example.com", "secret-password")
            .await
            .unwrap();

        mock.assert_async().await;
        assert_eq!(user.local_id, "user-1");
        assert_eq!(user.email, "lifter@example.com");
    }

    #[tokio::test]
    async fn test_sign_up_failure_carries_api_message() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(POST).path("/accounts:signUp");
                then.status(400)
                    .json_body(json!({"error": {"code": 400, "message": "EMAIL_EXISTS"}}));
            })
            .await;

        let mut firebase = mocked_firebase(&server);
        let error = firebase
            .sign_up("lifter@example.com", "secret-password")
            .await
            .unwrap_err();

        match error {
            FirebaseError::Api { status, message } => {
                assert_eq!(status, 400);
                assert_eq!(message, "EMAIL_EXISTS");
            }
            other => panic!("expected api error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_document_calls_require_authentication() {
        let server = MockServer::start_async().await;
        let mut firebase = mocked_firebase(&server);
        let error = firebase.sessions().await.unwrap_err();
        assert!(matches!(error, FirebaseError::NotAuthenticated));
    }

    #[tokio::test]
    async fn test_create_session_posts_envelope_and_returns_id() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(POST).path("/accounts:signInWithPassword");
                then.status(200).json_body(token_body());
            })
            .await;
        let create_mock = server
            .mock_async(|when, then| {
                when.method(POST)
                    .path(DOCUMENTS_PATH)
                    .header("Authorization", "Bearer token-abc")
                    .json_body_partial(
                        r#"{"fields":{"session":{"mapValue":{"fields":{"category":{"stringValue":"Push Day"}}}}}}"#,
                    );
                then.status(200).json_body(json!({
                    "name": "projects/demo/databases/(default)/documents/sessions/doc-9",
                    "fields": {},
                }));
            })
            .await;

        let mut firebase = mocked_firebase(&server);
        firebase
            .sign_in("lifter@example.com", "secret-password")
            .await
            .unwrap();
        let id = firebase.create_session(&sample_session()).await.unwrap();

        create_mock.assert_async().await;
        assert_eq!(id, "doc-9");
    }

    #[tokio::test]
    async fn test_sessions_decodes_listed_documents() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(POST).path("/accounts:signInWithPassword");
                then.status(200).json_body(token_body());
            })
            .await;

        let document = models::encode_session(&sample_session());
        let mut listed = serde_json::to_value(&document).unwrap();
        listed["name"] =
            json!("projects/demo/databases/(default)/documents/sessions/doc-1");
        server
            .mock_async(|when, then| {
                when.method(GET).path(DOCUMENTS_PATH);
                then.status(200).json_body(json!({ "documents": [listed] }));
            })
            .await;

        let mut firebase = mocked_firebase(&server);
        firebase
            .sign_in("lifter@example.com", "secret-password")
            .await
            .unwrap();
        let sessions = firebase.sessions().await.unwrap();

        assert_eq!(sessions.len(), 1);
        assert_eq!(sessions[0].id, "doc-1");
        assert_eq!(sessions[0].session, sample_session());
    }

    #[tokio::test]
    async fn test_empty_collection_lists_no_sessions() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(POST).path("/accounts:signInWithPassword");
                then.status(200).json_body(token_body());
            })
            .await;
        // Firestore omits the documents key entirely for an empty collection
        server
            .mock_async(|when, then| {
                when.method(GET).path(DOCUMENTS_PATH);
                then.status(200).json_body(json!({}));
            })
            .await;

        let mut firebase = mocked_firebase(&server);
        firebase
            .sign_in("lifter@example.com", "secret-password")
            .await
            .unwrap();
        assert!(firebase.sessions().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_delete_session_targets_document() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(POST).path("/accounts:signInWithPassword");
                then.status(200).json_body(token_body());
            })
            .await;
        let delete_mock = server
            .mock_async(|when, then| {
                when.method(DELETE).path(format!("{}/doc-1", DOCUMENTS_PATH));
                then.status(200).json_body(json!({}));
            })
            .await;

        let mut firebase = mocked_firebase(&server);
        firebase
            .sign_in("lifter@example.com", "secret-password")
            .await
            .unwrap();
        firebase.delete_session("doc-1").await.unwrap();

        delete_mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_sign_out_invalidates_document_calls() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(POST).path("/accounts:signInWithPassword");
                then.status(200).json_body(token_body());
            })
            .await;

        let mut firebase = mocked_firebase(&server);
        firebase
            .sign_in("lifter@example.com", "secret-password")
            .await
            .unwrap();
        firebase.sign_out();
        let error = firebase.sessions().await.unwrap_err();
        assert!(matches!(error, FirebaseError::NotAuthenticated));
    }
}
