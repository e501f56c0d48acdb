//! Backend API-specific error types.

/// Errors that can occur during backend API operations.
#[derive(Debug, thiserror::Error)]
pub enum FirebaseError {
    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    HttpRequest(#[from] reqwest::Error),

    /// API returned an error response
    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    /// Failed to deserialize API response
    #[error("Failed to deserialize API response: {0}")]
    Deserialization(#[from] serde_json::Error),

    /// No user is signed in for a call that requires authentication
    #[error("Not authenticated")]
    NotAuthenticated,

    /// A stored document did not have the expected shape
    #[error("Malformed session document: {0}")]
    MalformedDocument(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_firebase_error_display() {
        let error = FirebaseError::Api {
            status: 404,
            message: "Not found".to_string(),
        };
        let error_str = error.to_string();
        assert!(error_str.contains("404"));
        assert!(error_str.contains("Not found"));

        let error = FirebaseError::NotAuthenticated;
        assert!(error.to_string().contains("Not authenticated"));

        let error = FirebaseError::MalformedDocument("missing category".to_string());
        assert!(error.to_string().contains("missing category"));
    }
}
