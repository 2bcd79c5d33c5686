//! Issue creation.

use j2p_core::entities::CreatedIssue;
use j2p_core::payload::IssuePayload;

use crate::ProjectClient;
use crate::error::PlaneError;
use crate::http::{check_response, read_json};

impl ProjectClient {
    /// Create one issue in the project.
    ///
    /// # Errors
    ///
    /// Returns [`PlaneError`] on transport failure, non-success status, or a
    /// body that is not the expected JSON.
    pub async fn post_issue(&self, payload: &IssuePayload) -> Result<CreatedIssue, PlaneError> {
        let url = self.project_url("issues/");
        tracing::debug!(%url, name = %payload.name, "POST");
        let resp = check_response(self.client.http.post(&url).json(payload).send().await?, "POST").await?;
        read_json(resp, "POST").await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_created_issue() {
        let issue: CreatedIssue = serde_json::from_str(
            r#"{
                "id": "e1d2c3b4-0000-4000-8000-000000000001",
                "sequence_id": 42,
                "name": "Fix login",
                "priority": "high",
                "state": "st-3",
                "labels": ["lb-1"]
            }"#,
        )
        .unwrap();
        assert_eq!(issue.sequence_id, Some(42));
        assert_eq!(issue.to_string(), "e1d2c3b4-0000-4000-8000-000000000001 (#42)");
    }
}
