use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeedbackDraft {
    pub issue_type: String,
    pub description: String,
    pub original_problem: String,
    pub generated_code: String,
    pub language: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeedbackEntry {
    pub id: String,
    pub timestamp: String,
    /// Always `pending` for entries written here; other values are kept as read.
    pub status: String,
    #[serde(flatten)]
    pub draft: FeedbackDraft,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entry_serializes_draft_fields_flat() {
        let entry = FeedbackEntry {
            id: "feedback_1_abc".to_string(),
            timestamp: "2026-01-01T00:00:00+00:00".to_string(),
            status: "pending".to_string(),
            draft: FeedbackDraft {
                issue_type: "wrong-output".to_string(),
                description: "off by one".to_string(),
                original_problem: "sum".to_string(),
                generated_code: "print(1)".to_string(),
                language: "python".to_string(),
            },
        };

        let json: serde_json::Value = serde_json::to_value(&entry).unwrap();

        assert_eq!(json["issue_type"], "wrong-output");
        assert_eq!(json["status"], "pending");
        assert!(json.get("draft").is_none());
    }

    #[test]
    fn test_entry_keeps_unknown_status_from_disk() {
        let json = r#"{
            "id": "feedback_1_abc",
            "timestamp": "2026-01-01T00:00:00+00:00",
            "status": "submitted",
            "issue_type": "bug",
            "description": "d",
            "original_problem": "p",
            "generated_code": "c",
            "language": "java"
        }"#;

        let entry: FeedbackEntry = serde_json::from_str(json).unwrap();

        assert_eq!(entry.status, "submitted");
        assert_eq!(entry.draft.language, "java");
    }
}
