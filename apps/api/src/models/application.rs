use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::candidate::{CandidateProfile, TechStackSelection};

/// One parsed interview question. `ordinal` is 1-based and contiguous.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InterviewQuestion {
    pub ordinal: u32,
    pub text: String,
    pub hints: Vec<String>,
    pub recommended_duration: Option<String>,
}

impl InterviewQuestion {
    pub fn untitled(ordinal: u32) -> Self {
        Self {
            ordinal,
            text: String::new(),
            hints: Vec::new(),
            recommended_duration: None,
        }
    }
}

/// A validated share link recorded against a question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VideoResponse {
    pub ordinal: u32,
    pub url: String,
    pub created_at: DateTime<Utc>,
}

/// Immutable snapshot handed to the persistence gateway at submission.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApplicationRecord {
    pub id: Uuid,
    pub profile: CandidateProfile,
    pub tech_stack: TechStackSelection,
    pub questions: Vec<InterviewQuestion>,
    /// Ordered by question ordinal.
    pub responses: Vec<VideoResponse>,
    /// Raw generator reply, kept verbatim even when it is a diagnostic.
    pub generated_questions: String,
    pub submitted_at: DateTime<Utc>,
}

/// Where a submission ended up.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "persisted", rename_all = "kebab-case")]
pub enum StorageOutcome {
    Remote,
    LocalFallback {
        error: String,
    },
    #[serde(rename = "none")]
    NotPersisted {
        error: String,
    },
}

impl StorageOutcome {
    pub fn is_persisted(&self) -> bool {
        !matches!(self, Self::NotPersisted { .. })
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            Self::Remote => None,
            Self::LocalFallback { error } | Self::NotPersisted { error } => Some(error),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_storage_outcome_wire_format() {
        assert_eq!(
            serde_json::to_value(StorageOutcome::Remote).unwrap(),
            json!({"persisted": "remote"})
        );
        assert_eq!(
            serde_json::to_value(StorageOutcome::LocalFallback {
                error: "timeout".into()
            })
            .unwrap(),
            json!({"persisted": "local-fallback", "error": "timeout"})
        );
        assert_eq!(
            serde_json::to_value(StorageOutcome::NotPersisted {
                error: "disk full".into()
            })
            .unwrap(),
            json!({"persisted": "none", "error": "disk full"})
        );
    }

    #[test]
    fn test_storage_outcome_persisted_flag() {
        assert!(StorageOutcome::Remote.is_persisted());
        assert!(StorageOutcome::LocalFallback { error: "x".into() }.is_persisted());
        assert!(!StorageOutcome::NotPersisted { error: "x".into() }.is_persisted());
        assert_eq!(StorageOutcome::Remote.error(), None);
    }
}
