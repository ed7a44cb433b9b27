//! Shared fixtures and stub collaborators for unit tests.

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::{TimeZone, Utc};
use uuid::Uuid;

use crate::llm_client::{LlmError, TextGenerator};
use crate::models::application::{ApplicationRecord, InterviewQuestion, VideoResponse};
use crate::models::candidate::{
    BasicInfoInput, CandidateProfile, Experience, TechCategory, TechStackSelection,
};
use crate::storage::remote::{CandidateRow, RemoteStore, RemoteStoreError, StoredCandidate};

pub fn ada_profile() -> CandidateProfile {
    CandidateProfile {
        name: "Ada Lovelace".into(),
        email: "ada@example.com".into(),
        phone: None,
        experience: Experience::Years(5),
        position: "Backend Engineer".into(),
        location: None,
    }
}

pub fn ada_input() -> BasicInfoInput {
    BasicInfoInput {
        name: "Ada Lovelace".into(),
        email: "ada@example.com".into(),
        phone: None,
        experience: Experience::Years(5),
        position: "Backend Engineer".into(),
        location: None,
    }
}

pub fn python_stack() -> TechStackSelection {
    let mut categories = BTreeMap::new();
    categories.insert(TechCategory::Languages, vec!["Python".to_string()]);
    TechStackSelection {
        categories,
        additional_skills: None,
    }
}

pub fn share_link(ordinal: u32) -> String {
    format!("https://www.loom.com/share/answer{ordinal}")
}

/// A generator reply in the expected markup with `count` questions.
pub fn reply_with(count: u32) -> String {
    (1..=count)
        .map(|n| {
            format!(
                "**Question {n}: Question number {n}?**\n\
                 🎥 *Recording Hint 1: Explain your approach*\n\
                 🎥 *Recording Hint 2: Show an example*\n\
                 📹 *Recommended response time: 2 minutes*\n\n"
            )
        })
        .collect()
}

/// A submitted record with `count` questions, each answered.
pub fn sample_record(count: u32) -> ApplicationRecord {
    let created_at = Utc.with_ymd_and_hms(2025, 1, 15, 9, 30, 0).unwrap();
    let questions = (1..=count)
        .map(|n| InterviewQuestion {
            ordinal: n,
            text: format!("Question number {n}?"),
            hints: vec!["Explain your approach".into(), "Show an example".into()],
            recommended_duration: Some("2 minutes".into()),
        })
        .collect();
    let responses = (1..=count)
        .map(|n| VideoResponse {
            ordinal: n,
            url: share_link(n),
            created_at,
        })
        .collect();

    ApplicationRecord {
        id: Uuid::new_v4(),
        profile: ada_profile(),
        tech_stack: python_stack(),
        questions,
        responses,
        generated_questions: reply_with(count),
        submitted_at: created_at,
    }
}

/// Returns a fixed reply and counts calls.
pub struct StubGenerator {
    reply: String,
    calls: AtomicUsize,
}

impl StubGenerator {
    pub fn new(reply: impl Into<String>) -> Self {
        Self {
            reply: reply.into(),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl TextGenerator for StubGenerator {
    async fn generate(&self, _prompt: &str, _system: &str) -> Result<String, LlmError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.reply.clone())
    }
}

pub struct FailingGenerator;

#[async_trait]
impl TextGenerator for FailingGenerator {
    async fn generate(&self, _prompt: &str, _system: &str) -> Result<String, LlmError> {
        Err(LlmError::Api {
            status: 503,
            message: "connection refused".into(),
        })
    }
}

#[derive(Default)]
pub struct MemoryStore {
    rows: Mutex<Vec<CandidateRow>>,
}

impl MemoryStore {
    pub fn rows(&self) -> Vec<CandidateRow> {
        self.rows.lock().unwrap().clone()
    }
}

#[async_trait]
impl RemoteStore for MemoryStore {
    async fn insert(&self, row: &CandidateRow) -> Result<(), RemoteStoreError> {
        self.rows.lock().unwrap().push(row.clone());
        Ok(())
    }

    async fn fetch_all(&self) -> Result<Vec<StoredCandidate>, RemoteStoreError> {
        let rows = self.rows.lock().unwrap();
        Ok(rows
            .iter()
            .enumerate()
            .rev()
            .map(|(i, row)| StoredCandidate {
                id: i as i64 + 1,
                name: row.name.clone(),
                email: row.email.clone(),
                phone: row.phone.clone(),
                experience: row.experience.clone(),
                position: row.position.clone(),
                location: row.location.clone(),
                programming_languages: row.programming_languages.clone(),
                frameworks: row.frameworks.clone(),
                databases: row.databases.clone(),
                tools: row.tools.clone(),
                cloud_platforms: row.cloud_platforms.clone(),
                other_skills: row.other_skills.clone(),
                generated_questions: row.generated_questions.clone(),
                video_share_url: row.video_share_url.clone(),
                status: row.status.to_string(),
                created_at: Utc::now(),
            })
            .collect())
    }
}

pub struct FailingStore;

#[async_trait]
impl RemoteStore for FailingStore {
    async fn insert(&self, _row: &CandidateRow) -> Result<(), RemoteStoreError> {
        Err(RemoteStoreError::Database(sqlx::Error::Protocol(
            "database unavailable".into(),
        )))
    }

    async fn fetch_all(&self) -> Result<Vec<StoredCandidate>, RemoteStoreError> {
        Err(RemoteStoreError::Database(sqlx::Error::Protocol(
            "database unavailable".into(),
        )))
    }
}
