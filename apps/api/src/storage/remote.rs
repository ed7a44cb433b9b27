//! Remote datastore: the `candidates` table in PostgreSQL.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgPool};
use thiserror::Error;
use tracing::info;

use crate::models::application::ApplicationRecord;
use crate::models::candidate::TechCategory;

pub const SUBMITTED_STATUS: &str = "submitted";

#[derive(Debug, Error)]
pub enum RemoteStoreError {
    #[error("remote datastore is not configured")]
    NotConfigured,

    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

/// Insert/fetch seam over the remote store so the gateway can be exercised
/// without a database.
#[async_trait]
pub trait RemoteStore: Send + Sync {
    async fn insert(&self, row: &CandidateRow) -> Result<(), RemoteStoreError>;
    async fn fetch_all(&self) -> Result<Vec<StoredCandidate>, RemoteStoreError>;
}

/// Fixed projection of an `ApplicationRecord` onto the remote table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CandidateRow {
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub experience: String,
    pub position: String,
    pub location: Option<String>,
    pub programming_languages: Vec<String>,
    pub frameworks: Vec<String>,
    pub databases: Vec<String>,
    pub tools: Vec<String>,
    pub cloud_platforms: Vec<String>,
    pub other_skills: Option<String>,
    pub generated_questions: String,
    pub video_share_url: Option<String>,
    pub status: &'static str,
}

fn collect_tags(record: &ApplicationRecord, categories: &[TechCategory]) -> Vec<String> {
    categories
        .iter()
        .flat_map(|c| record.tech_stack.tags(*c).iter().cloned())
        .collect()
}

impl From<&ApplicationRecord> for CandidateRow {
    fn from(record: &ApplicationRecord) -> Self {
        let profile = &record.profile;
        let stack = &record.tech_stack;

        let mut other: Vec<String> = stack.tags(TechCategory::Other).to_vec();
        if let Some(note) = stack.additional_skills.as_deref().map(str::trim) {
            if !note.is_empty() {
                other.push(note.to_string());
            }
        }

        let urls: Vec<&str> = record.responses.iter().map(|r| r.url.as_str()).collect();

        Self {
            name: profile.name.clone(),
            email: profile.email.clone(),
            phone: profile.phone.clone(),
            experience: profile.experience.to_string(),
            position: profile.position.clone(),
            location: profile.location.clone(),
            programming_languages: collect_tags(record, &[TechCategory::Languages]),
            frameworks: collect_tags(
                record,
                &[
                    TechCategory::Frontend,
                    TechCategory::Backend,
                    TechCategory::Mobile,
                ],
            ),
            databases: collect_tags(record, &[TechCategory::Databases]),
            tools: collect_tags(
                record,
                &[
                    TechCategory::Devops,
                    TechCategory::Testing,
                    TechCategory::DataScience,
                    TechCategory::Cms,
                ],
            ),
            cloud_platforms: collect_tags(record, &[TechCategory::Cloud]),
            other_skills: (!other.is_empty()).then(|| other.join("; ")),
            generated_questions: record.generated_questions.clone(),
            video_share_url: (!urls.is_empty()).then(|| urls.join("\n")),
            status: SUBMITTED_STATUS,
        }
    }
}

/// A row read back from the remote table.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct StoredCandidate {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub experience: String,
    pub position: String,
    pub location: Option<String>,
    pub programming_languages: Vec<String>,
    pub frameworks: Vec<String>,
    pub databases: Vec<String>,
    pub tools: Vec<String>,
    pub cloud_platforms: Vec<String>,
    pub other_skills: Option<String>,
    pub generated_questions: String,
    pub video_share_url: Option<String>,
    pub status: String,
    pub created_at: DateTime<Utc>,
}

/// PostgreSQL-backed store.
#[derive(Clone)]
pub struct PgCandidateStore {
    pool: PgPool,
}

impl PgCandidateStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl RemoteStore for PgCandidateStore {
    async fn insert(&self, row: &CandidateRow) -> Result<(), RemoteStoreError> {
        let id: i64 = sqlx::query_scalar(
            r#"
            INSERT INTO candidates
                (name, email, phone, experience, position, location,
                 programming_languages, frameworks, databases, tools, cloud_platforms,
                 other_skills, generated_questions, video_share_url, status)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15)
            RETURNING id
            "#,
        )
        .bind(&row.name)
        .bind(&row.email)
        .bind(&row.phone)
        .bind(&row.experience)
        .bind(&row.position)
        .bind(&row.location)
        .bind(&row.programming_languages)
        .bind(&row.frameworks)
        .bind(&row.databases)
        .bind(&row.tools)
        .bind(&row.cloud_platforms)
        .bind(&row.other_skills)
        .bind(&row.generated_questions)
        .bind(&row.video_share_url)
        .bind(row.status)
        .fetch_one(&self.pool)
        .await?;

        info!("Inserted candidate row {id} for {}", row.email);
        Ok(())
    }

    async fn fetch_all(&self) -> Result<Vec<StoredCandidate>, RemoteStoreError> {
        Ok(sqlx::query_as::<_, StoredCandidate>(
            r#"
            SELECT id, name, email, phone, experience, position, location,
                   programming_languages, frameworks, databases, tools, cloud_platforms,
                   other_skills, generated_questions, video_share_url, status, created_at
            FROM candidates
            ORDER BY created_at DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await?)
    }
}

/// Stand-in used when no `DATABASE_URL` is configured: every insert fails,
/// which routes submissions to the fallback log.
pub struct UnconfiguredStore;

#[async_trait]
impl RemoteStore for UnconfiguredStore {
    async fn insert(&self, _row: &CandidateRow) -> Result<(), RemoteStoreError> {
        Err(RemoteStoreError::NotConfigured)
    }

    async fn fetch_all(&self) -> Result<Vec<StoredCandidate>, RemoteStoreError> {
        Err(RemoteStoreError::NotConfigured)
    }
}
