//! Session service: owns one `Wizard` per applicant and performs the IO the
//! wizard itself never does: question generation on entering `Questions` and
//! the persistence call on submit.
//!
//! Every action holds its session's mutex for the whole step, generator and
//! gateway awaits included, so a session handles one action at a time.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use serde::Serialize;
use thiserror::Error;
use tokio::sync::{Mutex, RwLock};
use tokio::time::Instant;
use tracing::{info, warn};
use uuid::Uuid;

use crate::intake::wizard::{FieldError, Step, Wizard, WizardError};
use crate::llm_client::TextGenerator;
use crate::models::application::{InterviewQuestion, StorageOutcome, VideoResponse};
use crate::models::candidate::{BasicInfoInput, CandidateProfile, TechStackSelection};
use crate::questions::generator::generate_questions;
use crate::questions::parser::{parse_questions, parse_with_fallback, MARKUP_VERSION};
use crate::storage::gateway::PersistenceGateway;

pub struct Session {
    pub id: Uuid,
    pub wizard: Wizard,
}

type SharedSession = Arc<Mutex<Session>>;

struct Entry {
    session: SharedSession,
    last_touched: Instant,
}

/// In-memory sessions. A session untouched for `idle_ttl` is dropped the next
/// time it is looked up or a new session is created, completed ones included.
pub struct SessionRegistry {
    sessions: RwLock<HashMap<Uuid, Entry>>,
    idle_ttl: Duration,
}

impl SessionRegistry {
    pub fn new(idle_ttl: Duration) -> Self {
        Self {
            sessions: RwLock::new(HashMap::new()),
            idle_ttl,
        }
    }

    fn is_live(&self, entry: &Entry, now: Instant) -> bool {
        now.duration_since(entry.last_touched) < self.idle_ttl
    }

    pub async fn create(&self) -> SharedSession {
        let now = Instant::now();
        let id = Uuid::new_v4();
        let session = Arc::new(Mutex::new(Session {
            id,
            wizard: Wizard::new(),
        }));

        let mut sessions = self.sessions.write().await;
        let before = sessions.len();
        sessions.retain(|_, entry| self.is_live(entry, now));
        let expired = before - sessions.len();
        if expired > 0 {
            info!("Dropped {expired} idle session(s)");
        }
        sessions.insert(
            id,
            Entry {
                session: Arc::clone(&session),
                last_touched: now,
            },
        );
        session
    }

    /// Live session by id; refreshes its idle timer.
    pub async fn get(&self, id: Uuid) -> Option<SharedSession> {
        let now = Instant::now();
        let mut sessions = self.sessions.write().await;
        let entry = sessions.get_mut(&id)?;
        if self.is_live(entry, now) {
            entry.last_touched = now;
            return Some(Arc::clone(&entry.session));
        }
        sessions.remove(&id);
        info!("Session {id} expired");
        None
    }

    pub async fn remove(&self, id: Uuid) -> bool {
        self.sessions.write().await.remove(&id).is_some()
    }

    pub async fn len(&self) -> usize {
        self.sessions.read().await.len()
    }
}

#[derive(Debug, Error)]
pub enum IntakeError {
    #[error("session {0} not found")]
    SessionNotFound(Uuid),

    #[error("{0}")]
    StepMismatch(String),

    #[error("question {0} does not exist")]
    UnknownQuestion(u32),
}

/// How the last action landed; decides the HTTP status of the reply.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    Accepted,
    Rejected,
    NotPersisted,
}

/// JSON rendering of a session's current step.
#[derive(Debug, Clone, Serialize)]
pub struct SessionView {
    pub session_id: Uuid,
    pub step: Step,
    pub errors: Vec<FieldError>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub profile: Option<CandidateProfile>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tech_stack: Option<TechStackSelection>,
    /// Version of the question markup the questions were parsed from.
    pub markup_version: u32,
    pub questions: Vec<InterviewQuestion>,
    pub responses: Vec<VideoResponse>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub outcome: Option<StorageOutcome>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip)]
    pub verdict: Verdict,
}

fn completion_message(wizard: &Wizard) -> Option<String> {
    if wizard.step() != Step::Complete {
        return None;
    }
    let name = wizard.profile().map(|p| p.name.as_str()).unwrap_or("there");
    let mut message = format!(
        "Thank you, {name}! Your information and video responses have been \
         successfully processed. Our team will review your responses and contact you soon."
    );
    if let Some(record) = wizard.submitted() {
        message.push_str(&format!(" Reference: {}.", record.id));
    }
    if let Some(error) = wizard.outcome().and_then(StorageOutcome::error) {
        message.push_str(&format!(" (Saved locally: {error})"));
    }
    Some(message)
}

impl SessionView {
    fn render(session: &Session, errors: Vec<FieldError>, verdict: Verdict) -> Self {
        let wizard = &session.wizard;
        Self {
            session_id: session.id,
            step: wizard.step(),
            errors,
            profile: wizard.profile().cloned(),
            tech_stack: wizard.tech_stack().cloned(),
            markup_version: MARKUP_VERSION,
            questions: wizard.questions().to_vec(),
            responses: wizard.responses().cloned().collect(),
            outcome: wizard.outcome().cloned(),
            message: completion_message(wizard),
            verdict,
        }
    }
}

/// Turns a wizard result into a view. Input errors and failed saves are part
/// of the reply; step mismatches and unknown questions are not.
fn settle(session: &Session, result: Result<(), WizardError>) -> Result<SessionView, IntakeError> {
    match result {
        Ok(()) => Ok(SessionView::render(session, Vec::new(), Verdict::Accepted)),
        Err(WizardError::Invalid(errors)) => {
            Ok(SessionView::render(session, errors, Verdict::Rejected))
        }
        Err(WizardError::NotPersisted(error)) => Ok(SessionView::render(
            session,
            vec![FieldError::new(
                "submission",
                format!("Error saving data: {error}. Please try submitting again."),
            )],
            Verdict::NotPersisted,
        )),
        Err(e @ WizardError::WrongStep { .. }) => Err(IntakeError::StepMismatch(e.to_string())),
        Err(WizardError::UnknownQuestion(ordinal)) => Err(IntakeError::UnknownQuestion(ordinal)),
    }
}

pub struct IntakeService {
    sessions: SessionRegistry,
    generator: Arc<dyn TextGenerator>,
    gateway: Arc<PersistenceGateway>,
    question_fallback: bool,
}

impl IntakeService {
    pub fn new(
        generator: Arc<dyn TextGenerator>,
        gateway: Arc<PersistenceGateway>,
        question_fallback: bool,
        session_idle_ttl: Duration,
    ) -> Self {
        Self {
            sessions: SessionRegistry::new(session_idle_ttl),
            generator,
            gateway,
            question_fallback,
        }
    }

    async fn session(&self, id: Uuid) -> Result<SharedSession, IntakeError> {
        self.sessions
            .get(id)
            .await
            .ok_or(IntakeError::SessionNotFound(id))
    }

    pub async fn create_session(&self) -> SessionView {
        let session = self.sessions.create().await;
        let active = self.sessions.len().await;
        let session = session.lock().await;
        info!("Session {} created ({active} active)", session.id);
        SessionView::render(&session, Vec::new(), Verdict::Accepted)
    }

    pub async fn view(&self, id: Uuid) -> Result<SessionView, IntakeError> {
        let session = self.session(id).await?;
        let session = session.lock().await;
        Ok(SessionView::render(&session, Vec::new(), Verdict::Accepted))
    }

    pub async fn remove(&self, id: Uuid) -> Result<(), IntakeError> {
        if self.sessions.remove(id).await {
            info!("Session {id} removed");
            Ok(())
        } else {
            Err(IntakeError::SessionNotFound(id))
        }
    }

    pub async fn start(&self, id: Uuid) -> Result<SessionView, IntakeError> {
        let session = self.session(id).await?;
        let mut session = session.lock().await;
        let result = session.wizard.start();
        settle(&session, result)
    }

    pub async fn submit_basic_info(
        &self,
        id: Uuid,
        input: BasicInfoInput,
    ) -> Result<SessionView, IntakeError> {
        let session = self.session(id).await?;
        let mut session = session.lock().await;
        let result = session.wizard.submit_basic_info(input);
        if result.is_ok() {
            info!("Session {id}: basic info accepted");
        }
        settle(&session, result)
    }

    /// Stores the stack and, on first entry to `Questions`, runs the
    /// generator once and keeps its reply for the rest of the session.
    pub async fn submit_tech_stack(
        &self,
        id: Uuid,
        selection: TechStackSelection,
    ) -> Result<SessionView, IntakeError> {
        let session = self.session(id).await?;
        let mut session = session.lock().await;

        let result = session.wizard.submit_tech_stack(selection);
        if result.is_err() {
            return settle(&session, result);
        }

        let pending = session
            .wizard
            .pending_generation()
            .map(|(profile, stack)| (profile.clone(), stack.clone()));
        if let Some((profile, stack)) = pending {
            let raw = generate_questions(self.generator.as_ref(), &profile, &stack).await;
            let questions = if self.question_fallback {
                parse_with_fallback(&raw)
            } else {
                parse_questions(&raw)
            };
            if questions.is_empty() {
                warn!("Session {id}: generator reply contained no questions");
            }
            info!("Session {id}: {} interview questions ready", questions.len());
            if let Err(e) = session.wizard.store_questions(raw, questions) {
                return settle(&session, Err(e));
            }
        }

        settle(&session, Ok(()))
    }

    pub async fn set_response(
        &self,
        id: Uuid,
        ordinal: u32,
        link: &str,
    ) -> Result<SessionView, IntakeError> {
        let session = self.session(id).await?;
        let mut session = session.lock().await;
        let result = session.wizard.set_response(ordinal, link, Utc::now());
        settle(&session, result)
    }

    /// Assembles the record, saves it once through the gateway and completes
    /// the wizard when the record landed in either store.
    pub async fn submit(&self, id: Uuid) -> Result<SessionView, IntakeError> {
        let session = self.session(id).await?;
        let mut session = session.lock().await;

        let record = match session.wizard.prepare_submission(Utc::now()) {
            Ok(record) => record,
            Err(e) => return settle(&session, Err(e)),
        };

        let outcome = self.gateway.save(&record).await;
        info!(
            "Session {id}: application {} submitted ({})",
            record.id,
            if outcome.is_persisted() { "persisted" } else { "not persisted" }
        );
        let result = session.wizard.finish_submission(record, outcome);
        settle(&session, result)
    }

    pub async fn reset(&self, id: Uuid) -> Result<SessionView, IntakeError> {
        let session = self.session(id).await?;
        let mut session = session.lock().await;
        session.wizard.reset();
        info!("Session {id} reset");
        settle(&session, Ok(()))
    }
}
