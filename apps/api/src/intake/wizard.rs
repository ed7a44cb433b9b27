//! Wizard State Machine: the intake step sequence for one session.
//!
//! `Welcome → BasicInfo → TechStack → Questions → Complete`
//!
//! Transitions are pure: they validate input, update the wizard and return
//! field errors on failure. Generating questions and persisting the record
//! are done by the session service, which feeds results back through
//! `store_questions` and `finish_submission`. There is no back transition;
//! `reset` is the only way out of `Complete`.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use crate::intake::validators::{is_valid_email, is_valid_share_link};
use crate::models::application::{
    ApplicationRecord, InterviewQuestion, StorageOutcome, VideoResponse,
};
use crate::models::candidate::{BasicInfoInput, CandidateProfile, TechStackSelection};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Step {
    #[default]
    Welcome,
    BasicInfo,
    TechStack,
    Questions,
    Complete,
}

/// Inline validation message tied to a form field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

impl FieldError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WizardError {
    #[error("`{action}` is not available in step {step:?}")]
    WrongStep { action: &'static str, step: Step },

    #[error("input rejected: {} error(s)", .0.len())]
    Invalid(Vec<FieldError>),

    #[error("question {0} does not exist")]
    UnknownQuestion(u32),

    #[error("application was not saved: {0}")]
    NotPersisted(String),
}

pub const TECH_STACK_REQUIRED: &str =
    "Please select at least one technology or add details in Additional Skills";
pub const LINKS_REQUIRED: &str =
    "Please provide valid Loom video links for all questions before submitting.";

/// Questions produced once per session: the raw reply and what parsed from it.
#[derive(Debug, Clone, PartialEq)]
struct GeneratedQuestions {
    raw: String,
    questions: Vec<InterviewQuestion>,
}

#[derive(Debug, Clone, Default)]
pub struct Wizard {
    step: Step,
    profile: Option<CandidateProfile>,
    tech_stack: Option<TechStackSelection>,
    generated: Option<GeneratedQuestions>,
    responses: BTreeMap<u32, VideoResponse>,
    submitted: Option<ApplicationRecord>,
    outcome: Option<StorageOutcome>,
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

impl Wizard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn step(&self) -> Step {
        self.step
    }

    pub fn profile(&self) -> Option<&CandidateProfile> {
        self.profile.as_ref()
    }

    pub fn tech_stack(&self) -> Option<&TechStackSelection> {
        self.tech_stack.as_ref()
    }

    pub fn questions(&self) -> &[InterviewQuestion] {
        self.generated
            .as_ref()
            .map(|g| g.questions.as_slice())
            .unwrap_or(&[])
    }

    /// Responses in ordinal order.
    pub fn responses(&self) -> impl Iterator<Item = &VideoResponse> {
        self.responses.values()
    }

    pub fn submitted(&self) -> Option<&ApplicationRecord> {
        self.submitted.as_ref()
    }

    /// Outcome of the last save attempt, successful or not.
    pub fn outcome(&self) -> Option<&StorageOutcome> {
        self.outcome.as_ref()
    }

    fn expect_step(&self, expected: Step, action: &'static str) -> Result<(), WizardError> {
        if self.step == expected {
            Ok(())
        } else {
            Err(WizardError::WrongStep {
                action,
                step: self.step,
            })
        }
    }

    /// `Welcome → BasicInfo` on explicit confirmation.
    pub fn start(&mut self) -> Result<(), WizardError> {
        self.expect_step(Step::Welcome, "start")?;
        self.step = Step::BasicInfo;
        Ok(())
    }

    /// `BasicInfo → TechStack` once name, email and position are present and
    /// the email is well formed. Reports one error per failed field.
    pub fn submit_basic_info(&mut self, input: BasicInfoInput) -> Result<(), WizardError> {
        self.expect_step(Step::BasicInfo, "submit_basic_info")?;

        let name = input.name.trim();
        let email = input.email.trim();
        let position = input.position.trim();

        let mut errors = Vec::new();
        if name.is_empty() {
            errors.push(FieldError::new("name", "Name is required"));
        }
        if email.is_empty() {
            errors.push(FieldError::new("email", "Email is required"));
        } else if !is_valid_email(email) {
            errors.push(FieldError::new("email", "Please enter a valid email"));
        }
        if position.is_empty() {
            errors.push(FieldError::new("position", "Desired position is required"));
        }
        if !errors.is_empty() {
            return Err(WizardError::Invalid(errors));
        }

        self.profile = Some(CandidateProfile {
            name: name.to_string(),
            email: email.to_string(),
            phone: non_blank(input.phone),
            experience: input.experience,
            position: position.to_string(),
            location: non_blank(input.location),
        });
        self.step = Step::TechStack;
        Ok(())
    }

    /// `TechStack → Questions` once at least one tag or a note is present.
    pub fn submit_tech_stack(&mut self, selection: TechStackSelection) -> Result<(), WizardError> {
        self.expect_step(Step::TechStack, "submit_tech_stack")?;

        let selection = selection.normalized();
        if !selection.has_any_skill() {
            return Err(WizardError::Invalid(vec![FieldError::new(
                "tech_stack",
                TECH_STACK_REQUIRED,
            )]));
        }

        self.tech_stack = Some(selection);
        self.step = Step::Questions;
        Ok(())
    }

    /// Profile and stack to generate from, while questions are still missing.
    pub fn pending_generation(&self) -> Option<(&CandidateProfile, &TechStackSelection)> {
        if self.step != Step::Questions || self.generated.is_some() {
            return None;
        }
        self.profile.as_ref().zip(self.tech_stack.as_ref())
    }

    /// Stores the generator reply and its parsed questions. The first stored
    /// set is kept for the rest of the session.
    pub fn store_questions(
        &mut self,
        raw: String,
        questions: Vec<InterviewQuestion>,
    ) -> Result<(), WizardError> {
        self.expect_step(Step::Questions, "store_questions")?;
        if self.generated.is_none() {
            self.generated = Some(GeneratedQuestions { raw, questions });
        }
        Ok(())
    }

    /// Records the share link for question `ordinal`. A valid link replaces
    /// any previous one; a blank or invalid link removes it. Invalid
    /// non-blank input is also reported as an error.
    pub fn set_response(
        &mut self,
        ordinal: u32,
        link: &str,
        now: DateTime<Utc>,
    ) -> Result<(), WizardError> {
        self.expect_step(Step::Questions, "set_response")?;
        if ordinal == 0 || ordinal as usize > self.questions().len() {
            return Err(WizardError::UnknownQuestion(ordinal));
        }

        let link = link.trim();
        if is_valid_share_link(link) {
            self.responses.insert(
                ordinal,
                VideoResponse {
                    ordinal,
                    url: link.to_string(),
                    created_at: now,
                },
            );
            return Ok(());
        }

        self.responses.remove(&ordinal);
        if link.is_empty() {
            Ok(())
        } else {
            Err(WizardError::Invalid(vec![FieldError::new(
                format!("question_{ordinal}"),
                format!(
                    "Invalid Loom URL format for Question {ordinal}. \
                     Please enter a valid Loom share or embed link."
                ),
            )]))
        }
    }

    /// Snapshot for persistence, available once every question has a link.
    pub fn prepare_submission(&self, now: DateTime<Utc>) -> Result<ApplicationRecord, WizardError> {
        self.expect_step(Step::Questions, "submit")?;

        let (Some(profile), Some(tech_stack), Some(generated)) =
            (&self.profile, &self.tech_stack, &self.generated)
        else {
            return Err(WizardError::Invalid(vec![FieldError::new(
                "questions",
                "Interview questions have not been generated yet",
            )]));
        };

        if self.responses.len() != generated.questions.len() {
            return Err(WizardError::Invalid(vec![FieldError::new(
                "responses",
                LINKS_REQUIRED,
            )]));
        }

        Ok(ApplicationRecord {
            id: Uuid::new_v4(),
            profile: profile.clone(),
            tech_stack: tech_stack.clone(),
            questions: generated.questions.clone(),
            responses: self.responses.values().cloned().collect(),
            generated_questions: generated.raw.clone(),
            submitted_at: now,
        })
    }

    /// `Questions → Complete` when the save landed somewhere. When nothing
    /// was persisted the wizard stays on `Questions` so the applicant can
    /// retry.
    pub fn finish_submission(
        &mut self,
        record: ApplicationRecord,
        outcome: StorageOutcome,
    ) -> Result<(), WizardError> {
        self.expect_step(Step::Questions, "submit")?;

        self.outcome = Some(outcome.clone());
        match outcome {
            StorageOutcome::NotPersisted { error } => Err(WizardError::NotPersisted(error)),
            StorageOutcome::Remote | StorageOutcome::LocalFallback { .. } => {
                self.submitted = Some(record);
                self.step = Step::Complete;
                Ok(())
            }
        }
    }

    /// Full wipe back to `Welcome`, including generated questions.
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}
