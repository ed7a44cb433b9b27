//! Question Generator: builds the interviewer prompt from a profile and tech
//! stack and asks the text-generation service for questions.
//!
//! Generation never fails from the caller's point of view: service errors
//! come back as a diagnostic string, which the parser treats as a reply with
//! no question blocks.

use tracing::{info, warn};

use crate::llm_client::prompts::{INTERVIEWER_PERSONA, NO_CLARIFYING_QUESTIONS};
use crate::llm_client::TextGenerator;
use crate::models::candidate::{CandidateProfile, TechCategory, TechStackSelection};
use crate::questions::prompts::{
    NO_SKILLS_SUMMARY, QUESTION_PROMPT_TEMPLATE, QUESTION_SYSTEM_TEMPLATE,
};

/// Prompt pair sent to the generator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuestionPrompt {
    pub prompt: String,
    pub system: String,
}

/// `"<Label>: a, b; <Label>: c"` over non-empty categories in category order.
/// The additional-skills note is not part of the summary.
pub fn tech_summary(stack: &TechStackSelection) -> String {
    let lines: Vec<String> = TechCategory::ALL
        .iter()
        .filter_map(|category| {
            let tags = stack.tags(*category);
            (!tags.is_empty()).then(|| format!("{}: {}", category.label(), tags.join(", ")))
        })
        .collect();

    if lines.is_empty() {
        return NO_SKILLS_SUMMARY.to_string();
    }
    lines.join("; ")
}

pub fn build_prompt(profile: &CandidateProfile, stack: &TechStackSelection) -> QuestionPrompt {
    let level = profile.experience.level();

    let prompt = QUESTION_PROMPT_TEMPLATE
        .replace("{descriptor}", level.descriptor())
        .replace("{category}", level.category())
        .replace("{experience}", &profile.experience.to_string())
        .replace("{position}", &profile.position)
        .replace("{tech_summary}", &tech_summary(stack));

    let system = QUESTION_SYSTEM_TEMPLATE
        .replace("{persona}", INTERVIEWER_PERSONA)
        .replace("{no_clarifying}", NO_CLARIFYING_QUESTIONS)
        .replace("{category}", level.category())
        .replace("{position}", &profile.position);

    QuestionPrompt { prompt, system }
}

/// Formats the diagnostic returned in place of a reply when generation fails.
pub fn diagnostic_reply(detail: &str) -> String {
    format!("Connection error: {detail}. Make sure the question service is running!")
}

/// Runs one generation call and returns the raw reply text, or a diagnostic
/// string if the call failed.
pub async fn generate_questions(
    generator: &dyn TextGenerator,
    profile: &CandidateProfile,
    stack: &TechStackSelection,
) -> String {
    let QuestionPrompt { prompt, system } = build_prompt(profile, stack);
    info!(
        "Generating {} questions for position '{}'",
        profile.experience.level().category(),
        profile.position
    );

    match generator.generate(&prompt, &system).await {
        Ok(reply) => reply,
        Err(e) => {
            warn!("Question generation failed: {e}");
            diagnostic_reply(&e.to_string())
        }
    }
}
