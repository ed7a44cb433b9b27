// Shared prompt fragments. Feature modules keep their own prompts.rs and
// pull cross-cutting pieces from here.

/// Persona line prepended to every interviewer system prompt.
pub const INTERVIEWER_PERSONA: &str =
    "You are an experienced technical interviewer who has conducted hundreds of interviews.";

/// Keeps the model from closing with filler invitations.
pub const NO_CLARIFYING_QUESTIONS: &str = "Do NOT include phrases like 'Do you have any \
    clarifying questions?' or 'Feel free to ask questions'.";
