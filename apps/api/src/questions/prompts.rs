// Prompt constants for interview-question generation.
// Placeholders are replaced with `str::replace` before sending.

/// Question generation prompt.
/// Replace: {descriptor}, {category}, {position}, {experience}, {tech_summary}
///
/// The format example defines the reply markup parsed by `questions::parser`.
/// Changing it means bumping `parser::MARKUP_VERSION`.
pub const QUESTION_PROMPT_TEMPLATE: &str = r#"You are a senior technical interviewer conducting a video interview for a {descriptor} {position} position.

Candidate Profile:
- Experience: {experience} years
- Technical Skills: {tech_summary}
- Position: {position}

Generate 4-5 realistic technical interview questions that:
1. Sound like actual interview questions a hiring manager would ask
2. Are appropriate for {category} level experience
3. Focus on their declared technologies (if any)
4. **Include a mix of conceptual, system design, and practical coding challenges.**
5. Include helpful hints for video recording (NOT answer hints)

For each question, provide:
- The main interview question (numbered)
- 2 recording hints that help structure their video response
- Expected response time (1-3 minutes)

Format example:
**Question 1: [Actual interview question here]**
🎥 *Recording Hint 1: Start by explaining your approach or logic*
🎥 *Recording Hint 2: Walk through a code example or diagram if applicable*
📹 *Recommended response time: 2-3 minutes*

Make questions conversational and realistic - as if you're sitting across from them in an interview. Avoid asking if they have clarifying questions.
"#;

/// System instruction for question generation.
/// Replace: {persona}, {category}, {position}, {no_clarifying}
pub const QUESTION_SYSTEM_TEMPLATE: &str = r#"{persona} Your questions should:
- Sound natural and conversational
- Test real-world application, not just theory
- Be appropriate for {category} developers
- Help candidates showcase their experience
- Be clear and specific
- Focus on practical scenarios they might face in a {position} role.
- Ensure recording hints are non-technical guidance on structuring the video answer (e.g., explain thinking, walk through code/diagram).
- {no_clarifying}
- **Include a variety of question types: theoretical, problem-solving, system design, and coding tasks.**
"#;

/// Used when no category has tags, whatever the additional-skills note says.
pub const NO_SKILLS_SUMMARY: &str = "no specific technical skills mentioned";

/// Synthesized reply used when the generator's text yields no question blocks.
pub const FALLBACK_REPLY: &str = r#"**Question 1: Walk us through a recent project you are proud of. What problem did it solve, which technologies did you use, and what would you do differently today?**
🎥 *Recording Hint 1: Start with the context and your role on the project*
🎥 *Recording Hint 2: Show code, a diagram, or the running product if you can*
📹 *Recommended response time: 2-3 minutes*
"#;
