//! Reply parser: turns the generator's markup into `InterviewQuestion`s.
//!
//! Markup (version 1), one block per question:
//!
//! ```text
//! **Question 1: <question text>**
//! 🎥 *<recording hint>*
//! 🎥 *<recording hint>*
//! 📹 *<recommended response time>*
//! ```
//!
//! Blocks are numbered by position, not by the number the model wrote.
//! Inside block `n` only a header reading `**Question n:` is recognised;
//! hint and duration lines count only after that header.

use crate::models::application::InterviewQuestion;
use crate::questions::prompts::FALLBACK_REPLY;

pub const MARKUP_VERSION: u32 = 1;

const BLOCK_MARKER: &str = "**Question ";
const BOLD: &str = "**";
const HINT_PREFIX: &str = "🎥 *";
const DURATION_PREFIX: &str = "📹 *";

/// Classified reply line.
#[derive(Debug, PartialEq, Eq)]
enum ReplyLine<'a> {
    /// Header text after the first colon, not yet cleaned.
    Header(&'a str),
    Hint(&'a str),
    Duration(&'a str),
    Other,
}

fn classify<'a>(line: &'a str, header_prefix: &str) -> ReplyLine<'a> {
    if let Some(rest) = line.strip_prefix(header_prefix) {
        return ReplyLine::Header(rest);
    }
    if let Some(span) = line.strip_prefix(HINT_PREFIX).and_then(italic_span) {
        return ReplyLine::Hint(span);
    }
    if let Some(span) = line.strip_prefix(DURATION_PREFIX).and_then(italic_span) {
        return ReplyLine::Duration(span);
    }
    ReplyLine::Other
}

/// Interior of an italic span whose opening `*` was already consumed:
/// at least one character, then a closing `*`.
fn italic_span(rest: &str) -> Option<&str> {
    let end = rest.find('*')?;
    (end > 0).then(|| rest[..end].trim())
}

fn clean_header(raw: &str) -> String {
    let mut text = raw.trim();
    if let Some(stripped) = text.strip_prefix(BOLD) {
        text = stripped.trim();
    }
    if let Some(stripped) = text.strip_suffix(BOLD) {
        text = stripped.trim();
    }
    text.to_string()
}

fn parse_block(ordinal: u32, body: &str) -> InterviewQuestion {
    let block = format!("{BLOCK_MARKER}{}", body.trim());
    let header_prefix = format!("{BLOCK_MARKER}{ordinal}:");
    let mut question = InterviewQuestion::untitled(ordinal);
    let mut header_seen = false;

    for line in block.lines().map(str::trim).filter(|l| !l.is_empty()) {
        match classify(line, &header_prefix) {
            ReplyLine::Header(raw) => {
                question.text = clean_header(raw);
                header_seen = true;
            }
            ReplyLine::Hint(hint) if header_seen => question.hints.push(hint.to_string()),
            ReplyLine::Duration(duration) if header_seen => {
                question.recommended_duration = Some(duration.to_string());
            }
            _ => {}
        }
    }

    question
}

/// Parses every `**Question ` block in `reply`. Text before the first marker
/// is ignored; a block without a matching header yields an empty question.
pub fn parse_questions(reply: &str) -> Vec<InterviewQuestion> {
    reply
        .split(BLOCK_MARKER)
        .skip(1)
        .enumerate()
        .map(|(index, body)| parse_block(index as u32 + 1, body))
        .collect()
}

/// Like `parse_questions`, but substitutes one generic question when the
/// reply contains no blocks at all (for example a connection diagnostic).
pub fn parse_with_fallback(reply: &str) -> Vec<InterviewQuestion> {
    let questions = parse_questions(reply);
    if questions.is_empty() {
        parse_questions(FALLBACK_REPLY)
    } else {
        questions
    }
}
