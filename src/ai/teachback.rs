//! The teach-back study mode: the AI poses questions about a topic, the
//! student answers, and the session ends with AI-generated feedback. The
//! server holds no session state; every transition takes the transcript
//! and returns the messages to send.

use anyhow::{Error, Result};
use serde_json::json;

use crate::ai::persona::{Difficulty, GradeBand, persona};
use crate::ai::prompt::{Prompt, templates};
use crate::anthropic::{ChatMessage, Role};

/// Typing this (in any casing) ends the conversation and requests
/// feedback instead of another question.
pub const END_KEYWORD: &str = "end";

/// Shown when feedback is requested before any question was answered.
pub const NEEDS_ANSWER_MESSAGE: &str =
    "You need to answer at least one question to receive feedback.";

pub fn is_end_message(message: &str) -> bool {
    message.trim().eq_ignore_ascii_case(END_KEYWORD)
}

/// The opening prompt that seeds the conversation. Sent as a user turn;
/// it is not part of the visible transcript afterwards.
pub fn intro_prompt(topic: &str, grade: GradeBand, difficulty: Difficulty) -> Result<String, Error> {
    let spec = persona(grade, difficulty);
    let rendered = templates().render(
        &Prompt::TeachbackIntro.to_string(),
        &json!({
            "topic": topic,
            "audience": spec.audience,
            "difficulty": spec.difficulty,
            "difficulty_guidance": spec.difficulty_guidance,
        }),
    )?;
    Ok(rendered)
}

/// The nudge appended after each answer so the model asks the next
/// question without commenting on the previous answer. Not persisted in
/// the transcript.
pub fn next_question_nudge() -> Result<ChatMessage, Error> {
    let rendered = templates().render(
        &Prompt::TeachbackNextQuestion.to_string(),
        &json!({}),
    )?;
    Ok(ChatMessage::new(Role::User, &rendered))
}

/// The closing prompt that turns the transcript into feedback.
pub fn feedback_prompt(topic: &str) -> Result<String, Error> {
    let rendered = templates().render(
        &Prompt::TeachbackFeedback.to_string(),
        &json!({ "topic": topic }),
    )?;
    Ok(rendered)
}

/// How many questions the student has answered so far: user turns that
/// directly follow an assistant question count, anything else does not.
pub fn answered_questions(transcript: &[ChatMessage]) -> usize {
    transcript
        .windows(2)
        .filter(|pair| pair[0].role == Role::Assistant && pair[1].role == Role::User)
        .count()
}
