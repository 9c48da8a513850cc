//! Flashcard generation from study material: prompt assembly, a count
//! heuristic for when the student doesn't pick one, and parsing of the
//! model's Q/A output.

use anyhow::{Error, Result, bail};
use regex::Regex;
use serde_json::json;

use crate::ai::prompt::{Prompt, templates};

/// Bounds for the card-count heuristic and for explicit requests.
pub const MIN_CARDS: usize = 4;
pub const MAX_CARDS: usize = 20;

const WORDS_PER_CARD: usize = 120;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Flashcard {
    pub question: String,
    pub answer: String,
}

/// How many cards to generate for a piece of material when the student
/// didn't ask for a specific number: roughly one card per hundred-odd
/// words, clamped to a small fixed range.
pub fn suggested_card_count(material: &str) -> usize {
    let words = material.split_whitespace().count();
    (words / WORDS_PER_CARD).clamp(MIN_CARDS, MAX_CARDS)
}

pub fn flashcards_prompt(
    material: &str,
    subject: Option<&str>,
    count: usize,
) -> Result<String, Error> {
    let rendered = templates().render(
        &Prompt::Flashcards.to_string(),
        &json!({
            "material": material,
            "subject": subject,
            "count": count,
        }),
    )?;
    Ok(rendered)
}

/// Extracts `Q:`/`A:` pairs from the model output. Surrounding prose is
/// ignored and answers may continue over several lines; an output with no
/// parseable pair is an error, not an empty deck.
pub fn parse_flashcards(output: &str) -> Result<Vec<Flashcard>, Error> {
    // Tolerates optional numbering like "1. Q: ..." in front of a card.
    let question_marker =
        Regex::new(r"^\s*(?:\d+[.)]\s*)?Q:\s*(.*)$").expect("Invalid question pattern");
    let answer_marker = Regex::new(r"^\s*A:\s*(.*)$").expect("Invalid answer pattern");

    let mut cards = Vec::new();
    let mut question: Option<String> = None;
    let mut answer: Option<String> = None;

    for line in output.lines() {
        if line.trim().is_empty() {
            // A blank line ends the current card; stray prose after it
            // never leaks into an answer.
            push_card(&mut cards, question.take(), answer.take());
        } else if let Some(caps) = question_marker.captures(line) {
            push_card(&mut cards, question.take(), answer.take());
            question = Some(caps[1].trim().to_string());
        } else if let Some(caps) = answer_marker.captures(line) {
            if question.is_some() {
                answer = Some(caps[1].trim().to_string());
            }
        } else if let Some(current) = answer.as_mut().or(question.as_mut()) {
            let continuation = line.trim();
            if !continuation.is_empty() {
                if !current.is_empty() {
                    current.push(' ');
                }
                current.push_str(continuation);
            }
        }
    }
    push_card(&mut cards, question, answer);

    if cards.is_empty() {
        bail!("No flashcards found in model output");
    }
    Ok(cards)
}

fn push_card(cards: &mut Vec<Flashcard>, question: Option<String>, answer: Option<String>) {
    if let (Some(question), Some(answer)) = (question, answer)
        && !question.is_empty()
        && !answer.is_empty()
    {
        cards.push(Flashcard { question, answer });
    }
}
