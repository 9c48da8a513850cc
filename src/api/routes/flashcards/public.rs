//! Public types for the flashcards API
use serde::{Deserialize, Serialize};

use crate::ai::flashcards::Flashcard;

#[derive(Deserialize)]
pub struct FlashcardsRequest {
    /// The study material to generate cards from.
    pub material: Option<String>,
    pub subject: Option<String>,
    /// Explicit card count; derived from the material length when absent.
    pub count: Option<usize>,
}

#[derive(Serialize)]
pub struct FlashcardPayload {
    pub question: String,
    pub answer: String,
}

impl From<Flashcard> for FlashcardPayload {
    fn from(card: Flashcard) -> Self {
        Self {
            question: card.question,
            answer: card.answer,
        }
    }
}

#[derive(Serialize)]
pub struct FlashcardsResponse {
    pub cards: Vec<FlashcardPayload>,
    pub count: usize,
}
