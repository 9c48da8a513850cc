//! Prompt assembly for the AI-backed study modes. The natural-language
//! text lives in templates as data; the code only selects and fills it.

pub mod flashcards;
pub mod persona;
pub mod prompt;
pub mod teachback;
