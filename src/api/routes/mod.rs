//! API routes module

pub mod calendar;
pub mod chat;
pub mod flashcards;
pub mod schedule;
pub mod teachback;

use std::sync::{Arc, RwLock};

use crate::api::state::AppState;
use axum::Router;

type SharedState = Arc<RwLock<AppState>>;

/// Create the combined API router
pub fn router() -> Router<SharedState> {
    Router::new()
        // Calendar proxy routes
        .nest("/calendar", calendar::router())
        // AI chat completion proxy
        .nest("/chat", chat::router())
        // Flashcard generation
        .nest("/flashcards", flashcards::router())
        // Scheduling grid (free time reconciled with events)
        .nest("/schedule", schedule::router())
        // Teach-back study mode
        .nest("/teachback", teachback::router())
}
