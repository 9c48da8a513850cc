pub mod public;
pub mod routes;
pub mod server;
pub mod state;

pub use server::app;
pub use state::AppState;
