//! ragchat server — authenticated retrieval-augmented chat over HTTP.

pub mod auth;
pub mod error;
pub mod routes;
pub mod state;

pub use routes::build_router;
pub use state::AppState;
