//! The web front end: form handling, page rendering and the HTTP server.

pub mod form;
pub mod render;
pub mod server;
pub mod session;

pub use form::{SubmissionForm, ValidationError};
pub use server::{create_router, create_server, shutdown_signal, AppState};
pub use session::{GenerationSession, Outcome};
