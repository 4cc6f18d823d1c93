//! Core types used throughout the library.

pub mod credential;
pub mod event;
pub mod prompt;

// Re-export commonly used types
pub use credential::*;
pub use event::*;
pub use prompt::*;
