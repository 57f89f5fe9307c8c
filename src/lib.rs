//! Ad idea generation core for the adforge front-end
//!
//! Builds prompts for a text-generation service, parses and repairs its JSON
//! output into ad ideas, acquires one generated image per idea, and falls
//! back to deterministic templated content when the remote service fails.

pub mod acquirer;
pub mod ai;
pub mod app;
pub mod error;
pub mod fallback;
pub mod models;
pub mod parser;
pub mod prompts;

pub use error::{Error, Result};
