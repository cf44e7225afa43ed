//! Generation provider interface and the Gemini adapter.
//!
//! This module defines the [`Provider`] trait that text-generation
//! backends implement, the [`GenerateError`] taxonomy, and the concrete
//! [`GeminiClient`] HTTP adapter.
//!
//! # Architecture
//!
//! ```text
//! caller
//!    |
//!    v
//! &dyn Provider --generate(prompt)--> raw text | GenerateError
//!    |
//!    v
//! GeminiClient (one HTTP call, JSON-only output requested)
//! ```

pub mod gemini;
pub mod trait_def;

// Re-export the primary public API at the module level.
pub use gemini::{DEFAULT_MODEL, GeminiClient, GeminiConfig};
pub use trait_def::{GenerateError, Provider};
