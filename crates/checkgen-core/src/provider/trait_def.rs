//! The `Provider` trait -- the adapter interface for generation backends.
//!
//! Each concrete backend (Gemini today) implements this trait. The trait
//! is intentionally object-safe so callers can hold it as
//! `Arc<dyn Provider>` and tests can substitute a scripted fake.

use async_trait::async_trait;
use thiserror::Error;

/// Failures from a generation request.
#[derive(Debug, Error)]
pub enum GenerateError {
    /// The caller supplied an empty or blank prompt. Raised before any
    /// network I/O.
    #[error("a non-empty prompt is required")]
    EmptyPrompt,

    /// The provider has no credentials configured.
    #[error("provider credentials are not configured")]
    MissingCredentials,

    /// The provider or the network failed; `message` is the upstream
    /// message, passed through without reinterpretation.
    #[error("provider request failed: {message}")]
    Provider { message: String },
}

/// Adapter interface for text-generation providers.
///
/// Implementations make exactly one outbound call per `generate`
/// invocation and never retry -- retry policy belongs to the caller.
/// The returned text is raw model output: nothing here assumes it is
/// valid JSON; that is the validator's job.
///
/// # Object Safety
///
/// This trait is object-safe: store it as `Box<dyn Provider>` or
/// `Arc<dyn Provider>`.
#[async_trait]
pub trait Provider: Send + Sync {
    /// Human-readable name for this provider (e.g. "gemini").
    fn name(&self) -> &str;

    /// Send `prompt` to the provider and return its raw textual output.
    ///
    /// A blank `prompt` must fail with [`GenerateError::EmptyPrompt`]
    /// before any I/O happens.
    async fn generate(&self, prompt: &str) -> Result<String, GenerateError>;
}

// Compile-time assertion: Provider must be object-safe.
// If this line compiles, the trait can be used as `dyn Provider`.
const _: () = {
    fn _assert_object_safe(_: &dyn Provider) {}
};
