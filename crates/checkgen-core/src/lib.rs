//! Checklist generation core: schema, prompt construction, provider
//! interface, response validation, and the in-memory state store.
//!
//! The flow is `generate_checklist` (prompt -> provider -> validator)
//! feeding a [`ChecklistStore`]; a failed generation or validation
//! surfaces immediately and never touches the store's prior value.

pub mod checklist;
pub mod prompt;
pub mod provider;
pub mod store;
pub mod validate;

pub use checklist::{Checklist, Group, Importance, Item, Variant};
pub use provider::{GenerateError, Provider};
pub use store::ChecklistStore;
pub use validate::{ShapeError, ValidateError};

use thiserror::Error;
use tracing::debug;

/// Union of the generation pipeline's failure modes.
#[derive(Debug, Error)]
pub enum ChecklistError {
    #[error(transparent)]
    Generate(#[from] GenerateError),
    #[error(transparent)]
    Validate(#[from] ValidateError),
}

/// Run the full generation pipeline: guard the request, build the
/// variant prompt, invoke the provider once, validate its output.
///
/// A blank `request` fails with [`GenerateError::EmptyPrompt`] before
/// the provider is called. On malformed provider output the raw text is
/// kept out of the returned error and emitted only to the diagnostic
/// log.
pub async fn generate_checklist(
    provider: &dyn Provider,
    variant: Variant,
    request: &str,
) -> Result<Checklist, ChecklistError> {
    if request.trim().is_empty() {
        return Err(GenerateError::EmptyPrompt.into());
    }

    let prompt = prompt::build_prompt(variant, request);
    let raw = provider.generate(&prompt).await?;

    match validate::validate(&raw, variant) {
        Ok(checklist) => Ok(checklist),
        Err(err) => {
            if matches!(err, ValidateError::MalformedOutput(_)) {
                debug!(raw = %raw, "provider output was not valid JSON");
            }
            Err(err.into())
        }
    }
}
