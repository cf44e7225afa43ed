//! `checkgen generate` command: run the generation pipeline and replace
//! the session checklist.

use anyhow::{Result, bail};

use checkgen_core::provider::{GenerateError, GeminiClient};
use checkgen_core::{Variant, generate_checklist};

use crate::config::{self, CheckgenConfig};
use crate::session::{self, Session};
use crate::show_cmd;

/// Run the generate command.
pub async fn run_generate(config: CheckgenConfig, variant: Variant, request: &str) -> Result<()> {
    let client = match GeminiClient::new(config.gemini) {
        Ok(client) => client,
        Err(GenerateError::MissingCredentials) => bail!(
            "no API key configured.\nSet {} or run `checkgen init --api-key <key>`.",
            config::API_KEY_ENV
        ),
        Err(e) => return Err(e.into()),
    };

    println!("Generating a {variant} checklist...");
    let checklist = generate_checklist(&client, variant, request).await?;

    let session = Session::new(variant, request.to_string(), checklist);
    session::save(&session)?;

    println!();
    show_cmd::print_session(&session);
    println!();
    println!("Toggle items with `checkgen toggle <group> <item-id>`.");
    Ok(())
}
