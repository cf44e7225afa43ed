mod config;
mod generate_cmd;
mod serve_cmd;
mod session;
mod show_cmd;
mod toggle_cmd;
mod tui;

use std::sync::Arc;

use clap::{Parser, Subcommand};

use checkgen_core::Variant;
use checkgen_core::provider::{DEFAULT_MODEL, GeminiClient, Provider};

use config::CheckgenConfig;

#[derive(Parser)]
#[command(name = "checkgen", about = "AI checklist generator and tracker")]
struct Cli {
    /// Gemini API key (overrides GEMINI_API_KEY env var and config file)
    #[arg(long, global = true)]
    api_key: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Write a checkgen config file (pass the key via --api-key)
    Init {
        /// Generation model to use
        #[arg(long, default_value = DEFAULT_MODEL)]
        model: String,
        /// Overwrite existing config file
        #[arg(long)]
        force: bool,
    },
    /// Generate a checklist, replacing the current one
    Generate {
        /// Checklist variant: trip, pet, moving, event, new_beginnings, project_goal
        variant: Variant,
        /// What to generate (e.g. "3-day beach trip for 2 adults")
        #[arg(required = true)]
        request: Vec<String>,
    },
    /// Show the current checklist
    Show {
        /// Print the checklist as a JSON document instead of a report
        #[arg(long)]
        json: bool,
    },
    /// Toggle one item's completion flag
    Toggle {
        /// Group key (the category/section/week/phase name)
        group: String,
        /// Item id within the group
        item_id: String,
    },
    /// Discard the current checklist
    Clear,
    /// Run the HTTP generation service
    Serve {
        /// Address to bind
        #[arg(long, default_value = "127.0.0.1")]
        bind: String,
        /// Port to listen on
        #[arg(long, default_value_t = 8080)]
        port: u16,
    },
    /// Launch the interactive checklist view
    Tui,
}

/// Execute the `checkgen init` command: write config file.
fn cmd_init(api_key: &str, model: &str, force: bool) -> anyhow::Result<()> {
    let path = config::config_path();

    if path.exists() && !force {
        anyhow::bail!(
            "config file already exists at {}\nUse --force to overwrite.",
            path.display()
        );
    }

    let cfg = config::ConfigFile {
        provider: config::ProviderSection {
            api_key: api_key.to_string(),
            model: model.to_string(),
        },
    };
    config::save_config(&cfg)?;

    println!("Config written to {}", path.display());
    println!("  provider.model = {model}");
    println!();
    println!("Next: run `checkgen generate trip \"3-day beach trip for 2 adults\"`.");

    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Init { model, force } => {
            let Some(api_key) = cli.api_key.as_deref() else {
                anyhow::bail!("an API key is required: `checkgen init --api-key <key>`");
            };
            cmd_init(api_key, &model, force)?;
        }
        Commands::Generate { variant, request } => {
            let resolved = CheckgenConfig::resolve(cli.api_key.as_deref())?;
            let request = request.join(" ");
            generate_cmd::run_generate(resolved, variant, &request).await?;
        }
        Commands::Show { json } => {
            show_cmd::run_show(json)?;
        }
        Commands::Toggle { group, item_id } => {
            toggle_cmd::run_toggle(&group, &item_id)?;
        }
        Commands::Clear => {
            if session::clear()? {
                println!("Checklist discarded.");
            } else {
                println!("No current checklist.");
            }
        }
        Commands::Serve { bind, port } => {
            let resolved = CheckgenConfig::resolve(cli.api_key.as_deref())?;
            let provider = match GeminiClient::new(resolved.gemini) {
                Ok(client) => Some(Arc::new(client) as Arc<dyn Provider>),
                Err(_) => {
                    tracing::warn!("no API key configured; generation requests will fail");
                    None
                }
            };
            serve_cmd::run_serve(serve_cmd::AppState { provider }, &bind, port).await?;
        }
        Commands::Tui => {
            let Some(session) = session::load()? else {
                anyhow::bail!(
                    "no current checklist. Run `checkgen generate <variant> <request>` first."
                );
            };
            tui::run_tui(session)?;
        }
    }

    Ok(())
}
