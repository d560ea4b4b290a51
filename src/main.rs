use clap::{Parser, Subcommand};
use colored::*;
use docref::{
    Config, DocLookup,
    config::CONFIG_FILE,
    fetch::HttpFetcher,
    init::init_config,
    output::{render_answer, render_json},
};
use std::{path::Path, sync::Arc};
use tracing_subscriber::EnvFilter;

// ============================================================================
// CLI Definition
// ============================================================================

#[derive(Parser)]
#[command(name = "docref")]
#[command(about = "Documentation links for discord.py and Python symbols", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Print answers as JSON
    #[arg(long, global = true)]
    json: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Documentation link for a discord.py entity
    #[command(visible_alias = "dpy")]
    Discordpy {
        /// Object to look up; omit for the documentation homepage
        obj: Vec<String>,
    },
    /// Documentation link for a Python entity
    #[command(visible_aliases = ["pydoc", "py"])]
    Python {
        /// Object to look up; omit for the documentation homepage
        obj: Vec<String>,
    },
    /// Initialize a new docref.toml configuration file
    Init {
        /// Overwrite existing docref.toml if present
        #[arg(long)]
        force: bool,
    },
}

// ============================================================================
// Main Entry Point
// ============================================================================

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    let result = match cli.command {
        Commands::Init { force } => init_config(Path::new(CONFIG_FILE), force),
        Commands::Discordpy { obj } => {
            let config = Config::load();
            let source = config.primary_source.clone();
            lookup(&config, &source, &obj, cli.json).await
        }
        Commands::Python { obj } => {
            let config = Config::load();
            let source = config.secondary_source.clone();
            lookup(&config, &source, &obj, cli.json).await
        }
    };

    if let Err(e) = result {
        eprintln!("\n{} {}", "❌".red(), e.red());
        std::process::exit(1);
    }
}

async fn lookup(config: &Config, source: &str, obj: &[String], json: bool) -> Result<(), String> {
    let fetcher = HttpFetcher::new(config.timeout())
        .map_err(|e| format!("Failed to create HTTP client: {}", e))?;
    let lookup = DocLookup::new(config, Arc::new(fetcher));

    let query = obj.join(" ");
    let query = (!query.trim().is_empty()).then_some(query.as_str());

    match lookup.answer(source, query).await {
        Ok(answer) if json => {
            let rendered = render_json(&answer)
                .map_err(|e| format!("Failed to serialize answer: {}", e))?;
            println!("{}", rendered);
        }
        Ok(answer) => println!("{}", render_answer(&answer)),
        Err(e) => {
            tracing::debug!(error = %e, "lookup failed");
            return Err(e.user_message().to_string());
        }
    }

    Ok(())
}
