pub mod commands;
pub mod utils;

use clap::{Parser, Subcommand};
use serde::{Deserialize, Serialize};

use crate::config::AppConfig;
use crate::policy::GatePolicy;

#[derive(Parser)]
#[command(name = "gatectl")]
#[command(about = "gatectl - Token and route-policy tooling for the IoT gate")]
#[command(version)]
pub struct Cli {
    #[arg(long, global = true, help = "Output in human-readable text format")]
    pub text: bool,

    #[arg(long, global = true, help = "Output in JSON format")]
    pub json: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    #[command(about = "Mint and inspect signed credentials")]
    Token {
        #[command(subcommand)]
        cmd: commands::token::TokenCommands,
    },

    #[command(about = "Query the route table and access policy")]
    Route {
        #[command(subcommand)]
        cmd: commands::route::RouteCommands,
    },

    #[command(about = "Send a request to a running gate and report its decision")]
    Probe {
        #[arg(help = "Full URL, e.g. http://localhost:3000/admin")]
        url: String,
        #[arg(long, help = "Bearer token to send")]
        token: Option<String>,
        #[arg(long, help = "Send the token as the auth cookie instead of a header")]
        cookie: bool,
    },
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum OutputFormat {
    Text,
    Json,
}

impl OutputFormat {
    pub fn from_cli(cli: &Cli) -> Self {
        if cli.json {
            OutputFormat::Json
        } else {
            OutputFormat::Text
        }
    }
}

/// Policy the server would run with: the configured file, else the defaults.
pub fn load_policy() -> anyhow::Result<GatePolicy> {
    match std::env::var("GATE_POLICY_FILE") {
        Ok(path) if !path.is_empty() => Ok(GatePolicy::from_file(path)?),
        _ => Ok(GatePolicy::default()),
    }
}

pub fn load_config() -> anyhow::Result<AppConfig> {
    Ok(AppConfig::from_env()?)
}

pub async fn run(cli: Cli) -> anyhow::Result<()> {
    let output_format = OutputFormat::from_cli(&cli);

    match cli.command {
        Commands::Token { cmd } => commands::token::handle(cmd, output_format).await,
        Commands::Route { cmd } => commands::route::handle(cmd, output_format).await,
        Commands::Probe { url, token, cookie } => {
            commands::probe::handle(&url, token.as_deref(), cookie, output_format).await
        }
    }
}
