use clap::Subcommand;
use serde_json::json;
use uuid::Uuid;

use crate::auth::{fingerprint, Role, TokenIssuer, TokenVerifier};
use crate::cli::utils::{output_fields, output_success};
use crate::cli::{load_config, OutputFormat};

#[derive(Subcommand)]
pub enum TokenCommands {
    #[command(about = "Mint a signed token with the configured JWT_SECRET")]
    Mint {
        #[arg(long, help = "Role claim (admin, company, consumer, ...)")]
        role: String,
        #[arg(long, help = "Email claim")]
        email: String,
        #[arg(long, help = "User id claim (random UUID if omitted)")]
        user_id: Option<String>,
        #[arg(long, help = "Session id claim (random UUID if omitted)")]
        session_id: Option<String>,
        #[arg(long, help = "Lifetime in hours (defaults to JWT_EXPIRY_HOURS)")]
        ttl_hours: Option<u64>,
    },

    #[command(about = "Verify a token and show its claims")]
    Inspect {
        #[arg(help = "Token to verify")]
        token: String,
    },
}

pub async fn handle(cmd: TokenCommands, output_format: OutputFormat) -> anyhow::Result<()> {
    let config = load_config()?;

    match cmd {
        TokenCommands::Mint { role, email, user_id, session_id, ttl_hours } => {
            let ttl = ttl_hours.unwrap_or(config.security.jwt_expiry_hours);
            let issuer = TokenIssuer::new(&config.security.jwt_secret, ttl)?;

            let user_id = user_id.unwrap_or_else(|| Uuid::new_v4().to_string());
            let session_id = session_id.unwrap_or_else(|| Uuid::new_v4().to_string());
            let token = issuer.mint(user_id.clone(), email, Role::from(role), session_id.clone())?;

            tracing::debug!(token = %fingerprint(&token), "minted token");

            match output_format {
                OutputFormat::Json => output_success(
                    &output_format,
                    "Token minted",
                    Some(json!({
                        "token": token,
                        "user_id": user_id,
                        "session_id": session_id,
                        "ttl_hours": ttl,
                    })),
                ),
                OutputFormat::Text => {
                    println!("{}", token);
                    Ok(())
                }
            }
        }
        TokenCommands::Inspect { token } => {
            let verifier = TokenVerifier::new(&config.security.jwt_secret, config.security.jwt_leeway_secs)?;

            let claims = verifier
                .verify_strict(&token)
                .map_err(|e| anyhow::anyhow!("Token rejected: {}", e))?;

            output_fields(
                &output_format,
                &[
                    ("userId", claims.user_id),
                    ("email", claims.email),
                    ("role", claims.role.to_string()),
                    ("sessionId", claims.session_id),
                    ("iat", claims.iat.to_string()),
                    ("exp", claims.exp.to_string()),
                ],
            )
        }
    }
}
