use clap::Subcommand;

use crate::auth::Role;
use crate::cli::utils::output_fields;
use crate::cli::{load_policy, OutputFormat};
use crate::policy::RouteClass;

#[derive(Subcommand)]
pub enum RouteCommands {
    #[command(about = "Show which route class a path falls into")]
    Classify {
        #[arg(help = "Request path, e.g. /billing/invoices")]
        path: String,
    },

    #[command(about = "Show whether an authenticated role may reach a path")]
    Check {
        #[arg(help = "Request path")]
        path: String,
        #[arg(long, help = "Role of the authenticated caller")]
        role: String,
    },
}

pub async fn handle(cmd: RouteCommands, output_format: OutputFormat) -> anyhow::Result<()> {
    let policy = load_policy()?;

    match cmd {
        RouteCommands::Classify { path } => {
            let class = policy.routes.classify(&path);
            output_fields(&output_format, &[("path", path), ("class", class.to_string())])
        }
        RouteCommands::Check { path, role } => {
            let role = Role::from(role);
            let class = policy.routes.classify(&path);

            let outcome = match class {
                RouteClass::Protected => format!("{:?}", policy.access.resolve(&role, &path)).to_lowercase(),
                RouteClass::AuthOnly => format!("redirect {}", policy.access.dashboard_for(&role)),
                _ => "allow".to_string(),
            };

            output_fields(
                &output_format,
                &[
                    ("path", path),
                    ("role", role.to_string()),
                    ("class", class.to_string()),
                    ("outcome", outcome),
                ],
            )
        }
    }
}
