mod commands;
mod prompt;
mod render;

use clap::{Args, Parser, Subcommand};
use commands::Selection;
use pricedesk_core::AppConfig;
use rust_decimal::Decimal;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "pricedesk-cli")]
#[command(about = "Inspect and raise prices of the most expensive catalog items")]
struct Cli {
    /// Upstream username; prompted for when absent.
    #[arg(long, env = "PRICEDESK_USERNAME", global = true)]
    username: Option<String>,

    /// Upstream password; prompted for when absent.
    #[arg(long, env = "PRICEDESK_PASSWORD", hide_env_values = true, global = true)]
    password: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Args)]
struct SelectionArgs {
    /// Category to select from (defaults to `PRICEDESK_DEFAULT_CATEGORY`).
    #[arg(long)]
    category: Option<String>,

    /// How many items to select (defaults to `PRICEDESK_DEFAULT_TOP_N`).
    #[arg(long, short = 'n')]
    count: Option<usize>,
}

impl SelectionArgs {
    fn resolve(self, config: &AppConfig) -> Selection {
        Selection {
            category: self
                .category
                .unwrap_or_else(|| config.default_category.clone()),
            count: self.count.unwrap_or(config.default_top_n),
        }
    }
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// List the most expensive items in a category.
    Top {
        #[command(flatten)]
        selection: SelectionArgs,
    },
    /// Raise the prices of the most expensive items in a category.
    Raise {
        #[command(flatten)]
        selection: SelectionArgs,

        /// Percentage increase, e.g. `12.5`; prompted for when absent.
        #[arg(long, short = 'p', allow_negative_numbers = true)]
        percentage: Option<Decimal>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = pricedesk_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let client = pricedesk_upstream::UpstreamClient::from_config(&config)?;
    let credentials = commands::resolve_credentials(cli.username, cli.password)?;
    let token = commands::authenticate(&client, &credentials, config.token_expires_mins).await?;

    match cli.command {
        Commands::Top { selection } => {
            let selection = selection.resolve(&config);
            commands::run_top(&client, &config, token, &selection, &mut std::io::stdout()).await
        }
        Commands::Raise {
            selection,
            percentage,
        } => {
            let selection = selection.resolve(&config);
            commands::run_raise(
                &client,
                &config,
                token,
                &selection,
                percentage,
                &mut std::io::stdin().lock(),
                &mut std::io::stdout(),
            )
            .await
        }
    }
}

#[cfg(test)]
mod tests;
