use clap::{Args, Parser, Subcommand};
use lattice_campaigns::{
    config::{DatabaseConfig, LoggingConfig, PolicyConfig},
    context::AppContext,
    observability,
};

mod db;
mod metrics;
mod output;
mod promotions;

#[derive(Debug, Parser)]
#[command(name = "lattice-campaigns", about = "Promotion campaigns CLI", long_about = None)]
pub(crate) struct Cli {
    #[command(flatten)]
    logging: LoggingConfig,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    Db(db::DbCommand),
    Promotions(promotions::PromotionsCommand),
    Metrics(metrics::MetricsCommand),
}

impl Cli {
    pub(crate) async fn run(self) -> Result<(), String> {
        observability::init(&self.logging)
            .map_err(|error| format!("failed to initialise logging: {error}"))?;

        match self.command {
            Commands::Db(command) => db::run(command).await,
            Commands::Promotions(command) => promotions::run(command).await,
            Commands::Metrics(command) => metrics::run(command).await,
        }
    }
}

/// Connection and policy settings shared by every command that talks to the store.
#[derive(Debug, Args)]
pub(crate) struct ContextArgs {
    #[command(flatten)]
    database: DatabaseConfig,

    #[command(flatten)]
    policy: PolicyConfig,
}

impl ContextArgs {
    pub(crate) async fn connect(&self) -> Result<AppContext, String> {
        AppContext::from_database_url(&self.database.database_url, &self.policy)
            .await
            .map_err(|error| format!("failed to initialise: {error}"))
    }
}
