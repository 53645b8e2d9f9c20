use clap::{Args, Subcommand};

mod init;
mod show;
mod simulate;

#[derive(Debug, Args)]
pub(crate) struct MetricsCommand {
    #[command(subcommand)]
    command: MetricsSubcommand,
}

#[derive(Debug, Subcommand)]
enum MetricsSubcommand {
    /// Capture baseline inventory for a promotion's products
    Init(init::InitMetricsArgs),

    /// Run simulated sales against a promotion
    Simulate(simulate::SimulateArgs),

    /// Show a promotion's performance
    Show(show::ShowMetricsArgs),
}

pub(crate) async fn run(command: MetricsCommand) -> Result<(), String> {
    match command.command {
        MetricsSubcommand::Init(args) => init::run(args).await,
        MetricsSubcommand::Simulate(args) => simulate::run(args).await,
        MetricsSubcommand::Show(args) => show::run(args).await,
    }
}
