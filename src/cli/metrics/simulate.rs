use clap::Args;
use lattice_campaigns::domain::promotions::records::PromotionUuid;

use crate::cli::{ContextArgs, output};

#[derive(Debug, Args)]
pub(crate) struct SimulateArgs {
    #[command(flatten)]
    context: ContextArgs,

    /// Promotion UUID
    promotion: PromotionUuid,

    /// Number of sales rounds; each round sells once per product with stock left
    #[arg(long, default_value_t = 1, value_parser = clap::value_parser!(u32).range(1..))]
    rounds: u32,
}

pub(crate) async fn run(args: SimulateArgs) -> Result<(), String> {
    let ctx = args.context.connect().await?;

    let mut performance = None;

    for _ in 0..args.rounds {
        performance = Some(
            ctx.metrics
                .simulate_sales(args.promotion)
                .await
                .map_err(|error| format!("failed to simulate sales: {error}"))?,
        );
    }

    if let Some(performance) = performance {
        output::line("rounds", args.rounds);
        output::performance(&performance);
    }

    Ok(())
}
