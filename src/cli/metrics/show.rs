use clap::Args;
use lattice_campaigns::domain::promotions::records::PromotionUuid;

use crate::cli::{ContextArgs, output};

#[derive(Debug, Args)]
pub(crate) struct ShowMetricsArgs {
    #[command(flatten)]
    context: ContextArgs,

    /// Promotion UUID
    promotion: PromotionUuid,
}

pub(crate) async fn run(args: ShowMetricsArgs) -> Result<(), String> {
    let ctx = args.context.connect().await?;

    let has_metrics = ctx
        .metrics
        .has_metrics(args.promotion)
        .await
        .map_err(|error| format!("failed to load metrics: {error}"))?;

    if !has_metrics {
        output::line("promotion_uuid", args.promotion);
        output::line("metrics", "not initialised");
        return Ok(());
    }

    let performance = ctx
        .metrics
        .aggregate(args.promotion)
        .await
        .map_err(|error| format!("failed to aggregate metrics: {error}"))?;

    output::performance(&performance);

    Ok(())
}
