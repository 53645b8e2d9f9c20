use clap::Args;
use lattice_campaigns::domain::promotions::records::PromotionUuid;

use crate::cli::{ContextArgs, output};

#[derive(Debug, Args)]
pub(crate) struct InitMetricsArgs {
    #[command(flatten)]
    context: ContextArgs,

    /// Promotion UUID
    promotion: PromotionUuid,
}

pub(crate) async fn run(args: InitMetricsArgs) -> Result<(), String> {
    let ctx = args.context.connect().await?;

    let samples = ctx
        .metrics
        .initialize(args.promotion)
        .await
        .map_err(|error| format!("failed to initialise metrics: {error}"))?;

    output::line("promotion_uuid", args.promotion);
    output::line("samples", samples.len());

    for sample in &samples {
        output::blank();
        output::sample(sample);
    }

    Ok(())
}
