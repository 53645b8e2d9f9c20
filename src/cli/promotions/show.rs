use clap::Args;
use lattice_campaigns::domain::promotions::records::PromotionUuid;

use crate::cli::{ContextArgs, output};

#[derive(Debug, Args)]
pub(crate) struct ShowPromotionArgs {
    #[command(flatten)]
    context: ContextArgs,

    /// Promotion UUID
    promotion: PromotionUuid,
}

pub(crate) async fn run(args: ShowPromotionArgs) -> Result<(), String> {
    let ctx = args.context.connect().await?;

    let promotion = ctx
        .promotions
        .get_promotion(args.promotion)
        .await
        .map_err(|error| format!("failed to load promotion: {error}"))?;

    output::resolved(&promotion);

    Ok(())
}
