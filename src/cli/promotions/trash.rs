use clap::Args;
use lattice_campaigns::domain::{promotions::records::PromotionUuid, users::UserUuid};

use crate::cli::{ContextArgs, output};

#[derive(Debug, Args)]
pub(crate) struct TrashArgs {
    #[command(flatten)]
    context: ContextArgs,

    /// Promotion UUID
    promotion: PromotionUuid,

    /// User performing the action
    #[arg(long)]
    actor: UserUuid,
}

#[derive(Debug, Args)]
pub(crate) struct SweepArgs {
    #[command(flatten)]
    context: ContextArgs,

    /// User performing the sweep
    #[arg(long)]
    actor: UserUuid,
}

pub(crate) async fn delete(args: TrashArgs) -> Result<(), String> {
    let ctx = args.context.connect().await?;

    ctx.promotions
        .soft_delete(args.promotion, args.actor)
        .await
        .map_err(|error| format!("failed to delete promotion: {error}"))?;

    let promotion = ctx
        .promotions
        .get_promotion(args.promotion)
        .await
        .map_err(|error| format!("failed to load promotion: {error}"))?;

    output::resolved(&promotion);

    Ok(())
}

pub(crate) async fn restore(args: TrashArgs) -> Result<(), String> {
    let ctx = args.context.connect().await?;

    ctx.promotions
        .restore(args.promotion, args.actor)
        .await
        .map_err(|error| format!("failed to restore promotion: {error}"))?;

    let promotion = ctx
        .promotions
        .get_promotion(args.promotion)
        .await
        .map_err(|error| format!("failed to load promotion: {error}"))?;

    output::resolved(&promotion);

    Ok(())
}

pub(crate) async fn purge(args: TrashArgs) -> Result<(), String> {
    let ctx = args.context.connect().await?;

    ctx.promotions
        .purge(args.promotion, args.actor)
        .await
        .map_err(|error| format!("failed to purge promotion: {error}"))?;

    output::line("purged", args.promotion);

    Ok(())
}

pub(crate) async fn sweep(args: SweepArgs) -> Result<(), String> {
    let ctx = args.context.connect().await?;

    let purged = ctx
        .promotions
        .sweep_trash(args.actor)
        .await
        .map_err(|error| format!("failed to sweep trash: {error}"))?;

    output::line("purged_count", purged.len());

    for uuid in purged {
        output::line("purged", uuid);
    }

    Ok(())
}
