use clap::{Args, ValueEnum};
use lattice_campaigns::domain::promotions::status::StatusFilter;

use crate::cli::{ContextArgs, output};

#[derive(Debug, Clone, Copy, Default, ValueEnum)]
enum StatusArg {
    #[default]
    All,
    Active,
    Scheduled,
    Expired,
    Trash,
}

impl From<StatusArg> for StatusFilter {
    fn from(status: StatusArg) -> Self {
        match status {
            StatusArg::All => Self::All,
            StatusArg::Active => Self::Active,
            StatusArg::Scheduled => Self::Scheduled,
            StatusArg::Expired => Self::Expired,
            StatusArg::Trash => Self::Trash,
        }
    }
}

#[derive(Debug, Args)]
pub(crate) struct ListPromotionsArgs {
    #[command(flatten)]
    context: ContextArgs,

    /// Which bucket to list; `all` leaves out the trash
    #[arg(long, value_enum, default_value_t = StatusArg::All)]
    status: StatusArg,
}

pub(crate) async fn run(args: ListPromotionsArgs) -> Result<(), String> {
    let ctx = args.context.connect().await?;

    let promotions = ctx
        .promotions
        .list_promotions(args.status.into())
        .await
        .map_err(|error| format!("failed to list promotions: {error}"))?;

    if promotions.is_empty() {
        output::line("promotions", 0);
        return Ok(());
    }

    for promotion in &promotions {
        output::resolved(promotion);
        output::blank();
    }

    Ok(())
}
