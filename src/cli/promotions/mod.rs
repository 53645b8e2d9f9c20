use clap::{Args, Subcommand};

mod create;
mod list;
mod show;
mod trash;

#[derive(Debug, Args)]
pub(crate) struct PromotionsCommand {
    #[command(subcommand)]
    command: PromotionsSubcommand,
}

#[derive(Debug, Subcommand)]
enum PromotionsSubcommand {
    /// List promotions by status
    List(list::ListPromotionsArgs),

    /// Show one promotion and its status
    Show(show::ShowPromotionArgs),

    /// Create a promotion
    Create(create::CreatePromotionArgs),

    /// Move a promotion to the trash
    Delete(trash::TrashArgs),

    /// Bring a promotion back from the trash
    Restore(trash::TrashArgs),

    /// Permanently remove a promotion from the trash
    Purge(trash::TrashArgs),

    /// Purge every trashed promotion past its retention window
    Sweep(trash::SweepArgs),
}

pub(crate) async fn run(command: PromotionsCommand) -> Result<(), String> {
    match command.command {
        PromotionsSubcommand::List(args) => list::run(args).await,
        PromotionsSubcommand::Show(args) => show::run(args).await,
        PromotionsSubcommand::Create(args) => create::run(args).await,
        PromotionsSubcommand::Delete(args) => trash::delete(args).await,
        PromotionsSubcommand::Restore(args) => trash::restore(args).await,
        PromotionsSubcommand::Purge(args) => trash::purge(args).await,
        PromotionsSubcommand::Sweep(args) => trash::sweep(args).await,
    }
}
