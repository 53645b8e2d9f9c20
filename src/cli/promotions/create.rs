use clap::Args;
use jiff::civil::Date;
use lattice_campaigns::domain::{
    catalog::records::{CategoryUuid, ProductUuid},
    promotions::{data::NewPromotion, records::PromotionUuid},
    users::UserUuid,
};

use crate::cli::{ContextArgs, output};

#[derive(Debug, Args)]
pub(crate) struct CreatePromotionArgs {
    #[command(flatten)]
    context: ContextArgs,

    /// Display name
    #[arg(long)]
    name: String,

    /// Customer-facing description
    #[arg(long)]
    description: String,

    /// First day of the promotion (YYYY-MM-DD)
    #[arg(long)]
    start: Date,

    /// Last day of the promotion (YYYY-MM-DD)
    #[arg(long)]
    end: Date,

    /// Whole-number discount, 1 to 100
    #[arg(long)]
    discount: u8,

    /// Category the promotion belongs to
    #[arg(long)]
    category: CategoryUuid,

    /// Product to discount; repeat for each product
    #[arg(long = "product", required = true)]
    products: Vec<ProductUuid>,

    /// User creating the promotion
    #[arg(long)]
    actor: UserUuid,

    /// Optional promotion UUID; generated when omitted
    #[arg(long)]
    promotion_uuid: Option<PromotionUuid>,
}

pub(crate) async fn run(args: CreatePromotionArgs) -> Result<(), String> {
    let ctx = args.context.connect().await?;

    let promotion = ctx
        .promotions
        .create_promotion(
            NewPromotion {
                uuid: args.promotion_uuid.unwrap_or_else(PromotionUuid::new),
                name: args.name,
                description: args.description,
                start_date: args.start,
                end_date: args.end,
                discount_percentage: args.discount,
                category_uuid: args.category,
                product_uuids: args.products,
            },
            args.actor,
        )
        .await
        .map_err(|error| format!("failed to create promotion: {error}"))?;

    output::promotion(&promotion);

    Ok(())
}
