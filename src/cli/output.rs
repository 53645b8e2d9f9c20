//! Plain `key: value` command output.

#![expect(clippy::print_stdout, reason = "command output goes to stdout")]

use std::fmt::Display;

use lattice_campaigns::domain::{
    metrics::{aggregator::PromotionPerformance, records::ProductMetricSample},
    promotions::{ResolvedPromotion, records::PromotionRecord},
};

pub(crate) fn line(key: &str, value: impl Display) {
    println!("{key}: {value}");
}

pub(crate) fn blank() {
    println!();
}

fn or_none<T: Display>(value: Option<T>) -> String {
    value.map_or_else(|| "none".to_string(), |value| value.to_string())
}

pub(crate) fn promotion(promotion: &PromotionRecord) {
    line("promotion_uuid", promotion.uuid);
    line("name", &promotion.name);
    line("start_date", promotion.start_date);
    line("end_date", promotion.end_date);
    line("discount_percentage", promotion.discount_percentage);
    line("products", promotion.product_uuids.len());
    line("deleted_at", or_none(promotion.deleted_at()));
    line("deleted_by", or_none(promotion.deleted_by()));
}

pub(crate) fn resolved(resolved: &ResolvedPromotion) {
    promotion(&resolved.promotion);
    line("status", resolved.status);
    line("days_until_purge", or_none(resolved.days_until_purge));
}

pub(crate) fn sample(sample: &ProductMetricSample) {
    line("product_uuid", sample.product_uuid);
    line("base_price", sample.base_price);
    line("discounted_price", sample.discounted_price);
    line("initial_inventory", sample.initial_inventory);
}

pub(crate) fn performance(performance: &PromotionPerformance) {
    line("promotion_uuid", performance.promotion_uuid);
    line("active", performance.is_active);
    line("total_revenue", performance.total_revenue);
    line("total_units_sold", performance.total_units_sold);
    line("total_initial_inventory", performance.total_initial_inventory);
    line("total_current_inventory", performance.total_current_inventory);
    line(
        "inventory_reduction_percentage",
        performance.inventory_reduction_percentage.round_dp(2),
    );
    line(
        "average_sku_variation_percentage",
        or_none(
            performance
                .average_sku_variation_percentage
                .map(|value| value.round_dp(2)),
        ),
    );
    line("last_updated", performance.last_updated);

    for product in &performance.products {
        blank();
        line("product_uuid", product.product_uuid);
        line("units_sold", product.units_sold);
        line("current_inventory", product.current_inventory);
        line("revenue", product.revenue);
        line(
            "reduction_percentage",
            or_none(product.reduction_percentage.map(|value| value.round_dp(2))),
        );
    }
}
