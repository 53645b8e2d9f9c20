//! Promotion-level performance figures folded from metric samples.

use jiff::Timestamp;
use rust_decimal::Decimal;
use serde::Serialize;

use crate::domain::{
    catalog::records::ProductUuid,
    metrics::records::{ProductMetricSample, round_money},
    promotions::records::PromotionUuid,
};

/// One product's line in a performance report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProductPerformance {
    pub product_uuid: ProductUuid,
    pub base_price: Decimal,
    pub discounted_price: Decimal,
    pub initial_inventory: u64,
    pub current_inventory: u64,
    pub units_sold: u64,
    pub revenue: Decimal,
    pub reduction_percentage: Option<Decimal>,
}

impl From<&ProductMetricSample> for ProductPerformance {
    fn from(sample: &ProductMetricSample) -> Self {
        Self {
            product_uuid: sample.product_uuid,
            base_price: sample.base_price,
            discounted_price: sample.discounted_price,
            initial_inventory: sample.initial_inventory,
            current_inventory: sample.current_inventory,
            units_sold: sample.units_sold(),
            revenue: sample.revenue(),
            reduction_percentage: sample.reduction_percentage(),
        }
    }
}

/// Snapshot of how a promotion is doing. Recomputed on every request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PromotionPerformance {
    pub promotion_uuid: PromotionUuid,
    pub total_revenue: Decimal,
    pub total_units_sold: u64,
    pub total_initial_inventory: u64,
    pub total_current_inventory: u64,
    pub inventory_reduction_percentage: Decimal,
    pub average_sku_variation_percentage: Option<Decimal>,
    pub last_updated: Timestamp,
    pub is_active: bool,
    pub products: Vec<ProductPerformance>,
}

/// Fold `samples` into a performance snapshot. Returns `None` when there are
/// no samples to fold.
///
/// Revenue is summed from unrounded per-product figures and rounded once.
/// Rows are ordered by product id so repeated calls over the same samples
/// yield identical output.
pub fn aggregate(
    promotion_uuid: PromotionUuid,
    samples: &[ProductMetricSample],
    is_active: bool,
) -> Option<PromotionPerformance> {
    let last_updated = samples.iter().map(|sample| sample.last_updated).max()?;

    let mut revenue = Decimal::ZERO;
    let mut units_sold: u64 = 0;
    let mut initial: u64 = 0;
    let mut current: u64 = 0;
    let mut percentages = Vec::with_capacity(samples.len());

    for sample in samples {
        revenue += sample.discounted_price * Decimal::from(sample.units_sold());
        units_sold = units_sold.saturating_add(sample.units_sold());
        initial = initial.saturating_add(sample.initial_inventory);
        current = current.saturating_add(sample.current_inventory);

        if let Some(percentage) = sample.reduction_percentage() {
            percentages.push(percentage);
        }
    }

    let inventory_reduction_percentage = if initial == 0 {
        Decimal::ZERO
    } else {
        Decimal::ONE_HUNDRED * Decimal::from(initial - current) / Decimal::from(initial)
    };

    let average_sku_variation_percentage = if percentages.is_empty() {
        None
    } else {
        let sum: Decimal = percentages.iter().sum();

        Some(sum / Decimal::from(percentages.len()))
    };

    let mut products: Vec<ProductPerformance> =
        samples.iter().map(ProductPerformance::from).collect();

    products.sort_by_key(|row| row.product_uuid);

    Some(PromotionPerformance {
        promotion_uuid,
        total_revenue: round_money(revenue),
        total_units_sold: units_sold,
        total_initial_inventory: initial,
        total_current_inventory: current,
        inventory_reduction_percentage,
        average_sku_variation_percentage,
        last_updated,
        is_active,
        products,
    })
}

#[cfg(test)]
mod tests {
    use jiff::SignedDuration;
    use rust_decimal_macros::dec;
    use testresult::TestResult;

    use crate::test::helpers::now;

    use super::*;

    fn sample(
        promotion: PromotionUuid,
        price: Decimal,
        initial: u64,
        current: u64,
    ) -> ProductMetricSample {
        let mut sample =
            ProductMetricSample::new(promotion, ProductUuid::new(), price, 20, initial, now());

        sample.current_inventory = current;
        sample
    }

    #[test]
    fn no_samples_is_none() {
        assert_eq!(aggregate(PromotionUuid::new(), &[], true), None);
    }

    #[test]
    fn totals_and_percentages() -> TestResult {
        let promotion = PromotionUuid::new();
        let samples = [
            sample(promotion, dec!(10.00), 100, 70),
            sample(promotion, dec!(5.00), 50, 50),
        ];

        let performance = aggregate(promotion, &samples, true).ok_or("expected performance")?;

        assert_eq!(performance.total_units_sold, 30);
        assert_eq!(performance.total_initial_inventory, 150);
        assert_eq!(performance.total_current_inventory, 120);
        assert_eq!(performance.inventory_reduction_percentage, dec!(20));
        assert_eq!(performance.total_revenue, dec!(240.00));
        assert_eq!(performance.average_sku_variation_percentage, Some(dec!(15)));
        assert!(performance.is_active, "is_active should pass through");
        assert_eq!(performance.products.len(), 2);

        Ok(())
    }

    #[test]
    fn zero_initial_inventory_is_excluded_from_average() -> TestResult {
        let promotion = PromotionUuid::new();
        let samples = [
            sample(promotion, dec!(10.00), 0, 0),
            sample(promotion, dec!(10.00), 10, 5),
        ];

        let performance = aggregate(promotion, &samples, false).ok_or("expected performance")?;

        assert_eq!(performance.average_sku_variation_percentage, Some(dec!(50)));

        let empty = [sample(promotion, dec!(10.00), 0, 0)];
        let performance = aggregate(promotion, &empty, false).ok_or("expected performance")?;

        assert_eq!(performance.inventory_reduction_percentage, Decimal::ZERO);
        assert_eq!(performance.average_sku_variation_percentage, None);

        Ok(())
    }

    #[test]
    fn last_updated_is_latest_sample() -> TestResult {
        let promotion = PromotionUuid::new();
        let mut later = sample(promotion, dec!(1.00), 10, 10);

        later.last_updated = now().checked_add(SignedDuration::from_mins(5))?;

        let samples = [sample(promotion, dec!(1.00), 10, 10), later.clone()];
        let performance = aggregate(promotion, &samples, true).ok_or("expected performance")?;

        assert_eq!(performance.last_updated, later.last_updated);

        Ok(())
    }

    #[test]
    fn repeated_aggregation_is_identical() {
        let promotion = PromotionUuid::new();
        let samples = [
            sample(promotion, dec!(3.33), 9, 2),
            sample(promotion, dec!(7.49), 4, 1),
        ];

        let mut reversed = samples.clone();

        reversed.reverse();

        assert_eq!(
            aggregate(promotion, &samples, true),
            aggregate(promotion, &reversed, true)
        );
    }
}
