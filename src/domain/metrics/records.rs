//! Metric sample records

use jiff::Timestamp;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::Serialize;

use crate::{
    domain::{catalog::records::ProductUuid, promotions::records::PromotionUuid},
    uuids::TypedUuid,
};

/// Sample UUID
pub type SampleUuid = TypedUuid<ProductMetricSample>;

/// Money and percentages are reported to two places, halves away from zero.
pub(crate) fn round_money(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// Price after applying a whole-number percentage discount.
pub fn discounted_price(base_price: Decimal, discount_percentage: u8) -> Decimal {
    let remaining = Decimal::ONE_HUNDRED - Decimal::from(discount_percentage);

    round_money(base_price * remaining / Decimal::ONE_HUNDRED)
}

/// Inventory and sales snapshot for one product within one promotion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProductMetricSample {
    pub uuid: SampleUuid,
    pub promotion_uuid: PromotionUuid,
    pub product_uuid: ProductUuid,
    pub base_price: Decimal,
    pub discounted_price: Decimal,
    pub initial_inventory: u64,
    pub current_inventory: u64,
    pub last_updated: Timestamp,
}

impl ProductMetricSample {
    /// Baseline sample: nothing sold yet, current stock equals initial stock.
    #[must_use]
    pub fn new(
        promotion_uuid: PromotionUuid,
        product_uuid: ProductUuid,
        base_price: Decimal,
        discount_percentage: u8,
        stock: u64,
        now: Timestamp,
    ) -> Self {
        Self {
            uuid: SampleUuid::new(),
            promotion_uuid,
            product_uuid,
            base_price,
            discounted_price: discounted_price(base_price, discount_percentage),
            initial_inventory: stock,
            current_inventory: stock,
            last_updated: now,
        }
    }

    pub const fn units_sold(&self) -> u64 {
        self.initial_inventory.saturating_sub(self.current_inventory)
    }

    pub const fn has_stock(&self) -> bool {
        self.current_inventory > 0
    }

    /// Revenue at the discounted price, rounded.
    pub fn revenue(&self) -> Decimal {
        round_money(self.discounted_price * Decimal::from(self.units_sold()))
    }

    /// Share of the initial inventory sold, `None` when there was none to sell.
    pub fn reduction_percentage(&self) -> Option<Decimal> {
        if self.initial_inventory == 0 {
            return None;
        }

        Some(
            Decimal::ONE_HUNDRED * Decimal::from(self.units_sold())
                / Decimal::from(self.initial_inventory),
        )
    }

    /// Take `units` off the remaining stock. Returns `false` and leaves the
    /// sample untouched when `units` is zero or more than is left.
    pub fn record_sale(&mut self, units: u64, now: Timestamp) -> bool {
        if units == 0 || units > self.current_inventory {
            return false;
        }

        self.current_inventory -= units;
        self.last_updated = now;

        true
    }
}

#[cfg(test)]
mod tests {
    use rust_decimal_macros::dec;

    use crate::test::helpers::now;

    use super::*;

    fn sample(price: Decimal, discount: u8, stock: u64) -> ProductMetricSample {
        ProductMetricSample::new(
            PromotionUuid::new(),
            ProductUuid::new(),
            price,
            discount,
            stock,
            now(),
        )
    }

    #[test]
    fn discounted_price_rounds_half_away_from_zero() {
        assert_eq!(discounted_price(dec!(10.00), 20), dec!(8.00));
        assert_eq!(discounted_price(dec!(0.05), 50), dec!(0.03));
        assert_eq!(discounted_price(dec!(19.99), 100), dec!(0.00));
        assert_eq!(discounted_price(dec!(19.99), 1), dec!(19.79));
    }

    #[test]
    fn record_sale_accumulates() {
        let mut sample = sample(dec!(10.00), 20, 100);

        assert!(sample.record_sale(30, now()), "sale within stock");
        assert!(sample.record_sale(20, now()), "second sale within stock");

        assert_eq!(sample.current_inventory, 50);
        assert_eq!(sample.units_sold(), 50);
        assert_eq!(sample.revenue(), dec!(400.00));
        assert_eq!(sample.reduction_percentage(), Some(dec!(50)));
    }

    #[test]
    fn record_sale_rejects_zero_and_oversell() {
        let mut sample = sample(dec!(10.00), 20, 5);
        let before = sample.clone();

        assert!(!sample.record_sale(0, now()), "zero units accepted");
        assert!(!sample.record_sale(6, now()), "oversell accepted");
        assert_eq!(sample, before);

        assert!(sample.record_sale(5, now()), "selling out exactly");
        assert!(!sample.has_stock(), "stock should be exhausted");
    }

    #[test]
    fn empty_inventory_has_no_reduction() {
        let sample = sample(dec!(10.00), 20, 0);

        assert_eq!(sample.reduction_percentage(), None);
        assert_eq!(sample.revenue(), Decimal::ZERO);
    }
}
