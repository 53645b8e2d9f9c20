//! Test Helpers

use jiff::{
    Timestamp,
    civil::{Date, date},
};

use crate::domain::{
    catalog::records::{CategoryUuid, ProductUuid},
    promotions::{
        data::NewPromotion,
        records::{Lifecycle, PromotionRecord, PromotionUuid},
    },
    users::UserUuid,
};

/// 2025-06-15T12:00:00Z
pub(crate) const fn now() -> Timestamp {
    Timestamp::constant(1_749_988_800, 0)
}

/// The calendar day of [`now`] in UTC.
pub(crate) const fn today() -> Date {
    date(2025, 6, 15)
}

/// A live promotion over `start..=end` with two products, created at [`now`].
pub(crate) fn promotion_between(start: Date, end: Date) -> PromotionRecord {
    PromotionRecord {
        uuid: PromotionUuid::new(),
        name: "Summer sale".to_string(),
        description: "Twenty percent off selected lines".to_string(),
        start_date: start,
        end_date: end,
        discount_percentage: 20,
        category_uuid: CategoryUuid::new(),
        product_uuids: vec![ProductUuid::new(), ProductUuid::new()],
        lifecycle: Lifecycle::Live,
        created_by: UserUuid::new(),
        created_at: now(),
        updated_at: now(),
    }
}

/// Valid creation input over `start..=end`.
pub(crate) fn new_promotion(start: Date, end: Date) -> NewPromotion {
    NewPromotion {
        uuid: PromotionUuid::new(),
        name: "Summer sale".to_string(),
        description: "Twenty percent off selected lines".to_string(),
        start_date: start,
        end_date: end,
        discount_percentage: 20,
        category_uuid: CategoryUuid::new(),
        product_uuids: vec![ProductUuid::new(), ProductUuid::new()],
    }
}
