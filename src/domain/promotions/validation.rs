//! Promotion input validation.

use jiff::civil::Date;
use rustc_hash::FxHashSet;

use crate::domain::{
    catalog::records::ProductUuid,
    promotions::{
        ValidationError,
        data::{NewPromotion, PromotionUpdate},
    },
};

pub const MIN_NAME_LEN: usize = 3;
pub const MIN_DESCRIPTION_LEN: usize = 10;
pub const MIN_DISCOUNT_PERCENTAGE: u8 = 1;
pub const MAX_DISCOUNT_PERCENTAGE: u8 = 100;

/// Validate a promotion about to be created. On top of the update rules, a new
/// promotion may not start before `today` (and so cannot end before it either).
///
/// # Errors
///
/// Returns the first rule the input breaks.
pub fn validate_new(promotion: &NewPromotion, today: Date) -> Result<(), ValidationError> {
    validate_fields(
        &promotion.name,
        &promotion.description,
        promotion.discount_percentage,
        promotion.start_date,
        promotion.end_date,
        &promotion.product_uuids,
    )?;

    if promotion.start_date < today {
        return Err(ValidationError::StartInPast {
            start: promotion.start_date,
            today,
        });
    }

    Ok(())
}

/// Validate an edit to an existing promotion.
///
/// # Errors
///
/// Returns the first rule the input breaks.
pub fn validate_update(update: &PromotionUpdate) -> Result<(), ValidationError> {
    validate_fields(
        &update.name,
        &update.description,
        update.discount_percentage,
        update.start_date,
        update.end_date,
        &update.product_uuids,
    )
}

fn validate_fields(
    name: &str,
    description: &str,
    discount_percentage: u8,
    start_date: Date,
    end_date: Date,
    product_uuids: &[ProductUuid],
) -> Result<(), ValidationError> {
    if name.trim().chars().count() < MIN_NAME_LEN {
        return Err(ValidationError::NameTooShort { min: MIN_NAME_LEN });
    }

    if description.trim().chars().count() < MIN_DESCRIPTION_LEN {
        return Err(ValidationError::DescriptionTooShort {
            min: MIN_DESCRIPTION_LEN,
        });
    }

    if !(MIN_DISCOUNT_PERCENTAGE..=MAX_DISCOUNT_PERCENTAGE).contains(&discount_percentage) {
        return Err(ValidationError::DiscountOutOfRange(discount_percentage));
    }

    if end_date < start_date {
        return Err(ValidationError::EndBeforeStart {
            start: start_date,
            end: end_date,
        });
    }

    if product_uuids.is_empty() {
        return Err(ValidationError::NoProducts);
    }

    let mut seen = FxHashSet::default();

    if let Some(duplicate) = product_uuids.iter().find(|uuid| !seen.insert(**uuid)) {
        return Err(ValidationError::DuplicateProduct(*duplicate));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use crate::test::helpers::{new_promotion, today};

    use super::*;

    #[test]
    fn accepts_well_formed_promotion() -> TestResult {
        let today = today();

        validate_new(&new_promotion(today, today.tomorrow()?), today)?;

        Ok(())
    }

    #[test]
    fn rejects_end_before_start() -> TestResult {
        let today = today();
        let promotion = new_promotion(today.tomorrow()?, today);

        assert!(matches!(
            validate_new(&promotion, today),
            Err(ValidationError::EndBeforeStart { .. })
        ));

        Ok(())
    }

    #[test]
    fn rejects_discount_outside_range() {
        let today = today();

        for discount in [0, 101, 255] {
            let mut promotion = new_promotion(today, today);

            promotion.discount_percentage = discount;

            assert_eq!(
                validate_new(&promotion, today),
                Err(ValidationError::DiscountOutOfRange(discount))
            );
        }
    }

    #[test]
    fn accepts_discount_bounds() -> TestResult {
        let today = today();

        for discount in [1, 100] {
            let mut promotion = new_promotion(today, today);

            promotion.discount_percentage = discount;

            validate_new(&promotion, today)?;
        }

        Ok(())
    }

    #[test]
    fn rejects_empty_and_duplicate_products() {
        let today = today();
        let mut promotion = new_promotion(today, today);

        let first = promotion.product_uuids.first().copied().unwrap_or_default();

        promotion.product_uuids.push(first);

        assert_eq!(
            validate_new(&promotion, today),
            Err(ValidationError::DuplicateProduct(first))
        );

        promotion.product_uuids.clear();

        assert_eq!(validate_new(&promotion, today), Err(ValidationError::NoProducts));
    }

    #[test]
    fn rejects_short_text() {
        let today = today();
        let mut promotion = new_promotion(today, today);

        promotion.name = "  ab  ".to_string();

        assert_eq!(
            validate_new(&promotion, today),
            Err(ValidationError::NameTooShort { min: MIN_NAME_LEN })
        );

        promotion.name = "Summer sale".to_string();
        promotion.description = "too short".to_string();

        assert_eq!(
            validate_new(&promotion, today),
            Err(ValidationError::DescriptionTooShort {
                min: MIN_DESCRIPTION_LEN
            })
        );
    }

    #[test]
    fn new_promotions_cannot_start_in_the_past() -> TestResult {
        let today = today();
        let promotion = new_promotion(today.yesterday()?, today);

        assert!(matches!(
            validate_new(&promotion, today),
            Err(ValidationError::StartInPast { .. })
        ));

        Ok(())
    }

    #[test]
    fn updates_may_keep_past_dates() -> TestResult {
        let today = today();
        let promotion = new_promotion(today.yesterday()?.yesterday()?, today.yesterday()?);

        validate_update(&promotion.into())?;

        Ok(())
    }
}
