//! Trash lifecycle.
//!
//! `LIVE -> DELETED` by soft delete, `DELETED -> LIVE` by restore, and
//! `DELETED -> (gone)` by purge. Purging a live promotion is never allowed.

use jiff::{SignedDuration, Timestamp};

use crate::domain::{
    promotions::{
        LifecycleError,
        records::{Lifecycle, PromotionRecord},
    },
    users::UserUuid,
};

const SECONDS_PER_DAY: i64 = 86_400;

/// How long a deleted promotion stays restorable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetentionPolicy {
    days: u32,
}

impl RetentionPolicy {
    pub const DEFAULT_DAYS: u32 = 30;

    #[must_use]
    pub const fn new(days: u32) -> Self {
        Self { days }
    }

    #[must_use]
    pub const fn days(self) -> u32 {
        self.days
    }
}

impl Default for RetentionPolicy {
    fn default() -> Self {
        Self::new(Self::DEFAULT_DAYS)
    }
}

/// Move a live promotion to the trash.
///
/// # Errors
///
/// Returns [`LifecycleError::AlreadyDeleted`] if it is already in the trash.
pub fn soft_delete(
    promotion: &mut PromotionRecord,
    actor: UserUuid,
    now: Timestamp,
) -> Result<(), LifecycleError> {
    if promotion.is_deleted() {
        return Err(LifecycleError::AlreadyDeleted);
    }

    promotion.lifecycle = Lifecycle::Deleted {
        deleted_at: now,
        deleted_by: actor,
    };
    promotion.updated_at = now;

    Ok(())
}

/// Bring a promotion back from the trash. Dates are left alone, so it lands in
/// whatever bucket they imply today.
///
/// # Errors
///
/// Returns [`LifecycleError::NotDeleted`] if it is not in the trash.
pub fn restore(promotion: &mut PromotionRecord, now: Timestamp) -> Result<(), LifecycleError> {
    if !promotion.is_deleted() {
        return Err(LifecycleError::NotDeleted);
    }

    promotion.lifecycle = Lifecycle::Live;
    promotion.updated_at = now;

    Ok(())
}

/// Check a promotion may be permanently removed.
///
/// # Errors
///
/// Returns [`LifecycleError::PurgeWhileLive`] unless it is in the trash.
pub const fn ensure_purgeable(promotion: &PromotionRecord) -> Result<(), LifecycleError> {
    if promotion.is_deleted() {
        Ok(())
    } else {
        Err(LifecycleError::PurgeWhileLive)
    }
}

/// Whole 24-hour periods from `from` to `to`, floored. Zero if `to` precedes `from`.
#[must_use]
pub fn whole_days_between(from: Timestamp, to: Timestamp) -> i64 {
    let elapsed: SignedDuration = to.duration_since(from);

    (elapsed.as_secs() / SECONDS_PER_DAY).max(0)
}

/// Days left before a deleted promotion becomes eligible for purge, or `None`
/// when the promotion is live.
#[must_use]
pub fn days_until_purge(
    promotion: &PromotionRecord,
    now: Timestamp,
    policy: RetentionPolicy,
) -> Option<u32> {
    let deleted_at = promotion.deleted_at()?;
    let remaining = i64::from(policy.days()) - whole_days_between(deleted_at, now);

    Some(u32::try_from(remaining.max(0)).unwrap_or(0))
}

/// Whether the retention window of a deleted promotion has run out.
#[must_use]
pub fn is_purge_due(promotion: &PromotionRecord, now: Timestamp, policy: RetentionPolicy) -> bool {
    days_until_purge(promotion, now, policy) == Some(0)
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use crate::{
        domain::promotions::records::LifecycleFlag,
        test::helpers::{promotion_between, today},
    };

    use super::*;

    fn deleted_at(now: Timestamp) -> PromotionRecord {
        let today = today();
        let mut promotion = promotion_between(today, today);
        let actor = promotion.created_by;

        promotion.lifecycle = Lifecycle::Deleted {
            deleted_at: now,
            deleted_by: actor,
        };

        promotion
    }

    #[test]
    fn soft_delete_stamps_actor_and_time() -> TestResult {
        let today = today();
        let mut promotion = promotion_between(today, today);
        let actor = UserUuid::new();
        let now: Timestamp = "2025-01-10T08:00:00Z".parse()?;

        soft_delete(&mut promotion, actor, now)?;

        assert_eq!(promotion.lifecycle_flag(), LifecycleFlag::Deleted);
        assert_eq!(promotion.deleted_at(), Some(now));
        assert_eq!(promotion.deleted_by(), Some(actor));

        Ok(())
    }

    #[test]
    fn soft_delete_twice_is_rejected() -> TestResult {
        let now: Timestamp = "2025-01-10T08:00:00Z".parse()?;
        let mut promotion = deleted_at(now);
        let before = promotion.clone();

        let result = soft_delete(&mut promotion, UserUuid::new(), now);

        assert_eq!(result, Err(LifecycleError::AlreadyDeleted));
        assert_eq!(promotion, before, "failed delete must not touch the record");

        Ok(())
    }

    #[test]
    fn restore_round_trips_everything_but_the_stamp() -> TestResult {
        let today = today();
        let original = promotion_between(today, today.tomorrow()?);
        let mut promotion = original.clone();
        let now: Timestamp = "2025-01-10T08:00:00Z".parse()?;

        soft_delete(&mut promotion, UserUuid::new(), now)?;
        restore(&mut promotion, now)?;

        assert_eq!(promotion.lifecycle, Lifecycle::Live);
        assert_eq!(promotion.deleted_at(), None);
        assert_eq!(promotion.deleted_by(), None);
        assert_eq!(promotion.start_date, original.start_date);
        assert_eq!(promotion.end_date, original.end_date);
        assert_eq!(promotion.product_uuids, original.product_uuids);

        Ok(())
    }

    #[test]
    fn restore_live_is_rejected() {
        let today = today();
        let mut promotion = promotion_between(today, today);

        assert_eq!(
            restore(&mut promotion, Timestamp::UNIX_EPOCH),
            Err(LifecycleError::NotDeleted)
        );
    }

    #[test]
    fn purge_requires_trash() -> TestResult {
        let today = today();
        let live = promotion_between(today, today);

        assert_eq!(ensure_purgeable(&live), Err(LifecycleError::PurgeWhileLive));
        assert_eq!(ensure_purgeable(&deleted_at("2025-01-10T08:00:00Z".parse()?)), Ok(()));

        Ok(())
    }

    #[test]
    fn days_until_purge_counts_down_to_zero() -> TestResult {
        let deleted: Timestamp = "2025-01-10T08:00:00Z".parse()?;
        let promotion = deleted_at(deleted);
        let policy = RetentionPolicy::default();

        assert_eq!(days_until_purge(&promotion, deleted, policy), Some(30));

        let almost = deleted.checked_add(SignedDuration::from_hours(30 * 24 - 1))?;

        assert_eq!(days_until_purge(&promotion, almost, policy), Some(1));

        let exactly = deleted.checked_add(SignedDuration::from_hours(30 * 24))?;

        assert_eq!(days_until_purge(&promotion, exactly, policy), Some(0));
        assert!(is_purge_due(&promotion, exactly, policy));

        let long_after = deleted.checked_add(SignedDuration::from_hours(400 * 24))?;

        assert_eq!(days_until_purge(&promotion, long_after, policy), Some(0));

        Ok(())
    }

    #[test]
    fn days_until_purge_never_increases() -> TestResult {
        let deleted: Timestamp = "2025-01-10T08:00:00Z".parse()?;
        let promotion = deleted_at(deleted);
        let policy = RetentionPolicy::new(7);

        let mut previous = u32::MAX;

        for hour in 0..(10 * 24) {
            let now = deleted.checked_add(SignedDuration::from_hours(hour))?;
            let days = days_until_purge(&promotion, now, policy).unwrap_or(u32::MAX);

            assert!(days <= previous, "countdown increased at hour {hour}");

            previous = days;
        }

        Ok(())
    }

    #[test]
    fn days_until_purge_is_none_for_live() {
        let today = today();
        let promotion = promotion_between(today, today);

        assert_eq!(
            days_until_purge(&promotion, Timestamp::UNIX_EPOCH, RetentionPolicy::default()),
            None
        );
    }

    #[test]
    fn clock_skew_does_not_extend_retention() -> TestResult {
        let deleted: Timestamp = "2025-01-10T08:00:00Z".parse()?;
        let promotion = deleted_at(deleted);
        let earlier = deleted.checked_sub(SignedDuration::from_hours(48))?;

        assert_eq!(
            days_until_purge(&promotion, earlier, RetentionPolicy::default()),
            Some(30)
        );

        Ok(())
    }
}
