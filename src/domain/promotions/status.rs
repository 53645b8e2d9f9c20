//! Effective promotion status.
//!
//! Status is never stored. It is derived from the lifecycle flag, the date
//! range and the current day every time it is needed.

use std::fmt::{self, Display, Formatter};

use jiff::{Timestamp, civil::Date, tz::TimeZone};
use serde::Serialize;

use crate::domain::promotions::records::PromotionRecord;

/// Derived display bucket of a promotion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PromotionStatus {
    /// Live, and today is within `start_date..=end_date`.
    Active,

    /// Live, and `start_date` is still ahead.
    Scheduled,

    /// Live, and `end_date` has passed.
    Expired,

    /// Soft-deleted, whatever the dates say.
    Trash,
}

impl PromotionStatus {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Active => "ACTIVE",
            Self::Scheduled => "SCHEDULED",
            Self::Expired => "EXPIRED",
            Self::Trash => "TRASH",
        }
    }
}

impl Display for PromotionStatus {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Resolve a promotion's bucket for the calendar day `today`.
///
/// The deleted flag wins over any date comparison. Otherwise a promotion is
/// active from the first instant of `start_date` through the whole of
/// `end_date`.
#[must_use]
pub fn resolve_status(promotion: &PromotionRecord, today: Date) -> PromotionStatus {
    if promotion.is_deleted() {
        PromotionStatus::Trash
    } else if today < promotion.start_date {
        PromotionStatus::Scheduled
    } else if today > promotion.end_date {
        PromotionStatus::Expired
    } else {
        PromotionStatus::Active
    }
}

/// Resolves statuses against instants, truncating them to a calendar day in
/// a fixed time zone.
#[derive(Debug, Clone)]
pub struct StatusResolver {
    time_zone: TimeZone,
}

impl StatusResolver {
    #[must_use]
    pub const fn new(time_zone: TimeZone) -> Self {
        Self { time_zone }
    }

    #[must_use]
    pub const fn utc() -> Self {
        Self::new(TimeZone::UTC)
    }

    #[must_use]
    pub fn time_zone(&self) -> &TimeZone {
        &self.time_zone
    }

    /// The calendar day `now` falls on.
    #[must_use]
    pub fn today(&self, now: Timestamp) -> Date {
        now.to_zoned(self.time_zone.clone()).date()
    }

    #[must_use]
    pub fn resolve(&self, promotion: &PromotionRecord, now: Timestamp) -> PromotionStatus {
        resolve_status(promotion, self.today(now))
    }
}

impl Default for StatusResolver {
    fn default() -> Self {
        Self::utc()
    }
}

/// Listing filter. Every filter except [`StatusFilter::Trash`] hides deleted promotions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StatusFilter {
    #[default]
    All,
    Active,
    Scheduled,
    Expired,
    Trash,
}

impl StatusFilter {
    #[must_use]
    pub const fn matches(self, status: PromotionStatus) -> bool {
        match self {
            Self::All => !matches!(status, PromotionStatus::Trash),
            Self::Active => matches!(status, PromotionStatus::Active),
            Self::Scheduled => matches!(status, PromotionStatus::Scheduled),
            Self::Expired => matches!(status, PromotionStatus::Expired),
            Self::Trash => matches!(status, PromotionStatus::Trash),
        }
    }
}
