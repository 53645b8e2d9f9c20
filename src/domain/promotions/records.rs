//! Promotions Records

use jiff::{Timestamp, civil::Date};
use serde::Serialize;

use crate::{
    domain::{
        catalog::records::{CategoryUuid, ProductUuid},
        users::UserUuid,
    },
    uuids::TypedUuid,
};

/// Promotion UUID
pub type PromotionUuid = TypedUuid<PromotionRecord>;

/// Stored lifecycle flag, independent of the promotion's dates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LifecycleFlag {
    Live,
    Deleted,
}

/// Lifecycle state. The deletion stamp exists exactly when the promotion is deleted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "flag", rename_all = "snake_case")]
pub enum Lifecycle {
    Live,
    Deleted {
        deleted_at: Timestamp,
        deleted_by: UserUuid,
    },
}

impl Lifecycle {
    #[must_use]
    pub const fn flag(&self) -> LifecycleFlag {
        match self {
            Self::Live => LifecycleFlag::Live,
            Self::Deleted { .. } => LifecycleFlag::Deleted,
        }
    }
}

/// Promotion Record
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PromotionRecord {
    pub uuid: PromotionUuid,
    pub name: String,
    pub description: String,
    pub start_date: Date,
    pub end_date: Date,
    pub discount_percentage: u8,
    pub category_uuid: CategoryUuid,
    pub product_uuids: Vec<ProductUuid>,
    pub lifecycle: Lifecycle,
    pub created_by: UserUuid,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl PromotionRecord {
    #[must_use]
    pub const fn lifecycle_flag(&self) -> LifecycleFlag {
        self.lifecycle.flag()
    }

    #[must_use]
    pub const fn is_deleted(&self) -> bool {
        matches!(self.lifecycle, Lifecycle::Deleted { .. })
    }

    #[must_use]
    pub const fn deleted_at(&self) -> Option<Timestamp> {
        match self.lifecycle {
            Lifecycle::Deleted { deleted_at, .. } => Some(deleted_at),
            Lifecycle::Live => None,
        }
    }

    #[must_use]
    pub const fn deleted_by(&self) -> Option<UserUuid> {
        match self.lifecycle {
            Lifecycle::Deleted { deleted_by, .. } => Some(deleted_by),
            Lifecycle::Live => None,
        }
    }
}
