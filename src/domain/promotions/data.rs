//! Promotions Data

use jiff::civil::Date;

use crate::domain::{
    catalog::records::{CategoryUuid, ProductUuid},
    promotions::records::PromotionUuid,
};

/// New Promotion Data
#[derive(Debug, Clone, PartialEq)]
pub struct NewPromotion {
    pub uuid: PromotionUuid,
    pub name: String,
    pub description: String,
    pub start_date: Date,
    pub end_date: Date,
    pub discount_percentage: u8,
    pub category_uuid: CategoryUuid,
    pub product_uuids: Vec<ProductUuid>,
}

/// Promotion Update Data
#[derive(Debug, Clone, PartialEq)]
pub struct PromotionUpdate {
    pub name: String,
    pub description: String,
    pub start_date: Date,
    pub end_date: Date,
    pub discount_percentage: u8,
    pub category_uuid: CategoryUuid,
    pub product_uuids: Vec<ProductUuid>,
}

impl From<NewPromotion> for PromotionUpdate {
    fn from(promotion: NewPromotion) -> Self {
        Self {
            name: promotion.name,
            description: promotion.description,
            start_date: promotion.start_date,
            end_date: promotion.end_date,
            discount_percentage: promotion.discount_percentage,
            category_uuid: promotion.category_uuid,
            product_uuids: promotion.product_uuids,
        }
    }
}
