//! Flat relation records as stored in SQLite.
//!
//! These are the raw catalog relations before assembly: entities plus the
//! join tables linking them. Identifiers are opaque strings, unique within
//! their own entity type. Prices are integer minor units with a currency
//! code.

use sqlx::FromRow;

/// A merchant in the discovery catalog. Leaf entity, no relationships.
#[derive(Debug, Clone, FromRow)]
pub struct Merchant {
    pub id: String,
    pub name: String,
    pub description_plain: String,
    pub url: String,
    pub category: String,
    /// JSON array of tag strings, stored verbatim from the source data.
    pub tags_json: String,
}

/// A menu category. Items are attached via [`CategoryItemLink`].
#[derive(Debug, Clone, FromRow)]
pub struct MenuCategory {
    pub id: String,
    pub name: String,
}

#[derive(Debug, Clone, FromRow)]
pub struct MenuItem {
    pub id: String,
    pub name: String,
    pub description_plain: String,
    pub price_amount: i64,
    pub price_currency: String,
}

/// Join row: category ↔ item. Duplicate rows and rows pointing at missing
/// targets are legal; assembly decides what survives.
#[derive(Debug, Clone, FromRow)]
pub struct CategoryItemLink {
    pub category_id: String,
    pub item_id: String,
}

#[derive(Debug, Clone, FromRow)]
pub struct ModifierGroup {
    pub id: String,
    pub name: String,
    pub minimum_selections: i64,
    pub maximum_selections: i64,
}

/// A selectable modifier, referenced from [`ModifierOption`] rows by id.
#[derive(Debug, Clone, FromRow)]
pub struct ModifierItem {
    pub id: String,
    pub title: String,
    pub price_amount: i64,
    pub price_currency: String,
}

/// Join row: item ↔ modifier group.
#[derive(Debug, Clone, FromRow)]
pub struct ItemModifierGroupLink {
    pub item_id: String,
    pub modifier_group_id: String,
}

/// Join row: modifier group ↔ modifier item. The option carries only the
/// modifier item's id; clients fetch modifier item detail separately.
#[derive(Debug, Clone, FromRow)]
pub struct ModifierOption {
    pub modifier_group_id: String,
    pub item_id: String,
}
