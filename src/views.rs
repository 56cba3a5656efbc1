//! Assembled, nested view types for API output.
//!
//! Views are read-only recombinations of the flat records in
//! [`models`](crate::models), shaped to match the JSON the HTTP layer
//! serves. Optional presence is modeled with `Option` — a menu item with no
//! resolvable modifier groups omits the field entirely, which is distinct
//! from an empty list.

use serde::Serialize;

use crate::models::{Merchant, ModifierItem};

/// Rich-text wrapper; only the plain rendering is carried today.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RichText {
    pub plain: String,
}

/// Integer minor-unit amount plus ISO currency code.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Price {
    pub amount: i64,
    pub currency: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MerchantView {
    pub id: String,
    pub name: String,
    pub description: RichText,
    pub url: String,
    pub category: String,
    pub tags: Vec<String>,
}

impl From<&Merchant> for MerchantView {
    fn from(merchant: &Merchant) -> Self {
        // Malformed tag JSON degrades to no tags rather than failing the view.
        let tags: Vec<String> = serde_json::from_str(&merchant.tags_json).unwrap_or_default();
        Self {
            id: merchant.id.clone(),
            name: merchant.name.clone(),
            description: RichText {
                plain: merchant.description_plain.clone(),
            },
            url: merchant.url.clone(),
            category: merchant.category.clone(),
            tags,
        }
    }
}

/// An option within a modifier group; carries only the modifier item's id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ModifierOptionView {
    pub item_id: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ModifierGroupView {
    pub id: String,
    pub name: String,
    pub minimum_selections: i64,
    pub maximum_selections: i64,
    /// Always present, possibly empty.
    pub modifier_options: Vec<ModifierOptionView>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MenuItemView {
    pub id: String,
    pub name: String,
    pub description: RichText,
    pub price: Price,
    /// Present only when at least one linked group resolved to a record.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub modifier_groups: Option<Vec<ModifierGroupView>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryView {
    pub id: String,
    pub name: String,
    pub items: Vec<MenuItemView>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ModifierItemView {
    pub id: String,
    pub title: String,
    pub price: Price,
}

impl From<&ModifierItem> for ModifierItemView {
    fn from(modifier_item: &ModifierItem) -> Self {
        Self {
            id: modifier_item.id.clone(),
            title: modifier_item.title.clone(),
            price: Price {
                amount: modifier_item.price_amount,
                currency: modifier_item.price_currency.clone(),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_merchant_view_parses_tags() {
        let merchant = Merchant {
            id: "m1".to_string(),
            name: "Bistro Seven".to_string(),
            description_plain: "Neighborhood bistro".to_string(),
            url: "https://bistro.example".to_string(),
            category: "restaurant".to_string(),
            tags_json: r#"["bistro","dinner"]"#.to_string(),
        };
        let view = MerchantView::from(&merchant);
        assert_eq!(view.tags, vec!["bistro", "dinner"]);
    }

    #[test]
    fn test_merchant_view_tolerates_bad_tags() {
        let merchant = Merchant {
            id: "m2".to_string(),
            name: "Deli".to_string(),
            description_plain: String::new(),
            url: String::new(),
            category: String::new(),
            tags_json: "not json".to_string(),
        };
        let view = MerchantView::from(&merchant);
        assert!(view.tags.is_empty());
    }

    #[test]
    fn test_item_view_omits_absent_modifier_groups() {
        let view = MenuItemView {
            id: "i1".to_string(),
            name: "Classic Burger".to_string(),
            description: RichText {
                plain: String::new(),
            },
            price: Price {
                amount: 1250,
                currency: "USD".to_string(),
            },
            modifier_groups: None,
        };
        let json = serde_json::to_value(&view).unwrap();
        assert!(json.get("modifier_groups").is_none());
    }
}
