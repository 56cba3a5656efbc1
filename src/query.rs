//! Free-text filtering over assembled catalog views.
//!
//! Matching is case-insensitive substring containment against the name
//! field of the target entity only — descriptions, ids, and nested
//! modifier data are never consulted. The empty query matches everything.
//! Both filters are pure: no state survives between calls.

use anyhow::Result;

use crate::assemble;
use crate::config::Config;
use crate::db;
use crate::models::Merchant;
use crate::store;
use crate::views::{CategoryView, MenuItemView, MerchantView};

/// Filter merchants by name, preserving storage order.
pub fn search_merchants(merchants: &[Merchant], query: &str) -> Vec<MerchantView> {
    let needle = query.to_lowercase();
    merchants
        .iter()
        .filter(|merchant| merchant.name.to_lowercase().contains(&needle))
        .map(MerchantView::from)
        .collect()
}

/// Filter an assembled category list by item name. Categories keep only
/// matching items; a category left with no items is dropped entirely.
/// Nested modifier data of surviving items passes through untouched.
pub fn search_menu(categories: Vec<CategoryView>, query: &str) -> Vec<CategoryView> {
    let needle = query.to_lowercase();
    categories
        .into_iter()
        .filter_map(|category| {
            let CategoryView { id, name, items } = category;
            let items: Vec<MenuItemView> = items
                .into_iter()
                .filter(|item| item.name.to_lowercase().contains(&needle))
                .collect();
            if items.is_empty() {
                None
            } else {
                Some(CategoryView { id, name, items })
            }
        })
        .collect()
}

/// CLI entry point for `catalog search`.
pub async fn run_search(config: &Config, query: &str, merchants: bool) -> Result<()> {
    let pool = db::connect(config).await?;
    let snapshot = store::load_snapshot(&pool).await?;

    if merchants {
        let results = search_merchants(&snapshot.merchants, query);
        if results.is_empty() {
            println!("No results.");
        }
        for merchant in &results {
            println!("{}  {}  [{}]", merchant.id, merchant.name, merchant.category);
        }
    } else {
        let categories = search_menu(assemble::assemble_categories(&snapshot), query);
        if categories.is_empty() {
            println!("No results.");
        }
        for category in &categories {
            println!("{} ({})", category.name, category.id);
            for item in &category.items {
                println!(
                    "  {}  {}  {} {}",
                    item.id, item.name, item.price.amount, item.price.currency
                );
            }
        }
    }

    pool.close().await;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::views::{Price, RichText};

    fn merchant(id: &str, name: &str) -> Merchant {
        Merchant {
            id: id.to_string(),
            name: name.to_string(),
            description_plain: String::new(),
            url: String::new(),
            category: String::new(),
            tags_json: "[]".to_string(),
        }
    }

    fn item_view(id: &str, name: &str) -> MenuItemView {
        MenuItemView {
            id: id.to_string(),
            name: name.to_string(),
            description: RichText {
                plain: String::new(),
            },
            price: Price {
                amount: 100,
                currency: "USD".to_string(),
            },
            modifier_groups: None,
        }
    }

    fn category_view(id: &str, name: &str, items: Vec<MenuItemView>) -> CategoryView {
        CategoryView {
            id: id.to_string(),
            name: name.to_string(),
            items,
        }
    }

    #[test]
    fn test_merchant_search_case_insensitive() {
        let merchants = vec![merchant("m1", "Bistro Seven"), merchant("m2", "Taco Town")];
        for query in ["BISTRO", "bistro", "Bistro"] {
            let results = search_merchants(&merchants, query);
            assert_eq!(results.len(), 1, "query {:?}", query);
            assert_eq!(results[0].id, "m1");
        }
    }

    #[test]
    fn test_merchant_search_empty_query_matches_all() {
        let merchants = vec![merchant("m1", "Bistro Seven"), merchant("m2", "Taco Town")];
        let results = search_merchants(&merchants, "");
        let ids: Vec<&str> = results.iter().map(|m| m.id.as_str()).collect();
        assert_eq!(ids, vec!["m1", "m2"]);
    }

    #[test]
    fn test_menu_search_drops_empty_categories() {
        let categories = vec![
            category_view(
                "c1",
                "Mains",
                vec![item_view("i1", "Classic Burger"), item_view("i2", "Veggie Wrap")],
            ),
            category_view("c2", "Drinks", vec![item_view("i3", "Cola")]),
        ];

        let result = search_menu(categories, "burger");
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].id, "c1");
        assert_eq!(result[0].name, "Mains");
        assert_eq!(result[0].items.len(), 1);
        assert_eq!(result[0].items[0].id, "i1");
    }

    #[test]
    fn test_menu_search_idempotent() {
        let categories = vec![category_view(
            "c1",
            "Mains",
            vec![item_view("i1", "Burger"), item_view("i2", "Wrap")],
        )];

        let once = search_menu(categories, "burger");
        let twice = search_menu(once.clone(), "burger");
        assert_eq!(once, twice);
    }

    #[test]
    fn test_menu_search_empty_query_preserves_shape() {
        let categories = vec![
            category_view("c1", "Mains", vec![item_view("i1", "Burger")]),
            category_view("c2", "Sides", vec![item_view("i2", "Fries")]),
        ];

        let result = search_menu(categories.clone(), "");
        assert_eq!(result, categories);
    }

    #[test]
    fn test_menu_search_does_not_match_description() {
        let mut burger = item_view("i1", "Daily Special");
        burger.description.plain = "Our famous burger".to_string();
        let categories = vec![category_view("c1", "Mains", vec![burger])];

        let result = search_menu(categories, "burger");
        assert!(result.is_empty());
    }
}
