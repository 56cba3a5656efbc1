//! Catalog assembly: flat relations into nested view trees.
//!
//! Assembly is a pure function of one immutable [`Snapshot`]. Intermediate
//! id → record maps are built once per call and reused across stages, so
//! the whole pass is linear in the total record count. Join rows whose
//! target id has no record are dropped silently — missing-reference
//! tolerance is policy here, not an error.

use std::collections::HashMap;

use crate::links::{resolve_links, LinkIndex};
use crate::store::Snapshot;
use crate::views::{
    CategoryView, MenuItemView, ModifierGroupView, ModifierOptionView, Price, RichText,
};

/// Build the view for every modifier group, keyed by group id. Each view
/// carries its options in record order; a group with no options gets an
/// empty list, never a missing field.
pub fn assemble_group_views(snapshot: &Snapshot) -> HashMap<String, ModifierGroupView> {
    let mut options_by_group: HashMap<&str, Vec<ModifierOptionView>> = HashMap::new();
    for option in &snapshot.modifier_options {
        options_by_group
            .entry(option.modifier_group_id.as_str())
            .or_default()
            .push(ModifierOptionView {
                item_id: option.item_id.clone(),
            });
    }

    let mut views = HashMap::with_capacity(snapshot.modifier_groups.len());
    for group in &snapshot.modifier_groups {
        views.insert(
            group.id.clone(),
            ModifierGroupView {
                id: group.id.clone(),
                name: group.name.clone(),
                minimum_selections: group.minimum_selections,
                maximum_selections: group.maximum_selections,
                modifier_options: options_by_group.remove(group.id.as_str()).unwrap_or_default(),
            },
        );
    }
    views
}

fn item_views(snapshot: &Snapshot, links: &LinkIndex) -> HashMap<String, MenuItemView> {
    let groups_by_id = assemble_group_views(snapshot);

    let mut views = HashMap::with_capacity(snapshot.items.len());
    for item in &snapshot.items {
        // Link rows naming a group with no record are skipped; the field is
        // present only when something actually resolved.
        let modifier_groups = links
            .groups_by_item
            .get(&item.id)
            .map(|group_ids| {
                group_ids
                    .iter()
                    .filter_map(|group_id| groups_by_id.get(group_id).cloned())
                    .collect::<Vec<_>>()
            })
            .filter(|groups| !groups.is_empty());

        views.insert(
            item.id.clone(),
            MenuItemView {
                id: item.id.clone(),
                name: item.name.clone(),
                description: RichText {
                    plain: item.description_plain.clone(),
                },
                price: Price {
                    amount: item.price_amount,
                    currency: item.price_currency.clone(),
                },
                modifier_groups,
            },
        );
    }
    views
}

/// Build the view for every menu item, keyed by item id.
pub fn assemble_item_views(snapshot: &Snapshot) -> HashMap<String, MenuItemView> {
    let links = resolve_links(&snapshot.category_items, &snapshot.item_modifier_groups);
    item_views(snapshot, &links)
}

/// Assemble the full category list in storage order. Item ids with no
/// matching record are filtered out of each category; the category itself
/// is kept even when all of its links dangle.
pub fn assemble_categories(snapshot: &Snapshot) -> Vec<CategoryView> {
    let links = resolve_links(&snapshot.category_items, &snapshot.item_modifier_groups);
    let items_by_id = item_views(snapshot, &links);

    snapshot
        .categories
        .iter()
        .map(|category| {
            let items = links
                .items_by_category
                .get(&category.id)
                .map(|item_ids| {
                    item_ids
                        .iter()
                        .filter_map(|item_id| items_by_id.get(item_id).cloned())
                        .collect()
                })
                .unwrap_or_default();
            CategoryView {
                id: category.id.clone(),
                name: category.name.clone(),
                items,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{
        CategoryItemLink, ItemModifierGroupLink, MenuCategory, MenuItem, ModifierGroup,
        ModifierOption,
    };

    fn category(id: &str, name: &str) -> MenuCategory {
        MenuCategory {
            id: id.to_string(),
            name: name.to_string(),
        }
    }

    fn item(id: &str, name: &str) -> MenuItem {
        MenuItem {
            id: id.to_string(),
            name: name.to_string(),
            description_plain: format!("{} description", name),
            price_amount: 100,
            price_currency: "USD".to_string(),
        }
    }

    fn cat_link(category_id: &str, item_id: &str) -> CategoryItemLink {
        CategoryItemLink {
            category_id: category_id.to_string(),
            item_id: item_id.to_string(),
        }
    }

    fn group(id: &str, name: &str, min: i64, max: i64) -> ModifierGroup {
        ModifierGroup {
            id: id.to_string(),
            name: name.to_string(),
            minimum_selections: min,
            maximum_selections: max,
        }
    }

    fn group_link(item_id: &str, group_id: &str) -> ItemModifierGroupLink {
        ItemModifierGroupLink {
            item_id: item_id.to_string(),
            modifier_group_id: group_id.to_string(),
        }
    }

    fn option(group_id: &str, item_id: &str) -> ModifierOption {
        ModifierOption {
            modifier_group_id: group_id.to_string(),
            item_id: item_id.to_string(),
        }
    }

    #[test]
    fn test_flatten_reproduces_surviving_links() {
        let snapshot = Snapshot {
            categories: vec![category("c1", "Mains"), category("c2", "Sides")],
            items: vec![item("i1", "Burger"), item("i2", "Fries")],
            category_items: vec![
                cat_link("c1", "i1"),
                cat_link("c1", "i2"),
                cat_link("c2", "i2"),
                cat_link("c2", "ghost"),
            ],
            ..Default::default()
        };

        let categories = assemble_categories(&snapshot);
        let flattened: Vec<(String, String)> = categories
            .iter()
            .flat_map(|c| c.items.iter().map(move |i| (c.id.clone(), i.id.clone())))
            .collect();

        // The dangling ("c2", "ghost") pair disappears; everything else
        // survives in original link order.
        assert_eq!(
            flattened,
            vec![
                ("c1".to_string(), "i1".to_string()),
                ("c1".to_string(), "i2".to_string()),
                ("c2".to_string(), "i2".to_string()),
            ]
        );
    }

    #[test]
    fn test_dangling_item_does_not_disturb_neighbors() {
        let snapshot = Snapshot {
            categories: vec![category("c1", "Mains")],
            items: vec![item("i1", "Burger"), item("i2", "Wrap")],
            category_items: vec![
                cat_link("c1", "i1"),
                cat_link("c1", "missing"),
                cat_link("c1", "i2"),
            ],
            ..Default::default()
        };

        let categories = assemble_categories(&snapshot);
        let ids: Vec<&str> = categories[0].items.iter().map(|i| i.id.as_str()).collect();
        assert_eq!(ids, vec!["i1", "i2"]);
    }

    #[test]
    fn test_duplicate_link_renders_item_twice() {
        let snapshot = Snapshot {
            categories: vec![category("c1", "Mains")],
            items: vec![item("i1", "Burger")],
            category_items: vec![cat_link("c1", "i1"), cat_link("c1", "i1")],
            ..Default::default()
        };
        let categories = assemble_categories(&snapshot);
        let ids: Vec<&str> = categories[0].items.iter().map(|i| i.id.as_str()).collect();
        assert_eq!(ids, vec!["i1", "i1"]);
    }

    #[test]
    fn test_category_with_no_links_has_empty_items() {
        let snapshot = Snapshot {
            categories: vec![category("c1", "Empty")],
            ..Default::default()
        };
        let categories = assemble_categories(&snapshot);
        assert_eq!(categories.len(), 1);
        assert!(categories[0].items.is_empty());
    }

    #[test]
    fn test_modifier_groups_field_absent_without_links() {
        let snapshot = Snapshot {
            items: vec![item("i1", "Burger")],
            ..Default::default()
        };
        let views = assemble_item_views(&snapshot);
        assert!(views["i1"].modifier_groups.is_none());
    }

    #[test]
    fn test_modifier_groups_field_absent_when_all_links_dangle() {
        let snapshot = Snapshot {
            items: vec![item("i1", "Burger")],
            item_modifier_groups: vec![group_link("i1", "ghost")],
            ..Default::default()
        };
        let views = assemble_item_views(&snapshot);
        assert!(views["i1"].modifier_groups.is_none());
    }

    #[test]
    fn test_modifier_groups_field_present_with_empty_options() {
        let snapshot = Snapshot {
            items: vec![item("i1", "Burger")],
            modifier_groups: vec![group("g1", "Toppings", 0, 3)],
            item_modifier_groups: vec![group_link("i1", "g1")],
            ..Default::default()
        };
        let views = assemble_item_views(&snapshot);
        let groups = views["i1"].modifier_groups.as_ref().unwrap();
        assert_eq!(groups.len(), 1);
        assert!(groups[0].modifier_options.is_empty());
    }

    #[test]
    fn test_modifier_chain_end_to_end() {
        let snapshot = Snapshot {
            items: vec![item("i1", "Burger")],
            modifier_groups: vec![group("g1", "Cheese", 1, 1)],
            item_modifier_groups: vec![group_link("i1", "g1")],
            modifier_options: vec![option("g1", "m1")],
            ..Default::default()
        };

        let views = assemble_item_views(&snapshot);
        let groups = views["i1"].modifier_groups.as_ref().unwrap();
        assert_eq!(groups[0].id, "g1");
        assert_eq!(groups[0].minimum_selections, 1);
        assert_eq!(groups[0].maximum_selections, 1);
        assert_eq!(groups[0].modifier_options[0].item_id, "m1");
    }

    #[test]
    fn test_option_order_follows_records() {
        let snapshot = Snapshot {
            modifier_groups: vec![group("g1", "Sauces", 0, 2)],
            modifier_options: vec![option("g1", "m2"), option("g1", "m1"), option("g1", "m3")],
            ..Default::default()
        };
        let groups = assemble_group_views(&snapshot);
        let ids: Vec<&str> = groups["g1"]
            .modifier_options
            .iter()
            .map(|o| o.item_id.as_str())
            .collect();
        assert_eq!(ids, vec!["m2", "m1", "m3"]);
    }

    #[test]
    fn test_group_order_follows_link_records() {
        let snapshot = Snapshot {
            items: vec![item("i1", "Burger")],
            modifier_groups: vec![group("g1", "Cheese", 0, 1), group("g2", "Sauces", 0, 2)],
            item_modifier_groups: vec![group_link("i1", "g2"), group_link("i1", "g1")],
            ..Default::default()
        };
        let views = assemble_item_views(&snapshot);
        let groups = views["i1"].modifier_groups.as_ref().unwrap();
        let ids: Vec<&str> = groups.iter().map(|g| g.id.as_str()).collect();
        assert_eq!(ids, vec!["g2", "g1"]);
    }
}
