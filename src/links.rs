//! Link resolution: join-table rows folded into one-to-many indexes.
//!
//! The resolver is key-agnostic — it never checks whether a referenced id
//! actually exists. Dangling ids stay in the index and are filtered out
//! when the assembler converts ids to view objects. Duplicate rows are
//! preserved in order: if the source data lists an item under a category
//! twice, the assembled category shows it twice.

use std::collections::HashMap;

use crate::models::{CategoryItemLink, ItemModifierGroupLink};

/// Grouping indexes over the two join tables, insertion order preserved
/// within each group.
#[derive(Debug, Default)]
pub struct LinkIndex {
    pub items_by_category: HashMap<String, Vec<String>>,
    pub groups_by_item: HashMap<String, Vec<String>>,
}

/// Build both indexes in a single linear scan per join table.
pub fn resolve_links(
    category_items: &[CategoryItemLink],
    item_groups: &[ItemModifierGroupLink],
) -> LinkIndex {
    let mut index = LinkIndex::default();

    for link in category_items {
        index
            .items_by_category
            .entry(link.category_id.clone())
            .or_default()
            .push(link.item_id.clone());
    }

    for link in item_groups {
        index
            .groups_by_item
            .entry(link.item_id.clone())
            .or_default()
            .push(link.modifier_group_id.clone());
    }

    index
}
