//! CSV bulk import.
//!
//! Replaces every catalog table from CSV files in the data directory.
//! Each table is rewritten atomically (delete + insert in one
//! transaction), so a server reading concurrently sees either the old or
//! the new rows for an entity type, never a mix. A missing CSV file
//! empties its table rather than failing — merchants and modifier data
//! are optional in sample datasets.

use anyhow::{Context, Result};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::config::Config;
use crate::db;
use crate::models::{
    CategoryItemLink, ItemModifierGroupLink, Merchant, MenuCategory, MenuItem, ModifierGroup,
    ModifierItem, ModifierOption,
};
use crate::store;

#[derive(Debug, Deserialize)]
struct MerchantRow {
    id: String,
    name: String,
    #[serde(default)]
    description_plain: String,
    #[serde(default)]
    url: String,
    #[serde(default)]
    category: String,
    /// JSON array of tags embedded in a CSV column.
    #[serde(default)]
    tags_json: String,
}

#[derive(Debug, Deserialize)]
struct MenuCategoryRow {
    id: String,
    name: String,
}

#[derive(Debug, Deserialize)]
struct MenuItemRow {
    id: String,
    name: String,
    #[serde(default)]
    description_plain: String,
    price_amount: i64,
    price_currency: String,
}

#[derive(Debug, Deserialize)]
struct CategoryItemRow {
    category_id: String,
    item_id: String,
}

#[derive(Debug, Deserialize)]
struct ModifierGroupRow {
    id: String,
    name: String,
    minimum_selections: i64,
    maximum_selections: i64,
}

#[derive(Debug, Deserialize)]
struct ModifierItemRow {
    id: String,
    title: String,
    price_amount: i64,
    price_currency: String,
}

#[derive(Debug, Deserialize)]
struct ItemModifierGroupRow {
    item_id: String,
    modifier_group_id: String,
}

#[derive(Debug, Deserialize)]
struct ModifierOptionRow {
    modifier_group_id: String,
    item_id: String,
}

/// Read all rows of a CSV file; absent file means no rows.
fn read_csv<T: DeserializeOwned>(path: &Path) -> Result<Vec<T>> {
    if !path.exists() {
        return Ok(Vec::new());
    }
    let mut reader = csv::Reader::from_path(path)
        .with_context(|| format!("Failed to open {}", path.display()))?;
    let mut rows = Vec::new();
    for record in reader.deserialize() {
        rows.push(record.with_context(|| format!("Invalid row in {}", path.display()))?);
    }
    Ok(rows)
}

pub async fn run_import(config: &Config, data_dir: Option<PathBuf>) -> Result<()> {
    let dir = data_dir.unwrap_or_else(|| config.import.data_dir.clone());
    let pool = db::connect(config).await?;

    let merchants: Vec<Merchant> = read_csv::<MerchantRow>(&dir.join("merchants.csv"))?
        .into_iter()
        .map(|row| Merchant {
            id: row.id,
            name: row.name,
            description_plain: row.description_plain,
            url: row.url,
            category: row.category,
            tags_json: if row.tags_json.trim().is_empty() {
                "[]".to_string()
            } else {
                row.tags_json
            },
        })
        .collect();
    store::replace_merchants(&pool, &merchants).await?;

    let categories: Vec<MenuCategory> = read_csv::<MenuCategoryRow>(&dir.join("menu_categories.csv"))?
        .into_iter()
        .map(|row| MenuCategory {
            id: row.id,
            name: row.name,
        })
        .collect();
    store::replace_menu_categories(&pool, &categories).await?;

    let items: Vec<MenuItem> = read_csv::<MenuItemRow>(&dir.join("menu_items.csv"))?
        .into_iter()
        .map(|row| MenuItem {
            id: row.id,
            name: row.name,
            description_plain: row.description_plain,
            price_amount: row.price_amount,
            price_currency: row.price_currency,
        })
        .collect();
    store::replace_menu_items(&pool, &items).await?;

    let category_items: Vec<CategoryItemLink> =
        read_csv::<CategoryItemRow>(&dir.join("category_items.csv"))?
            .into_iter()
            .map(|row| CategoryItemLink {
                category_id: row.category_id,
                item_id: row.item_id,
            })
            .collect();
    store::replace_category_items(&pool, &category_items).await?;

    let modifier_groups: Vec<ModifierGroup> =
        read_csv::<ModifierGroupRow>(&dir.join("modifier_groups.csv"))?
            .into_iter()
            .map(|row| ModifierGroup {
                id: row.id,
                name: row.name,
                minimum_selections: row.minimum_selections,
                maximum_selections: row.maximum_selections,
            })
            .collect();
    store::replace_modifier_groups(&pool, &modifier_groups).await?;

    let modifier_items: Vec<ModifierItem> =
        read_csv::<ModifierItemRow>(&dir.join("modifier_items.csv"))?
            .into_iter()
            .map(|row| ModifierItem {
                id: row.id,
                title: row.title,
                price_amount: row.price_amount,
                price_currency: row.price_currency,
            })
            .collect();
    store::replace_modifier_items(&pool, &modifier_items).await?;

    let item_modifier_groups: Vec<ItemModifierGroupLink> =
        read_csv::<ItemModifierGroupRow>(&dir.join("item_modifier_groups.csv"))?
            .into_iter()
            .map(|row| ItemModifierGroupLink {
                item_id: row.item_id,
                modifier_group_id: row.modifier_group_id,
            })
            .collect();
    store::replace_item_modifier_groups(&pool, &item_modifier_groups).await?;

    let modifier_options: Vec<ModifierOption> =
        read_csv::<ModifierOptionRow>(&dir.join("modifier_options.csv"))?
            .into_iter()
            .map(|row| ModifierOption {
                modifier_group_id: row.modifier_group_id,
                item_id: row.item_id,
            })
            .collect();
    store::replace_modifier_options(&pool, &modifier_options).await?;

    println!("import {}", dir.display());
    println!("  merchants: {}", merchants.len());
    println!("  menu categories: {}", categories.len());
    println!("  menu items: {}", items.len());
    println!("  category items: {}", category_items.len());
    println!("  modifier groups: {}", modifier_groups.len());
    println!("  modifier items: {}", modifier_items.len());
    println!("  item modifier groups: {}", item_modifier_groups.len());
    println!("  modifier options: {}", modifier_options.len());
    println!("ok");

    pool.close().await;
    Ok(())
}
