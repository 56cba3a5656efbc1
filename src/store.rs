//! Relation storage: snapshot reads and bulk replace.
//!
//! Assembly and search operate on a [`Snapshot`] — one consistent,
//! immutable read of every catalog table. Each caller loads its own
//! snapshot; nothing is cached across calls. Retrieval order is the
//! insertion order of the rows (`ORDER BY rowid`), which the assembler
//! relies on for deterministic output.
//!
//! Replace operations rewrite one table atomically (delete then insert in
//! a single transaction), so a concurrent snapshot never observes a
//! half-imported entity type.

use anyhow::Result;
use sqlx::SqlitePool;

use crate::models::{
    CategoryItemLink, ItemModifierGroupLink, Merchant, MenuCategory, MenuItem, ModifierGroup,
    ModifierItem, ModifierOption,
};

/// One immutable read of all catalog relations.
#[derive(Debug, Clone, Default)]
pub struct Snapshot {
    pub merchants: Vec<Merchant>,
    pub categories: Vec<MenuCategory>,
    pub items: Vec<MenuItem>,
    pub category_items: Vec<CategoryItemLink>,
    pub modifier_groups: Vec<ModifierGroup>,
    pub modifier_items: Vec<ModifierItem>,
    pub item_modifier_groups: Vec<ItemModifierGroupLink>,
    pub modifier_options: Vec<ModifierOption>,
}

/// Load every catalog table in insertion order. One read transaction keeps
/// the eight reads consistent with each other. Storage failures propagate
/// unchanged; there is no partial snapshot.
pub async fn load_snapshot(pool: &SqlitePool) -> Result<Snapshot> {
    let mut tx = pool.begin().await?;

    let merchants = sqlx::query_as::<_, Merchant>(
        "SELECT id, name, description_plain, url, category, tags_json FROM merchants ORDER BY rowid",
    )
    .fetch_all(&mut *tx)
    .await?;

    let categories =
        sqlx::query_as::<_, MenuCategory>("SELECT id, name FROM menu_categories ORDER BY rowid")
            .fetch_all(&mut *tx)
            .await?;

    let items = sqlx::query_as::<_, MenuItem>(
        "SELECT id, name, description_plain, price_amount, price_currency FROM menu_items ORDER BY rowid",
    )
    .fetch_all(&mut *tx)
    .await?;

    let category_items = sqlx::query_as::<_, CategoryItemLink>(
        "SELECT category_id, item_id FROM category_items ORDER BY rowid",
    )
    .fetch_all(&mut *tx)
    .await?;

    let modifier_groups = sqlx::query_as::<_, ModifierGroup>(
        "SELECT id, name, minimum_selections, maximum_selections FROM modifier_groups ORDER BY rowid",
    )
    .fetch_all(&mut *tx)
    .await?;

    let modifier_items = sqlx::query_as::<_, ModifierItem>(
        "SELECT id, title, price_amount, price_currency FROM modifier_items ORDER BY rowid",
    )
    .fetch_all(&mut *tx)
    .await?;

    let item_modifier_groups = sqlx::query_as::<_, ItemModifierGroupLink>(
        "SELECT item_id, modifier_group_id FROM item_modifier_groups ORDER BY rowid",
    )
    .fetch_all(&mut *tx)
    .await?;

    let modifier_options = sqlx::query_as::<_, ModifierOption>(
        "SELECT modifier_group_id, item_id FROM modifier_options ORDER BY rowid",
    )
    .fetch_all(&mut *tx)
    .await?;

    tx.commit().await?;

    Ok(Snapshot {
        merchants,
        categories,
        items,
        category_items,
        modifier_groups,
        modifier_items,
        item_modifier_groups,
        modifier_options,
    })
}

/// Look up a single merchant by id.
pub async fn get_merchant(pool: &SqlitePool, id: &str) -> Result<Option<Merchant>> {
    let merchant = sqlx::query_as::<_, Merchant>(
        "SELECT id, name, description_plain, url, category, tags_json FROM merchants WHERE id = ?",
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;
    Ok(merchant)
}

/// Look up a single menu item by id.
pub async fn get_menu_item(pool: &SqlitePool, id: &str) -> Result<Option<MenuItem>> {
    let item = sqlx::query_as::<_, MenuItem>(
        "SELECT id, name, description_plain, price_amount, price_currency FROM menu_items WHERE id = ?",
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;
    Ok(item)
}

/// Look up a single modifier item by id.
pub async fn get_modifier_item(pool: &SqlitePool, id: &str) -> Result<Option<ModifierItem>> {
    let modifier_item = sqlx::query_as::<_, ModifierItem>(
        "SELECT id, title, price_amount, price_currency FROM modifier_items WHERE id = ?",
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;
    Ok(modifier_item)
}

pub async fn replace_merchants(pool: &SqlitePool, rows: &[Merchant]) -> Result<()> {
    let mut tx = pool.begin().await?;
    sqlx::query("DELETE FROM merchants").execute(&mut *tx).await?;
    for row in rows {
        sqlx::query(
            "INSERT INTO merchants (id, name, description_plain, url, category, tags_json) VALUES (?, ?, ?, ?, ?, ?)",
        )
        .bind(&row.id)
        .bind(&row.name)
        .bind(&row.description_plain)
        .bind(&row.url)
        .bind(&row.category)
        .bind(&row.tags_json)
        .execute(&mut *tx)
        .await?;
    }
    tx.commit().await?;
    Ok(())
}

pub async fn replace_menu_categories(pool: &SqlitePool, rows: &[MenuCategory]) -> Result<()> {
    let mut tx = pool.begin().await?;
    sqlx::query("DELETE FROM menu_categories")
        .execute(&mut *tx)
        .await?;
    for row in rows {
        sqlx::query("INSERT INTO menu_categories (id, name) VALUES (?, ?)")
            .bind(&row.id)
            .bind(&row.name)
            .execute(&mut *tx)
            .await?;
    }
    tx.commit().await?;
    Ok(())
}

pub async fn replace_menu_items(pool: &SqlitePool, rows: &[MenuItem]) -> Result<()> {
    let mut tx = pool.begin().await?;
    sqlx::query("DELETE FROM menu_items").execute(&mut *tx).await?;
    for row in rows {
        sqlx::query(
            "INSERT INTO menu_items (id, name, description_plain, price_amount, price_currency) VALUES (?, ?, ?, ?, ?)",
        )
        .bind(&row.id)
        .bind(&row.name)
        .bind(&row.description_plain)
        .bind(row.price_amount)
        .bind(&row.price_currency)
        .execute(&mut *tx)
        .await?;
    }
    tx.commit().await?;
    Ok(())
}

pub async fn replace_category_items(pool: &SqlitePool, rows: &[CategoryItemLink]) -> Result<()> {
    let mut tx = pool.begin().await?;
    sqlx::query("DELETE FROM category_items")
        .execute(&mut *tx)
        .await?;
    for row in rows {
        sqlx::query("INSERT INTO category_items (category_id, item_id) VALUES (?, ?)")
            .bind(&row.category_id)
            .bind(&row.item_id)
            .execute(&mut *tx)
            .await?;
    }
    tx.commit().await?;
    Ok(())
}

pub async fn replace_modifier_groups(pool: &SqlitePool, rows: &[ModifierGroup]) -> Result<()> {
    let mut tx = pool.begin().await?;
    sqlx::query("DELETE FROM modifier_groups")
        .execute(&mut *tx)
        .await?;
    for row in rows {
        sqlx::query(
            "INSERT INTO modifier_groups (id, name, minimum_selections, maximum_selections) VALUES (?, ?, ?, ?)",
        )
        .bind(&row.id)
        .bind(&row.name)
        .bind(row.minimum_selections)
        .bind(row.maximum_selections)
        .execute(&mut *tx)
        .await?;
    }
    tx.commit().await?;
    Ok(())
}

pub async fn replace_modifier_items(pool: &SqlitePool, rows: &[ModifierItem]) -> Result<()> {
    let mut tx = pool.begin().await?;
    sqlx::query("DELETE FROM modifier_items")
        .execute(&mut *tx)
        .await?;
    for row in rows {
        sqlx::query(
            "INSERT INTO modifier_items (id, title, price_amount, price_currency) VALUES (?, ?, ?, ?)",
        )
        .bind(&row.id)
        .bind(&row.title)
        .bind(row.price_amount)
        .bind(&row.price_currency)
        .execute(&mut *tx)
        .await?;
    }
    tx.commit().await?;
    Ok(())
}

pub async fn replace_item_modifier_groups(
    pool: &SqlitePool,
    rows: &[ItemModifierGroupLink],
) -> Result<()> {
    let mut tx = pool.begin().await?;
    sqlx::query("DELETE FROM item_modifier_groups")
        .execute(&mut *tx)
        .await?;
    for row in rows {
        sqlx::query("INSERT INTO item_modifier_groups (item_id, modifier_group_id) VALUES (?, ?)")
            .bind(&row.item_id)
            .bind(&row.modifier_group_id)
            .execute(&mut *tx)
            .await?;
    }
    tx.commit().await?;
    Ok(())
}

pub async fn replace_modifier_options(pool: &SqlitePool, rows: &[ModifierOption]) -> Result<()> {
    let mut tx = pool.begin().await?;
    sqlx::query("DELETE FROM modifier_options")
        .execute(&mut *tx)
        .await?;
    for row in rows {
        sqlx::query("INSERT INTO modifier_options (modifier_group_id, item_id) VALUES (?, ?)")
            .bind(&row.modifier_group_id)
            .bind(&row.item_id)
            .execute(&mut *tx)
            .await?;
    }
    tx.commit().await?;
    Ok(())
}
