//! # Commerce Catalog
//!
//! A sample commerce catalog server. Flat merchant and menu relations are
//! bulk-loaded from CSV files into SQLite, assembled into nested catalog
//! views (category → item → modifier group → modifier option), and served
//! over a JSON HTTP API with free-text search.
//!
//! ## Pipeline
//!
//! ```text
//! ┌──────────┐   ┌──────────┐   ┌───────────┐   ┌─────────┐
//! │ CSV data │──▶│  SQLite  │──▶│ Assembler │──▶│  Query  │
//! │ (import) │   │ snapshot │   │ (views)   │   │ engine  │
//! └──────────┘   └──────────┘   └─────┬─────┘   └────┬────┘
//!                                     │              │
//!                                ┌────┴────┐    ┌────┴────┐
//!                                │   CLI   │    │  HTTP   │
//!                                └─────────┘    └─────────┘
//! ```
//!
//! ## Quick Start
//!
//! ```bash
//! catalog init                    # create the database
//! catalog import                  # replace all tables from CSV files
//! catalog search "burger"         # search menu items
//! catalog search "bistro" --merchants
//! catalog serve                   # start the HTTP server
//! ```
//!
//! ## Modules
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`config`] | TOML configuration parsing |
//! | [`models`] | Flat relation records |
//! | [`store`] | Snapshot loading and bulk replace |
//! | [`import`] | CSV ingestion |
//! | [`links`] | Join-table index resolution |
//! | [`assemble`] | Nested view assembly |
//! | [`query`] | Substring search over assembled views |
//! | [`views`] | Typed view structs for API output |
//! | [`server`] | JSON HTTP server |
//! | [`db`] | Database connection |
//! | [`migrate`] | Schema migrations |

pub mod assemble;
pub mod config;
pub mod db;
pub mod import;
pub mod links;
pub mod migrate;
pub mod models;
pub mod query;
pub mod server;
pub mod store;
pub mod views;
