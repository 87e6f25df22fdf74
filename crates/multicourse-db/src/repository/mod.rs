//! # DAO Module
//!
//! Narrow data-access objects, one per table group.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Database                                                               │
//! │  ├── catalog()      CatalogDao      categories, wholesale replace       │
//! │  ├── menu()         MenuDao         menu reads, FTS5 name search        │
//! │  ├── cart()         CartDao         cart lines, joined order items      │
//! │  ├── favourites()   FavouriteDao    favourite membership                │
//! │  ├── restaurant()   RestaurantDao   status + About snapshot             │
//! │  └── preferences()  PreferenceStore key-value order state               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Queries are built at runtime with `sqlx::query_as` and `FromRow` rows.

pub mod cart;
pub mod catalog;
pub mod favourite;
pub mod menu;
pub mod preferences;
pub mod restaurant;
