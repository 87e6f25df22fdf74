//! # Change Feed
//!
//! Observable queries (cart contents, favourites) re-run whenever the
//! underlying table changes. Each table has a `watch` channel carrying a
//! version counter; writers bump it after a successful write, readers wait on
//! `changed()` and re-query.
//!
//! ```text
//! CartDao::upsert ──► bump(cart) ──► watch::Receiver::changed() ──► re-query
//! ```

use tokio::sync::watch;

/// Tables with observable queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Table {
    Cart,
    Favourites,
    Catalog,
}

/// Version counters for observable tables.
#[derive(Debug, Clone)]
pub struct ChangeFeed {
    cart: watch::Sender<u64>,
    favourites: watch::Sender<u64>,
    catalog: watch::Sender<u64>,
}

impl Default for ChangeFeed {
    fn default() -> Self {
        Self::new()
    }
}

impl ChangeFeed {
    pub fn new() -> Self {
        ChangeFeed {
            cart: watch::Sender::new(0),
            favourites: watch::Sender::new(0),
            catalog: watch::Sender::new(0),
        }
    }

    fn sender(&self, table: Table) -> &watch::Sender<u64> {
        match table {
            Table::Cart => &self.cart,
            Table::Favourites => &self.favourites,
            Table::Catalog => &self.catalog,
        }
    }

    /// Marks `table` as changed. Succeeds even with no subscribers.
    pub fn bump(&self, table: Table) {
        self.sender(table).send_modify(|v| *v = v.wrapping_add(1));
    }

    /// A receiver that wakes after the next bump of `table`.
    pub fn subscribe(&self, table: Table) -> watch::Receiver<u64> {
        self.sender(table).subscribe()
    }

    pub fn version(&self, table: Table) -> u64 {
        *self.sender(table).borrow()
    }
}
