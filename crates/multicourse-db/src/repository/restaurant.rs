//! Restaurant status and About details, both single-row snapshots.

use multicourse_core::{AboutInfo, RestaurantInfo};
use sqlx::SqlitePool;
use tracing::debug;

use crate::error::DbResult;

#[derive(Debug, sqlx::FromRow)]
struct RestaurantInfoRow {
    can_order: bool,
    currency: String,
}

#[derive(Debug, sqlx::FromRow)]
struct AboutRow {
    address: String,
    phone: String,
    latitude: f64,
    longitude: f64,
}

#[derive(Debug, Clone)]
pub struct RestaurantDao {
    pool: SqlitePool,
}

impl RestaurantDao {
    pub fn new(pool: SqlitePool) -> Self {
        RestaurantDao { pool }
    }

    /// Last stored status, `None` before the first sync.
    pub async fn info(&self) -> DbResult<Option<RestaurantInfo>> {
        let row = sqlx::query_as::<_, RestaurantInfoRow>(
            "SELECT can_order, currency FROM restaurant_info WHERE id = 1",
        )
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(|r| RestaurantInfo {
            can_order: r.can_order,
            currency: r.currency,
        }))
    }

    /// Overwrites the stored status (latest wins).
    pub async fn save_info(&self, info: &RestaurantInfo) -> DbResult<()> {
        debug!(can_order = info.can_order, "Saving restaurant info");
        sqlx::query(
            r#"
            INSERT INTO restaurant_info (id, can_order, currency) VALUES (1, ?1, ?2)
            ON CONFLICT (id) DO UPDATE SET can_order = excluded.can_order,
                                           currency = excluded.currency
            "#,
        )
        .bind(info.can_order)
        .bind(&info.currency)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    pub async fn about(&self) -> DbResult<Option<AboutInfo>> {
        let row = sqlx::query_as::<_, AboutRow>(
            "SELECT address, phone, latitude, longitude FROM about_info WHERE id = 1",
        )
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(|r| AboutInfo {
            address: r.address,
            phone: r.phone,
            latitude: r.latitude,
            longitude: r.longitude,
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::test_support::test_db;

    #[tokio::test]
    async fn test_info_is_latest_wins() {
        let db = test_db().await;
        assert_eq!(db.restaurant().info().await.unwrap(), None);
        assert_eq!(db.restaurant().about().await.unwrap(), None);

        let dao = db.restaurant();
        dao.save_info(&RestaurantInfo {
            can_order: true,
            currency: "UAH".into(),
        })
        .await
        .unwrap();
        dao.save_info(&RestaurantInfo {
            can_order: false,
            currency: "UAH".into(),
        })
        .await
        .unwrap();

        assert!(!dao.info().await.unwrap().unwrap().can_order);
    }
}
