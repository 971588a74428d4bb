use crate::models::Room;
use sqlx::types::Json;
use sqlx::PgPool;

pub struct RoomRepository {
    pool: PgPool,
}

impl RoomRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Upsert the whole scraped batch in one transaction: either every
    /// room lands or none do. The bookings field is fully overwritten on
    /// conflict, never merged.
    pub async fn upsert_all(&self, rooms: &[Room]) -> Result<(), sqlx::Error> {
        let mut tx = self.pool.begin().await?;

        for room in rooms {
            sqlx::query(
                "INSERT INTO rooms (id, name, capacity, bookings)
                 VALUES ($1, $2, $3, $4)
                 ON CONFLICT (id) DO UPDATE
                 SET name = EXCLUDED.name,
                     capacity = EXCLUDED.capacity,
                     bookings = EXCLUDED.bookings",
            )
            .bind(room.id)
            .bind(&room.name)
            .bind(room.capacity)
            .bind(Json(&room.bookings))
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;
        Ok(())
    }

    pub async fn list_all(&self) -> Result<Vec<Room>, sqlx::Error> {
        sqlx::query_as::<_, Room>("SELECT id, name, capacity, bookings FROM rooms ORDER BY id")
            .fetch_all(&self.pool)
            .await
    }
}
