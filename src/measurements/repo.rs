use serde::Serialize;
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use super::dto::NewMeasurement;

/// A point-in-time body-metrics snapshot. Circumferences are in cm.
#[derive(Debug, Clone, PartialEq, Serialize, FromRow)]
pub struct Measurement {
    pub id: Uuid,
    pub date: time::Date,
    pub weight_kg: f64,
    pub body_fat_pct: Option<f64>,
    pub neck: Option<f64>,
    pub chest: Option<f64>,
    pub arm: Option<f64>,
    pub waist: Option<f64>,
    pub hip: Option<f64>,
    pub thigh: Option<f64>,
}

const COLUMNS: &str = "id, date, weight_kg, body_fat_pct, neck, chest, arm, waist, hip, thigh";

pub async fn list(db: &PgPool, user_id: Uuid) -> anyhow::Result<Vec<Measurement>> {
    let rows = sqlx::query_as::<_, Measurement>(&format!(
        r#"
        SELECT {COLUMNS}
        FROM measurements
        WHERE user_id = $1
        ORDER BY date, created_at
        "#
    ))
    .bind(user_id)
    .fetch_all(db)
    .await?;
    Ok(rows)
}

/// The latest `limit` snapshots, oldest first.
pub async fn list_recent(db: &PgPool, user_id: Uuid, limit: i64) -> anyhow::Result<Vec<Measurement>> {
    let mut rows = sqlx::query_as::<_, Measurement>(&format!(
        r#"
        SELECT {COLUMNS}
        FROM measurements
        WHERE user_id = $1
        ORDER BY date DESC, created_at DESC
        LIMIT $2
        "#
    ))
    .bind(user_id)
    .bind(limit)
    .fetch_all(db)
    .await?;
    rows.reverse();
    Ok(rows)
}

pub async fn insert(db: &PgPool, user_id: Uuid, m: &NewMeasurement) -> anyhow::Result<Measurement> {
    let row = sqlx::query_as::<_, Measurement>(&format!(
        r#"
        INSERT INTO measurements (id, user_id, date, weight_kg, body_fat_pct,
                                  neck, chest, arm, waist, hip, thigh)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
        RETURNING {COLUMNS}
        "#
    ))
    .bind(Uuid::new_v4())
    .bind(user_id)
    .bind(m.date)
    .bind(m.weight_kg)
    .bind(m.body_fat_pct)
    .bind(m.neck)
    .bind(m.chest)
    .bind(m.arm)
    .bind(m.waist)
    .bind(m.hip)
    .bind(m.thigh)
    .fetch_one(db)
    .await?;
    Ok(row)
}

pub async fn delete(db: &PgPool, user_id: Uuid, id: Uuid) -> anyhow::Result<bool> {
    let result = sqlx::query("DELETE FROM measurements WHERE id = $1 AND user_id = $2")
        .bind(id)
        .bind(user_id)
        .execute(db)
        .await?;
    Ok(result.rows_affected() > 0)
}
