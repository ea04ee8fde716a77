use sqlx::PgPool;
use time::Date;
use uuid::Uuid;

use super::repo_types::MealRow;
use crate::nutrition::{DateRange, MealEntry};

const COLUMNS: &str =
    "id, date, time_of_day, meal_type, description, quantity, calories, protein, fat, carbs, sugar";

fn into_entries(rows: Vec<MealRow>) -> anyhow::Result<Vec<MealEntry>> {
    rows.into_iter().map(MealEntry::try_from).collect()
}

pub async fn list_range(
    db: &PgPool,
    user_id: Uuid,
    range: &DateRange,
) -> anyhow::Result<Vec<MealEntry>> {
    let rows = sqlx::query_as::<_, MealRow>(&format!(
        r#"
        SELECT {COLUMNS}
        FROM meal_entries
        WHERE user_id = $1 AND date BETWEEN $2 AND $3
        ORDER BY date, time_of_day, created_at
        "#
    ))
    .bind(user_id)
    .bind(range.from)
    .bind(range.to)
    .fetch_all(db)
    .await?;
    into_entries(rows)
}

pub async fn list_by_date(db: &PgPool, user_id: Uuid, date: Date) -> anyhow::Result<Vec<MealEntry>> {
    list_range(db, user_id, &DateRange::single(date)).await
}

/// The latest `limit` entries, returned oldest first.
pub async fn list_recent(db: &PgPool, user_id: Uuid, limit: i64) -> anyhow::Result<Vec<MealEntry>> {
    let rows = sqlx::query_as::<_, MealRow>(&format!(
        r#"
        SELECT {COLUMNS}
        FROM meal_entries
        WHERE user_id = $1
        ORDER BY date DESC, time_of_day DESC, created_at DESC
        LIMIT $2
        "#
    ))
    .bind(user_id)
    .bind(limit)
    .fetch_all(db)
    .await?;
    let mut entries = into_entries(rows)?;
    entries.reverse();
    Ok(entries)
}

pub async fn find(db: &PgPool, user_id: Uuid, id: Uuid) -> anyhow::Result<Option<MealEntry>> {
    let row = sqlx::query_as::<_, MealRow>(&format!(
        r#"
        SELECT {COLUMNS}
        FROM meal_entries
        WHERE id = $1 AND user_id = $2
        "#
    ))
    .bind(id)
    .bind(user_id)
    .fetch_optional(db)
    .await?;
    row.map(MealEntry::try_from).transpose()
}

pub async fn insert(db: &PgPool, user_id: Uuid, e: &MealEntry) -> anyhow::Result<()> {
    sqlx::query(
        r#"
        INSERT INTO meal_entries (id, user_id, date, time_of_day, meal_type, description,
                                  quantity, calories, protein, fat, carbs, sugar)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12)
        "#,
    )
    .bind(e.id)
    .bind(user_id)
    .bind(e.date)
    .bind(&e.time)
    .bind(e.meal_type.as_str())
    .bind(&e.description)
    .bind(&e.quantity)
    .bind(e.nutrition.calories)
    .bind(e.nutrition.protein)
    .bind(e.nutrition.fat)
    .bind(e.nutrition.carbs)
    .bind(e.nutrition.sugar)
    .execute(db)
    .await?;
    Ok(())
}

pub async fn update(db: &PgPool, user_id: Uuid, e: &MealEntry) -> anyhow::Result<bool> {
    let res = sqlx::query(
        r#"
        UPDATE meal_entries
        SET date = $3, time_of_day = $4, meal_type = $5, description = $6,
            quantity = $7, calories = $8, protein = $9, fat = $10, carbs = $11, sugar = $12
        WHERE id = $1 AND user_id = $2
        "#,
    )
    .bind(e.id)
    .bind(user_id)
    .bind(e.date)
    .bind(&e.time)
    .bind(e.meal_type.as_str())
    .bind(&e.description)
    .bind(&e.quantity)
    .bind(e.nutrition.calories)
    .bind(e.nutrition.protein)
    .bind(e.nutrition.fat)
    .bind(e.nutrition.carbs)
    .bind(e.nutrition.sugar)
    .execute(db)
    .await?;
    Ok(res.rows_affected() > 0)
}

pub async fn delete(db: &PgPool, user_id: Uuid, id: Uuid) -> anyhow::Result<bool> {
    let res = sqlx::query("DELETE FROM meal_entries WHERE id = $1 AND user_id = $2")
        .bind(id)
        .bind(user_id)
        .execute(db)
        .await?;
    Ok(res.rows_affected() > 0)
}
