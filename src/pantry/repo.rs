use sqlx::{types::Json, PgPool};
use uuid::Uuid;

use super::repo_types::{MealPlanRow, MealPlanSession, PantryItem};

pub async fn list_items(db: &PgPool, user_id: Uuid) -> anyhow::Result<Vec<PantryItem>> {
    let rows = sqlx::query_as::<_, PantryItem>(
        r#"
        SELECT id, name, category
        FROM pantry_items
        WHERE user_id = $1
        ORDER BY created_at
        "#,
    )
    .bind(user_id)
    .fetch_all(db)
    .await?;
    Ok(rows)
}

pub async fn insert_item(
    db: &PgPool,
    user_id: Uuid,
    name: &str,
    category: &str,
) -> anyhow::Result<PantryItem> {
    let item = sqlx::query_as::<_, PantryItem>(
        r#"
        INSERT INTO pantry_items (id, user_id, name, category)
        VALUES ($1, $2, $3, $4)
        RETURNING id, name, category
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(user_id)
    .bind(name)
    .bind(category)
    .fetch_one(db)
    .await?;
    Ok(item)
}

pub async fn delete_item(db: &PgPool, user_id: Uuid, id: Uuid) -> anyhow::Result<bool> {
    let result = sqlx::query("DELETE FROM pantry_items WHERE id = $1 AND user_id = $2")
        .bind(id)
        .bind(user_id)
        .execute(db)
        .await?;
    Ok(result.rows_affected() > 0)
}

pub async fn insert_plan(
    db: &PgPool,
    user_id: Uuid,
    session: &MealPlanSession,
) -> anyhow::Result<()> {
    sqlx::query(
        r#"
        INSERT INTO meal_plans (id, user_id, date, pantry_snapshot, plan)
        VALUES ($1, $2, $3, $4, $5)
        "#,
    )
    .bind(session.id)
    .bind(user_id)
    .bind(session.date)
    .bind(Json(&session.pantry_snapshot))
    .bind(Json(&session.plan))
    .execute(db)
    .await?;
    Ok(())
}

/// Newest first.
pub async fn list_plans(db: &PgPool, user_id: Uuid) -> anyhow::Result<Vec<MealPlanSession>> {
    let rows = sqlx::query_as::<_, MealPlanRow>(
        r#"
        SELECT id, date, pantry_snapshot, plan
        FROM meal_plans
        WHERE user_id = $1
        ORDER BY created_at DESC
        "#,
    )
    .bind(user_id)
    .fetch_all(db)
    .await?;
    Ok(rows.into_iter().map(MealPlanSession::from).collect())
}
