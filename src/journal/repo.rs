use serde::Serialize;
use sqlx::{FromRow, PgPool};
use time::Date;
use uuid::Uuid;

/// Per-date state the user sets by hand.
#[derive(Debug, Clone, Default, PartialEq, Serialize, FromRow)]
pub struct DayLog {
    pub exercise_day: bool,
    pub note: String,
}

/// Missing rows read as a rest day with no note.
pub async fn find(db: &PgPool, user_id: Uuid, date: Date) -> anyhow::Result<DayLog> {
    let row = sqlx::query_as::<_, DayLog>(
        r#"
        SELECT exercise_day, note
        FROM day_logs
        WHERE user_id = $1 AND date = $2
        "#,
    )
    .bind(user_id)
    .bind(date)
    .fetch_optional(db)
    .await?;
    Ok(row.unwrap_or_default())
}

pub async fn is_exercise_day(db: &PgPool, user_id: Uuid, date: Date) -> anyhow::Result<bool> {
    Ok(find(db, user_id, date).await?.exercise_day)
}

/// Flips the flag and returns its new value.
pub async fn toggle_exercise(db: &PgPool, user_id: Uuid, date: Date) -> anyhow::Result<bool> {
    let exercised: bool = sqlx::query_scalar(
        r#"
        INSERT INTO day_logs (user_id, date, exercise_day)
        VALUES ($1, $2, TRUE)
        ON CONFLICT (user_id, date)
        DO UPDATE SET exercise_day = NOT day_logs.exercise_day
        RETURNING exercise_day
        "#,
    )
    .bind(user_id)
    .bind(date)
    .fetch_one(db)
    .await?;
    Ok(exercised)
}

pub async fn set_note(db: &PgPool, user_id: Uuid, date: Date, note: &str) -> anyhow::Result<()> {
    sqlx::query(
        r#"
        INSERT INTO day_logs (user_id, date, note)
        VALUES ($1, $2, $3)
        ON CONFLICT (user_id, date)
        DO UPDATE SET note = EXCLUDED.note
        "#,
    )
    .bind(user_id)
    .bind(date)
    .bind(note)
    .execute(db)
    .await?;
    Ok(())
}
