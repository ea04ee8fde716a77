use sqlx::PgPool;
use uuid::Uuid;

use super::repo_types::{Profile, ProfileRow};

pub async fn find(db: &PgPool, user_id: Uuid) -> anyhow::Result<Option<Profile>> {
    let row = sqlx::query_as::<_, ProfileRow>(
        r#"
        SELECT user_id, name, age_years, height_cm, weight_kg, body_fat_pct, sex,
               activity_level, goal, monthly_rate_kg, allergies, intolerances,
               considerations, updated_at
        FROM profiles
        WHERE user_id = $1
        "#,
    )
    .bind(user_id)
    .fetch_optional(db)
    .await?;
    row.map(Profile::try_from).transpose()
}

/// Inserts or wholesale-replaces the user's profile.
pub async fn upsert(db: &PgPool, user_id: Uuid, p: &Profile) -> anyhow::Result<()> {
    sqlx::query(
        r#"
        INSERT INTO profiles (user_id, name, age_years, height_cm, weight_kg, body_fat_pct,
                              sex, activity_level, goal, monthly_rate_kg, allergies,
                              intolerances, considerations, updated_at)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, now())
        ON CONFLICT (user_id) DO UPDATE SET
            name = EXCLUDED.name,
            age_years = EXCLUDED.age_years,
            height_cm = EXCLUDED.height_cm,
            weight_kg = EXCLUDED.weight_kg,
            body_fat_pct = EXCLUDED.body_fat_pct,
            sex = EXCLUDED.sex,
            activity_level = EXCLUDED.activity_level,
            goal = EXCLUDED.goal,
            monthly_rate_kg = EXCLUDED.monthly_rate_kg,
            allergies = EXCLUDED.allergies,
            intolerances = EXCLUDED.intolerances,
            considerations = EXCLUDED.considerations,
            updated_at = now()
        "#,
    )
    .bind(user_id)
    .bind(&p.name)
    .bind(i32::try_from(p.age_years)?)
    .bind(p.height_cm)
    .bind(p.weight_kg)
    .bind(p.body_fat_pct)
    .bind(p.sex.as_str())
    .bind(p.activity_level.as_str())
    .bind(p.goal.as_str())
    .bind(p.monthly_rate_kg)
    .bind(&p.allergies)
    .bind(&p.intolerances)
    .bind(&p.considerations)
    .execute(db)
    .await?;
    Ok(())
}
