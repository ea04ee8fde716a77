use time::OffsetDateTime;
use tracing::info;
use uuid::Uuid;

use super::dto::AdviceRequest;
use crate::ai::{prompts, AiClient, AiError, CoachContext};
use crate::profile::services::targets_for;
use crate::state::AppState;
use crate::{meals, measurements};

#[derive(Debug, thiserror::Error)]
pub enum CoachError {
    #[error("Profile not found; set up a profile before asking for advice")]
    NoProfile,
    #[error("coaching failed: {0}")]
    Ai(#[from] AiError),
    #[error(transparent)]
    Storage(#[from] anyhow::Error),
}

pub async fn gather_context(
    st: &AppState,
    user_id: Uuid,
    req: &AdviceRequest,
) -> Result<CoachContext, CoachError> {
    let date = req.date.unwrap_or_else(|| OffsetDateTime::now_utc().date());
    let (profile, targets) = targets_for(&st.db, &st.config.targets, user_id, date)
        .await?
        .ok_or(CoachError::NoProfile)?;

    let meals = match req.date {
        Some(d) => meals::repo::list_by_date(&st.db, user_id, d).await?,
        None => {
            meals::repo::list_recent(&st.db, user_id, prompts::COACH_MEAL_WINDOW as i64).await?
        }
    };
    let measurements = measurements::repo::list_recent(
        &st.db,
        user_id,
        prompts::COACH_MEASUREMENT_WINDOW as i64,
    )
    .await?;

    Ok(CoachContext {
        profile,
        targets: Some(targets),
        meals,
        measurements,
    })
}

pub async fn advise(ai: &dyn AiClient, ctx: &CoachContext) -> Result<String, CoachError> {
    let advice = ai.coach_advice(ctx).await?;
    info!(meals = ctx.meals.len(), chars = advice.len(), "coach advice generated");
    Ok(advice)
}
