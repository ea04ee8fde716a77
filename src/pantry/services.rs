use time::OffsetDateTime;
use tracing::info;
use uuid::Uuid;

use super::{repo, repo_types::MealPlanSession};
use crate::ai::{AiError, MenuContext};
use crate::profile::services::targets_for;
use crate::state::AppState;

#[derive(Debug, thiserror::Error)]
pub enum PlanError {
    #[error("Pantry is empty; add some items first")]
    EmptyPantry,
    #[error("menu generation failed: {0}")]
    Ai(#[from] AiError),
    #[error(transparent)]
    Storage(#[from] anyhow::Error),
}

/// Builds a menu from the current pantry and stores it in the history.
pub async fn generate_plan(st: &AppState, user_id: Uuid) -> Result<MealPlanSession, PlanError> {
    let items = repo::list_items(&st.db, user_id).await?;
    if items.is_empty() {
        return Err(PlanError::EmptyPantry);
    }
    let pantry: Vec<String> = items.into_iter().map(|i| i.name).collect();

    let today = OffsetDateTime::now_utc().date();
    let (profile, targets) = match targets_for(&st.db, &st.config.targets, user_id, today).await? {
        Some((p, t)) => (Some(p), Some(t)),
        None => (None, None),
    };

    let ctx = MenuContext {
        pantry: pantry.clone(),
        profile,
        targets,
    };
    let plan = st.ai.generate_menu(&ctx).await?;

    let session = MealPlanSession {
        id: Uuid::new_v4(),
        date: today,
        pantry_snapshot: pantry,
        plan,
    };
    repo::insert_plan(&st.db, user_id, &session).await?;
    info!(%user_id, plan_id = %session.id, items = session.pantry_snapshot.len(), "meal plan generated");
    Ok(session)
}
