use sqlx::PgPool;
use time::Date;
use uuid::Uuid;

use super::{repo, repo_types::Profile};
use crate::journal;
use crate::nutrition::{compute_daily_targets, DailyTargets, TargetSettings};

/// Targets for `date`, or `None` when the user has not set up a profile.
pub async fn targets_for(
    db: &PgPool,
    settings: &TargetSettings,
    user_id: Uuid,
    date: Date,
) -> anyhow::Result<Option<(Profile, DailyTargets)>> {
    let Some(profile) = repo::find(db, user_id).await? else {
        return Ok(None);
    };
    let exercised = journal::repo::is_exercise_day(db, user_id, date).await?;
    let targets = compute_daily_targets(&profile.biometrics(), exercised, settings);
    Ok(Some((profile, targets)))
}
