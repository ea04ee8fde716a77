use time::Date;
use tracing::{info, warn};
use uuid::Uuid;

use super::{
    dto::{
        normalize_quantity, validate_description, validate_time, CreateMealRequest,
        MealValidationError, UpdateMealRequest,
    },
    repo,
};
use crate::ai::AiClient;
use crate::nutrition::{MealEntry, NutritionData};
use crate::state::AppState;

#[derive(Debug, thiserror::Error)]
pub enum MealError {
    #[error(transparent)]
    Invalid(#[from] MealValidationError),
    #[error("Meal not found")]
    NotFound,
    #[error(transparent)]
    Storage(#[from] anyhow::Error),
}

/// Asks the estimator for nutrition; any failure is logged and recorded as zero.
pub async fn estimate_nutrition(ai: &dyn AiClient, prompt: &str) -> NutritionData {
    match ai.analyze_meal(prompt).await {
        Ok(data) => data.sanitized(),
        Err(e) => {
            warn!(error = %e, "meal estimation failed; storing zero nutrition");
            NutritionData::ZERO
        }
    }
}

pub async fn create_entry(
    st: &AppState,
    user_id: Uuid,
    req: CreateMealRequest,
) -> Result<MealEntry, MealError> {
    validate_time(&req.time)?;
    let description = validate_description(&req.description)?;

    let mut entry = MealEntry {
        id: Uuid::new_v4(),
        date: req.date,
        time: req.time,
        meal_type: req.meal_type,
        description,
        quantity: normalize_quantity(req.quantity.as_deref()),
        nutrition: NutritionData::ZERO,
    };
    entry.nutrition = estimate_nutrition(st.ai.as_ref(), &entry.estimation_prompt()).await;
    repo::insert(&st.db, user_id, &entry).await?;
    info!(%user_id, meal_id = %entry.id, calories = entry.nutrition.calories, "meal logged");
    Ok(entry)
}

/// Applies the edit to `current`; the returned flag says whether the
/// description or portion changed and nutrition must be estimated again.
pub fn apply_update(
    mut current: MealEntry,
    req: UpdateMealRequest,
) -> Result<(MealEntry, bool), MealValidationError> {
    if let Some(date) = req.date {
        current.date = date;
    }
    if let Some(time) = req.time {
        validate_time(&time)?;
        current.time = time;
    }
    if let Some(meal_type) = req.meal_type {
        current.meal_type = meal_type;
    }
    let mut reestimate = false;
    if let Some(description) = req.description {
        let description = validate_description(&description)?;
        if description != current.description {
            current.description = description;
            reestimate = true;
        }
    }
    if let Some(quantity) = req.quantity {
        let quantity = normalize_quantity(Some(&quantity));
        if quantity != current.quantity {
            current.quantity = quantity;
            reestimate = true;
        }
    }
    Ok((current, reestimate))
}

pub async fn update_entry(
    st: &AppState,
    user_id: Uuid,
    id: Uuid,
    req: UpdateMealRequest,
) -> Result<MealEntry, MealError> {
    let current = repo::find(&st.db, user_id, id)
        .await?
        .ok_or(MealError::NotFound)?;
    let (mut entry, reestimate) = apply_update(current, req)?;
    if reestimate {
        entry.nutrition = estimate_nutrition(st.ai.as_ref(), &entry.estimation_prompt()).await;
    }
    if !repo::update(&st.db, user_id, &entry).await? {
        return Err(MealError::NotFound);
    }
    Ok(entry)
}

pub fn days_logged(entries: &[MealEntry]) -> usize {
    let mut dates: Vec<Date> = entries.iter().map(|e| e.date).collect();
    dates.sort();
    dates.dedup();
    dates.len()
}

#[cfg(test)]
mod tests {
    use time::macros::date;

    use super::*;
    use crate::nutrition::MealType;
    use crate::state::testing::FakeAi;

    fn entry() -> MealEntry {
        MealEntry {
            id: Uuid::new_v4(),
            date: date!(2024 - 01 - 01),
            time: "08:00".into(),
            meal_type: MealType::Breakfast,
            description: "toast".into(),
            quantity: Some("2 slices".into()),
            nutrition: NutritionData { calories: 200.0, ..NutritionData::ZERO },
        }
    }

    #[tokio::test]
    async fn estimation_passes_through_success() {
        let ai = FakeAi::default();
        assert_eq!(estimate_nutrition(&ai, "rice").await, FakeAi::MEAL);
    }

    #[tokio::test]
    async fn estimation_failure_becomes_zero() {
        let ai = FakeAi::failing();
        assert_eq!(estimate_nutrition(&ai, "rice").await, NutritionData::ZERO);
    }

    #[test]
    fn changing_description_requests_reestimate() {
        let req = UpdateMealRequest {
            description: Some(" jam toast ".into()),
            ..UpdateMealRequest::default()
        };
        let (updated, reestimate) = apply_update(entry(), req).unwrap();
        assert!(reestimate);
        assert_eq!(updated.description, "jam toast");
    }

    #[test]
    fn same_description_keeps_nutrition() {
        let req = UpdateMealRequest {
            description: Some("toast".into()),
            time: Some("09:15".into()),
            meal_type: Some(MealType::Snack),
            date: Some(date!(2024 - 01 - 02)),
            quantity: None,
        };
        let (updated, reestimate) = apply_update(entry(), req).unwrap();
        assert!(!reestimate);
        assert_eq!(updated.time, "09:15");
        assert_eq!(updated.meal_type, MealType::Snack);
        assert_eq!(updated.date, date!(2024 - 01 - 02));
        assert_eq!(updated.nutrition.calories, 200.0);
    }

    #[test]
    fn edited_description_keeps_portion_in_prompt() {
        let req = UpdateMealRequest {
            description: Some("jam toast".into()),
            ..UpdateMealRequest::default()
        };
        let (updated, reestimate) = apply_update(entry(), req).unwrap();
        assert!(reestimate);
        assert_eq!(updated.estimation_prompt(), "2 slices of jam toast");
    }

    #[test]
    fn changing_portion_requests_reestimate() {
        let req = UpdateMealRequest {
            quantity: Some(" 4 slices ".into()),
            ..UpdateMealRequest::default()
        };
        let (updated, reestimate) = apply_update(entry(), req).unwrap();
        assert!(reestimate);
        assert_eq!(updated.estimation_prompt(), "4 slices of toast");

        let req = UpdateMealRequest {
            quantity: Some(String::new()),
            ..UpdateMealRequest::default()
        };
        let (cleared, reestimate) = apply_update(entry(), req).unwrap();
        assert!(reestimate);
        assert_eq!(cleared.quantity, None);
        assert_eq!(cleared.estimation_prompt(), "toast");
    }

    #[test]
    fn bad_time_in_update_is_rejected() {
        let req = UpdateMealRequest {
            time: Some("25:00".into()),
            ..UpdateMealRequest::default()
        };
        assert_eq!(apply_update(entry(), req).unwrap_err(), MealValidationError::InvalidTime);
    }

    #[test]
    fn counts_distinct_days() {
        let mut a = entry();
        let b = entry();
        let mut c = entry();
        a.date = date!(2024 - 01 - 03);
        c.date = date!(2024 - 01 - 03);
        assert_eq!(days_logged(&[a, b, c]), 2);
        assert_eq!(days_logged(&[]), 0);
    }
}
