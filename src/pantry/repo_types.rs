use serde::Serialize;
use sqlx::{types::Json, FromRow};
use time::Date;
use uuid::Uuid;

use crate::ai::GeneratedMealPlan;

#[derive(Debug, Clone, PartialEq, Serialize, FromRow)]
pub struct PantryItem {
    pub id: Uuid,
    pub name: String,
    pub category: String,
}

/// Stored plan; both payloads live in JSONB columns.
#[derive(Debug, Clone, FromRow)]
pub struct MealPlanRow {
    pub id: Uuid,
    pub date: Date,
    pub pantry_snapshot: Json<Vec<String>>,
    pub plan: Json<GeneratedMealPlan>,
}

/// One menu generation together with the pantry it was built from.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MealPlanSession {
    pub id: Uuid,
    pub date: Date,
    pub pantry_snapshot: Vec<String>,
    pub plan: GeneratedMealPlan,
}

impl From<MealPlanRow> for MealPlanSession {
    fn from(row: MealPlanRow) -> Self {
        Self {
            id: row.id,
            date: row.date,
            pantry_snapshot: row.pantry_snapshot.0,
            plan: row.plan.0,
        }
    }
}
