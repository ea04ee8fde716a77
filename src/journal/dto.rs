use serde::{Deserialize, Serialize};
use time::Date;

use crate::nutrition::{
    aggregate, calorie_progress, macro_progress, CalorieProgress, DailyTargets, MacroProgress,
    MealEntry, Totals,
};

#[derive(Debug, Deserialize)]
pub struct NoteRequest {
    pub content: String,
}

#[derive(Debug, Serialize)]
pub struct NoteResponse {
    pub date: Date,
    pub note: String,
}

#[derive(Debug, Serialize)]
pub struct ExerciseResponse {
    pub date: Date,
    pub exercise_day: bool,
}

/// Everything the dashboard shows for one day.
#[derive(Debug, Serialize)]
pub struct DaySummary {
    pub date: Date,
    pub exercise_day: bool,
    pub note: String,
    pub meals: Vec<MealEntry>,
    pub totals: Totals,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub targets: Option<DailyTargets>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub calories: Option<CalorieProgress>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub macros: Option<MacroProgress>,
}

impl DaySummary {
    pub fn build(
        date: Date,
        exercise_day: bool,
        note: String,
        meals: Vec<MealEntry>,
        targets: Option<DailyTargets>,
    ) -> Self {
        let totals = aggregate(&meals, date);
        Self {
            date,
            exercise_day,
            note,
            totals,
            calories: targets.as_ref().map(|t| calorie_progress(&totals, t)),
            macros: targets.as_ref().map(|t| macro_progress(&totals, t)),
            targets,
            meals,
        }
    }
}
