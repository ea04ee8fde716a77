//! Pure target and ledger calculations. Nothing here touches storage,
//! the network or the clock.

pub mod ledger;
pub mod targets;
pub mod types;

pub use ledger::{
    aggregate, aggregate_range, calorie_progress, daily_breakdown, macro_progress,
    CalorieProgress, DateRange, DayCalories, MacroProgress,
};
pub use targets::{
    compute_daily_targets, BiometricProfile, BmrOffsets, DailyTargets, ExerciseAdjustmentPolicy,
    TargetSettings,
};
pub use types::{
    is_valid_body_fat, ActivityLevel, Goal, MealEntry, MealType, NutritionData, Sex, Totals,
};
