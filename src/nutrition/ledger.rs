//! Roll-ups of logged meals and their comparison against daily targets.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use time::Date;

use super::targets::DailyTargets;
use super::types::{MealEntry, Totals};

/// Inclusive calendar range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    pub from: Date,
    pub to: Date,
}

impl DateRange {
    pub fn new(from: Date, to: Date) -> Self {
        Self { from, to }
    }

    pub fn single(date: Date) -> Self {
        Self { from: date, to: date }
    }

    pub fn contains(&self, date: Date) -> bool {
        self.from <= date && date <= self.to
    }
}

/// Sum of every entry logged on exactly `date`.
pub fn aggregate(entries: &[MealEntry], date: Date) -> Totals {
    entries
        .iter()
        .filter(|e| e.date == date)
        .map(|e| e.nutrition)
        .sum()
}

pub fn aggregate_range(entries: &[MealEntry], range: &DateRange) -> Totals {
    entries
        .iter()
        .filter(|e| range.contains(e.date))
        .map(|e| e.nutrition)
        .sum()
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CalorieProgress {
    /// Share of the target consumed, capped at 100 for display.
    pub percent_of_target: f64,
    pub remaining: f64,
    pub exceeded: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MacroStatus {
    pub consumed: f64,
    pub target: f64,
    pub percent: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MacroProgress {
    pub protein: MacroStatus,
    pub fat: MacroStatus,
    pub carbs: MacroStatus,
}

fn capped_percent(consumed: f64, target: f64) -> f64 {
    if target > 0.0 {
        (100.0 * consumed / target).min(100.0)
    } else if consumed > 0.0 {
        100.0
    } else {
        0.0
    }
}

pub fn calorie_progress(totals: &Totals, targets: &DailyTargets) -> CalorieProgress {
    CalorieProgress {
        percent_of_target: capped_percent(totals.calories, targets.target_calories),
        remaining: (targets.target_calories - totals.calories).max(0.0),
        exceeded: totals.calories > targets.target_calories,
    }
}

pub fn macro_progress(totals: &Totals, targets: &DailyTargets) -> MacroProgress {
    let status = |consumed: f64, target: f64| MacroStatus {
        consumed,
        target,
        percent: capped_percent(consumed, target),
    };
    MacroProgress {
        protein: status(totals.protein, targets.protein_g),
        fat: status(totals.fat, targets.fat_g),
        carbs: status(totals.carbs, targets.carbs_g),
    }
}

/// Per-day calorie total for a calendar view.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DayCalories {
    pub date: Date,
    pub calories: f64,
    pub meal_count: usize,
}

/// One row per day in `range` that has at least one entry, oldest first.
pub fn daily_breakdown(entries: &[MealEntry], range: &DateRange) -> Vec<DayCalories> {
    let mut days: BTreeMap<Date, (f64, usize)> = BTreeMap::new();
    for e in entries.iter().filter(|e| range.contains(e.date)) {
        let day = days.entry(e.date).or_insert((0.0, 0));
        day.0 += e.nutrition.calories;
        day.1 += 1;
    }
    days.into_iter()
        .map(|(date, (calories, meal_count))| DayCalories {
            date,
            calories,
            meal_count,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use time::macros::date;
    use uuid::Uuid;

    use super::*;
    use crate::nutrition::types::{MealType, NutritionData};

    fn entry(date: Date, calories: f64, protein: f64, fat: f64, carbs: f64, sugar: f64) -> MealEntry {
        MealEntry {
            id: Uuid::new_v4(),
            date,
            time: "12:00".into(),
            meal_type: MealType::Lunch,
            description: "test".into(),
            quantity: None,
            nutrition: NutritionData { calories, protein, fat, carbs, sugar },
        }
    }

    fn targets(target_calories: f64) -> DailyTargets {
        DailyTargets {
            bmr: 1500.0,
            tdee: 2000.0,
            activity_multiplier: 1.2,
            target_calories,
            protein_g: 150.0,
            fat_g: 60.0,
            carbs_g: 200.0,
            is_safe_limited: false,
            is_exercise_day: false,
        }
    }

    #[test]
    fn two_meals_on_the_same_day() {
        let day = date!(2024 - 01 - 01);
        let entries = vec![
            entry(day, 500.0, 30.0, 10.0, 60.0, 5.0),
            entry(day, 300.0, 20.0, 5.0, 40.0, 2.0),
        ];
        assert_eq!(
            aggregate(&entries, day),
            NutritionData { calories: 800.0, protein: 50.0, fat: 15.0, carbs: 100.0, sugar: 7.0 }
        );
    }

    #[test]
    fn empty_ledger_is_zero() {
        assert_eq!(aggregate(&[], date!(2024 - 01 - 01)), NutritionData::ZERO);
    }

    #[test]
    fn other_dates_do_not_contribute() {
        let day = date!(2024 - 03 - 10);
        let entries = vec![
            entry(day, 400.0, 1.0, 1.0, 1.0, 1.0),
            entry(date!(2024 - 03 - 09), 900.0, 9.0, 9.0, 9.0, 9.0),
            entry(date!(2024 - 03 - 11), 700.0, 7.0, 7.0, 7.0, 7.0),
        ];
        assert_eq!(aggregate(&entries, day).calories, 400.0);
    }

    #[test]
    fn aggregation_is_additive_over_single_entries() {
        let day = date!(2024 - 05 - 05);
        let entries = vec![
            entry(day, 120.0, 3.0, 4.0, 20.0, 9.0),
            entry(day, 0.0, 0.0, 0.0, 0.0, 0.0),
            entry(date!(2024 - 05 - 06), 999.0, 9.0, 9.0, 9.0, 9.0),
            entry(day, 640.5, 41.0, 22.5, 60.0, 3.5),
        ];
        let pairwise: Totals = entries
            .iter()
            .filter(|e| e.date == day)
            .map(|e| aggregate(std::slice::from_ref(e), day))
            .sum();
        assert_eq!(aggregate(&entries, day), pairwise);
    }

    #[test]
    fn range_is_inclusive() {
        let entries = vec![
            entry(date!(2024 - 02 - 01), 100.0, 0.0, 0.0, 0.0, 0.0),
            entry(date!(2024 - 02 - 03), 200.0, 0.0, 0.0, 0.0, 0.0),
            entry(date!(2024 - 02 - 04), 400.0, 0.0, 0.0, 0.0, 0.0),
        ];
        let range = DateRange::new(date!(2024 - 02 - 01), date!(2024 - 02 - 03));
        assert_eq!(aggregate_range(&entries, &range).calories, 300.0);
        assert_eq!(
            aggregate_range(&entries, &DateRange::single(date!(2024 - 02 - 04))).calories,
            400.0
        );
    }

    #[test]
    fn progress_under_target() {
        let totals = NutritionData { calories: 500.0, ..NutritionData::ZERO };
        let p = calorie_progress(&totals, &targets(2000.0));
        assert_eq!(p.percent_of_target, 25.0);
        assert_eq!(p.remaining, 1500.0);
        assert!(!p.exceeded);
    }

    #[test]
    fn progress_over_target_is_capped() {
        let totals = NutritionData { calories: 2500.0, ..NutritionData::ZERO };
        let p = calorie_progress(&totals, &targets(2000.0));
        assert_eq!(p.percent_of_target, 100.0);
        assert_eq!(p.remaining, 0.0);
        assert!(p.exceeded);
    }

    #[test]
    fn exactly_on_target_is_not_exceeded() {
        let totals = NutritionData { calories: 2000.0, ..NutritionData::ZERO };
        let p = calorie_progress(&totals, &targets(2000.0));
        assert_eq!(p.percent_of_target, 100.0);
        assert!(!p.exceeded);
    }

    #[test]
    fn zero_target_does_not_divide_by_zero() {
        let p = calorie_progress(&NutritionData::ZERO, &targets(0.0));
        assert_eq!(p.percent_of_target, 0.0);
        let macros = macro_progress(
            &NutritionData { carbs: 10.0, ..NutritionData::ZERO },
            &DailyTargets { carbs_g: 0.0, ..targets(1800.0) },
        );
        assert_eq!(macros.carbs.percent, 100.0);
    }

    #[test]
    fn macro_percentages() {
        let totals = NutritionData { calories: 0.0, protein: 75.0, fat: 90.0, carbs: 50.0, sugar: 0.0 };
        let m = macro_progress(&totals, &targets(2000.0));
        assert_eq!(m.protein.percent, 50.0);
        assert_eq!(m.fat.percent, 100.0);
        assert_eq!(m.carbs.percent, 25.0);
        assert_eq!(m.fat.consumed, 90.0);
        assert_eq!(m.fat.target, 60.0);
    }

    #[test]
    fn breakdown_groups_by_day_in_order() {
        let entries = vec![
            entry(date!(2024 - 04 - 03), 300.0, 0.0, 0.0, 0.0, 0.0),
            entry(date!(2024 - 04 - 01), 100.0, 0.0, 0.0, 0.0, 0.0),
            entry(date!(2024 - 04 - 03), 250.0, 0.0, 0.0, 0.0, 0.0),
            entry(date!(2024 - 05 - 01), 999.0, 0.0, 0.0, 0.0, 0.0),
        ];
        let range = DateRange::new(date!(2024 - 04 - 01), date!(2024 - 04 - 30));
        let days = daily_breakdown(&entries, &range);
        assert_eq!(
            days,
            vec![
                DayCalories { date: date!(2024 - 04 - 01), calories: 100.0, meal_count: 1 },
                DayCalories { date: date!(2024 - 04 - 03), calories: 550.0, meal_count: 2 },
            ]
        );
    }
}
