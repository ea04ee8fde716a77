use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign};
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use time::Date;
use uuid::Uuid;

/// Macronutrient content of one logged meal, as returned by the estimator.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct NutritionData {
    pub calories: f64,
    pub protein: f64,
    pub fat: f64,
    pub carbs: f64,
    pub sugar: f64,
}

/// Summed nutrition over a day or a period.
pub type Totals = NutritionData;

impl NutritionData {
    pub const ZERO: NutritionData = NutritionData {
        calories: 0.0,
        protein: 0.0,
        fat: 0.0,
        carbs: 0.0,
        sugar: 0.0,
    };

    /// Replaces negative and non-finite values with zero.
    pub fn sanitized(self) -> Self {
        fn clean(v: f64) -> f64 {
            if v.is_finite() && v > 0.0 {
                v
            } else {
                0.0
            }
        }
        Self {
            calories: clean(self.calories),
            protein: clean(self.protein),
            fat: clean(self.fat),
            carbs: clean(self.carbs),
            sugar: clean(self.sugar),
        }
    }
}

impl Add for NutritionData {
    type Output = NutritionData;

    fn add(self, rhs: Self) -> Self::Output {
        Self {
            calories: self.calories + rhs.calories,
            protein: self.protein + rhs.protein,
            fat: self.fat + rhs.fat,
            carbs: self.carbs + rhs.carbs,
            sugar: self.sugar + rhs.sugar,
        }
    }
}

impl AddAssign for NutritionData {
    fn add_assign(&mut self, rhs: Self) {
        *self = *self + rhs;
    }
}

impl Sum for NutritionData {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(NutritionData::ZERO, Add::add)
    }
}

impl<'a> Sum<&'a NutritionData> for NutritionData {
    fn sum<I: Iterator<Item = &'a NutritionData>>(iter: I) -> Self {
        iter.copied().sum()
    }
}

/// Returned when a stored or submitted category name is not recognised.
/// Body fat readings are accepted strictly between 0 and 100 percent.
pub fn is_valid_body_fat(pct: f64) -> bool {
    pct.is_finite() && pct > 0.0 && pct < 100.0
}

#[derive(Debug, thiserror::Error)]
#[error("unknown {kind}: {value}")]
pub struct UnknownVariant {
    pub kind: &'static str,
    pub value: String,
}

macro_rules! string_enum {
    ($name:ident, $kind:literal, { $($variant:ident => $text:literal),+ $(,)? }) => {
        impl $name {
            pub fn as_str(self) -> &'static str {
                match self {
                    $($name::$variant => $text),+
                }
            }
        }

        impl FromStr for $name {
            type Err = UnknownVariant;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($text => Ok($name::$variant),)+
                    other => Err(UnknownVariant {
                        kind: $kind,
                        value: other.to_string(),
                    }),
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MealType {
    Breakfast,
    Lunch,
    Dinner,
    Snack,
}

string_enum!(MealType, "meal type", {
    Breakfast => "breakfast",
    Lunch => "lunch",
    Dinner => "dinner",
    Snack => "snack",
});

/// Only used to pick the BMR offset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Sex {
    Male,
    Female,
    Other,
}

string_enum!(Sex, "sex", {
    Male => "male",
    Female => "female",
    Other => "other",
});

/// Five ordered tiers, least to most active.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActivityLevel {
    Sedentary,
    Light,
    Moderate,
    Intense,
    Athlete,
}

string_enum!(ActivityLevel, "activity level", {
    Sedentary => "sedentary",
    Light => "light",
    Moderate => "moderate",
    Intense => "intense",
    Athlete => "athlete",
});

impl ActivityLevel {
    pub const ALL: [ActivityLevel; 5] = [
        ActivityLevel::Sedentary,
        ActivityLevel::Light,
        ActivityLevel::Moderate,
        ActivityLevel::Intense,
        ActivityLevel::Athlete,
    ];

    /// TDEE multiplier for this tier.
    pub fn multiplier(self) -> f64 {
        match self {
            ActivityLevel::Sedentary => 1.20,
            ActivityLevel::Light => 1.375,
            ActivityLevel::Moderate => 1.55,
            ActivityLevel::Intense => 1.725,
            ActivityLevel::Athlete => 1.90,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Goal {
    Lose,
    Maintain,
    Gain,
}

string_enum!(Goal, "goal", {
    Lose => "lose",
    Maintain => "maintain",
    Gain => "gain",
});

/// One logged ingestion event. Nutrition is always present; a failed
/// estimate is stored as [`NutritionData::ZERO`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MealEntry {
    pub id: Uuid,
    pub date: Date,
    pub time: String,
    pub meal_type: MealType,
    pub description: String,
    /// Free-text portion, e.g. "200 g".
    #[serde(default)]
    pub quantity: Option<String>,
    pub nutrition: NutritionData,
}

impl MealEntry {
    /// Text sent to the estimator; the portion is part of it when known.
    pub fn estimation_prompt(&self) -> String {
        match self.quantity.as_deref() {
            Some(q) => format!("{} of {}", q, self.description),
            None => self.description.clone(),
        }
    }
}
