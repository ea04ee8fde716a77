use sqlx::FromRow;
use time::Date;
use uuid::Uuid;

use crate::nutrition::{MealEntry, NutritionData};

#[derive(Debug, Clone, FromRow)]
pub struct MealRow {
    pub id: Uuid,
    pub date: Date,
    pub time_of_day: String,
    pub meal_type: String,
    pub description: String,
    pub quantity: Option<String>,
    pub calories: f64,
    pub protein: f64,
    pub fat: f64,
    pub carbs: f64,
    pub sugar: f64,
}

impl TryFrom<MealRow> for MealEntry {
    type Error = anyhow::Error;

    fn try_from(r: MealRow) -> Result<Self, Self::Error> {
        Ok(Self {
            id: r.id,
            date: r.date,
            time: r.time_of_day,
            meal_type: r.meal_type.parse()?,
            description: r.description,
            quantity: r.quantity,
            nutrition: NutritionData {
                calories: r.calories,
                protein: r.protein,
                fat: r.fat,
                carbs: r.carbs,
                sugar: r.sugar,
            },
        })
    }
}
