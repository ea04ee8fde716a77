use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use time::OffsetDateTime;
use uuid::Uuid;

use crate::nutrition::{ActivityLevel, BiometricProfile, Goal, Sex};

/// Profile record in the database; categories are stored as text.
#[derive(Debug, Clone, FromRow)]
pub struct ProfileRow {
    pub user_id: Uuid,
    pub name: String,
    pub age_years: i32,
    pub height_cm: f64,
    pub weight_kg: f64,
    pub body_fat_pct: Option<f64>,
    pub sex: String,
    pub activity_level: String,
    pub goal: String,
    pub monthly_rate_kg: Option<f64>,
    pub allergies: String,
    pub intolerances: String,
    pub considerations: String,
    pub updated_at: OffsetDateTime,
}

/// A user's biometric and goal configuration. Always replaced as a whole.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Profile {
    pub name: String,
    pub age_years: u32,
    pub height_cm: f64,
    pub weight_kg: f64,
    pub body_fat_pct: Option<f64>,
    pub sex: Sex,
    pub activity_level: ActivityLevel,
    pub goal: Goal,
    pub monthly_rate_kg: Option<f64>,
    pub allergies: String,
    pub intolerances: String,
    pub considerations: String,
}

impl Profile {
    pub fn biometrics(&self) -> BiometricProfile {
        BiometricProfile {
            age_years: self.age_years,
            height_cm: self.height_cm,
            weight_kg: self.weight_kg,
            sex: self.sex,
            activity_level: self.activity_level,
            goal: self.goal,
            monthly_rate_kg: self.monthly_rate_kg,
        }
    }
}

impl TryFrom<ProfileRow> for Profile {
    type Error = anyhow::Error;

    fn try_from(r: ProfileRow) -> Result<Self, Self::Error> {
        Ok(Self {
            name: r.name,
            age_years: u32::try_from(r.age_years)?,
            height_cm: r.height_cm,
            weight_kg: r.weight_kg,
            body_fat_pct: r.body_fat_pct,
            sex: r.sex.parse()?,
            activity_level: r.activity_level.parse()?,
            goal: r.goal.parse()?,
            monthly_rate_kg: r.monthly_rate_kg,
            allergies: r.allergies,
            intolerances: r.intolerances,
            considerations: r.considerations,
        })
    }
}
