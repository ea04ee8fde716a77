use serde::Deserialize;
use time::Date;

use super::repo_types::Profile;
use crate::nutrition::{is_valid_body_fat, ActivityLevel, Goal, Sex};

#[derive(Debug, thiserror::Error, PartialEq)]
pub enum ProfileValidationError {
    #[error("Age must be greater than zero")]
    NonPositiveAge,
    #[error("Height must be a positive number of centimetres")]
    NonPositiveHeight,
    #[error("Weight must be a positive number of kilograms")]
    NonPositiveWeight,
    #[error("Monthly rate of change must be a positive number of kilograms")]
    InvalidMonthlyRate,
    #[error("Body fat must be between 0 and 100 percent")]
    InvalidBodyFat,
}

/// Body of `PUT /profile`.
#[derive(Debug, Deserialize)]
pub struct ProfileRequest {
    #[serde(default)]
    pub name: String,
    pub age_years: u32,
    pub height_cm: f64,
    pub weight_kg: f64,
    pub body_fat_pct: Option<f64>,
    pub sex: Sex,
    pub activity_level: ActivityLevel,
    pub goal: Goal,
    pub monthly_rate_kg: Option<f64>,
    #[serde(default)]
    pub allergies: String,
    #[serde(default)]
    pub intolerances: String,
    #[serde(default)]
    pub considerations: String,
}

fn positive(v: f64) -> bool {
    v.is_finite() && v > 0.0
}

impl ProfileRequest {
    pub fn validate(self) -> Result<Profile, ProfileValidationError> {
        if self.age_years == 0 {
            return Err(ProfileValidationError::NonPositiveAge);
        }
        if !positive(self.height_cm) {
            return Err(ProfileValidationError::NonPositiveHeight);
        }
        if !positive(self.weight_kg) {
            return Err(ProfileValidationError::NonPositiveWeight);
        }
        if matches!(self.monthly_rate_kg, Some(r) if !positive(r)) {
            return Err(ProfileValidationError::InvalidMonthlyRate);
        }
        if matches!(self.body_fat_pct, Some(f) if !is_valid_body_fat(f)) {
            return Err(ProfileValidationError::InvalidBodyFat);
        }
        Ok(Profile {
            name: self.name.trim().to_string(),
            age_years: self.age_years,
            height_cm: self.height_cm,
            weight_kg: self.weight_kg,
            body_fat_pct: self.body_fat_pct,
            sex: self.sex,
            activity_level: self.activity_level,
            goal: self.goal,
            monthly_rate_kg: self.monthly_rate_kg,
            allergies: self.allergies.trim().to_string(),
            intolerances: self.intolerances.trim().to_string(),
            considerations: self.considerations.trim().to_string(),
        })
    }
}

#[derive(Debug, Deserialize)]
pub struct TargetsQuery {
    pub date: Option<Date>,
}
