use serde::Deserialize;
use thiserror::Error;
use time::Date;

use crate::nutrition::is_valid_body_fat;
use crate::profile::Profile;

#[derive(Debug, Error, PartialEq)]
pub enum MeasurementValidationError {
    #[error("Weight must be a positive number")]
    NonPositiveWeight,
    #[error("Body fat must be between 0 and 100")]
    InvalidBodyFat,
    #[error("Circumference {0} must be a positive number")]
    NonPositiveCircumference(&'static str),
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreateMeasurementRequest {
    pub date: Date,
    pub weight_kg: f64,
    pub body_fat_pct: Option<f64>,
    pub neck: Option<f64>,
    pub chest: Option<f64>,
    pub arm: Option<f64>,
    pub waist: Option<f64>,
    pub hip: Option<f64>,
    pub thigh: Option<f64>,
}

/// A request that passed validation.
#[derive(Debug, Clone, PartialEq)]
pub struct NewMeasurement {
    pub date: Date,
    pub weight_kg: f64,
    pub body_fat_pct: Option<f64>,
    pub neck: Option<f64>,
    pub chest: Option<f64>,
    pub arm: Option<f64>,
    pub waist: Option<f64>,
    pub hip: Option<f64>,
    pub thigh: Option<f64>,
}

impl CreateMeasurementRequest {
    pub fn validate(self) -> Result<NewMeasurement, MeasurementValidationError> {
        if !(self.weight_kg.is_finite() && self.weight_kg > 0.0) {
            return Err(MeasurementValidationError::NonPositiveWeight);
        }
        if matches!(self.body_fat_pct, Some(bf) if !is_valid_body_fat(bf)) {
            return Err(MeasurementValidationError::InvalidBodyFat);
        }
        let circumferences = [
            ("neck", self.neck),
            ("chest", self.chest),
            ("arm", self.arm),
            ("waist", self.waist),
            ("hip", self.hip),
            ("thigh", self.thigh),
        ];
        for (name, value) in circumferences {
            if matches!(value, Some(v) if !(v.is_finite() && v > 0.0)) {
                return Err(MeasurementValidationError::NonPositiveCircumference(name));
            }
        }
        Ok(NewMeasurement {
            date: self.date,
            weight_kg: self.weight_kg,
            body_fat_pct: self.body_fat_pct,
            neck: self.neck,
            chest: self.chest,
            arm: self.arm,
            waist: self.waist,
            hip: self.hip,
            thigh: self.thigh,
        })
    }
}

impl NewMeasurement {
    /// Applies a same-day reading to the profile. Returns `None` when the
    /// measurement is not for `today`.
    pub fn mirrored_into(&self, profile: &Profile, today: Date) -> Option<Profile> {
        if self.date != today {
            return None;
        }
        Some(Profile {
            weight_kg: self.weight_kg,
            body_fat_pct: self.body_fat_pct.or(profile.body_fat_pct),
            ..profile.clone()
        })
    }
}

#[cfg(test)]
mod tests {
    use time::macros::date;

    use super::*;
    use crate::nutrition::{ActivityLevel, Goal, Sex};

    fn request() -> CreateMeasurementRequest {
        CreateMeasurementRequest {
            date: date!(2024 - 03 - 10),
            weight_kg: 68.4,
            body_fat_pct: None,
            neck: None,
            chest: None,
            arm: None,
            waist: Some(80.0),
            hip: None,
            thigh: None,
        }
    }

    fn profile() -> Profile {
        Profile {
            name: "Sam".into(),
            age_years: 30,
            height_cm: 175.0,
            weight_kg: 70.0,
            body_fat_pct: Some(20.0),
            sex: Sex::Male,
            activity_level: ActivityLevel::Moderate,
            goal: Goal::Lose,
            monthly_rate_kg: None,
            allergies: String::new(),
            intolerances: String::new(),
            considerations: String::new(),
        }
    }

    #[test]
    fn weight_must_be_positive() {
        let req = CreateMeasurementRequest { weight_kg: 0.0, ..request() };
        assert_eq!(req.validate(), Err(MeasurementValidationError::NonPositiveWeight));
        let req = CreateMeasurementRequest { weight_kg: f64::NAN, ..request() };
        assert_eq!(req.validate(), Err(MeasurementValidationError::NonPositiveWeight));
    }

    #[test]
    fn zero_body_fat_is_rejected() {
        let req = CreateMeasurementRequest { body_fat_pct: Some(0.0), ..request() };
        assert_eq!(req.validate(), Err(MeasurementValidationError::InvalidBodyFat));
        let req = CreateMeasurementRequest { body_fat_pct: Some(100.0), ..request() };
        assert_eq!(req.validate(), Err(MeasurementValidationError::InvalidBodyFat));
    }

    #[test]
    fn negative_circumference_names_the_field() {
        let req = CreateMeasurementRequest { hip: Some(-3.0), ..request() };
        assert_eq!(
            req.validate(),
            Err(MeasurementValidationError::NonPositiveCircumference("hip"))
        );
    }

    #[test]
    fn same_day_reading_replaces_weight_only() {
        let m = request().validate().unwrap();
        let updated = m.mirrored_into(&profile(), date!(2024 - 03 - 10)).unwrap();
        assert_eq!(updated.weight_kg, 68.4);
        assert_eq!(updated.body_fat_pct, Some(20.0));
        assert_eq!(updated.name, "Sam");
    }

    #[test]
    fn same_day_body_fat_is_mirrored_too() {
        let m = CreateMeasurementRequest { body_fat_pct: Some(18.5), ..request() }
            .validate()
            .unwrap();
        let updated = m.mirrored_into(&profile(), date!(2024 - 03 - 10)).unwrap();
        assert_eq!(updated.body_fat_pct, Some(18.5));
    }

    #[test]
    fn past_reading_leaves_profile_alone() {
        let m = request().validate().unwrap();
        assert!(m.mirrored_into(&profile(), date!(2024 - 03 - 11)).is_none());
    }
}
