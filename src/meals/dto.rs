use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};
use time::Date;

use crate::nutrition::{DateRange, MealType, Totals};

lazy_static! {
    static ref TIME_OF_DAY_RE: Regex = Regex::new(r"^([01]\d|2[0-3]):[0-5]\d$").unwrap();
}

#[derive(Debug, thiserror::Error, PartialEq)]
pub enum MealValidationError {
    #[error("Description cannot be empty")]
    EmptyDescription,
    #[error("Time must be HH:MM (24h)")]
    InvalidTime,
    #[error("Range start must not be after its end")]
    InvertedRange,
    #[error("Either date or from/to is required")]
    MissingDate,
}

pub fn validate_time(time: &str) -> Result<(), MealValidationError> {
    if TIME_OF_DAY_RE.is_match(time) {
        Ok(())
    } else {
        Err(MealValidationError::InvalidTime)
    }
}

pub fn validate_description(description: &str) -> Result<String, MealValidationError> {
    let trimmed = description.trim();
    if trimmed.is_empty() {
        return Err(MealValidationError::EmptyDescription);
    }
    Ok(trimmed.to_string())
}

/// `?date=` for one day or `?from=&to=` for an inclusive range.
#[derive(Debug, Deserialize)]
pub struct DateQuery {
    pub date: Option<Date>,
    pub from: Option<Date>,
    pub to: Option<Date>,
}

impl DateQuery {
    pub fn range(&self) -> Result<DateRange, MealValidationError> {
        match (self.date, self.from, self.to) {
            (Some(d), None, None) => Ok(DateRange::single(d)),
            (None, Some(from), Some(to)) if from <= to => Ok(DateRange::new(from, to)),
            (None, Some(_), Some(_)) => Err(MealValidationError::InvertedRange),
            _ => Err(MealValidationError::MissingDate),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct CreateMealRequest {
    pub date: Date,
    pub time: String,
    pub meal_type: MealType,
    pub description: String,
    /// Free-text portion, e.g. "200 g".
    pub quantity: Option<String>,
}

/// Trimmed portion text; blank means none.
pub fn normalize_quantity(quantity: Option<&str>) -> Option<String> {
    quantity
        .map(str::trim)
        .filter(|q| !q.is_empty())
        .map(str::to_string)
}

#[derive(Debug, Default, Deserialize)]
pub struct UpdateMealRequest {
    pub date: Option<Date>,
    pub time: Option<String>,
    pub meal_type: Option<MealType>,
    pub description: Option<String>,
    /// An empty string clears the stored portion.
    pub quantity: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct PeriodTotals {
    pub from: Date,
    pub to: Date,
    pub totals: Totals,
    pub days_logged: usize,
}
