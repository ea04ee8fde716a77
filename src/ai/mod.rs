//! Language-model collaborators: meal estimation, coaching text and menu
//! generation. Everything the rest of the crate needs goes through
//! [`AiClient`] so handlers and tests can swap the provider.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::measurements::Measurement;
use crate::nutrition::{DailyTargets, MealEntry, NutritionData};
use crate::profile::Profile;

pub mod gemini;
pub mod prompts;

pub use gemini::GeminiClient;

#[derive(Debug, thiserror::Error)]
pub enum AiError {
    #[error("http request failed: {0}")]
    Http(reqwest::Error),
    #[error("provider returned {status}: {message}")]
    Api { status: u16, message: String },
    #[error("provider returned no content")]
    EmptyResponse,
    #[error("could not parse provider output: {0}")]
    Parse(#[from] serde_json::Error),
}

impl From<reqwest::Error> for AiError {
    fn from(e: reqwest::Error) -> Self {
        // Request URLs can carry credentials; keep them out of messages.
        Self::Http(e.without_url())
    }
}

/// What the coach sees when writing advice.
#[derive(Debug, Clone)]
pub struct CoachContext {
    pub profile: Profile,
    pub targets: Option<DailyTargets>,
    pub meals: Vec<MealEntry>,
    pub measurements: Vec<Measurement>,
}

#[derive(Debug, Clone)]
pub struct MenuContext {
    pub pantry: Vec<String>,
    pub profile: Option<Profile>,
    pub targets: Option<DailyTargets>,
}

/// Interchangeable meal ideas built from the pantry.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GeneratedMealPlan {
    pub breakfasts: Vec<String>,
    pub snacks: Vec<String>,
    pub lunches: Vec<String>,
    pub dinners: Vec<String>,
    pub shopping_suggestions: Vec<String>,
}

#[async_trait]
pub trait AiClient: Send + Sync {
    /// Estimated nutrition for a free-text meal description.
    async fn analyze_meal(&self, description: &str) -> Result<NutritionData, AiError>;
    async fn coach_advice(&self, ctx: &CoachContext) -> Result<String, AiError>;
    async fn generate_menu(&self, ctx: &MenuContext) -> Result<GeneratedMealPlan, AiError>;
}
