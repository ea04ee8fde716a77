use anyhow::Context;
use serde::Deserialize;

use crate::nutrition::{BmrOffsets, ExerciseAdjustmentPolicy, TargetSettings};

/// Verification settings for tokens issued by the hosted identity provider.
#[derive(Debug, Clone, Deserialize)]
pub struct IdentityConfig {
    pub jwt_secret: String,
    pub issuer: Option<String>,
    pub audience: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AiConfig {
    pub api_key: String,
    pub base_url: String,
    pub analysis_model: String,
    pub coach_model: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub database_url: String,
    pub identity: IdentityConfig,
    pub ai: AiConfig,
    pub targets: TargetSettings,
}

/// Unset keeps the default; anything set must be a finite number.
fn parse_offset(raw: Option<String>, default: f64) -> anyhow::Result<f64> {
    let Some(raw) = raw else {
        return Ok(default);
    };
    let value: f64 = raw
        .trim()
        .parse()
        .with_context(|| format!("BMR_OFFSET_OTHER must be a number, got {raw:?}"))?;
    anyhow::ensure!(value.is_finite(), "BMR_OFFSET_OTHER must be finite, got {raw:?}");
    Ok(value)
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        let database_url = std::env::var("DATABASE_URL")?;
        let identity = IdentityConfig {
            jwt_secret: std::env::var("IDENTITY_JWT_SECRET")?,
            issuer: std::env::var("IDENTITY_ISSUER").ok(),
            audience: std::env::var("IDENTITY_AUDIENCE")
                .unwrap_or_else(|_| "authenticated".into()),
        };
        let ai = AiConfig {
            api_key: std::env::var("GEMINI_API_KEY")?,
            base_url: std::env::var("GEMINI_BASE_URL")
                .unwrap_or_else(|_| "https://generativelanguage.googleapis.com/v1beta".into()),
            analysis_model: std::env::var("GEMINI_ANALYSIS_MODEL")
                .unwrap_or_else(|_| "gemini-2.5-flash".into()),
            coach_model: std::env::var("GEMINI_COACH_MODEL")
                .unwrap_or_else(|_| "gemini-2.5-pro".into()),
        };
        let exercise_policy = match std::env::var("EXERCISE_POLICY") {
            Ok(v) => v.parse::<ExerciseAdjustmentPolicy>()?,
            Err(_) => ExerciseAdjustmentPolicy::default(),
        };
        let defaults = BmrOffsets::default();
        let targets = TargetSettings {
            exercise_policy,
            bmr_offsets: BmrOffsets {
                other: parse_offset(std::env::var("BMR_OFFSET_OTHER").ok(), defaults.other)?,
                ..defaults
            },
        };
        Ok(Self {
            database_url,
            identity,
            ai,
            targets,
        })
    }
}
