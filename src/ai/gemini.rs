use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tracing::{debug, error, instrument};

use super::{prompts, AiClient, AiError, CoachContext, GeneratedMealPlan, MenuContext};
use crate::config::AiConfig;
use crate::nutrition::NutritionData;

const COACH_FALLBACK: &str = "Advice could not be generated right now.";
const API_KEY_HEADER: &str = "x-goog-api-key";

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateRequest {
    contents: Vec<Content>,
    #[serde(skip_serializing_if = "Option::is_none")]
    generation_config: Option<GenerationConfig>,
}

#[derive(Debug, Serialize, Deserialize)]
struct Content {
    #[serde(skip_serializing_if = "Option::is_none")]
    role: Option<String>,
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Debug, Serialize, Deserialize)]
struct Part {
    #[serde(default)]
    text: Option<String>,
}

#[derive(Debug, Default, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    top_p: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    response_mime_type: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    response_schema: Option<Value>,
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    candidates: Option<Vec<Candidate>>,
    error: Option<ApiError>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<Content>,
}

#[derive(Debug, Deserialize)]
struct ApiError {
    message: String,
}

impl GenerateResponse {
    fn text(&self) -> Option<String> {
        let parts = &self.candidates.as_ref()?.first()?.content.as_ref()?.parts;
        let text: String = parts.iter().filter_map(|p| p.text.as_deref()).collect();
        let text = text.trim();
        (!text.is_empty()).then(|| text.to_string())
    }
}

fn nutrition_schema() -> Value {
    let number = |description: &str| json!({ "type": "NUMBER", "description": description });
    json!({
        "type": "OBJECT",
        "properties": {
            "calories": number("Total energy in kcal"),
            "protein": number("Protein in grams"),
            "fat": number("Total fat in grams"),
            "carbs": number("Total carbohydrates in grams"),
            "sugar": number("Sugar in grams"),
        },
        "required": ["calories", "protein", "fat", "carbs", "sugar"],
    })
}

fn menu_schema() -> Value {
    let list = json!({ "type": "ARRAY", "items": { "type": "STRING" } });
    json!({
        "type": "OBJECT",
        "properties": {
            "breakfasts": list,
            "snacks": list,
            "lunches": list,
            "dinners": list,
            "shopping_suggestions": list,
        },
        "required": ["breakfasts", "snacks", "lunches", "dinners", "shopping_suggestions"],
    })
}

/// Google Generative Language API client.
pub struct GeminiClient {
    client: Client,
    config: AiConfig,
}

impl GeminiClient {
    pub fn new(config: AiConfig) -> Self {
        Self {
            client: Client::new(),
            config,
        }
    }

    fn url(&self, model: &str) -> String {
        format!(
            "{}/models/{}:generateContent",
            self.config.base_url.trim_end_matches('/'),
            model
        )
    }

    async fn generate(
        &self,
        model: &str,
        prompt: String,
        generation_config: GenerationConfig,
    ) -> Result<String, AiError> {
        let body = GenerateRequest {
            contents: vec![Content {
                role: Some("user".into()),
                parts: vec![Part { text: Some(prompt) }],
            }],
            generation_config: Some(generation_config),
        };

        debug!(%model, "sending generateContent request");
        let response = self
            .client
            .post(self.url(model))
            .header(API_KEY_HEADER, &self.config.api_key)
            .json(&body)
            .send()
            .await?;
        let status = response.status();
        let text = response.text().await?;

        if !status.is_success() {
            let message = serde_json::from_str::<GenerateResponse>(&text)
                .ok()
                .and_then(|r| r.error)
                .map_or(text, |e| e.message);
            error!(%status, %message, "gemini api error");
            return Err(AiError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let parsed: GenerateResponse = serde_json::from_str(&text)?;
        if let Some(e) = parsed.error {
            return Err(AiError::Api {
                status: status.as_u16(),
                message: e.message,
            });
        }
        parsed.text().ok_or(AiError::EmptyResponse)
    }

    fn json_config(schema: Value) -> GenerationConfig {
        GenerationConfig {
            response_mime_type: Some("application/json"),
            response_schema: Some(schema),
            ..GenerationConfig::default()
        }
    }
}

#[async_trait]
impl AiClient for GeminiClient {
    #[instrument(skip(self))]
    async fn analyze_meal(&self, description: &str) -> Result<NutritionData, AiError> {
        let text = self
            .generate(
                &self.config.analysis_model,
                prompts::meal_analysis(description),
                Self::json_config(nutrition_schema()),
            )
            .await?;
        let data: NutritionData = serde_json::from_str(&text)?;
        Ok(data.sanitized())
    }

    #[instrument(skip(self, ctx))]
    async fn coach_advice(&self, ctx: &CoachContext) -> Result<String, AiError> {
        let config = GenerationConfig {
            temperature: Some(0.7),
            top_p: Some(0.9),
            ..GenerationConfig::default()
        };
        match self
            .generate(&self.config.coach_model, prompts::coach_advice(ctx), config)
            .await
        {
            Ok(text) => Ok(text),
            Err(AiError::EmptyResponse) => Ok(COACH_FALLBACK.to_string()),
            Err(e) => Err(e),
        }
    }

    #[instrument(skip(self, ctx), fields(items = ctx.pantry.len()))]
    async fn generate_menu(&self, ctx: &MenuContext) -> Result<GeneratedMealPlan, AiError> {
        let text = self
            .generate(
                &self.config.analysis_model,
                prompts::menu(ctx),
                Self::json_config(menu_schema()),
            )
            .await?;
        Ok(serde_json::from_str(&text)?)
    }
}
