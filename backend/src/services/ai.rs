//! Generative AI integration
//!
//! Thin client for the Gemini `generateContent` endpoint, used for meal
//! plan generation and photo-based body-composition estimates. The model
//! is asked for JSON-only output; whatever JSON comes back is returned
//! opaque — schema validation is deliberately out of scope.

use crate::config::AiConfig;
use crate::error::ApiError;
use bodymetrics_shared::metrics::format_metric;
use bodymetrics_shared::types::{
    MealPlanRequest, MealPlanResponse, PhotoEstimateRequest, PhotoEstimateResponse,
};
use secrecy::{ExposeSecret, SecretString};
use serde_json::{json, Value};
use tracing::debug;

/// Pre-built client for the generative AI service
#[derive(Clone)]
pub struct AiClient {
    http: reqwest::Client,
    api_url: String,
    api_key: SecretString,
    model: String,
    enabled: bool,
}

impl AiClient {
    /// Build a client from configuration
    pub fn new(config: &AiConfig) -> Self {
        Self {
            http: reqwest::Client::new(),
            api_url: config.api_url.trim_end_matches('/').to_string(),
            api_key: SecretString::new(config.api_key.clone()),
            model: config.model.clone(),
            enabled: config.enabled,
        }
    }

    /// Generate a personalized meal plan
    pub async fn generate_meal_plan(
        &self,
        request: &MealPlanRequest,
    ) -> Result<MealPlanResponse, ApiError> {
        let prompt = build_meal_plan_prompt(request);
        let parts = vec![json!({ "text": prompt })];

        let plan = self.generate_content(parts, 0.7, 8192).await?;

        Ok(MealPlanResponse {
            plan,
            model: self.model.clone(),
        })
    }

    /// Estimate body-composition indicators from a photo
    pub async fn estimate_from_photo(
        &self,
        request: &PhotoEstimateRequest,
    ) -> Result<PhotoEstimateResponse, ApiError> {
        let mut instruction = String::from(
            "You are a body-composition assessment assistant. Estimate visual \
             body-composition indicators from this photo: approximate body fat \
             percentage range, build description, and posture notes. \
             These are rough visual estimates for a clinician to review, not a \
             diagnosis.\n",
        );
        if let Some(summary) = &request.patient_summary {
            instruction.push_str(&format!("Patient context: {summary}\n"));
        }
        instruction.push_str(
            "RETURN ONLY valid JSON, no markdown, no extra text: \
             {\"body_fat_pct_min\": 0, \"body_fat_pct_max\": 0, \
             \"build\": \"...\", \"notes\": \"...\", \"confidence\": \"low|medium|high\"}",
        );

        let parts = vec![
            json!({ "text": instruction }),
            json!({
                "inline_data": {
                    "mime_type": request.mime_type,
                    "data": request.image_base64,
                }
            }),
        ];

        let estimate = self.generate_content(parts, 0.2, 2048).await?;

        Ok(PhotoEstimateResponse {
            estimate,
            model: self.model.clone(),
        })
    }

    /// Call the generateContent endpoint and parse the model's JSON reply
    async fn generate_content(
        &self,
        parts: Vec<Value>,
        temperature: f64,
        max_output_tokens: u32,
    ) -> Result<Value, ApiError> {
        if !self.enabled {
            return Err(ApiError::BadRequest(
                "AI features are disabled; set ai.enabled in the configuration".to_string(),
            ));
        }

        let url = format!(
            "{}/models/{}:generateContent?key={}",
            self.api_url,
            self.model,
            self.api_key.expose_secret(),
        );

        let body = json!({
            "contents": [{ "parts": parts }],
            "generationConfig": {
                "temperature": temperature,
                "maxOutputTokens": max_output_tokens,
            },
        });

        debug!(model = %self.model, "Calling generative AI service");

        let response = self
            .http
            .post(&url)
            .json(&body)
            .send()
            .await
            .map_err(|e| ApiError::External(format!("AI request failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            let detail = response.text().await.unwrap_or_default();
            return Err(ApiError::External(format!(
                "AI service returned {status}: {detail}"
            )));
        }

        let payload: Value = response
            .json()
            .await
            .map_err(|e| ApiError::External(format!("AI response was not valid JSON: {e}")))?;

        let text = payload["candidates"][0]["content"]["parts"][0]["text"]
            .as_str()
            .ok_or_else(|| ApiError::External("AI response contained no content".to_string()))?;

        serde_json::from_str(strip_code_fences(text).trim())
            .map_err(|e| ApiError::External(format!("model output was not valid JSON: {e}")))
    }
}

/// Remove Markdown code fences the model sometimes wraps JSON in
fn strip_code_fences(text: &str) -> String {
    text.lines()
        .filter(|line| !line.trim_start().starts_with("```"))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Build the nutritionist prompt from patient data and plan config
fn build_meal_plan_prompt(request: &MealPlanRequest) -> String {
    let patient = &request.input.patient;
    let config = &request.config;
    let results = request.input.evaluate();

    let sex = match patient.sex {
        bodymetrics_shared::metrics::Sex::Male => "Male",
        bodymetrics_shared::metrics::Sex::Female => "Female",
    };
    let bmi_label = results
        .bmi_class
        .as_ref()
        .map(|c| c.label.clone())
        .unwrap_or_else(|| "N/A".to_string());
    let restrictions = if config.restrictions.is_empty() {
        "None".to_string()
    } else {
        config.restrictions.join(", ")
    };

    format!(
        "You are an expert clinical nutritionist. Create a detailed personalized meal plan.\n\
         \n\
         PATIENT DATA:\n\
         - Name: {name}\n\
         - Age: {age} years | Sex: {sex}\n\
         - Weight: {weight} kg | Height: {height} cm\n\
         - BMI: {bmi} ({bmi_label})\n\
         - Body fat: {body_fat}%\n\
         - BMR: {bmr} kcal | TDEE: {tdee} kcal\n\
         - Goal: {goal}\n\
         \n\
         PLAN CONFIGURATION:\n\
         - Target calories: {calories} kcal/day\n\
         - Macro split: {carb}% carbs, {protein}% protein, {fat}% fat\n\
         - Meals per day: {meals}\n\
         - Restrictions: {restrictions}\n\
         - Allergies: {allergies}\n\
         - Foods to avoid: {avoid}\n\
         - Preferred foods: {preferred}\n\
         - Duration: {days} day(s)\n\
         \n\
         Include portions in grams and household measures.\n\
         Generate {days} day(s) with {meals} meals per day, varying foods \
         between days so meals do not repeat.\n\
         \n\
         RETURN ONLY valid JSON, no markdown, no extra text:\n\
         {{\n\
           \"daily_plan\": [{{\"day\": \"...\", \"meals\": [{{\"name\": \"...\", \"time\": \"...\", \
         \"items\": [{{\"food\": \"...\", \"portion\": \"...\", \"calories\": 0, \"carbs\": 0, \
         \"protein\": 0, \"fat\": 0, \"substitutes\": [\"...\"]}}], \"total_calories\": 0}}], \
         \"day_totals\": {{\"calories\": 0, \"carbs\": 0, \"protein\": 0, \"fat\": 0}}}}],\n\
           \"shopping_list\": [{{\"item\": \"...\", \"quantity\": \"...\", \"category\": \"...\"}}],\n\
           \"observations\": \"...\",\n\
           \"hydration\": \"...\"\n\
         }}",
        name = if patient.name.is_empty() { "Patient" } else { patient.name.as_str() },
        age = format_metric(patient.age_years, 0),
        sex = sex,
        weight = format_metric(patient.weight_kg, 1),
        height = format_metric(patient.height_cm, 1),
        bmi = format_metric(results.bmi, 1),
        bmi_label = bmi_label,
        body_fat = format_metric(results.body_fat.as_ref().map(|bf| bf.percent), 1),
        bmr = format_metric(results.bmr, 0),
        tdee = format_metric(results.tdee, 0),
        goal = config.goal.as_deref().unwrap_or("General health improvement"),
        calories = config.target_calories,
        carb = config.carb_pct,
        protein = config.protein_pct,
        fat = config.fat_pct,
        meals = config.meals_per_day,
        restrictions = restrictions,
        allergies = config.allergies.as_deref().unwrap_or("None"),
        avoid = config.avoid_foods.as_deref().unwrap_or("None"),
        preferred = config.preferred_foods.as_deref().unwrap_or("No specific preferences"),
        days = config.duration_days,
    )
}
