use axum::Json;
use chrono::Local;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::errors::AppError;
use crate::extraction::parse;
use crate::letters::{render_letters, OutputFormat};

#[derive(Debug, Deserialize)]
pub struct LettersRequest {
    pub raw_text: String,
    pub sender_name: String,
    pub sender_address: String,
    #[serde(default)]
    pub format: Option<String>,
}

/// `letters` is one joined string for `text` and an array for `json`.
#[derive(Debug, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum LettersResponse {
    Ok { letters: Value },
    NothingToDispute { message: String },
}

/// POST /api/v1/letters
pub async fn handle_render_letters(
    Json(req): Json<LettersRequest>,
) -> Result<Json<LettersResponse>, AppError> {
    if req.raw_text.trim().is_empty() {
        return Err(AppError::Validation("raw_text must not be empty".to_string()));
    }
    if req.sender_name.trim().is_empty() {
        return Err(AppError::Validation("sender_name must not be empty".to_string()));
    }

    let format = match req.format.as_deref() {
        Some(raw) => raw.parse::<OutputFormat>()?,
        None => OutputFormat::default(),
    };

    let items = parse(&req.raw_text);
    let today = Local::now().date_naive();
    let output = render_letters(
        &items,
        req.sender_name.trim(),
        req.sender_address.trim(),
        today,
        format,
    );

    let response = if output.is_nothing_to_dispute() {
        LettersResponse::NothingToDispute {
            message: output.to_string(),
        }
    } else {
        let letters = match format {
            OutputFormat::Json => output.to_json(),
            OutputFormat::Text => Value::String(output.to_string()),
        };
        LettersResponse::Ok { letters }
    };
    Ok(Json(response))
}
