use axum::Json;
use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::extraction::normalizer::normalize;
use crate::extraction::{group_by_kind, parse, parse_segmented, BureauAccounts, KindGroup};
use crate::models::DerogatoryItem;

#[derive(Debug, Deserialize)]
pub struct ReportTextRequest {
    pub raw_text: String,
}

impl ReportTextRequest {
    pub(crate) fn validated_text(&self) -> Result<&str, AppError> {
        if self.raw_text.trim().is_empty() {
            return Err(AppError::Validation("raw_text must not be empty".to_string()));
        }
        Ok(&self.raw_text)
    }
}

#[derive(Serialize)]
pub struct ParseResponse {
    pub items: Vec<DerogatoryItem>,
    pub groups: Vec<KindGroup>,
}

#[derive(Serialize)]
pub struct NormalizedResponse {
    pub text: String,
}

#[derive(Serialize)]
pub struct SegmentedResponse {
    pub bureaus: BureauAccounts,
}

/// POST /api/v1/reports/parse
pub async fn handle_parse(
    Json(req): Json<ReportTextRequest>,
) -> Result<Json<ParseResponse>, AppError> {
    let items = parse(req.validated_text()?);
    let groups = group_by_kind(&items);
    Ok(Json(ParseResponse { items, groups }))
}

/// POST /api/v1/reports/segmented
pub async fn handle_parse_segmented(
    Json(req): Json<ReportTextRequest>,
) -> Result<Json<SegmentedResponse>, AppError> {
    let bureaus = parse_segmented(req.validated_text()?);
    Ok(Json(SegmentedResponse { bureaus }))
}

/// POST /api/v1/reports/normalize
pub async fn handle_normalize(
    Json(req): Json<ReportTextRequest>,
) -> Result<Json<NormalizedResponse>, AppError> {
    let text = normalize(req.validated_text()?);
    Ok(Json(NormalizedResponse { text }))
}
