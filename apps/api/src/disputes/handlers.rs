use axum::{
    extract::{Multipart, State},
    Json,
};
use chrono::Local;
use serde::Serialize;
use tracing::{info, warn};
use uuid::Uuid;

use crate::disputes::package::{
    build_package, outcome_message, package_mail, DisputeForm, PackageMode,
};
use crate::errors::AppError;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct DisputeResponse {
    pub package_id: Uuid,
    pub items_found: usize,
    pub letters_generated: usize,
    /// True only when the mail transport delivered the message.
    pub emailed: bool,
    pub dispatched_via: Option<&'static str>,
    pub message: String,
}

/// POST /api/v1/disputes
pub async fn handle_create_dispute(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Json<DisputeResponse>, AppError> {
    run_package(state, multipart, PackageMode::Categories).await
}

/// POST /api/v1/disputes/sample
pub async fn handle_create_sample_dispute(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Json<DisputeResponse>, AppError> {
    run_package(state, multipart, PackageMode::Sample).await
}

async fn run_package(
    state: AppState,
    multipart: Multipart,
    mode: PackageMode,
) -> Result<Json<DisputeResponse>, AppError> {
    let form = DisputeForm::from_multipart(multipart).await?;
    let report = form.validate()?.clone();
    let package_id = Uuid::new_v4();

    tokio::fs::create_dir_all(&state.config.letter_output_dir).await?;
    let workdir = tempfile::Builder::new()
        .prefix(&format!("dispute-{package_id}-"))
        .tempdir_in(&state.config.letter_output_dir)?;

    let user = form.user.clone();
    let output_dir = workdir.path().to_path_buf();
    let today = Local::now().date_naive();
    let outcome = tokio::task::spawn_blocking(move || {
        build_package(mode, &report, &user, today, &output_dir)
    })
    .await
    .map_err(|e| AppError::Internal(e.into()))??;

    let receipt = if outcome.letters.is_empty() {
        None
    } else {
        match state
            .mailer
            .send(&package_mail(mode, &form.user, &outcome))
            .await
        {
            Ok(receipt) => {
                info!(
                    "Package {package_id} handed to '{}' with {} attachments ({} skipped, delivered: {})",
                    receipt.via,
                    receipt.attached,
                    receipt.skipped,
                    receipt.delivered
                );
                Some(receipt)
            }
            Err(e) => {
                cleanup(workdir);
                return Err(e.into());
            }
        }
    };
    cleanup(workdir);

    Ok(Json(DisputeResponse {
        package_id,
        items_found: outcome.items_found,
        letters_generated: outcome.letters.len(),
        emailed: receipt.as_ref().is_some_and(|r| r.delivered),
        dispatched_via: receipt.as_ref().map(|r| r.via),
        message: outcome_message(&outcome, receipt.as_ref()),
    }))
}

fn cleanup(workdir: tempfile::TempDir) {
    let path = workdir.path().display().to_string();
    if let Err(e) = workdir.close() {
        warn!("Failed to remove package directory {path}: {e}");
    }
}
