use axum::{
    extract::State,
    http::header,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{debug, info, warn};

use crate::errors::AppError;
use crate::sheet::fields::CanonicalField;
use crate::sheet::filler::{FillReport, SlotInfo, TemplateFiller};
use crate::sheet::parser::{CharacterRecord, ParseOutcome};
use crate::state::AppState;

const FALLBACK_FILENAME: &str = "ficha";
const RENDERED_FILENAME: &str = "sheet.pdf";

#[derive(Debug, Deserialize)]
pub struct SheetRequest {
    /// Full generated character description.
    pub raw_text: String,
}

#[derive(Debug, Serialize)]
pub struct ParseResponse {
    pub record: CharacterRecord,
    pub unrecognized_lines: Vec<String>,
}

/// POST /api/v1/sheets/parse
pub async fn handle_parse(
    State(state): State<AppState>,
    Json(req): Json<SheetRequest>,
) -> Result<Json<ParseResponse>, AppError> {
    let outcome = parse_request(&state, &req)?;
    Ok(Json(ParseResponse {
        record: outcome.record,
        unrecognized_lines: outcome.unrecognized,
    }))
}

/// POST /api/v1/sheets/render
///
/// Parses, fills a fresh output file, and returns it as a PDF download.
pub async fn handle_render(
    State(state): State<AppState>,
    Json(req): Json<SheetRequest>,
) -> Result<Response, AppError> {
    let outcome = parse_request(&state, &req)?;
    let record = if state.config.derive_modifiers {
        outcome.record.with_derived_modifiers()
    } else {
        outcome.record
    };
    let filename = download_filename(record.get(CanonicalField::Name));

    let filler = state.filler.clone();
    let output_dir = state.config.output_dir.clone();
    let (report, bytes) = tokio::task::spawn_blocking(move || render_sheet(&filler, &record, &output_dir))
        .await
        .map_err(|e| AppError::Internal(anyhow::anyhow!("spawn_blocking failed in template fill: {e}")))??;

    info!(
        written = report.slots_written,
        cleared = report.slots_cleared,
        bytes = bytes.len(),
        "Character sheet rendered"
    );

    Ok((
        [
            (header::CONTENT_TYPE, "application/pdf".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{filename}.pdf\""),
            ),
        ],
        bytes,
    )
        .into_response())
}

/// GET /api/v1/template/slots
pub async fn handle_template_slots(
    State(state): State<AppState>,
) -> Result<Json<Vec<SlotInfo>>, AppError> {
    let filler = state.filler.clone();
    let slots = tokio::task::spawn_blocking(move || filler.list_slots())
        .await
        .map_err(|e| AppError::Internal(anyhow::anyhow!("spawn_blocking failed listing slots: {e}")))??;
    Ok(Json(slots))
}

/// Fills into a private directory under `output_dir` and reads the result back.
/// The directory is removed when it drops, on every path, including a render whose
/// request was abandoned while this ran.
fn render_sheet(
    filler: &TemplateFiller,
    record: &CharacterRecord,
    output_dir: &Path,
) -> Result<(FillReport, Vec<u8>), AppError> {
    let scratch = tempfile::Builder::new()
        .prefix("render-")
        .tempdir_in(output_dir)
        .map_err(|e| AppError::Internal(anyhow::Error::new(e).context("creating render directory")))?;
    let report = filler.fill(record, &scratch.path().join(RENDERED_FILENAME))?;
    let bytes = std::fs::read(&report.output_path)
        .map_err(|e| AppError::Internal(anyhow::Error::new(e).context("reading filled sheet")))?;
    if let Err(e) = scratch.close() {
        warn!("Failed to remove render directory: {e}");
    }
    Ok((report, bytes))
}

fn parse_request(state: &AppState, req: &SheetRequest) -> Result<ParseOutcome, AppError> {
    if req.raw_text.trim().is_empty() {
        return Err(AppError::Validation("raw_text must not be empty".to_string()));
    }
    let outcome = state.parser.parse_detailed(&req.raw_text);
    debug!(
        recognized = outcome.record.len(),
        unrecognized = outcome.unrecognized.len(),
        "Parsed generated character text"
    );
    Ok(outcome)
}

/// ASCII-only file stem derived from the character name.
fn download_filename(name: Option<&str>) -> String {
    let stem: String = name
        .unwrap_or_default()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join("_")
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || *c == '_' || *c == '-')
        .collect();
    if stem.is_empty() {
        FALLBACK_FILENAME.to_string()
    } else {
        stem
    }
}
