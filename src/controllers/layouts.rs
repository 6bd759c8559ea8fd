//! layouts.rs
//!
//! HTTP surface of the seating editor. Every endpoint is stateless: the
//! client posts the layout it holds together with the event's tiers, and
//! gets the resulting layout (or a projection of it) back.

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::post,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::sync::Arc;

use crate::models::{BlockId, Layout, SessionView, Tier};
use crate::services::assignment::Tool;
use crate::services::session::{CommandOutcome, EditCommand, EditorSession};
use crate::services::tally::{self, LayoutSummary};
use crate::services::validation::{self, Violation};
use crate::services::render;
use crate::AppState;

/// Upper bound on commands accepted in one edit request.
pub const MAX_COMMANDS: usize = 1_000;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/layouts/edit", post(edit_layout))
        .route("/layouts/render", post(render_layout))
        .route("/layouts/summary", post(summarize_layout))
}

/* ---------- EDIT ---------- */

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EditRequest {
    #[serde(default)]
    pub layout: Layout,
    #[serde(default)]
    pub tiers: Vec<Tier>,
    pub zoom: Option<f64>,
    pub tool: Option<Tool>,
    pub selected: Option<BlockId>,
    pub commands: Vec<EditCommand>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EditResponse {
    pub layout: Layout,
    pub selected: Option<BlockId>,
    pub zoom: f64,
    pub outcomes: Vec<CommandOutcome>,
}

// POST /api/layouts/edit
pub async fn edit_layout(
    State(state): State<Arc<AppState>>,
    Json(req): Json<EditRequest>,
) -> Result<Json<EditResponse>, (StatusCode, Json<serde_json::Value>)> {
    if req.commands.len() > MAX_COMMANDS {
        return Err((
            StatusCode::BAD_REQUEST,
            Json(json!({
                "success": false,
                "error": format!("at most {} commands per request", MAX_COMMANDS)
            })),
        ));
    }

    let layout = validation::normalize(&req.layout);
    let mut session = EditorSession::new(
        layout,
        req.tiers,
        state.config.canvas.clone(),
        state.config.editor.clone(),
    );
    if let Some(zoom) = req.zoom {
        session.set_zoom(zoom);
    }
    if let Some(tool) = req.tool {
        session.select_tool(tool);
    }
    if let Err(e) = session.select(req.selected) {
        tracing::warn!("edit_layout: dropping stale selection: {}", e);
    }

    let outcomes: Vec<CommandOutcome> = req.commands.into_iter().map(|c| session.execute(c)).collect();
    tracing::debug!("edit_layout: ran {} commands", outcomes.len());

    Ok(Json(EditResponse {
        selected: session.selected().cloned(),
        zoom: session.zoom(),
        layout: session.layout().clone(),
        outcomes,
    }))
}

/* ---------- RENDER ---------- */

#[derive(Debug, Deserialize)]
pub struct RenderRequest {
    pub session: SessionView,
    #[serde(default)]
    pub tiers: Vec<Tier>,
}

// POST /api/layouts/render
pub async fn render_layout(Json(req): Json<RenderRequest>) -> Response {
    match render::render_session(&req.session, &req.tiers) {
        Some(view) => Json(view).into_response(),
        None => StatusCode::NO_CONTENT.into_response(),
    }
}

/* ---------- SUMMARY ---------- */

#[derive(Debug, Deserialize)]
pub struct SummaryRequest {
    #[serde(default)]
    pub layout: Layout,
    #[serde(default)]
    pub tiers: Vec<Tier>,
}

#[derive(Debug, Serialize)]
pub struct SummaryResponse {
    pub success: bool,
    pub summary: LayoutSummary,
    pub violations: Vec<Violation>,
}

// POST /api/layouts/summary
pub async fn summarize_layout(Json(req): Json<SummaryRequest>) -> Json<SummaryResponse> {
    let violations = validation::validate(&req.layout, &req.tiers);
    if !violations.is_empty() {
        tracing::info!("summarize_layout: {} violations in submitted layout", violations.len());
    }
    let summary = tally::tally(&validation::normalize(&req.layout), &req.tiers);

    Json(SummaryResponse {
        success: violations.is_empty(),
        summary,
        violations,
    })
}
