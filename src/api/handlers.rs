//! REST handlers for the map service
//!
//! These handlers read the shared MapService; every render is computed
//! fresh from the immutable merged table.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{Html, IntoResponse},
    Json,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use super::service::MapService;
use crate::catalog;
use crate::models::RenderedMap;

pub type AppState = Arc<MapService>;

// ============================================================================
// Response Types
// ============================================================================

#[derive(Serialize)]
pub struct PanelItemResponse {
    pub code: String,
    pub label: String,
}

#[derive(Serialize)]
pub struct PanelResponse {
    pub id: u8,
    pub items: Vec<PanelItemResponse>,
    pub default_item: String,
}

#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

#[derive(Deserialize)]
pub struct FigureQuery {
    pub item: Option<String>,
}

// ============================================================================
// Handlers
// ============================================================================

/// GET /
pub async fn index() -> Html<&'static str> {
    Html(include_str!("index.html"))
}

/// GET /api/v1/health
pub async fn health() -> impl IntoResponse {
    Json(serde_json::json!({"status": "ok"}))
}

/// GET /api/v1/panels
pub async fn get_panels(State(service): State<AppState>) -> Json<Vec<PanelResponse>> {
    let panels = service
        .panels()
        .iter()
        .map(|p| PanelResponse {
            id: p.panel_id,
            items: p
                .items
                .iter()
                .map(|code| PanelItemResponse {
                    code: code.to_string(),
                    label: catalog::item_title(code),
                })
                .collect(),
            default_item: p.default_item.to_string(),
        })
        .collect();
    Json(panels)
}

/// GET /api/v1/panels/:id/figure?item=CODE
///
/// Without `item` the panel renders its default selection.
pub async fn get_figure(
    State(service): State<AppState>,
    Path(id): Path<u8>,
    Query(params): Query<FigureQuery>,
) -> Result<Json<RenderedMap>, (StatusCode, Json<ErrorResponse>)> {
    let panel = service.panel(id).ok_or_else(|| {
        (
            StatusCode::NOT_FOUND,
            Json(ErrorResponse {
                error: format!("Panel {} not found. Valid IDs: 1-2", id),
            }),
        )
    })?;

    if let Some(item) = params.item.as_deref() {
        if !panel.contains(item) {
            return Err((
                StatusCode::BAD_REQUEST,
                Json(ErrorResponse {
                    error: format!("Item {} is not selectable on panel {}", item, id),
                }),
            ));
        }
    }

    match panel.render(service.table(), params.item.as_deref()) {
        Ok(map) => Ok(Json(map)),
        Err(e) => Err((
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ErrorResponse {
                error: e.to_string(),
            }),
        )),
    }
}
