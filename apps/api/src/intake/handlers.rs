use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

use crate::errors::AppError;
use crate::intake::session::{SessionView, Verdict};
use crate::models::candidate::{BasicInfoInput, TechCategory, TechStackSelection};
use crate::state::AppState;
use crate::storage::remote::StoredCandidate;

type ViewReply = Result<(StatusCode, Json<SessionView>), AppError>;

fn reply(view: SessionView) -> ViewReply {
    let status = match view.verdict {
        Verdict::Accepted => StatusCode::OK,
        Verdict::Rejected => StatusCode::UNPROCESSABLE_ENTITY,
        Verdict::NotPersisted => StatusCode::SERVICE_UNAVAILABLE,
    };
    Ok((status, Json(view)))
}

#[derive(Serialize)]
pub struct CatalogCategory {
    pub key: &'static str,
    pub label: &'static str,
    pub options: &'static [&'static str],
}

/// GET /api/v1/tech-catalog
pub async fn handle_tech_catalog() -> Json<Vec<CatalogCategory>> {
    Json(
        TechCategory::ALL
            .iter()
            .map(|c| CatalogCategory {
                key: c.key(),
                label: c.label(),
                options: c.suggested_options(),
            })
            .collect(),
    )
}

/// POST /api/v1/sessions
pub async fn handle_create_session(State(state): State<AppState>) -> ViewReply {
    let view = state.intake.create_session().await;
    Ok((StatusCode::CREATED, Json(view)))
}

/// GET /api/v1/sessions/:id
pub async fn handle_get_session(State(state): State<AppState>, Path(id): Path<Uuid>) -> ViewReply {
    reply(state.intake.view(id).await?)
}

/// DELETE /api/v1/sessions/:id
pub async fn handle_delete_session(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    state.intake.remove(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// POST /api/v1/sessions/:id/start
pub async fn handle_start(State(state): State<AppState>, Path(id): Path<Uuid>) -> ViewReply {
    reply(state.intake.start(id).await?)
}

/// POST /api/v1/sessions/:id/basic-info
pub async fn handle_basic_info(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(input): Json<BasicInfoInput>,
) -> ViewReply {
    reply(state.intake.submit_basic_info(id, input).await?)
}

/// POST /api/v1/sessions/:id/tech-stack
pub async fn handle_tech_stack(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(selection): Json<TechStackSelection>,
) -> ViewReply {
    reply(state.intake.submit_tech_stack(id, selection).await?)
}

#[derive(Deserialize)]
pub struct ResponseLink {
    #[serde(default)]
    pub url: String,
}

/// PUT /api/v1/sessions/:id/responses/:ordinal
pub async fn handle_set_response(
    State(state): State<AppState>,
    Path((id, ordinal)): Path<(Uuid, u32)>,
    Json(link): Json<ResponseLink>,
) -> ViewReply {
    reply(state.intake.set_response(id, ordinal, &link.url).await?)
}

/// POST /api/v1/sessions/:id/submit
pub async fn handle_submit(State(state): State<AppState>, Path(id): Path<Uuid>) -> ViewReply {
    reply(state.intake.submit(id).await?)
}

/// POST /api/v1/sessions/:id/reset
pub async fn handle_reset(State(state): State<AppState>, Path(id): Path<Uuid>) -> ViewReply {
    reply(state.intake.reset(id).await?)
}

/// GET /api/v1/candidates
pub async fn handle_list_candidates(State(state): State<AppState>) -> Json<Vec<StoredCandidate>> {
    Json(state.gateway.list().await)
}

/// GET /api/v1/candidates/fallback
pub async fn handle_list_fallback(
    State(state): State<AppState>,
) -> Result<Json<Vec<Value>>, AppError> {
    Ok(Json(state.gateway.list_fallback().await?))
}
