use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::header::CACHE_CONTROL,
    response::{IntoResponse, Response},
    Json,
};
use exam_common::pagination::PageRequest;
use exam_common::similarity::DuplicateScan;
use exam_common::types::{Difficulty, QuestionStatus};
use question_bank::QuestionFilter;
use serde::Deserialize;
use tracing::debug;
use uuid::Uuid;

use super::{error::AppError, state::AppState};

/// Public listings may be served from a shared cache for a minute.
pub const LISTING_CACHE_CONTROL: &str = "public, s-maxage=60, stale-while-revalidate=300";
pub const NO_STORE: &str = "no-store";

#[derive(Debug, Default, Deserialize)]
pub struct ListParams {
    pub cursor: Option<String>,
    pub limit: Option<String>,
    pub topic: Option<String>,
    pub difficulty: Option<String>,
    pub status: Option<String>,
}

impl ListParams {
    fn filter(&self) -> Result<QuestionFilter, AppError> {
        let mut filter = QuestionFilter::default();
        if let Some(status) = non_empty(&self.status) {
            filter.status = status.parse::<QuestionStatus>()?;
        }
        if let Some(topic) = non_empty(&self.topic) {
            filter.topic_id = Some(
                Uuid::parse_str(topic)
                    .map_err(|e| AppError::MalformedQuery(format!("invalid topic: {e}")))?,
            );
        }
        if let Some(difficulty) = non_empty(&self.difficulty) {
            filter.difficulty = Some(difficulty.parse::<Difficulty>()?);
        }
        Ok(filter)
    }
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

pub async fn list_questions(
    State(state): State<Arc<AppState>>,
    Query(params): Query<ListParams>,
) -> Result<Response, AppError> {
    let request = PageRequest::from_params(params.cursor.as_deref(), params.limit.as_deref())?;
    let filter = params.filter()?;

    let page = state.bank.read().await.list(&filter, &request);
    debug!(
        "Listed {} questions (has_more: {})",
        page.data.len(),
        page.has_more
    );

    Ok(([(CACHE_CONTROL, LISTING_CACHE_CONTROL)], Json(page)).into_response())
}

/// A question by id. Ids of merged questions resolve to the question that absorbed them.
pub async fn get_question(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Response, AppError> {
    let id = Uuid::parse_str(&id)
        .map_err(|e| AppError::MalformedQuery(format!("invalid question id: {e}")))?;

    let bank = state.bank.read().await;
    let question = bank.resolve(id).ok_or(AppError::NotFound)?;

    Ok(([(CACHE_CONTROL, LISTING_CACHE_CONTROL)], Json(question)).into_response())
}

pub async fn duplicates_handler(State(state): State<Arc<AppState>>) -> Response {
    let scan = DuplicateScan {
        threshold: state.config.duplicate_threshold,
        max_questions: state.config.duplicate_scan_cap,
    };
    let records = state
        .bank
        .read()
        .await
        .duplicate_candidates(scan.max_questions);
    let pairs = scan.run(&records);

    ([(CACHE_CONTROL, NO_STORE)], Json(pairs)).into_response()
}

pub async fn health_handler() -> &'static str {
    "ok"
}
