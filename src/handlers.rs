use crate::comic;
use crate::dates;
use crate::errors::AppError;
use crate::models::ComicResponse;
use crate::state::AppState;
use crate::ui::render_index;
use axum::{
    extract::{Query, State},
    response::Html,
    Json,
};
use serde::Deserialize;

pub async fn index() -> Html<String> {
    let today = dates::date_key(dates::today());
    Html(render_index(&today, dates::MIN_DATE_KEY))
}

#[derive(Debug, Deserialize)]
pub struct ComicQuery {
    date: Option<String>,
}

pub async fn get_comic(
    State(state): State<AppState>,
    Query(query): Query<ComicQuery>,
) -> Result<Json<ComicResponse>, AppError> {
    let requested = match query.date.as_deref().map(str::trim) {
        Some(raw) if !raw.is_empty() => dates::parse_date(raw)
            .ok_or_else(|| AppError::bad_request("date must be formatted YYYY-MM-DD"))?,
        _ => dates::today(),
    };

    let response = comic::resolve_comic(&state, requested).await?;
    Ok(Json(response))
}
