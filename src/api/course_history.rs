//! CourseHistory API handlers

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
};

use super::errors::ApiError;
use super::headers::{Action, alert, location, pagination};
use super::pagination::{ListParams, QueryPairs};
use crate::domain::{CourseHistory, DomainError, Identified};
use crate::infrastructure::AppState;

const ENTITY: &str = CourseHistory::ENTITY_NAME;
const BASE: &str = "/api/course-histories";

#[utoipa::path(
    post,
    path = "/api/course-histories",
    responses(
        (status = 201, description = "Course history created"),
        (status = 400, description = "Identifier present or unsaved reference"),
        (status = 500, description = "Course, school or student already has a history")
    )
)]
pub async fn create_course_history(
    State(state): State<AppState>,
    Json(history): Json<CourseHistory>,
) -> Result<impl IntoResponse, ApiError> {
    if history.id.is_some() {
        return Err(DomainError::validation(
            ENTITY,
            "idexists",
            "A new courseHistory cannot already have an ID",
        )
        .into());
    }

    let saved = state.course_histories.save(history).await?;
    let id = saved.id.ok_or(DomainError::NotFound)?;

    let mut headers = alert(Action::Created, ENTITY, id);
    headers.extend(location(BASE, id));
    Ok((StatusCode::CREATED, headers, Json(saved)))
}

#[utoipa::path(
    put,
    path = "/api/course-histories",
    responses(
        (status = 200, description = "Course history updated"),
        (status = 400, description = "Identifier missing"),
        (status = 404, description = "No course history with this identifier")
    )
)]
pub async fn update_course_history(
    State(state): State<AppState>,
    Json(history): Json<CourseHistory>,
) -> Result<impl IntoResponse, ApiError> {
    let Some(id) = history.id else {
        return Err(DomainError::validation(ENTITY, "idnull", "Invalid id").into());
    };

    let saved = state.course_histories.save(history).await?;
    Ok((alert(Action::Updated, ENTITY, id), Json(saved)))
}

#[utoipa::path(
    get,
    path = "/api/course-histories",
    params(
        ("page" = Option<u64>, Query, description = "Zero-based page index"),
        ("size" = Option<u64>, Query, description = "Page size, 20 by default"),
        ("sort" = Option<String>, Query, description = "property[,asc|desc], repeatable")
    ),
    responses(
        (status = 200, description = "One page of course histories"),
        (status = 400, description = "Invalid paging or sort parameter")
    )
)]
pub async fn list_course_histories(
    State(state): State<AppState>,
    Query(query): QueryPairs,
) -> Result<impl IntoResponse, ApiError> {
    let params = ListParams::parse(ENTITY, &query)?;
    let page = state.course_histories.find_all(&params.page).await?;
    Ok((pagination(&page, BASE), Json(page.content)))
}

#[utoipa::path(
    get,
    path = "/api/course-histories/{id}",
    params(("id" = i64, Path, description = "Course history identifier")),
    responses(
        (status = 200, description = "Course history found"),
        (status = 404, description = "Course history not found")
    )
)]
pub async fn get_course_history(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<CourseHistory>, ApiError> {
    let history = state
        .course_histories
        .find_one(id)
        .await?
        .ok_or(DomainError::NotFound)?;
    Ok(Json(history))
}

#[utoipa::path(
    delete,
    path = "/api/course-histories/{id}",
    params(("id" = i64, Path, description = "Course history identifier")),
    responses((status = 200, description = "Course history deleted or already absent"))
)]
pub async fn delete_course_history(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, ApiError> {
    state.course_histories.delete(id).await?;
    Ok((StatusCode::OK, alert(Action::Deleted, ENTITY, id)))
}
