//! Course API handlers
//!
//! Listing is lazy unless `eagerload=true`; a single course is always
//! returned with its tasks.

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
};

use super::errors::ApiError;
use super::headers::{Action, alert, location, pagination};
use super::pagination::{ListParams, QueryPairs};
use crate::domain::{Course, DomainError, Identified};
use crate::infrastructure::AppState;

const ENTITY: &str = Course::ENTITY_NAME;
const BASE: &str = "/api/courses";

#[utoipa::path(
    post,
    path = "/api/courses",
    responses(
        (status = 201, description = "Course created"),
        (status = 400, description = "Identifier present or unsaved task/student")
    )
)]
pub async fn create_course(
    State(state): State<AppState>,
    Json(course): Json<Course>,
) -> Result<impl IntoResponse, ApiError> {
    if course.id.is_some() {
        return Err(DomainError::validation(
            ENTITY,
            "idexists",
            "A new course cannot already have an ID",
        )
        .into());
    }

    let saved = state.courses.save(course).await?;
    let id = saved.id.ok_or(DomainError::NotFound)?;

    let mut headers = alert(Action::Created, ENTITY, id);
    headers.extend(location(BASE, id));
    Ok((StatusCode::CREATED, headers, Json(saved)))
}

#[utoipa::path(
    put,
    path = "/api/courses",
    responses(
        (status = 200, description = "Course updated, task set replaced"),
        (status = 400, description = "Identifier missing"),
        (status = 404, description = "No course with this identifier")
    )
)]
pub async fn update_course(
    State(state): State<AppState>,
    Json(course): Json<Course>,
) -> Result<impl IntoResponse, ApiError> {
    let Some(id) = course.id else {
        return Err(DomainError::validation(ENTITY, "idnull", "Invalid id").into());
    };

    let saved = state.courses.save(course).await?;
    Ok((alert(Action::Updated, ENTITY, id), Json(saved)))
}

#[utoipa::path(
    get,
    path = "/api/courses",
    params(
        ("page" = Option<u64>, Query, description = "Zero-based page index"),
        ("size" = Option<u64>, Query, description = "Page size, 20 by default"),
        ("sort" = Option<String>, Query, description = "property[,asc|desc], repeatable"),
        ("eagerload" = Option<bool>, Query, description = "Populate tasks")
    ),
    responses(
        (status = 200, description = "One page of courses"),
        (status = 400, description = "Invalid paging or sort parameter")
    )
)]
pub async fn list_courses(
    State(state): State<AppState>,
    Query(query): QueryPairs,
) -> Result<impl IntoResponse, ApiError> {
    let params = ListParams::parse(ENTITY, &query)?;

    let page = if params.eagerload {
        state.courses.find_all_with_tasks(&params.page).await?
    } else {
        state.courses.find_all(&params.page).await?
    };

    let base = format!("{}?eagerload={}", BASE, params.eagerload);
    Ok((pagination(&page, &base), Json(page.content)))
}

#[utoipa::path(
    get,
    path = "/api/courses/{id}",
    params(("id" = i64, Path, description = "Course identifier")),
    responses(
        (status = 200, description = "Course with its tasks"),
        (status = 404, description = "Course not found")
    )
)]
pub async fn get_course(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<Course>, ApiError> {
    let course = state.courses.find_one(id).await?.ok_or(DomainError::NotFound)?;
    Ok(Json(course))
}

#[utoipa::path(
    delete,
    path = "/api/courses/{id}",
    params(("id" = i64, Path, description = "Course identifier")),
    responses((status = 200, description = "Course deleted or already absent"))
)]
pub async fn delete_course(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, ApiError> {
    state.courses.delete(id).await?;
    Ok((StatusCode::OK, alert(Action::Deleted, ENTITY, id)))
}
