//! School API handlers

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};

use super::errors::ApiError;
use super::headers::{Action, alert, location, total_count};
use crate::domain::{DomainError, Identified, School};
use crate::infrastructure::AppState;

const ENTITY: &str = School::ENTITY_NAME;

#[utoipa::path(
    post,
    path = "/api/schools",
    responses(
        (status = 201, description = "School created"),
        (status = 400, description = "Identifier present or name missing")
    )
)]
pub async fn create_school(
    State(state): State<AppState>,
    Json(school): Json<School>,
) -> Result<impl IntoResponse, ApiError> {
    if school.id.is_some() {
        return Err(DomainError::validation(
            ENTITY,
            "idexists",
            "A new school cannot already have an ID",
        )
        .into());
    }
    school.validate()?;

    let saved = state.schools.save(school).await?;
    let id = saved.id.ok_or(DomainError::NotFound)?;

    let mut headers = alert(Action::Created, ENTITY, id);
    headers.extend(location("/api/schools", id));
    Ok((StatusCode::CREATED, headers, Json(saved)))
}

#[utoipa::path(
    put,
    path = "/api/schools",
    responses(
        (status = 200, description = "School updated"),
        (status = 400, description = "Identifier missing or name missing"),
        (status = 404, description = "No school with this identifier")
    )
)]
pub async fn update_school(
    State(state): State<AppState>,
    Json(school): Json<School>,
) -> Result<impl IntoResponse, ApiError> {
    let Some(id) = school.id else {
        return Err(DomainError::validation(ENTITY, "idnull", "Invalid id").into());
    };
    school.validate()?;

    let saved = state.schools.save(school).await?;
    Ok((alert(Action::Updated, ENTITY, id), Json(saved)))
}

#[utoipa::path(
    get,
    path = "/api/schools",
    responses((status = 200, description = "All schools, unpaged"))
)]
pub async fn list_schools(State(state): State<AppState>) -> Result<impl IntoResponse, ApiError> {
    let schools = state.schools.find_all().await?;
    Ok((total_count(schools.len() as u64), Json(schools)))
}

#[utoipa::path(
    get,
    path = "/api/schools/{id}",
    params(("id" = i64, Path, description = "School identifier")),
    responses(
        (status = 200, description = "School found"),
        (status = 404, description = "School not found")
    )
)]
pub async fn get_school(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<School>, ApiError> {
    let school = state.schools.find_one(id).await?.ok_or(DomainError::NotFound)?;
    Ok(Json(school))
}

#[utoipa::path(
    delete,
    path = "/api/schools/{id}",
    params(("id" = i64, Path, description = "School identifier")),
    responses((status = 200, description = "School deleted or already absent"))
)]
pub async fn delete_school(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, ApiError> {
    state.schools.delete(id).await?;
    Ok((StatusCode::OK, alert(Action::Deleted, ENTITY, id)))
}
