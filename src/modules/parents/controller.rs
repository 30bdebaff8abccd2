use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use classbook_core::{AppError, ErrorResponse, PageParams};
use classbook_models::{
    AddPhonesDto, CreateParentDto, Parent, ParentId, Student, UpdateParentDto,
};
use tracing::instrument;

use crate::state::AppState;
use crate::validator::ValidatedJson;

#[utoipa::path(
    post,
    path = "/v1/parents",
    request_body = CreateParentDto,
    responses(
        (status = 201, description = "Parent created successfully", body = Parent),
        (status = 409, description = "A parent with this document already exists", body = ErrorResponse),
        (status = 422, description = "Validation failed", body = ErrorResponse)
    ),
    tag = "Parents"
)]
#[instrument(skip(state, dto))]
pub async fn create_parent(
    State(state): State<AppState>,
    ValidatedJson(dto): ValidatedJson<CreateParentDto>,
) -> Result<(StatusCode, Json<Parent>), AppError> {
    let parent = state.services.parents.create(dto).await?;
    Ok((StatusCode::CREATED, Json(parent)))
}

#[utoipa::path(
    get,
    path = "/v1/parents",
    params(PageParams),
    responses(
        (status = 200, description = "One page of parents", body = Vec<Parent>)
    ),
    tag = "Parents"
)]
#[instrument(skip(state))]
pub async fn get_parents(
    State(state): State<AppState>,
    Query(params): Query<PageParams>,
) -> Result<Json<Vec<Parent>>, AppError> {
    let parents = state
        .services
        .parents
        .list(params.page(), params.per_page())
        .await?;
    Ok(Json(parents))
}

#[utoipa::path(
    get,
    path = "/v1/parents/{id}",
    params(
        ("id" = String, Path, description = "Parent ID (UUID)")
    ),
    responses(
        (status = 200, description = "Parent details", body = Parent),
        (status = 404, description = "Parent not found", body = ErrorResponse)
    ),
    tag = "Parents"
)]
#[instrument(skip(state))]
pub async fn get_parent(
    State(state): State<AppState>,
    Path(id): Path<ParentId>,
) -> Result<Json<Parent>, AppError> {
    let parent = state.services.parents.find_by_id(id).await?;
    Ok(Json(parent))
}

#[utoipa::path(
    put,
    path = "/v1/parents/{id}",
    params(
        ("id" = String, Path, description = "Parent ID (UUID)")
    ),
    request_body = UpdateParentDto,
    responses(
        (status = 200, description = "Parent updated successfully", body = Parent),
        (status = 404, description = "Parent not found", body = ErrorResponse),
        (status = 422, description = "Validation failed", body = ErrorResponse)
    ),
    tag = "Parents"
)]
#[instrument(skip(state, dto))]
pub async fn update_parent(
    State(state): State<AppState>,
    Path(id): Path<ParentId>,
    ValidatedJson(dto): ValidatedJson<UpdateParentDto>,
) -> Result<Json<Parent>, AppError> {
    let parent = state.services.parents.update(id, dto).await?;
    Ok(Json(parent))
}

#[utoipa::path(
    patch,
    path = "/v1/parents/{id}/phones",
    params(
        ("id" = String, Path, description = "Parent ID (UUID)")
    ),
    request_body = AddPhonesDto,
    responses(
        (status = 200, description = "Phones added", body = Parent),
        (status = 400, description = "No phones supplied", body = ErrorResponse),
        (status = 404, description = "Parent not found", body = ErrorResponse)
    ),
    tag = "Parents"
)]
#[instrument(skip(state))]
pub async fn add_parent_phones(
    State(state): State<AppState>,
    Path(id): Path<ParentId>,
    ValidatedJson(dto): ValidatedJson<AddPhonesDto>,
) -> Result<Json<Parent>, AppError> {
    let parent = state.services.parents.add_phones(id, dto.phones).await?;
    Ok(Json(parent))
}

#[utoipa::path(
    delete,
    path = "/v1/parents/{id}",
    params(
        ("id" = String, Path, description = "Parent ID (UUID)")
    ),
    responses(
        (status = 204, description = "Parent deleted"),
        (status = 404, description = "Parent not found", body = ErrorResponse),
        (status = 409, description = "A student still lists this parent", body = ErrorResponse)
    ),
    tag = "Parents"
)]
#[instrument(skip(state))]
pub async fn delete_parent(
    State(state): State<AppState>,
    Path(id): Path<ParentId>,
) -> Result<StatusCode, AppError> {
    state.services.remove_parent(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(
    get,
    path = "/v1/parents/{id}/students",
    params(
        ("id" = String, Path, description = "Parent ID (UUID)")
    ),
    responses(
        (status = 200, description = "Students linked to the parent", body = Vec<Student>),
        (status = 404, description = "Parent not found", body = ErrorResponse)
    ),
    tag = "Parents"
)]
#[instrument(skip(state))]
pub async fn get_parent_students(
    State(state): State<AppState>,
    Path(id): Path<ParentId>,
) -> Result<Json<Vec<Student>>, AppError> {
    let students = state.services.parent_students(id).await?;
    Ok(Json(students))
}
