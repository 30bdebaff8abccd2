use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use classbook_core::{AppError, ErrorResponse, PageParams};
use classbook_models::{Class, ClassId, CreateClassDto, Student, Teacher, UpdateClassDto};
use tracing::instrument;

use crate::state::AppState;
use crate::validator::ValidatedJson;

#[utoipa::path(
    post,
    path = "/v1/classes",
    request_body = CreateClassDto,
    responses(
        (status = 201, description = "Class created successfully", body = Class),
        (status = 404, description = "Assigned teacher not found", body = ErrorResponse),
        (status = 409, description = "A class with this code already exists", body = ErrorResponse),
        (status = 422, description = "Validation failed", body = ErrorResponse)
    ),
    tag = "Classes"
)]
#[instrument(skip(state, dto))]
pub async fn create_class(
    State(state): State<AppState>,
    ValidatedJson(dto): ValidatedJson<CreateClassDto>,
) -> Result<(StatusCode, Json<Class>), AppError> {
    let class = state.services.classes.create(dto).await?;
    Ok((StatusCode::CREATED, Json(class)))
}

#[utoipa::path(
    get,
    path = "/v1/classes",
    params(PageParams),
    responses(
        (status = 200, description = "One page of classes", body = Vec<Class>)
    ),
    tag = "Classes"
)]
#[instrument(skip(state))]
pub async fn get_classes(
    State(state): State<AppState>,
    Query(params): Query<PageParams>,
) -> Result<Json<Vec<Class>>, AppError> {
    let classes = state
        .services
        .classes
        .list(params.page(), params.per_page())
        .await?;
    Ok(Json(classes))
}

#[utoipa::path(
    get,
    path = "/v1/classes/{id}",
    params(
        ("id" = String, Path, description = "Class ID (UUID)")
    ),
    responses(
        (status = 200, description = "Class details", body = Class),
        (status = 404, description = "Class not found", body = ErrorResponse)
    ),
    tag = "Classes"
)]
#[instrument(skip(state))]
pub async fn get_class(
    State(state): State<AppState>,
    Path(id): Path<ClassId>,
) -> Result<Json<Class>, AppError> {
    let class = state.services.classes.find_by_id(id).await?;
    Ok(Json(class))
}

#[utoipa::path(
    put,
    path = "/v1/classes/{id}",
    params(
        ("id" = String, Path, description = "Class ID (UUID)")
    ),
    request_body = UpdateClassDto,
    responses(
        (status = 200, description = "Class updated successfully", body = Class),
        (status = 404, description = "Class or teacher not found", body = ErrorResponse),
        (status = 409, description = "The new code is taken", body = ErrorResponse),
        (status = 422, description = "Validation failed", body = ErrorResponse)
    ),
    tag = "Classes"
)]
#[instrument(skip(state, dto))]
pub async fn update_class(
    State(state): State<AppState>,
    Path(id): Path<ClassId>,
    ValidatedJson(dto): ValidatedJson<UpdateClassDto>,
) -> Result<Json<Class>, AppError> {
    let class = state.services.classes.update(id, dto).await?;
    Ok(Json(class))
}

#[utoipa::path(
    delete,
    path = "/v1/classes/{id}",
    params(
        ("id" = String, Path, description = "Class ID (UUID)")
    ),
    responses(
        (status = 204, description = "Class deleted"),
        (status = 404, description = "Class not found", body = ErrorResponse),
        (status = 409, description = "Students are still enrolled in the class", body = ErrorResponse)
    ),
    tag = "Classes"
)]
#[instrument(skip(state))]
pub async fn delete_class(
    State(state): State<AppState>,
    Path(id): Path<ClassId>,
) -> Result<StatusCode, AppError> {
    state.services.remove_class(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(
    get,
    path = "/v1/classes/{id}/teacher",
    params(
        ("id" = String, Path, description = "Class ID (UUID)")
    ),
    responses(
        (status = 200, description = "The class teacher", body = Teacher),
        (status = 404, description = "Class not found or no teacher assigned", body = ErrorResponse)
    ),
    tag = "Classes"
)]
#[instrument(skip(state))]
pub async fn get_class_teacher(
    State(state): State<AppState>,
    Path(id): Path<ClassId>,
) -> Result<Json<Teacher>, AppError> {
    let teacher = state.services.classes.get_teacher(id).await?;
    Ok(Json(teacher))
}

#[utoipa::path(
    get,
    path = "/v1/classes/{id}/students",
    params(
        ("id" = String, Path, description = "Class ID (UUID)")
    ),
    responses(
        (status = 200, description = "Students enrolled in the class", body = Vec<Student>),
        (status = 404, description = "Class not found", body = ErrorResponse)
    ),
    tag = "Classes"
)]
#[instrument(skip(state))]
pub async fn get_class_students(
    State(state): State<AppState>,
    Path(id): Path<ClassId>,
) -> Result<Json<Vec<Student>>, AppError> {
    let students = state.services.classes.get_students(id).await?;
    Ok(Json(students))
}
