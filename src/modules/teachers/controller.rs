use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use classbook_core::{AppError, ErrorResponse, PageParams};
use classbook_models::{Class, CreateTeacherDto, Student, Teacher, TeacherId, UpdateTeacherDto};
use tracing::instrument;

use crate::state::AppState;
use crate::validator::ValidatedJson;

#[utoipa::path(
    post,
    path = "/v1/teachers",
    request_body = CreateTeacherDto,
    responses(
        (status = 201, description = "Teacher created successfully", body = Teacher),
        (status = 400, description = "Malformed request body", body = ErrorResponse),
        (status = 409, description = "A teacher with this document already exists", body = ErrorResponse),
        (status = 422, description = "Validation failed", body = ErrorResponse)
    ),
    tag = "Teachers"
)]
#[instrument(skip(state, dto))]
pub async fn create_teacher(
    State(state): State<AppState>,
    ValidatedJson(dto): ValidatedJson<CreateTeacherDto>,
) -> Result<(StatusCode, Json<Teacher>), AppError> {
    let teacher = state.services.teachers.create(dto).await?;
    Ok((StatusCode::CREATED, Json(teacher)))
}

#[utoipa::path(
    get,
    path = "/v1/teachers",
    params(PageParams),
    responses(
        (status = 200, description = "One page of teachers", body = Vec<Teacher>)
    ),
    tag = "Teachers"
)]
#[instrument(skip(state))]
pub async fn get_teachers(
    State(state): State<AppState>,
    Query(params): Query<PageParams>,
) -> Result<Json<Vec<Teacher>>, AppError> {
    let teachers = state
        .services
        .teachers
        .list(params.page(), params.per_page())
        .await?;
    Ok(Json(teachers))
}

#[utoipa::path(
    get,
    path = "/v1/teachers/{id}",
    params(
        ("id" = String, Path, description = "Teacher ID (UUID)")
    ),
    responses(
        (status = 200, description = "Teacher details", body = Teacher),
        (status = 404, description = "Teacher not found", body = ErrorResponse)
    ),
    tag = "Teachers"
)]
#[instrument(skip(state))]
pub async fn get_teacher(
    State(state): State<AppState>,
    Path(id): Path<TeacherId>,
) -> Result<Json<Teacher>, AppError> {
    let teacher = state.services.teachers.find_by_id(id).await?;
    Ok(Json(teacher))
}

#[utoipa::path(
    put,
    path = "/v1/teachers/{id}",
    params(
        ("id" = String, Path, description = "Teacher ID (UUID)")
    ),
    request_body = UpdateTeacherDto,
    responses(
        (status = 200, description = "Teacher updated successfully", body = Teacher),
        (status = 404, description = "Teacher not found", body = ErrorResponse),
        (status = 422, description = "Validation failed", body = ErrorResponse)
    ),
    tag = "Teachers"
)]
#[instrument(skip(state, dto))]
pub async fn update_teacher(
    State(state): State<AppState>,
    Path(id): Path<TeacherId>,
    ValidatedJson(dto): ValidatedJson<UpdateTeacherDto>,
) -> Result<Json<Teacher>, AppError> {
    let teacher = state.services.teachers.update(id, dto).await?;
    Ok(Json(teacher))
}

#[utoipa::path(
    delete,
    path = "/v1/teachers/{id}",
    params(
        ("id" = String, Path, description = "Teacher ID (UUID)")
    ),
    responses(
        (status = 204, description = "Teacher deleted"),
        (status = 404, description = "Teacher not found", body = ErrorResponse),
        (status = 409, description = "A class is still assigned to this teacher", body = ErrorResponse)
    ),
    tag = "Teachers"
)]
#[instrument(skip(state))]
pub async fn delete_teacher(
    State(state): State<AppState>,
    Path(id): Path<TeacherId>,
) -> Result<StatusCode, AppError> {
    state.services.remove_teacher(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(
    get,
    path = "/v1/teachers/{id}/classes",
    params(
        ("id" = String, Path, description = "Teacher ID (UUID)")
    ),
    responses(
        (status = 200, description = "Classes assigned to the teacher", body = Vec<Class>),
        (status = 404, description = "Teacher not found", body = ErrorResponse)
    ),
    tag = "Teachers"
)]
#[instrument(skip(state))]
pub async fn get_teacher_classes(
    State(state): State<AppState>,
    Path(id): Path<TeacherId>,
) -> Result<Json<Vec<Class>>, AppError> {
    let classes = state.services.teacher_classes(id).await?;
    Ok(Json(classes))
}

#[utoipa::path(
    get,
    path = "/v1/teachers/{id}/students",
    params(
        ("id" = String, Path, description = "Teacher ID (UUID)")
    ),
    responses(
        (status = 200, description = "Students in the teacher's classes", body = Vec<Student>),
        (status = 404, description = "Teacher not found", body = ErrorResponse)
    ),
    tag = "Teachers"
)]
#[instrument(skip(state))]
pub async fn get_teacher_students(
    State(state): State<AppState>,
    Path(id): Path<TeacherId>,
) -> Result<Json<Vec<Student>>, AppError> {
    let students = state.services.teacher_students(id).await?;
    Ok(Json(students))
}
