use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use classbook_core::{AppError, ErrorResponse, PageParams};
use classbook_models::{
    CreateStudentDto, LinkParentsDto, Parent, ParentId, Student, StudentId, UpdateStudentDto,
};
use tracing::instrument;

use crate::state::AppState;
use crate::validator::ValidatedJson;

#[utoipa::path(
    post,
    path = "/v1/students",
    request_body = CreateStudentDto,
    responses(
        (status = 201, description = "Student created successfully", body = Student),
        (status = 400, description = "A parent id is repeated", body = ErrorResponse),
        (status = 404, description = "A parent or the class does not exist", body = ErrorResponse),
        (status = 409, description = "A student with this document already exists", body = ErrorResponse),
        (status = 422, description = "Validation failed", body = ErrorResponse)
    ),
    tag = "Students"
)]
#[instrument(skip(state, dto))]
pub async fn create_student(
    State(state): State<AppState>,
    ValidatedJson(dto): ValidatedJson<CreateStudentDto>,
) -> Result<(StatusCode, Json<Student>), AppError> {
    let student = state.services.students.create(dto).await?;
    Ok((StatusCode::CREATED, Json(student)))
}

#[utoipa::path(
    get,
    path = "/v1/students",
    params(PageParams),
    responses(
        (status = 200, description = "One page of students", body = Vec<Student>)
    ),
    tag = "Students"
)]
#[instrument(skip(state))]
pub async fn get_students(
    State(state): State<AppState>,
    Query(params): Query<PageParams>,
) -> Result<Json<Vec<Student>>, AppError> {
    let students = state
        .services
        .students
        .list(params.page(), params.per_page())
        .await?;
    Ok(Json(students))
}

#[utoipa::path(
    get,
    path = "/v1/students/{id}",
    params(
        ("id" = String, Path, description = "Student ID (UUID)")
    ),
    responses(
        (status = 200, description = "Student details", body = Student),
        (status = 404, description = "Student not found", body = ErrorResponse)
    ),
    tag = "Students"
)]
#[instrument(skip(state))]
pub async fn get_student(
    State(state): State<AppState>,
    Path(id): Path<StudentId>,
) -> Result<Json<Student>, AppError> {
    let student = state.services.students.find_by_id(id).await?;
    Ok(Json(student))
}

#[utoipa::path(
    put,
    path = "/v1/students/{id}",
    params(
        ("id" = String, Path, description = "Student ID (UUID)")
    ),
    request_body = UpdateStudentDto,
    responses(
        (status = 200, description = "Student updated successfully", body = Student),
        (status = 404, description = "Student or class not found", body = ErrorResponse),
        (status = 422, description = "Validation failed", body = ErrorResponse)
    ),
    tag = "Students"
)]
#[instrument(skip(state, dto))]
pub async fn update_student(
    State(state): State<AppState>,
    Path(id): Path<StudentId>,
    ValidatedJson(dto): ValidatedJson<UpdateStudentDto>,
) -> Result<Json<Student>, AppError> {
    let student = state.services.students.update(id, dto).await?;
    Ok(Json(student))
}

#[utoipa::path(
    delete,
    path = "/v1/students/{id}",
    params(
        ("id" = String, Path, description = "Student ID (UUID)")
    ),
    responses(
        (status = 204, description = "Student deleted"),
        (status = 404, description = "Student not found", body = ErrorResponse)
    ),
    tag = "Students"
)]
#[instrument(skip(state))]
pub async fn delete_student(
    State(state): State<AppState>,
    Path(id): Path<StudentId>,
) -> Result<StatusCode, AppError> {
    state.services.remove_student(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(
    get,
    path = "/v1/students/{id}/parents",
    params(
        ("id" = String, Path, description = "Student ID (UUID)")
    ),
    responses(
        (status = 200, description = "The student's parents", body = Vec<Parent>),
        (status = 404, description = "Student or a linked parent not found", body = ErrorResponse)
    ),
    tag = "Students"
)]
#[instrument(skip(state))]
pub async fn get_student_parents(
    State(state): State<AppState>,
    Path(id): Path<StudentId>,
) -> Result<Json<Vec<Parent>>, AppError> {
    let parents = state.services.students.get_parents(id).await?;
    Ok(Json(parents))
}

#[utoipa::path(
    patch,
    path = "/v1/students/{id}/parents",
    params(
        ("id" = String, Path, description = "Student ID (UUID)")
    ),
    request_body = LinkParentsDto,
    responses(
        (status = 200, description = "Parents linked", body = Student),
        (status = 400, description = "No parent ids supplied", body = ErrorResponse),
        (status = 404, description = "Student or a parent not found", body = ErrorResponse),
        (status = 409, description = "A parent is already linked or repeated", body = ErrorResponse)
    ),
    tag = "Students"
)]
#[instrument(skip(state))]
pub async fn link_student_parents(
    State(state): State<AppState>,
    Path(id): Path<StudentId>,
    ValidatedJson(dto): ValidatedJson<LinkParentsDto>,
) -> Result<Json<Student>, AppError> {
    let student = state.services.students.link_parents(id, dto.parents).await?;
    Ok(Json(student))
}

#[utoipa::path(
    delete,
    path = "/v1/students/{id}/parents/{parent_id}",
    params(
        ("id" = String, Path, description = "Student ID (UUID)"),
        ("parent_id" = String, Path, description = "Parent ID (UUID)")
    ),
    responses(
        (status = 200, description = "Parent unlinked", body = Student),
        (status = 404, description = "Student not found or parent not linked", body = ErrorResponse),
        (status = 409, description = "The student would be left without parents", body = ErrorResponse)
    ),
    tag = "Students"
)]
#[instrument(skip(state))]
pub async fn unlink_student_parent(
    State(state): State<AppState>,
    Path((id, parent_id)): Path<(StudentId, ParentId)>,
) -> Result<Json<Student>, AppError> {
    let student = state
        .services
        .students
        .unlink_parents(id, vec![parent_id])
        .await?;
    Ok(Json(student))
}
