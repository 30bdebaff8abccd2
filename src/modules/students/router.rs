use crate::modules::students::controller::{
    create_student, delete_student, get_student, get_student_parents, get_students,
    link_student_parents, unlink_student_parent, update_student,
};
use crate::state::AppState;
use axum::{
    Router,
    routing::{delete, get, post},
};

pub fn init_students_router() -> Router<AppState> {
    Router::new()
        .route("/", post(create_student).get(get_students))
        .route(
            "/{id}",
            get(get_student).put(update_student).delete(delete_student),
        )
        .route(
            "/{id}/parents",
            get(get_student_parents).patch(link_student_parents),
        )
        .route("/{id}/parents/{parent_id}", delete(unlink_student_parent))
}
