use crate::modules::classes::controller::{
    create_class, delete_class, get_class, get_class_students, get_class_teacher, get_classes,
    update_class,
};
use crate::state::AppState;
use axum::{
    Router,
    routing::{get, post},
};

pub fn init_classes_router() -> Router<AppState> {
    Router::new()
        .route("/", post(create_class).get(get_classes))
        .route(
            "/{id}",
            get(get_class).put(update_class).delete(delete_class),
        )
        .route("/{id}/teacher", get(get_class_teacher))
        .route("/{id}/students", get(get_class_students))
}
