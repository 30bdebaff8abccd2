use crate::modules::parents::controller::{
    add_parent_phones, create_parent, delete_parent, get_parent, get_parent_students, get_parents,
    update_parent,
};
use crate::state::AppState;
use axum::{
    Router,
    routing::{get, patch, post},
};

pub fn init_parents_router() -> Router<AppState> {
    Router::new()
        .route("/", post(create_parent).get(get_parents))
        .route(
            "/{id}",
            get(get_parent).put(update_parent).delete(delete_parent),
        )
        .route("/{id}/phones", patch(add_parent_phones))
        .route("/{id}/students", get(get_parent_students))
}
