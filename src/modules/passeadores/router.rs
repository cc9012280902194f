use axum::{
    Router,
    routing::{get, post},
};

use crate::state::AppState;

use super::controller::{
    create_passeador, delete_passeador, get_passeador, list_passeadores, login_passeador,
    update_passeador,
};

pub fn init_passeadores_router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_passeadores).post(create_passeador))
        .route("/login", post(login_passeador))
        .route(
            "/{id}",
            get(get_passeador)
                .put(update_passeador)
                .patch(update_passeador)
                .delete(delete_passeador),
        )
}
