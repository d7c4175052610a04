use axum::{routing::get, Router};

use crate::api::controller::transaction::TransactionController;
use crate::app_state::AppState;

pub fn transaction_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(TransactionController::list).post(TransactionController::create))
        .route("/summary", get(TransactionController::summary))
        .route(
            "/{id}",
            get(TransactionController::get)
                .patch(TransactionController::patch)
                .delete(TransactionController::delete),
        )
}
