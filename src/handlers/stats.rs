use axum::{extract::State, response::Json};

use crate::{
    services::{applications::ApplicationService, stats::ApplicationStats},
    AppState,
};

pub async fn get_stats(State(state): State<AppState>) -> Json<ApplicationStats> {
    let service = ApplicationService::new(state.store.clone());
    Json(service.stats().await)
}
