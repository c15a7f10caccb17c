use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    response::Json,
};

use crate::{
    models::application::{Application, CreateApplicationRequest, UpdateApplicationRequest},
    services::applications::ApplicationService,
    utils::errors::{AppError, APPLICATION_NOT_FOUND},
    AppState,
};

/// Path ids that are not integers cannot name a stored record.
fn parse_id(raw: &str) -> Result<i64, AppError> {
    raw.parse::<i64>()
        .map_err(|_| AppError::NotFound(APPLICATION_NOT_FOUND.to_string()))
}

/// A body sent without a JSON content type carries no fields; malformed JSON
/// or mistyped fields are a 400 with the usual error body.
fn json_body<T: Default>(payload: Result<Json<T>, JsonRejection>) -> Result<T, AppError> {
    match payload {
        Ok(Json(body)) => Ok(body),
        Err(JsonRejection::MissingJsonContentType(_)) => Ok(T::default()),
        Err(rejection) => Err(rejection.into()),
    }
}

pub async fn get_applications(State(state): State<AppState>) -> Json<Vec<Application>> {
    let service = ApplicationService::new(state.store.clone());
    Json(service.list().await)
}

pub async fn create_application(
    State(state): State<AppState>,
    payload: Result<Json<CreateApplicationRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<Application>), AppError> {
    let payload = json_body(payload)?;
    let service = ApplicationService::new(state.store.clone());
    let application = service.create(payload).await?;

    Ok((StatusCode::CREATED, Json(application)))
}

pub async fn update_application(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Result<Json<UpdateApplicationRequest>, JsonRejection>,
) -> Result<Json<Application>, AppError> {
    let id = parse_id(&id)?;
    let payload = json_body(payload)?;
    let service = ApplicationService::new(state.store.clone());
    let application = service.update(id, payload).await?;

    Ok(Json(application))
}

pub async fn delete_application(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, AppError> {
    let id = parse_id(&id)?;
    let service = ApplicationService::new(state.store.clone());
    service.delete(id).await?;

    Ok(StatusCode::NO_CONTENT)
}
