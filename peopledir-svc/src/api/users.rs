//! User endpoints
//!
//! Empty-field rejection happens here; the service trusts its input.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use peopledir_common::db::PersonRecord;
use peopledir_common::Error;
use serde::Deserialize;
use serde_json::json;

use super::ApiFailure;
use crate::db::{UserFilter, UserFilterParams};
use crate::service::EnrichOutcome;
use crate::AppState;

/// Body of POST /users and PUT /users/:id
#[derive(Debug, Deserialize)]
pub struct UserForm {
    pub name: String,
    pub surname: String,
    pub patronymic: String,
}

impl UserForm {
    fn validate(&self) -> Result<(), Error> {
        for (field, value) in [
            ("name", &self.name),
            ("surname", &self.surname),
            ("patronymic", &self.patronymic),
        ] {
            if value.trim().is_empty() {
                return Err(Error::InvalidInput(format!("{} must not be empty", field)));
            }
        }
        Ok(())
    }
}

/// GET /users?age_min=&age_max=&gender=&nation=
pub async fn list_users(
    State(state): State<AppState>,
    Query(params): Query<UserFilterParams>,
) -> Result<Json<Vec<PersonRecord>>, ApiFailure> {
    let filter = UserFilter::try_from(params)?;
    let users = state.service.list_users(&filter).await?;
    Ok(Json(users))
}

/// POST /users
///
/// 201 with the new id, or 200 `skipped` when the full name is already stored.
pub async fn create_user(
    State(state): State<AppState>,
    Json(form): Json<UserForm>,
) -> Result<Response, ApiFailure> {
    form.validate()?;

    let outcome = state
        .service
        .handle_user(&form.name, &form.surname, &form.patronymic)
        .await?;

    let response = match outcome {
        EnrichOutcome::Created(id) => (
            StatusCode::CREATED,
            Json(json!({ "status": "created", "id": id })),
        )
            .into_response(),
        EnrichOutcome::Skipped => {
            (StatusCode::OK, Json(json!({ "status": "skipped" }))).into_response()
        }
    };
    Ok(response)
}

/// GET /users/:id
pub async fn get_user(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<PersonRecord>, ApiFailure> {
    Ok(Json(state.service.get_user(id).await?))
}

/// PUT /users/:id
pub async fn edit_user(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(form): Json<UserForm>,
) -> Result<Json<PersonRecord>, ApiFailure> {
    form.validate()?;

    state
        .service
        .edit_user(id, &form.name, &form.surname, &form.patronymic)
        .await?;

    Ok(Json(state.service.get_user(id).await?))
}

/// DELETE /users/:id
pub async fn delete_user(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<StatusCode, ApiFailure> {
    state.service.delete_user(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
