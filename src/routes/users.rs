use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use chrono::Utc;
use serde::Deserialize;
use uuid::Uuid;

use crate::error::AppError;
use crate::models::User;
use crate::query::{self, RoleFilter, Sort, SortDirection, SortField, StatusFilter, UserQuery};
use crate::state::SharedState;
use crate::validate::{self, CreateUser, UpdateUser};

#[derive(Deserialize)]
pub struct ListParams {
    pub search: Option<String>,
    pub status: Option<String>,
    pub role: Option<String>,
    pub sort_by: Option<String>,
    pub sort_order: Option<String>,
}

pub async fn list(
    State(state): State<SharedState>,
    Query(params): Query<ListParams>,
) -> Result<Json<Vec<User>>, AppError> {
    let users = state.store.list().await?;

    let user_query = UserQuery {
        search: params.search.unwrap_or_default(),
        status: StatusFilter::parse(params.status.as_deref().unwrap_or("all")),
        role: RoleFilter::parse(params.role.as_deref().unwrap_or("all")),
        sort: params.sort_by.as_deref().map(|field| Sort {
            field: SortField::parse(field),
            direction: SortDirection::parse(params.sort_order.as_deref().unwrap_or("asc")),
        }),
    };

    Ok(Json(query::apply(users, &user_query)))
}

pub async fn get(
    State(state): State<SharedState>,
    Path(id): Path<Uuid>,
) -> Result<Json<User>, AppError> {
    let user = state
        .store
        .get(id)
        .await?
        .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;
    Ok(Json(user))
}

pub async fn create(
    State(state): State<SharedState>,
    Json(req): Json<CreateUser>,
) -> Result<(StatusCode, Json<User>), AppError> {
    let new_user = validate::validate_create(&req).map_err(AppError::Validation)?;

    // Friendly pre-check; the store's uniqueness constraint is the backstop.
    let users = state.store.list().await?;
    validate::check_email_unique(&new_user.email, None, &users)
        .map_err(|e| AppError::Conflict(e.message))?;

    let now = Utc::now();
    let user = state
        .store
        .insert(User {
            id: Uuid::now_v7(),
            name: new_user.name,
            email: new_user.email,
            role: new_user.role,
            status: new_user.status,
            created_at: now,
            updated_at: now,
        })
        .await?;

    tracing::info!(user_id = %user.id, "User created");

    Ok((StatusCode::CREATED, Json(user)))
}

pub async fn update(
    State(state): State<SharedState>,
    Path(id): Path<Uuid>,
    Json(req): Json<UpdateUser>,
) -> Result<Json<User>, AppError> {
    let patch = validate::validate_update(&req).map_err(AppError::Validation)?;

    let current = state
        .store
        .get(id)
        .await?
        .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;

    // Re-check uniqueness only when the email actually changes.
    if let Some(email) = &patch.email {
        if *email != current.email {
            let users = state.store.list().await?;
            validate::check_email_unique(email, Some(id), &users)
                .map_err(|e| AppError::Conflict(e.message))?;
        }
    }

    let user = state.store.update(current.merged(patch, Utc::now())).await?;

    tracing::info!(user_id = %user.id, "User updated");

    Ok(Json(user))
}

pub async fn delete(
    State(state): State<SharedState>,
    Path(id): Path<Uuid>,
) -> Result<Json<serde_json::Value>, AppError> {
    let removed = state.store.delete(id).await?;
    if !removed {
        return Err(AppError::NotFound("User not found".to_string()));
    }

    tracing::info!(user_id = %id, "User deleted");

    Ok(Json(serde_json::json!({ "message": "User deleted" })))
}
