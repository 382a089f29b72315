//! Equipment category endpoints

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use validator::Validate;

use crate::{
    error::{AppError, AppResult},
    models::category::{CreateCategory, EquipmentCategory, UpdateCategory},
};

use super::CurrentUser;

/// List all categories
#[utoipa::path(
    get,
    path = "/categories",
    tag = "categories",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Category list", body = Vec<EquipmentCategory>)
    )
)]
pub async fn list_categories(
    State(state): State<crate::AppState>,
    CurrentUser(_actor): CurrentUser,
) -> AppResult<Json<Vec<EquipmentCategory>>> {
    let categories = state.services.categories.list().await?;
    Ok(Json(categories))
}

/// Create a category (manager only)
#[utoipa::path(
    post,
    path = "/categories",
    tag = "categories",
    security(("bearer_auth" = [])),
    request_body = CreateCategory,
    responses(
        (status = 201, description = "Category created", body = EquipmentCategory),
        (status = 403, description = "Managers only")
    )
)]
pub async fn create_category(
    State(state): State<crate::AppState>,
    CurrentUser(actor): CurrentUser,
    Json(data): Json<CreateCategory>,
) -> AppResult<(StatusCode, Json<EquipmentCategory>)> {
    data.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;
    let category = state.services.categories.create(&actor, data).await?;
    Ok((StatusCode::CREATED, Json(category)))
}

/// Update a category (manager only)
#[utoipa::path(
    put,
    path = "/categories/{id}",
    tag = "categories",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Category ID")),
    request_body = UpdateCategory,
    responses(
        (status = 200, description = "Category updated", body = EquipmentCategory),
        (status = 403, description = "Managers only"),
        (status = 404, description = "Category not found")
    )
)]
pub async fn update_category(
    State(state): State<crate::AppState>,
    CurrentUser(actor): CurrentUser,
    Path(id): Path<i32>,
    Json(data): Json<UpdateCategory>,
) -> AppResult<Json<EquipmentCategory>> {
    data.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;
    let category = state.services.categories.update(&actor, id, data).await?;
    Ok(Json(category))
}
