use std::sync::Arc;

use axum::{
    extract::{Query, State},
    Json,
};
use uuid::Uuid;

use crate::core::error::{AppError, Result};
use crate::core::extractor::{AppJson, AppPath};
use crate::features::auth::model::AuthenticatedUser;
use crate::features::categories::dtos::{
    CategoryRequestDto, CategoryResponseDto, ListCategoriesQuery,
};
use crate::features::categories::services::CategoryService;
use crate::shared::lifecycle::Scope;
use crate::shared::types::ApiResponse;

/// Create a new category
#[utoipa::path(
    post,
    path = "/categories",
    request_body = CategoryRequestDto,
    responses(
        (status = 200, description = "Category created", body = ApiResponse<CategoryResponseDto>),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Missing or invalid token"),
        (status = 409, description = "Name or slug already taken")
    ),
    tag = "categories",
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn create_category(
    user: AuthenticatedUser,
    State(service): State<Arc<CategoryService>>,
    AppJson(dto): AppJson<CategoryRequestDto>,
) -> Result<Json<ApiResponse<CategoryResponseDto>>> {
    let category = service.create(dto).await?;
    tracing::debug!(user_id = %user.user_id, category_id = %category.id, "category created");
    Ok(Json(ApiResponse::success(
        "Category created successfully",
        Some(category),
    )))
}

/// List categories
///
/// Active categories by default. `scope=trashed` and `scope=all` expose the
/// trash and need a bearer token.
#[utoipa::path(
    get,
    path = "/categories",
    params(ListCategoriesQuery),
    responses(
        (status = 200, description = "List of categories", body = ApiResponse<Vec<CategoryResponseDto>>),
        (status = 401, description = "Scope other than active requested without a valid token")
    ),
    tag = "categories",
    security(
        (),
        ("bearer_auth" = [])
    )
)]
pub async fn list_categories(
    user: Option<AuthenticatedUser>,
    State(service): State<Arc<CategoryService>>,
    Query(query): Query<ListCategoriesQuery>,
) -> Result<Json<ApiResponse<Vec<CategoryResponseDto>>>> {
    if query.scope != Scope::Active && user.is_none() {
        return Err(AppError::Unauthorized(
            "Authentication required to list trashed categories".to_string(),
        ));
    }

    let categories = service.list(query.scope).await?;
    Ok(Json(ApiResponse::success(
        "Categories retrieved successfully",
        Some(categories),
    )))
}

/// Get an active category by id
#[utoipa::path(
    get,
    path = "/categories/{id}",
    params(
        ("id" = Uuid, Path, description = "Category ID")
    ),
    responses(
        (status = 200, description = "Category found", body = ApiResponse<CategoryResponseDto>),
        (status = 404, description = "Category not found or in the trash")
    ),
    tag = "categories"
)]
pub async fn get_category(
    State(service): State<Arc<CategoryService>>,
    AppPath(id): AppPath<Uuid>,
) -> Result<Json<ApiResponse<CategoryResponseDto>>> {
    let category = service.get_by_id(id).await?;
    Ok(Json(ApiResponse::success(
        "Category retrieved successfully",
        Some(category),
    )))
}

/// Rename a category (the slug follows the name)
#[utoipa::path(
    put,
    path = "/categories/{id}",
    params(
        ("id" = Uuid, Path, description = "Category ID")
    ),
    request_body = CategoryRequestDto,
    responses(
        (status = 200, description = "Category updated", body = ApiResponse<CategoryResponseDto>),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Missing or invalid token"),
        (status = 404, description = "Category not found"),
        (status = 409, description = "Name or slug already taken")
    ),
    tag = "categories",
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn update_category(
    user: AuthenticatedUser,
    State(service): State<Arc<CategoryService>>,
    AppPath(id): AppPath<Uuid>,
    AppJson(dto): AppJson<CategoryRequestDto>,
) -> Result<Json<ApiResponse<CategoryResponseDto>>> {
    let category = service.update(id, dto).await?;
    tracing::debug!(user_id = %user.user_id, category_id = %id, "category updated");
    Ok(Json(ApiResponse::success(
        "Category updated successfully",
        Some(category),
    )))
}

/// Move a category to the trash (soft delete)
#[utoipa::path(
    delete,
    path = "/categories/{id}",
    params(
        ("id" = Uuid, Path, description = "Category ID")
    ),
    responses(
        (status = 200, description = "Category moved to trash"),
        (status = 401, description = "Missing or invalid token"),
        (status = 404, description = "Category not found")
    ),
    tag = "categories",
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn delete_category(
    user: AuthenticatedUser,
    State(service): State<Arc<CategoryService>>,
    AppPath(id): AppPath<Uuid>,
) -> Result<Json<ApiResponse<()>>> {
    service.delete(id).await?;
    tracing::debug!(user_id = %user.user_id, category_id = %id, "category trashed");
    Ok(Json(ApiResponse::success(
        "The category has been deleted successfully",
        None,
    )))
}

/// List categories in the trash
#[utoipa::path(
    get,
    path = "/categories/trash",
    responses(
        (status = 200, description = "Soft-deleted categories", body = ApiResponse<Vec<CategoryResponseDto>>),
        (status = 401, description = "Missing or invalid token")
    ),
    tag = "categories",
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn list_trashed_categories(
    _user: AuthenticatedUser,
    State(service): State<Arc<CategoryService>>,
) -> Result<Json<ApiResponse<Vec<CategoryResponseDto>>>> {
    let categories = service.list(Scope::Trashed).await?;
    Ok(Json(ApiResponse::success(
        "Trashed categories retrieved successfully",
        Some(categories),
    )))
}

/// Restore a category from the trash
#[utoipa::path(
    post,
    path = "/categories/{id}/restore",
    params(
        ("id" = Uuid, Path, description = "Category ID")
    ),
    responses(
        (status = 200, description = "Category restored", body = ApiResponse<CategoryResponseDto>),
        (status = 400, description = "Category is not in the trash"),
        (status = 401, description = "Missing or invalid token"),
        (status = 404, description = "Category not found"),
        (status = 409, description = "An active category already uses the name or slug")
    ),
    tag = "categories",
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn restore_category(
    user: AuthenticatedUser,
    State(service): State<Arc<CategoryService>>,
    AppPath(id): AppPath<Uuid>,
) -> Result<Json<ApiResponse<CategoryResponseDto>>> {
    let category = service.restore(id).await?;
    tracing::debug!(user_id = %user.user_id, category_id = %id, "category restored");
    Ok(Json(ApiResponse::success(
        "The category has been restored successfully",
        Some(category),
    )))
}

/// Delete a category permanently, whether active or trashed
#[utoipa::path(
    delete,
    path = "/categories/{id}/permanent",
    params(
        ("id" = Uuid, Path, description = "Category ID")
    ),
    responses(
        (status = 200, description = "Category deleted permanently"),
        (status = 401, description = "Missing or invalid token"),
        (status = 404, description = "Category not found")
    ),
    tag = "categories",
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn delete_category_permanent(
    user: AuthenticatedUser,
    State(service): State<Arc<CategoryService>>,
    AppPath(id): AppPath<Uuid>,
) -> Result<Json<ApiResponse<()>>> {
    service.delete_permanent(id).await?;
    tracing::debug!(user_id = %user.user_id, category_id = %id, "category purged");
    Ok(Json(ApiResponse::success(
        "The category has been deleted permanently",
        None,
    )))
}
