// Catalog management API
//
// Read endpoints (list, search, get) are public; every mutation requires an
// authenticated caller, enforced by the `User` extractor.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::info;

use super::error::{ApiError, ValidationErrorBuilder};
use super::validation::{
    validate_category, validate_price, validate_quantity, validate_restock_amount,
    validate_sweet_name,
};
use crate::db::{RestockRequest, Sweet, SweetRequest, User};
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct ListQuery {
    #[serde(default)]
    pub offset: i64,
    #[serde(default = "default_limit")]
    pub limit: i64,
}

fn default_limit() -> i64 {
    100
}

#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    pub q: Option<String>,
}

/// Response for purchase and restock operations
#[derive(Debug, Serialize)]
pub struct StockResponse {
    pub message: String,
    pub sweet: Sweet,
}

/// Response for delete
#[derive(Debug, Serialize)]
pub struct DeleteResponse {
    pub detail: String,
}

fn validate_sweet_request(req: &SweetRequest) -> Result<(), ApiError> {
    let mut errors = ValidationErrorBuilder::new();

    if let Err(e) = validate_sweet_name(&req.name) {
        errors.add("name", &e);
    }
    if let Err(e) = validate_category(&req.category) {
        errors.add("category", &e);
    }
    if let Err(e) = validate_price(req.price) {
        errors.add("price", &e);
    }
    if let Err(e) = validate_quantity(req.quantity) {
        errors.add("quantity", &e);
    }

    errors.finish()
}

async fn fetch_sweet(db: &crate::DbPool, id: i64) -> Result<Sweet, ApiError> {
    sqlx::query_as::<_, Sweet>("SELECT * FROM sweets WHERE id = ?")
        .bind(id)
        .fetch_optional(db)
        .await?
        .ok_or_else(|| ApiError::not_found("Sweet not found"))
}

/// Create a new sweet
///
/// POST /api/sweets
pub async fn create_sweet(
    State(state): State<Arc<AppState>>,
    _user: User,
    Json(req): Json<SweetRequest>,
) -> Result<(StatusCode, Json<Sweet>), ApiError> {
    validate_sweet_request(&req)?;

    let result =
        sqlx::query("INSERT INTO sweets (name, category, price, quantity) VALUES (?, ?, ?, ?)")
            .bind(&req.name)
            .bind(&req.category)
            .bind(req.price)
            .bind(req.quantity)
            .execute(&state.db)
            .await?;

    let sweet = fetch_sweet(&state.db, result.last_insert_rowid()).await?;

    info!(id = sweet.id, name = %sweet.name, "Sweet created");

    Ok((StatusCode::CREATED, Json(sweet)))
}

/// List sweets in insertion order, bounded by offset/limit
///
/// GET /api/sweets
pub async fn list_sweets(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ListQuery>,
) -> Result<Json<Vec<Sweet>>, ApiError> {
    let sweets = sqlx::query_as::<_, Sweet>("SELECT * FROM sweets ORDER BY id LIMIT ? OFFSET ?")
        .bind(query.limit)
        .bind(query.offset)
        .fetch_all(&state.db)
        .await?;

    Ok(Json(sweets))
}

/// Search sweets by name or category substring. An absent or empty query
/// returns an empty list, not the full catalog.
///
/// GET /api/sweets/search
pub async fn search_sweets(
    State(state): State<Arc<AppState>>,
    Query(query): Query<SearchQuery>,
) -> Result<Json<Vec<Sweet>>, ApiError> {
    let q = match query.q.as_deref() {
        Some(q) if !q.is_empty() => q,
        _ => return Ok(Json(Vec::new())),
    };

    // instr keeps the match case-sensitive; LIKE would fold ASCII case
    let sweets = sqlx::query_as::<_, Sweet>(
        "SELECT * FROM sweets WHERE instr(name, ?1) > 0 OR instr(category, ?1) > 0 ORDER BY id",
    )
    .bind(q)
    .fetch_all(&state.db)
    .await?;

    Ok(Json(sweets))
}

/// Get a single sweet by id
///
/// GET /api/sweets/:id
pub async fn get_sweet(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> Result<Json<Sweet>, ApiError> {
    let sweet = fetch_sweet(&state.db, id).await?;
    Ok(Json(sweet))
}

/// Update a sweet, replacing all four fields
///
/// PUT /api/sweets/:id
pub async fn update_sweet(
    State(state): State<Arc<AppState>>,
    _user: User,
    Path(id): Path<i64>,
    Json(req): Json<SweetRequest>,
) -> Result<Json<Sweet>, ApiError> {
    validate_sweet_request(&req)?;

    let result =
        sqlx::query("UPDATE sweets SET name = ?, category = ?, price = ?, quantity = ? WHERE id = ?")
            .bind(&req.name)
            .bind(&req.category)
            .bind(req.price)
            .bind(req.quantity)
            .bind(id)
            .execute(&state.db)
            .await?;

    if result.rows_affected() == 0 {
        return Err(ApiError::not_found("Sweet not found"));
    }

    let sweet = fetch_sweet(&state.db, id).await?;

    info!(id = sweet.id, "Sweet updated");

    Ok(Json(sweet))
}

/// Delete a sweet permanently
///
/// DELETE /api/sweets/:id
pub async fn delete_sweet(
    State(state): State<Arc<AppState>>,
    _user: User,
    Path(id): Path<i64>,
) -> Result<Json<DeleteResponse>, ApiError> {
    let result = sqlx::query("DELETE FROM sweets WHERE id = ?")
        .bind(id)
        .execute(&state.db)
        .await?;

    if result.rows_affected() == 0 {
        return Err(ApiError::not_found("Sweet not found"));
    }

    info!(id = id, "Sweet deleted");

    Ok(Json(DeleteResponse {
        detail: "Sweet deleted".to_string(),
    }))
}

/// Purchase one unit of a sweet
///
/// POST /api/sweets/:id/purchase
pub async fn purchase_sweet(
    State(state): State<Arc<AppState>>,
    _user: User,
    Path(id): Path<i64>,
) -> Result<Json<StockResponse>, ApiError> {
    // Conditional decrement: the stock check and the write are one statement,
    // so two concurrent purchases cannot drive the quantity negative.
    let result = sqlx::query("UPDATE sweets SET quantity = quantity - 1 WHERE id = ? AND quantity > 0")
        .bind(id)
        .execute(&state.db)
        .await?;

    if result.rows_affected() == 0 {
        // Distinguish a missing sweet from an empty shelf
        return match fetch_sweet(&state.db, id).await {
            Ok(_) => Err(ApiError::out_of_stock("Out of stock")),
            Err(e) => Err(e),
        };
    }

    let sweet = fetch_sweet(&state.db, id).await?;

    info!(id = sweet.id, quantity = sweet.quantity, "Sweet purchased");

    Ok(Json(StockResponse {
        message: "Purchase successful".to_string(),
        sweet,
    }))
}

/// Restock a sweet by a caller-supplied amount
///
/// POST /api/sweets/:id/restock
pub async fn restock_sweet(
    State(state): State<Arc<AppState>>,
    _user: User,
    Path(id): Path<i64>,
    Json(req): Json<RestockRequest>,
) -> Result<Json<StockResponse>, ApiError> {
    // The amount is deliberately not sign-checked: a negative restock acts as
    // a stock correction. Only its magnitude is bounded.
    if let Err(e) = validate_restock_amount(req.quantity) {
        let mut errors = ValidationErrorBuilder::new();
        errors.add("quantity", &e);
        errors.finish()?;
    }

    let result = sqlx::query("UPDATE sweets SET quantity = quantity + ? WHERE id = ?")
        .bind(req.quantity)
        .bind(id)
        .execute(&state.db)
        .await?;

    if result.rows_affected() == 0 {
        return Err(ApiError::not_found("Sweet not found"));
    }

    let sweet = fetch_sweet(&state.db, id).await?;

    info!(id = sweet.id, quantity = sweet.quantity, "Sweet restocked");

    Ok(Json(StockResponse {
        message: "Restock successful".to_string(),
        sweet,
    }))
}
