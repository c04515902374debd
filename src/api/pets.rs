//! Pet API endpoints.

use axum::{
    extract::{Path, State},
    Json,
};
use uuid::Uuid;

use super::ApiResult;
use crate::errors::AppError;
use crate::models::Pet;
use crate::AppState;

/// GET /pet - List all pets.
pub async fn list_pets(State(state): State<AppState>) -> ApiResult<Json<Vec<Pet>>> {
    let pets = state.repo.list_pets().await?;
    Ok(Json(pets))
}

/// GET /pet/:id - Get a single pet.
pub async fn get_pet(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<Pet>> {
    let pet_id = Uuid::parse_str(&id)
        .map_err(|_| AppError::InvalidInput(format!("Invalid pet id: {}", id)))?;

    match state.repo.get_pet(&pet_id).await? {
        Some(pet) => Ok(Json(pet)),
        None => Err(AppError::NotFound(format!("Pet {} not found", id))),
    }
}
