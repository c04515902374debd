//! Adoption API endpoints.

use axum::{extract::rejection::JsonRejection, extract::State, Json};

use super::{created, ApiResult, Created};
use crate::errors::AppError;
use crate::models::CreateAdoptionRequest;
use crate::AppState;

/// POST /adoption - Record an adoption request.
pub async fn create_adoption(
    State(state): State<AppState>,
    payload: Result<Json<CreateAdoptionRequest>, JsonRejection>,
) -> ApiResult<Created> {
    let Json(request) = payload?;

    let Some((pet_id, user_id)) = request.identifiers() else {
        return Err(AppError::InvalidInput(
            "petId and userId are required".to_string(),
        ));
    };

    let adoption = state.repo.create_adoption(&pet_id, &user_id).await?;
    tracing::info!(
        adoption_id = %adoption.id,
        pet_id = %adoption.pet_id,
        "Adoption request recorded"
    );

    Ok(created("Adoption request submitted", adoption.id))
}
