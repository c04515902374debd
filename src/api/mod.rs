//! REST API module.
//!
//! One handler per route. Successful reads return the bare documents; writes
//! answer 201 with a short confirmation.

mod adoptions;
mod campaigns;
mod pets;

pub use adoptions::*;
pub use campaigns::*;
pub use pets::*;

use axum::{http::StatusCode, Json};
use serde::{Deserialize, Serialize};

use crate::errors::AppError;

/// Confirmation body for created documents.
#[derive(Debug, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
    pub id: String,
}

/// Response for a successful insert.
pub type Created = (StatusCode, Json<MessageResponse>);

/// Handler result; errors are turned into responses by `AppError`.
pub type ApiResult<T> = Result<T, AppError>;

/// Create a 201 response naming the stored document.
pub fn created(message: &str, id: String) -> Created {
    (
        StatusCode::CREATED,
        Json(MessageResponse {
            message: message.to_string(),
            id,
        }),
    )
}
