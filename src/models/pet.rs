//! Pet model.

use serde::{Deserialize, Serialize};

/// An adoptable pet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pet {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
    pub age: i64,
    pub location: String,
    /// Free text; casing is kept exactly as stored
    pub category: String,
    pub image: String,
}

/// A pet that has not been stored yet.
#[derive(Debug, Clone)]
pub struct NewPet {
    pub name: String,
    pub age: i64,
    pub location: String,
    pub category: String,
    pub image: String,
}
