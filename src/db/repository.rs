//! Database repository for the pet, adoption and campaign collections.
//!
//! Request handlers issue exactly one call here per request.

use serde_json::{Map, Value};
use sqlx::{Row, SqlitePool};

use crate::errors::AppError;
use crate::models::{
    new_document_id, timestamp_now, AdoptionRequest, Campaign, CampaignDraft, NewPet, Pet,
};

/// Database repository for all data operations.
#[derive(Clone)]
pub struct Repository {
    pool: SqlitePool,
}

impl Repository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Close the underlying pool, waiting for checked-out connections to return.
    pub async fn close(&self) {
        self.pool.close().await;
    }

    // ==================== PET OPERATIONS ====================

    /// Count stored pets.
    pub async fn count_pets(&self) -> Result<i64, AppError> {
        let row = sqlx::query("SELECT COUNT(*) AS count FROM pets")
            .fetch_one(&self.pool)
            .await?;
        Ok(row.get("count"))
    }

    /// List all pets in insertion order.
    pub async fn list_pets(&self) -> Result<Vec<Pet>, AppError> {
        let rows = sqlx::query(
            "SELECT id, name, age, location, category, image FROM pets ORDER BY rowid",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.iter().map(pet_from_row).collect())
    }

    /// Get a pet by ID.
    pub async fn get_pet(&self, id: &uuid::Uuid) -> Result<Option<Pet>, AppError> {
        let row = sqlx::query(
            "SELECT id, name, age, location, category, image FROM pets WHERE id = ?",
        )
        .bind(id.to_string())
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.as_ref().map(pet_from_row))
    }

    /// Insert a batch of pets in one transaction.
    pub async fn insert_pets(&self, pets: &[NewPet]) -> Result<Vec<Pet>, AppError> {
        let mut tx = self.pool.begin().await?;
        let mut stored = Vec::with_capacity(pets.len());

        for pet in pets {
            let id = new_document_id();
            sqlx::query(
                "INSERT INTO pets (id, name, age, location, category, image) VALUES (?, ?, ?, ?, ?, ?)",
            )
            .bind(&id)
            .bind(&pet.name)
            .bind(pet.age)
            .bind(&pet.location)
            .bind(&pet.category)
            .bind(&pet.image)
            .execute(&mut *tx)
            .await?;

            stored.push(Pet {
                id,
                name: pet.name.clone(),
                age: pet.age,
                location: pet.location.clone(),
                category: pet.category.clone(),
                image: pet.image.clone(),
            });
        }

        tx.commit().await?;
        Ok(stored)
    }

    // ==================== ADOPTION OPERATIONS ====================

    /// Record an adoption request with a server-assigned timestamp.
    pub async fn create_adoption(
        &self,
        pet_id: &str,
        user_id: &str,
    ) -> Result<AdoptionRequest, AppError> {
        let id = new_document_id();
        let now = timestamp_now();

        sqlx::query("INSERT INTO adoptions (id, pet_id, user_id, created_at) VALUES (?, ?, ?, ?)")
            .bind(&id)
            .bind(pet_id)
            .bind(user_id)
            .bind(&now)
            .execute(&self.pool)
            .await?;

        Ok(AdoptionRequest {
            id,
            pet_id: pet_id.to_string(),
            user_id: user_id.to_string(),
            created_at: now,
        })
    }

    // ==================== CAMPAIGN OPERATIONS ====================

    /// Count stored campaigns.
    pub async fn count_campaigns(&self) -> Result<i64, AppError> {
        let row = sqlx::query("SELECT COUNT(*) AS count FROM campaigns")
            .fetch_one(&self.pool)
            .await?;
        Ok(row.get("count"))
    }

    /// List one page of campaigns, newest first.
    pub async fn list_campaigns(&self, skip: i64, limit: i64) -> Result<Vec<Campaign>, AppError> {
        // rowid breaks ties between campaigns created within the same microsecond
        let rows = sqlx::query(
            "SELECT id, document, created_at FROM campaigns ORDER BY created_at DESC, rowid DESC LIMIT ? OFFSET ?",
        )
        .bind(limit)
        .bind(skip)
        .fetch_all(&self.pool)
        .await?;

        rows.iter().map(campaign_from_row).collect()
    }

    /// Store a campaign with a server-assigned identifier and timestamp.
    pub async fn create_campaign(&self, draft: &CampaignDraft) -> Result<Campaign, AppError> {
        let id = new_document_id();
        let now = timestamp_now();
        let document = serde_json::to_string(draft.fields())?;

        sqlx::query("INSERT INTO campaigns (id, document, created_at) VALUES (?, ?, ?)")
            .bind(&id)
            .bind(&document)
            .bind(&now)
            .execute(&self.pool)
            .await?;

        Ok(Campaign {
            id,
            created_at: now,
            fields: draft.fields().clone(),
        })
    }

    /// Insert a batch of campaigns in one transaction.
    pub async fn insert_campaigns(
        &self,
        drafts: &[CampaignDraft],
    ) -> Result<Vec<Campaign>, AppError> {
        let mut tx = self.pool.begin().await?;
        let mut stored = Vec::with_capacity(drafts.len());

        for draft in drafts {
            let id = new_document_id();
            let now = timestamp_now();
            let document = serde_json::to_string(draft.fields())?;

            sqlx::query("INSERT INTO campaigns (id, document, created_at) VALUES (?, ?, ?)")
                .bind(&id)
                .bind(&document)
                .bind(&now)
                .execute(&mut *tx)
                .await?;

            stored.push(Campaign {
                id,
                created_at: now,
                fields: draft.fields().clone(),
            });
        }

        tx.commit().await?;
        Ok(stored)
    }
}

// Helper functions for row conversion

fn pet_from_row(row: &sqlx::sqlite::SqliteRow) -> Pet {
    Pet {
        id: row.get("id"),
        name: row.get("name"),
        age: row.get("age"),
        location: row.get("location"),
        category: row.get("category"),
        image: row.get("image"),
    }
}

fn campaign_from_row(row: &sqlx::sqlite::SqliteRow) -> Result<Campaign, AppError> {
    let document: String = row.get("document");
    let fields: Map<String, Value> = serde_json::from_str(&document)?;
    Ok(Campaign {
        id: row.get("id"),
        created_at: row.get("created_at"),
        fields,
    })
}
