//! Startup seeding for empty collections.
//!
//! Each collection is filled only when it is empty, so running the loader
//! against populated data changes nothing. Two processes booting against the
//! same empty store at once can both insert.

use super::Repository;
use crate::errors::AppError;
use crate::models::{CampaignDraft, NewCampaign, NewPet};

/// How many documents each collection received.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SeedReport {
    pub pets_inserted: usize,
    pub campaigns_inserted: usize,
}

/// Insert the literal datasets into whichever collections are empty.
pub async fn seed_collections(repo: &Repository) -> Result<SeedReport, AppError> {
    let mut report = SeedReport::default();

    if repo.count_pets().await? == 0 {
        report.pets_inserted = repo.insert_pets(&seed_pets()).await?.len();
        tracing::info!("Seeded {} pets", report.pets_inserted);
    } else {
        tracing::debug!("Pets collection already populated, skipping seed");
    }

    if repo.count_campaigns().await? == 0 {
        let drafts: Vec<CampaignDraft> = seed_campaigns().into_iter().map(Into::into).collect();
        report.campaigns_inserted = repo.insert_campaigns(&drafts).await?.len();
        tracing::info!("Seeded {} campaigns", report.campaigns_inserted);
    } else {
        tracing::debug!("Campaigns collection already populated, skipping seed");
    }

    Ok(report)
}

fn pet(name: &str, age: i64, location: &str, category: &str, image: &str) -> NewPet {
    NewPet {
        name: name.to_string(),
        age,
        location: location.to_string(),
        category: category.to_string(),
        image: image.to_string(),
    }
}

/// Pets shown to a fresh install. Category casing is left as entered.
pub fn seed_pets() -> Vec<NewPet> {
    vec![
        pet("Milo", 2, "Dhaka", "cat", "https://i.ibb.co/3yQ6Ykq/milo.jpg"),
        pet("Luna", 1, "Chattogram", "Cat", "https://i.ibb.co/7tcZqkV/luna.jpg"),
        pet("Rocky", 4, "Sylhet", "dog", "https://i.ibb.co/0jG1bQx/rocky.jpg"),
        pet("Bella", 3, "Khulna", "Dog", "https://i.ibb.co/Fz5kq0H/bella.jpg"),
        pet("Coco", 1, "Rajshahi", "rabbit", "https://i.ibb.co/yWkJ1pZ/coco.jpg"),
        pet("Kiwi", 2, "Dhaka", "bird", "https://i.ibb.co/MkP0Zc9/kiwi.jpg"),
        pet("Nemo", 1, "Barishal", "fish", "https://i.ibb.co/5hXyV2s/nemo.jpg"),
        pet("Shadow", 5, "Rangpur", "cat", "https://i.ibb.co/k0pR9rM/shadow.jpg"),
    ]
}

/// Campaigns shown to a fresh install.
pub fn seed_campaigns() -> Vec<NewCampaign> {
    vec![
        NewCampaign {
            title: "Help Rocky walk again".to_string(),
            description: "Surgery and physiotherapy for a rescued dog with a broken leg."
                .to_string(),
            target_amount: 1500.0,
            current_amount: 420.0,
        },
        NewCampaign {
            title: "Winter shelter for street cats".to_string(),
            description: "Insulated boxes and bedding for the cats around the old market."
                .to_string(),
            target_amount: 800.0,
            current_amount: 150.0,
        },
        NewCampaign {
            title: "Vaccination drive".to_string(),
            description: "Rabies and core vaccines for fifty shelter animals.".to_string(),
            target_amount: 2500.0,
            current_amount: 0.0,
        },
    ]
}
