//! Users: queries and the first-request seeder.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::config::{SeedConfig, SeedPolicy, SeedUser};
use crate::pipeline::gate::{Bootstrap, BootstrapReport};
use crate::store::schema::USERS;
use crate::store::{from_row, to_row, DataStore, Filter, StoreError};

/// Hydrated identity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    pub username: String,
    pub created_at: DateTime<Utc>,
}

pub async fn find_user(store: &dyn DataStore, id: &str) -> Result<Option<User>, StoreError> {
    let rows = store.select(USERS, &Filter::eq("id", id)).await?;
    rows.into_iter().next().map(from_row).transpose()
}

pub async fn all_users(store: &dyn DataStore) -> Result<Vec<User>, StoreError> {
    store
        .select(USERS, &Filter::all())
        .await?
        .into_iter()
        .map(from_row)
        .collect()
}

pub async fn has_users(store: &dyn DataStore) -> Result<bool, StoreError> {
    Ok(!store.select(USERS, &Filter::all()).await?.is_empty())
}

/// Clear the users table and insert `users`. Notes of removed users go too.
pub async fn seed_users(store: &dyn DataStore, users: &[SeedUser]) -> Result<usize, StoreError> {
    let removed = store.delete(USERS, &Filter::all()).await?;
    if removed > 0 {
        tracing::debug!(removed, "Cleared users before seeding");
    }

    let now = Utc::now();
    let rows = users
        .iter()
        .map(|u| {
            to_row(&User {
                id: u.id.clone(),
                username: u.username.clone(),
                created_at: now,
            })
        })
        .collect::<Result<Vec<_>, _>>()?;
    store.insert(USERS, rows).await
}

/// Bootstrap action run behind the initialization gate.
pub struct UserSeeder {
    store: Arc<dyn DataStore>,
    policy: SeedPolicy,
    users: Vec<SeedUser>,
}

impl UserSeeder {
    pub fn new(store: Arc<dyn DataStore>, config: &SeedConfig) -> Self {
        Self {
            store,
            policy: config.policy,
            users: config.users.clone(),
        }
    }
}

#[async_trait]
impl Bootstrap for UserSeeder {
    fn name(&self) -> &'static str {
        "seed_users"
    }

    async fn run(&self) -> Result<BootstrapReport, Box<dyn std::error::Error + Send + Sync>> {
        if self.policy == SeedPolicy::IfEmpty && has_users(self.store.as_ref()).await? {
            return Ok(BootstrapReport::Skipped);
        }
        let rows = seed_users(self.store.as_ref(), &self.users).await?;
        Ok(BootstrapReport::Applied { rows })
    }
}
