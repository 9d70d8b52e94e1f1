/**
 * Collection Seed Loading
 *
 * Loads demo collections from a TOML file at startup, so a fresh server has
 * something to edit. Each entry carries the collection, its rights and any
 * learner completions.
 *
 * ```toml
 * [[collections]]
 * [collections.collection]
 * id = "0"
 * title = "Introduction to Fractions"
 *
 * [[collections.collection.nodes]]
 * exploration_id = "exp_0"
 * acquired_skills = ["fractions"]
 *
 * [collections.rights]
 * owner_ids = ["admin"]
 * status = "public"
 * ```
 */

use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;

use crate::backend::collections::store::InMemoryCollectionStore;
use crate::backend::server::config::ConfigError;
use crate::shared::{ActivityRights, Collection, UserId};

#[derive(Debug, Deserialize)]
pub struct SeedFile {
    #[serde(default)]
    pub collections: Vec<SeedCollection>,
}

#[derive(Debug, Deserialize)]
pub struct SeedCollection {
    pub collection: Collection,
    #[serde(default)]
    pub rights: ActivityRights,
    /// user id -> completed exploration ids
    #[serde(default)]
    pub completions: HashMap<String, Vec<String>>,
}

impl SeedFile {
    pub fn parse(contents: &str) -> Result<Self, ConfigError> {
        toml::from_str(contents).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::Io(format!("{}: {}", path.display(), e)))?;
        Self::parse(&contents)
    }

    /// Insert every seeded collection into `store`
    ///
    /// Returns the number of collections loaded.
    pub async fn apply(self, store: &InMemoryCollectionStore) -> Result<usize, ConfigError> {
        let mut loaded = 0;
        for seed in self.collections {
            let id = seed.collection.id.clone();
            store
                .insert_collection(seed.collection, seed.rights)
                .await
                .map_err(|e| ConfigError::InvalidValue(format!("collection {}: {}", id, e)))?;
            for (user_id, explorations) in seed.completions {
                let user_id = UserId::new(user_id);
                for exploration_id in explorations {
                    store
                        .record_completion(&id, &user_id, &exploration_id)
                        .await
                        .map_err(|e| ConfigError::InvalidValue(format!("collection {}: {}", id, e)))?;
                }
            }
            loaded += 1;
        }
        Ok(loaded)
    }
}
