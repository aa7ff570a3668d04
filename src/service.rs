use crate::database::Database;
use crate::errors::ApiError;
use crate::models::ApiKey;
use crate::security::KeyGenerator;

/// The four key operations. Each one is a single round trip to the store.
#[derive(Clone)]
pub struct ApiKeyService {
    pub db: Database,
    pub generator: KeyGenerator,
}

impl ApiKeyService {
    pub fn new(db: Database, generator: KeyGenerator) -> Self {
        Self { db, generator }
    }

    pub fn list(&self) -> Result<Vec<ApiKey>, ApiError> {
        self.db.list_api_keys()
    }

    /// Does not reject an empty `name`; that guard lives in the dashboard.
    pub fn create(&self, name: &str) -> Result<ApiKey, ApiError> {
        let value = self.generator.generate();
        let api_key = self.db.insert_api_key(name, &value, 0)?;
        tracing::info!(id = %api_key.id, "API key created");
        Ok(api_key)
    }

    pub fn rename(&self, id: &str, name: &str) -> Result<ApiKey, ApiError> {
        let api_key = self.db.update_api_key_name(id, name)?;
        tracing::info!(id = %api_key.id, "API key renamed");
        Ok(api_key)
    }

    /// Idempotent: an unknown id is a successful no-op.
    pub fn delete(&self, id: &str) -> Result<(), ApiError> {
        let removed = self.db.delete_api_key(id)?;
        if removed == 0 {
            tracing::debug!(id, "Delete matched no API key");
        } else {
            tracing::info!(id, "API key deleted");
        }
        Ok(())
    }
}
