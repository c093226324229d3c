//! User service: enrichment of new submissions plus CRUD pass-through
//!
//! Collaborators are injected as trait objects so the enrichment sequence
//! runs against test doubles without network or database.

use peopledir_common::db::{NameKey, PersonRecord};
use peopledir_common::Result;
use std::sync::Arc;

use crate::db::{UserFilter, UserStore};
use crate::inference::UserApi;

mod enrich;
pub mod resolve;

pub use enrich::{EnrichError, EnrichOutcome, EnrichStage, ErrorKind};
pub use resolve::{resolve_nation, FALLBACK_NATION};

#[derive(Clone)]
pub struct UserService {
    api: Arc<dyn UserApi>,
    store: Arc<dyn UserStore>,
}

impl UserService {
    pub fn new(api: Arc<dyn UserApi>, store: Arc<dyn UserStore>) -> Self {
        Self { api, store }
    }

    pub async fn list_users(&self, filter: &UserFilter) -> Result<Vec<PersonRecord>> {
        self.store.list(filter).await
    }

    pub async fn get_user(&self, id: i64) -> Result<PersonRecord> {
        self.store.get(id).await
    }

    /// Rename a record. Age, gender and nation are left as enriched.
    pub async fn edit_user(
        &self,
        id: i64,
        name: &str,
        surname: &str,
        patronymic: &str,
    ) -> Result<()> {
        self.store
            .update(id, &NameKey::new(name, surname, patronymic))
            .await?;
        tracing::info!(id, "User renamed");
        Ok(())
    }

    pub async fn delete_user(&self, id: i64) -> Result<()> {
        self.store.delete(id).await?;
        tracing::info!(id, "User deleted");
        Ok(())
    }
}
