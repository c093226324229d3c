//! Storage layer for person records
//!
//! [`UserStore`] is the seam the enrichment service depends on;
//! [`SqliteUserStore`] is the production implementation.

use async_trait::async_trait;
use peopledir_common::db::{Gender, NameKey, NewPerson, PersonRecord};
use peopledir_common::Result;
use serde::Deserialize;

mod users;
pub use users::SqliteUserStore;

/// Optional predicates for listing; absent fields do not filter
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UserFilter {
    pub age_min: Option<u32>,
    pub age_max: Option<u32>,
    pub gender: Option<Gender>,
    pub nation: Option<String>,
}

impl UserFilter {
    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }
}

/// Raw filter as it arrives in a query string
#[derive(Debug, Default, Deserialize)]
pub struct UserFilterParams {
    pub age_min: Option<u32>,
    pub age_max: Option<u32>,
    pub gender: Option<String>,
    pub nation: Option<String>,
}

impl TryFrom<UserFilterParams> for UserFilter {
    type Error = peopledir_common::Error;

    fn try_from(params: UserFilterParams) -> Result<Self> {
        let gender = match params.gender.as_deref() {
            None | Some("") => None,
            Some(raw) => Some(Gender::parse(raw).ok_or_else(|| {
                peopledir_common::Error::InvalidInput(format!("Unknown gender '{}'", raw))
            })?),
        };

        Ok(Self {
            age_min: params.age_min,
            age_max: params.age_max,
            gender,
            nation: params.nation.filter(|n| !n.is_empty()),
        })
    }
}

/// Persistence operations on the `users` relation
#[async_trait]
pub trait UserStore: Send + Sync {
    /// True if a record with exactly this name tuple exists (read-only)
    async fn exists(&self, key: &NameKey) -> Result<bool>;

    /// Insert and return the new id; a duplicate name tuple is `Error::Conflict`
    async fn create(&self, person: &NewPerson) -> Result<i64>;

    /// `Error::NotFound` when no row has this id
    async fn get(&self, id: i64) -> Result<PersonRecord>;

    /// All matching records ordered by id
    async fn list(&self, filter: &UserFilter) -> Result<Vec<PersonRecord>>;

    /// Rewrite only the name fields
    async fn update(&self, id: i64, key: &NameKey) -> Result<()>;

    async fn delete(&self, id: i64) -> Result<()>;
}
