//! Enrichment of a new submission
//!
//! ```text
//! FetchingAge -> FetchingGender -> FetchingNation -> ResolvingNation
//!     -> CheckingDup -> (Skip | Persisting) -> Done
//! ```
//!
//! Calls run one after another; the first fetch or decode failure ends
//! the run and nothing is written.

use peopledir_common::db::{Gender, NameKey, NewPerson};
use peopledir_common::Error;
use thiserror::Error;
use tracing::{debug, info, warn};

use super::resolve::resolve_nation;
use super::UserService;
use crate::inference::{
    parse_age, parse_gender, parse_nation, ApiError, InferenceKind, ParseError,
};

/// Step of the enrichment sequence
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnrichStage {
    FetchingAge,
    FetchingGender,
    FetchingNation,
    ResolvingNation,
    CheckingDup,
    Persisting,
}

impl From<InferenceKind> for EnrichStage {
    fn from(kind: InferenceKind) -> Self {
        match kind {
            InferenceKind::Age => EnrichStage::FetchingAge,
            InferenceKind::Gender => EnrichStage::FetchingGender,
            InferenceKind::Nation => EnrichStage::FetchingNation,
        }
    }
}

/// Successful end states
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnrichOutcome {
    /// New record written with this id
    Created(i64),
    /// Same name tuple already stored; nothing written
    Skipped,
}

/// Coarse error class, for callers that map errors to responses
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Network,
    UpstreamMalformed,
    Storage,
    NotFound,
}

#[derive(Debug, Error)]
pub enum EnrichError {
    #[error("failed to get {kind} from api: {source}")]
    Fetch {
        kind: InferenceKind,
        #[source]
        source: ApiError,
    },

    #[error("failed to decode {kind} from api: {source}")]
    Malformed {
        kind: InferenceKind,
        #[source]
        source: ParseError,
    },

    #[error("failed to check user: {0}")]
    DedupCheck(#[source] Error),

    #[error("failed to create user: {0}")]
    Persist(#[source] Error),
}

impl EnrichError {
    /// Stage the sequence was in when it failed
    pub fn stage(&self) -> EnrichStage {
        match self {
            EnrichError::Fetch { kind, .. } | EnrichError::Malformed { kind, .. } => {
                EnrichStage::from(*kind)
            }
            EnrichError::DedupCheck(_) => EnrichStage::CheckingDup,
            EnrichError::Persist(_) => EnrichStage::Persisting,
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            EnrichError::Fetch { .. } => ErrorKind::Network,
            EnrichError::Malformed { .. } => ErrorKind::UpstreamMalformed,
            EnrichError::DedupCheck(Error::NotFound(_)) | EnrichError::Persist(Error::NotFound(_)) => {
                ErrorKind::NotFound
            }
            EnrichError::DedupCheck(_) | EnrichError::Persist(_) => ErrorKind::Storage,
        }
    }
}

impl UserService {
    /// Enrich a name tuple and store it unless an identical one exists.
    ///
    /// Input validation (non-empty fields) is the caller's job.
    pub async fn handle_user(
        &self,
        name: &str,
        surname: &str,
        patronymic: &str,
    ) -> Result<EnrichOutcome, EnrichError> {
        let key = NameKey::new(name, surname, patronymic);

        let age = self.infer(InferenceKind::Age, name, parse_age).await?;
        info!(name = %name, age = age.age, "Age API answered");

        let gender = self.infer(InferenceKind::Gender, name, parse_gender).await?;
        info!(
            name = %name,
            gender = %gender.gender,
            probability = gender.probability,
            "Gender API answered"
        );

        let nation = self.infer(InferenceKind::Nation, name, parse_nation).await?;
        info!(name = %name, countries = ?nation.country, "Nationality API answered");

        debug!(stage = ?EnrichStage::ResolvingNation, name = %name);
        let person = NewPerson {
            age: age.age,
            gender: Gender::from_inferred(&gender.gender),
            nation: resolve_nation(&nation.country),
            key,
        };

        debug!(stage = ?EnrichStage::CheckingDup, name = %name);
        if self
            .store
            .exists(&person.key)
            .await
            .map_err(EnrichError::DedupCheck)?
        {
            info!(
                name = %person.key.name,
                surname = %person.key.surname,
                patronymic = %person.key.patronymic,
                "User with the same full name already exists, skipping"
            );
            return Ok(EnrichOutcome::Skipped);
        }

        debug!(stage = ?EnrichStage::Persisting, name = %name);
        match self.store.create(&person).await {
            Ok(id) => {
                info!(
                    id,
                    age = person.age,
                    gender = %person.gender,
                    nation = %person.nation,
                    "User created"
                );
                Ok(EnrichOutcome::Created(id))
            }
            Err(Error::Conflict(detail)) => {
                // Lost the check-then-insert race to a concurrent submission
                warn!(%detail, "Concurrent insert of the same user, skipping");
                Ok(EnrichOutcome::Skipped)
            }
            Err(e) => Err(EnrichError::Persist(e)),
        }
    }

    async fn infer<T>(
        &self,
        kind: InferenceKind,
        name: &str,
        parse: fn(&[u8]) -> Result<T, ParseError>,
    ) -> Result<T, EnrichError> {
        debug!(stage = ?EnrichStage::from(kind), name = %name);

        let bytes = self
            .api
            .fetch(kind, name)
            .await
            .map_err(|source| EnrichError::Fetch { kind, source })?;

        parse(&bytes).map_err(|source| EnrichError::Malformed { kind, source })
    }
}
