//! External demographic-inference APIs
//!
//! Three services answer "what is typical for this first name":
//! age (agify), gender (genderize) and nationality (nationalize).
//! [`UserApi`] fetches raw payloads; [`parse`] turns them into typed results.

use async_trait::async_trait;
use std::fmt;
use thiserror::Error;

pub mod client;
pub mod parse;

pub use client::HttpUserApi;
pub use parse::{
    parse_age, parse_gender, parse_nation, AgeInference, CountryGuess, GenderInference,
    NationalityInference, ParseError,
};

/// Which inference service a call targets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InferenceKind {
    Age,
    Gender,
    Nation,
}

impl fmt::Display for InferenceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            InferenceKind::Age => "age",
            InferenceKind::Gender => "gender",
            InferenceKind::Nation => "nation",
        })
    }
}

/// Transport-level failures of an inference call
#[derive(Debug, Error)]
pub enum ApiError {
    /// Upstream unreachable or connection dropped
    #[error("Network error: {0}")]
    Network(String),

    /// Request exceeded the client timeout
    #[error("Request timed out")]
    Timeout,

    /// Upstream answered with a non-2xx status
    #[error("API error {0}: {1}")]
    Status(u16, String),
}

/// Raw payload source for the three inference services
#[async_trait]
pub trait UserApi: Send + Sync {
    /// GET the payload for `name` from the service behind `kind`
    async fn fetch(&self, kind: InferenceKind, name: &str) -> Result<Vec<u8>, ApiError>;

    async fn fetch_age(&self, name: &str) -> Result<Vec<u8>, ApiError> {
        self.fetch(InferenceKind::Age, name).await
    }

    async fn fetch_gender(&self, name: &str) -> Result<Vec<u8>, ApiError> {
        self.fetch(InferenceKind::Gender, name).await
    }

    async fn fetch_nation(&self, name: &str) -> Result<Vec<u8>, ApiError> {
        self.fetch(InferenceKind::Nation, name).await
    }
}
