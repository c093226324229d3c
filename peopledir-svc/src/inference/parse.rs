//! Response decoding for the inference APIs
//!
//! Absent or `null` fields read as their zero value (age 0, empty gender,
//! probability 0, no countries). Anything that is not a JSON object, or a
//! field of the wrong type, is [`ParseError::Malformed`].

use serde::{Deserialize, Deserializer, Serialize};
use thiserror::Error;

use super::InferenceKind;

#[derive(Debug, Error)]
pub enum ParseError {
    #[error("Malformed {kind} payload: {message}")]
    Malformed { kind: InferenceKind, message: String },
}

/// agify.io answer
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct AgeInference {
    #[serde(default, deserialize_with = "nullable")]
    pub count: u64,
    #[serde(default, deserialize_with = "nullable")]
    pub name: String,
    /// 0 when the service has no data for the name
    #[serde(default, deserialize_with = "nullable")]
    pub age: u32,
}

/// genderize.io answer
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct GenderInference {
    #[serde(default, deserialize_with = "nullable")]
    pub count: u64,
    #[serde(default, deserialize_with = "nullable")]
    pub name: String,
    /// "male", "female", or empty when unknown
    #[serde(default, deserialize_with = "nullable")]
    pub gender: String,
    #[serde(default, deserialize_with = "nullable")]
    pub probability: f64,
}

/// One ranked nationality candidate
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct CountryGuess {
    pub country_id: String,
    #[serde(default, deserialize_with = "nullable")]
    pub probability: f64,
}

impl CountryGuess {
    pub fn new(country_id: impl Into<String>, probability: f64) -> Self {
        Self {
            country_id: country_id.into(),
            probability,
        }
    }
}

/// nationalize.io answer
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct NationalityInference {
    #[serde(default, deserialize_with = "nullable")]
    pub count: u64,
    #[serde(default, deserialize_with = "nullable")]
    pub name: String,
    /// Upstream order is kept; ranking is left to the resolver
    #[serde(default, deserialize_with = "nullable")]
    pub country: Vec<CountryGuess>,
}

fn nullable<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Option::unwrap_or_default)
}

fn decode<T>(kind: InferenceKind, bytes: &[u8]) -> Result<T, ParseError>
where
    T: for<'de> Deserialize<'de>,
{
    let malformed = |message: String| ParseError::Malformed { kind, message };

    let value: serde_json::Value =
        serde_json::from_slice(bytes).map_err(|e| malformed(e.to_string()))?;

    // serde would happily read a struct out of a JSON array
    if !value.is_object() {
        return Err(malformed(format!("expected a JSON object, got {}", value)));
    }

    serde_json::from_value(value).map_err(|e| malformed(e.to_string()))
}

pub fn parse_age(bytes: &[u8]) -> Result<AgeInference, ParseError> {
    decode(InferenceKind::Age, bytes)
}

pub fn parse_gender(bytes: &[u8]) -> Result<GenderInference, ParseError> {
    decode(InferenceKind::Gender, bytes)
}

pub fn parse_nation(bytes: &[u8]) -> Result<NationalityInference, ParseError> {
    decode(InferenceKind::Nation, bytes)
}
