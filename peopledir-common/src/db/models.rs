//! Database models

use serde::{Deserialize, Serialize, Serializer};
use sqlx::sqlite::SqliteRow;
use sqlx::Row;
use std::fmt;

/// Stored gender code.
///
/// The store keeps a two-symbol code set; upstream probabilities are
/// collapsed into it by [`Gender::from_inferred`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Gender {
    Male,
    Female,
}

impl Gender {
    pub const MALE_CODE: &'static str = "м";
    pub const FEMALE_CODE: &'static str = "ж";

    /// Map the gender API's answer: exactly `"male"` is male, anything
    /// else (`"female"`, empty, unknown) is female.
    pub fn from_inferred(gender: &str) -> Self {
        if gender == "male" {
            Gender::Male
        } else {
            Gender::Female
        }
    }

    /// Code as stored in the `gender` column
    pub fn code(self) -> &'static str {
        match self {
            Gender::Male => Self::MALE_CODE,
            Gender::Female => Self::FEMALE_CODE,
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            Self::MALE_CODE => Some(Gender::Male),
            Self::FEMALE_CODE => Some(Gender::Female),
            _ => None,
        }
    }

    /// Accept either a stored code or the English word (filter input)
    pub fn parse(value: &str) -> Option<Self> {
        match value.to_ascii_lowercase().as_str() {
            "male" => Some(Gender::Male),
            "female" => Some(Gender::Female),
            other => Self::from_code(other),
        }
    }
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl Serialize for Gender {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.code())
    }
}

/// Natural key of a person: matched exactly and case-sensitively
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NameKey {
    pub name: String,
    pub surname: String,
    pub patronymic: String,
}

impl NameKey {
    pub fn new(
        name: impl Into<String>,
        surname: impl Into<String>,
        patronymic: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            surname: surname.into(),
            patronymic: patronymic.into(),
        }
    }
}

/// Fully enriched person, ready for insert
#[derive(Debug, Clone, PartialEq)]
pub struct NewPerson {
    pub key: NameKey,
    pub age: u32,
    pub gender: Gender,
    pub nation: String,
}

/// Row of the `users` table
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PersonRecord {
    pub id: i64,
    pub name: String,
    pub surname: String,
    pub patronymic: String,
    pub age: u32,
    pub gender: Gender,
    pub nation: String,
}

impl PersonRecord {
    pub fn key(&self) -> NameKey {
        NameKey::new(&self.name, &self.surname, &self.patronymic)
    }
}

impl<'r> sqlx::FromRow<'r, SqliteRow> for PersonRecord {
    fn from_row(row: &'r SqliteRow) -> Result<Self, sqlx::Error> {
        let code: String = row.try_get("gender")?;
        let gender = Gender::from_code(&code).ok_or_else(|| sqlx::Error::ColumnDecode {
            index: "gender".to_string(),
            source: format!("unknown gender code '{}'", code).into(),
        })?;

        let age: i64 = row.try_get("age")?;
        let age = u32::try_from(age).map_err(|e| sqlx::Error::ColumnDecode {
            index: "age".to_string(),
            source: Box::new(e),
        })?;

        Ok(Self {
            id: row.try_get("id")?,
            name: row.try_get("name")?,
            surname: row.try_get("surname")?,
            patronymic: row.try_get("patronymic")?,
            age,
            gender,
            nation: row.try_get("nation")?,
        })
    }
}
