//! SQLite implementation of [`UserStore`]
//!
//! Every operation is a single parameterised statement on a pooled connection.

use async_trait::async_trait;
use peopledir_common::db::{NameKey, NewPerson, PersonRecord};
use peopledir_common::{Error, Result};
use sqlx::{QueryBuilder, Sqlite, SqlitePool};

use super::{UserFilter, UserStore};

const SELECT_USERS: &str = "SELECT id, name, surname, patronymic, age, gender, nation FROM users";

#[derive(Clone)]
pub struct SqliteUserStore {
    pool: SqlitePool,
}

impl SqliteUserStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}

#[async_trait]
impl UserStore for SqliteUserStore {
    async fn exists(&self, key: &NameKey) -> Result<bool> {
        let found: Option<i64> = sqlx::query_scalar(
            "SELECT id FROM users WHERE name = ? AND surname = ? AND patronymic = ? LIMIT 1",
        )
        .bind(&key.name)
        .bind(&key.surname)
        .bind(&key.patronymic)
        .fetch_optional(&self.pool)
        .await?;

        Ok(found.is_some())
    }

    async fn create(&self, person: &NewPerson) -> Result<i64> {
        let result = sqlx::query(
            "INSERT INTO users (name, surname, patronymic, age, gender, nation) VALUES (?, ?, ?, ?, ?, ?)",
        )
        .bind(&person.key.name)
        .bind(&person.key.surname)
        .bind(&person.key.patronymic)
        .bind(i64::from(person.age))
        .bind(person.gender.code())
        .bind(&person.nation)
        .execute(&self.pool)
        .await
        .map_err(|e| Error::from_write(e, &describe(&person.key)))?;

        Ok(result.last_insert_rowid())
    }

    async fn get(&self, id: i64) -> Result<PersonRecord> {
        let query = format!("{} WHERE id = ?", SELECT_USERS);
        sqlx::query_as::<_, PersonRecord>(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| Error::NotFound(format!("user {}", id)))
    }

    async fn list(&self, filter: &UserFilter) -> Result<Vec<PersonRecord>> {
        let mut builder = QueryBuilder::<Sqlite>::new(SELECT_USERS);
        builder.push(" WHERE 1 = 1");

        if let Some(age_min) = filter.age_min {
            builder.push(" AND age >= ").push_bind(i64::from(age_min));
        }
        if let Some(age_max) = filter.age_max {
            builder.push(" AND age <= ").push_bind(i64::from(age_max));
        }
        if let Some(gender) = filter.gender {
            builder.push(" AND gender = ").push_bind(gender.code());
        }
        if let Some(nation) = &filter.nation {
            builder.push(" AND nation = ").push_bind(nation.clone());
        }
        builder.push(" ORDER BY id");

        let users = builder
            .build_query_as::<PersonRecord>()
            .fetch_all(&self.pool)
            .await?;

        Ok(users)
    }

    async fn update(&self, id: i64, key: &NameKey) -> Result<()> {
        let result =
            sqlx::query("UPDATE users SET name = ?, surname = ?, patronymic = ? WHERE id = ?")
                .bind(&key.name)
                .bind(&key.surname)
                .bind(&key.patronymic)
                .bind(id)
                .execute(&self.pool)
                .await
                .map_err(|e| Error::from_write(e, &describe(key)))?;

        if result.rows_affected() == 0 {
            return Err(Error::NotFound(format!("user {}", id)));
        }
        Ok(())
    }

    async fn delete(&self, id: i64) -> Result<()> {
        let result = sqlx::query("DELETE FROM users WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(Error::NotFound(format!("user {}", id)));
        }
        Ok(())
    }
}

fn describe(key: &NameKey) -> String {
    format!(
        "user '{} {} {}' already exists",
        key.surname, key.name, key.patronymic
    )
}
