use postgres::{Client, NoTls, Row};

use crate::auth::domain::password::{hash_password, verify_password};
use crate::auth::domain::user_store::{NewUser, User, UserStore, UserStoreError};

/// User accounts backed by PostgreSQL.
///
/// One short-lived connection per call, like the other stores.
pub struct PostgresUserStore {
    conn_str: String,
}

impl PostgresUserStore {
    pub fn new(conn_str: impl Into<String>) -> Self {
        Self {
            conn_str: conn_str.into(),
        }
    }

    fn connect(&self) -> Result<Client, UserStoreError> {
        Client::connect(&self.conn_str, NoTls).map_err(|e| UserStoreError::Store(e.to_string()))
    }

    /// Creates the `users` table if missing.
    pub fn ensure_schema(&self) -> Result<(), UserStoreError> {
        let mut client = self.connect()?;
        client
            .batch_execute(
                "CREATE TABLE IF NOT EXISTS users (
                     id SERIAL PRIMARY KEY,
                     first_name VARCHAR(100) NOT NULL,
                     last_name VARCHAR(100) NOT NULL,
                     email VARCHAR(255) UNIQUE NOT NULL,
                     password_hash VARCHAR(64) NOT NULL,
                     is_admin BOOLEAN DEFAULT FALSE,
                     created_at TIMESTAMP DEFAULT CURRENT_TIMESTAMP,
                     last_login TIMESTAMP,
                     is_active BOOLEAN DEFAULT TRUE
                 );",
            )
            .map_err(|e| UserStoreError::Store(e.to_string()))
    }
}

fn user_from_row(row: &Row) -> User {
    User {
        id: row.get("id"),
        first_name: row.get("first_name"),
        last_name: row.get("last_name"),
        email: row.get("email"),
        is_admin: row.get("is_admin"),
    }
}

impl UserStore for PostgresUserStore {
    fn create(&self, user: &NewUser) -> Result<User, UserStoreError> {
        let mut client = self.connect()?;

        let taken = client
            .query_opt("SELECT id FROM users WHERE email = $1", &[&user.email])
            .map_err(|e| UserStoreError::Store(e.to_string()))?
            .is_some();
        if taken {
            return Err(UserStoreError::EmailTaken);
        }

        let row = client
            .query_one(
                "INSERT INTO users (first_name, last_name, email, password_hash, is_admin)
                 VALUES ($1, $2, $3, $4, FALSE)
                 RETURNING id, first_name, last_name, email, is_admin",
                &[
                    &user.first_name,
                    &user.last_name,
                    &user.email,
                    &hash_password(user.password),
                ],
            )
            .map_err(|e| UserStoreError::Store(e.to_string()))?;
        Ok(user_from_row(&row))
    }

    fn authenticate(&self, email: &str, password: &str) -> Result<User, UserStoreError> {
        let mut client = self.connect()?;

        let row = client
            .query_opt(
                "SELECT id, first_name, last_name, email, password_hash, is_admin
                 FROM users
                 WHERE email = $1 AND is_active = TRUE",
                &[&email],
            )
            .map_err(|e| UserStoreError::Store(e.to_string()))?
            .ok_or(UserStoreError::InvalidCredentials)?;

        let stored_hash: String = row.get("password_hash");
        if !verify_password(password, &stored_hash) {
            return Err(UserStoreError::InvalidCredentials);
        }

        client
            .execute(
                "UPDATE users SET last_login = CURRENT_TIMESTAMP WHERE id = $1",
                &[&row.get::<_, i32>("id")],
            )
            .map_err(|e| UserStoreError::Store(e.to_string()))?;

        Ok(user_from_row(&row))
    }
}
